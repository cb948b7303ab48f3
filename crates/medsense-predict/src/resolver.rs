//! Disease metadata resolution with an "unknown disease" fallback.

use medsense_common::{Disease, DiseaseSource, Severity};

use crate::error::Result;

/// Marker phrase at the start of every placeholder description.
pub const UNKNOWN_MARKER: &str = "Информация о заболевании";

const PLACEHOLDER_SPECIALIST: &str = "Терапевт";
const PLACEHOLDER_CATEGORY: &str = "Уточняется";
const PLACEHOLDER_SYMPTOM: &str = "Информация уточняется";
const PLACEHOLDER_TREATMENT: &str = "Для назначения лечения обратитесь к квалифицированному медицинскому \
     специалисту. Не занимайтесь самолечением.";

/// Result of looking a disease up by name.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Known(Disease),
    /// No record; carries a synthetic placeholder.
    Unknown(Disease),
}

impl Resolution {
    pub fn disease(&self) -> &Disease {
        match self {
            Resolution::Known(d) | Resolution::Unknown(d) => d,
        }
    }

    pub fn into_disease(self) -> Disease {
        match self {
            Resolution::Known(d) | Resolution::Unknown(d) => d,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Resolution::Unknown(_))
    }
}

/// Look a disease up by case-insensitive name, falling back to a placeholder.
pub fn resolve(source: &dyn DiseaseSource, name: &str) -> Result<Resolution> {
    Ok(match source.find_disease(name)? {
        Some(disease) => Resolution::Known(disease),
        None => Resolution::Unknown(placeholder(name)),
    })
}

/// Synthetic record for a disease missing from the knowledge base.
pub fn placeholder(name: &str) -> Disease {
    Disease {
        name: name.to_string(),
        description: format!(
            "{UNKNOWN_MARKER} '{name}' готовится нашими специалистами. \
             Обратитесь к врачу для точной диагностики и лечения."
        ),
        treatment: PLACEHOLDER_TREATMENT.to_string(),
        symptoms: vec![PLACEHOLDER_SYMPTOM.to_string()],
        severity: Severity::Unknown.as_code().to_string(),
        specialist: PLACEHOLDER_SPECIALIST.to_string(),
        category: PLACEHOLDER_CATEGORY.to_string(),
    }
}
