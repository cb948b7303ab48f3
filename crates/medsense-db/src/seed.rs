//! Seed import for an empty knowledge base.
//!
//! Replaces the disease table with the records from a JSON seed file and
//! fills the symptom vocabulary when it is empty. Fields missing from a
//! seed record take fixed defaults.

use std::path::Path;

use medsense_common::Disease;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::diseases::DiseaseRepository;
use crate::error::Result;
use crate::symptoms::SymptomRepository;

/// Contents of a seed file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedData {
    /// Ordered symptom vocabulary. Order defines feature positions.
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub diseases: Vec<SeedDisease>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedDisease {
    pub name: String,
    #[serde(default = "default_description")]
    pub description: String,
    #[serde(default = "default_treatment")]
    pub treatment: String,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default = "default_severity")]
    pub severity: String,
    #[serde(default = "default_specialist")]
    pub specialist: String,
    #[serde(default = "default_category")]
    pub category: String,
}

fn default_description() -> String { "Описание отсутствует".to_string() }
fn default_treatment()   -> String { "Лечение не указано".to_string() }
fn default_severity()    -> String { "unknown".to_string() }
fn default_specialist()  -> String { "Терапевт".to_string() }
fn default_category()    -> String { "Уточняется".to_string() }

impl From<SeedDisease> for Disease {
    fn from(s: SeedDisease) -> Self {
        Disease {
            name: s.name,
            description: s.description,
            treatment: s.treatment,
            symptoms: s.symptoms,
            severity: s.severity,
            specialist: s.specialist,
            category: s.category,
        }
    }
}

/// Outcome of a seed import.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub diseases_deleted: usize,
    pub diseases_loaded: usize,
    pub symptoms_loaded: usize,
}

/// Read and parse a seed file.
pub fn load_seed(path: impl AsRef<Path>) -> Result<SeedData> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Replace all diseases with the seed records and fill the symptom table if
/// it is empty. Existing symptoms are never touched: their order is the
/// feature layout the classifier was trained on.
pub fn import_seed(
    diseases: &DiseaseRepository,
    symptoms: &SymptomRepository,
    seed: SeedData,
) -> Result<SeedReport> {
    let diseases_deleted = diseases.delete_all()?;
    info!("Seed import: removed {} existing disease records", diseases_deleted);

    let records: Vec<Disease> = seed.diseases.into_iter().map(Disease::from).collect();
    let diseases_loaded = diseases.insert_batch(&records)?;

    let symptoms_loaded = if symptoms.count()? == 0 {
        symptoms.insert_batch(&seed.symptoms)?
    } else {
        0
    };

    info!(
        "Seed import: loaded {} diseases and {} symptoms",
        diseases_loaded, symptoms_loaded
    );

    Ok(SeedReport {
        diseases_deleted,
        diseases_loaded,
        symptoms_loaded,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::Database;
    use std::sync::Arc;

    const SEED_JSON: &str = r#"{
        "symptoms": ["Кашель", "Высокая температура", "Насморк"],
        "diseases": [
            {
                "name": "Грипп",
                "description": "Острая вирусная инфекция",
                "treatment": "Покой",
                "symptoms": ["Кашель", "Высокая температура"],
                "severity": "medium",
                "specialist": "Терапевт",
                "category": "Инфекционные"
            },
            { "name": "Простуда" }
        ]
    }"#;

    fn repos() -> (DiseaseRepository, SymptomRepository) {
        let db = Database::open_in_memory().unwrap();
        db.initialize().unwrap();
        let db = Arc::new(db);
        (DiseaseRepository::new(db.clone()), SymptomRepository::new(db))
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let seed: SeedData = serde_json::from_str(SEED_JSON).unwrap();
        let cold = Disease::from(seed.diseases[1].clone());
        assert_eq!(cold.description, "Описание отсутствует");
        assert_eq!(cold.treatment, "Лечение не указано");
        assert!(cold.symptoms.is_empty());
        assert_eq!(cold.severity, "unknown");
        assert_eq!(cold.specialist, "Терапевт");
        assert_eq!(cold.category, "Уточняется");
    }

    #[test]
    fn test_import_loads_diseases_and_symptoms() {
        let (diseases, symptoms) = repos();
        let seed: SeedData = serde_json::from_str(SEED_JSON).unwrap();

        let report = import_seed(&diseases, &symptoms, seed).unwrap();
        assert_eq!(report, SeedReport { diseases_deleted: 0, diseases_loaded: 2, symptoms_loaded: 3 });
        assert_eq!(
            symptoms.vocabulary().unwrap(),
            vec!["Кашель", "Высокая температура", "Насморк"]
        );
        assert!(diseases.find_by_name("грипп").unwrap().is_some());
    }

    #[test]
    fn test_reimport_replaces_diseases_keeps_symptoms() {
        let (diseases, symptoms) = repos();
        let seed: SeedData = serde_json::from_str(SEED_JSON).unwrap();
        import_seed(&diseases, &symptoms, seed.clone()).unwrap();

        let mut second = seed;
        second.symptoms = vec!["Сыпь".to_string()];
        second.diseases.truncate(1);
        let report = import_seed(&diseases, &symptoms, second).unwrap();

        assert_eq!(report.diseases_deleted, 2);
        assert_eq!(report.diseases_loaded, 1);
        assert_eq!(report.symptoms_loaded, 0);
        assert_eq!(symptoms.count().unwrap(), 3);
    }
}
