//! Knowledge-base records shared by the store, the predictor and the web layer.

use serde::{Deserialize, Serialize};

use crate::severity::{severity_display, Severity};

/// A symptom from the feature vocabulary.
/// `id` follows insertion order and fixes the feature position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symptom {
    pub id: i64,
    pub name: String,
}

/// A disease record as stored in the knowledge base.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Disease {
    pub name: String,
    pub description: String,
    pub treatment: String,
    pub symptoms: Vec<String>,
    /// Raw severity code (`high`, `medium`, `low`, `variable`, `unknown`).
    /// Kept as entered; unrecognised codes degrade to `unknown` on display.
    pub severity: String,
    pub specialist: String,
    pub category: String,
}

impl Disease {
    pub fn severity(&self) -> Severity {
        Severity::from_code(&self.severity)
    }

    /// Severity label for display, e.g. "ВЫСОКАЯ".
    pub fn severity_display(&self) -> &'static str {
        severity_display(&self.severity)
    }

    /// Uppercased first character of the name, used for alphabetical indexes.
    pub fn initial(&self) -> Option<String> {
        self.name.chars().next().map(|c| c.to_uppercase().collect())
    }
}

/// Fold a disease name for case-insensitive comparison.
/// `str::to_lowercase` is Unicode-aware, so Cyrillic names fold correctly.
/// Whitespace is significant: " Грипп" is a different name.
pub fn fold_name(name: &str) -> String {
    name.to_lowercase()
}
