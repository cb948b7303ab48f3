//! Trait for disease metadata access.
//!
//! Lets the predictor resolve disease names without being coupled to the
//! storage crate.

use std::collections::HashMap;

use crate::entities::{fold_name, Disease};
use crate::error::Result;

/// Key-by-name lookup over the disease knowledge base.
pub trait DiseaseSource: Send + Sync {
    /// Case-insensitive exact match on the disease name.
    /// Returns `Ok(None)` when no record exists.
    fn find_disease(&self, name: &str) -> Result<Option<Disease>>;
}

// ── Mock Implementation for Testing ────────────────────────────────────────

/// In-memory source with hardcoded records for unit tests.
#[derive(Default)]
pub struct MockDiseaseSource {
    data: HashMap<String, Disease>,
}

impl MockDiseaseSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a disease record.
    pub fn with(mut self, disease: Disease) -> Self {
        self.data.insert(fold_name(&disease.name), disease);
        self
    }
}

impl DiseaseSource for MockDiseaseSource {
    fn find_disease(&self, name: &str) -> Result<Option<Disease>> {
        Ok(self.data.get(&fold_name(name)).cloned())
    }
}
