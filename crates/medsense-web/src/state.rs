//! Shared application state for the web server.
//!
//! Built once at startup and read-only afterwards. The classifier either
//! loads and validates against the symptom vocabulary, or the app runs in
//! degraded mode with prediction disabled.

use std::path::Path;
use std::sync::Arc;

use medsense_db::{import_seed, load_seed, Database, DiseaseRepository, SymptomRepository};
use medsense_predict::{Classifier, LinearClassifier, Predictor, Vocabulary};
use tracing::{error, info, warn};

use crate::config::{Config, ModelConfig};
use crate::templates::Templates;

/// Message shown on every page while the classifier is unavailable.
pub const MODEL_UNAVAILABLE_MESSAGE: &str = "система диагностики временно недоступна";

/// Classifier availability, fixed at startup.
#[derive(Debug, Clone)]
pub enum ModelStatus {
    Ready(Arc<Predictor>),
    Unavailable { reason: String },
}

impl ModelStatus {
    /// Load the classifier artifact and validate it against the vocabulary.
    /// Any failure degrades to `Unavailable` instead of aborting startup.
    pub fn load(config: &ModelConfig, vocabulary: Vocabulary) -> Self {
        let classifier = match LinearClassifier::load(&config.path) {
            Ok(c) => c,
            Err(e) => {
                error!("Classifier unavailable, running in degraded mode: {e}");
                return ModelStatus::Unavailable { reason: e.to_string() };
            }
        };
        Self::from_classifier(Arc::new(classifier), vocabulary, config.top_k)
    }

    pub fn from_classifier(classifier: Arc<dyn Classifier>, vocabulary: Vocabulary, top_k: usize) -> Self {
        match Predictor::new(vocabulary, classifier) {
            Ok(p) => {
                info!(
                    "✅ Classifier ready: {} features, {} labels",
                    p.vocabulary().len(),
                    p.labels().len()
                );
                ModelStatus::Ready(Arc::new(p.with_top_k(top_k)))
            }
            Err(e) => {
                error!("Classifier rejected, running in degraded mode: {e}");
                ModelStatus::Unavailable { reason: e.to_string() }
            }
        }
    }

    pub fn predictor(&self) -> Option<&Arc<Predictor>> {
        match self {
            ModelStatus::Ready(p) => Some(p),
            ModelStatus::Unavailable { .. } => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.predictor().is_some()
    }

    /// User-facing warning, if any. Internal reasons stay in the logs.
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            ModelStatus::Ready(_) => None,
            ModelStatus::Unavailable { .. } => Some(MODEL_UNAVAILABLE_MESSAGE),
        }
    }

    /// Classifier label set, empty when unavailable.
    pub fn labels(&self) -> &[String] {
        match self {
            ModelStatus::Ready(p) => p.labels(),
            ModelStatus::Unavailable { .. } => &[],
        }
    }
}

/// Shared state injected into every Axum handler.
pub struct AppState {
    pub diseases: DiseaseRepository,
    pub vocabulary: Vocabulary,
    pub model: ModelStatus,
    pub templates: Templates,
    pub config: Config,
}

impl AppState {
    /// Assemble state from an initialised database and a model status.
    /// The symptom vocabulary is read once, here.
    pub fn new(db: Arc<Database>, model: ModelStatus, config: Config) -> anyhow::Result<Self> {
        let vocabulary = Vocabulary::new(SymptomRepository::new(db.clone()).vocabulary()?);
        Ok(Self {
            diseases: DiseaseRepository::new(db),
            vocabulary,
            model,
            templates: Templates::new()?,
            config,
        })
    }

    /// Full startup: open the store, seed it if empty, load the classifier.
    pub fn build(config: Config) -> anyhow::Result<Self> {
        let db = Arc::new(Database::open(&config.database.path)?);
        db.initialize()?;
        info!("Database ready at {}", db.path());

        let diseases = DiseaseRepository::new(db.clone());
        let symptoms = SymptomRepository::new(db.clone());

        if config.database.seed_on_empty && diseases.count()? == 0 {
            seed_database(&config.database.seed_path, &diseases, &symptoms)?;
        }

        let vocabulary = Vocabulary::new(symptoms.vocabulary()?);
        info!(
            "Knowledge base: {} diseases, {} symptoms in vocabulary",
            diseases.count()?,
            vocabulary.len()
        );

        let model = ModelStatus::load(&config.model, vocabulary);
        Self::new(db, model, config)
    }
}

fn seed_database(
    seed_path: &str,
    diseases: &DiseaseRepository,
    symptoms: &SymptomRepository,
) -> anyhow::Result<()> {
    if !Path::new(seed_path).exists() {
        warn!("Knowledge base is empty and seed file {} does not exist", seed_path);
        return Ok(());
    }
    let seed = load_seed(seed_path)?;
    let report = import_seed(diseases, symptoms, seed)?;
    info!(
        "Seeded knowledge base from {}: {} diseases, {} symptoms",
        seed_path, report.diseases_loaded, report.symptoms_loaded
    );
    Ok(())
}

pub type SharedState = Arc<AppState>;

#[cfg(test)]
mod tests {
    use super::*;
    use medsense_predict::MockClassifier;

    fn vocab() -> Vocabulary {
        Vocabulary::new(vec!["Кашель".to_string(), "Насморк".to_string()])
    }

    #[test]
    fn test_ready_status() {
        let status = ModelStatus::from_classifier(
            Arc::new(MockClassifier::new(&["Грипп", "Простуда"], 2)),
            vocab(),
            5,
        );
        assert!(status.is_ready());
        assert!(status.user_message().is_none());
        assert_eq!(status.labels().len(), 2);
    }

    #[test]
    fn test_width_mismatch_degrades() {
        let status = ModelStatus::from_classifier(
            Arc::new(MockClassifier::new(&["Грипп"], 7)),
            vocab(),
            5,
        );
        assert!(!status.is_ready());
        assert_eq!(status.user_message(), Some(MODEL_UNAVAILABLE_MESSAGE));
        assert!(status.labels().is_empty());
    }

    #[test]
    fn test_missing_artifact_degrades() {
        let config = ModelConfig {
            path: "/nonexistent/model.json".to_string(),
            ..ModelConfig::default()
        };
        let status = ModelStatus::load(&config, vocab());
        match status {
            ModelStatus::Unavailable { reason } => assert!(reason.contains("model.json")),
            ModelStatus::Ready(_) => panic!("expected degraded mode"),
        }
    }

    #[test]
    fn test_build_without_seed_or_model_degrades() {
        let dir = std::env::temp_dir().join(format!("medsense-state-{}", std::process::id()));
        let mut config = Config::default();
        config.database.path = dir.join("test.db").to_string_lossy().to_string();
        config.database.seed_path = dir.join("missing.json").to_string_lossy().to_string();
        config.model.path = dir.join("missing-model.json").to_string_lossy().to_string();

        let state = AppState::build(config).unwrap();
        assert!(state.vocabulary.is_empty());
        assert!(!state.model.is_ready());
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_build_with_shipped_data() {
        let dir = std::env::temp_dir().join(format!("medsense-shipped-{}", std::process::id()));
        let data = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data");
        let mut config = Config::default();
        config.database.path = dir.join("test.db").to_string_lossy().to_string();
        config.database.seed_path = data.join("seed.json").to_string_lossy().to_string();
        config.model.path = data.join("model.json").to_string_lossy().to_string();

        let state = AppState::build(config).unwrap();
        assert!(state.model.is_ready(), "shipped model must match the shipped vocabulary");
        assert_eq!(state.vocabulary.len(), 20);
        assert!(state.diseases.count().unwrap() > 0);

        let predictor = state.model.predictor().unwrap();
        let prediction = predictor
            .predict(&["Сыпь".to_string(), "Зуд".to_string()], &state.diseases)
            .unwrap();
        assert_eq!(prediction.results[0].disease, "Крапивница");
        let _ = std::fs::remove_dir_all(dir);
    }
}
