//! Prediction orchestration: encode, score, rank, enrich.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use medsense_common::DiseaseSource;
use serde::Serialize;
use tracing::{debug, warn};

use crate::classifier::Classifier;
use crate::encoder::{encode, FeatureVector};
use crate::error::{PredictError, Result};
use crate::resolver::resolve;
use crate::topk::top_k;
use crate::vocabulary::Vocabulary;

pub const DEFAULT_TOP_K: usize = 5;

/// One ranked disease candidate.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionResult {
    pub disease: String,
    pub probability: f64,
    /// `probability` as a percentage with two decimals, e.g. "80.00%".
    pub percentage: String,
    pub description: String,
    pub treatment: String,
}

/// Full answer to one symptom submission.
#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    pub results: Vec<PredictionResult>,
    /// Symptoms as submitted, including any outside the vocabulary.
    pub selected_symptoms: Vec<String>,
}

impl Prediction {
    pub fn symptoms_count(&self) -> usize {
        self.selected_symptoms.len()
    }
}

/// Loaded classifier plus the vocabulary it was validated against.
/// Immutable after construction and shared across requests.
pub struct Predictor {
    vocabulary: Vocabulary,
    classifier: Arc<dyn Classifier>,
    top_k: usize,
}

impl std::fmt::Debug for Predictor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Predictor")
            .field("vocabulary", &self.vocabulary.len())
            .field("classes", &self.classifier.classes().len())
            .field("top_k", &self.top_k)
            .finish()
    }
}

impl Predictor {
    /// Pair a vocabulary with a classifier.
    ///
    /// Fails when the vocabulary length differs from the model input width.
    pub fn new(vocabulary: Vocabulary, classifier: Arc<dyn Classifier>) -> Result<Self> {
        if vocabulary.len() != classifier.input_width() {
            return Err(PredictError::WidthMismatch {
                vocabulary: vocabulary.len(),
                model: classifier.input_width(),
            });
        }
        Ok(Self {
            vocabulary,
            classifier,
            top_k: DEFAULT_TOP_K,
        })
    }

    pub fn with_top_k(mut self, k: usize) -> Self {
        self.top_k = k.max(1);
        self
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// The classifier's label set.
    pub fn labels(&self) -> &[String] {
        self.classifier.classes()
    }

    /// Rank diseases for a symptom submission.
    ///
    /// Returns [`PredictError::NoSymptoms`] before touching the classifier
    /// when no submitted name is in the vocabulary.
    pub fn predict(&self, selected: &[String], source: &dyn DiseaseSource) -> Result<Prediction> {
        let features = encode(&self.vocabulary, selected);
        if features.is_zero() {
            return Err(PredictError::NoSymptoms);
        }
        debug!("Encoded {} of {} submitted symptoms", features.active(), selected.len());

        let probs = self.score(&features)?;
        let classes = self.classifier.classes();

        let results = top_k(&probs, self.top_k)
            .into_iter()
            .map(|idx| {
                let name = &classes[idx];
                let probability = probs[idx];
                let disease = resolve(source, name)?.into_disease();
                Ok(PredictionResult {
                    disease: name.clone(),
                    probability,
                    percentage: format_percentage(probability),
                    description: disease.description,
                    treatment: disease.treatment,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Prediction {
            results,
            selected_symptoms: selected.to_vec(),
        })
    }

    /// Call the classifier, turning errors, panics and malformed output
    /// into [`PredictError::Classifier`].
    fn score(&self, features: &FeatureVector) -> Result<Vec<f64>> {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            self.classifier.predict_proba(features.values())
        }));

        let probs = match outcome {
            Ok(result) => result?,
            Err(_) => {
                warn!("Classifier panicked during predict_proba");
                return Err(PredictError::Classifier("classifier panicked".to_string()));
            }
        };

        let expected = self.classifier.classes().len();
        if probs.len() != expected {
            return Err(PredictError::Classifier(format!(
                "expected {} probabilities, got {}",
                expected,
                probs.len()
            )));
        }
        Ok(probs)
    }
}

/// Format a probability in `[0, 1]` as a percentage, e.g. `0.8` → "80.00%".
pub fn format_percentage(probability: f64) -> String {
    format!("{:.2}%", probability * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::MockClassifier;
    use medsense_common::source::MockDiseaseSource;
    use medsense_common::Disease;

    fn vocab() -> Vocabulary {
        Vocabulary::new(vec![
            "Кашель".to_string(),
            "Высокая температура".to_string(),
            "Насморк".to_string(),
        ])
    }

    fn flu() -> Disease {
        Disease {
            name: "Грипп".to_string(),
            description: "Острая вирусная инфекция".to_string(),
            treatment: "Покой, обильное питьё".to_string(),
            symptoms: vec!["Кашель".to_string(), "Высокая температура".to_string()],
            severity: "medium".to_string(),
            specialist: "Терапевт".to_string(),
            category: "Инфекционные".to_string(),
        }
    }

    fn predictor(classifier: MockClassifier) -> Predictor {
        Predictor::new(vocab(), Arc::new(classifier)).unwrap()
    }

    fn selected(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_end_to_end_top_result() {
        let p = predictor(
            MockClassifier::new(&["Грипп", "Простуда", "COVID-19"], 3)
                .with_probabilities(vec![0.8, 0.15, 0.05]),
        );
        let source = MockDiseaseSource::new().with(flu());

        let prediction = p
            .predict(&selected(&["Кашель", "Высокая температура"]), &source)
            .unwrap();

        assert_eq!(prediction.results.len(), 3);
        let top = &prediction.results[0];
        assert_eq!(top.disease, "Грипп");
        assert_eq!(top.percentage, "80.00%");
        assert_eq!(top.description, "Острая вирусная инфекция");

        let names: Vec<&str> = prediction.results.iter().map(|r| r.disease.as_str()).collect();
        assert_eq!(names, vec!["Грипп", "Простуда", "COVID-19"]);
        assert_eq!(prediction.results[1].percentage, "15.00%");
        assert_eq!(prediction.symptoms_count(), 2);
    }

    #[test]
    fn test_unknown_result_gets_placeholder_text() {
        let p = predictor(
            MockClassifier::new(&["Грипп", "Простуда"], 3).with_probabilities(vec![0.3, 0.7]),
        );
        let source = MockDiseaseSource::new().with(flu());
        let prediction = p.predict(&selected(&["Насморк"]), &source).unwrap();

        assert_eq!(prediction.results[0].disease, "Простуда");
        assert!(prediction.results[0].description.starts_with(crate::UNKNOWN_MARKER));
    }

    #[test]
    fn test_top_k_limits_results() {
        let classes = ["A", "B", "C", "D", "E", "F", "G"];
        let p = predictor(
            MockClassifier::new(&classes, 3)
                .with_probabilities(vec![0.01, 0.3, 0.02, 0.25, 0.2, 0.12, 0.1]),
        );
        let prediction = p.predict(&selected(&["Кашель"]), &MockDiseaseSource::new()).unwrap();
        let names: Vec<&str> = prediction.results.iter().map(|r| r.disease.as_str()).collect();
        assert_eq!(names, vec!["B", "D", "E", "F", "G"]);
    }

    #[test]
    fn test_empty_and_unknown_selection_rejected() {
        let p = predictor(MockClassifier::new(&["Грипп"], 3).panicking());
        let source = MockDiseaseSource::new();

        // The panicking classifier proves it is never called
        assert!(matches!(p.predict(&[], &source), Err(PredictError::NoSymptoms)));
        assert!(matches!(
            p.predict(&selected(&["Симптом1", "кашель"]), &source),
            Err(PredictError::NoSymptoms)
        ));
    }

    #[test]
    fn test_classifier_error_is_contained() {
        let p = predictor(MockClassifier::new(&["Грипп"], 3).failing("ML model failed"));
        let err = p.predict(&selected(&["Кашель"]), &MockDiseaseSource::new()).unwrap_err();
        assert!(matches!(err, PredictError::Classifier(_)));
    }

    #[test]
    fn test_classifier_panic_is_contained() {
        let p = predictor(MockClassifier::new(&["Грипп"], 3).panicking());
        let err = p.predict(&selected(&["Кашель"]), &MockDiseaseSource::new()).unwrap_err();
        assert!(matches!(err, PredictError::Classifier(_)));
    }

    #[test]
    fn test_wrong_distribution_length_is_classifier_error() {
        let p = predictor(MockClassifier::new(&["Грипп", "Простуда"], 3).with_probabilities(vec![1.0]));
        let err = p.predict(&selected(&["Кашель"]), &MockDiseaseSource::new()).unwrap_err();
        assert!(matches!(err, PredictError::Classifier(_)));
    }

    #[test]
    fn test_width_mismatch_rejected_at_construction() {
        let err = Predictor::new(vocab(), Arc::new(MockClassifier::new(&["Грипп"], 4))).unwrap_err();
        assert!(matches!(err, PredictError::WidthMismatch { vocabulary: 3, model: 4 }));
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(0.8), "80.00%");
        assert_eq!(format_percentage(0.5), "50.00%");
        assert_eq!(format_percentage(1.0), "100.00%");
        assert_eq!(format_percentage(0.0), "0.00%");
    }
}
