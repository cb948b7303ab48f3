//! medsense-predict: symptom-based disease prediction.
//!
//! Pipeline: ordered symptom vocabulary → binary feature vector →
//! classifier probabilities → top-k selection → metadata enrichment.

pub mod error;
pub mod vocabulary;
pub mod encoder;
pub mod classifier;
pub mod topk;
pub mod resolver;
pub mod suggest;
pub mod predictor;

pub use classifier::{Classifier, LinearClassifier, MockClassifier};
pub use error::{PredictError, Result};
pub use predictor::{Prediction, PredictionResult, Predictor, DEFAULT_TOP_K};
pub use resolver::{resolve, Resolution, UNKNOWN_MARKER};
pub use suggest::{suggest, DEFAULT_MAX_SUGGESTIONS, DEFAULT_SUGGESTION_CUTOFF};
pub use vocabulary::{LetterGroup, Vocabulary};
