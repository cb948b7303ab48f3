//! Error types for the prediction pipeline.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PredictError>;

#[derive(Error, Debug)]
pub enum PredictError {
    /// No submitted symptom is part of the vocabulary.
    #[error("No known symptom selected")]
    NoSymptoms,

    #[error("Classifier error: {0}")]
    Classifier(String),

    #[error("Model loading failed: {0}")]
    ModelLoad(String),

    #[error("Vocabulary has {vocabulary} symptoms but the model expects {model} features")]
    WidthMismatch { vocabulary: usize, model: usize },

    #[error("Disease lookup failed: {0}")]
    Lookup(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<candle_core::Error> for PredictError {
    fn from(e: candle_core::Error) -> Self {
        PredictError::Classifier(e.to_string())
    }
}

impl From<medsense_common::MedsenseError> for PredictError {
    fn from(e: medsense_common::MedsenseError) -> Self {
        PredictError::Lookup(e.to_string())
    }
}
