//! Classifier seam and the shipped linear model.
//!
//! The predictor treats the classifier as a black box: a fixed-width
//! numeric vector goes in, a probability distribution over a label set
//! fixed at load time comes out.

use std::path::Path;

use candle_core::{Device, Tensor};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{PredictError, Result};

/// Black-box multi-class probability model.
pub trait Classifier: Send + Sync {
    /// Ordered label set. Probability i belongs to `classes()[i]`.
    fn classes(&self) -> &[String];

    /// Number of input features the model expects.
    fn input_width(&self) -> usize;

    /// Score one feature vector. Returns one probability per class.
    fn predict_proba(&self, features: &[f32]) -> Result<Vec<f64>>;
}

// ── Linear softmax model (candle) ──────────────────────────────────────────

/// Serialized form of [`LinearClassifier`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModelFile {
    pub classes: Vec<String>,
    /// One row of `input_width` weights per class.
    pub weights: Vec<Vec<f32>>,
    pub bias: Vec<f32>,
}

/// Multinomial logistic regression: `softmax(x · Wᵀ + b)`.
pub struct LinearClassifier {
    classes: Vec<String>,
    /// Stored transposed, shape (input_width, num_classes).
    weights_t: Tensor,
    /// Shape (num_classes,).
    bias: Tensor,
    input_width: usize,
    device: Device,
}

impl LinearClassifier {
    /// Load a model artifact from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading classifier from {}", path.display());
        let content = std::fs::read_to_string(path)
            .map_err(|e| PredictError::ModelLoad(format!("{}: {}", path.display(), e)))?;
        let file: LinearModelFile = serde_json::from_str(&content)
            .map_err(|e| PredictError::ModelLoad(format!("{}: {}", path.display(), e)))?;
        Self::from_file(file)
    }

    /// Build from an already parsed artifact, validating its shapes.
    pub fn from_file(file: LinearModelFile) -> Result<Self> {
        let num_classes = file.classes.len();
        if num_classes == 0 {
            return Err(PredictError::ModelLoad("model has no classes".to_string()));
        }
        if file.weights.len() != num_classes {
            return Err(PredictError::ModelLoad(format!(
                "expected {} weight rows, got {}",
                num_classes,
                file.weights.len()
            )));
        }
        if file.bias.len() != num_classes {
            return Err(PredictError::ModelLoad(format!(
                "expected {} bias terms, got {}",
                num_classes,
                file.bias.len()
            )));
        }

        let input_width = file.weights[0].len();
        if input_width == 0 || file.weights.iter().any(|row| row.len() != input_width) {
            return Err(PredictError::ModelLoad("weight rows must share a non-zero width".to_string()));
        }

        // Transpose into row-major (input_width, num_classes)
        let mut flat = Vec::with_capacity(input_width * num_classes);
        for feature in 0..input_width {
            for row in &file.weights {
                flat.push(row[feature]);
            }
        }

        let device = Device::Cpu;
        let weights_t = Tensor::from_vec(flat, (input_width, num_classes), &device)?;
        let bias = Tensor::from_vec(file.bias, num_classes, &device)?;
        debug!("Linear classifier: {} features, {} classes", input_width, num_classes);

        Ok(Self {
            classes: file.classes,
            weights_t,
            bias,
            input_width,
            device,
        })
    }
}

impl Classifier for LinearClassifier {
    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn input_width(&self) -> usize {
        self.input_width
    }

    fn predict_proba(&self, features: &[f32]) -> Result<Vec<f64>> {
        if features.len() != self.input_width {
            return Err(PredictError::Classifier(format!(
                "expected {} features, got {}",
                self.input_width,
                features.len()
            )));
        }

        // [1, width] @ [width, classes] = [1, classes]
        let x = Tensor::from_vec(features.to_vec(), (1, self.input_width), &self.device)?;
        let logits = x.matmul(&self.weights_t)?.broadcast_add(&self.bias)?;
        let probs = candle_nn::ops::softmax(&logits, 1)?;
        let row = probs.squeeze(0)?.to_vec1::<f32>()?;

        Ok(row.into_iter().map(f64::from).collect())
    }
}

// ── Mock Implementation for Testing ────────────────────────────────────────

enum MockBehaviour {
    Fixed(Vec<f64>),
    Fail(String),
    Panic,
}

/// Classifier with a canned answer, for unit tests and demos.
pub struct MockClassifier {
    classes: Vec<String>,
    input_width: usize,
    behaviour: MockBehaviour,
}

impl MockClassifier {
    /// Uniform distribution over `classes`.
    pub fn new(classes: &[&str], input_width: usize) -> Self {
        let n = classes.len().max(1);
        Self {
            classes: classes.iter().map(|c| c.to_string()).collect(),
            input_width,
            behaviour: MockBehaviour::Fixed(vec![1.0 / n as f64; classes.len()]),
        }
    }

    /// Always return this distribution.
    pub fn with_probabilities(mut self, probs: Vec<f64>) -> Self {
        self.behaviour = MockBehaviour::Fixed(probs);
        self
    }

    /// Always return an error.
    pub fn failing(mut self, message: &str) -> Self {
        self.behaviour = MockBehaviour::Fail(message.to_string());
        self
    }

    /// Panic inside `predict_proba`.
    pub fn panicking(mut self) -> Self {
        self.behaviour = MockBehaviour::Panic;
        self
    }
}

impl Classifier for MockClassifier {
    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn input_width(&self) -> usize {
        self.input_width
    }

    fn predict_proba(&self, _features: &[f32]) -> Result<Vec<f64>> {
        match &self.behaviour {
            MockBehaviour::Fixed(probs) => Ok(probs.clone()),
            MockBehaviour::Fail(msg) => Err(PredictError::Classifier(msg.clone())),
            MockBehaviour::Panic => panic!("mock classifier panicked"),
        }
    }
}
