//! Binary feature encoding of a symptom selection.

use crate::vocabulary::Vocabulary;

/// Fixed-length 0/1 vector aligned to a [`Vocabulary`].
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    values: Vec<f32>,
    active: usize,
}

impl FeatureVector {
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Number of features set to 1.
    pub fn active(&self) -> usize {
        self.active
    }

    pub fn is_zero(&self) -> bool {
        self.active == 0
    }
}

/// Encode submitted symptom names against the vocabulary.
///
/// Position i is 1 when `vocabulary[i]` was submitted. Names outside the
/// vocabulary are ignored, and repeats count once.
pub fn encode<S: AsRef<str>>(vocabulary: &Vocabulary, selected: &[S]) -> FeatureVector {
    let mut values = vec![0.0f32; vocabulary.len()];
    let mut active = 0;

    for name in selected {
        if let Some(idx) = vocabulary.position(name.as_ref()) {
            if values[idx] == 0.0 {
                values[idx] = 1.0;
                active += 1;
            }
        }
    }

    FeatureVector { values, active }
}
