//! medsense-common: Shared types, errors, and traits used across all medsense crates.

pub mod error;
pub mod entities;
pub mod severity;
pub mod source;

// Re-export commonly used types
pub use entities::{Disease, Symptom};
pub use error::{MedsenseError, Result};
pub use severity::{severity_display, Severity};
pub use source::DiseaseSource;
