//! medsense-web: Web GUI for symptom-based disease suggestion.
//! Provides:
//!   - Symptom selection form and ranked predictions
//!   - Disease detail pages with fuzzy "did you mean" suggestions
//!   - Alphabetical knowledge base
//!   - Static informational pages

pub mod config;
pub mod router;
pub mod handlers;
pub mod state;
pub mod templates;
