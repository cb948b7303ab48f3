//! medsense Database Layer
//!
//! Embedded SQLite store for the disease knowledge base and the symptom
//! vocabulary.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use medsense_db::{Database, DiseaseRepository};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::open("./data/medsense.db")?;
//!     db.initialize()?;
//!
//!     let diseases = DiseaseRepository::new(Arc::new(db));
//!     println!("{} diseases", diseases.count()?);
//!     Ok(())
//! }
//! ```

pub mod database;
pub mod error;
pub mod schema;
pub mod diseases;
pub mod symptoms;
pub mod seed;

pub use database::Database;
pub use error::{DbError, Result};
pub use diseases::DiseaseRepository;
pub use symptoms::SymptomRepository;
pub use seed::{import_seed, load_seed, SeedData, SeedDisease, SeedReport};
