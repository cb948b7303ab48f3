//! Configuration loading for medsense.
//! Reads medsense.toml from the current directory or the path in MEDSENSE_CONFIG.

use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub model: ModelConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

fn default_bind()       -> String { "127.0.0.1:8000".to_string() }
fn default_static_dir() -> String { "static".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            static_dir: default_static_dir(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: String,
    #[serde(default = "default_seed_path")]
    pub seed_path: String,
    #[serde(default = "bool_true")]
    pub seed_on_empty: bool,
}

fn default_db_path()   -> String { "data/medsense.db".to_string() }
fn default_seed_path() -> String { "data/seed.json".to_string() }
fn bool_true()         -> bool   { true }

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            seed_path: default_seed_path(),
            seed_on_empty: bool_true(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default = "default_model_path")]
    pub path: String,
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    #[serde(default = "default_suggestion_cutoff")]
    pub suggestion_cutoff: f64,
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,
}

fn default_model_path()        -> String { "data/model.json".to_string() }
fn default_top_k()             -> usize  { medsense_predict::DEFAULT_TOP_K }
fn default_suggestion_cutoff() -> f64    { medsense_predict::DEFAULT_SUGGESTION_CUTOFF }
fn default_max_suggestions()   -> usize  { medsense_predict::DEFAULT_MAX_SUGGESTIONS }

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: default_model_path(),
            top_k: default_top_k(),
            suggestion_cutoff: default_suggestion_cutoff(),
            max_suggestions: default_max_suggestions(),
        }
    }
}


impl Config {
    /// Load configuration from medsense.toml.
    /// Checks MEDSENSE_CONFIG env var first, then current directory.
    /// A missing file yields the defaults; a malformed one is an error.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("MEDSENSE_CONFIG")
            .unwrap_or_else(|_| "medsense.toml".to_string());

        if !Path::new(&path).exists() {
            tracing::warn!(
                "Config file not found: {}. Using built-in defaults \
                 (copy medsense.example.toml to medsense.toml to customise).",
                path
            );
            return Ok(Self::default());
        }

        tracing::info!("Loading configuration from {}", path);
        Self::load_from(&path)
    }

    pub fn load_from(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }
}
