//! Severity classification and its display strings.

use serde::{Deserialize, Serialize};

/// Closed set of severity codes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
    Variable,
    #[default]
    Unknown,
}

impl Severity {
    /// Parse a severity code. Never fails: anything unrecognised is `Unknown`.
    pub fn from_code(code: &str) -> Self {
        match code {
            "high" => Severity::High,
            "medium" => Severity::Medium,
            "low" => Severity::Low,
            "variable" => Severity::Variable,
            _ => Severity::Unknown,
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
            Severity::Variable => "variable",
            Severity::Unknown => "unknown",
        }
    }

    pub fn display(&self) -> &'static str {
        match self {
            Severity::High => "ВЫСОКАЯ",
            Severity::Medium => "СРЕДНЯЯ",
            Severity::Low => "НИЗКАЯ",
            Severity::Variable => "ЗАВИСИТ ОТ СТАДИИ",
            Severity::Unknown => "НЕОПРЕДЕЛЕНА",
        }
    }
}

/// Map a raw severity code to its display string.
pub fn severity_display(code: &str) -> &'static str {
    Severity::from_code(code).display()
}
