//! Runtime mode

use serde::{Deserialize, Serialize};

/// Development logs load failures; production stays silent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeMode {
    #[default]
    Development,
    Production,
}

impl RuntimeMode {
    /// `production`/`prod` (any case); everything else is development.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => RuntimeMode::Production,
            _ => RuntimeMode::Development,
        }
    }

    pub fn is_development(&self) -> bool {
        matches!(self, RuntimeMode::Development)
    }

    /// Port of the same-origin registry fallback
    pub fn default_registry_port(&self) -> u16 {
        match self {
            RuntimeMode::Development => 3001,
            RuntimeMode::Production => 8080,
        }
    }
}
