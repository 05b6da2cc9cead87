//! Application Config
//!
//! Read from an optional JSON document embedded in the page. Every field
//! has a default, so a missing or partial document is fine.

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Simulated network delay of the mock backend
pub const DEFAULT_LATENCY_MS: u32 = 500;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base path of the purchases API, without trailing slash
    pub api_base: String,
    /// Delay applied to every mock backend response
    pub latency_ms: u32,
    /// Wrap collection responses as `{ "data": [...] }`
    pub data_encapsulation: bool,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: "api".to_string(),
            latency_ms: DEFAULT_LATENCY_MS,
            data_encapsulation: false,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut config: AppConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.api_base = config.api_base.trim_end_matches('/').to_string();
        config.log_level()?;
        Ok(config)
    }

    pub fn log_level(&self) -> Result<LevelFilter, ConfigError> {
        self.log_level
            .parse::<LevelFilter>()
            .map_err(|_| ConfigError::LogLevel(self.log_level.clone()))
    }

    /// URL of a collection under the API base
    pub fn collection_url(&self, collection: &str) -> String {
        if self.api_base.is_empty() {
            collection.to_string()
        } else {
            format!("{}/{}", self.api_base, collection)
        }
    }
}
