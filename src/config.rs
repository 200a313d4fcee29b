use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::thresholds::Thresholds;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub thresholds: Thresholds,
    pub narrative_timeout_ms: u64,
    pub sample_index: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            narrative_timeout_ms: 5_000,
            sample_index: 0,
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn narrative_timeout(&self) -> Duration {
        Duration::from_millis(self.narrative_timeout_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.thresholds;
        let unit = |name: &str, v: f64| {
            if (0.0..=1.0).contains(&v) {
                Ok(())
            } else {
                Err(ConfigError::Invalid(format!("{name} must be in [0, 1], got {v}")))
            }
        };
        unit("matched_floor", t.matched_floor)?;
        unit("default_floor", t.default_floor)?;
        unit("level_high", t.level_high)?;
        unit("level_medium", t.level_medium)?;
        if t.unmapped_base_confidence <= 0.0 || t.unmapped_base_confidence > 1.0 {
            return Err(ConfigError::Invalid(format!(
                "unmapped_base_confidence must be in (0, 1], got {}",
                t.unmapped_base_confidence
            )));
        }
        if t.default_floor <= 0.0 {
            return Err(ConfigError::Invalid(
                "default_floor must be positive".to_string(),
            ));
        }
        if t.matched_floor < t.default_floor {
            return Err(ConfigError::Invalid(
                "matched_floor must not be below default_floor".to_string(),
            ));
        }
        if t.level_medium > t.level_high {
            return Err(ConfigError::Invalid(
                "level_medium must not exceed level_high".to_string(),
            ));
        }
        if self.narrative_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "narrative_timeout_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/src_inline/config.rs"]
mod tests;
