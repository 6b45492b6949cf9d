//! Engine configuration
//!
//! Tunable constants for attempts, timers and hint unlocking. Every field has
//! a default, so a config file only needs the values it overrides.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be at least {min} (got {value})")]
    TooSmall {
        field: &'static str,
        min: u64,
        value: u64,
    },
    #[error("{field} must be within (0, 1] (got {value})")]
    FractionRange { field: &'static str, value: f64 },
    #[error("definition must unlock after synonyms ({definition} vs {synonyms})")]
    UnlockOrder { synonyms: String, definition: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub max_attempts: usize,
    pub timer_seconds: u32,
    pub synonyms_unlock_fraction: f64,
    pub definition_unlock_fraction: f64,
    pub synonyms_unlock_guesses: usize,
    pub definition_unlock_guesses: usize,
    pub advance_delay_ms: u64,
    pub remote_timeout_secs: u64,
    pub dictionary_url: String,
    pub spellcheck_url: String,
    pub hard_mode: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_attempts: 6,
            timer_seconds: 60,
            synonyms_unlock_fraction: 0.35,
            definition_unlock_fraction: 0.20,
            synonyms_unlock_guesses: 4,
            definition_unlock_guesses: 5,
            advance_delay_ms: 1200,
            remote_timeout_secs: 8,
            dictionary_url: "https://api.dictionaryapi.dev/api/v2/entries/en".to_string(),
            spellcheck_url: "https://api.languagetool.org/v2/check".to_string(),
            hard_mode: false,
        }
    }
}

impl EngineConfig {
    /// Load a JSON config file and validate it
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or fails validation.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants the engine relies on
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_attempts < 1 {
            return Err(ConfigError::TooSmall {
                field: "max_attempts",
                min: 1,
                value: self.max_attempts as u64,
            });
        }
        if self.timer_seconds < 1 {
            return Err(ConfigError::TooSmall {
                field: "timer_seconds",
                min: 1,
                value: u64::from(self.timer_seconds),
            });
        }
        for (field, value) in [
            ("synonyms_unlock_fraction", self.synonyms_unlock_fraction),
            ("definition_unlock_fraction", self.definition_unlock_fraction),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ConfigError::FractionRange { field, value });
            }
        }
        if self.definition_unlock_fraction >= self.synonyms_unlock_fraction {
            return Err(ConfigError::UnlockOrder {
                synonyms: self.synonyms_unlock_fraction.to_string(),
                definition: self.definition_unlock_fraction.to_string(),
            });
        }
        if self.definition_unlock_guesses < self.synonyms_unlock_guesses {
            return Err(ConfigError::UnlockOrder {
                synonyms: self.synonyms_unlock_guesses.to_string(),
                definition: self.definition_unlock_guesses.to_string(),
            });
        }
        Ok(())
    }

    #[must_use]
    pub const fn advance_delay(&self) -> Duration {
        Duration::from_millis(self.advance_delay_ms)
    }

    #[must_use]
    pub const fn remote_timeout(&self) -> Duration {
        Duration::from_secs(self.remote_timeout_secs)
    }
}
