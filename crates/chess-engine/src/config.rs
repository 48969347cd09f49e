//! Engine configuration.
//!
//! Only advisory thresholds live here; the rules themselves are fixed.
//! Configuration is loaded from TOML and handed to a [`crate::Game`]
//! explicitly.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::rules::{FIFTY_MOVE_LIMIT, REPETITION_LIMIT};

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    /// A value is out of its meaningful range.
    #[error("Invalid config value: {0}")]
    Invalid(String),
}

/// Advisory thresholds for front ends.
///
/// ```toml
/// fifty_move_warning = 90
/// repetition_warning = 2
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct EngineConfig {
    /// Halfmove clock value from which the fifty-move advisory is raised.
    /// Defaults to 90.
    #[serde(default = "default_fifty_move_warning")]
    pub fifty_move_warning: u32,
    /// Occurrence count of one position from which the repetition advisory
    /// is raised. Defaults to 2.
    #[serde(default = "default_repetition_warning")]
    pub repetition_warning: usize,
}

fn default_fifty_move_warning() -> u32 {
    90
}

fn default_repetition_warning() -> usize {
    2
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            fifty_move_warning: default_fifty_move_warning(),
            repetition_warning: default_repetition_warning(),
        }
    }
}

impl EngineConfig {
    /// Parses a configuration from TOML text. Missing keys take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for invalid TOML and
    /// [`ConfigError::Invalid`] for thresholds at or past the rule they warn
    /// about.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the configuration file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read, otherwise as
    /// [`Self::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        debug!(path = %path.display(), ?config, "loaded engine config");
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.fifty_move_warning >= FIFTY_MOVE_LIMIT {
            return Err(ConfigError::Invalid(format!(
                "fifty_move_warning must be below {}, got {}",
                FIFTY_MOVE_LIMIT, self.fifty_move_warning
            )));
        }
        if self.repetition_warning == 0 || self.repetition_warning >= REPETITION_LIMIT {
            return Err(ConfigError::Invalid(format!(
                "repetition_warning must be between 1 and {}, got {}",
                REPETITION_LIMIT - 1,
                self.repetition_warning
            )));
        }
        Ok(())
    }
}
