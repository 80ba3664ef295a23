//! Core error types for intervalo-core.
//!
//! The workout engine itself only fails on `start`; everything else that can
//! go wrong lives around it (configuration files, cue selection).

use std::path::PathBuf;
use thiserror::Error;

use crate::cues::CueKind;

/// Core error type for intervalo-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A workout was started with a non-positive set count.
    #[error("Invalid configuration: set count must be at least 1 (got {sets})")]
    InvalidConfiguration { sets: u32 },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Cue selection outside the configured list
    #[error("Unknown {kind} cue #{index} ({available} available)")]
    UnknownCue {
        kind: CueKind,
        index: usize,
        available: usize,
    },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// No value at the requested key
    #[error("Unknown configuration key: {0}")]
    MissingKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_configuration_mentions_set_count() {
        let err = CoreError::InvalidConfiguration { sets: 0 };
        assert!(err.to_string().contains("got 0"));
    }

    #[test]
    fn config_error_converts_into_core_error() {
        let err: CoreError = ConfigError::MissingKey("driver.tick_ms".into()).into();
        assert!(matches!(err, CoreError::Config(ConfigError::MissingKey(_))));
        assert!(err.to_string().contains("driver.tick_ms"));
    }

    #[test]
    fn unknown_cue_names_the_kind() {
        let err = CoreError::UnknownCue {
            kind: CueKind::Long,
            index: 7,
            available: 2,
        };
        assert_eq!(err.to_string(), "Unknown long cue #7 (2 available)");
    }
}
