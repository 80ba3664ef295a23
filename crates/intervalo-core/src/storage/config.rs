//! TOML-based application configuration.
//!
//! Stores:
//! - Default workout settings offered before a run
//! - Driver tick interval
//! - Short/long cue lists and the selected entries
//! - Background color per phase
//!
//! Configuration is read from `~/.config/intervalo/config.toml`. A missing
//! file means defaults; nothing is written back unless asked to.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::cues::CueBank;
use crate::error::{ConfigError, Result};
use crate::timer::{Phase, Settings, MAX_PHASE_SECS, MAX_SETS};

/// Driver loop configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverConfig {
    /// Poll period in milliseconds.
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
}

/// Background color per phase, as `#rrggbb`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhasePalette {
    #[serde(default = "default_get_ready_color")]
    pub get_ready: String,
    #[serde(default = "default_work_color")]
    pub work: String,
    #[serde(default = "default_rest_color")]
    pub rest: String,
    #[serde(default = "default_done_color")]
    pub done: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/intervalo/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub workout: Settings,
    #[serde(default)]
    pub driver: DriverConfig,
    #[serde(default)]
    pub cues: CueBank,
    #[serde(default)]
    pub palette: PhasePalette,
}

// Default functions
fn default_tick_ms() -> u64 {
    100
}
fn default_get_ready_color() -> String {
    "#f59e0b".into()
}
fn default_work_color() -> String {
    "#16a34a".into()
}
fn default_rest_color() -> String {
    "#dc2626".into()
}
fn default_done_color() -> String {
    "#3b82f6".into()
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
        }
    }
}

impl DriverConfig {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

impl Default for PhasePalette {
    fn default() -> Self {
        Self {
            get_ready: default_get_ready_color(),
            work: default_work_color(),
            rest: default_rest_color(),
            done: default_done_color(),
        }
    }
}

impl PhasePalette {
    pub fn color_for(&self, phase: Phase) -> &str {
        match phase {
            Phase::GetReady => &self.get_ready,
            Phase::Work => &self.work,
            Phase::Rest => &self.rest,
            Phase::Done => &self.done,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (key, color) in [
            ("palette.get_ready", &self.get_ready),
            ("palette.work", &self.work),
            ("palette.rest", &self.rest),
            ("palette.done", &self.done),
        ] {
            let valid = color.len() == 7
                && color.starts_with('#')
                && color[1..].chars().all(|c| c.is_ascii_hexdigit());
            if !valid {
                return Err(ConfigError::InvalidValue {
                    key: key.into(),
                    message: format!("expected #rrggbb, got '{color}'"),
                });
            }
        }
        Ok(())
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    /// `config.toml` in the data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created.
    pub fn default_path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from `path`, or return defaults if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed, or
    /// if it holds out-of-range values.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                }
                .into())
            }
        };
        let cfg: Config = toml::from_str(&content).map_err(ConfigError::from)?;
        cfg.validate()?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(cfg)
    }

    /// Persist to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Check values that serde alone cannot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.driver.tick_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "driver.tick_ms".into(),
                message: "must be at least 1".into(),
            });
        }
        let phases = [
            ("workout.get_ready_secs", self.workout.get_ready_secs),
            ("workout.work_secs", self.workout.work_secs),
            ("workout.rest_secs", self.workout.rest_secs),
        ];
        for (key, secs) in phases {
            if secs > MAX_PHASE_SECS {
                return Err(ConfigError::InvalidValue {
                    key: key.into(),
                    message: format!("must be at most {MAX_PHASE_SECS}, got {secs}"),
                });
            }
        }
        if self.workout.sets > MAX_SETS {
            return Err(ConfigError::InvalidValue {
                key: "workout.sets".into(),
                message: format!("must be at most {MAX_SETS}, got {}", self.workout.sets),
            });
        }
        self.cues.validate()?;
        self.palette.validate()
    }

    /// Get a config value as string by dot-separated key.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingKey` if no value lives at `key`.
    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        let json =
            serde_json::to_value(self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        match Self::get_json_value_by_path(&json, key) {
            Some(serde_json::Value::String(s)) => Ok(s.clone()),
            Some(other) => Ok(other.to_string()),
            None => Err(ConfigError::MissingKey(key.to_string())),
        }
    }
}
