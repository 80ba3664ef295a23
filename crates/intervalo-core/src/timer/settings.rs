use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::engine::Phase;
use crate::error::{CoreError, Result};

/// Longest work or rest phase the adjuster allows (59:59).
pub const MAX_PHASE_SECS: u64 = 3599;
pub const MIN_PHASE_SECS: u64 = 1;
pub const MAX_SETS: u32 = 99;
pub const MIN_SETS: u32 = 1;

/// Workout settings, captured by value when a workout starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_get_ready_secs")]
    pub get_ready_secs: u64,
    #[serde(default = "default_work_secs")]
    pub work_secs: u64,
    #[serde(default = "default_rest_secs")]
    pub rest_secs: u64,
    #[serde(default = "default_sets")]
    pub sets: u32,
}

fn default_get_ready_secs() -> u64 {
    10
}
fn default_work_secs() -> u64 {
    20
}
fn default_rest_secs() -> u64 {
    40
}
fn default_sets() -> u32 {
    1
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            get_ready_secs: default_get_ready_secs(),
            work_secs: default_work_secs(),
            rest_secs: default_rest_secs(),
            sets: default_sets(),
        }
    }
}

/// Field targeted by [`Settings::adjust`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingField {
    Work,
    Rest,
    Sets,
}

impl Settings {
    pub fn get_ready(&self) -> Duration {
        Duration::from_secs(self.get_ready_secs)
    }

    pub fn work(&self) -> Duration {
        Duration::from_secs(self.work_secs)
    }

    pub fn rest(&self) -> Duration {
        Duration::from_secs(self.rest_secs)
    }

    pub fn duration_for(&self, phase: Phase) -> Duration {
        match phase {
            Phase::GetReady => self.get_ready(),
            Phase::Work => self.work(),
            Phase::Rest => self.rest(),
            Phase::Done => Duration::ZERO,
        }
    }

    pub fn value(&self, field: SettingField) -> u64 {
        match field {
            SettingField::Work => self.work_secs,
            SettingField::Rest => self.rest_secs,
            SettingField::Sets => u64::from(self.sets),
        }
    }

    /// Step a field by `delta` and clamp it into its range. Returns the new value.
    ///
    /// Incrementing work from exactly one second takes one less step, so a
    /// +5 button walks 1, 5, 10, 15 rather than 1, 6, 11, 16.
    pub fn adjust(&mut self, field: SettingField, delta: i64) -> u64 {
        match field {
            SettingField::Work => {
                let step = if delta > 1 && self.work_secs == 1 {
                    delta - 1
                } else {
                    delta
                };
                self.work_secs = step_clamped(self.work_secs, step, MIN_PHASE_SECS, MAX_PHASE_SECS);
            }
            SettingField::Rest => {
                self.rest_secs = step_clamped(self.rest_secs, delta, MIN_PHASE_SECS, MAX_PHASE_SECS);
            }
            SettingField::Sets => {
                let sets = step_clamped(
                    u64::from(self.sets),
                    delta,
                    u64::from(MIN_SETS),
                    u64::from(MAX_SETS),
                );
                self.sets = sets as u32;
            }
        }
        self.value(field)
    }

    /// Every phase a full run visits, in order, with its duration.
    ///
    /// No rest follows the last work phase, and none is inserted at all when
    /// rest is zero.
    pub fn phase_plan(&self) -> Vec<(Phase, Duration)> {
        let mut plan = vec![(Phase::GetReady, self.get_ready())];
        for set in 0..self.sets {
            plan.push((Phase::Work, self.work()));
            if self.rest_secs > 0 && set + 1 < self.sets {
                plan.push((Phase::Rest, self.rest()));
            }
        }
        plan
    }

    /// Length of a full run. Saturates instead of overflowing.
    pub fn total_duration(&self) -> Duration {
        let rests = if self.rest_secs > 0 {
            self.sets.saturating_sub(1)
        } else {
            0
        };
        self.get_ready()
            .saturating_add(self.work().saturating_mul(self.sets))
            .saturating_add(self.rest().saturating_mul(rests))
    }

    /// Check the settings can start a workout.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidConfiguration` if there are no sets.
    pub fn validate(&self) -> Result<()> {
        if self.sets < MIN_SETS {
            return Err(CoreError::InvalidConfiguration { sets: self.sets });
        }
        Ok(())
    }
}

fn step_clamped(current: u64, delta: i64, min: u64, max: u64) -> u64 {
    let next = i128::from(current) + i128::from(delta);
    next.clamp(i128::from(min), i128::from(max)) as u64
}
