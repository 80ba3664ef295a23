//! Audio cue selection.
//!
//! The engine only says *that* a short or long cue is due. Which sound that
//! is comes from the cue bank: two named lists with one selected entry each.
//! Playing the sound is up to the driver.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, CoreError, Result};
use crate::events::WorkoutEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CueKind {
    /// Countdown tick at 3, 2 and 1 seconds remaining.
    Short,
    /// Phase boundary.
    Long,
}

impl fmt::Display for CueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CueKind::Short => f.write_str("short"),
            CueKind::Long => f.write_str("long"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CueBank {
    #[serde(default = "default_short")]
    pub short: Vec<String>,
    #[serde(default = "default_long")]
    pub long: Vec<String>,
    #[serde(default)]
    pub short_selected: usize,
    #[serde(default)]
    pub long_selected: usize,
}

fn default_short() -> Vec<String> {
    vec!["beep".into(), "click".into(), "tick".into()]
}

fn default_long() -> Vec<String> {
    vec!["buzzer".into(), "gong".into(), "whistle".into()]
}

impl Default for CueBank {
    fn default() -> Self {
        Self {
            short: default_short(),
            long: default_long(),
            short_selected: 0,
            long_selected: 0,
        }
    }
}

impl CueBank {
    fn list(&self, kind: CueKind) -> &[String] {
        match kind {
            CueKind::Short => &self.short,
            CueKind::Long => &self.long,
        }
    }

    /// Both lists must be non-empty and both selections in range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (kind, key) in [(CueKind::Short, "cues.short"), (CueKind::Long, "cues.long")] {
            if self.list(kind).is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: key.into(),
                    message: format!("no {kind} cues assigned"),
                });
            }
        }
        if self.short_selected >= self.short.len() {
            return Err(ConfigError::InvalidValue {
                key: "cues.short_selected".into(),
                message: format!("index {} out of range", self.short_selected),
            });
        }
        if self.long_selected >= self.long.len() {
            return Err(ConfigError::InvalidValue {
                key: "cues.long_selected".into(),
                message: format!("index {} out of range", self.long_selected),
            });
        }
        Ok(())
    }

    /// Change the selected cue of one kind, returning its name.
    pub fn select(&mut self, kind: CueKind, index: usize) -> Result<&str> {
        let available = self.list(kind).len();
        if index >= available {
            return Err(CoreError::UnknownCue {
                kind,
                index,
                available,
            });
        }
        match kind {
            CueKind::Short => self.short_selected = index,
            CueKind::Long => self.long_selected = index,
        }
        Ok(&self.list(kind)[index])
    }

    pub fn selected(&self, kind: CueKind) -> Option<&str> {
        let index = match kind {
            CueKind::Short => self.short_selected,
            CueKind::Long => self.long_selected,
        };
        self.list(kind).get(index).map(String::as_str)
    }

    /// Name of the sound to play for an engine event, if it is a cue.
    pub fn for_event(&self, event: &WorkoutEvent) -> Option<&str> {
        match event {
            WorkoutEvent::ShortCue => self.selected(CueKind::Short),
            WorkoutEvent::LongCue => self.selected(CueKind::Long),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::Phase;

    #[test]
    fn defaults_select_first_entries() {
        let bank = CueBank::default();
        assert!(bank.validate().is_ok());
        assert_eq!(bank.selected(CueKind::Short), Some("beep"));
        assert_eq!(bank.selected(CueKind::Long), Some("buzzer"));
    }

    #[test]
    fn select_changes_selection() {
        let mut bank = CueBank::default();
        assert_eq!(bank.select(CueKind::Long, 2).unwrap(), "whistle");
        assert_eq!(bank.long_selected, 2);
        assert_eq!(bank.selected(CueKind::Long), Some("whistle"));
    }

    #[test]
    fn select_out_of_range_is_rejected() {
        let mut bank = CueBank::default();
        let err = bank.select(CueKind::Short, 3).unwrap_err();
        assert!(matches!(
            err,
            CoreError::UnknownCue {
                kind: CueKind::Short,
                index: 3,
                available: 3
            }
        ));
        assert_eq!(bank.short_selected, 0);
    }

    #[test]
    fn empty_list_fails_validation() {
        let bank = CueBank {
            short: Vec::new(),
            ..CueBank::default()
        };
        let err = bank.validate().unwrap_err();
        assert!(err.to_string().contains("cues.short"));
    }

    #[test]
    fn selection_out_of_range_fails_validation() {
        let bank = CueBank {
            long_selected: 9,
            ..CueBank::default()
        };
        assert!(bank.validate().is_err());
    }

    #[test]
    fn for_event_maps_cues_only() {
        let bank = CueBank::default();
        assert_eq!(bank.for_event(&WorkoutEvent::ShortCue), Some("beep"));
        assert_eq!(bank.for_event(&WorkoutEvent::LongCue), Some("buzzer"));
        assert_eq!(
            bank.for_event(&WorkoutEvent::PhaseChanged { phase: Phase::Rest }),
            None
        );
        assert_eq!(bank.for_event(&WorkoutEvent::WorkoutDone), None);
    }
}
