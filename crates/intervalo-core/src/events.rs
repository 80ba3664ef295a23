use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::timer::{format_clock, whole_seconds, Phase};

/// Something that happened during a poll.
/// The driver consumes these (plays a cue, changes the background, ...) and drops them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WorkoutEvent {
    /// 3, 2 or 1 whole seconds left in the phase.
    ShortCue,
    /// The phase ran out.
    LongCue,
    PhaseChanged { phase: Phase },
    WorkoutDone,
}

/// State of the workout after one poll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: Phase,
    /// Never negative; zero once the workout is done.
    #[serde(rename = "time_remaining_ms", with = "duration_ms")]
    pub time_remaining: Duration,
    pub sets_remaining: u32,
    pub paused: bool,
    #[serde(default)]
    pub events: Vec<WorkoutEvent>,
}

impl Snapshot {
    /// Remaining time as the countdown displays it (rounded up).
    pub fn seconds_left(&self) -> u64 {
        whole_seconds(self.time_remaining)
    }

    pub fn clock_text(&self) -> String {
        format_clock(self.time_remaining)
    }

    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    pub fn has_events(&self) -> bool {
        !self.events.is_empty()
    }
}

mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis().min(u64::MAX as u128) as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}
