mod clock;
mod engine;
mod settings;

pub use clock::{format_clock, whole_seconds, WorkoutClock};
pub use engine::{Phase, WorkoutEngine};
pub use settings::{
    SettingField, Settings, MAX_PHASE_SECS, MAX_SETS, MIN_PHASE_SECS, MIN_SETS,
};
