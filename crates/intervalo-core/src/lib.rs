//! # Intervalo Core Library
//!
//! This library provides the core logic for the Intervalo interval-workout
//! timer. Every front end (the bundled CLI, or any UI loop) is a thin driver
//! over the same engine: it starts a workout, polls once per frame or tick,
//! and renders what comes back.
//!
//! ## Architecture
//!
//! - **Workout Clock**: a pausable stopwatch over caller-supplied monotonic
//!   instants
//! - **Workout Engine**: the get-ready / work / rest / done state machine,
//!   advanced by `poll()`, which also decides when countdown cues fire
//! - **Storage**: TOML-based configuration (defaults, cues, phase colors)
//!
//! ## Key Components
//!
//! - [`WorkoutEngine`]: Core workout state machine
//! - [`Snapshot`]: What a poll returns to the driver
//! - [`Config`]: Application configuration management
//! - [`CueBank`]: Selected short/long cue names

pub mod cues;
pub mod error;
pub mod events;
pub mod storage;
pub mod timer;

pub use cues::{CueBank, CueKind};
pub use error::{ConfigError, CoreError, Result};
pub use events::{Snapshot, WorkoutEvent};
pub use storage::{Config, DriverConfig, PhasePalette};
pub use timer::{format_clock, Phase, SettingField, Settings, WorkoutClock, WorkoutEngine};
