//! Workout engine implementation.
//!
//! The engine is a poll-driven state machine over a [`WorkoutClock`]. It does
//! not use internal threads - the caller is responsible for calling `poll()`
//! periodically with the current monotonic instant.
//!
//! ## State Transitions
//!
//! ```text
//! GetReady -> Work -> (Rest -> Work)* -> Done
//! ```
//!
//! With zero rest, the work phase re-arms itself once per set instead of
//! passing through `Rest`. No rest follows the last set.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = WorkoutEngine::default();
//! engine.start(settings, Instant::now())?;
//! // In a loop:
//! let snap = engine.poll(Instant::now()); // snap.events carries cues and phase changes
//! ```

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::clock::{whole_seconds, WorkoutClock};
use super::settings::{SettingField, Settings};
use crate::error::Result;
use crate::events::{Snapshot, WorkoutEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    GetReady,
    Work,
    Rest,
    /// Terminal until the next `start`.
    Done,
}

/// Seconds-remaining values that fire a short cue.
const SHORT_CUE_SECONDS: std::ops::RangeInclusive<u64> = 1..=3;

#[derive(Debug, Clone)]
struct WorkoutState {
    settings: Settings,
    phase: Phase,
    sets_remaining: u32,
    /// Lowest whole second of the countdown seen so far in this phase.
    /// Armed one above the phase length so the first second counts too.
    last_second: u64,
}

impl WorkoutState {
    fn new(settings: Settings) -> Self {
        Self {
            settings,
            phase: Phase::GetReady,
            sets_remaining: settings.sets,
            last_second: cue_marker(settings.get_ready()),
        }
    }

    fn phase_duration(&self) -> Duration {
        self.settings.duration_for(self.phase)
    }

    /// Apply the transition out of the current (expired) phase.
    fn advance(&mut self) -> WorkoutEvent {
        let next = match self.phase {
            Phase::GetReady => Phase::Work,
            Phase::Work if self.settings.rest_secs == 0 => self.finish_set(),
            Phase::Work if self.sets_remaining <= 1 => {
                self.sets_remaining = 0;
                Phase::Done
            }
            Phase::Work => Phase::Rest,
            Phase::Rest => self.finish_set(),
            Phase::Done => Phase::Done,
        };
        self.phase = next;
        self.last_second = cue_marker(self.phase_duration());
        if next == Phase::Done {
            WorkoutEvent::WorkoutDone
        } else {
            WorkoutEvent::PhaseChanged { phase: next }
        }
    }

    fn finish_set(&mut self) -> Phase {
        self.sets_remaining = self.sets_remaining.saturating_sub(1);
        if self.sets_remaining == 0 {
            Phase::Done
        } else {
            Phase::Work
        }
    }
}

fn cue_marker(phase: Duration) -> u64 {
    whole_seconds(phase).saturating_add(1)
}

/// Core workout engine.
///
/// Holds a draft of the settings for the driver to adjust before starting,
/// and the running workout, if any.
#[derive(Debug, Clone)]
pub struct WorkoutEngine {
    draft: Settings,
    workout: Option<WorkoutState>,
    clock: WorkoutClock,
}

impl Default for WorkoutEngine {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl WorkoutEngine {
    pub fn new(draft: Settings) -> Self {
        Self {
            draft,
            workout: None,
            clock: WorkoutClock::new(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn draft(&self) -> &Settings {
        &self.draft
    }

    /// Settings of the current workout.
    pub fn settings(&self) -> Option<&Settings> {
        self.workout.as_ref().map(|w| &w.settings)
    }

    pub fn phase(&self) -> Option<Phase> {
        self.workout.as_ref().map(|w| w.phase)
    }

    pub fn sets_remaining(&self) -> Option<u32> {
        self.workout.as_ref().map(|w| w.sets_remaining)
    }

    /// A workout has started and is not done yet.
    pub fn is_active(&self) -> bool {
        matches!(self.phase(), Some(phase) if phase != Phase::Done)
    }

    pub fn is_paused(&self) -> bool {
        self.clock.is_paused()
    }

    /// Current state without advancing anything.
    pub fn snapshot(&self, now: Instant) -> Snapshot {
        self.build_snapshot(now, Vec::new())
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin a workout. Replaces any workout in progress.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidConfiguration` if `settings.sets` is zero;
    /// the engine is left untouched.
    pub fn start(&mut self, settings: Settings, now: Instant) -> Result<()> {
        if let Err(e) = settings.validate() {
            warn!(sets = settings.sets, "rejected workout start");
            return Err(e);
        }
        self.clock.start(now);
        self.workout = Some(WorkoutState::new(settings));
        info!(
            sets = settings.sets,
            work_secs = settings.work_secs,
            rest_secs = settings.rest_secs,
            "workout started"
        );
        Ok(())
    }

    /// Check the clock and advance at most one phase.
    ///
    /// Before any workout has started, returns the idle snapshot of the draft.
    pub fn poll(&mut self, now: Instant) -> Snapshot {
        let mut events = Vec::new();
        if let Some(workout) = self.workout.as_mut() {
            if workout.phase != Phase::Done && !self.clock.is_paused() {
                let duration = workout.phase_duration();
                let elapsed = self.clock.elapsed(now);
                if elapsed >= duration {
                    // The next phase starts at the boundary, not at this poll.
                    let overshoot = elapsed - duration;
                    let boundary = now.checked_sub(overshoot).unwrap_or(now);
                    events.push(WorkoutEvent::LongCue);
                    let from = workout.phase;
                    events.push(workout.advance());
                    debug!(
                        from = ?from,
                        to = ?workout.phase,
                        sets_remaining = workout.sets_remaining,
                        overshoot_ms = overshoot.as_millis() as u64,
                        "phase expired"
                    );
                    if workout.phase == Phase::Done {
                        self.clock.stop();
                        info!("workout done");
                    } else {
                        self.clock.start(boundary);
                    }
                } else {
                    let second = whole_seconds(duration - elapsed);
                    if second < workout.last_second {
                        workout.last_second = second;
                        if SHORT_CUE_SECONDS.contains(&second) {
                            debug!(second, "short cue");
                            events.push(WorkoutEvent::ShortCue);
                        }
                    }
                }
            }
        }
        self.build_snapshot(now, events)
    }

    /// Freeze the countdown. Returns `false` if there was nothing to pause.
    pub fn pause(&mut self, now: Instant) -> bool {
        if !self.is_active() || self.clock.is_paused() {
            return false;
        }
        self.clock.pause(now);
        info!(remaining_ms = self.time_remaining(now).as_millis() as u64, "workout paused");
        true
    }

    /// Continue a paused countdown. Returns `false` if it was not paused.
    pub fn resume(&mut self, now: Instant) -> bool {
        if !self.is_active() || !self.clock.is_paused() {
            return false;
        }
        self.clock.resume(now);
        info!(remaining_ms = self.time_remaining(now).as_millis() as u64, "workout resumed");
        true
    }

    /// Abandon the current workout and go back to idle.
    pub fn stop(&mut self) {
        if self.workout.take().is_some() {
            info!("workout stopped");
        }
        self.clock.stop();
    }

    /// Step a draft setting and return its new value.
    ///
    /// Settings are frozen while a workout is running; the current draft
    /// value is returned unchanged.
    pub fn adjust_setting(&mut self, field: SettingField, delta: i64) -> u64 {
        if self.is_active() {
            debug!(?field, "ignored setting adjustment during workout");
            return self.draft.value(field);
        }
        let value = self.draft.adjust(field, delta);
        debug!(?field, delta, value, "setting adjusted");
        value
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn time_remaining(&self, now: Instant) -> Duration {
        self.workout
            .as_ref()
            .map(|w| w.phase_duration().saturating_sub(self.clock.elapsed(now)))
            .unwrap_or_else(|| self.draft.get_ready())
    }

    fn build_snapshot(&self, now: Instant, events: Vec<WorkoutEvent>) -> Snapshot {
        match &self.workout {
            Some(workout) => Snapshot {
                phase: workout.phase,
                time_remaining: self.time_remaining(now),
                sets_remaining: workout.sets_remaining,
                paused: self.clock.is_paused(),
                events,
            },
            None => Snapshot {
                phase: Phase::GetReady,
                time_remaining: self.draft.get_ready(),
                sets_remaining: self.draft.sets,
                paused: false,
                events,
            },
        }
    }
}
