//! Pausable stopwatch over a monotonic time source.
//!
//! The clock never reads the time itself: every call takes the current
//! `Instant`. The driver supplies it once per tick, tests supply synthetic
//! instants.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Default)]
pub struct WorkoutClock {
    started_at: Option<Instant>,
    /// Set while paused.
    paused_at: Option<Instant>,
    /// Sum of all completed pauses since `started_at`.
    paused_total: Duration,
}

impl WorkoutClock {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    /// Time counted since the last `start`, not including paused intervals.
    ///
    /// Frozen while paused. Zero when stopped.
    pub fn elapsed(&self, now: Instant) -> Duration {
        let Some(started) = self.started_at else {
            return Duration::ZERO;
        };
        let end = self.paused_at.unwrap_or(now);
        end.saturating_duration_since(started)
            .saturating_sub(self.paused_total)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Count from zero at `now`. Restarts the count if already running.
    pub fn start(&mut self, now: Instant) {
        self.started_at = Some(now);
        self.paused_at = None;
        self.paused_total = Duration::ZERO;
    }

    pub fn pause(&mut self, now: Instant) {
        if self.started_at.is_some() && self.paused_at.is_none() {
            self.paused_at = Some(now);
        }
    }

    pub fn resume(&mut self, now: Instant) {
        if let Some(paused) = self.paused_at.take() {
            self.paused_total += now.saturating_duration_since(paused);
        }
    }

    pub fn stop(&mut self) {
        *self = Self::default();
    }
}

/// Whole seconds as a countdown shows them: 2.1 s left reads "3".
pub fn whole_seconds(d: Duration) -> u64 {
    let secs = d.as_secs();
    if d.subsec_nanos() > 0 {
        secs.saturating_add(1)
    } else {
        secs
    }
}

/// `M:SS` countdown text, minutes unpadded.
pub fn format_clock(d: Duration) -> String {
    let total = whole_seconds(d);
    format!("{}:{:02}", total / 60, total % 60)
}
