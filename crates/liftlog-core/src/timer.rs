//! Workout and rest timers.
//!
//! Both timers are plain tick-driven state: the owning event loop calls
//! `tick()` once per second and drops the value to tear it down. Neither
//! timer performs any I/O.

use chrono::{DateTime, Utc};

// ============================================================================
// Workout Timer
// ============================================================================

/// Elapsed-duration timer derived from the session start timestamp.
///
/// An absent timestamp (session not loaded, or finished/cancelled) freezes
/// the last value; a changed timestamp recomputes immediately rather than
/// interpolating.
#[derive(Debug, Clone, Default)]
pub struct WorkoutTimer {
    started_at: Option<DateTime<Utc>>,
    elapsed_seconds: i64,
}

impl WorkoutTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates the start timestamp, recomputing elapsed time at `now`.
    ///
    /// Setting `None` freezes the current value.
    pub fn set_start_at(&mut self, start: Option<DateTime<Utc>>, now: DateTime<Utc>) {
        if start == self.started_at {
            return;
        }
        self.started_at = start;
        if let Some(started) = start {
            self.elapsed_seconds = now.signed_duration_since(started).num_seconds().max(0);
        }
    }

    /// Updates the start timestamp against the current wall clock.
    pub fn set_start(&mut self, start: Option<DateTime<Utc>>) {
        self.set_start_at(start, Utc::now());
    }

    /// Recomputes elapsed time at `now`; frozen while no start is set.
    pub fn tick_at(&mut self, now: DateTime<Utc>) {
        if let Some(started) = self.started_at {
            self.elapsed_seconds = now.signed_duration_since(started).num_seconds().max(0);
        }
    }

    /// Recomputes elapsed time against the current wall clock.
    pub fn tick(&mut self) {
        self.tick_at(Utc::now());
    }

    /// Elapsed whole seconds since the start timestamp.
    pub fn elapsed_seconds(&self) -> i64 {
        self.elapsed_seconds
    }

    /// Formats the elapsed time as "M:SS".
    pub fn display(&self) -> String {
        let minutes = self.elapsed_seconds / 60;
        let seconds = self.elapsed_seconds % 60;
        format!("{minutes}:{seconds:02}")
    }
}

// ============================================================================
// Rest Timer
// ============================================================================

/// Independent rest-interval countdown.
///
/// Counts down once per second to zero, then stops and reports completion.
/// The progress "full ring" maximum tracks the high-water mark when time
/// is added past the original nominal value.
#[derive(Debug, Clone, Default)]
pub struct RestTimer {
    nominal_seconds: u32,
    remaining_seconds: u32,
    max_seconds: u32,
    active: bool,
    complete: bool,
}

impl RestTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Activates the countdown with a new nominal duration.
    ///
    /// Re-activation resets the remaining time and the high-water mark.
    pub fn start(&mut self, nominal_seconds: u32) {
        self.nominal_seconds = nominal_seconds;
        self.remaining_seconds = nominal_seconds;
        self.max_seconds = nominal_seconds;
        self.active = nominal_seconds > 0;
        self.complete = nominal_seconds == 0;
    }

    /// Advances the countdown by one second while active.
    pub fn tick(&mut self) {
        if !self.active {
            return;
        }
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            self.active = false;
            self.complete = true;
        }
    }

    /// Adds time to the live countdown; no-op while inactive.
    pub fn add_time(&mut self, seconds: u32) {
        if !self.active {
            return;
        }
        self.remaining_seconds = self.remaining_seconds.saturating_add(seconds);
        if self.remaining_seconds > self.max_seconds {
            self.max_seconds = self.remaining_seconds;
        }
    }

    /// Removes time from the live countdown, flooring at zero.
    ///
    /// Flooring to zero while active counts as completion.
    pub fn subtract_time(&mut self, seconds: u32) {
        if !self.active {
            return;
        }
        self.remaining_seconds = self.remaining_seconds.saturating_sub(seconds);
        if self.remaining_seconds == 0 {
            self.active = false;
            self.complete = true;
        }
    }

    /// Deactivates the countdown locally without marking completion.
    pub fn dismiss(&mut self) {
        self.active = false;
        self.complete = false;
        self.remaining_seconds = 0;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// True only once the countdown reached zero while active.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn nominal_seconds(&self) -> u32 {
        self.nominal_seconds
    }

    /// Fraction of the ring still filled, against the high-water mark.
    pub fn progress(&self) -> f64 {
        if self.max_seconds == 0 {
            0.0
        } else {
            f64::from(self.remaining_seconds) / f64::from(self.max_seconds)
        }
    }

    /// Formats the remaining time as "M:SS".
    pub fn display(&self) -> String {
        let minutes = self.remaining_seconds / 60;
        let seconds = self.remaining_seconds % 60;
        format!("{minutes}:{seconds:02}")
    }
}
