//! Derived view entities for exercises and sets.
//!
//! These are re-built from the latest [`SessionRecord`](crate::SessionRecord)
//! snapshot after every remote mutation; they are never mutated in place.

use crate::id::{ExerciseId, SessionExerciseId, SetLogId, SetSlotId};

/// A single set position within an exercise.
///
/// Invariant: an incomplete set has no remote log id; a completed set
/// always has one.
#[derive(Debug, Clone, PartialEq)]
pub struct SetEntry {
    /// Local slot id: the log id once logged, synthetic otherwise.
    pub id: SetSlotId,

    /// Remote set-log id, present only once the set has been logged.
    pub log_id: Option<SetLogId>,

    /// Planned weight for this position.
    pub target_weight: f64,

    /// Planned repetitions for this position.
    pub target_reps: u32,

    /// Actual weight; mirrors the target until logged.
    pub weight: f64,

    /// Actual repetitions; mirrors the target until logged.
    pub reps: u32,

    /// Whether this position has been logged.
    pub completed: bool,
}

impl SetEntry {
    /// Returns true for a synthesized position not yet logged.
    pub fn is_placeholder(&self) -> bool {
        self.log_id.is_none()
    }
}

/// An exercise within the live session view.
///
/// Invariant: `sets.len()` always equals the remote `target_sets`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseEntry {
    /// Local composite id, stable for one snapshot.
    pub id: String,

    /// Catalog exercise id.
    pub exercise_id: ExerciseId,

    /// Exercise-in-session id used for per-exercise mutations.
    pub session_exercise_id: SessionExerciseId,

    /// Display name.
    pub name: String,

    /// Muscle-group label.
    pub muscle_group: String,

    /// Planned number of sets.
    pub target_sets: u32,

    /// Planned repetitions per set.
    pub target_reps: u32,

    /// Suggested weight per set.
    pub target_weight: f64,

    /// Whether weight is loggable; bodyweight exercises log reps only.
    pub logs_weight: bool,

    /// Configured rest interval in seconds.
    pub rest_seconds: u32,

    /// Ordered set positions, completed and placeholder alike.
    pub sets: Vec<SetEntry>,
}

impl ExerciseEntry {
    /// Returns the first incomplete set with its zero-based position.
    ///
    /// This is always the "current" set: logging targets it, so an
    /// already-completed position is never offered for re-logging.
    pub fn first_incomplete(&self) -> Option<(usize, &SetEntry)> {
        self.sets.iter().enumerate().find(|(_, s)| !s.completed)
    }

    /// Returns true once every set position has been logged.
    pub fn is_completed(&self) -> bool {
        !self.sets.is_empty() && self.sets.iter().all(|s| s.completed)
    }

    /// Returns the number of completed sets.
    pub fn completed_count(&self) -> usize {
        self.sets.iter().filter(|s| s.completed).count()
    }

    /// Finds a set by its local slot id.
    pub fn set_by_id(&self, id: &SetSlotId) -> Option<&SetEntry> {
        self.sets.iter().find(|s| &s.id == id)
    }
}
