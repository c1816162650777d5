//! Raw session records as returned by the remote system.
//!
//! These shapes are remote-owned: the exercise order, target counts, and
//! set logs are the source of truth. Local code never patches them in
//! place; every mutation refetches and re-derives view entities through
//! the mapper.

use crate::id::{ExerciseId, SessionExerciseId, SessionId, SetLogId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single logged set as stored remotely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetLogRecord {
    /// Remote set-log identifier.
    pub id: SetLogId,

    /// 1-based position within the exercise.
    pub set_number: u32,

    /// Actual weight lifted.
    pub weight: f64,

    /// Actual repetitions performed.
    pub reps: u32,
}

/// An exercise entry within a session, with its planned targets and logs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionExerciseRecord {
    /// Identifier of this exercise-in-session entry.
    pub id: SessionExerciseId,

    /// Identifier of the exercise in the catalog.
    pub exercise_id: ExerciseId,

    /// Display name (e.g., "Bench Press").
    pub name: String,

    /// Muscle-group label (e.g., "Chest").
    pub muscle_group: String,

    /// Planned number of sets.
    pub target_sets: u32,

    /// Planned repetitions per set.
    pub target_reps: u32,

    /// Suggested weight per set.
    pub target_weight: f64,

    /// Whether weight is loggable; bodyweight exercises log reps only.
    pub logs_weight: bool,

    /// Configured rest interval between sets, in seconds.
    pub rest_seconds: u32,

    /// Logged sets, keyed by `set_number`.
    pub set_logs: Vec<SetLogRecord>,
}

impl SessionExerciseRecord {
    /// Returns the log at the given 1-based set number, if any.
    pub fn log_at(&self, set_number: u32) -> Option<&SetLogRecord> {
        self.set_logs.iter().find(|log| log.set_number == set_number)
    }
}

/// A workout session aggregate as fetched from the remote system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Session identifier.
    pub id: SessionId,

    /// When the session was started.
    pub started_at: DateTime<Utc>,

    /// Set when the session was finished.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,

    /// Set when the session was discarded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancelled_at: Option<DateTime<Utc>>,

    /// Free-form notes recorded on completion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Ordered exercise entries; the order is remote-owned.
    pub exercises: Vec<SessionExerciseRecord>,
}

impl SessionRecord {
    /// Returns true once the session has been completed or cancelled.
    ///
    /// Both states are terminal; no further mutation is accepted.
    pub fn is_terminal(&self) -> bool {
        self.completed_at.is_some() || self.cancelled_at.is_some()
    }

    /// Finds an exercise entry by its session-exercise id.
    pub fn find_entry(&self, id: &SessionExerciseId) -> Option<&SessionExerciseRecord> {
        self.exercises.iter().find(|e| &e.id == id)
    }
}
