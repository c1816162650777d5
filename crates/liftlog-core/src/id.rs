//! Type-safe identifiers for sessions, exercises, and sets.
//!
//! All remote-owned resources are addressed by opaque string ids assigned
//! by the remote system; set positions not yet logged get a synthetic
//! local id derived from the owning session-exercise entry.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a workout session.
///
/// Assigned by the remote system when the session is started from a
/// template or created blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Creates a new SessionId from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the underlying string reference.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SessionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for SessionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Identifier of an exercise in the remote exercise catalog.
///
/// Distinct from [`SessionExerciseId`]: the same catalog exercise can
/// appear in many sessions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExerciseId(String);

impl ExerciseId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExerciseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ExerciseId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Identifier of an exercise-in-session entry.
///
/// Per-exercise mutations (update targets, remove, reorder) are keyed by
/// this id, not by the catalog [`ExerciseId`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionExerciseId(String);

impl SessionExerciseId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionExerciseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SessionExerciseId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Identifier of a logged set on the remote system.
///
/// Present only once a set has been logged; placeholders have none.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SetLogId(String);

impl SetLogId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SetLogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SetLogId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Local identifier of a set position within an exercise.
///
/// Either the remote set-log id (once logged) or a synthetic placeholder
/// id derived from the session-exercise id and the zero-based position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SetSlotId(String);

impl SetSlotId {
    /// Creates a slot id for a logged set from its remote log id.
    pub fn from_log(log_id: &SetLogId) -> Self {
        Self(log_id.as_str().to_string())
    }

    /// Creates a synthetic slot id for a position not yet logged.
    pub fn placeholder(entry: &SessionExerciseId, position: u32) -> Self {
        Self(format!("{entry}-slot-{position}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SetSlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
