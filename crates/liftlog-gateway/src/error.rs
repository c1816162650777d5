//! Gateway error types following the panic-free policy.

use liftlog_core::{ExerciseId, SessionExerciseId, SessionId, SetLogId};
use thiserror::Error;

/// Errors surfaced by remote session operations.
#[derive(Error, Debug, Clone)]
pub enum GatewayError {
    /// Session not found on the remote system
    #[error("session not found: {0}")]
    SessionNotFound(SessionId),

    /// No entry for the given catalog exercise in the session
    #[error("exercise not in session: {0}")]
    ExerciseNotInSession(ExerciseId),

    /// No exercise-in-session entry with the given id
    #[error("session exercise entry not found: {0}")]
    EntryNotFound(SessionExerciseId),

    /// No set log with the given id
    #[error("set log not found: {0}")]
    SetLogNotFound(SetLogId),

    /// Mutation attempted after the session was completed or cancelled
    #[error("session already completed or cancelled: {0}")]
    SessionTerminated(SessionId),

    /// A log already exists at the given set number
    #[error("set {set_number} already logged for entry {entry}")]
    SetNumberTaken {
        entry: SessionExerciseId,
        set_number: u32,
    },

    /// Catalog lookup failed for the given exercise id
    #[error("unknown exercise: {0}")]
    UnknownExercise(ExerciseId),

    /// Remote call failed (transport error, server rejection)
    #[error("{operation} failed: {reason}")]
    Remote {
        operation: &'static str,
        reason: String,
    },
}

/// Result type for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;
