//! Error types for the session state machine.
//!
//! Two families: validation errors raised before any remote call is
//! attempted, and gateway failures surfaced unchanged. Validation errors
//! never touch the network; gateway failures leave local state exactly as
//! it was before the attempt.

use liftlog_gateway::GatewayError;
use thiserror::Error;

/// Session state machine errors.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Removing a set would leave the exercise with zero sets
    #[error("an exercise must keep at least one set")]
    LastSetRemoval,

    /// Removing an exercise would leave the session empty
    #[error("a session must keep at least one exercise")]
    LastExerciseRemoval,

    /// Edit requested for a set that has no remote log yet
    #[error("set has not been logged yet")]
    SetNotLogged,

    /// No set with the given slot id in the current exercise
    #[error("set not found in current exercise")]
    SetNotFound,

    /// The session has no exercises to operate on
    #[error("no exercise is selected")]
    NoExercises,

    /// Every set of the current exercise is already completed
    #[error("every set of this exercise is already completed")]
    ExerciseCompleted,

    /// Finishing requires all sets of all exercises to be completed
    #[error("not every set is completed")]
    NotAllSetsCompleted,

    /// Another set is already being edited
    #[error("another edit is already in progress")]
    EditInProgress,

    /// Save requested while nothing is being edited
    #[error("no edit is in progress")]
    NoEdit,

    /// Selection arrived while the picker was not open
    #[error("the exercise picker is not open")]
    PickerClosed,

    /// Finish/cancel attempted without the confirmation step
    #[error("finish or cancel has not been confirmed")]
    ConfirmationRequired,

    /// Mutation attempted after the session reached a terminal outcome
    #[error("session is already finished or discarded")]
    SessionClosed,

    /// Operation attempted before the first successful fetch
    #[error("session has not been loaded")]
    NotLoaded,

    /// Remote mutation failure, surfaced unchanged
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Result type for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;
