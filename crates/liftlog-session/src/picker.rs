//! Exercise-picker contract types.
//!
//! The picker dialog itself (search, filtering, rendering) is an external
//! collaborator; the state machine only needs the mode it was opened in
//! and the selection it hands back.

use liftlog_core::ExerciseId;

/// Mode the picker was opened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerMode {
    /// Append a new exercise to the session.
    Add,

    /// Replace the current exercise, keeping its position and targets.
    Swap,
}

/// An exercise selected in the picker dialog.
///
/// Dismissing the picker produces no value; the caller just closes the
/// menu.
#[derive(Debug, Clone, PartialEq)]
pub struct PickedExercise {
    /// Catalog exercise id.
    pub exercise_id: ExerciseId,

    /// Display name.
    pub name: String,

    /// Muscle-group label.
    pub muscle_group: String,

    /// Suggested rest interval in seconds.
    pub rest_seconds: u32,

    /// Whether weight is loggable for this exercise.
    pub logs_weight: bool,

    /// Optional illustration URL.
    pub image: Option<String>,
}
