//! Exercise navigation state.
//!
//! Resolves which exercise is "current" on (re)entry given an optional
//! requested name, and tracks whether that hint has been consumed so
//! later snapshots never snap the pointer back.

use liftlog_core::ExerciseEntry;

/// Whether the navigation-return hint still needs to be applied.
///
/// Explicit two-state phase instead of a one-shot boolean flag: the hint
/// is carried in `Pending` and consumed exactly once per navigation-return
/// event, flipping to `Applied`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationPhase {
    /// A (possibly absent) hint is waiting for the next snapshot.
    Pending(Option<String>),

    /// The hint has been consumed; the pointer is user-owned again.
    Applied,
}

/// Resolves the exercise index to select for an optional name hint.
///
/// Matching is case-insensitive and exact on the trimmed name. No hint,
/// an empty list, or no match resolve to index 0.
pub fn resolve_exercise_index(exercises: &[ExerciseEntry], hint: Option<&str>) -> usize {
    let Some(hint) = hint else { return 0 };
    let needle = hint.trim().to_lowercase();
    if needle.is_empty() {
        return 0;
    }
    exercises
        .iter()
        .position(|e| e.name.trim().to_lowercase() == needle)
        .unwrap_or(0)
}
