//! Session data mapper: raw session record to ordered view entities.
//!
//! Pure transform with no side effects. Output order mirrors the remote
//! exercise order exactly; the mapper never reorders.

use crate::exercise::{ExerciseEntry, SetEntry};
use crate::id::SetSlotId;
use crate::record::{SessionExerciseRecord, SessionRecord};

/// Maps a raw session record into ordered exercise view entities.
///
/// `None` (session still loading) maps to an empty list. For every
/// exercise, exactly `target_sets` set entries are produced: positions
/// with a log at `set_number == position + 1` are projected completed
/// with their actual values, every other position becomes an incomplete
/// placeholder carrying the exercise's target reps and weight.
pub fn map_session(record: Option<&SessionRecord>) -> Vec<ExerciseEntry> {
    record
        .map(|r| r.exercises.iter().map(map_exercise).collect())
        .unwrap_or_default()
}

fn map_exercise(exercise: &SessionExerciseRecord) -> ExerciseEntry {
    let sets = (0..exercise.target_sets)
        .map(|position| match exercise.log_at(position + 1) {
            Some(log) => SetEntry {
                id: SetSlotId::from_log(&log.id),
                log_id: Some(log.id.clone()),
                target_weight: exercise.target_weight,
                target_reps: exercise.target_reps,
                weight: log.weight,
                reps: log.reps,
                completed: true,
            },
            None => SetEntry {
                id: SetSlotId::placeholder(&exercise.id, position),
                log_id: None,
                target_weight: exercise.target_weight,
                target_reps: exercise.target_reps,
                weight: exercise.target_weight,
                reps: exercise.target_reps,
                completed: false,
            },
        })
        .collect();

    ExerciseEntry {
        id: format!("{}:{}", exercise.id, exercise.exercise_id),
        exercise_id: exercise.exercise_id.clone(),
        session_exercise_id: exercise.id.clone(),
        name: exercise.name.clone(),
        muscle_group: exercise.muscle_group.clone(),
        target_sets: exercise.target_sets,
        target_reps: exercise.target_reps,
        target_weight: exercise.target_weight,
        logs_weight: exercise.logs_weight,
        rest_seconds: exercise.rest_seconds,
        sets,
    }
}
