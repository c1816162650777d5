//! Integration tests for the session controller.
//!
//! These drive the full stack: controller on top of the in-memory gateway,
//! every mutation refetching the canonical session through the mapper.
//! Tests may use `.unwrap()`; the panic-free policy covers production code
//! only.

use liftlog_core::{
    ExerciseId, SessionExerciseId, SessionExerciseRecord, SessionId, SessionRecord,
};
use liftlog_gateway::{CatalogExercise, InMemoryGateway};
use liftlog_session::{
    MenuState, PickedExercise, SessionController, SessionError, SessionOutcome,
};

// ============================================================================
// Test Helpers
// ============================================================================

/// Opt-in log output: `RUST_LOG=liftlog_session=debug cargo test`.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn exercise_record(id: &str, name: &str, target_sets: u32) -> SessionExerciseRecord {
    SessionExerciseRecord {
        id: SessionExerciseId::new(id),
        exercise_id: ExerciseId::new(format!("ex-{id}")),
        name: name.to_string(),
        muscle_group: "Legs".to_string(),
        target_sets,
        target_reps: 8,
        target_weight: 100.0,
        logs_weight: true,
        rest_seconds: 120,
        set_logs: Vec::new(),
    }
}

fn seed_session(exercises: Vec<SessionExerciseRecord>) -> SessionRecord {
    SessionRecord {
        id: SessionId::new("sess-1"),
        started_at: "2024-03-01T09:00:00Z".parse().unwrap(),
        completed_at: None,
        cancelled_at: None,
        notes: None,
        exercises,
    }
}

async fn gateway_with(exercises: Vec<SessionExerciseRecord>) -> InMemoryGateway {
    init_tracing();
    let gateway = InMemoryGateway::with_session(seed_session(exercises));
    gateway
        .register_exercise(
            ExerciseId::new("ex-leg-press"),
            CatalogExercise {
                name: "Leg Press".to_string(),
                muscle_group: "Legs".to_string(),
                logs_weight: true,
                rest_seconds: 150,
            },
        )
        .await;
    gateway
}

async fn loaded(exercises: Vec<SessionExerciseRecord>) -> SessionController<InMemoryGateway> {
    let gateway = gateway_with(exercises).await;
    let mut controller = SessionController::new(gateway, SessionId::new("sess-1"), None);
    controller.load().await.expect("session should load");
    controller
}

fn leg_press() -> PickedExercise {
    PickedExercise {
        exercise_id: ExerciseId::new("ex-leg-press"),
        name: "Leg Press".to_string(),
        muscle_group: "Legs".to_string(),
        rest_seconds: 150,
        logs_weight: true,
        image: None,
    }
}

// ============================================================================
// Full Workout Flow
// ============================================================================

#[tokio::test]
async fn test_log_through_workout_and_finish() {
    let mut controller = loaded(vec![
        exercise_record("se-1", "Squat", 2),
        exercise_record("se-2", "Lunge", 1),
    ])
    .await;

    // First set of Squat: pointer stays, no advance scheduled.
    controller.log_current_set().await.unwrap();
    controller.tick();
    assert_eq!(controller.current_index(), 0);

    // Last set of Squat: advance fires on the next tick, not immediately.
    controller.log_current_set().await.unwrap();
    assert_eq!(controller.current_index(), 0);
    controller.tick();
    assert_eq!(controller.current_index(), 1);

    // Finish is still refused with one set open.
    assert!(matches!(
        controller.request_finish(),
        Err(SessionError::NotAllSetsCompleted)
    ));

    controller.log_current_set().await.unwrap();
    assert!(controller.all_exercises_completed());

    controller.request_finish().unwrap();
    let outcome = controller.confirm_finish(Some("solid session")).await.unwrap();
    assert_eq!(outcome, SessionOutcome::Finished);
    assert_eq!(controller.outcome(), Some(SessionOutcome::Finished));

    // Terminal sessions refuse every further mutation.
    assert!(matches!(
        controller.log_current_set().await,
        Err(SessionError::SessionClosed)
    ));
}

#[tokio::test]
async fn test_no_advance_past_last_exercise() {
    let mut controller = loaded(vec![exercise_record("se-1", "Squat", 1)]).await;
    controller.log_current_set().await.unwrap();
    controller.tick();
    controller.tick();
    assert_eq!(controller.current_index(), 0);
}

#[tokio::test]
async fn test_workout_timer_freezes_on_completion() {
    let mut controller = loaded(vec![exercise_record("se-1", "Squat", 1)]).await;
    controller.tick();
    // Elapsed time derives from the session's start timestamp.
    let before = controller.workout_timer().elapsed_seconds();
    assert!(before > 0);

    controller.log_current_set().await.unwrap();
    controller.request_finish().unwrap();
    controller.confirm_finish(None).await.unwrap();

    controller.tick();
    controller.tick();
    assert_eq!(controller.workout_timer().elapsed_seconds(), before);
}

// ============================================================================
// Adding & Swapping Exercises
// ============================================================================

#[tokio::test]
async fn test_add_exercise_jumps_to_new_entry() {
    let mut controller = loaded(vec![
        exercise_record("se-1", "Squat", 2),
        exercise_record("se-2", "Lunge", 2),
    ])
    .await;

    controller.open_add_picker();
    controller.choose_exercise(leg_press()).await.unwrap();

    // New entries append at the end; the pointer follows.
    assert_eq!(controller.exercises().len(), 3);
    assert_eq!(controller.current_index(), 2);
    let added = controller.current_exercise().unwrap();
    assert_eq!(added.name, "Leg Press");
    assert_eq!(added.target_sets, 3);
    assert_eq!(added.rest_seconds, 150);
    assert_eq!(*controller.menu(), MenuState::Closed);
}

#[tokio::test]
async fn test_swap_preserves_position_and_targets() {
    let mut controller = loaded(vec![
        exercise_record("se-1", "Squat", 4),
        exercise_record("se-2", "Lunge", 2),
        exercise_record("se-3", "Calf Raise", 2),
    ])
    .await;

    // Swap the middle exercise.
    controller.select_next_exercise();
    controller.open_swap_picker();
    controller.choose_exercise(leg_press()).await.unwrap();

    assert_eq!(controller.exercises().len(), 3);
    assert_eq!(controller.current_index(), 1);

    let swapped = controller.current_exercise().unwrap();
    assert_eq!(swapped.name, "Leg Press");
    // Targets carry over from the replaced exercise, not the catalog.
    assert_eq!(swapped.target_sets, 2);
    assert_eq!(swapped.target_reps, 8);
    assert_eq!(swapped.target_weight, 100.0);

    // Neighbours are untouched.
    assert_eq!(controller.exercises()[0].name, "Squat");
    assert_eq!(controller.exercises()[2].name, "Calf Raise");
}

#[tokio::test]
async fn test_swap_last_exercise_needs_no_reorder() {
    let mut controller = loaded(vec![
        exercise_record("se-1", "Squat", 2),
        exercise_record("se-2", "Lunge", 2),
    ])
    .await;

    controller.select_next_exercise();
    controller.open_swap_picker();
    controller.choose_exercise(leg_press()).await.unwrap();

    assert_eq!(controller.current_index(), 1);
    assert_eq!(controller.current_exercise().unwrap().name, "Leg Press");
}

#[tokio::test]
async fn test_swap_add_failure_leaves_shorter_list() {
    let gateway = gateway_with(vec![
        exercise_record("se-1", "Squat", 2),
        exercise_record("se-2", "Lunge", 2),
    ])
    .await;
    gateway.fail_next("add_session_exercise").await;

    let mut controller = SessionController::new(gateway, SessionId::new("sess-1"), None);
    controller.load().await.unwrap();
    controller.open_swap_picker();

    // The remove commits before the add fails; the shorter list stands.
    let result = controller.choose_exercise(leg_press()).await;
    assert!(matches!(result, Err(SessionError::Gateway(_))));
    assert_eq!(controller.exercises().len(), 1);
    assert_eq!(controller.exercises()[0].name, "Lunge");
    assert!(controller.last_error().is_some());
}

// ============================================================================
// Removing Sets & Exercises
// ============================================================================

#[tokio::test]
async fn test_remove_unlogged_set_shrinks_target() {
    let mut controller = loaded(vec![exercise_record("se-1", "Squat", 2)]).await;
    controller.log_current_set().await.unwrap();

    let placeholder = controller.current_exercise().unwrap().sets[1].id.clone();
    controller.remove_set(&placeholder).await.unwrap();

    let exercise = controller.current_exercise().unwrap();
    assert_eq!(exercise.sets.len(), 1);
    assert!(exercise.is_completed());
}

#[tokio::test]
async fn test_remove_completed_set_deletes_log_and_shrinks() {
    let mut controller = loaded(vec![exercise_record("se-1", "Squat", 2)]).await;
    controller.log_current_set().await.unwrap();

    let logged = controller.current_exercise().unwrap().sets[0].id.clone();
    controller.remove_set(&logged).await.unwrap();

    let exercise = controller.current_exercise().unwrap();
    assert_eq!(exercise.sets.len(), 1);
    assert_eq!(exercise.completed_count(), 0);
}

#[tokio::test]
async fn test_remove_last_set_rejected() {
    let mut controller = loaded(vec![exercise_record("se-1", "Squat", 1)]).await;
    let only = controller.current_exercise().unwrap().sets[0].id.clone();
    assert!(matches!(
        controller.remove_set(&only).await,
        Err(SessionError::LastSetRemoval)
    ));
    assert_eq!(controller.current_exercise().unwrap().sets.len(), 1);
}

#[tokio::test]
async fn test_add_set_appends_placeholder() {
    let mut controller = loaded(vec![exercise_record("se-1", "Squat", 2)]).await;
    controller.add_set().await.unwrap();

    let exercise = controller.current_exercise().unwrap();
    assert_eq!(exercise.sets.len(), 3);
    assert!(exercise.sets[2].is_placeholder());
}

#[tokio::test]
async fn test_remove_last_exercise_rejected() {
    let mut controller = loaded(vec![exercise_record("se-1", "Squat", 2)]).await;
    assert!(matches!(
        controller.remove_current_exercise().await,
        Err(SessionError::LastExerciseRemoval)
    ));
    assert_eq!(controller.exercises().len(), 1);
}

#[tokio::test]
async fn test_remove_trailing_exercise_clamps_pointer() {
    let mut controller = loaded(vec![
        exercise_record("se-1", "Squat", 2),
        exercise_record("se-2", "Lunge", 2),
    ])
    .await;
    controller.select_next_exercise();
    assert_eq!(controller.current_index(), 1);

    controller.remove_current_exercise().await.unwrap();
    assert_eq!(controller.exercises().len(), 1);
    assert_eq!(controller.current_index(), 0);
    assert_eq!(controller.current_exercise().unwrap().name, "Squat");
}

// ============================================================================
// Failure Handling
// ============================================================================

#[tokio::test]
async fn test_failed_log_leaves_state_unchanged() {
    let gateway = gateway_with(vec![exercise_record("se-1", "Squat", 2)]).await;
    gateway.fail_next("log_set").await;

    let mut controller = SessionController::new(gateway, SessionId::new("sess-1"), None);
    controller.load().await.unwrap();
    controller.set_pending_weight(Some(105.0));

    let result = controller.log_current_set().await;
    assert!(matches!(result, Err(SessionError::Gateway(_))));
    assert_eq!(controller.current_exercise().unwrap().completed_count(), 0);
    assert!(!controller.is_busy());
    assert!(controller.last_error().is_some());

    // No automatic retry; the explicit retry succeeds with the kept draft.
    controller.log_current_set().await.unwrap();
    let set = &controller.current_exercise().unwrap().sets[0];
    assert!(set.completed);
    assert_eq!(set.weight, 105.0);
}

#[tokio::test]
async fn test_failed_finish_keeps_session_open() {
    let gateway = gateway_with(vec![exercise_record("se-1", "Squat", 1)]).await;
    gateway.fail_next("complete_session").await;

    let mut controller = SessionController::new(gateway, SessionId::new("sess-1"), None);
    controller.load().await.unwrap();
    controller.log_current_set().await.unwrap();
    controller.request_finish().unwrap();

    let result = controller.confirm_finish(None).await;
    assert!(matches!(result, Err(SessionError::Gateway(_))));
    assert_eq!(controller.outcome(), None);

    // The session is still open; a second attempt completes it.
    controller.request_finish().unwrap();
    let outcome = controller.confirm_finish(None).await.unwrap();
    assert_eq!(outcome, SessionOutcome::Finished);
}

// ============================================================================
// Navigation
// ============================================================================

#[tokio::test]
async fn test_hint_applied_once_then_pointer_is_user_owned() {
    let gateway = gateway_with(vec![
        exercise_record("se-1", "Squat", 2),
        exercise_record("se-2", "Lunge", 2),
    ])
    .await;
    let mut controller =
        SessionController::new(gateway, SessionId::new("sess-1"), Some("Lunge".to_string()));
    controller.load().await.unwrap();
    assert_eq!(controller.current_index(), 1);

    controller.select_previous_exercise();
    assert_eq!(controller.current_index(), 0);

    // A mutation's refetch must not re-apply the consumed hint.
    controller.add_set().await.unwrap();
    assert_eq!(controller.current_index(), 0);
}

#[tokio::test]
async fn test_detail_roundtrip_restores_selection() {
    let mut controller = loaded(vec![
        exercise_record("se-1", "Squat", 2),
        exercise_record("se-2", "Lunge", 2),
    ])
    .await;
    controller.select_next_exercise();

    // Leaving for a detail view hands out the current name; passing it
    // back restores the selection.
    let hint = controller.exercise_detail_hint();
    assert_eq!(hint.as_deref(), Some("Lunge"));
    controller.select_previous_exercise();
    controller.return_with_hint(hint);
    assert_eq!(controller.current_index(), 1);
}

// ============================================================================
// Rest Timer
// ============================================================================

#[tokio::test]
async fn test_rest_timer_lifecycle_through_ticks() {
    let mut controller = loaded(vec![exercise_record("se-1", "Squat", 2)]).await;
    controller.start_rest_timer().unwrap();
    assert_eq!(controller.rest_timer().remaining_seconds(), 120);

    controller.tick();
    controller.tick();
    assert_eq!(controller.rest_timer().remaining_seconds(), 118);

    controller.shorten_rest(118).unwrap();
    assert!(controller.rest_timer().is_complete());
    assert!(!controller.rest_timer().is_active());
}
