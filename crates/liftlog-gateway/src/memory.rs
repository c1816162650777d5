//! In-memory gateway modelling the remote system's behaviour.
//!
//! Used as the test double for the session state machine and as a local
//! development backend. Semantics mirror the remote source of truth:
//! new session-exercises append at the end, terminal sessions reject all
//! mutation, and duplicate set numbers are rejected.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::{GatewayError, GatewayResult};
use crate::gateway::{ExerciseTargets, SessionGateway, TargetPatch};
use liftlog_core::{
    ExerciseId, SessionExerciseId, SessionExerciseRecord, SessionId, SessionRecord, SetLogId,
    SetLogRecord,
};

/// Catalog data resolved when an exercise is added to a session.
#[derive(Debug, Clone)]
pub struct CatalogExercise {
    /// Display name (e.g., "Bench Press").
    pub name: String,

    /// Muscle-group label.
    pub muscle_group: String,

    /// Whether weight is loggable for this exercise.
    pub logs_weight: bool,

    /// Default rest interval in seconds.
    pub rest_seconds: u32,
}

#[derive(Debug, Default)]
struct GatewayState {
    sessions: HashMap<SessionId, SessionRecord>,
    catalog: HashMap<ExerciseId, CatalogExercise>,
    next_id: u64,
    fail_next: Option<&'static str>,
}

impl GatewayState {
    fn fresh_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}-{}", self.next_id)
    }

    /// Consumes a pending failure injection for the given operation.
    fn take_failure(&mut self, operation: &'static str) -> GatewayResult<()> {
        if self.fail_next == Some(operation) {
            self.fail_next = None;
            return Err(GatewayError::Remote {
                operation,
                reason: "injected failure".to_string(),
            });
        }
        Ok(())
    }

    fn session_mut(&mut self, id: &SessionId) -> GatewayResult<&mut SessionRecord> {
        self.sessions
            .get_mut(id)
            .ok_or_else(|| GatewayError::SessionNotFound(id.clone()))
    }

    /// Like `session_mut`, but rejects terminal sessions.
    fn open_session_mut(&mut self, id: &SessionId) -> GatewayResult<&mut SessionRecord> {
        let session = self.session_mut(id)?;
        if session.is_terminal() {
            return Err(GatewayError::SessionTerminated(id.clone()));
        }
        Ok(session)
    }
}

/// In-memory [`SessionGateway`] implementation.
pub struct InMemoryGateway {
    state: Mutex<GatewayState>,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(GatewayState::default()),
        }
    }

    /// Creates a gateway pre-seeded with one session.
    pub fn with_session(record: SessionRecord) -> Self {
        let gateway = Self::new();
        if let Ok(mut state) = gateway.state.try_lock() {
            state.sessions.insert(record.id.clone(), record);
        }
        gateway
    }

    /// Registers a catalog exercise usable by `add_session_exercise`.
    pub async fn register_exercise(&self, id: ExerciseId, exercise: CatalogExercise) {
        let mut state = self.state.lock().await;
        state.catalog.insert(id, exercise);
    }

    /// Makes the next call to the named operation fail once.
    pub async fn fail_next(&self, operation: &'static str) {
        let mut state = self.state.lock().await;
        state.fail_next = Some(operation);
    }
}

impl Default for InMemoryGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionGateway for InMemoryGateway {
    async fn fetch_session(&self, session: &SessionId) -> GatewayResult<SessionRecord> {
        let mut state = self.state.lock().await;
        state.take_failure("fetch_session")?;
        state
            .sessions
            .get(session)
            .cloned()
            .ok_or_else(|| GatewayError::SessionNotFound(session.clone()))
    }

    async fn log_set(
        &self,
        session: &SessionId,
        exercise: &ExerciseId,
        set_number: u32,
        weight: f64,
        reps: u32,
    ) -> GatewayResult<SessionRecord> {
        let mut state = self.state.lock().await;
        state.take_failure("log_set")?;
        let log_id = SetLogId::new(state.fresh_id("log"));
        let record = state.open_session_mut(session)?;
        let entry = record
            .exercises
            .iter_mut()
            .find(|e| &e.exercise_id == exercise)
            .ok_or_else(|| GatewayError::ExerciseNotInSession(exercise.clone()))?;
        if entry.log_at(set_number).is_some() {
            return Err(GatewayError::SetNumberTaken {
                entry: entry.id.clone(),
                set_number,
            });
        }
        entry.set_logs.push(SetLogRecord {
            id: log_id,
            set_number,
            weight,
            reps,
        });
        debug!(session = %session, exercise = %exercise, set_number, "set logged");
        Ok(record.clone())
    }

    async fn update_set(
        &self,
        session: &SessionId,
        set_log: &SetLogId,
        weight: f64,
        reps: u32,
    ) -> GatewayResult<SessionRecord> {
        let mut state = self.state.lock().await;
        state.take_failure("update_set")?;
        let record = state.open_session_mut(session)?;
        let log = record
            .exercises
            .iter_mut()
            .flat_map(|e| e.set_logs.iter_mut())
            .find(|l| &l.id == set_log)
            .ok_or_else(|| GatewayError::SetLogNotFound(set_log.clone()))?;
        log.weight = weight;
        log.reps = reps;
        Ok(record.clone())
    }

    async fn delete_set(
        &self,
        session: &SessionId,
        set_log: &SetLogId,
    ) -> GatewayResult<SessionRecord> {
        let mut state = self.state.lock().await;
        state.take_failure("delete_set")?;
        let record = state.open_session_mut(session)?;
        let mut found = false;
        for exercise in &mut record.exercises {
            let before = exercise.set_logs.len();
            exercise.set_logs.retain(|l| &l.id != set_log);
            found |= exercise.set_logs.len() != before;
        }
        if !found {
            return Err(GatewayError::SetLogNotFound(set_log.clone()));
        }
        Ok(record.clone())
    }

    async fn add_session_exercise(
        &self,
        session: &SessionId,
        exercise: &ExerciseId,
        targets: ExerciseTargets,
        order: Option<u32>,
    ) -> GatewayResult<SessionRecord> {
        let mut state = self.state.lock().await;
        state.take_failure("add_session_exercise")?;
        let catalog = state
            .catalog
            .get(exercise)
            .cloned()
            .ok_or_else(|| GatewayError::UnknownExercise(exercise.clone()))?;
        let entry_id = SessionExerciseId::new(state.fresh_id("se"));
        let record = state.open_session_mut(session)?;
        let entry = SessionExerciseRecord {
            id: entry_id,
            exercise_id: exercise.clone(),
            name: catalog.name,
            muscle_group: catalog.muscle_group,
            target_sets: targets.sets,
            target_reps: targets.reps,
            target_weight: targets.weight,
            logs_weight: catalog.logs_weight,
            rest_seconds: catalog.rest_seconds,
            set_logs: Vec::new(),
        };
        match order {
            Some(position) => {
                let at = (position as usize).min(record.exercises.len());
                record.exercises.insert(at, entry);
            }
            // The remote appends new exercises at the end.
            None => record.exercises.push(entry),
        }
        debug!(session = %session, exercise = %exercise, "exercise added");
        Ok(record.clone())
    }

    async fn remove_session_exercise(
        &self,
        session: &SessionId,
        entry: &SessionExerciseId,
    ) -> GatewayResult<SessionRecord> {
        let mut state = self.state.lock().await;
        state.take_failure("remove_session_exercise")?;
        let record = state.open_session_mut(session)?;
        let before = record.exercises.len();
        record.exercises.retain(|e| &e.id != entry);
        if record.exercises.len() == before {
            return Err(GatewayError::EntryNotFound(entry.clone()));
        }
        Ok(record.clone())
    }

    async fn update_session_exercise(
        &self,
        session: &SessionId,
        entry: &SessionExerciseId,
        patch: TargetPatch,
    ) -> GatewayResult<SessionRecord> {
        let mut state = self.state.lock().await;
        state.take_failure("update_session_exercise")?;
        let record = state.open_session_mut(session)?;
        let exercise = record
            .exercises
            .iter_mut()
            .find(|e| &e.id == entry)
            .ok_or_else(|| GatewayError::EntryNotFound(entry.clone()))?;
        if let Some(sets) = patch.target_sets {
            exercise.target_sets = sets;
        }
        if let Some(reps) = patch.target_reps {
            exercise.target_reps = reps;
        }
        if let Some(weight) = patch.target_weight {
            exercise.target_weight = weight;
        }
        Ok(record.clone())
    }

    async fn reorder_session_exercises(
        &self,
        session: &SessionId,
        order: &[SessionExerciseId],
    ) -> GatewayResult<SessionRecord> {
        let mut state = self.state.lock().await;
        state.take_failure("reorder_session_exercises")?;
        let record = state.open_session_mut(session)?;
        let mut reordered = Vec::with_capacity(record.exercises.len());
        for id in order {
            let position = record
                .exercises
                .iter()
                .position(|e| &e.id == id)
                .ok_or_else(|| GatewayError::EntryNotFound(id.clone()))?;
            reordered.push(record.exercises.remove(position));
        }
        // Ids missing from the request keep their relative order at the end.
        reordered.append(&mut record.exercises);
        record.exercises = reordered;
        Ok(record.clone())
    }

    async fn complete_session(
        &self,
        session: &SessionId,
        notes: Option<&str>,
    ) -> GatewayResult<SessionRecord> {
        let mut state = self.state.lock().await;
        state.take_failure("complete_session")?;
        let record = state.open_session_mut(session)?;
        record.completed_at = Some(Utc::now());
        record.notes = notes.map(str::to_string);
        debug!(session = %session, "session completed");
        Ok(record.clone())
    }

    async fn cancel_session(&self, session: &SessionId) -> GatewayResult<SessionRecord> {
        let mut state = self.state.lock().await;
        state.take_failure("cancel_session")?;
        let record = state.open_session_mut(session)?;
        record.cancelled_at = Some(Utc::now());
        debug!(session = %session, "session cancelled");
        Ok(record.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed_session() -> SessionRecord {
        SessionRecord {
            id: SessionId::new("sess-1"),
            started_at: "2024-03-01T09:00:00Z".parse().unwrap(),
            completed_at: None,
            cancelled_at: None,
            notes: None,
            exercises: vec![SessionExerciseRecord {
                id: SessionExerciseId::new("se-1"),
                exercise_id: ExerciseId::new("ex-bench"),
                name: "Bench Press".to_string(),
                muscle_group: "Chest".to_string(),
                target_sets: 3,
                target_reps: 10,
                target_weight: 80.0,
                logs_weight: true,
                rest_seconds: 90,
                set_logs: Vec::new(),
            }],
        }
    }

    fn catalog_row() -> CatalogExercise {
        CatalogExercise {
            name: "Incline Press".to_string(),
            muscle_group: "Chest".to_string(),
            logs_weight: true,
            rest_seconds: 120,
        }
    }

    #[tokio::test]
    async fn test_log_set_appends_log() {
        let gateway = InMemoryGateway::with_session(seed_session());
        let record = gateway
            .log_set(&SessionId::new("sess-1"), &ExerciseId::new("ex-bench"), 1, 82.5, 10)
            .await
            .unwrap();
        let entry = record.exercises.first().unwrap();
        assert_eq!(entry.set_logs.len(), 1);
        assert_eq!(entry.log_at(1).map(|l| l.weight), Some(82.5));
    }

    #[tokio::test]
    async fn test_log_set_duplicate_number_rejected() {
        let gateway = InMemoryGateway::with_session(seed_session());
        let session = SessionId::new("sess-1");
        let exercise = ExerciseId::new("ex-bench");
        gateway.log_set(&session, &exercise, 1, 80.0, 10).await.unwrap();

        let result = gateway.log_set(&session, &exercise, 1, 85.0, 8).await;
        assert!(matches!(result, Err(GatewayError::SetNumberTaken { .. })));
    }

    #[tokio::test]
    async fn test_add_exercise_appends_at_end() {
        let gateway = InMemoryGateway::with_session(seed_session());
        gateway
            .register_exercise(ExerciseId::new("ex-incline"), catalog_row())
            .await;

        let targets = ExerciseTargets { sets: 3, reps: 10, weight: 0.0 };
        let record = gateway
            .add_session_exercise(&SessionId::new("sess-1"), &ExerciseId::new("ex-incline"), targets, None)
            .await
            .unwrap();

        assert_eq!(record.exercises.len(), 2);
        let last = record.exercises.last().unwrap();
        assert_eq!(last.name, "Incline Press");
        assert_eq!(last.rest_seconds, 120);
    }

    #[tokio::test]
    async fn test_add_exercise_unknown_catalog_id() {
        let gateway = InMemoryGateway::with_session(seed_session());
        let targets = ExerciseTargets { sets: 3, reps: 10, weight: 0.0 };
        let result = gateway
            .add_session_exercise(&SessionId::new("sess-1"), &ExerciseId::new("ex-nope"), targets, None)
            .await;
        assert!(matches!(result, Err(GatewayError::UnknownExercise(_))));
    }

    #[tokio::test]
    async fn test_reorder_moves_entry() {
        let gateway = InMemoryGateway::with_session(seed_session());
        gateway
            .register_exercise(ExerciseId::new("ex-incline"), catalog_row())
            .await;
        let session = SessionId::new("sess-1");
        let targets = ExerciseTargets { sets: 3, reps: 10, weight: 0.0 };
        let record = gateway
            .add_session_exercise(&session, &ExerciseId::new("ex-incline"), targets, None)
            .await
            .unwrap();
        let new_id = record.exercises.last().unwrap().id.clone();

        let order = vec![new_id.clone(), SessionExerciseId::new("se-1")];
        let record = gateway.reorder_session_exercises(&session, &order).await.unwrap();
        assert_eq!(record.exercises.first().map(|e| e.id.clone()), Some(new_id));
    }

    #[tokio::test]
    async fn test_terminal_session_rejects_mutation() {
        let gateway = InMemoryGateway::with_session(seed_session());
        let session = SessionId::new("sess-1");
        gateway.cancel_session(&session).await.unwrap();

        let result = gateway
            .log_set(&session, &ExerciseId::new("ex-bench"), 1, 80.0, 10)
            .await;
        assert!(matches!(result, Err(GatewayError::SessionTerminated(_))));

        // Fetch still works on terminal sessions.
        let record = gateway.fetch_session(&session).await.unwrap();
        assert!(record.is_terminal());
    }

    #[tokio::test]
    async fn test_complete_records_notes() {
        let gateway = InMemoryGateway::with_session(seed_session());
        let record = gateway
            .complete_session(&SessionId::new("sess-1"), Some("felt strong"))
            .await
            .unwrap();
        assert_eq!(record.notes.as_deref(), Some("felt strong"));
        assert!(record.completed_at.is_some());
    }

    #[tokio::test]
    async fn test_fail_next_injects_one_failure() {
        let gateway = InMemoryGateway::with_session(seed_session());
        let session = SessionId::new("sess-1");
        gateway.fail_next("log_set").await;

        let exercise = ExerciseId::new("ex-bench");
        let first = gateway.log_set(&session, &exercise, 1, 80.0, 10).await;
        assert!(matches!(first, Err(GatewayError::Remote { .. })));

        // Injection is one-shot; the retry succeeds and nothing was applied.
        let record = gateway.log_set(&session, &exercise, 1, 80.0, 10).await.unwrap();
        assert_eq!(record.exercises.first().unwrap().set_logs.len(), 1);
    }

    #[tokio::test]
    async fn test_remove_missing_entry_errors() {
        let gateway = InMemoryGateway::with_session(seed_session());
        let result = gateway
            .remove_session_exercise(&SessionId::new("sess-1"), &SessionExerciseId::new("se-9"))
            .await;
        assert!(matches!(result, Err(GatewayError::EntryNotFound(_))));
    }
}
