//! The remote mutation gateway trait.
//!
//! Every mutating call is one atomic request against the remote source of
//! truth and returns the canonical updated [`SessionRecord`]; callers
//! re-derive their view from that snapshot instead of patching a local
//! cache. Failures return a [`GatewayError`](crate::GatewayError) and
//! leave the remote state untouched for that call.

use crate::error::GatewayResult;
use async_trait::async_trait;
use liftlog_core::{ExerciseId, SessionExerciseId, SessionId, SessionRecord, SetLogId};
use serde::{Deserialize, Serialize};

/// Planned targets carried by a newly created session-exercise entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExerciseTargets {
    /// Planned number of sets.
    pub sets: u32,

    /// Planned repetitions per set.
    pub reps: u32,

    /// Suggested weight per set.
    pub weight: f64,
}

/// Partial update of an entry's planned targets.
///
/// `None` fields are left unchanged by the remote system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_sets: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_reps: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_weight: Option<f64>,
}

impl TargetPatch {
    /// Patch that only changes the planned set count.
    pub fn sets(target_sets: u32) -> Self {
        Self {
            target_sets: Some(target_sets),
            ..Self::default()
        }
    }
}

/// Contract against the remote source of truth for workout sessions.
///
/// All methods are non-blocking awaited calls; the implementation decides
/// transport. No call is retried by the caller.
#[async_trait]
pub trait SessionGateway: Send + Sync {
    /// Fetches the session aggregate with nested exercises and set logs.
    async fn fetch_session(&self, session: &SessionId) -> GatewayResult<SessionRecord>;

    /// Creates a set log at the given 1-based `set_number`.
    async fn log_set(
        &self,
        session: &SessionId,
        exercise: &ExerciseId,
        set_number: u32,
        weight: f64,
        reps: u32,
    ) -> GatewayResult<SessionRecord>;

    /// Updates an existing set log's actual weight and reps.
    async fn update_set(
        &self,
        session: &SessionId,
        set_log: &SetLogId,
        weight: f64,
        reps: u32,
    ) -> GatewayResult<SessionRecord>;

    /// Deletes an existing set log.
    async fn delete_set(
        &self,
        session: &SessionId,
        set_log: &SetLogId,
    ) -> GatewayResult<SessionRecord>;

    /// Adds a catalog exercise to the session with the given targets.
    ///
    /// Without an explicit `order` the remote system appends at the end.
    async fn add_session_exercise(
        &self,
        session: &SessionId,
        exercise: &ExerciseId,
        targets: ExerciseTargets,
        order: Option<u32>,
    ) -> GatewayResult<SessionRecord>;

    /// Removes an exercise-in-session entry and its logs.
    async fn remove_session_exercise(
        &self,
        session: &SessionId,
        entry: &SessionExerciseId,
    ) -> GatewayResult<SessionRecord>;

    /// Partially updates an entry's planned targets.
    async fn update_session_exercise(
        &self,
        session: &SessionId,
        entry: &SessionExerciseId,
        patch: TargetPatch,
    ) -> GatewayResult<SessionRecord>;

    /// Rearranges the session's exercises to the given id order.
    async fn reorder_session_exercises(
        &self,
        session: &SessionId,
        order: &[SessionExerciseId],
    ) -> GatewayResult<SessionRecord>;

    /// Marks the session finished. Terminal.
    async fn complete_session(
        &self,
        session: &SessionId,
        notes: Option<&str>,
    ) -> GatewayResult<SessionRecord>;

    /// Discards the session. Terminal.
    async fn cancel_session(&self, session: &SessionId) -> GatewayResult<SessionRecord>;
}
