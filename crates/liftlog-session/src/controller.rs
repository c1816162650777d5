//! The session state machine.
//!
//! `SessionController` is the sole owner of ephemeral UI state over the
//! session snapshot (current-exercise pointer, log/edit drafts, menu
//! state, timers) and the sole initiator of remote mutations. Every
//! successful mutation returns the canonical session, which is re-mapped
//! through the data mapper before pointers are reconciled; a failed
//! mutation leaves local state exactly as it was and is never retried.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use liftlog_core::{
    map_session, ExerciseEntry, RestTimer, SessionExerciseId, SessionId, SessionRecord, SetEntry,
    SetSlotId, WorkoutTimer,
};
use liftlog_gateway::{ExerciseTargets, GatewayError, SessionGateway, TargetPatch};

use crate::error::{Result, SessionError};
use crate::navigation::{resolve_exercise_index, NavigationPhase};
use crate::picker::{PickedExercise, PickerMode};

/// Targets given to an exercise added mid-session.
pub const DEFAULT_ADDED_TARGETS: ExerciseTargets = ExerciseTargets {
    sets: 3,
    reps: 10,
    weight: 0.0,
};

/// Ticks (at the 1 Hz controller tick rate) between logging an exercise's
/// last set and advancing to the next exercise.
pub const AUTO_ADVANCE_DELAY_TICKS: u8 = 1;

// ============================================================================
// Controller State
// ============================================================================

/// Terminal outcome of the session, yielding control to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Completed via "finish workout".
    Finished,

    /// Discarded via "cancel workout".
    Discarded,
}

/// Which menu or dialog is currently open, and what it targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuState {
    /// No menu open.
    Closed,

    /// Per-set menu (edit/remove) targeting one slot.
    SetMenu { slot: SetSlotId },

    /// Per-exercise menu (add set, swap, remove).
    ExerciseMenu,

    /// Exercise picker, in add or swap mode.
    Picker { mode: PickerMode },

    /// Finish-workout confirmation.
    ConfirmFinish,

    /// Cancel-workout confirmation.
    ConfirmCancel,
}

/// Pending weight/reps overrides for the set about to be logged.
///
/// Untouched fields fall back to the placeholder's target values.
#[derive(Debug, Clone, Copy, Default)]
struct LogDraft {
    weight: Option<f64>,
    reps: Option<u32>,
}

/// Buffers for the one set currently in edit mode.
///
/// Kept separate from the log draft; cancel discards them without any
/// network call.
#[derive(Debug, Clone, PartialEq)]
pub struct EditDraft {
    /// Slot being edited; always a logged set.
    pub slot: SetSlotId,

    /// Edited weight.
    pub weight: f64,

    /// Edited reps.
    pub reps: u32,
}

/// State machine for one live workout session.
pub struct SessionController<G> {
    gateway: G,
    session_id: SessionId,

    /// Latest canonical snapshot; `None` until the first successful fetch.
    record: Option<SessionRecord>,

    /// View entities derived from `record` via the data mapper.
    exercises: Vec<ExerciseEntry>,

    /// Index of the current exercise.
    current_index: usize,

    navigation: NavigationPhase,
    log_draft: LogDraft,
    edit_draft: Option<EditDraft>,
    menu: MenuState,

    rest_timer: RestTimer,
    workout_timer: WorkoutTimer,

    /// Ticks left until the auto-advance to the next exercise fires.
    advance_in: Option<u8>,

    /// True while a remote mutation is in flight; re-entrant triggers are
    /// ignored, not queued.
    in_flight: bool,

    /// Last validation or mutation failure, for the view to surface.
    last_error: Option<String>,

    outcome: Option<SessionOutcome>,
}

impl<G: SessionGateway> SessionController<G> {
    /// Creates a controller for the given session.
    ///
    /// The navigation phase starts `Pending` so the (possibly absent)
    /// hint is applied exactly once on the first snapshot.
    pub fn new(gateway: G, session_id: SessionId, navigation_hint: Option<String>) -> Self {
        Self {
            gateway,
            session_id,
            record: None,
            exercises: Vec::new(),
            current_index: 0,
            navigation: NavigationPhase::Pending(navigation_hint),
            log_draft: LogDraft::default(),
            edit_draft: None,
            menu: MenuState::Closed,
            rest_timer: RestTimer::new(),
            workout_timer: WorkoutTimer::new(),
            advance_in: None,
            in_flight: false,
            last_error: None,
            outcome: None,
        }
    }

    // ------------------------------------------------------------------------
    // Loading & reconciliation
    // ------------------------------------------------------------------------

    /// Fetches the session and applies the first snapshot.
    pub async fn load(&mut self) -> Result<()> {
        let result = self.gateway.fetch_session(&self.session_id).await;
        let record = match result {
            Ok(record) => record,
            Err(e) => return Err(self.fail("fetch session", e)),
        };
        self.apply_snapshot(record);
        info!(session = %self.session_id, exercises = self.exercises.len(), "session loaded");
        Ok(())
    }

    /// Re-arms the navigation hint on return from a detail view.
    ///
    /// Applied immediately when a snapshot is present, otherwise on the
    /// next one; either way exactly once.
    pub fn return_with_hint(&mut self, hint: Option<String>) {
        self.navigation = NavigationPhase::Pending(hint);
        if self.record.is_some() {
            self.apply_pending_navigation();
        }
    }

    /// Replaces the snapshot and reconciles all pointer state against it.
    fn apply_snapshot(&mut self, record: SessionRecord) {
        self.exercises = map_session(Some(&record));

        // The workout timer freezes once the session is terminal.
        let start = (!record.is_terminal()).then_some(record.started_at);
        self.workout_timer.set_start(start);

        self.record = Some(record);
        self.clamp_pointer();

        // Drop an edit draft whose set vanished from the snapshot.
        if let Some(draft) = &self.edit_draft {
            let alive = self
                .exercises
                .iter()
                .any(|e| e.set_by_id(&draft.slot).is_some());
            if !alive {
                debug!(slot = %draft.slot, "edited set disappeared, edit discarded");
                self.edit_draft = None;
            }
        }

        self.apply_pending_navigation();
    }

    fn apply_pending_navigation(&mut self) {
        if let NavigationPhase::Pending(hint) = &self.navigation {
            self.current_index = resolve_exercise_index(&self.exercises, hint.as_deref());
            debug!(index = self.current_index, "navigation hint applied");
            self.navigation = NavigationPhase::Applied;
        }
    }

    fn clamp_pointer(&mut self) {
        let count = self.exercises.len();
        if count == 0 {
            self.current_index = 0;
        } else if self.current_index >= count {
            self.current_index = count - 1;
        }
    }

    /// Records a remote failure: logged, remembered for the view, state
    /// otherwise untouched.
    fn fail(&mut self, operation: &'static str, error: GatewayError) -> SessionError {
        warn!(operation, error = %error, "remote mutation failed");
        self.last_error = Some(error.to_string());
        SessionError::Gateway(error)
    }

    /// Records a validation rejection; no network call was attempted.
    fn reject(&mut self, error: SessionError) -> SessionError {
        warn!(error = %error, "operation rejected");
        self.last_error = Some(error.to_string());
        error
    }

    fn ensure_open(&self) -> Result<()> {
        if self.outcome.is_some() {
            return Err(SessionError::SessionClosed);
        }
        if self.record.is_none() {
            return Err(SessionError::NotLoaded);
        }
        Ok(())
    }

    fn current(&self) -> Result<&ExerciseEntry> {
        self.exercises
            .get(self.current_index)
            .ok_or(SessionError::NoExercises)
    }

    fn session_exercise_ids(&self) -> HashSet<SessionExerciseId> {
        self.exercises
            .iter()
            .map(|e| e.session_exercise_id.clone())
            .collect()
    }

    /// Finds the entry added by the last mutation via id-set diff.
    fn diff_added(
        &self,
        before: &HashSet<SessionExerciseId>,
        record: &SessionRecord,
    ) -> Option<SessionExerciseId> {
        record
            .exercises
            .iter()
            .map(|e| e.id.clone())
            .find(|id| !before.contains(id))
    }

    // ------------------------------------------------------------------------
    // Ticking
    // ------------------------------------------------------------------------

    /// Advances all time-driven state by one second.
    ///
    /// The host event loop calls this once per second; dropping the
    /// controller tears everything down.
    pub fn tick(&mut self) {
        self.workout_timer.tick();
        self.rest_timer.tick();

        if let Some(remaining) = self.advance_in {
            if remaining <= 1 {
                self.advance_in = None;
                if self.current_index + 1 < self.exercises.len() {
                    self.current_index += 1;
                    debug!(index = self.current_index, "auto-advanced to next exercise");
                }
            } else {
                self.advance_in = Some(remaining - 1);
            }
        }
    }

    // ------------------------------------------------------------------------
    // View accessors
    // ------------------------------------------------------------------------

    pub fn exercises(&self) -> &[ExerciseEntry] {
        &self.exercises
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_exercise(&self) -> Option<&ExerciseEntry> {
        self.exercises.get(self.current_index)
    }

    /// The set logging targets: the first incomplete set of the current
    /// exercise. Completed positions are never offered for re-logging.
    pub fn current_set(&self) -> Option<(usize, &SetEntry)> {
        self.current_exercise().and_then(ExerciseEntry::first_incomplete)
    }

    /// True once every exercise has every set completed.
    pub fn all_exercises_completed(&self) -> bool {
        !self.exercises.is_empty() && self.exercises.iter().all(ExerciseEntry::is_completed)
    }

    /// True while a remote mutation is in flight.
    pub fn is_busy(&self) -> bool {
        self.in_flight
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn outcome(&self) -> Option<SessionOutcome> {
        self.outcome
    }

    pub fn menu(&self) -> &MenuState {
        &self.menu
    }

    pub fn edit_draft(&self) -> Option<&EditDraft> {
        self.edit_draft.as_ref()
    }

    pub fn rest_timer(&self) -> &RestTimer {
        &self.rest_timer
    }

    pub fn workout_timer(&self) -> &WorkoutTimer {
        &self.workout_timer
    }

    /// Navigation hint out: the name the caller passes back via
    /// [`return_with_hint`](Self::return_with_hint) after a detail view.
    pub fn exercise_detail_hint(&self) -> Option<String> {
        self.current_exercise().map(|e| e.name.clone())
    }

    // ------------------------------------------------------------------------
    // Manual navigation
    // ------------------------------------------------------------------------

    pub fn select_next_exercise(&mut self) {
        if self.current_index + 1 < self.exercises.len() {
            self.current_index += 1;
        }
    }

    pub fn select_previous_exercise(&mut self) {
        self.current_index = self.current_index.saturating_sub(1);
    }

    // ------------------------------------------------------------------------
    // Logging sets
    // ------------------------------------------------------------------------

    /// Overrides the weight about to be logged for the current set.
    pub fn set_pending_weight(&mut self, weight: Option<f64>) {
        self.log_draft.weight = weight;
    }

    /// Overrides the reps about to be logged for the current set.
    pub fn set_pending_reps(&mut self, reps: Option<u32>) {
        self.log_draft.reps = reps;
    }

    /// Logs the first incomplete set of the current exercise.
    ///
    /// Weight and reps resolve from the pending draft, falling back to the
    /// placeholder's target values. On success, if this was the exercise's
    /// last incomplete set and a next exercise exists, an auto-advance is
    /// scheduled after a short fixed delay.
    pub async fn log_current_set(&mut self) -> Result<()> {
        self.ensure_open()?;
        if self.in_flight {
            return Ok(());
        }
        if self.edit_draft.is_some() {
            return Err(self.reject(SessionError::EditInProgress));
        }

        let draft = self.log_draft;
        let extracted = self.current().and_then(|exercise| {
            let (position, slot) = exercise
                .first_incomplete()
                .ok_or(SessionError::ExerciseCompleted)?;
            let weight = if exercise.logs_weight {
                draft.weight.unwrap_or(slot.target_weight)
            } else {
                // Bodyweight exercises log reps only.
                0.0
            };
            let reps = draft.reps.unwrap_or(slot.target_reps);
            Ok((
                exercise.exercise_id.clone(),
                position as u32 + 1,
                weight,
                reps,
                exercise.completed_count() + 1 == exercise.sets.len(),
            ))
        });
        let (exercise_id, set_number, weight, reps, was_last_incomplete) = match extracted {
            Ok(values) => values,
            Err(e) => return Err(self.reject(e)),
        };

        self.in_flight = true;
        let result = self
            .gateway
            .log_set(&self.session_id, &exercise_id, set_number, weight, reps)
            .await;
        self.in_flight = false;

        let record = match result {
            Ok(record) => record,
            Err(e) => return Err(self.fail("log set", e)),
        };
        self.apply_snapshot(record);
        self.log_draft = LogDraft::default();
        info!(exercise = %exercise_id, set_number, weight, reps, "set logged");

        if was_last_incomplete && self.current_index + 1 < self.exercises.len() {
            self.advance_in = Some(AUTO_ADVANCE_DELAY_TICKS);
        }
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Editing sets
    // ------------------------------------------------------------------------

    /// Opens edit mode for a logged set, seeding buffers from its actual
    /// values. At most one set is in edit mode at a time.
    pub fn begin_edit(&mut self, slot: &SetSlotId) -> Result<()> {
        self.ensure_open()?;
        if self.edit_draft.is_some() {
            return Err(self.reject(SessionError::EditInProgress));
        }
        let extracted = self.current().and_then(|exercise| {
            let set = exercise.set_by_id(slot).ok_or(SessionError::SetNotFound)?;
            if set.log_id.is_none() {
                return Err(SessionError::SetNotLogged);
            }
            Ok((set.weight, set.reps))
        });
        let (weight, reps) = match extracted {
            Ok(values) => values,
            Err(e) => return Err(self.reject(e)),
        };
        self.edit_draft = Some(EditDraft {
            slot: slot.clone(),
            weight,
            reps,
        });
        self.menu = MenuState::Closed;
        Ok(())
    }

    pub fn set_edit_weight(&mut self, weight: f64) {
        if let Some(draft) = &mut self.edit_draft {
            draft.weight = weight;
        }
    }

    pub fn set_edit_reps(&mut self, reps: u32) {
        if let Some(draft) = &mut self.edit_draft {
            draft.reps = reps;
        }
    }

    /// Saves the edit buffers with an update-set call.
    pub async fn save_edit(&mut self) -> Result<()> {
        self.ensure_open()?;
        if self.in_flight {
            return Ok(());
        }
        let draft = match self.edit_draft.clone() {
            Some(draft) => draft,
            None => return Err(self.reject(SessionError::NoEdit)),
        };
        let found = self
            .exercises
            .iter()
            .flat_map(|e| e.sets.iter())
            .find(|s| s.id == draft.slot)
            .and_then(|s| s.log_id.clone());
        let log_id = match found {
            Some(id) => id,
            None => return Err(self.reject(SessionError::SetNotLogged)),
        };

        self.in_flight = true;
        let result = self
            .gateway
            .update_set(&self.session_id, &log_id, draft.weight, draft.reps)
            .await;
        self.in_flight = false;

        let record = match result {
            Ok(record) => record,
            Err(e) => return Err(self.fail("update set", e)),
        };
        self.apply_snapshot(record);
        self.edit_draft = None;
        info!(set_log = %log_id, "set updated");
        Ok(())
    }

    /// Discards the edit buffers. Never touches the network.
    pub fn cancel_edit(&mut self) {
        self.edit_draft = None;
    }

    // ------------------------------------------------------------------------
    // Adding & removing sets
    // ------------------------------------------------------------------------

    /// Grows the current exercise by one planned set.
    ///
    /// The mapper synthesizes the trailing placeholder from the returned
    /// snapshot.
    pub async fn add_set(&mut self) -> Result<()> {
        self.ensure_open()?;
        if self.in_flight {
            return Ok(());
        }
        let extracted = self
            .current()
            .map(|e| (e.session_exercise_id.clone(), e.target_sets + 1));
        let (entry_id, new_target) = match extracted {
            Ok(values) => values,
            Err(e) => return Err(self.reject(e)),
        };

        self.in_flight = true;
        let result = self
            .gateway
            .update_session_exercise(&self.session_id, &entry_id, TargetPatch::sets(new_target))
            .await;
        self.in_flight = false;

        let record = match result {
            Ok(record) => record,
            Err(e) => return Err(self.fail("add set", e)),
        };
        self.apply_snapshot(record);
        self.menu = MenuState::Closed;
        Ok(())
    }

    /// Removes a set from the current exercise.
    ///
    /// Forbidden when it would leave zero sets. A completed set needs both
    /// a delete-set-log and a target decrement for a consistent count; the
    /// two steps commit independently, so a failure in between leaves a
    /// partially applied but valid remote state.
    pub async fn remove_set(&mut self, slot: &SetSlotId) -> Result<()> {
        self.ensure_open()?;
        if self.in_flight {
            return Ok(());
        }
        let extracted = self.current().and_then(|exercise| {
            if exercise.sets.len() <= 1 {
                return Err(SessionError::LastSetRemoval);
            }
            let set = exercise.set_by_id(slot).ok_or(SessionError::SetNotFound)?;
            Ok((
                exercise.session_exercise_id.clone(),
                exercise.target_sets.saturating_sub(1),
                set.log_id.clone(),
            ))
        });
        let (entry_id, new_target, log_id) = match extracted {
            Ok(values) => values,
            Err(e) => return Err(self.reject(e)),
        };

        if let Some(log_id) = log_id {
            self.in_flight = true;
            let result = self.gateway.delete_set(&self.session_id, &log_id).await;
            self.in_flight = false;
            let record = match result {
                Ok(record) => record,
                Err(e) => return Err(self.fail("delete set log", e)),
            };
            self.apply_snapshot(record);
        }

        self.in_flight = true;
        let result = self
            .gateway
            .update_session_exercise(&self.session_id, &entry_id, TargetPatch::sets(new_target))
            .await;
        self.in_flight = false;

        let record = match result {
            Ok(record) => record,
            Err(e) => return Err(self.fail("shrink set count", e)),
        };
        self.apply_snapshot(record);
        self.menu = MenuState::Closed;
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Menus & picker
    // ------------------------------------------------------------------------

    pub fn open_set_menu(&mut self, slot: SetSlotId) {
        self.menu = MenuState::SetMenu { slot };
    }

    pub fn open_exercise_menu(&mut self) {
        self.menu = MenuState::ExerciseMenu;
    }

    pub fn close_menu(&mut self) {
        self.menu = MenuState::Closed;
    }

    pub fn open_add_picker(&mut self) {
        self.menu = MenuState::Picker { mode: PickerMode::Add };
    }

    pub fn open_swap_picker(&mut self) {
        self.menu = MenuState::Picker { mode: PickerMode::Swap };
    }

    /// Closes the picker without a selection.
    pub fn dismiss_picker(&mut self) {
        if matches!(self.menu, MenuState::Picker { .. }) {
            self.menu = MenuState::Closed;
        }
    }

    /// Dispatches a picker selection according to the mode it was opened in.
    pub async fn choose_exercise(&mut self, picked: PickedExercise) -> Result<()> {
        self.ensure_open()?;
        let mode = match &self.menu {
            MenuState::Picker { mode } => *mode,
            _ => return Err(self.reject(SessionError::PickerClosed)),
        };
        self.menu = MenuState::Closed;
        match mode {
            PickerMode::Add => self.add_exercise(picked).await,
            PickerMode::Swap => self.swap_exercise(picked).await,
        }
    }

    /// Appends a new exercise with default targets, then jumps the pointer
    /// to it. The new entry is identified by id-set diff against the
    /// previous snapshot, since its id is unknown beforehand.
    async fn add_exercise(&mut self, picked: PickedExercise) -> Result<()> {
        if self.in_flight {
            return Ok(());
        }
        let before = self.session_exercise_ids();

        self.in_flight = true;
        let result = self
            .gateway
            .add_session_exercise(
                &self.session_id,
                &picked.exercise_id,
                DEFAULT_ADDED_TARGETS,
                None,
            )
            .await;
        self.in_flight = false;

        let record = match result {
            Ok(record) => record,
            Err(e) => return Err(self.fail("add exercise", e)),
        };
        let added = self.diff_added(&before, &record);
        self.apply_snapshot(record);

        match added {
            Some(id) => {
                if let Some(index) = self
                    .exercises
                    .iter()
                    .position(|e| e.session_exercise_id == id)
                {
                    self.current_index = index;
                    info!(exercise = %picked.name, index, "exercise added");
                }
            }
            None => warn!("added exercise not found in refreshed session"),
        }
        Ok(())
    }

    /// Swap protocol: remove the current entry, add the picked exercise
    /// carrying over the original targets, then reorder the appended entry
    /// back to the original position.
    ///
    /// Not atomic: each step commits independently. If the add fails after
    /// the remove, the exercise is gone and the shorter list stands. The
    /// reorder is skipped when the new entry already landed at the
    /// intended position, or when it cannot be identified in the refetched
    /// session (degraded but safe).
    async fn swap_exercise(&mut self, picked: PickedExercise) -> Result<()> {
        if self.in_flight {
            return Ok(());
        }
        let position = self.current_index;
        let extracted = self.current().map(|exercise| {
            (
                exercise.session_exercise_id.clone(),
                ExerciseTargets {
                    sets: exercise.target_sets,
                    reps: exercise.target_reps,
                    weight: exercise.target_weight,
                },
            )
        });
        let (entry_id, targets) = match extracted {
            Ok(values) => values,
            Err(e) => return Err(self.reject(e)),
        };

        self.in_flight = true;
        let result = self
            .gateway
            .remove_session_exercise(&self.session_id, &entry_id)
            .await;
        self.in_flight = false;
        let record = match result {
            Ok(record) => record,
            Err(e) => return Err(self.fail("swap: remove exercise", e)),
        };
        self.apply_snapshot(record);

        let before = self.session_exercise_ids();
        self.in_flight = true;
        let result = self
            .gateway
            .add_session_exercise(&self.session_id, &picked.exercise_id, targets, None)
            .await;
        self.in_flight = false;
        let record = match result {
            Ok(record) => record,
            Err(e) => return Err(self.fail("swap: add exercise", e)),
        };
        let added = self.diff_added(&before, &record);
        self.apply_snapshot(record);

        let target_position = position.min(self.exercises.len().saturating_sub(1));
        match added {
            Some(new_id) => {
                let landed = self
                    .exercises
                    .iter()
                    .position(|e| e.session_exercise_id == new_id);
                if landed != Some(target_position) {
                    let mut order: Vec<SessionExerciseId> = self
                        .exercises
                        .iter()
                        .map(|e| e.session_exercise_id.clone())
                        .filter(|id| id != &new_id)
                        .collect();
                    let at = target_position.min(order.len());
                    order.insert(at, new_id);

                    self.in_flight = true;
                    let result = self
                        .gateway
                        .reorder_session_exercises(&self.session_id, &order)
                        .await;
                    self.in_flight = false;
                    let record = match result {
                        Ok(record) => record,
                        Err(e) => return Err(self.fail("swap: reorder", e)),
                    };
                    self.apply_snapshot(record);
                } else {
                    debug!("swapped exercise landed in place, reorder skipped");
                }
                self.current_index = target_position;
                info!(exercise = %picked.name, position = target_position, "exercise swapped");
            }
            None => {
                warn!("swapped exercise not found after refetch, reorder skipped");
                self.current_index = target_position;
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Removing exercises
    // ------------------------------------------------------------------------

    /// Removes the current exercise. Forbidden when it is the last one.
    pub async fn remove_current_exercise(&mut self) -> Result<()> {
        self.ensure_open()?;
        if self.in_flight {
            return Ok(());
        }
        if self.exercises.len() <= 1 {
            return Err(self.reject(SessionError::LastExerciseRemoval));
        }
        let entry_id = match self.current().map(|e| e.session_exercise_id.clone()) {
            Ok(id) => id,
            Err(e) => return Err(self.reject(e)),
        };

        self.in_flight = true;
        let result = self
            .gateway
            .remove_session_exercise(&self.session_id, &entry_id)
            .await;
        self.in_flight = false;

        let record = match result {
            Ok(record) => record,
            Err(e) => return Err(self.fail("remove exercise", e)),
        };
        // apply_snapshot clamps the pointer to the new last index if needed.
        self.apply_snapshot(record);
        self.menu = MenuState::Closed;
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Rest timer
    // ------------------------------------------------------------------------

    /// Starts the rest countdown with the current exercise's configured
    /// interval. Purely local, but like every mutation it is refused once
    /// the session is terminal.
    pub fn start_rest_timer(&mut self) -> Result<()> {
        self.ensure_open()?;
        let rest_seconds = match self.current().map(|e| e.rest_seconds) {
            Ok(seconds) => seconds,
            Err(e) => return Err(self.reject(e)),
        };
        self.rest_timer.start(rest_seconds);
        Ok(())
    }

    /// Dismisses the rest countdown locally; never calls the network.
    pub fn dismiss_rest_timer(&mut self) {
        self.rest_timer.dismiss();
    }

    pub fn extend_rest(&mut self, seconds: u32) -> Result<()> {
        self.ensure_open()?;
        self.rest_timer.add_time(seconds);
        Ok(())
    }

    pub fn shorten_rest(&mut self, seconds: u32) -> Result<()> {
        self.ensure_open()?;
        self.rest_timer.subtract_time(seconds);
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Finishing & cancelling
    // ------------------------------------------------------------------------

    /// Opens the finish confirmation; offered only once every set of every
    /// exercise is completed.
    pub fn request_finish(&mut self) -> Result<()> {
        self.ensure_open()?;
        if !self.all_exercises_completed() {
            return Err(self.reject(SessionError::NotAllSetsCompleted));
        }
        self.menu = MenuState::ConfirmFinish;
        Ok(())
    }

    /// Completes the session after confirmation and yields the outcome.
    pub async fn confirm_finish(&mut self, notes: Option<&str>) -> Result<SessionOutcome> {
        self.ensure_open()?;
        if self.menu != MenuState::ConfirmFinish {
            return Err(self.reject(SessionError::ConfirmationRequired));
        }
        self.menu = MenuState::Closed;

        self.in_flight = true;
        let result = self.gateway.complete_session(&self.session_id, notes).await;
        self.in_flight = false;

        let record = match result {
            Ok(record) => record,
            Err(e) => return Err(self.fail("complete session", e)),
        };
        self.apply_snapshot(record);
        self.outcome = Some(SessionOutcome::Finished);
        info!(session = %self.session_id, "workout finished");
        Ok(SessionOutcome::Finished)
    }

    /// Opens the cancel confirmation.
    pub fn request_cancel(&mut self) -> Result<()> {
        self.ensure_open()?;
        self.menu = MenuState::ConfirmCancel;
        Ok(())
    }

    /// Discards the session after confirmation and yields the outcome.
    pub async fn confirm_cancel(&mut self) -> Result<SessionOutcome> {
        self.ensure_open()?;
        if self.menu != MenuState::ConfirmCancel {
            return Err(self.reject(SessionError::ConfirmationRequired));
        }
        self.menu = MenuState::Closed;

        self.in_flight = true;
        let result = self.gateway.cancel_session(&self.session_id).await;
        self.in_flight = false;

        let record = match result {
            Ok(record) => record,
            Err(e) => return Err(self.fail("cancel session", e)),
        };
        self.apply_snapshot(record);
        self.outcome = Some(SessionOutcome::Discarded);
        info!(session = %self.session_id, "workout discarded");
        Ok(SessionOutcome::Discarded)
    }

    /// Backs out of a finish/cancel confirmation.
    pub fn decline_confirmation(&mut self) {
        if matches!(self.menu, MenuState::ConfirmFinish | MenuState::ConfirmCancel) {
            self.menu = MenuState::Closed;
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
