//! Liftlog Session - Live workout session state machine
//!
//! This crate owns the ephemeral state of a running workout: the
//! current-exercise pointer, per-set log/edit drafts, menu and picker
//! state, and both timers. It is the sole initiator of remote mutations
//! and reconciles its pointers against every canonical snapshot the
//! gateway returns.
//!
//! # Architecture
//!
//! The controller is a pure projection over the latest remote snapshot
//! plus a small bag of pointer state it owns outright. There is no second
//! mutable cache: every successful mutation returns the canonical session,
//! which is re-mapped through the data mapper before pointers are
//! reconciled.
//!
//! All code follows the panic-free policy: no `.unwrap()`, `.expect()`,
//! `panic!()`, `unreachable!()`, `todo!()`, or direct indexing `[i]`.

pub mod controller;
pub mod error;
pub mod navigation;
pub mod picker;

// Re-export commonly used types
pub use controller::{EditDraft, MenuState, SessionController, SessionOutcome};
pub use error::{Result, SessionError};
pub use navigation::{resolve_exercise_index, NavigationPhase};
pub use picker::{PickedExercise, PickerMode};
