//! Liftlog Core - Shared types for workout session tracking
//!
//! This crate provides the core domain types shared between the
//! remote gateway (liftlog-gateway) and the session state machine
//! (liftlog-session).
//!
//! All code follows the panic-free policy: no `.unwrap()`, `.expect()`,
//! `panic!()`, `unreachable!()`, `todo!()`, or direct indexing `[i]`.

pub mod exercise;
pub mod id;
pub mod mapper;
pub mod record;
pub mod timer;

// Re-exports for convenience
pub use exercise::{ExerciseEntry, SetEntry};
pub use id::{ExerciseId, SessionExerciseId, SessionId, SetLogId, SetSlotId};
pub use mapper::map_session;
pub use record::{SessionExerciseRecord, SessionRecord, SetLogRecord};
pub use timer::{RestTimer, WorkoutTimer};
