//! Liftlog Gateway - Remote mutation contract
//!
//! This crate defines the contract the session state machine holds
//! against the remote source of truth: the [`SessionGateway`] trait with
//! one async method per remote operation, each returning the canonical
//! updated session, plus an in-memory implementation that models the
//! remote system's behaviour for tests and local development.
//!
//! All code follows the panic-free policy: no `.unwrap()`, `.expect()`,
//! `panic!()`, `unreachable!()`, `todo!()`, or direct indexing `[i]`.

pub mod error;
pub mod gateway;
pub mod memory;

// Re-exports for convenience
pub use error::{GatewayError, GatewayResult};
pub use gateway::{ExerciseTargets, SessionGateway, TargetPatch};
pub use memory::{CatalogExercise, InMemoryGateway};
