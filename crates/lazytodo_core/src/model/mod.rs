//! Domain model for tasks and application state.
//!
//! # Responsibility
//! - Define canonical data structures used by the store, controller and views.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId`.
//! - State values are replaced wholesale, never edited after publication.

pub mod task;
