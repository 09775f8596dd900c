//! Unidirectional state store: actions, reducer and the store itself.
//!
//! # Responsibility
//! - Describe transition requests (`actions`).
//! - Compute next states purely (`reducer`).
//! - Hold the current state and notify subscribers (`state_store`).

pub mod actions;
pub mod reducer;
pub mod state_store;
