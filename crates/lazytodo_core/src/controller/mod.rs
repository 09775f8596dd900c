//! Controller bridging views and the state store.
//!
//! # Responsibility
//! - Translate view intent events into store actions.
//! - Reconcile list view attributes and children against store state.
//!
//! # See also
//! - `crate::view` for the capability traits this module drives.

pub mod reconcile;
pub mod todo_app;

use crate::model::task::TaskId;
use uuid::Uuid;

/// Generates a fresh task id (random UUID v4 text).
pub fn fresh_id() -> TaskId {
    Uuid::new_v4().to_string()
}
