//! Core logic for LazyTodo.
//! This crate is the single source of truth for task state transitions.
//!
//! Data flows one way: a view emits an intent event, the controller maps it
//! to an `Action`, the `TodoStore` runs the reducer and notifies subscribers,
//! and the controller reconciles the view while the persistence listener
//! saves the new state.

pub mod controller;
pub mod db;
pub mod logging;
pub mod model;
pub mod persistence;
pub mod store;
pub mod view;

pub use controller::fresh_id;
pub use controller::reconcile::{reconcile, ReconcileStats};
pub use controller::todo_app::TodoApp;
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingStatus};
pub use model::task::{Filter, Task, TaskId, TodoState};
pub use persistence::kv_store::{KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore};
pub use persistence::state_persistence::{
    load_state, persist_changes, restore_state, save_state, STATE_STORAGE_KEY,
};
pub use persistence::{StorageError, StorageResult};
pub use store::actions::Action;
pub use store::reducer::{all_items, reduce, remaining_count, visible_items};
pub use store::state_store::{Listener, StateStore, SubscriptionId, TodoStore};
pub use view::item::{ItemMode, TaskItem};
pub use view::list::TaskList;
pub use view::{ElementKey, EmittedEvent, EventOrigin, ItemView, ListView, ViewEvent};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
