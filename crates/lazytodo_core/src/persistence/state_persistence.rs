//! Whole-state save/restore through a `KeyValueStore`.
//!
//! # Responsibility
//! - Load the persisted state once at startup and hand it to the store.
//! - Save the full state after every dispatch.
//!
//! # Invariants
//! - The stored value is exactly the JSON of `TodoState`.
//! - Restore fails soft: missing, unreadable or corrupt data leaves the
//!   store untouched.
//! - Save failures are logged and never interrupt dispatch.

use crate::model::task::TodoState;
use crate::persistence::kv_store::KeyValueStore;
use crate::persistence::StorageResult;
use crate::store::actions::set_state;
use crate::store::state_store::{StateStore, SubscriptionId};
use log::{error, info, warn};
use std::rc::Rc;

/// Storage key holding the serialized state.
pub const STATE_STORAGE_KEY: &str = "todo-app-state";

/// Reads and parses the persisted state.
///
/// Returns `Ok(None)` when nothing has been saved yet.
pub fn load_state<K: KeyValueStore + ?Sized>(kv: &K) -> StorageResult<Option<TodoState>> {
    let Some(raw) = kv.get_item(STATE_STORAGE_KEY)? else {
        return Ok(None);
    };
    Ok(Some(serde_json::from_str(&raw)?))
}

/// Serializes `state` and overwrites the stored value.
pub fn save_state<K: KeyValueStore + ?Sized>(kv: &K, state: &TodoState) -> StorageResult<()> {
    let raw = serde_json::to_string(state)?;
    kv.set_item(STATE_STORAGE_KEY, &raw)
}

/// Dispatches the persisted state into `store`, if there is a usable one.
///
/// Returns whether a state was restored.
pub fn restore_state<S, K>(store: &S, kv: &K) -> bool
where
    S: StateStore + ?Sized,
    K: KeyValueStore + ?Sized,
{
    match load_state(kv) {
        Ok(Some(state)) => {
            info!(
                "event=state_restore module=persistence status=ok items={} filter={}",
                state.items.len(),
                state.filter
            );
            store.dispatch(set_state(state));
            true
        }
        Ok(None) => {
            info!("event=state_restore module=persistence status=empty");
            false
        }
        Err(err) => {
            warn!(
                "event=state_restore module=persistence status=skipped error={}",
                err
            );
            false
        }
    }
}

/// Subscribes a listener saving the full state after every dispatch.
pub fn persist_changes<S, K>(store: &Rc<S>, kv: Rc<K>) -> SubscriptionId
where
    S: StateStore + 'static,
    K: KeyValueStore + 'static,
{
    let listener_store = Rc::downgrade(store);
    store.subscribe(Box::new(move || {
        let Some(store) = listener_store.upgrade() else {
            return;
        };
        if let Err(err) = save_state(&*kv, &store.state()) {
            error!(
                "event=state_save module=persistence status=error error={}",
                err
            );
        }
    }))
}
