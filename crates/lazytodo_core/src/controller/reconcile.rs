//! Incremental child reconciliation for the list view.
//!
//! # Invariants
//! - After `reconcile`, the children are exactly the visible tasks, one child
//!   per task id.
//! - A child matching a visible task is updated in place, never replaced.
//! - Final child order is the order `visible_items` produced.

use crate::model::task::TodoState;
use crate::store::reducer::{remaining_count, visible_items};
use crate::view::{ElementKey, ItemView, ListView};
use log::debug;
use std::collections::HashSet;

/// Counts of child operations performed by one reconciliation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    pub created: usize,
    pub updated: usize,
    pub removed: usize,
}

/// Writes `state` into `view`: attributes first, then children.
pub fn reconcile<V: ListView>(view: &mut V, state: &TodoState) -> ReconcileStats {
    let visible = visible_items(state);
    view.set_remaining(remaining_count(state));
    view.set_filter(state.filter);

    let existing = view
        .children()
        .iter()
        .map(|child| (child.key(), child.task_id().map(str::to_owned)))
        .collect::<Vec<_>>();
    let mut kept: HashSet<ElementKey> = HashSet::with_capacity(visible.len());
    let mut order = Vec::with_capacity(visible.len());
    let mut stats = ReconcileStats::default();

    for task in &visible {
        let matched = existing
            .iter()
            .find(|(key, task_id)| {
                task_id.as_deref() == Some(task.id.as_str()) && !kept.contains(key)
            })
            .map(|(key, _)| *key);

        match matched.and_then(|key| view.child_mut(key)) {
            Some(child) => {
                child.set_description(&task.description);
                child.set_completed(task.completed);
                kept.insert(child.key());
                order.push(child.key());
                stats.updated += 1;
            }
            None => {
                let mut child = view.create_child();
                child.set_task_id(&task.id);
                child.set_description(&task.description);
                child.set_completed(task.completed);
                kept.insert(child.key());
                order.push(child.key());
                view.append_child(child);
                stats.created += 1;
            }
        }
    }

    for (key, _) in existing {
        if !kept.contains(&key) && view.remove_child(key).is_some() {
            stats.removed += 1;
        }
    }
    view.reorder_children(&order);

    debug!(
        "event=reconcile module=controller status=ok filter={} visible={} created={} updated={} removed={}",
        state.filter,
        visible.len(),
        stats.created,
        stats.updated,
        stats.removed
    );
    stats
}
