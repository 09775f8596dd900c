//! Pure state transitions and derived read-only queries.
//!
//! # Responsibility
//! - Be the single authority for computing the next `TodoState`.
//! - Derive list projections (all, visible, remaining) from a state.
//!
//! # Invariants
//! - `reduce` never mutates its input state.
//! - A request that changes nothing returns the same `Arc` (pointer-equal).
//! - Requests targeting a missing id are no-ops, never errors.

use crate::model::task::{Task, TodoState};
use crate::store::actions::Action;
use std::sync::Arc;

/// Returns the state a fresh store starts from: no items, filter `all`.
pub fn initial_state() -> Arc<TodoState> {
    Arc::new(TodoState::default())
}

/// Computes the next state for `action`.
pub fn reduce(state: &Arc<TodoState>, action: Action) -> Arc<TodoState> {
    match action {
        Action::AddItem(item) => {
            let mut next = TodoState::clone(state);
            next.items.insert(item.id.clone(), item);
            Arc::new(next)
        }
        Action::UpdateItemDescription {
            item_id,
            description,
        } => edit_item(state, &item_id, |item| item.description = description),
        Action::CompleteItem(item_id) => edit_item(state, &item_id, |item| item.completed = true),
        Action::UncompleteItem(item_id) => {
            edit_item(state, &item_id, |item| item.completed = false)
        }
        Action::RemoveItem(item_id) => {
            if !state.items.contains_key(&item_id) {
                return Arc::clone(state);
            }
            let mut next = TodoState::clone(state);
            next.items.shift_remove(&item_id);
            Arc::new(next)
        }
        Action::RemoveCompleted => Arc::new(TodoState {
            items: state
                .items
                .iter()
                .filter(|(_, item)| !item.completed)
                .map(|(id, item)| (id.clone(), item.clone()))
                .collect(),
            filter: state.filter,
        }),
        Action::SetFilter(filter) => Arc::new(TodoState {
            items: state.items.clone(),
            filter,
        }),
        Action::SetState(replacement) => Arc::new(replacement),
        Action::Init | Action::Unknown => Arc::clone(state),
    }
}

fn edit_item(
    state: &Arc<TodoState>,
    item_id: &str,
    edit: impl FnOnce(&mut Task),
) -> Arc<TodoState> {
    if !state.items.contains_key(item_id) {
        return Arc::clone(state);
    }

    let mut next = TodoState::clone(state);
    if let Some(item) = next.items.get_mut(item_id) {
        edit(item);
    }
    Arc::new(next)
}

/// Returns every task, in creation order.
pub fn all_items(state: &TodoState) -> Vec<&Task> {
    state.items.values().collect()
}

/// Counts tasks not yet completed, regardless of the active filter.
pub fn remaining_count(state: &TodoState) -> usize {
    state.items.values().filter(|item| !item.completed).count()
}

/// Returns the tasks passing the active filter, in creation order.
pub fn visible_items(state: &TodoState) -> Vec<&Task> {
    state
        .items
        .values()
        .filter(|item| state.filter.matches(item))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{initial_state, reduce, visible_items};
    use crate::model::task::{Filter, Task};
    use crate::store::actions::Action;
    use std::sync::Arc;

    #[test]
    fn initial_state_is_empty_with_all_filter() {
        let state = initial_state();
        assert!(state.items.is_empty());
        assert_eq!(state.filter, Filter::All);
    }

    #[test]
    fn remove_item_keeps_order_of_the_rest() {
        let mut state = initial_state();
        for id in ["c", "a", "b"] {
            state = reduce(&state, Action::AddItem(Task::new(id, id)));
        }

        let state = reduce(&state, Action::RemoveItem("c".to_owned()));
        let state = reduce(&state, Action::AddItem(Task::new("0", "zero")));
        let ids = visible_items(&state)
            .into_iter()
            .map(|task| task.id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["a", "b", "0"]);
    }

    #[test]
    fn init_and_unknown_return_same_reference() {
        let state = initial_state();
        assert!(Arc::ptr_eq(&state, &reduce(&state, Action::Init)));
        assert!(Arc::ptr_eq(&state, &reduce(&state, Action::Unknown)));
    }
}
