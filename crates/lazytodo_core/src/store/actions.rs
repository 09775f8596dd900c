//! Action records and their factory functions.
//!
//! # Responsibility
//! - Describe every state transition request as an immutable value.
//! - Provide one pure constructor per action kind.
//!
//! # Invariants
//! - Constructors never validate; the reducer decides what a request means.
//! - The serialized form is `{ "type": KIND, "payload"?: data }`.

use crate::model::task::{Filter, Task, TaskId, TodoState};
use serde::{Deserialize, Serialize};

/// Tagged state transition request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// Insert or overwrite `items[item.id]`.
    AddItem(Task),
    /// Replace the description of an existing task.
    UpdateItemDescription {
        #[serde(rename = "itemId")]
        item_id: TaskId,
        description: String,
    },
    /// Mark an existing task as completed.
    CompleteItem(TaskId),
    /// Mark an existing task as not completed.
    UncompleteItem(TaskId),
    /// Remove an existing task.
    RemoveItem(TaskId),
    /// Drop every completed task.
    RemoveCompleted,
    /// Replace the active filter.
    SetFilter(Filter),
    /// Replace the whole state.
    SetState(TodoState),
    /// Store bootstrap pseudo-action. The reducer leaves state untouched.
    Init,
    /// Any action kind this build does not know.
    #[serde(other)]
    Unknown,
}

impl Action {
    /// Stable kind name, matching the serialized `type` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AddItem(_) => "ADD_ITEM",
            Self::UpdateItemDescription { .. } => "UPDATE_ITEM_DESCRIPTION",
            Self::CompleteItem(_) => "COMPLETE_ITEM",
            Self::UncompleteItem(_) => "UNCOMPLETE_ITEM",
            Self::RemoveItem(_) => "REMOVE_ITEM",
            Self::RemoveCompleted => "REMOVE_COMPLETED",
            Self::SetFilter(_) => "SET_FILTER",
            Self::SetState(_) => "SET_STATE",
            Self::Init => "INIT",
            Self::Unknown => "UNKNOWN",
        }
    }
}

/// Builds an action adding `item` to the list.
pub fn add_item(item: Task) -> Action {
    Action::AddItem(item)
}

/// Builds an action replacing the description of `item_id`.
pub fn update_item_description(
    item_id: impl Into<TaskId>,
    description: impl Into<String>,
) -> Action {
    Action::UpdateItemDescription {
        item_id: item_id.into(),
        description: description.into(),
    }
}

/// Builds an action completing `item_id`.
pub fn complete_item(item_id: impl Into<TaskId>) -> Action {
    Action::CompleteItem(item_id.into())
}

/// Builds an action moving `item_id` back to not completed.
pub fn uncomplete_item(item_id: impl Into<TaskId>) -> Action {
    Action::UncompleteItem(item_id.into())
}

/// Builds an action removing `item_id`.
pub fn remove_item(item_id: impl Into<TaskId>) -> Action {
    Action::RemoveItem(item_id.into())
}

/// Builds an action removing every completed item.
pub fn remove_completed() -> Action {
    Action::RemoveCompleted
}

/// Builds an action replacing the filter.
pub fn set_filter(filter: Filter) -> Action {
    Action::SetFilter(filter)
}

/// Builds an action replacing the whole state.
pub fn set_state(state: TodoState) -> Action {
    Action::SetState(state)
}
