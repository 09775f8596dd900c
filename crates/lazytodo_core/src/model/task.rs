//! Task and state domain model.
//!
//! # Responsibility
//! - Define the canonical task record and the application state shape.
//! - Own the `Filter` enumeration and its lenient string boundary.
//!
//! # Invariants
//! - `id` is opaque, stable and never reused for another task.
//! - Every value in `TodoState::items` is keyed by its own `id`.
//! - `TodoState::items` keeps insertion order, which is creation order for
//!   tasks and survives a save/load cycle.
//! - `filter` is always one of `all|active|completed`; unknown inputs coerce
//!   to `all` at every string boundary.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::{Display, Formatter};

/// Opaque task identifier.
///
/// Generated once by the controller (UUID v4 text) and treated as an
/// uninterpreted string everywhere else.
pub type TaskId = String;

/// Single to-do entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Stable identity. Two tasks with the same id are the same entity.
    pub id: TaskId,
    /// Free-form text shown in the list.
    pub description: String,
    /// Whether the task is done.
    pub completed: bool,
}

impl Task {
    /// Creates a not-yet-completed task.
    pub fn new(id: impl Into<TaskId>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            completed: false,
        }
    }

    /// Returns a copy of this task with a different completion flag.
    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }
}

/// Named view restriction over the task set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "FilterRepr")]
pub enum Filter {
    /// No restriction.
    #[default]
    All,
    /// Only tasks with `completed == false`.
    Active,
    /// Only tasks with `completed == true`.
    Completed,
}

impl Filter {
    /// Every filter value, in display order.
    pub const VALUES: [Filter; 3] = [Filter::All, Filter::Active, Filter::Completed];

    /// Stable string id used in persisted state and view attributes.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }

    /// Parses an exact filter value.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "all" => Some(Self::All),
            "active" => Some(Self::Active),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    /// Parses a filter value, falling back to `all` for anything unknown.
    pub fn coerce(value: &str) -> Self {
        Self::parse(value).unwrap_or_default()
    }

    /// Returns whether `task` passes this filter.
    pub fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Active => !task.completed,
            Self::Completed => task.completed,
        }
    }
}

impl Display for Filter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// Accepts any JSON value so a malformed persisted filter degrades to `all`
// instead of failing the whole state load.
#[derive(Deserialize)]
#[serde(untagged)]
enum FilterRepr {
    Text(String),
    Other(serde::de::IgnoredAny),
}

impl From<FilterRepr> for Filter {
    fn from(value: FilterRepr) -> Self {
        match value {
            FilterRepr::Text(text) => Filter::coerce(&text),
            FilterRepr::Other(_) => Filter::All,
        }
    }
}

/// Whole application state.
///
/// Published states are shared behind `Arc` by the store and are never
/// mutated after publication; the reducer builds a new value per change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoState {
    /// Tasks keyed by their own id, in creation order.
    #[serde(default, deserialize_with = "deserialize_items")]
    pub items: IndexMap<TaskId, Task>,
    /// Active view restriction.
    #[serde(default)]
    pub filter: Filter,
}

impl TodoState {
    /// Builds a state from tasks, keying each by its own id.
    ///
    /// Later tasks overwrite earlier ones sharing an id.
    pub fn from_tasks(tasks: impl IntoIterator<Item = Task>, filter: Filter) -> Self {
        Self {
            items: tasks
                .into_iter()
                .map(|task| (task.id.clone(), task))
                .collect(),
            filter,
        }
    }
}

fn deserialize_items<'de, D>(deserializer: D) -> Result<IndexMap<TaskId, Task>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = IndexMap::<String, Task>::deserialize(deserializer)?;
    Ok(raw
        .into_values()
        .map(|task| (task.id.clone(), task))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::{Filter, Task, TodoState};

    #[test]
    fn filter_coerce_falls_back_to_all() {
        assert_eq!(Filter::coerce("active"), Filter::Active);
        assert_eq!(Filter::coerce("completed"), Filter::Completed);
        assert_eq!(Filter::coerce(" completed "), Filter::All);
        assert_eq!(Filter::coerce("Active"), Filter::All);
        assert_eq!(Filter::coerce("done"), Filter::All);
        assert_eq!(Filter::coerce(""), Filter::All);
    }

    #[test]
    fn state_deserialize_rekeys_items_and_coerces_filter() {
        let value = serde_json::json!({
            "items": {
                "wrong-key": {"id": "a", "description": "A", "completed": false}
            },
            "filter": 42
        });

        let state: TodoState = serde_json::from_value(value).unwrap();
        assert_eq!(state.filter, Filter::All);
        assert_eq!(state.items.get("a"), Some(&Task::new("a", "A")));
        assert!(!state.items.contains_key("wrong-key"));
    }

    #[test]
    fn state_load_keeps_stored_item_order() {
        let json = r#"{"items":{
            "zz":{"id":"zz","description":"first","completed":false},
            "aa":{"id":"aa","description":"second","completed":true},
            "mm":{"id":"mm","description":"third","completed":false}
        },"filter":"all"}"#;

        let state: TodoState = serde_json::from_str(json).unwrap();
        let ids = state.items.keys().map(String::as_str).collect::<Vec<_>>();
        assert_eq!(ids, vec!["zz", "aa", "mm"]);

        let reloaded: TodoState =
            serde_json::from_str(&serde_json::to_string(&state).unwrap()).unwrap();
        let ids = reloaded.items.keys().map(String::as_str).collect::<Vec<_>>();
        assert_eq!(ids, vec!["zz", "aa", "mm"]);
    }

    #[test]
    fn state_serialization_uses_expected_wire_fields() {
        let state = TodoState::from_tasks(
            [Task::new("x", "Buy milk").with_completed(true)],
            Filter::Completed,
        );

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["filter"], "completed");
        assert_eq!(json["items"]["x"]["id"], "x");
        assert_eq!(json["items"]["x"]["description"], "Buy milk");
        assert_eq!(json["items"]["x"]["completed"], true);
    }
}
