//! View capability interfaces and headless view components.
//!
//! # Responsibility
//! - Define the small interfaces the controller needs from a list view and
//!   its item children (`ListView`, `ItemView`).
//! - Provide headless components (`TaskList`, `TaskItem`) that implement
//!   them and can be driven by any front-end.
//!
//! # Invariants
//! - Views own no business state beyond transient edit mode.
//! - Item-targeted intent events carry the originating element key; the task
//!   id is read from that element's marker, never from the payload.

pub mod item;
pub mod list;

use crate::model::task::Filter;

/// View-local handle identifying one child element.
///
/// Keys are unique per list for its lifetime and are never reused, so a
/// stale key resolves to nothing instead of to a different element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementKey(pub u64);

/// Semantic intent emitted by a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    /// New task submitted with the given description.
    NewTodo(String),
    /// Item toggled on.
    ItemCompleted,
    /// Item toggled off.
    ItemToDo,
    /// Item delete activated.
    ItemDeleted,
    /// Item edit committed with the given description.
    ItemDescriptionUpdated(String),
    /// Filter link activated with the given raw filter value.
    FilterSelected(String),
    /// Clear-completed activated.
    ClearCompleted,
}

/// Element an event was emitted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOrigin {
    /// The list view itself.
    List,
    /// A child item element.
    Item(ElementKey),
}

/// Intent event as observed by the controller after bubbling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedEvent {
    pub origin: EventOrigin,
    pub event: ViewEvent,
}

impl EmittedEvent {
    pub fn from_list(event: ViewEvent) -> Self {
        Self {
            origin: EventOrigin::List,
            event,
        }
    }

    pub fn from_item(key: ElementKey, event: ViewEvent) -> Self {
        Self {
            origin: EventOrigin::Item(key),
            event,
        }
    }
}

/// Settable fields of one item child.
pub trait ItemView {
    /// Element handle of this child.
    fn key(&self) -> ElementKey;
    /// Stable marker holding the task id, if tagged.
    fn task_id(&self) -> Option<&str>;
    fn set_task_id(&mut self, task_id: &str);
    fn set_description(&mut self, description: &str);
    fn set_completed(&mut self, completed: bool);
}

/// List view surface used by the controller.
pub trait ListView {
    type Item: ItemView;

    /// Writes the `remaining` attribute.
    fn set_remaining(&mut self, remaining: usize);
    /// Writes the `filter` attribute.
    fn set_filter(&mut self, filter: Filter);

    /// Current children, in display order.
    fn children(&self) -> &[Self::Item];
    fn child_mut(&mut self, key: ElementKey) -> Option<&mut Self::Item>;
    /// Creates a detached child; it is not displayed until appended.
    fn create_child(&mut self) -> Self::Item;
    fn append_child(&mut self, child: Self::Item);
    fn remove_child(&mut self, key: ElementKey) -> Option<Self::Item>;
    /// Moves children so the listed keys come first, in the given order.
    ///
    /// Children are moved, not recreated; unlisted ones keep their relative
    /// order after the listed ones.
    fn reorder_children(&mut self, order: &[ElementKey]);

    /// Drains intent events emitted since the last call, oldest first.
    fn take_events(&mut self) -> Vec<EmittedEvent>;
}
