//! Headless task-list component.
//!
//! # Responsibility
//! - Hold the observed `remaining` and `filter` attributes as text, the way
//!   a markup element does, and coerce them on read.
//! - Own the item children and bubble their intent events.
//! - Emit list-level intents (new todo, filter selected, clear completed).
//!
//! # Invariants
//! - `remaining()` is `0` when the attribute is missing or not a
//!   non-negative integer.
//! - `filter()` is `all` when the attribute is missing or unknown.
//! - Attribute changes are rendered through `on_props_changed`, never by
//!   writing rendered text directly.

use crate::model::task::Filter;
use crate::view::item::TaskItem;
use crate::view::{ElementKey, EmittedEvent, ItemView, ListView, ViewEvent};
use std::collections::BTreeMap;

pub const REMAINING_ATTRIBUTE: &str = "remaining";
pub const FILTER_ATTRIBUTE: &str = "filter";

/// Observed list attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListProp {
    Remaining,
    Filter,
}

impl ListProp {
    /// Maps an attribute name to the observed prop, if observed.
    pub fn from_attribute(name: &str) -> Option<Self> {
        match name {
            REMAINING_ATTRIBUTE => Some(Self::Remaining),
            FILTER_ATTRIBUTE => Some(Self::Filter),
            _ => None,
        }
    }
}

type PropHandler = fn(&mut TaskList);

const PROP_HANDLERS: &[(ListProp, PropHandler)] = &[
    (ListProp::Remaining, TaskList::render_remaining),
    (ListProp::Filter, TaskList::render_filter),
];

/// The task collection view.
#[derive(Debug, Clone)]
pub struct TaskList {
    attributes: BTreeMap<String, String>,
    new_todo_input: String,
    remaining_label: String,
    selected_filter: Filter,
    children: Vec<TaskItem>,
    outbox: Vec<EmittedEvent>,
    next_key: u64,
}

impl TaskList {
    pub fn new() -> Self {
        let mut list = Self {
            attributes: BTreeMap::new(),
            new_todo_input: String::new(),
            remaining_label: String::new(),
            selected_filter: Filter::All,
            children: Vec::new(),
            outbox: Vec::new(),
            next_key: 0,
        };
        list.on_props_changed(&[ListProp::Remaining, ListProp::Filter]);
        list
    }

    /// Raw attribute value.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Sets a raw attribute value and re-renders it when observed.
    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        if self.attributes.get(name) == Some(&value) {
            return;
        }
        self.attributes.insert(name.to_string(), value);
        if let Some(prop) = ListProp::from_attribute(name) {
            self.on_props_changed(&[prop]);
        }
    }

    pub fn remove_attribute(&mut self, name: &str) {
        if self.attributes.remove(name).is_some() {
            if let Some(prop) = ListProp::from_attribute(name) {
                self.on_props_changed(&[prop]);
            }
        }
    }

    /// Remaining count, coerced to `0` when missing or malformed.
    pub fn remaining(&self) -> usize {
        self.attribute(REMAINING_ATTRIBUTE)
            .and_then(|value| value.trim().parse::<usize>().ok())
            .unwrap_or(0)
    }

    /// Active filter, coerced to `all` when missing or unknown.
    pub fn filter(&self) -> Filter {
        self.attribute(FILTER_ATTRIBUTE)
            .map(Filter::coerce)
            .unwrap_or_default()
    }

    /// Re-renders the parts of the view bound to `changed`.
    pub fn on_props_changed(&mut self, changed: &[ListProp]) {
        for prop in changed {
            if let Some((_, handler)) = PROP_HANDLERS.iter().find(|(key, _)| key == prop) {
                handler(self);
            }
        }
    }

    /// Footer label, e.g. `2 tasks left`.
    pub fn remaining_label(&self) -> &str {
        &self.remaining_label
    }

    /// Filter link currently rendered as selected.
    pub fn selected_filter(&self) -> Filter {
        self.selected_filter
    }

    pub fn new_todo_input(&self) -> &str {
        &self.new_todo_input
    }

    /// Replaces the new-todo input text.
    pub fn type_new_todo(&mut self, text: impl Into<String>) {
        self.new_todo_input = text.into();
    }

    /// Submits the new-todo input and clears it.
    ///
    /// Blank input is cleared without emitting anything.
    pub fn submit_new_todo(&mut self) {
        let text = std::mem::take(&mut self.new_todo_input);
        let description = text.trim();
        if description.is_empty() {
            return;
        }
        self.outbox.push(EmittedEvent::from_list(ViewEvent::NewTodo(
            description.to_string(),
        )));
    }

    /// Activates the filter link named `value`.
    pub fn select_filter(&mut self, value: impl Into<String>) {
        let event = ViewEvent::FilterSelected(value.into());
        self.outbox.push(EmittedEvent::from_list(event));
    }

    /// Activates the clear-completed button.
    pub fn clear_completed(&mut self) {
        self.outbox.push(EmittedEvent::from_list(ViewEvent::ClearCompleted));
    }

    /// Runs `interact` on the child `key`, then bubbles its events.
    ///
    /// Returns `false` when no such child is displayed.
    pub fn with_child(
        &mut self,
        key: ElementKey,
        interact: impl FnOnce(&mut TaskItem),
    ) -> bool {
        let Some(child) = self.children.iter_mut().find(|child| child.key() == key) else {
            return false;
        };
        interact(child);
        let bubbled = child
            .take_events()
            .into_iter()
            .map(|event| EmittedEvent::from_item(key, event));
        self.outbox.extend(bubbled);
        true
    }

    /// Key of the child displayed at `position` (0-based).
    pub fn child_key_at(&self, position: usize) -> Option<ElementKey> {
        self.children.get(position).map(|child| child.key())
    }

    /// Multi-line text rendering of the whole list.
    pub fn render(&self) -> String {
        let mut lines = Vec::with_capacity(self.children.len() + 2);
        lines.push(format!("new> {}", self.new_todo_input));
        for (position, child) in self.children.iter().enumerate() {
            lines.push(format!("{:>3}. {}", position + 1, child.render()));
        }

        let filters = Filter::VALUES
            .iter()
            .map(|filter| {
                if *filter == self.selected_filter {
                    format!("[{filter}]")
                } else {
                    filter.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" ");
        lines.push(format!(
            "{} | {} | clear completed",
            self.remaining_label, filters
        ));
        lines.join("\n")
    }

    fn render_remaining(&mut self) {
        let remaining = self.remaining();
        let noun = if remaining == 1 { "task" } else { "tasks" };
        self.remaining_label = format!("{remaining} {noun} left");
    }

    fn render_filter(&mut self) {
        self.selected_filter = self.filter();
    }
}

impl Default for TaskList {
    fn default() -> Self {
        Self::new()
    }
}

impl ListView for TaskList {
    type Item = TaskItem;

    fn set_remaining(&mut self, remaining: usize) {
        self.set_attribute(REMAINING_ATTRIBUTE, remaining.to_string());
    }

    fn set_filter(&mut self, filter: Filter) {
        self.set_attribute(FILTER_ATTRIBUTE, filter.as_str());
    }

    fn children(&self) -> &[TaskItem] {
        &self.children
    }

    fn child_mut(&mut self, key: ElementKey) -> Option<&mut TaskItem> {
        self.children.iter_mut().find(|child| child.key() == key)
    }

    fn create_child(&mut self) -> TaskItem {
        let key = ElementKey(self.next_key);
        self.next_key += 1;
        TaskItem::new(key)
    }

    fn append_child(&mut self, child: TaskItem) {
        self.children.push(child);
    }

    fn remove_child(&mut self, key: ElementKey) -> Option<TaskItem> {
        let position = self.children.iter().position(|child| child.key() == key)?;
        Some(self.children.remove(position))
    }

    fn reorder_children(&mut self, order: &[ElementKey]) {
        self.children.sort_by_key(|child| {
            order
                .iter()
                .position(|key| *key == child.key())
                .unwrap_or(order.len())
        });
    }

    fn take_events(&mut self) -> Vec<EmittedEvent> {
        // Children mutated through `child_mut` have not bubbled yet.
        for child in &mut self.children {
            let key = child.key();
            let pending = child
                .take_events()
                .into_iter()
                .map(|event| EmittedEvent::from_item(key, event));
            self.outbox.extend(pending);
        }
        std::mem::take(&mut self.outbox)
    }
}
