//! Headless task-item component.
//!
//! # Responsibility
//! - Hold the displayed fields of one task (`description`, `completed`) and
//!   its `data-id` marker.
//! - Run the per-item edit state machine and emit item intent events.
//!
//! # Invariants
//! - The component never changes its own `completed` field in response to a
//!   toggle; it only emits the intent. The controller writes the result back.
//! - Escape discards the edit buffer without emitting anything.
//! - Commit always emits, even when the buffer equals the description.

use crate::view::{ElementKey, ItemView, ViewEvent};

/// Placeholder shown until the controller writes a description.
pub const DEFAULT_DESCRIPTION: &str = "Task to do";

/// Interaction mode of one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemMode {
    Viewing,
    Editing,
}

/// One task row.
#[derive(Debug, Clone)]
pub struct TaskItem {
    key: ElementKey,
    task_id: Option<String>,
    description: String,
    completed: bool,
    mode: ItemMode,
    edit_buffer: String,
    edit_focused: bool,
    outbox: Vec<ViewEvent>,
}

impl TaskItem {
    pub fn new(key: ElementKey) -> Self {
        Self {
            key,
            task_id: None,
            description: DEFAULT_DESCRIPTION.to_string(),
            completed: false,
            mode: ItemMode::Viewing,
            edit_buffer: String::new(),
            edit_focused: false,
            outbox: Vec::new(),
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    pub fn mode(&self) -> ItemMode {
        self.mode
    }

    pub fn edit_buffer(&self) -> &str {
        &self.edit_buffer
    }

    /// Whether the edit field currently holds focus.
    pub fn edit_focused(&self) -> bool {
        self.edit_focused
    }

    /// Double activation of the description label: enter edit mode.
    pub fn activate_description(&mut self) {
        if self.mode == ItemMode::Editing {
            return;
        }
        self.edit_buffer = self.description.clone();
        self.mode = ItemMode::Editing;
        self.edit_focused = true;
    }

    /// Replaces the edit buffer with typed text. Ignored outside edit mode.
    pub fn type_edit(&mut self, text: impl Into<String>) {
        if self.mode == ItemMode::Editing {
            self.edit_buffer = text.into();
        }
    }

    /// Escape key in the edit field: leave edit mode silently.
    pub fn press_escape(&mut self) {
        if self.mode == ItemMode::Editing {
            self.leave_edit_mode();
        }
    }

    /// Commits the edit buffer and leaves edit mode.
    pub fn commit_edit(&mut self) {
        if self.mode != ItemMode::Editing {
            return;
        }
        let description = std::mem::take(&mut self.edit_buffer);
        self.outbox.push(ViewEvent::ItemDescriptionUpdated(description));
        self.leave_edit_mode();
    }

    /// Completed checkbox toggled. Only available while viewing.
    pub fn toggle_completed(&mut self) {
        if self.mode != ItemMode::Viewing {
            return;
        }
        let event = if self.completed {
            ViewEvent::ItemToDo
        } else {
            ViewEvent::ItemCompleted
        };
        self.outbox.push(event);
    }

    /// Delete button activated. Only available while viewing.
    pub fn activate_delete(&mut self) {
        if self.mode == ItemMode::Viewing {
            self.outbox.push(ViewEvent::ItemDeleted);
        }
    }

    /// Drains events emitted by this item, oldest first.
    pub fn take_events(&mut self) -> Vec<ViewEvent> {
        std::mem::take(&mut self.outbox)
    }

    /// One-line text rendering.
    pub fn render(&self) -> String {
        match self.mode {
            ItemMode::Viewing => {
                let mark = if self.completed { "x" } else { " " };
                format!("[{mark}] {}", self.description)
            }
            ItemMode::Editing => format!("edit> {}", self.edit_buffer),
        }
    }

    fn leave_edit_mode(&mut self) {
        self.mode = ItemMode::Viewing;
        self.edit_buffer.clear();
        self.edit_focused = false;
    }
}

impl ItemView for TaskItem {
    fn key(&self) -> ElementKey {
        self.key
    }

    fn task_id(&self) -> Option<&str> {
        self.task_id.as_deref()
    }

    fn set_task_id(&mut self, task_id: &str) {
        self.task_id = Some(task_id.to_string());
    }

    fn set_description(&mut self, description: &str) {
        self.description = description.to_string();
    }

    fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
    }
}
