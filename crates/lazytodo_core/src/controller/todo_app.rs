//! Application controller wiring one list view to one store.
//!
//! # Responsibility
//! - Subscribe to the store and reconcile the view on every change.
//! - Map intent events drained from the view to actions and dispatch them.
//!
//! # Invariants
//! - The controller holds the store and view explicitly; there is no global.
//! - Item-targeted events resolve their task id from the origin child's
//!   marker at handling time. Events from vanished or untagged children are
//!   dropped.
//! - The view is never borrowed across a dispatch, so the store subscriber
//!   can borrow it for reconciliation.

use crate::controller::fresh_id;
use crate::controller::reconcile::reconcile;
use crate::model::task::{Filter, Task, TaskId};
use crate::store::actions::{
    add_item, complete_item, remove_completed, remove_item, set_filter, uncomplete_item,
    update_item_description, Action,
};
use crate::store::state_store::{StateStore, SubscriptionId};
use crate::view::{EmittedEvent, EventOrigin, ItemView, ListView, ViewEvent};
use log::warn;
use std::cell::RefCell;
use std::rc::Rc;

/// Controller for a list view `V` backed by store `S`.
pub struct TodoApp<S: StateStore, V: ListView> {
    store: Rc<S>,
    view: Rc<RefCell<V>>,
    subscription: SubscriptionId,
}

impl<S, V> TodoApp<S, V>
where
    S: StateStore + 'static,
    V: ListView + 'static,
{
    /// Subscribes to `store` and renders its current state into `view`.
    pub fn new(store: Rc<S>, view: Rc<RefCell<V>>) -> Self {
        // Weak handles: the store owns this listener, so a strong handle to
        // the store here would be a cycle.
        let listener_store = Rc::downgrade(&store);
        let listener_view = Rc::downgrade(&view);
        let subscription = store.subscribe(Box::new(move || {
            let (Some(store), Some(view)) = (listener_store.upgrade(), listener_view.upgrade())
            else {
                return;
            };
            let state = store.state();
            match view.try_borrow_mut() {
                Ok(mut view) => {
                    reconcile(&mut *view, &state);
                }
                Err(_) => warn!(
                    "event=reconcile module=controller status=skipped reason=view_borrowed"
                ),
            };
        }));

        let app = Self {
            store,
            view,
            subscription,
        };
        app.update_view();
        app
    }

    /// Reconciles the view against the current store state.
    pub fn update_view(&self) {
        let state = self.store.state();
        reconcile(&mut *self.view.borrow_mut(), &state);
    }

    /// Maps one intent event to an action and dispatches it.
    ///
    /// Returns the dispatched action kind, or `None` when the event was
    /// dropped.
    pub fn handle_event(&self, emitted: EmittedEvent) -> Option<&'static str> {
        let action = self.action_for(emitted)?;
        let kind = action.kind();
        self.store.dispatch(action);
        Some(kind)
    }

    /// Drains the view's pending intent events and handles them in order.
    ///
    /// Returns the number of actions dispatched.
    pub fn process_view_events(&self) -> usize {
        let events = self.view.borrow_mut().take_events();
        events
            .into_iter()
            .filter_map(|event| self.handle_event(event))
            .count()
    }

    pub fn store(&self) -> &Rc<S> {
        &self.store
    }

    pub fn view(&self) -> &Rc<RefCell<V>> {
        &self.view
    }

    /// Store subscription owned by this controller.
    pub fn subscription(&self) -> SubscriptionId {
        self.subscription
    }

    fn action_for(&self, emitted: EmittedEvent) -> Option<Action> {
        let EmittedEvent { origin, event } = emitted;
        match event {
            ViewEvent::NewTodo(description) => Some(add_item(Task::new(fresh_id(), description))),
            ViewEvent::ItemCompleted => self.target_id(origin, "item_completed").map(complete_item),
            ViewEvent::ItemToDo => self.target_id(origin, "item_to_do").map(uncomplete_item),
            ViewEvent::ItemDeleted => self.target_id(origin, "item_deleted").map(remove_item),
            ViewEvent::ItemDescriptionUpdated(description) => self
                .target_id(origin, "item_description_updated")
                .map(|item_id| update_item_description(item_id, description)),
            ViewEvent::FilterSelected(value) => Some(set_filter(Filter::coerce(&value))),
            ViewEvent::ClearCompleted => Some(remove_completed()),
        }
    }

    fn target_id(&self, origin: EventOrigin, event_name: &str) -> Option<TaskId> {
        let EventOrigin::Item(key) = origin else {
            warn!(
                "event={} module=controller status=dropped reason=not_item_origin",
                event_name
            );
            return None;
        };

        let view = self.view.borrow();
        let task_id = view
            .children()
            .iter()
            .find(|child| child.key() == key)
            .and_then(|child| child.task_id())
            .map(str::to_owned);
        if task_id.is_none() {
            warn!(
                "event={} module=controller status=dropped reason=unknown_origin key={}",
                event_name, key.0
            );
        }
        task_id
    }
}
