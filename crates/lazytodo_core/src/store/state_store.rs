//! State holder mediating dispatch and change notification.
//!
//! # Responsibility
//! - Hold the current published `TodoState`.
//! - Run the reducer on dispatch and notify subscribers synchronously.
//!
//! # Invariants
//! - Subscribers run in subscription order after every applied action and
//!   all observe the same post-dispatch snapshot.
//! - Dispatch from inside a subscriber is queued and applied after the
//!   current notification round; the outermost `dispatch` drains the queue.
//! - The store is single-threaded (`!Send`); it never locks.

use crate::model::task::TodoState;
use crate::store::actions::Action;
use crate::store::reducer::{initial_state, reduce};
use log::debug;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::Arc;

/// Change-notification callback. Reads the new state through the store.
pub type Listener = Box<dyn Fn()>;

/// Handle returned by `subscribe`, accepted by `TodoStore::unsubscribe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Capability interface the controller and persistence adapter depend on.
pub trait StateStore {
    /// Applies `action` and notifies subscribers.
    fn dispatch(&self, action: Action);
    /// Registers a change listener.
    fn subscribe(&self, listener: Listener) -> SubscriptionId;
    /// Returns the current published state.
    fn state(&self) -> Arc<TodoState>;
}

/// Default `StateStore` backed by the pure reducer.
pub struct TodoStore {
    state: RefCell<Arc<TodoState>>,
    listeners: RefCell<Vec<(SubscriptionId, Rc<dyn Fn()>)>>,
    next_subscription: Cell<u64>,
    pending: RefCell<VecDeque<Action>>,
    dispatching: Cell<bool>,
}

impl TodoStore {
    /// Creates a store holding the reducer's initial state.
    pub fn new() -> Self {
        Self::from_arc(reduce(&initial_state(), Action::Init))
    }

    /// Creates a store starting from `state` instead of the empty state.
    pub fn with_state(state: TodoState) -> Self {
        Self::from_arc(Arc::new(state))
    }

    fn from_arc(state: Arc<TodoState>) -> Self {
        Self {
            state: RefCell::new(state),
            listeners: RefCell::new(Vec::new()),
            next_subscription: Cell::new(0),
            pending: RefCell::new(VecDeque::new()),
            dispatching: Cell::new(false),
        }
    }

    /// Removes a listener. Returns `false` when `id` is not registered.
    ///
    /// A listener removed during a notification round still runs in that
    /// round if it had not run yet.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(registered, _)| *registered != id);
        listeners.len() != before
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    fn apply(&self, action: Action) {
        let kind = action.kind();
        let previous = self.state();
        let next = reduce(&previous, action);
        let changed = !Arc::ptr_eq(&previous, &next);
        *self.state.borrow_mut() = next;
        debug!(
            "event=dispatch module=store status=ok kind={} changed={} items={}",
            kind,
            changed,
            self.state.borrow().items.len()
        );

        // Snapshot so listeners may subscribe or unsubscribe while running.
        let listeners = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect::<Vec<_>>();
        for listener in listeners {
            listener();
        }
    }
}

impl Default for TodoStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StateStore for TodoStore {
    fn dispatch(&self, action: Action) {
        if self.dispatching.get() {
            debug!(
                "event=dispatch module=store status=queued kind={}",
                action.kind()
            );
            self.pending.borrow_mut().push_back(action);
            return;
        }

        let _guard = DispatchGuard::enter(&self.dispatching);
        self.apply(action);
        loop {
            let next = self.pending.borrow_mut().pop_front();
            match next {
                Some(action) => self.apply(action),
                None => break,
            }
        }
    }

    fn subscribe(&self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription.get());
        self.next_subscription.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, Rc::from(listener)));
        id
    }

    fn state(&self) -> Arc<TodoState> {
        Arc::clone(&self.state.borrow())
    }
}

// Clears the dispatching flag even if a listener panics mid-round.
struct DispatchGuard<'a> {
    flag: &'a Cell<bool>,
}

impl<'a> DispatchGuard<'a> {
    fn enter(flag: &'a Cell<bool>) -> Self {
        flag.set(true);
        Self { flag }
    }
}

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}
