use lazytodo_core::store::actions::{remove_item, set_filter};
use lazytodo_core::store::reducer::visible_items;
use lazytodo_core::{
    Action, ElementKey, EmittedEvent, Filter, ItemMode, ItemView, Listener, ListView,
    StateStore, SubscriptionId, Task, TaskList, TodoApp, TodoState, TodoStore, ViewEvent,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

/// Store fake recording dispatched actions without reducing them.
struct FakeStore {
    state: RefCell<Arc<TodoState>>,
    dispatched: RefCell<Vec<Action>>,
    listeners: RefCell<Vec<Listener>>,
}

impl FakeStore {
    fn new(state: TodoState) -> Rc<Self> {
        Rc::new(Self {
            state: RefCell::new(Arc::new(state)),
            dispatched: RefCell::new(Vec::new()),
            listeners: RefCell::new(Vec::new()),
        })
    }

    fn replace_state_and_notify(&self, state: TodoState) {
        *self.state.borrow_mut() = Arc::new(state);
        for listener in self.listeners.borrow().iter() {
            listener();
        }
    }

    fn dispatched(&self) -> Vec<Action> {
        self.dispatched.borrow().clone()
    }
}

impl StateStore for FakeStore {
    fn dispatch(&self, action: Action) {
        self.dispatched.borrow_mut().push(action);
    }

    fn subscribe(&self, listener: Listener) -> SubscriptionId {
        let mut listeners = self.listeners.borrow_mut();
        listeners.push(listener);
        SubscriptionId(listeners.len() as u64 - 1)
    }

    fn state(&self) -> Arc<TodoState> {
        Arc::clone(&self.state.borrow())
    }
}

fn three_items(filter: Filter) -> TodoState {
    TodoState::from_tasks(
        [
            Task::new("item-1", "Item 1"),
            Task::new("item-2", "Item 2").with_completed(true),
            Task::new("item-3", "Item 3"),
        ],
        filter,
    )
}

fn rows(view: &TaskList) -> Vec<(String, String, bool)> {
    view.children()
        .iter()
        .map(|child| {
            (
                child.task_id().unwrap_or_default().to_string(),
                child.description().to_string(),
                child.completed(),
            )
        })
        .collect()
}

fn key_at(app: &TodoApp<impl StateStore + 'static, TaskList>, position: usize) -> ElementKey {
    app.view().borrow().child_key_at(position).unwrap()
}

#[test]
fn subscribes_and_renders_initial_state() {
    let store = FakeStore::new(three_items(Filter::All));
    let app = TodoApp::new(Rc::clone(&store), Rc::new(RefCell::new(TaskList::new())));

    assert_eq!(store.listeners.borrow().len(), 1);
    let view = app.view().borrow();
    assert_eq!(view.attribute("remaining"), Some("2"));
    assert_eq!(view.attribute("filter"), Some("all"));
    assert_eq!(
        rows(&view),
        vec![
            ("item-1".to_string(), "Item 1".to_string(), false),
            ("item-2".to_string(), "Item 2".to_string(), true),
            ("item-3".to_string(), "Item 3".to_string(), false),
        ]
    );
}

#[test]
fn renders_only_children_passing_filter() {
    let store = FakeStore::new(three_items(Filter::Active));
    let app = TodoApp::new(store, Rc::new(RefCell::new(TaskList::new())));

    let view = app.view().borrow();
    let ids = rows(&view).into_iter().map(|row| row.0).collect::<Vec<_>>();
    assert_eq!(ids, vec!["item-1", "item-3"]);
    assert_eq!(view.remaining(), 2);
}

#[test]
fn new_todo_dispatches_add_item_with_fresh_id() {
    let store = FakeStore::new(three_items(Filter::All));
    let app = TodoApp::new(Rc::clone(&store), Rc::new(RefCell::new(TaskList::new())));

    app.view().borrow_mut().type_new_todo("Item description");
    app.view().borrow_mut().submit_new_todo();
    assert_eq!(app.process_view_events(), 1);

    let dispatched = store.dispatched();
    let [Action::AddItem(task)] = dispatched.as_slice() else {
        panic!("unexpected actions: {dispatched:?}");
    };
    assert_eq!(task.description, "Item description");
    assert!(!task.completed);
    assert!(uuid::Uuid::parse_str(&task.id).is_ok());
}

#[test]
fn item_events_dispatch_with_id_from_child_marker() {
    let store = FakeStore::new(three_items(Filter::All));
    let app = TodoApp::new(Rc::clone(&store), Rc::new(RefCell::new(TaskList::new())));

    let (first, second, third) = (key_at(&app, 0), key_at(&app, 1), key_at(&app, 2));
    {
        let mut view = app.view().borrow_mut();
        view.with_child(first, |item| item.toggle_completed());
        view.with_child(second, |item| item.toggle_completed());
        view.with_child(third, |item| item.activate_delete());
        view.with_child(first, |item| {
            item.activate_description();
            item.type_edit("Item 1 updated");
            item.commit_edit();
        });
    }
    assert_eq!(app.process_view_events(), 4);

    assert_eq!(
        store.dispatched(),
        vec![
            Action::CompleteItem("item-1".to_string()),
            Action::UncompleteItem("item-2".to_string()),
            Action::RemoveItem("item-3".to_string()),
            Action::UpdateItemDescription {
                item_id: "item-1".to_string(),
                description: "Item 1 updated".to_string(),
            },
        ]
    );
}

#[test]
fn list_events_dispatch_filter_and_clear_completed() {
    let store = FakeStore::new(three_items(Filter::All));
    let app = TodoApp::new(Rc::clone(&store), Rc::new(RefCell::new(TaskList::new())));

    {
        let mut view = app.view().borrow_mut();
        view.select_filter("active");
        view.select_filter("bogus");
        view.clear_completed();
    }
    app.process_view_events();

    assert_eq!(
        store.dispatched(),
        vec![
            Action::SetFilter(Filter::Active),
            Action::SetFilter(Filter::All),
            Action::RemoveCompleted,
        ]
    );
}

#[test]
fn events_from_unknown_children_are_dropped() {
    let store = FakeStore::new(three_items(Filter::All));
    let app = TodoApp::new(Rc::clone(&store), Rc::new(RefCell::new(TaskList::new())));

    let stale = EmittedEvent::from_item(ElementKey(999), ViewEvent::ItemDeleted);
    assert_eq!(app.handle_event(stale), None);
    let not_item = app.handle_event(EmittedEvent::from_list(ViewEvent::ItemCompleted));
    assert_eq!(not_item, None);
    assert!(store.dispatched().is_empty());
}

#[test]
fn store_change_updates_in_place_appends_and_removes() {
    let store = FakeStore::new(three_items(Filter::All));
    let app = TodoApp::new(Rc::clone(&store), Rc::new(RefCell::new(TaskList::new())));
    let item_three_key = key_at(&app, 2);

    store.replace_state_and_notify(TodoState::from_tasks(
        [
            Task::new("item-1", "Item 1").with_completed(true),
            Task::new("item-3", "Item 3 updated"),
            Task::new("item-4", "Item 4"),
        ],
        Filter::Active,
    ));

    let view = app.view().borrow();
    assert_eq!(
        rows(&view),
        vec![
            ("item-3".to_string(), "Item 3 updated".to_string(), false),
            ("item-4".to_string(), "Item 4".to_string(), false),
        ]
    );
    assert_eq!(view.child_key_at(0), Some(item_three_key));
    assert_eq!(view.attribute("filter"), Some("active"));
    assert_eq!(view.remaining(), 2);
}

#[test]
fn reconciliation_keeps_edit_mode_of_surviving_child() {
    let store = FakeStore::new(three_items(Filter::All));
    let app = TodoApp::new(Rc::clone(&store), Rc::new(RefCell::new(TaskList::new())));
    let first = key_at(&app, 0);
    app.view()
        .borrow_mut()
        .with_child(first, |item| item.activate_description());

    store.replace_state_and_notify(three_items(Filter::Active));

    let view = app.view().borrow();
    let child = view.children().iter().find(|c| c.key() == first).unwrap();
    assert_eq!(child.mode(), ItemMode::Editing);
}

#[test]
fn children_follow_visible_order_after_filter_round_trip() {
    let store = Rc::new(TodoStore::with_state(three_items(Filter::All)));
    let app = TodoApp::new(Rc::clone(&store), Rc::new(RefCell::new(TaskList::new())));
    let first = key_at(&app, 0);
    app.view()
        .borrow_mut()
        .with_child(first, |item| item.activate_description());

    store.dispatch(set_filter(Filter::Active));
    store.dispatch(set_filter(Filter::All));

    let state = store.state();
    let visible = visible_items(&state)
        .into_iter()
        .map(|task| task.id.clone())
        .collect::<Vec<_>>();
    let view = app.view().borrow();
    let shown = rows(&view).into_iter().map(|row| row.0).collect::<Vec<_>>();
    assert_eq!(shown, visible);
    assert_eq!(shown, vec!["item-1", "item-2", "item-3"]);
    assert_eq!(view.child_key_at(0), Some(first));
    assert_eq!(view.children()[0].mode(), ItemMode::Editing);
}

#[test]
fn end_to_end_with_real_store() {
    // Three items, filter all, empty view.
    let store = Rc::new(TodoStore::with_state(three_items(Filter::All)));
    let app = TodoApp::new(Rc::clone(&store), Rc::new(RefCell::new(TaskList::new())));

    let ids = |app: &TodoApp<TodoStore, TaskList>| {
        rows(&app.view().borrow())
            .into_iter()
            .map(|row| row.0)
            .collect::<Vec<_>>()
    };
    assert_eq!(ids(&app), vec!["item-1", "item-2", "item-3"]);

    // Remove one, then filter out the completed one.
    store.dispatch(remove_item("item-3"));
    store.dispatch(set_filter(Filter::Active));
    assert_eq!(ids(&app), vec!["item-1"]);
    assert_eq!(app.view().borrow().remaining(), 1);

    // Toggle through the view.
    let key = key_at(&app, 0);
    app.view()
        .borrow_mut()
        .with_child(key, |item| item.toggle_completed());
    app.process_view_events();
    assert!(store.state().items["item-1"].completed);
    assert!(ids(&app).is_empty());
    assert_eq!(app.view().borrow().remaining_label(), "0 tasks left");
}
