//! Task View State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. The task list
//! orchestrator stays the source of truth; the store mirrors it for rendering.

use daily_todo_core::{Task, TaskId, TaskList};
use leptos::prelude::*;
use reactive_stores::Store;

/// What the task page renders
#[derive(Clone, Debug, Default, Store)]
pub struct TaskViewState {
    /// Local task list in display order
    pub tasks: Vec<Task>,
    /// Task currently shaking after a toggle
    pub pulsing: Option<TaskId>,
    /// First load finished (successfully or not)
    pub loaded: bool,
}

/// Type alias for the store
pub type TaskStore = Store<TaskViewState>;

/// The page's orchestrator, shared with its dialogs
pub type SharedTaskList = StoredValue<TaskList, LocalStorage>;

/// Get the task store from context
pub fn use_task_store() -> TaskStore {
    expect_context::<TaskStore>()
}

/// Get the page's task list from context
pub fn use_task_list() -> SharedTaskList {
    expect_context::<SharedTaskList>()
}

// ========================
// Store Helper Functions
// ========================

/// Copy the orchestrator's current state into the store
pub fn store_sync(store: &TaskStore, list: &TaskList) {
    store.tasks().set(list.tasks());
    let pulsing = list.pulsing();
    if store.pulsing().get_untracked() != pulsing {
        store.pulsing().set(pulsing);
    }
}

/// Mark the first load as done
pub fn store_mark_loaded(store: &TaskStore) {
    store.loaded().set(true);
}
