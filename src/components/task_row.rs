//! Task Row Component

use daily_todo_core::{Task, TaskId};
use leptos::prelude::*;

use crate::store::{use_task_store, TaskViewStateStoreFields};

/// One task in the list; shakes briefly after its completion flips
#[component]
pub fn TaskRow(
    task: Task,
    #[prop(into)] on_toggle: Callback<TaskId>,
    #[prop(into)] on_open: Callback<TaskId>,
) -> impl IntoView {
    let store = use_task_store();

    let id = task.id;
    let finished = task.is_finished;
    let title = task.title;

    view! {
        <li class=move || {
            if store.pulsing().get() == Some(id) { "task-row shake" } else { "task-row" }
        }>
            // The row is rebuilt from the confirmed task, so the browser
            // must not flip the box on its own
            <input
                type="checkbox"
                prop:checked=finished
                on:click=move |ev| {
                    ev.prevent_default();
                    on_toggle.run(id);
                }
            />
            <span
                class=if finished { "task-title finished" } else { "task-title" }
                on:click=move |_| on_open.run(id)
            >
                {title}
            </span>
        </li>
    }
}
