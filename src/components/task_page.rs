//! Task Page Component
//!
//! The protected home page: today's tasks with create, toggle, edit and
//! delete. Owns one task list orchestrator for its lifetime and detaches it
//! on unmount so late responses and pulse timers do not touch a dead view.

use daily_todo_core::TaskId;
use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::components::{NewTaskDialog, TaskDetailDialog, TaskRow};
use crate::context::AppContext;
use crate::models::today_label;
use crate::store::{
    store_mark_loaded, store_sync, SharedTaskList, TaskViewState, TaskViewStateStoreFields,
};

#[component]
pub fn TaskPage() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let store = Store::new(TaskViewState::default());
    let tasks: SharedTaskList = StoredValue::new_local(ctx.task_list());
    provide_context(store);
    provide_context(tasks);

    tasks.with_value(|list| {
        list.set_on_change(move || {
            tasks.try_with_value(|list| store_sync(&store, list));
        })
    });
    on_cleanup(move || {
        tasks.try_with_value(|list| list.detach());
    });

    let (error, set_error) = signal::<Option<String>>(None);
    let (new_open, set_new_open) = signal(false);
    let (selected, set_selected) = signal::<Option<TaskId>>(None);

    // Initial load
    Effect::new(move |_| {
        spawn_local(async move {
            let list = tasks.get_value();
            if let Err(e) = list.load_all().await {
                log::warn!("loading tasks failed: {e}");
                set_error.try_set(Some(ctx.error_message(&e, "Failed to load tasks")));
            }
            store_mark_loaded(&store);
        });
    });

    let on_toggle = Callback::new(move |task_id: TaskId| {
        set_error.set(None);
        spawn_local(async move {
            let list = tasks.get_value();
            if let Err(e) = list.toggle_completion(task_id).await {
                set_error.try_set(Some(ctx.error_message(&e, "Failed to update task")));
            }
        });
    });

    let on_open = Callback::new(move |task_id: TaskId| set_selected.set(Some(task_id)));

    view! {
        <section class="card task-page">
            <header class="task-header">
                <h1>"Daily Todo"</h1>
                <button class="btn btn-outline btn-small" on:click=move |_| ctx.logout()>
                    "Log out"
                </button>
            </header>
            <p class="muted">{today_label()}</p>

            {move || error.get().map(|message| view! { <div class="error-banner">{message}</div> })}

            <button class="btn btn-block" on:click=move |_| set_new_open.set(true)>
                "+ Add new task"
            </button>

            <ul class="task-list">
                <For
                    each=move || store.tasks().get()
                    key=|task| (task.id, task.is_finished, task.title.clone())
                    let:task
                >
                    <TaskRow task=task on_toggle=on_toggle on_open=on_open />
                </For>
            </ul>

            <Show when=move || store.loaded().get() && store.tasks().get().is_empty()>
                <p class="muted centered-text">"No tasks yet. Add one above!"</p>
            </Show>
        </section>

        <NewTaskDialog open=new_open set_open=set_new_open />
        <TaskDetailDialog task_id=selected set_task_id=set_selected />
    }
}
