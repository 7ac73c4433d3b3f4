//! Task Detail Dialog Component
//!
//! Shows the service's current copy of one task, with view and edit modes.
//! Toggle, save and delete go through the page's orchestrator so the list
//! behind the dialog stays in step.

use daily_todo_core::{Task, TaskId};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::DeleteConfirmButton;
use crate::context::AppContext;
use crate::models::format_created_at;
use crate::store::use_task_list;

#[component]
pub fn TaskDetailDialog(
    task_id: ReadSignal<Option<TaskId>>,
    set_task_id: WriteSignal<Option<TaskId>>,
) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let tasks = use_task_list();

    let (task, set_task) = signal::<Option<Task>>(None);
    let (loading, set_loading) = signal(false);
    let (busy, set_busy) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let (editing, set_editing) = signal(false);
    let (edit_title, set_edit_title) = signal(String::new());
    let (edit_description, set_edit_description) = signal(String::new());

    let reset_edit = move |task: &Task| {
        set_edit_title.try_set(task.title.clone());
        set_edit_description.try_set(task.description.clone().unwrap_or_default());
    };

    // Fetch whenever a task is selected
    Effect::new(move |_| {
        set_editing.set(false);
        set_error.set(None);
        let Some(id) = task_id.get() else {
            set_task.set(None);
            return;
        };
        set_loading.set(true);
        spawn_local(async move {
            let result = tasks.get_value().fetch_one(id).await;
            // A different task was opened meanwhile
            if task_id.get_untracked() != Some(id) {
                return;
            }
            match result {
                Ok(fetched) => {
                    reset_edit(&fetched);
                    set_task.try_set(Some(fetched));
                }
                Err(e) => {
                    set_task.try_set(None);
                    set_error.try_set(Some(ctx.error_message(&e, "Failed to load task")));
                }
            }
            set_loading.try_set(false);
        });
    });

    let close = move || set_task_id.set(None);

    // Flip the copy on screen, which may be fresher than the list's
    let toggle = move |_: ()| {
        let (Some(id), Some(current)) = (task_id.get_untracked(), task.get_untracked()) else {
            return;
        };
        set_error.set(None);
        set_busy.set(true);
        spawn_local(async move {
            match tasks
                .get_value()
                .set_completion(id, !current.is_finished)
                .await
            {
                Ok(updated) => {
                    set_task.try_set(Some(updated));
                }
                Err(e) => {
                    set_error.try_set(Some(ctx.error_message(&e, "Failed to update task")));
                }
            }
            set_busy.try_set(false);
        });
    };

    let save = move |_| {
        let Some(id) = task_id.get_untracked() else {
            return;
        };
        let title = edit_title.get_untracked();
        let description = edit_description.get_untracked();
        set_error.set(None);
        set_busy.set(true);
        spawn_local(async move {
            match tasks
                .get_value()
                .update_fields(id, Some(&title), Some(&description))
                .await
            {
                Ok(updated) => {
                    set_task.try_set(Some(updated));
                    set_editing.try_set(false);
                }
                Err(e) => {
                    set_error.try_set(Some(ctx.error_message(&e, "Failed to update task")));
                }
            }
            set_busy.try_set(false);
        });
    };

    let cancel_edit = move |_| {
        if let Some(current) = task.get_untracked() {
            reset_edit(&current);
        }
        set_error.set(None);
        set_editing.set(false);
    };

    let delete = Callback::new(move |_: ()| {
        let Some(id) = task_id.get_untracked() else {
            return;
        };
        set_error.set(None);
        set_busy.set(true);
        spawn_local(async move {
            match tasks.get_value().delete(id).await {
                Ok(()) => close(),
                Err(e) => {
                    set_error.try_set(Some(ctx.error_message(&e, "Failed to delete task")));
                }
            }
            set_busy.try_set(false);
        });
    });

    view! {
        <Show when=move || task_id.get().is_some()>
            <div class="dialog-backdrop" on:click=move |_| close()>
                <div class="dialog card" on:click=|ev| ev.stop_propagation()>
                    {move || match (loading.get(), task.get()) {
                        (true, _) => view! {
                            <h2>"Task detail"</h2>
                            <p class="muted centered-text">"Loading task..."</p>
                        }.into_any(),
                        (false, None) => view! {
                            <h2>"Task detail"</h2>
                            <p class="muted centered-text">"Task not found"</p>
                        }.into_any(),
                        (false, Some(current)) if editing.get() => view! {
                            <h2>"Edit task"</h2>
                            <label for="edit-title">"Title"</label>
                            <input
                                id="edit-title"
                                type="text"
                                prop:value=move || edit_title.get()
                                on:input=move |ev| set_edit_title.set(event_target_value(&ev))
                            />
                            <label for="edit-description">"Description"</label>
                            <textarea
                                id="edit-description"
                                rows="5"
                                placeholder="Optional details"
                                prop:value=move || edit_description.get()
                                on:input=move |ev| set_edit_description.set(event_target_value(&ev))
                            ></textarea>
                            <p class="muted">{format!("#{}", current.id)}</p>
                        }.into_any(),
                        (false, Some(current)) => view! {
                            <h2>{current.title.clone()}</h2>
                            <label class="status-line">
                                <input
                                    type="checkbox"
                                    prop:checked=current.is_finished
                                    disabled=move || busy.get()
                                    on:click=move |ev| {
                                        ev.prevent_default();
                                        toggle(());
                                    }
                                />
                                {if current.is_finished { "Finished" } else { "Not finished" }}
                            </label>
                            <h3>"Description"</h3>
                            {match current.description.clone() {
                                Some(text) => view! { <p class="description">{text}</p> }.into_any(),
                                None => view! { <p class="muted"><em>"No description"</em></p> }.into_any(),
                            }}
                            {current.created_at.clone().map(|created| view! {
                                <h3>"Created"</h3>
                                <p class="muted">{format_created_at(&created)}</p>
                            })}
                        }.into_any(),
                    }}

                    {move || error.get().map(|message| view! { <div class="error-banner">{message}</div> })}

                    <div class="dialog-actions">
                        <Show
                            when=move || editing.get()
                            fallback=move || view! {
                                <button
                                    class="btn btn-outline"
                                    disabled=move || busy.get() || task.get().is_none()
                                    on:click=move |_| set_editing.set(true)
                                >
                                    "Edit"
                                </button>
                                <DeleteConfirmButton
                                    on_confirm=delete
                                    disabled=Signal::derive(move || busy.get() || task.get().is_none())
                                />
                                <button class="btn btn-outline" on:click=move |_| close()>
                                    "Close"
                                </button>
                            }
                        >
                            <button class="btn" disabled=move || busy.get() on:click=save>
                                "Save"
                            </button>
                            <button class="btn btn-outline" on:click=cancel_edit>
                                "Cancel"
                            </button>
                        </Show>
                    </div>
                </div>
            </div>
        </Show>
    }
}
