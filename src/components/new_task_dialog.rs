//! New Task Dialog Component

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::AppContext;
use crate::store::use_task_list;

/// Modal form creating a task; the list only grows once the service confirms
#[component]
pub fn NewTaskDialog(open: ReadSignal<bool>, set_open: WriteSignal<bool>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let tasks = use_task_list();

    let (title, set_title) = signal(String::new());
    let (description, set_description) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (submitting, set_submitting) = signal(false);

    let close = move || {
        set_title.set(String::new());
        set_description.set(String::new());
        set_error.set(None);
        set_open.set(false);
    };

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let title = title.get_untracked();
        let description = description.get_untracked();
        set_error.set(None);
        set_submitting.set(true);

        spawn_local(async move {
            let list = tasks.get_value();
            match list.create(&title, Some(&description)).await {
                Ok(task) => {
                    log::info!("created task {}", task.id);
                    close();
                }
                Err(e) => {
                    set_error.try_set(Some(ctx.error_message(&e, "Failed to create task")));
                }
            }
            set_submitting.try_set(false);
        });
    };

    view! {
        <Show when=move || open.get()>
            <div class="dialog-backdrop" on:click=move |_| close()>
                <form
                    class="dialog card"
                    on:submit=submit
                    on:click=|ev| ev.stop_propagation()
                >
                    <h2>"New task"</h2>

                    <label for="new-title">"Title"</label>
                    <input
                        id="new-title"
                        type="text"
                        placeholder="What needs doing?"
                        prop:value=move || title.get()
                        on:input=move |ev| set_title.set(event_target_value(&ev))
                    />

                    <label for="new-description">"Description"</label>
                    <textarea
                        id="new-description"
                        rows="4"
                        placeholder="Optional details"
                        prop:value=move || description.get()
                        on:input=move |ev| set_description.set(event_target_value(&ev))
                    ></textarea>

                    {move || error.get().map(|message| view! { <div class="error-banner">{message}</div> })}

                    <div class="dialog-actions">
                        <button type="submit" class="btn" disabled=move || submitting.get()>
                            {move || if submitting.get() { "Adding..." } else { "Add task" }}
                        </button>
                        <button type="button" class="btn btn-outline" on:click=move |_| close()>
                            "Cancel"
                        </button>
                    </div>
                </form>
            </div>
        </Show>
    }
}
