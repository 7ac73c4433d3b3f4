//! Registration Page Component

use daily_todo_core::guard::LOGIN_PATH;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::AppContext;

/// New account form with password confirmation
#[component]
pub fn RegisterPage() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (confirmation, set_confirmation) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (submitting, set_submitting) = signal(false);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let username = username.get_untracked();
        let password = password.get_untracked();
        let confirmation = confirmation.get_untracked();
        set_error.set(None);
        set_submitting.set(true);

        spawn_local(async move {
            if let Err(e) = ctx.register(&username, &password, &confirmation).await {
                set_error.try_set(Some(e.to_string()));
                set_submitting.try_set(false);
            }
        });
    };

    view! {
        <div class="centered">
            <form class="card auth-form" on:submit=submit>
                <h1>"Create account"</h1>

                <label for="username">"Username"</label>
                <input
                    id="username"
                    type="text"
                    autocomplete="username"
                    prop:value=move || username.get()
                    on:input=move |ev| set_username.set(event_target_value(&ev))
                />

                <label for="password">"Password"</label>
                <input
                    id="password"
                    type="password"
                    autocomplete="new-password"
                    prop:value=move || password.get()
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                />

                <label for="confirmation">"Confirm password"</label>
                <input
                    id="confirmation"
                    type="password"
                    autocomplete="new-password"
                    prop:value=move || confirmation.get()
                    on:input=move |ev| set_confirmation.set(event_target_value(&ev))
                />

                {move || error.get().map(|message| view! { <div class="error-banner">{message}</div> })}

                <button type="submit" class="btn btn-block" disabled=move || submitting.get()>
                    {move || if submitting.get() { "Creating account..." } else { "Register" }}
                </button>

                <p class="muted">
                    "Already registered? "
                    <a
                        href=LOGIN_PATH
                        on:click=move |ev| {
                            ev.prevent_default();
                            ctx.navigate(LOGIN_PATH);
                        }
                    >
                        "Sign in"
                    </a>
                </p>
            </form>
        </div>
    }
}
