//! Login Page Component

use daily_todo_core::guard::REGISTER_PATH;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::AppContext;

/// Username/password form; success navigates home
#[component]
pub fn LoginPage() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (submitting, set_submitting) = signal(false);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let username = username.get_untracked();
        let password = password.get_untracked();
        set_error.set(None);
        set_submitting.set(true);

        spawn_local(async move {
            if let Err(e) = ctx.login(&username, &password).await {
                set_error.try_set(Some(e.to_string()));
                set_submitting.try_set(false);
            }
        });
    };

    view! {
        <div class="centered">
            <form class="card auth-form" on:submit=submit>
                <h1>"Sign in"</h1>

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
                    autocomplete="current-password"
                    prop:value=move || password.get()
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                />

                {move || error.get().map(|message| view! { <div class="error-banner">{message}</div> })}

                <button type="submit" class="btn btn-block" disabled=move || submitting.get()>
                    {move || if submitting.get() { "Signing in..." } else { "Sign in" }}
                </button>

                <p class="muted">
                    "No account yet? "
                    <a
                        href=REGISTER_PATH
                        on:click=move |ev| {
                            ev.prevent_default();
                            ctx.navigate(REGISTER_PATH);
                        }
                    >
                        "Register"
                    </a>
                </p>
            </form>
        </div>
    }
}
