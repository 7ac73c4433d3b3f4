//! Placeholder views shown instead of a page

use daily_todo_core::guard::HOME_PATH;
use leptos::prelude::*;

use crate::context::AppContext;

/// Shown while the session or a guard decision is unresolved
#[component]
pub fn LoadingView() -> impl IntoView {
    view! {
        <div class="centered">
            <p class="muted">"Loading..."</p>
        </div>
    }
}

#[component]
pub fn NotFound() -> impl IntoView {
    let ctx = expect_context::<AppContext>();

    view! {
        <div class="centered card">
            <h1>"Page not found"</h1>
            <button class="btn" on:click=move |_| ctx.navigate(HOME_PATH)>
                "Back to tasks"
            </button>
        </div>
    }
}
