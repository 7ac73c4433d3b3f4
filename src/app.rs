//! Daily Todo Frontend App
//!
//! Client-side routing behind the route guard: nothing but the pending view
//! renders until the guard allows the current path.

use daily_todo_core::guard::{self, HOME_PATH, LOGIN_PATH, REGISTER_PATH};
use daily_todo_core::GuardDecision;
use leptos::ev;
use leptos::prelude::*;

use crate::components::{LoadingView, LoginPage, NotFound, RegisterPage, TaskPage};
use crate::config::ClientConfig;
use crate::context::AppContext;

#[component]
pub fn App() -> impl IntoView {
    let ctx = AppContext::new(&ClientConfig::from_build_env());
    provide_context(ctx);

    // Resolve the session once mounted; until then the guard is pending
    Effect::new(move |_| ctx.initialize());

    // Back/forward buttons
    let _ = window_event_listener(ev::popstate, move |_| ctx.sync_path());

    let decision = Memo::new(move |_| guard::decide(ctx.session_state.get(), &ctx.path.get()));

    Effect::new(move |_| {
        if let GuardDecision::Redirect(target) = decision.get() {
            log::debug!("guard: {} -> {target}", ctx.path.get_untracked());
            ctx.redirect(target);
        }
    });

    view! {
        <main class="app-layout">
            {move || match decision.get() {
                GuardDecision::Allow => {
                    match guard::normalize_path(&ctx.path.get()) {
                        HOME_PATH => view! { <TaskPage /> }.into_any(),
                        LOGIN_PATH => view! { <LoginPage /> }.into_any(),
                        REGISTER_PATH => view! { <RegisterPage /> }.into_any(),
                        _ => view! { <NotFound /> }.into_any(),
                    }
                }
                GuardDecision::Pending | GuardDecision::Redirect(_) => {
                    view! { <LoadingView /> }.into_any()
                }
            }}
        </main>
    }
}
