//! Application Context
//!
//! One session for the whole app, provided via Leptos Context API. Holds the
//! reactive mirror of the Session Controller's state and of the current path,
//! plus the non-reactive service objects everything else is built from.

use std::rc::Rc;

use daily_todo_core::session::validate_registration;
use daily_todo_core::{
    ApiClient, AppError, AppResult, AuthApi, ReqwestTransport, Scheduler, SessionController,
    SessionState, TaskApi, TaskList, TokenStore,
};
use leptos::prelude::*;

use crate::browser::{self, BrowserCookieJar, BrowserScheduler};
use crate::config::ClientConfig;

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Session state as last reported by the controller - read
    pub session_state: ReadSignal<SessionState>,
    /// Session state - write
    set_session_state: WriteSignal<SessionState>,
    /// Current location path - read
    pub path: ReadSignal<String>,
    /// Current location path - write
    set_path: WriteSignal<String>,
    session: StoredValue<Rc<SessionController>, LocalStorage>,
    task_api: StoredValue<TaskApi, LocalStorage>,
    scheduler: StoredValue<Rc<dyn Scheduler>, LocalStorage>,
}

impl AppContext {
    pub fn new(config: &ClientConfig) -> Self {
        let tokens = TokenStore::new(Rc::new(BrowserCookieJar));
        let transport = Rc::new(ReqwestTransport::new(config.api_base_url.clone()));
        let client = ApiClient::new(transport, tokens.clone());
        let session = SessionController::new(tokens, AuthApi::new(client.clone()));

        let (session_state, set_session_state) = signal(session.state());
        let (path, set_path) = signal(browser::current_path());
        let scheduler: Rc<dyn Scheduler> = Rc::new(BrowserScheduler);

        Self {
            session_state,
            set_session_state,
            path,
            set_path,
            session: StoredValue::new_local(Rc::new(session)),
            task_api: StoredValue::new_local(TaskApi::new(client)),
            scheduler: StoredValue::new_local(scheduler),
        }
    }

    fn controller(&self) -> Rc<SessionController> {
        self.session.get_value()
    }

    fn publish(&self, state: SessionState) {
        if self.session_state.get_untracked() != state {
            self.set_session_state.set(state);
        }
    }

    /// Resolve the session from the stored credential
    pub fn initialize(&self) {
        let state = self.controller().initialize();
        self.publish(state);
    }

    /// Navigate to `path`, adding a history entry
    pub fn navigate(&self, path: &str) {
        browser::push_path(path);
        self.set_path.set(path.to_string());
    }

    /// Navigate without a history entry (guard redirects)
    pub fn redirect(&self, path: &str) {
        browser::replace_path(path);
        self.set_path.set(path.to_string());
    }

    /// Pick up a back/forward navigation
    pub fn sync_path(&self) {
        self.set_path.set(browser::current_path());
    }

    pub async fn login(&self, username: &str, password: &str) -> AppResult<()> {
        let controller = self.controller();
        let target = controller.login(username, password).await?;
        self.publish(controller.state());
        self.navigate(target);
        Ok(())
    }

    pub async fn register(
        &self,
        username: &str,
        password: &str,
        confirmation: &str,
    ) -> AppResult<()> {
        validate_registration(username, password, confirmation)?;
        let controller = self.controller();
        let target = controller.register(username, password).await?;
        self.publish(controller.state());
        self.navigate(target);
        Ok(())
    }

    pub fn logout(&self) {
        let controller = self.controller();
        let target = controller.logout();
        self.publish(controller.state());
        self.navigate(target);
    }

    /// A fresh orchestrator for a task view
    pub fn task_list(&self) -> TaskList {
        TaskList::new(self.task_api.get_value(), self.scheduler.get_value())
    }

    /// User-facing text for a failed operation
    ///
    /// A missing credential means it expired under us: the session is
    /// revalidated so the guard sends the user to the login page.
    pub fn error_message(&self, err: &AppError, fallback: &str) -> String {
        match err {
            AppError::Unauthenticated => {
                let state = self.controller().revalidate();
                self.publish(state);
                fallback.to_string()
            }
            AppError::Validation(_) | AppError::TaskBusy(_) => err.to_string(),
            AppError::RequestFailed(_) | AppError::UnknownTask(_) => fallback.to_string(),
        }
    }
}
