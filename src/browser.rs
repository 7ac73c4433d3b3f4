//! Browser Bindings
//!
//! `document.cookie`, `setTimeout` and the History API behind the core
//! crate's traits.

use std::time::Duration;

use daily_todo_core::token::{cookie_assignment, cookie_value};
use daily_todo_core::{CookieJar, Scheduler, TimerHandle};
use leptos::leptos_dom::helpers::{set_timeout_with_handle, TimeoutHandle};
use leptos::prelude::*;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlDocument;

// ========================
// Cookies
// ========================

/// `document.cookie` as a cookie jar; the browser enforces expiry
pub struct BrowserCookieJar;

impl BrowserCookieJar {
    fn html_document() -> Option<HtmlDocument> {
        document().dyn_into::<HtmlDocument>().ok()
    }
}

impl CookieJar for BrowserCookieJar {
    fn get(&self, name: &str) -> Option<String> {
        let cookies = Self::html_document()?.cookie().ok()?;
        cookie_value(&cookies, name)
    }

    fn set(&self, name: &str, value: &str, max_age_secs: i64) {
        let Some(doc) = Self::html_document() else {
            return;
        };
        if let Err(e) = doc.set_cookie(&cookie_assignment(name, value, max_age_secs)) {
            log::error!("failed to write cookie {name}: {e:?}");
        }
    }

    fn remove(&self, name: &str) {
        self.set(name, "", 0);
    }
}

// ========================
// Timers
// ========================

/// `setTimeout` through Leptos
pub struct BrowserScheduler;

struct BrowserTimer(TimeoutHandle);

impl TimerHandle for BrowserTimer {
    fn cancel(self: Box<Self>) {
        self.0.clear();
    }
}

/// Stands in when the browser refused to schedule
struct NoTimer;

impl TimerHandle for NoTimer {
    fn cancel(self: Box<Self>) {}
}

impl Scheduler for BrowserScheduler {
    fn schedule(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> Box<dyn TimerHandle> {
        match set_timeout_with_handle(callback, delay) {
            Ok(handle) => Box::new(BrowserTimer(handle)),
            Err(e) => {
                log::error!("setTimeout failed: {e:?}");
                Box::new(NoTimer)
            }
        }
    }
}

// ========================
// History
// ========================

/// Path of the current location, `/` when unavailable
pub fn current_path() -> String {
    window()
        .location()
        .pathname()
        .unwrap_or_else(|_| "/".to_string())
}

/// Add a history entry for `path`
pub fn push_path(path: &str) {
    let result = window()
        .history()
        .and_then(|history| history.push_state_with_url(&JsValue::NULL, "", Some(path)));
    if let Err(e) = result {
        log::warn!("pushState to {path} failed: {e:?}");
    }
}

/// Replace the current history entry with `path`
pub fn replace_path(path: &str) {
    let result = window()
        .history()
        .and_then(|history| history.replace_state_with_url(&JsValue::NULL, "", Some(path)));
    if let Err(e) = result {
        log::warn!("replaceState to {path} failed: {e:?}");
    }
}
