//! Daily Todo Frontend Entry Point

mod app;
mod browser;
mod components;
mod config;
mod context;
mod logging;
mod models;
mod store;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    logging::init();
    mount_to_body(App);
}
