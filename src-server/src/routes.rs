use std::path::Path;

use axum::{
    extract::Request,
    http::header::COOKIE,
    middleware::{from_fn, Next},
    response::{IntoResponse, Redirect, Response},
    Router,
};
use daily_todo_core::guard::edge_decision;
use daily_todo_core::token::cookie_value;
use daily_todo_core::{GuardDecision, AUTH_TOKEN_KEY};
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing::debug;

/// Static bundle with `index.html` as the answer for every page path
pub fn router(dist_dir: &Path) -> Router {
    let spa = ServeDir::new(dist_dir).fallback(ServeFile::new(dist_dir.join("index.html")));

    Router::new()
        .fallback_service(spa)
        .layer(from_fn(route_guard))
        .layer(TraceLayer::new_for_http())
}

fn has_credential(request: &Request) -> bool {
    request
        .headers()
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .any(|cookies| cookie_value(cookies, AUTH_TOKEN_KEY).is_some())
}

async fn route_guard(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();
    match edge_decision(has_credential(&request), &path) {
        GuardDecision::Redirect(target) => {
            debug!("guard: {path} -> {target}");
            Redirect::to(target).into_response()
        }
        GuardDecision::Allow | GuardDecision::Pending => next.run(request).await,
    }
}
