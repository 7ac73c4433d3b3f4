//! Route Guard
//!
//! Pure decision table shared by the client-side navigation guard and the
//! edge server, so both enforcement points agree on classification and
//! redirect targets.
//!
//! | Session           | Path      | Decision          |
//! |-------------------|-----------|-------------------|
//! | Unknown           | any       | Pending           |
//! | Unauthenticated   | Protected | Redirect `/login` |
//! | Unauthenticated   | Public    | Allow             |
//! | Authenticated     | Public    | Redirect `/`      |
//! | Authenticated     | Protected | Allow             |

use crate::session::SessionState;

pub const HOME_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";

/// Reachable without a credential
pub const PUBLIC_PATHS: [&str; 2] = [LOGIN_PATH, REGISTER_PATH];

/// Path prefixes served as-is by the edge
const BYPASS_PREFIXES: [&str; 3] = ["/assets/", "/pkg/", "/api/"];

/// Final-segment extensions of static files emitted by the build
const STATIC_EXTENSIONS: [&str; 12] = [
    "js",
    "wasm",
    "css",
    "map",
    "png",
    "jpg",
    "svg",
    "ico",
    "woff",
    "woff2",
    "txt",
    "webmanifest",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathClass {
    Public,
    Protected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session not resolved yet; show a pending view and decide again later
    Pending,
    Allow,
    Redirect(&'static str),
}

/// Strip the query/fragment and any trailing slash (except on the root)
pub fn normalize_path(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    match path.trim_end_matches('/') {
        "" => HOME_PATH,
        trimmed => trimmed,
    }
}

pub fn classify(path: &str) -> PathClass {
    if PUBLIC_PATHS.contains(&normalize_path(path)) {
        PathClass::Public
    } else {
        PathClass::Protected
    }
}

/// The decision table above
pub fn decide(state: SessionState, path: &str) -> GuardDecision {
    match (state, classify(path)) {
        (SessionState::Unknown, _) => GuardDecision::Pending,
        (SessionState::Unauthenticated, PathClass::Protected) => GuardDecision::Redirect(LOGIN_PATH),
        (SessionState::Unauthenticated, PathClass::Public) => GuardDecision::Allow,
        (SessionState::Authenticated, PathClass::Public) => GuardDecision::Redirect(HOME_PATH),
        (SessionState::Authenticated, PathClass::Protected) => GuardDecision::Allow,
    }
}

/// Static assets and internal paths never go through the guard
pub fn bypasses_guard(path: &str) -> bool {
    let path = normalize_path(path);
    if path == "/favicon.ico" || BYPASS_PREFIXES.iter().any(|p| path.starts_with(p)) {
        return true;
    }
    path.rsplit('/')
        .next()
        .and_then(|segment| segment.rsplit_once('.'))
        .is_some_and(|(_, ext)| STATIC_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

/// Decision at the request-routing edge, where the session is just
/// "is there a credential cookie"
pub fn edge_decision(has_credential: bool, path: &str) -> GuardDecision {
    if bypasses_guard(path) {
        return GuardDecision::Allow;
    }
    let state = if has_credential {
        SessionState::Authenticated
    } else {
        SessionState::Unauthenticated
    };
    decide(state, path)
}
