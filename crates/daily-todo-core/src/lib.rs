//! Daily Todo Core
//!
//! Client-side orchestration shared by the browser frontend and the edge server:
//! - domain: Task model, input normalization and the error taxonomy
//! - token: session credential persistence behind a cookie jar
//! - api: authorized request client and per-endpoint adapters
//! - session: authentication state machine
//! - guard: public/protected path classification and redirect decisions
//! - tasks: the task list orchestrator

pub mod api;
pub mod domain;
pub mod guard;
pub mod session;
pub mod tasks;
pub mod token;

#[cfg(test)]
mod test_support;

pub use api::{ApiClient, AuthApi, Method, ReqwestTransport, TaskApi, Transport};
pub use domain::{AppError, AppResult, NewTask, Task, TaskId, TaskPatch, ValidationError};
pub use guard::{GuardDecision, PathClass};
pub use session::{SessionController, SessionState};
pub use tasks::{Scheduler, TaskList, TimerHandle, PULSE_DURATION};
pub use token::{CookieJar, MemoryCookieJar, TokenStore, AUTH_TOKEN_KEY, TOKEN_TTL_SECS};
