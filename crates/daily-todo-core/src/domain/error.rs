//! Domain Layer - Errors
//!
//! Every component operation surfaces one of these to its caller.

use thiserror::Error;

use super::task::TaskId;

/// Common result type for client operations
pub type AppResult<T> = Result<T, AppError>;

/// Client-level errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    /// No credential present; no request was sent
    #[error("not authenticated")]
    Unauthenticated,
    /// Non-success status, transport failure or malformed body
    #[error("{0}")]
    RequestFailed(String),
    /// Local precondition violated; no request was sent
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Another request for the same task has not completed yet
    #[error("task {0} is still being saved")]
    TaskBusy(TaskId),
    /// The task is not part of the local list
    #[error("task {0} is not loaded")]
    UnknownTask(TaskId),
}

/// Local input checks performed before any network call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Title is required")]
    EmptyTitle,
    #[error("Title must be at most {max} characters")]
    TitleTooLong { max: usize },
    #[error("Please fill in all fields")]
    MissingCredentials,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },
}
