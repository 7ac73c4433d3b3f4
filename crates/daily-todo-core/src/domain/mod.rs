//! Domain Layer
//!
//! Task entity, outbound payloads and the error taxonomy.
//! This layer has NO network or browser dependencies.

mod error;
mod task;

pub use error::{AppError, AppResult, ValidationError};
pub use task::{NewTask, StatusPatch, Task, TaskId, TaskPatch, TITLE_MAX_LEN};
