//! Task Endpoints
//!
//! One adapter per endpoint. The service wraps results inconsistently:
//! - `GET /task/get` and `GET /task/get/{id}` -> `{ tasks: [...] }`
//! - `POST /task/new` -> `{ task }`
//! - `PATCH /task/update/...` -> `{ updatedTask }`
//!
//! Each adapter unwraps its envelope so callers only ever see `Task`.

use serde::Deserialize;

use super::{decode, to_body, ApiClient, Method};
use crate::domain::{AppError, AppResult, NewTask, StatusPatch, Task, TaskId, TaskPatch};

#[derive(Deserialize)]
struct TasksEnvelope {
    #[serde(default)]
    tasks: Vec<Task>,
}

#[derive(Deserialize)]
struct CreatedEnvelope {
    task: Task,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdatedEnvelope {
    updated_task: Task,
}

/// Typed access to the `/task/*` endpoints
#[derive(Clone)]
pub struct TaskApi {
    client: ApiClient,
}

impl TaskApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// `GET /task/get`
    pub async fn list(&self) -> AppResult<Vec<Task>> {
        let value = self.client.authorized(Method::Get, "/task/get", None).await?;
        if value.is_null() {
            return Ok(Vec::new());
        }
        Ok(decode::<TasksEnvelope>(value)?.tasks)
    }

    /// `GET /task/get/{id}`; the single task comes back as a one-element list
    pub async fn get(&self, id: TaskId) -> AppResult<Task> {
        let path = format!("/task/get/{id}");
        let value = self.client.authorized(Method::Get, &path, None).await?;
        decode::<TasksEnvelope>(value)?
            .tasks
            .into_iter()
            .next()
            .ok_or_else(|| AppError::RequestFailed(format!("task {id} not found")))
    }

    /// `POST /task/new`
    pub async fn create(&self, new_task: &NewTask) -> AppResult<Task> {
        let body = to_body(new_task)?;
        let value = self
            .client
            .authorized(Method::Post, "/task/new", Some(body))
            .await?;
        Ok(decode::<CreatedEnvelope>(value)?.task)
    }

    /// `PATCH /task/update/{id}`
    pub async fn update(&self, id: TaskId, patch: &TaskPatch) -> AppResult<Task> {
        let path = format!("/task/update/{id}");
        let body = to_body(patch)?;
        let value = self.client.authorized(Method::Patch, &path, Some(body)).await?;
        Ok(decode::<UpdatedEnvelope>(value)?.updated_task)
    }

    /// `PATCH /task/update/status/{id}`
    pub async fn update_status(&self, id: TaskId, is_finished: bool) -> AppResult<Task> {
        let path = format!("/task/update/status/{id}");
        let body = to_body(&StatusPatch { is_finished })?;
        let value = self.client.authorized(Method::Patch, &path, Some(body)).await?;
        Ok(decode::<UpdatedEnvelope>(value)?.updated_task)
    }

    /// `DELETE /task/delete/{id}`; any success body is ignored
    pub async fn delete(&self, id: TaskId) -> AppResult<()> {
        let path = format!("/task/delete/{id}");
        self.client.authorized(Method::Delete, &path, None).await?;
        Ok(())
    }
}

