//! Authorized Request Client
//!
//! One request per call against the remote task service, with the session
//! credential attached and the result normalized to JSON or an `AppError`.
//! Per-endpoint adapters live in `task_api` and `auth_api`.

mod auth_api;
mod reqwest_transport;
mod task_api;

use std::fmt;
use std::rc::Rc;

use async_trait::async_trait;
use log::{debug, warn};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::domain::{AppError, AppResult};
use crate::token::TokenStore;

pub use auth_api::AuthApi;
pub use reqwest_transport::ReqwestTransport;
pub use task_api::TaskApi;

/// Message used when a failed response carries nothing readable
pub const GENERIC_FAILURE: &str = "Request failed";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        })
    }
}

/// An outbound request, relative to the service's base URL
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    /// Sent as `Authorization: Bearer <token>`
    pub bearer: Option<String>,
    pub body: Option<Value>,
}

/// Raw status and body as received
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The request never produced a response (DNS, refused connection, aborted body)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Performs exactly one HTTP exchange; no retries, no timeout of its own
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// Best-effort human-readable message from an error body
fn error_message(body: &str, fallback: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|e| e.message.or(e.error))
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

/// Serialize a request payload
pub(crate) fn to_body<T: serde::Serialize>(payload: &T) -> AppResult<Value> {
    serde_json::to_value(payload).map_err(|e| AppError::RequestFailed(e.to_string()))
}

/// Decode a success payload into the shape an adapter expects
pub(crate) fn decode<T: serde::de::DeserializeOwned>(value: Value) -> AppResult<T> {
    serde_json::from_value(value)
        .map_err(|e| AppError::RequestFailed(format!("malformed response: {e}")))
}

/// Shared request client; cheap to clone
#[derive(Clone)]
pub struct ApiClient {
    transport: Rc<dyn Transport>,
    tokens: TokenStore,
}

impl ApiClient {
    pub fn new(transport: Rc<dyn Transport>, tokens: TokenStore) -> Self {
        Self { transport, tokens }
    }

    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    /// Send with the stored credential attached
    ///
    /// Fails with `Unauthenticated` before touching the network when no
    /// credential is stored.
    pub async fn authorized(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> AppResult<Value> {
        let Some(token) = self.tokens.read() else {
            debug!("{method} {path} skipped: no credential");
            return Err(AppError::Unauthenticated);
        };
        let request = ApiRequest {
            method,
            path: path.to_string(),
            bearer: Some(token),
            body,
        };
        self.execute(request, GENERIC_FAILURE).await
    }

    /// Send without a credential (login, register)
    pub async fn anonymous(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        fallback: &str,
    ) -> AppResult<Value> {
        let request = ApiRequest {
            method,
            path: path.to_string(),
            bearer: None,
            body,
        };
        self.execute(request, fallback).await
    }

    async fn execute(&self, request: ApiRequest, fallback: &str) -> AppResult<Value> {
        let method = request.method;
        let path = request.path.clone();
        debug!("{method} {path}");

        let response = self.transport.send(request).await.map_err(|e| {
            warn!("{method} {path} failed: {e}");
            AppError::RequestFailed(e.0)
        })?;

        if !response.is_success() {
            let message = error_message(&response.body, fallback);
            warn!("{method} {path} returned {}: {message}", response.status);
            return Err(AppError::RequestFailed(message));
        }

        if response.body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&response.body).map_err(|e| {
            warn!("{method} {path} sent a malformed body: {e}");
            AppError::RequestFailed(format!("malformed response: {e}"))
        })
    }
}
