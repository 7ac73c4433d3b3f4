//! Auth Endpoints
//!
//! `POST /login` and `POST /register` both answer `{ token }` on success and
//! `{ message }` on failure. Neither carries a credential.

use serde::{Deserialize, Serialize};

use super::{decode, to_body, ApiClient, Method};
use crate::domain::{AppError, AppResult};

pub const LOGIN_FAILED: &str = "Login failed";
pub const REGISTRATION_FAILED: &str = "Registration failed";

#[derive(Serialize)]
struct Credentials<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct TokenEnvelope {
    token: Option<String>,
}

#[derive(Clone)]
pub struct AuthApi {
    client: ApiClient,
}

impl AuthApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Exchange credentials for a session token
    pub async fn login(&self, username: &str, password: &str) -> AppResult<String> {
        self.exchange("/login", username, password, LOGIN_FAILED).await
    }

    /// Create an account and receive its first session token
    pub async fn register(&self, username: &str, password: &str) -> AppResult<String> {
        self.exchange("/register", username, password, REGISTRATION_FAILED)
            .await
    }

    async fn exchange(
        &self,
        path: &str,
        username: &str,
        password: &str,
        fallback: &str,
    ) -> AppResult<String> {
        let body = to_body(&Credentials { username, password })?;
        let value = self
            .client
            .anonymous(Method::Post, path, Some(body), fallback)
            .await?;
        match decode::<TokenEnvelope>(value)?.token {
            Some(token) if !token.is_empty() => Ok(token),
            _ => Err(AppError::RequestFailed(fallback.to_string())),
        }
    }
}
