//! Session Controller
//!
//! Single source of truth for "is a user authenticated". State only moves
//! through the transitions below and always agrees with the Token Store:
//!
//! ```text
//! Unknown ──initialize──▶ Authenticated | Unauthenticated
//! Unauthenticated ──login/register ok──▶ Authenticated
//! Authenticated ──logout / revalidate without token──▶ Unauthenticated
//! ```

use std::cell::Cell;

use log::{info, warn};

use crate::api::AuthApi;
use crate::domain::{AppResult, ValidationError};
use crate::guard::{HOME_PATH, LOGIN_PATH};
use crate::token::{TokenStore, TOKEN_TTL_SECS};

/// Shortest password the registration form accepts
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Token Store not consulted yet
    Unknown,
    Authenticated,
    Unauthenticated,
}

/// Both login fields must be filled in
pub fn validate_login(username: &str, password: &str) -> Result<(), ValidationError> {
    if username.trim().is_empty() || password.trim().is_empty() {
        return Err(ValidationError::MissingCredentials);
    }
    Ok(())
}

/// Registration: all fields filled, confirmation matches, minimum length
pub fn validate_registration(
    username: &str,
    password: &str,
    confirmation: &str,
) -> Result<(), ValidationError> {
    if username.trim().is_empty() || password.trim().is_empty() || confirmation.trim().is_empty()
    {
        return Err(ValidationError::MissingCredentials);
    }
    if password != confirmation {
        return Err(ValidationError::PasswordMismatch);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort {
            min: MIN_PASSWORD_LEN,
        });
    }
    Ok(())
}

pub struct SessionController {
    tokens: TokenStore,
    auth: AuthApi,
    state: Cell<SessionState>,
}

impl SessionController {
    pub fn new(tokens: TokenStore, auth: AuthApi) -> Self {
        Self {
            tokens,
            auth,
            state: Cell::new(SessionState::Unknown),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state.get()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state() == SessionState::Authenticated
    }

    /// Resolve `Unknown` from the Token Store; later calls are no-ops
    pub fn initialize(&self) -> SessionState {
        if self.state() == SessionState::Unknown {
            let next = if self.tokens.is_present() {
                SessionState::Authenticated
            } else {
                SessionState::Unauthenticated
            };
            self.transition(next);
        }
        self.state()
    }

    /// Log in; returns the path to navigate to
    ///
    /// On failure neither the Token Store nor the state is touched.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<&'static str> {
        validate_login(username, password)?;
        let token = self
            .auth
            .login(username, password)
            .await
            .inspect_err(|e| warn!("login failed: {e}"))?;
        self.authenticate(&token);
        Ok(HOME_PATH)
    }

    /// Register a new account; returns the path to navigate to
    pub async fn register(&self, username: &str, password: &str) -> AppResult<&'static str> {
        validate_registration(username, password, password)?;
        let token = self
            .auth
            .register(username, password)
            .await
            .inspect_err(|e| warn!("registration failed: {e}"))?;
        self.authenticate(&token);
        Ok(HOME_PATH)
    }

    /// Forget the credential; returns the path to navigate to
    pub fn logout(&self) -> &'static str {
        self.tokens.clear();
        self.transition(SessionState::Unauthenticated);
        LOGIN_PATH
    }

    /// Catch up with a credential that expired while the app was open
    pub fn revalidate(&self) -> SessionState {
        if self.state() == SessionState::Authenticated && !self.tokens.is_present() {
            self.transition(SessionState::Unauthenticated);
        }
        self.state()
    }

    fn authenticate(&self, token: &str) {
        self.tokens.write(token, TOKEN_TTL_SECS);
        self.transition(SessionState::Authenticated);
    }

    fn transition(&self, next: SessionState) {
        let previous = self.state.replace(next);
        if previous != next {
            info!("session {previous:?} -> {next:?}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_login() {
        assert!(validate_login("karel", "secret").is_ok());
        assert_eq!(
            validate_login("  ", "secret"),
            Err(ValidationError::MissingCredentials)
        );
        assert_eq!(
            validate_login("karel", ""),
            Err(ValidationError::MissingCredentials)
        );
    }

    #[test]
    fn test_validate_registration_order() {
        assert_eq!(
            validate_registration("karel", "secret1", ""),
            Err(ValidationError::MissingCredentials)
        );
        assert_eq!(
            validate_registration("karel", "abc", "abd"),
            Err(ValidationError::PasswordMismatch)
        );
        assert_eq!(
            validate_registration("karel", "abc", "abc"),
            Err(ValidationError::PasswordTooShort { min: MIN_PASSWORD_LEN })
        );
        assert!(validate_registration("karel", "secret1", "secret1").is_ok());
    }
}
