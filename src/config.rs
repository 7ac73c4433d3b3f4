//! Client Configuration

/// Used when `DAILY_TODO_API_URL` is not set at build time
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8787";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the remote task service, without a trailing `/`
    pub api_base_url: String,
}

impl ClientConfig {
    /// Baked in at compile time; a wasm bundle has no process environment
    pub fn from_build_env() -> Self {
        Self::with_base_url(option_env!("DAILY_TODO_API_URL").unwrap_or(DEFAULT_API_URL))
    }

    pub fn with_base_url(base_url: &str) -> Self {
        let trimmed = base_url.trim().trim_end_matches('/');
        let api_base_url = if trimmed.is_empty() {
            DEFAULT_API_URL
        } else {
            trimmed
        };
        Self {
            api_base_url: api_base_url.to_string(),
        }
    }
}
