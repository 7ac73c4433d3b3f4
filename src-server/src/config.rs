use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use tracing::{info, warn};

use crate::error::ServerError;

pub struct ServerConfig {
    pub port: u16,
    /// Directory holding the built frontend (`index.html`, wasm, js, css)
    pub dist_dir: PathBuf,
}

impl ServerConfig {
    pub fn load() -> Result<Self, ServerError> {
        Ok(Self {
            port: try_load("DAILY_TODO_PORT", "8080")?,
            dist_dir: try_load("DAILY_TODO_DIST", "dist")?,
        })
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T, ServerError>
where
    T::Err: Display,
{
    env::var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
            ServerError::Config(format!("{key}: {e}"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply_when_unset() {
        let port: u16 = try_load("DAILY_TODO_TEST_UNSET_PORT", "8080").unwrap();
        assert_eq!(port, 8080);
    }

    #[test]
    fn test_invalid_value_is_config_error() {
        let result: Result<u16, _> = try_load("DAILY_TODO_TEST_UNSET_PORT", "not-a-port");
        assert!(matches!(result, Err(ServerError::Config(_))));
    }
}
