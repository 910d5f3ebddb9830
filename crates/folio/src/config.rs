//! Client configuration.
//!
//! The API base address is supplied by deployment configuration, normally the
//! `FOLIO_API_URL` environment variable. Everything else has a default.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Error, InvalidInputError};
use crate::http::DEFAULT_REQUEST_TIMEOUT;
use crate::types::ApiUrl;

/// Environment variable holding the API base address.
pub const API_URL_ENV: &str = "FOLIO_API_URL";

/// Environment variable overriding the token file location.
pub const TOKEN_PATH_ENV: &str = "FOLIO_TOKEN_PATH";

/// Environment variable overriding the startup validation timeout, in seconds.
pub const VALIDATE_TIMEOUT_ENV: &str = "FOLIO_VALIDATE_TIMEOUT_SECS";

/// Upper bound on the startup who-am-i call.
pub const DEFAULT_VALIDATE_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings needed to build a [`SessionManager`](crate::SessionManager).
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: ApiUrl,
    /// Token file location; the platform data directory when `None`.
    pub token_path: Option<PathBuf>,
    pub validate_timeout: Duration,
    pub request_timeout: Duration,
}

impl Config {
    /// Configuration with defaults for everything but the API address.
    pub fn new(api_url: ApiUrl) -> Self {
        Self {
            api_url,
            token_path: None,
            validate_timeout: DEFAULT_VALIDATE_TIMEOUT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Read configuration from `FOLIO_*` environment variables.
    ///
    /// # Errors
    ///
    /// Fails if `FOLIO_API_URL` is unset or invalid, or if the timeout
    /// override is not a positive integer.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from any source keyed by the `FOLIO_*` names.
    ///
    /// Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_url = get(API_URL_ENV).ok_or_else(|| InvalidInputError::Other {
            message: format!("{API_URL_ENV} is not set"),
        })?;
        let mut config = Self::new(ApiUrl::new(api_url)?);

        if let Some(path) = get(TOKEN_PATH_ENV) {
            config.token_path = Some(PathBuf::from(path));
        }
        if let Some(secs) = get(VALIDATE_TIMEOUT_ENV) {
            config.validate_timeout = parse_timeout_secs(&secs)?;
        }

        Ok(config)
    }

    pub fn with_token_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.token_path = Some(path.into());
        self
    }

    pub fn with_validate_timeout(mut self, timeout: Duration) -> Self {
        self.validate_timeout = timeout;
        self
    }
}

/// Parse a whole number of seconds greater than zero.
pub fn parse_timeout_secs(s: &str) -> Result<Duration, Error> {
    match s.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(InvalidInputError::Other {
            message: format!("timeout must be a positive number of seconds, got '{s}'"),
        }
        .into()),
    }
}
