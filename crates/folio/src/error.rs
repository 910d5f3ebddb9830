//! Error types for the folio library.
//!
//! This module provides a unified error type with explicit variants for
//! validation, authentication, transport, API, storage and input errors.
//! Callers render any of them with [`Error::user_message`].

use std::fmt;
use thiserror::Error;

use crate::auth::{Token, ValidationErrors};

/// Message shown for any failure where no response was received.
pub const NETWORK_ERROR_MESSAGE: &str = "network error: check the API address or your connection";

/// Fallback banner for a rejected login.
pub const LOGIN_FAILED_MESSAGE: &str = "login failed, check your email and password";

/// Fallback banner for a rejected registration.
pub const REGISTER_FAILED_MESSAGE: &str = "registration failed, please try again";

/// The unified error type for folio operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Client-side form validation failed; no request was sent.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// Authentication errors (rejected credentials, rejected token).
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Network transport errors (connection, timeout). No response was received.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The API answered with an error status.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// A success response whose body could not be decoded.
    #[error("invalid response: {message}")]
    Decode { message: String },

    /// Token store I/O failure.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Input validation errors (base URL, path parameters).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// A login or registration is already in flight.
    #[error("another sign-in request is already in progress")]
    Busy,

    /// A logout happened while the sign-in request was outstanding.
    #[error("sign-in was cancelled by a logout")]
    Cancelled,
}

impl Error {
    /// Returns true when an existing token was rejected by the API.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Error::Auth(AuthError::Unauthorized { .. }))
    }

    /// The token the API rejected, if this is a rejection.
    pub fn rejected_token(&self) -> Option<&Token> {
        match self {
            Error::Auth(AuthError::Unauthorized { token, .. }) => Some(token),
            _ => None,
        }
    }

    /// Returns true when no response was received at all.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }

    /// Render a single human-readable banner for this error.
    ///
    /// The API's own `message` wins when the response carried one, otherwise
    /// `fallback` is used. Transport failures always get the generic network
    /// message so the user knows a retry may help.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Error::Validation(errors) => errors.to_string(),
            Error::Auth(AuthError::InvalidCredentials { message }) => {
                message.clone().unwrap_or_else(|| fallback.to_string())
            }
            Error::Auth(AuthError::Unauthorized { .. }) => {
                "your session has expired, please log in again".to_string()
            }
            Error::Auth(AuthError::NotAuthenticated) => "please log in first".to_string(),
            Error::Transport(_) => NETWORK_ERROR_MESSAGE.to_string(),
            Error::Api(ApiError { message, .. }) => {
                message.clone().unwrap_or_else(|| fallback.to_string())
            }
            Error::Busy | Error::Cancelled => self.to_string(),
            Error::Decode { .. } | Error::Storage(_) | Error::InvalidInput(_) => {
                fallback.to_string()
            }
        }
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out after {duration_ms}ms")]
    Timeout { duration_ms: u64 },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout { duration_ms: 0 }
        } else if err.is_connect() {
            TransportError::Connection {
                message: err.to_string(),
            }
        } else {
            TransportError::Http {
                message: err.to_string(),
            }
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Error::Decode {
                message: err.to_string(),
            }
        } else {
            Error::Transport(TransportError::from(err))
        }
    }
}

/// Authentication-related errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The login or registration endpoint rejected the submitted credentials.
    #[error("credentials rejected{}", message_suffix(.message))]
    InvalidCredentials { message: Option<String> },

    /// The API rejected `token`, the one sent with the request, as invalid
    /// or expired.
    #[error("token rejected{}", message_suffix(.message))]
    Unauthorized {
        message: Option<String>,
        token: Token,
    },

    /// The operation needs a session and there is none.
    #[error("not authenticated")]
    NotAuthenticated,
}

fn message_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

/// An error status returned by the API.
#[derive(Debug)]
pub struct ApiError {
    /// HTTP status code.
    pub status: u16,
    /// Message from the `{ "message": ... }` error body, if any.
    pub message: Option<String>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// Create a new API error.
    pub fn new(status: u16, message: Option<String>) -> Self {
        Self { status, message }
    }
}

/// Token store errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("{action} {path}: {source}")]
    Io {
        action: &'static str,
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The backing file could not be encoded.
    #[error("failed to encode token file: {0}")]
    Encode(#[from] serde_json::Error),

    /// No location for the token file could be determined.
    #[error("could not determine a data directory")]
    NoDataDir,
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid API base URL.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },

    /// Invalid resource identifier.
    #[error("invalid id '{value}': {reason}")]
    Id { value: String, reason: String },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_message_wins_over_fallback() {
        let err = Error::Auth(AuthError::InvalidCredentials {
            message: Some("wrong password".to_string()),
        });
        assert_eq!(err.user_message(LOGIN_FAILED_MESSAGE), "wrong password");
    }

    #[test]
    fn fallback_when_body_has_no_message() {
        let err = Error::Auth(AuthError::InvalidCredentials { message: None });
        assert_eq!(err.user_message(LOGIN_FAILED_MESSAGE), LOGIN_FAILED_MESSAGE);

        let err = Error::Api(ApiError::new(500, None));
        assert_eq!(err.user_message(REGISTER_FAILED_MESSAGE), REGISTER_FAILED_MESSAGE);
    }

    #[test]
    fn transport_has_distinct_message() {
        let err = Error::Transport(TransportError::Connection {
            message: "refused".to_string(),
        });
        assert!(err.is_transport());
        assert_eq!(err.user_message(LOGIN_FAILED_MESSAGE), NETWORK_ERROR_MESSAGE);
    }

    #[test]
    fn rejection_names_the_token() {
        let err: Error = AuthError::Unauthorized {
            message: Some("jwt expired".to_string()),
            token: Token::new("T1").unwrap(),
        }
        .into();
        assert!(err.is_unauthorized());
        assert_eq!(err.rejected_token().unwrap().as_str(), "T1");
        assert_eq!(err.to_string(), "authentication error: token rejected: jwt expired");
        assert!(!format!("{err:?}").contains("T1"));
    }

    #[test]
    fn api_error_display() {
        let err = ApiError::new(404, Some("not found".to_string()));
        assert_eq!(err.to_string(), "HTTP 404: not found");
        assert_eq!(ApiError::new(502, None).to_string(), "HTTP 502");
    }
}
