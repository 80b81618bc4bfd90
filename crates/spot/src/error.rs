//! Error types for the SPOT client.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur while talking to the SPOT backend or the local store.
#[derive(Debug, Error, Clone)]
pub enum SpotError {
    /// Network/HTTP request failed before a response arrived
    #[error("Network error: {message}")]
    Network { message: String },

    /// The backend rejected the bearer token; credentials have been cleared
    #[error("Session expired, please log in again")]
    Unauthorized,

    /// No stored credentials for an operation that needs a user
    #[error("User not logged in. Please log in.")]
    NotLoggedIn,

    /// The backend answered with an error status or an `ERROR` envelope
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Response body did not match the expected shape
    #[error("Decode error: {message}")]
    Decode { message: String },

    /// A scanned payload was not an attendance code
    #[error("Invalid QR code: {message}")]
    InvalidQr { message: String },

    /// Input rejected before any request was sent
    #[error("{message}")]
    Validation { message: String },

    /// Local SQLite store failure
    #[error("Store error: {message}")]
    Store { message: String },

    /// URL parsing/construction failed
    #[error("URL error: {message}")]
    Url { message: String },

    /// Invalid configuration value
    #[error("Config error: {message}")]
    Config { message: String },
}

impl SpotError {
    /// Builds an API error from a status code and server message.
    pub fn api(status: StatusCode, message: impl Into<String>) -> Self {
        SpotError::Api {
            status: status.as_u16(),
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        SpotError::Validation {
            message: message.into(),
        }
    }

    /// Returns true if this error means the user has to log in again.
    pub fn needs_reauth(&self) -> bool {
        matches!(self, SpotError::Unauthorized | SpotError::NotLoggedIn)
    }

    /// HTTP status carried by the error, if the backend produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            SpotError::Api { status, .. } => Some(*status),
            SpotError::Unauthorized => Some(401),
            _ => None,
        }
    }

    /// The message a screen renders verbatim in its `Error` state.
    pub fn user_message(&self) -> String {
        match self {
            SpotError::Api { status, message } => match *status {
                403 => "Access denied: You don't have permission to view this data".to_string(),
                500 if message.is_empty() => "Server error: Please try again later".to_string(),
                _ => message.clone(),
            },
            SpotError::Network { .. } => "Network error: Unable to connect to server".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for SpotError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return SpotError::Decode {
                message: err.to_string(),
            };
        }
        SpotError::Network {
            message: err.to_string(),
        }
    }
}

impl From<url::ParseError> for SpotError {
    fn from(err: url::ParseError) -> Self {
        SpotError::Url {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for SpotError {
    fn from(err: serde_json::Error) -> Self {
        SpotError::Decode {
            message: err.to_string(),
        }
    }
}

impl From<rusqlite::Error> for SpotError {
    fn from(err: rusqlite::Error) -> Self {
        SpotError::Store {
            message: err.to_string(),
        }
    }
}

/// Result alias used throughout the crate.
pub type SpotResult<T> = Result<T, SpotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needs_reauth() {
        assert!(SpotError::Unauthorized.needs_reauth());
        assert!(SpotError::NotLoggedIn.needs_reauth());
        assert!(!SpotError::api(StatusCode::BAD_REQUEST, "nope").needs_reauth());
    }

    #[test]
    fn test_user_message_is_verbatim_for_api_errors() {
        let err = SpotError::api(StatusCode::BAD_REQUEST, "Attendance already logged today");
        assert_eq!(err.user_message(), "Attendance already logged today");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn test_user_message_for_forbidden() {
        let err = SpotError::api(StatusCode::FORBIDDEN, "Forbidden");
        assert!(err.user_message().starts_with("Access denied"));
    }
}
