//! Error taxonomy for calls to the backend.
//!
//! Every failure a view can observe is one of four kinds:
//!
//! | Variant | Meaning | What the UI does |
//! |---------|---------|------------------|
//! | [`ApiError::Auth`] | no credential, or 401/403 | route to login |
//! | [`ApiError::Validation`] | client-side field check failed | show inline, no request sent |
//! | [`ApiError::Network`] | transport failure or any other non-2xx | notify, keep local state |
//! | [`ApiError::Payload`] | 2xx body not in the expected shape | notify with a generic message |
//!
//! Nothing here is retried.

use serde_json::Value;
use thiserror::Error;

use crate::validation::ValidationError;

/// Message shown when a protected call is attempted with no stored token.
pub const NOT_LOGGED_IN: &str = "You are not logged in";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("{message}")]
    Auth { message: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{message}")]
    Network { status: Option<u16>, message: String },

    #[error("{0}")]
    Payload(String),
}

impl ApiError {
    pub fn not_logged_in() -> Self {
        ApiError::Auth {
            message: NOT_LOGGED_IN.to_string(),
        }
    }

    /// Build the error for a non-2xx response.
    ///
    /// `fallback` is used when the body carries no usable message.
    pub fn from_status(status: u16, body: &str, fallback: &str) -> Self {
        let message = error_message(body).unwrap_or_else(|| fallback.to_string());
        match status {
            401 | 403 => ApiError::Auth { message },
            _ => ApiError::Network {
                status: Some(status),
                message,
            },
        }
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, ApiError::Auth { .. })
    }

    /// HTTP status of the response that caused this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Network { status, .. } => *status,
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return ApiError::Payload("Unexpected response from server".to_string());
        }
        ApiError::Network {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

/// Pull a display message out of an error body.
///
/// Looks at `error`, then `message`. Strings are returned verbatim; any other
/// non-null value is serialised as JSON rather than inspected.
pub fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["error", "message"]
        .iter()
        .filter_map(|key| value.get(key))
        .find_map(display_value)
}

fn display_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
