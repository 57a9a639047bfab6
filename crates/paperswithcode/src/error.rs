//! Error types for the Papers with Code client
//!
//! Every failure an API call can produce is a variant of [`Error`]. Server
//! responses are classified by [`Error::from_response`]: an exhausted rate
//! limit wins over the status code, known statuses get fixed messages, and
//! anything else falls back to what the body says.

use crate::http::Response;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for operations that can fail with a client error.
pub type Result<T> = std::result::Result<T, Error>;

/// Message used when the server cannot be reached at all.
pub const UNREACHABLE_MESSAGE: &str = "PapersWithCode server not reachable.";

/// Main error type for the Papers with Code client.
#[derive(Debug, Error)]
pub enum Error {
    /// No response arrived within the effective timeout.
    #[error("Request timeout after {0:?}")]
    Timeout(Duration),

    /// The exchange failed before a response was received.
    #[error("{message}")]
    Transport {
        /// Human readable description
        message: String,
        /// Underlying cause, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The server reports that the request quota is used up.
    #[error("Rate limit exceeded")]
    RateLimit {
        /// Requests allowed per window
        limit: Option<u64>,
        /// Requests left in the window
        remaining: Option<u64>,
        /// Seconds until the window resets
        reset: Option<u64>,
        /// Seconds to wait before retrying
        retry: Option<u64>,
        /// The response that carried the headers
        response: Box<Response>,
    },

    /// The server answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
        /// The full response
        response: Box<Response>,
    },

    /// A response or a pagination URL could not be understood.
    #[error("Failed to parse response: {message}")]
    Parse {
        /// What went wrong
        message: String,
        /// The offending response, when there is one
        response: Option<Box<Response>>,
    },

    /// Invalid request parameters.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A request URL could not be built.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Missing required configuration.
    #[error("Missing required configuration: {0}")]
    MissingConfig(String),

    /// Configuration present but malformed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// [`Error::Timeout`]
    Timeout,
    /// [`Error::Transport`]
    Transport,
    /// [`Error::RateLimit`]
    RateLimit,
    /// [`Error::Http`]
    Http,
    /// [`Error::Parse`]
    Parse,
    /// [`Error::InvalidRequest`]
    InvalidRequest,
    /// [`Error::InvalidUrl`]
    InvalidUrl,
    /// [`Error::Serialization`]
    Serialization,
    /// [`Error::MissingConfig`]
    MissingConfig,
    /// [`Error::InvalidConfig`]
    InvalidConfig,
}

impl Error {
    /// Classify a non-success response.
    pub fn from_response(response: Response) -> Self {
        let rate_limit = response.rate_limit();
        if rate_limit.is_exhausted() {
            return Error::RateLimit {
                limit: rate_limit.limit,
                remaining: rate_limit.remaining,
                reset: rate_limit.reset,
                retry: rate_limit.retry,
                response: Box::new(response),
            };
        }

        let status = response.status();
        let message = match status {
            400 => bad_request_message(&response),
            _ => match status_message(status) {
                Some(message) => message.to_string(),
                None => body_message(&response),
            },
        };

        Error::Http {
            status,
            message,
            response: Box::new(response),
        }
    }

    /// A transport failure without an underlying cause.
    pub fn transport(message: impl Into<String>) -> Self {
        Error::Transport {
            message: message.into(),
            source: None,
        }
    }

    /// Coarse kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Timeout(_) => ErrorKind::Timeout,
            Error::Transport { .. } => ErrorKind::Transport,
            Error::RateLimit { .. } => ErrorKind::RateLimit,
            Error::Http { .. } => ErrorKind::Http,
            Error::Parse { .. } => ErrorKind::Parse,
            Error::InvalidRequest(_) => ErrorKind::InvalidRequest,
            Error::InvalidUrl(_) => ErrorKind::InvalidUrl,
            Error::Serialization(_) => ErrorKind::Serialization,
            Error::MissingConfig(_) => ErrorKind::MissingConfig,
            Error::InvalidConfig(_) => ErrorKind::InvalidConfig,
        }
    }

    /// HTTP status of the response behind this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Http { status, .. } => Some(*status),
            Error::RateLimit { response, .. } => Some(response.status()),
            Error::Parse {
                response: Some(response),
                ..
            } => Some(response.status()),
            _ => None,
        }
    }

    /// The response behind this error, if any.
    pub fn response(&self) -> Option<&Response> {
        match self {
            Error::Http { response, .. } | Error::RateLimit { response, .. } => Some(response),
            Error::Parse { response, .. } => response.as_deref(),
            _ => None,
        }
    }

    /// Whether this is an HTTP status error whose status is in `statuses`.
    ///
    /// Rate-limit, parse, timeout and transport failures are never
    /// retryable by status.
    pub fn is_retryable_status(&self, statuses: &[u16]) -> bool {
        matches!(self, Error::Http { status, .. } if statuses.contains(status))
    }
}

impl From<derive_builder::UninitializedFieldError> for Error {
    fn from(e: derive_builder::UninitializedFieldError) -> Self {
        Error::InvalidRequest(format!("{} is required", e.field_name()))
    }
}

/// Fixed messages for well-known statuses.
fn status_message(status: u16) -> Option<&'static str> {
    match status {
        401 => Some("Unauthorized"),
        403 => Some("Forbidden!"),
        404 => Some("Not found."),
        429 => Some("PapersWithCode under pressure! (Too many requests)"),
        500 => Some("You broke PapersWithCode!!!"),
        502 => Some(UNREACHABLE_MESSAGE),
        503 => Some("PapersWithCode server under maintenance."),
        _ => None,
    }
}

// Helpers for reading error bodies

#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Option<Vec<serde_json::Value>>,
    #[serde(default)]
    message: Option<serde_json::Value>,
}

fn value_to_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn bad_request_message(response: &Response) -> String {
    serde_json::from_slice::<ErrorBody>(response.body())
        .ok()
        .and_then(|body| body.errors)
        .filter(|errors| !errors.is_empty())
        .map(|errors| {
            errors
                .iter()
                .map(value_to_text)
                .collect::<Vec<_>>()
                .join("\n")
        })
        .unwrap_or_else(|| "Bad Request.".to_string())
}

fn body_message(response: &Response) -> String {
    serde_json::from_slice::<ErrorBody>(response.body())
        .ok()
        .and_then(|body| body.message)
        .filter(|message| !message.is_null())
        .map(|message| value_to_text(&message))
        .unwrap_or_else(|| "Unknown error.".to_string())
}
