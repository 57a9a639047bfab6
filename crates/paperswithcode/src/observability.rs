//! Centralized structured logging for HTTP exchanges
//!
//! Every request the transport sends, every classified response and every
//! retry decision is logged through this module so field names stay uniform.

use crate::http::Method;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// HTTP request metadata for structured logging
#[derive(Debug, Clone)]
pub struct RequestMetadata {
    /// HTTP method
    pub method: Method,
    /// Request path relative to the API root
    pub path: String,
    /// Request body size in bytes (optional)
    pub body_size: Option<usize>,
}

impl RequestMetadata {
    /// Create new request metadata
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body_size: None,
        }
    }

    /// Set the request body size
    pub fn with_body_size(mut self, size: usize) -> Self {
        self.body_size = Some(size);
        self
    }

    /// Log request being sent
    pub fn log_request(&self) {
        debug!(
            method = %self.method,
            path = %self.path,
            body_size = self.body_size,
            "Sending HTTP request"
        );
    }

    /// Log an exchange that produced no response
    pub fn log_failure(&self, elapsed: Duration, error: &crate::Error) {
        warn!(
            method = %self.method,
            path = %self.path,
            elapsed_ms = elapsed.as_millis(),
            kind = ?error.kind(),
            error = %error,
            "HTTP exchange failed"
        );
    }
}

/// HTTP response metadata for structured logging
#[derive(Debug, Clone)]
pub struct ResponseMetadata {
    /// HTTP status code
    pub status: u16,
    /// Response body size in bytes
    pub body_size: usize,
    /// Time elapsed for the request
    pub elapsed: Duration,
}

impl ResponseMetadata {
    /// Create new response metadata
    pub fn new(status: u16, body_size: usize, elapsed: Duration) -> Self {
        Self {
            status,
            body_size,
            elapsed,
        }
    }

    /// Log a received response
    pub fn log_response(&self, request: &RequestMetadata) {
        debug!(
            method = %request.method,
            path = %request.path,
            status = self.status,
            elapsed_ms = self.elapsed.as_millis(),
            body_size = self.body_size,
            "HTTP response received"
        );
    }
}

/// Log a retry about to happen after a transient failure
pub fn log_retry(method: Method, path: &str, status: Option<u16>, retry: u32, max_retries: u32) {
    warn!(
        method = %method,
        path = %path,
        status = status,
        retry = retry,
        max_retries = max_retries,
        "Retrying request after transient failure"
    );
}

/// Log a request that exhausted its retry budget
pub fn log_retries_exhausted(method: Method, path: &str, attempts: u32, error: &crate::Error) {
    warn!(
        method = %method,
        path = %path,
        attempts = attempts,
        error = %error,
        "Giving up after retries"
    );
}

/// Log validation error
pub fn log_validation_error(field: &str, reason: &str) {
    debug!(
        field = %field,
        reason = %reason,
        "Request validation failed"
    );
}

/// Timer for measuring request duration
pub struct RequestTimer {
    start: Instant,
}

impl RequestTimer {
    /// Start a new timer
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Get elapsed duration
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_metadata_creation() {
        let metadata = RequestMetadata::new(Method::Get, "papers/");
        assert_eq!(metadata.method, Method::Get);
        assert_eq!(metadata.path, "papers/");
        assert_eq!(metadata.body_size, None);
    }

    #[test]
    fn test_request_metadata_with_body_size() {
        let metadata = RequestMetadata::new(Method::Post, "tasks/").with_body_size(128);
        assert_eq!(metadata.body_size, Some(128));
    }

    #[test]
    fn test_response_metadata_creation() {
        let elapsed = Duration::from_millis(500);
        let metadata = ResponseMetadata::new(200, 64, elapsed);
        assert_eq!(metadata.status, 200);
        assert_eq!(metadata.body_size, 64);
        assert_eq!(metadata.elapsed, elapsed);
    }

    #[test]
    fn test_request_timer() {
        let timer = RequestTimer::start();
        std::thread::sleep(Duration::from_millis(10));
        assert!(timer.elapsed().as_millis() >= 10);
    }
}
