//! Raw HTTP response and rate-limit state

use crate::error::{Error, Result};
use http::HeaderMap;
use serde::de::DeserializeOwned;

/// Rate-limit header names sent by the server.
pub const RATELIMIT_LIMIT: &str = "x-ratelimit-limit";
/// Requests left in the current window.
pub const RATELIMIT_REMAINING: &str = "x-ratelimit-remaining";
/// Seconds until the window resets.
pub const RATELIMIT_RESET: &str = "x-ratelimit-reset";
/// Seconds the server asks the caller to wait.
pub const RATELIMIT_RETRY: &str = "x-ratelimit-retry";

/// A fully received HTTP response.
///
/// The body is read eagerly so the response can be classified, attached to
/// errors, and inspected after the connection has been released.
#[derive(Debug, Clone)]
pub struct Response {
    status: u16,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl Response {
    /// Create a response from its parts.
    pub fn new(status: u16, headers: HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// HTTP status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Raw body bytes.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Body decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Whether the body is empty or only whitespace.
    pub fn is_blank(&self) -> bool {
        self.body.iter().all(u8::is_ascii_whitespace)
    }

    /// Deserialize the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(|e| Error::Parse {
            message: format!("Response body is not valid JSON: {e}"),
            response: Some(Box::new(self.clone())),
        })
    }

    /// Rate-limit state announced by the server.
    pub fn rate_limit(&self) -> RateLimitInfo {
        RateLimitInfo::from_headers(&self.headers)
    }
}

/// Rate-limit state parsed from `X-Ratelimit-*` headers.
///
/// Each value is present only when its header exists and is numeric.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RateLimitInfo {
    /// Requests allowed per window.
    pub limit: Option<u64>,
    /// Requests left in the window.
    pub remaining: Option<u64>,
    /// Seconds until the window resets.
    pub reset: Option<u64>,
    /// Seconds to wait before retrying.
    pub retry: Option<u64>,
}

impl RateLimitInfo {
    /// Read the four rate-limit headers.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            limit: parse_header_u64(headers, RATELIMIT_LIMIT),
            remaining: parse_header_u64(headers, RATELIMIT_REMAINING),
            reset: parse_header_u64(headers, RATELIMIT_RESET),
            retry: parse_header_u64(headers, RATELIMIT_RETRY),
        }
    }

    /// The quota is used up (`remaining == 0`).
    pub fn is_exhausted(&self) -> bool {
        self.remaining == Some(0)
    }
}

fn parse_header_u64(headers: &HeaderMap, name: &str) -> Option<u64> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, value.parse().unwrap());
        }
        map
    }

    #[test]
    fn test_rate_limit_all_headers() {
        let info = RateLimitInfo::from_headers(&headers(&[
            ("X-Ratelimit-Limit", "100"),
            ("X-Ratelimit-Remaining", "0"),
            ("X-Ratelimit-Reset", "30"),
            ("X-Ratelimit-Retry", "5"),
        ]));

        assert_eq!(
            info,
            RateLimitInfo {
                limit: Some(100),
                remaining: Some(0),
                reset: Some(30),
                retry: Some(5),
            }
        );
        assert!(info.is_exhausted());
    }

    #[test]
    fn test_rate_limit_ignores_missing_and_non_numeric() {
        let info = RateLimitInfo::from_headers(&headers(&[
            ("X-Ratelimit-Limit", "plenty"),
            ("X-Ratelimit-Remaining", "12"),
        ]));

        assert_eq!(info.limit, None);
        assert_eq!(info.remaining, Some(12));
        assert_eq!(info.reset, None);
        assert!(!info.is_exhausted());
    }

    #[test]
    fn test_blank_body() {
        assert!(Response::new(200, HeaderMap::new(), Vec::new()).is_blank());
        assert!(Response::new(200, HeaderMap::new(), b" \n\t".to_vec()).is_blank());
        assert!(!Response::new(200, HeaderMap::new(), b"{}".to_vec()).is_blank());
    }

    #[test]
    fn test_json_failure_is_parse_error() {
        let response = Response::new(200, HeaderMap::new(), b"<html>".to_vec());
        let err = response.json::<serde_json::Value>().unwrap_err();

        assert!(matches!(err, Error::Parse { response: Some(_), .. }));
        assert_eq!(err.status(), Some(200));
    }
}
