//! Request validation for the Papers with Code client
//!
//! Create requests run these checks when their builders finish, and resource
//! methods check identifiers before they are spliced into a URL path. A
//! failed check is an [`Error::InvalidRequest`] and no request is sent.
//!
//! # Examples
//!
//! ```rust
//! use paperswithcode::types::TaskCreateRequest;
//!
//! let request = TaskCreateRequest::builder()
//!     .name("Image Classification")
//!     .build()?;
//! assert_eq!(request.name, "Image Classification");
//!
//! assert!(TaskCreateRequest::builder().name("  ").build().is_err());
//! # Ok::<(), paperswithcode::Error>(())
//! ```

use crate::error::{Error, Result};
use crate::observability::log_validation_error;
use std::collections::BTreeMap;

fn invalid(field: &str, reason: impl Into<String>) -> Error {
    let reason = reason.into();
    log_validation_error(field, &reason);
    Error::InvalidRequest(format!("{field} {reason}"))
}

/// Require a non-blank value.
pub fn validate_required(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(field, "must not be empty"));
    }
    Ok(())
}

/// Require a non-blank value when present.
pub fn validate_optional(field: &str, value: Option<&str>) -> Result<()> {
    match value {
        Some(value) => validate_required(field, value),
        None => Ok(()),
    }
}

/// Require an identifier that is safe to use as a single URL path segment.
///
/// URL parsing treats a backslash as `/`, decodes `%2e` into `.` and drops tabs and
/// newlines, so those are rejected along with the path delimiters.
pub fn validate_id(field: &str, id: &str) -> Result<()> {
    validate_required(field, id)?;
    let escapes = id
        .chars()
        .any(|c| matches!(c, '/' | '\\' | '?' | '#' | '%') || c.is_control());
    if escapes || id == "." || id == ".." {
        return Err(invalid(field, format!("is not a valid identifier: {id:?}")));
    }
    Ok(())
}

/// Require an absolute http(s) URL when present.
pub fn validate_url(field: &str, value: Option<&str>) -> Result<()> {
    let Some(value) = value else {
        return Ok(());
    };
    match url::Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
        Ok(url) => Err(invalid(
            field,
            format!("must use http or https, got {:?}", url.scheme()),
        )),
        Err(e) => Err(invalid(field, format!("is not a valid URL: {e}"))),
    }
}

/// Require at least one metric and no blank metric names.
pub fn validate_metrics(field: &str, metrics: &BTreeMap<String, String>) -> Result<()> {
    if metrics.is_empty() {
        return Err(invalid(field, "must contain at least one metric"));
    }
    if metrics.keys().any(|name| name.trim().is_empty()) {
        return Err(invalid(field, "must not contain blank metric names"));
    }
    Ok(())
}
