//! HTTP request description

use crate::error::{Error, Result};
use http::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// HTTP methods understood by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PATCH`
    Patch,
    /// `DELETE`
    Delete,
}

impl Method {
    /// Upper-case method name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for http::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => http::Method::GET,
            Method::Post => http::Method::POST,
            Method::Patch => http::Method::PATCH,
            Method::Delete => http::Method::DELETE,
        }
    }
}

/// A single API request, relative to the configured API root.
///
/// Built with [`Request::builder`] (or the shorthand constructors) and never
/// modified afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: Option<serde_json::Value>,
    headers: HeaderMap,
    timeout: Option<Duration>,
}

impl Request {
    /// Start building a request.
    pub fn builder(method: Method, path: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(method, path)
    }

    /// A `GET` request without parameters.
    pub fn get(path: impl Into<String>) -> Self {
        RequestBuilder::new(Method::Get, path).build()
    }

    /// A `DELETE` request without parameters.
    pub fn delete(path: impl Into<String>) -> Self {
        RequestBuilder::new(Method::Delete, path).build()
    }

    /// HTTP method.
    pub fn method(&self) -> Method {
        self.method
    }

    /// Path relative to the API root, e.g. `papers/` or `tasks/abc/`.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Query parameters in insertion order.
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    /// JSON body, if any.
    pub fn body(&self) -> Option<&serde_json::Value> {
        self.body.as_ref()
    }

    /// Per-request header overrides.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Per-request timeout override.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

/// Builder for [`Request`].
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    request: Request,
}

impl RequestBuilder {
    /// Create a new request builder.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            request: Request {
                method,
                path: path.into(),
                query: Vec::new(),
                body: None,
                headers: HeaderMap::new(),
                timeout: None,
            },
        }
    }

    /// Append a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.request.query.push((key.into(), value.to_string()));
        self
    }

    /// Append a query parameter when `value` is present.
    pub fn query_opt(self, key: impl Into<String>, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    /// Append several query parameters.
    pub fn query_pairs<K, V>(mut self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: ToString,
    {
        for (key, value) in pairs {
            self.request.query.push((key.into(), value.to_string()));
        }
        self
    }

    /// Set an already-built JSON body.
    pub fn body(mut self, body: serde_json::Value) -> Self {
        self.request.body = Some(body);
        self
    }

    /// Serialize `body` to JSON and use it as the request body.
    pub fn json<T: Serialize + ?Sized>(self, body: &T) -> Result<Self> {
        Ok(self.body(serde_json::to_value(body)?))
    }

    /// Set a header override.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.request.headers.insert(name, value);
        self
    }

    /// Try to set a header, returning an error if the name or value is invalid.
    ///
    /// # Errors
    /// Returns an error if the header name or value contains invalid characters.
    pub fn try_header(self, name: &str, value: &str) -> Result<Self> {
        let name = name
            .parse::<HeaderName>()
            .map_err(|e| Error::InvalidRequest(format!("Invalid header name '{name}': {e}")))?;
        let value = value
            .parse::<HeaderValue>()
            .map_err(|e| Error::InvalidRequest(format!("Invalid header value for '{name}': {e}")))?;
        Ok(self.header(name, value))
    }

    /// Override the configured timeout for this request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.request.timeout = Some(timeout);
        self
    }

    /// Finish the request.
    pub fn build(self) -> Request {
        self.request
    }
}
