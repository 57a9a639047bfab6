//! Blocking HTTP transport
//!
//! [`Transport`] performs exactly one HTTP exchange per call and hands back
//! the raw [`Response`]; [`classify`] turns that response into parsed JSON or
//! a typed error. The [`HttpTransport`] trait ties the two together so that
//! the retry layer and the client can run against scripted transports.

use super::{Request, Response};
use crate::config::ClientConfig;
use crate::error::{Error, Result, UNREACHABLE_MESSAGE};
use crate::observability::{RequestMetadata, RequestTimer, ResponseMetadata};
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use url::Url;

/// A way of performing API requests.
pub trait HttpTransport: Send + Sync + fmt::Debug {
    /// Perform a single exchange and return the raw response.
    ///
    /// # Errors
    ///
    /// Only failures that prevent a response from being received are
    /// reported here: [`Error::Timeout`], [`Error::Transport`], or
    /// [`Error::InvalidUrl`] when the request URL cannot be built.
    fn send(&self, request: &Request) -> Result<Response>;

    /// Perform a request and classify the response.
    ///
    /// Returns the parsed JSON body on HTTP 200 (an empty object for an empty
    /// body) and a typed error otherwise.
    fn execute(&self, request: &Request) -> Result<Value> {
        classify(self.send(request)?)
    }
}

impl<T: HttpTransport + ?Sized> HttpTransport for std::sync::Arc<T> {
    fn send(&self, request: &Request) -> Result<Response> {
        (**self).send(request)
    }

    fn execute(&self, request: &Request) -> Result<Value> {
        (**self).execute(request)
    }
}

impl<T: HttpTransport + ?Sized> HttpTransport for Box<T> {
    fn send(&self, request: &Request) -> Result<Response> {
        (**self).send(request)
    }

    fn execute(&self, request: &Request) -> Result<Value> {
        (**self).execute(request)
    }
}

/// Turn a received response into parsed JSON or a typed error.
///
/// Only HTTP 200 counts as success. A blank success body yields `{}`; any
/// other body must be valid JSON.
pub fn classify(response: Response) -> Result<Value> {
    if response.status() != 200 {
        return Err(Error::from_response(response));
    }
    if response.is_blank() {
        return Ok(Value::Object(serde_json::Map::new()));
    }
    serde_json::from_slice(response.body()).map_err(|e| Error::Parse {
        message: format!("Error while parsing server response: {e}"),
        response: Some(Box::new(response)),
    })
}

/// HTTP transport backed by a pooled blocking `reqwest` client.
///
/// Cheap to share: the connection pool lives inside the `reqwest` client and
/// everything else is read-only after construction.
#[derive(Clone)]
pub struct Transport {
    http_client: reqwest::blocking::Client,
    api_root: Url,
    token: Option<SecretString>,
    timeout: Duration,
    default_headers: HeaderMap,
}

impl fmt::Debug for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transport")
            .field("api_root", &self.api_root.as_str())
            .field("authenticated", &self.token.is_some())
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Transport {
    /// Create a transport from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] when the base URL and API version do not
    /// form a valid URL, and [`Error::Transport`] when the HTTP client cannot
    /// be initialized.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let api_root = api_root(config.base_url(), config.api_version())?;

        let http_client = reqwest::blocking::Client::builder()
            .user_agent(format!("paperswithcode-rs/{}", crate::VERSION))
            .build()
            .map_err(|e| Error::Transport {
                message: format!("Failed to create HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        let token = config
            .token
            .clone()
            .filter(|token| !token.expose_secret().trim().is_empty());

        Ok(Self {
            http_client,
            api_root,
            token,
            timeout: config.timeout,
            default_headers: config.default_headers.clone(),
        })
    }

    /// Root every request path is joined onto, e.g. `https://paperswithcode.com/api/v1/`.
    pub fn api_root(&self) -> &Url {
        &self.api_root
    }

    /// Timeout applied when a request does not override it.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Absolute URL for a relative request path.
    pub fn url(&self, path: &str) -> Result<Url> {
        self.api_root
            .join(path.trim_start_matches('/'))
            .map_err(|e| {
                Error::InvalidUrl(format!("Failed to construct URL from path '{path}': {e}"))
            })
    }

    /// Headers for a request: fixed content type, auth, configured defaults,
    /// then the request's own overrides.
    fn headers(&self, request: &Request) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = &self.token {
            let mut value = HeaderValue::from_str(&format!("JWT {}", token.expose_secret()))
                .map_err(|_| {
                    Error::InvalidConfig("Token contains characters not allowed in a header".into())
                })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        for (name, value) in &self.default_headers {
            headers.insert(name.clone(), value.clone());
        }
        for (name, value) in request.headers() {
            headers.insert(name.clone(), value.clone());
        }

        Ok(headers)
    }
}

impl HttpTransport for Transport {
    fn send(&self, request: &Request) -> Result<Response> {
        let url = self.url(request.path())?;
        let timeout = request.timeout().unwrap_or(self.timeout);

        let mut builder = self
            .http_client
            .request(request.method().into(), url)
            .headers(self.headers(request)?)
            .timeout(timeout);

        if !request.query().is_empty() {
            builder = builder.query(request.query());
        }

        let mut metadata = RequestMetadata::new(request.method(), request.path());
        if let Some(body) = request.body() {
            let bytes = serde_json::to_vec(body)?;
            metadata = metadata.with_body_size(bytes.len());
            builder = builder.body(bytes);
        }

        metadata.log_request();
        let timer = RequestTimer::start();

        let result = builder.send().and_then(|resp| {
            let status = resp.status().as_u16();
            let headers = resp.headers().clone();
            let body = resp.bytes()?.to_vec();
            Ok(Response::new(status, headers, body))
        });

        match result {
            Ok(response) => {
                ResponseMetadata::new(response.status(), response.body().len(), timer.elapsed())
                    .log_response(&metadata);
                Ok(response)
            }
            Err(e) => {
                let error = map_reqwest_error(e, timeout);
                metadata.log_failure(timer.elapsed(), &error);
                Err(error)
            }
        }
    }
}

/// Build `{base_url}/api/v{version}/`.
fn api_root(base_url: &str, api_version: u32) -> Result<Url> {
    let root = format!("{}/api/v{}/", base_url.trim_end_matches('/'), api_version);
    let url = Url::parse(&root)
        .map_err(|e| Error::InvalidUrl(format!("Invalid base URL '{base_url}': {e}")))?;
    if url.cannot_be_a_base() {
        return Err(Error::InvalidUrl(format!(
            "Base URL '{base_url}' cannot be used as a base"
        )));
    }
    Ok(url)
}

fn map_reqwest_error(error: reqwest::Error, timeout: Duration) -> Error {
    if error.is_timeout() {
        Error::Timeout(timeout)
    } else if error.is_connect() {
        Error::Transport {
            message: UNREACHABLE_MESSAGE.to_string(),
            source: Some(Box::new(error)),
        }
    } else {
        Error::Transport {
            message: format!("Unknown error. {error}"),
            source: Some(Box::new(error)),
        }
    }
}
