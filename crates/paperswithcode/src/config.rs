//! Configuration for the Papers with Code client

use crate::{DEFAULT_API_VERSION, DEFAULT_BASE_URL};
use http::HeaderMap;
use paperswithcode_core::retry::ExponentialBackoff;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;

/// Default timeout for a single HTTP exchange.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Configuration for the Papers with Code client.
///
/// A plain value: build it in code, load it with [`ClientConfig::from_env`],
/// or combine both with [`ClientConfig::merge`]. The client never reads the
/// environment on its own.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API token sent as `Authorization: JWT <token>`. `None` or blank means anonymous.
    pub token: Option<SecretString>,

    /// Server root, without the `/api/v{N}` suffix
    pub base_url: Option<String>,

    /// API version used in the `/api/v{N}/` path prefix
    pub api_version: Option<u32>,

    /// Default timeout for requests
    pub timeout: Duration,

    /// Retry behaviour for transient server errors
    pub retry: RetryConfig,

    /// Custom headers to include with every request
    pub default_headers: HeaderMap,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            token: None,
            base_url: None,
            api_version: None,
            timeout: DEFAULT_TIMEOUT,
            retry: RetryConfig::default(),
            default_headers: HeaderMap::new(),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with an API token.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(SecretString::new(token.into().into_boxed_str())),
            ..Default::default()
        }
    }

    /// Effective server root.
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    /// Effective API version.
    pub fn api_version(&self) -> u32 {
        self.api_version.unwrap_or(DEFAULT_API_VERSION)
    }

    /// Whether a usable token is configured.
    pub fn is_authenticated(&self) -> bool {
        self.token
            .as_ref()
            .is_some_and(|token| !token.expose_secret().trim().is_empty())
    }

    /// Load configuration from environment variables.
    ///
    /// This will look for:
    /// - `PAPERSWITHCODE_URL` for the server root
    /// - `PAPERSWITHCODE_API_VERSION` for the API version
    /// - `PAPERSWITHCODE_TOKEN` for authentication
    /// - `PAPERSWITHCODE_TIMEOUT` for request timeout (in seconds, fractions allowed)
    /// - `PAPERSWITHCODE_MAX_RETRIES` for maximum retry attempts
    /// - `PAPERSWITHCODE_BACKOFF_FACTOR` for the first retry delay (seconds)
    /// - `PAPERSWITHCODE_BACKOFF_MAX` for the retry delay cap (seconds)
    ///
    /// Unset variables keep their defaults; malformed ones are an error.
    #[cfg(feature = "env")]
    pub fn from_env() -> crate::Result<Self> {
        use std::env;

        let mut config = Self::default();

        if let Ok(token) = env::var("PAPERSWITHCODE_TOKEN") {
            config.token = Some(SecretString::new(token.into_boxed_str()));
        }

        if let Ok(base_url) = env::var("PAPERSWITHCODE_URL") {
            config.base_url = Some(base_url);
        }

        if let Some(api_version) = parse_var::<u32>("PAPERSWITHCODE_API_VERSION")? {
            config.api_version = Some(api_version);
        }

        if let Some(timeout) = parse_var::<f64>("PAPERSWITHCODE_TIMEOUT")? {
            config.timeout = seconds("PAPERSWITHCODE_TIMEOUT", timeout)?;
        }

        if let Some(max_retries) = parse_var::<u32>("PAPERSWITHCODE_MAX_RETRIES")? {
            config.retry.max_retries = max_retries;
        }

        if let Some(factor) = parse_var::<f64>("PAPERSWITHCODE_BACKOFF_FACTOR")? {
            config.retry.backoff_factor = seconds("PAPERSWITHCODE_BACKOFF_FACTOR", factor)?;
        }

        if let Some(max) = parse_var::<f64>("PAPERSWITHCODE_BACKOFF_MAX")? {
            config.retry.backoff_max = seconds("PAPERSWITHCODE_BACKOFF_MAX", max)?;
        }

        Ok(config)
    }

    /// Load a `.env` file from the working directory (if any), then read the
    /// environment like [`ClientConfig::from_env`].
    #[cfg(feature = "env")]
    pub fn from_dotenv() -> crate::Result<Self> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env file"),
            Err(e) if e.not_found() => {}
            Err(e) => {
                return Err(crate::Error::InvalidConfig(format!(
                    "Failed to load .env file: {e}"
                )));
            }
        }
        Self::from_env()
    }

    /// Merge this configuration with another, with the other taking precedence.
    ///
    /// Values of `other` that equal the defaults are treated as unset.
    pub fn merge(mut self, other: ClientConfig) -> Self {
        if other.token.is_some() {
            self.token = other.token;
        }
        if other.base_url.is_some() {
            self.base_url = other.base_url;
        }
        if other.api_version.is_some() {
            self.api_version = other.api_version;
        }
        if other.timeout != DEFAULT_TIMEOUT {
            self.timeout = other.timeout;
        }
        if other.retry != RetryConfig::default() {
            self.retry = other.retry;
        }
        for (key, value) in other.default_headers.iter() {
            self.default_headers.insert(key.clone(), value.clone());
        }

        self
    }
}

#[cfg(feature = "env")]
fn parse_var<T: std::str::FromStr>(name: &str) -> crate::Result<Option<T>> {
    match std::env::var(name) {
        Ok(raw) => raw.trim().parse().map(Some).map_err(|_| {
            crate::Error::InvalidConfig(format!("{name} has an invalid value: {raw:?}"))
        }),
        Err(_) => Ok(None),
    }
}

#[cfg(feature = "env")]
fn seconds(name: &str, value: f64) -> crate::Result<Duration> {
    Duration::try_from_secs_f64(value).map_err(|_| {
        crate::Error::InvalidConfig(format!("{name} must be a non-negative number of seconds"))
    })
}

/// Retry policy for transient server errors.
///
/// The delay before retry `n` (1-based) is
/// `backoff_factor * 2^(n-1)`, never more than `backoff_max`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Maximum number of retries after the initial attempt
    pub max_retries: u32,

    /// Delay before the first retry
    pub backoff_factor: Duration,

    /// Upper bound for any single delay
    pub backoff_max: Duration,

    /// Statuses that trigger a retry
    pub retry_statuses: Vec<u16>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            backoff_factor: Duration::from_millis(50),
            backoff_max: Duration::from_secs(10),
            retry_statuses: vec![500, 502, 503, 504],
        }
    }
}

impl RetryConfig {
    /// A policy that never retries.
    pub fn disabled() -> Self {
        Self {
            max_retries: 0,
            ..Default::default()
        }
    }

    /// Backoff schedule for this policy.
    pub fn backoff(&self) -> ExponentialBackoff {
        ExponentialBackoff::builder()
            .max_retries(self.max_retries)
            .initial_delay(self.backoff_factor)
            .max_delay(self.backoff_max)
            .multiplier(2.0)
            .build()
    }
}

/// Builder for creating ClientConfig with a fluent API.
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API token.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.config.token = Some(SecretString::new(token.into().into_boxed_str()));
        self
    }

    /// Set the server root.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = Some(base_url.into());
        self
    }

    /// Set the API version.
    pub fn api_version(mut self, api_version: u32) -> Self {
        self.config.api_version = Some(api_version);
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the maximum number of retries.
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.config.retry.max_retries = max_retries;
        self
    }

    /// Set the delay before the first retry.
    pub fn backoff_factor(mut self, backoff_factor: Duration) -> Self {
        self.config.retry.backoff_factor = backoff_factor;
        self
    }

    /// Set the cap for retry delays.
    pub fn backoff_max(mut self, backoff_max: Duration) -> Self {
        self.config.retry.backoff_max = backoff_max;
        self
    }

    /// Replace the whole retry policy.
    pub fn retry(mut self, retry: RetryConfig) -> Self {
        self.config.retry = retry;
        self
    }

    /// Add a default header.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is not valid HTTP.
    pub fn default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> crate::Result<Self> {
        let key_str = key.into();
        let value_str = value.into();

        let key: http::HeaderName = key_str
            .parse()
            .map_err(|_| crate::Error::InvalidRequest(format!("Invalid header name: {key_str}")))?;
        let value: http::HeaderValue = value_str.parse().map_err(|_| {
            crate::Error::InvalidRequest(format!("Invalid header value for {key_str}"))
        })?;

        self.config.default_headers.insert(key, value);
        Ok(self)
    }

    /// Build the configuration.
    pub fn build(self) -> ClientConfig {
        self.config
    }
}
