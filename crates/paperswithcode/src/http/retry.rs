//! Retry layer for transient server errors

use super::{HttpTransport, Request, Response};
use crate::config::RetryConfig;
use crate::error::Result;
use crate::observability::{log_retries_exhausted, log_retry};
use paperswithcode_core::retry::{BackoffStrategy, ExponentialBackoff};
use serde_json::Value;

/// Wraps a transport and retries requests whose status is in the retry set.
///
/// Only [`crate::Error::Http`] failures with a configured status are retried.
/// Timeouts, transport failures, rate limits and parse errors surface on the
/// first attempt. Delays block the calling thread.
#[derive(Debug)]
pub struct RetryingTransport<T> {
    inner: T,
    config: RetryConfig,
    backoff: ExponentialBackoff,
}

impl<T: HttpTransport> RetryingTransport<T> {
    /// Wrap `inner` with the given retry policy.
    pub fn new(inner: T, config: RetryConfig) -> Self {
        let backoff = config.backoff();
        Self {
            inner,
            config,
            backoff,
        }
    }

    /// The wrapped transport.
    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// The retry policy in use.
    pub fn config(&self) -> &RetryConfig {
        &self.config
    }
}

impl<T: HttpTransport> HttpTransport for RetryingTransport<T> {
    fn send(&self, request: &Request) -> Result<Response> {
        self.inner.send(request)
    }

    fn execute(&self, request: &Request) -> Result<Value> {
        let mut attempts = 0u32;
        let result = self.backoff.execute_if(
            || {
                attempts += 1;
                self.inner.execute(request)
            },
            |err, retry| {
                let retryable = err.is_retryable_status(&self.config.retry_statuses);
                if retryable {
                    log_retry(
                        request.method(),
                        request.path(),
                        err.status(),
                        retry + 1,
                        self.config.max_retries,
                    );
                }
                retryable
            },
        );

        if let Err(err) = &result
            && attempts > 1
        {
            log_retries_exhausted(request.method(), request.path(), attempts, err);
        }
        result
    }
}
