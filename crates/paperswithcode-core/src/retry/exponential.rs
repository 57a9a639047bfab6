//! Exponential backoff with an optional jitter.

use super::strategy::BackoffStrategy;
use std::time::Duration;

/// Exponential backoff strategy.
///
/// Delays between retries grow exponentially and are capped at `max_delay`:
///
/// ```text
/// base_delay   = initial_delay * multiplier^n      (n = 0-indexed retry)
/// jittered     = base_delay * (1 + jitter * random(-1, 1))
/// final_delay  = min(jittered, max_delay)
/// ```
///
/// With the default multiplier of 2 this is the familiar
/// `backoff_factor * 2^(retry - 1)` schedule. Jitter defaults to `0.0`, so
/// the schedule is fully deterministic unless asked otherwise.
///
/// # Examples
///
/// ```rust
/// use paperswithcode_core::retry::{BackoffStrategy, ExponentialBackoff};
/// use std::time::Duration;
///
/// let backoff = ExponentialBackoff::builder()
///     .max_retries(3)
///     .initial_delay(Duration::from_millis(50))
///     .max_delay(Duration::from_secs(10))
///     .build();
///
/// assert_eq!(backoff.next_delay(0), Some(Duration::from_millis(50)));
/// assert_eq!(backoff.next_delay(1), Some(Duration::from_millis(100)));
/// assert_eq!(backoff.next_delay(2), Some(Duration::from_millis(200)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ExponentialBackoff {
    max_retries: u32,
    initial_delay: Duration,
    max_delay: Duration,
    multiplier: f64,
    jitter: f64,
}

impl ExponentialBackoff {
    /// Create a new builder for configuring exponential backoff.
    pub fn builder() -> ExponentialBackoffBuilder {
        ExponentialBackoffBuilder::default()
    }

    /// Delay before the first retry.
    pub fn initial_delay(&self) -> Duration {
        self.initial_delay
    }

    /// Upper bound applied to every computed delay.
    pub fn max_delay(&self) -> Duration {
        self.max_delay
    }
}

impl Default for ExponentialBackoff {
    /// Defaults: 3 retries, 100ms initial delay, 60s cap, multiplier 2.0, no jitter.
    fn default() -> Self {
        ExponentialBackoffBuilder::default().build()
    }
}

impl BackoffStrategy for ExponentialBackoff {
    fn next_delay(&self, attempt: u32) -> Option<Duration> {
        let exponent = i32::try_from(attempt).unwrap_or(i32::MAX);
        let base_delay = self.initial_delay.as_secs_f64() * self.multiplier.powi(exponent);

        let jittered = if self.jitter > 0.0 {
            let jitter_amount = base_delay * self.jitter * (rand::random::<f64>() - 0.5) * 2.0;
            base_delay + jitter_amount
        } else {
            base_delay
        };

        // powi overflows to infinity long before u32::MAX retries
        let capped = jittered.min(self.max_delay.as_secs_f64()).max(0.0);
        Some(Duration::from_secs_f64(capped))
    }

    fn max_retries(&self) -> u32 {
        self.max_retries
    }
}

/// Builder for configuring [`ExponentialBackoff`].
///
/// # Examples
///
/// ```rust
/// use paperswithcode_core::retry::ExponentialBackoff;
/// use std::time::Duration;
///
/// let backoff = ExponentialBackoff::builder()
///     .max_retries(5)
///     .initial_delay(Duration::from_millis(100))
///     .max_delay(Duration::from_secs(30))
///     .multiplier(2.0)
///     .jitter(0.1)
///     .build();
/// ```
#[derive(Debug, Default)]
pub struct ExponentialBackoffBuilder {
    max_retries: Option<u32>,
    initial_delay: Option<Duration>,
    max_delay: Option<Duration>,
    multiplier: Option<f64>,
    jitter: Option<f64>,
}

impl ExponentialBackoffBuilder {
    /// Set the maximum number of retry attempts.
    ///
    /// Default: 3
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    /// Set the delay before the first retry (the backoff factor).
    ///
    /// Default: 100ms
    pub fn initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = Some(delay);
        self
    }

    /// Set the maximum delay between retries.
    ///
    /// Default: 60s
    pub fn max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = Some(delay);
        self
    }

    /// Set the exponential multiplier.
    ///
    /// Default: 2.0
    pub fn multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = Some(multiplier);
        self
    }

    /// Set the jitter factor, clamped to `0.0..=1.0`.
    ///
    /// A jitter of 0.1 lets each delay vary by ±10%.
    ///
    /// Default: 0.0
    pub fn jitter(mut self, jitter: f64) -> Self {
        self.jitter = Some(jitter.clamp(0.0, 1.0));
        self
    }

    /// Build the `ExponentialBackoff` instance.
    pub fn build(self) -> ExponentialBackoff {
        ExponentialBackoff {
            max_retries: self.max_retries.unwrap_or(3),
            initial_delay: self.initial_delay.unwrap_or(Duration::from_millis(100)),
            max_delay: self.max_delay.unwrap_or(Duration::from_secs(60)),
            multiplier: self.multiplier.unwrap_or(2.0),
            jitter: self.jitter.unwrap_or(0.0),
        }
    }
}
