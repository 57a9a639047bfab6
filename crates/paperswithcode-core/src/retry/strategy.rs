//! Retry strategies with bounded exponential backoff.

use std::time::Duration;

/// A strategy for retrying failed operations with backoff.
///
/// Implementations decide how long to wait between attempts and when to give
/// up. Whether a given failure is worth retrying at all is decided by the
/// caller through the predicate passed to [`execute_if`](Self::execute_if),
/// because only the caller knows which of its errors are transient.
///
/// All waiting is done with [`std::thread::sleep`]: the calling thread blocks
/// for the whole backoff period.
///
/// # Examples
///
/// ```rust
/// use paperswithcode_core::retry::{BackoffStrategy, ExponentialBackoff};
/// use std::time::Duration;
///
/// let backoff = ExponentialBackoff::builder()
///     .max_retries(3)
///     .initial_delay(Duration::from_millis(1))
///     .build();
///
/// let result = backoff.execute(|| Ok::<_, std::io::Error>(42));
/// assert_eq!(result.unwrap(), 42);
/// ```
pub trait BackoffStrategy {
    /// Execute an operation, retrying every failure.
    ///
    /// Equivalent to [`execute_if`](Self::execute_if) with a predicate that
    /// always returns `true`.
    fn execute<F, T, E>(&self, operation: F) -> Result<T, E>
    where
        F: FnMut() -> Result<T, E>,
    {
        self.execute_if(operation, |_, _| true)
    }

    /// Execute an operation, retrying only failures accepted by `should_retry`.
    ///
    /// The operation runs at most `max_retries() + 1` times. `should_retry`
    /// receives the error and the 0-indexed retry number that would follow.
    /// A rejected error, or the error of the final attempt, is returned as is.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use paperswithcode_core::retry::{BackoffStrategy, ExponentialBackoff};
    /// use std::time::Duration;
    ///
    /// let backoff = ExponentialBackoff::builder()
    ///     .max_retries(5)
    ///     .initial_delay(Duration::from_millis(1))
    ///     .build();
    ///
    /// let mut calls = 0;
    /// let result: Result<(), std::io::Error> = backoff.execute_if(
    ///     || {
    ///         calls += 1;
    ///         Err(std::io::Error::other("auth failed"))
    ///     },
    ///     |err, _| err.to_string().contains("network"),
    /// );
    ///
    /// assert!(result.is_err());
    /// assert_eq!(calls, 1);
    /// ```
    fn execute_if<F, P, T, E>(&self, mut operation: F, mut should_retry: P) -> Result<T, E>
    where
        F: FnMut() -> Result<T, E>,
        P: FnMut(&E, u32) -> bool,
    {
        let mut attempt = 0;
        loop {
            match operation() {
                Ok(result) => return Ok(result),
                Err(err) if attempt >= self.max_retries() => return Err(err),
                Err(err) if !should_retry(&err, attempt) => return Err(err),
                Err(_) => {
                    if let Some(delay) = self.next_delay(attempt) {
                        #[cfg(feature = "tracing")]
                        tracing::debug!(
                            retry = attempt + 1,
                            max_retries = self.max_retries(),
                            delay_ms = delay.as_millis() as u64,
                            "Backing off before retry"
                        );
                        if !delay.is_zero() {
                            std::thread::sleep(delay);
                        }
                    }
                    attempt += 1;
                }
            }
        }
    }

    /// Calculate the delay before the next retry attempt.
    ///
    /// `attempt` is 0-indexed: `next_delay(0)` is the wait between the first
    /// attempt and the first retry. Returning `None` retries immediately.
    fn next_delay(&self, attempt: u32) -> Option<Duration>;

    /// Maximum number of retries after the initial attempt.
    ///
    /// With `max_retries() == 3` an operation runs at most 4 times.
    fn max_retries(&self) -> u32;
}
