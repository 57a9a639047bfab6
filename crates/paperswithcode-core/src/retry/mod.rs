//! Retry strategies and backoff implementations.
//!
//! - [`BackoffStrategy`] - core trait: bounded retries with a caller-supplied predicate
//! - [`ExponentialBackoff`] - exponential delays capped at a maximum
//!
//! # Examples
//!
//! ```rust
//! use paperswithcode_core::retry::{BackoffStrategy, ExponentialBackoff};
//! use std::time::Duration;
//!
//! let backoff = ExponentialBackoff::builder()
//!     .max_retries(3)
//!     .initial_delay(Duration::from_millis(1))
//!     .build();
//!
//! let result = backoff.execute(|| Ok::<_, std::io::Error>(42));
//! assert_eq!(result.unwrap(), 42);
//! ```

mod exponential;
mod strategy;

pub use exponential::{ExponentialBackoff, ExponentialBackoffBuilder};
pub use strategy::BackoffStrategy;
