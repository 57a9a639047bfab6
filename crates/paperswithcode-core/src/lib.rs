#![deny(unsafe_code)]
#![warn(missing_docs)]

//! Core abstractions for the paperswithcode client.
//!
//! - **Bounded retries** via the [`BackoffStrategy`](retry::BackoffStrategy)
//!   trait and its [`ExponentialBackoff`](retry::ExponentialBackoff)
//!   implementation. Everything is synchronous; backoff blocks the calling
//!   thread.
//! - **Explicit lazy references** via [`LazyResource`](resource::LazyResource):
//!   a value is either a stub holding an identifier or fully loaded, and only
//!   an explicit `load()` turns one into the other.
//!
//! # Examples
//!
//! ```rust
//! use paperswithcode_core::prelude::*;
//! use std::time::Duration;
//!
//! let backoff = ExponentialBackoff::builder()
//!     .max_retries(3)
//!     .initial_delay(Duration::from_millis(1))
//!     .build();
//!
//! let mut attempts = 0;
//! let result = backoff.execute(|| {
//!     attempts += 1;
//!     if attempts < 2 {
//!         Err(std::io::Error::other("transient"))
//!     } else {
//!         Ok(attempts)
//!     }
//! });
//! assert_eq!(result.unwrap(), 2);
//! ```

pub mod resource;
pub mod retry;

/// Convenient re-exports of commonly used items.
pub mod prelude {
    pub use crate::resource::{Identified, LazyResource, Loader};
    pub use crate::retry::{BackoffStrategy, ExponentialBackoff, ExponentialBackoffBuilder};
}
