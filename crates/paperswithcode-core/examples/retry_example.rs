//! Example: bounded exponential backoff around a flaky operation
//!
//! Shows the delay schedule produced by `ExponentialBackoff` and a retry
//! predicate that only accepts transient failures.
//!
//! Run with:
//! ```bash
//! cargo run -p paperswithcode-core --example retry_example
//! ```

use paperswithcode_core::prelude::*;
use std::time::{Duration, Instant};

#[derive(Debug)]
enum FetchError {
    Unavailable(u16),
    NotFound,
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Unavailable(status) => write!(f, "server answered {status}"),
            FetchError::NotFound => write!(f, "not found"),
        }
    }
}

impl std::error::Error for FetchError {}

fn main() {
    let backoff = ExponentialBackoff::builder()
        .max_retries(3)
        .initial_delay(Duration::from_millis(50))
        .max_delay(Duration::from_secs(10))
        .build();

    println!("Delay schedule:");
    for retry in 0..backoff.max_retries() {
        println!("  before retry {}: {:?}", retry + 1, backoff.next_delay(retry));
    }

    println!("\nTransient failures are retried:");
    let start = Instant::now();
    let mut attempts = 0;
    let result = backoff.execute_if(
        || {
            attempts += 1;
            if attempts < 3 {
                Err(FetchError::Unavailable(503))
            } else {
                Ok("page 1")
            }
        },
        |err, _| matches!(err, FetchError::Unavailable(_)),
    );
    println!(
        "  {:?} after {} attempts in {:?}",
        result,
        attempts,
        start.elapsed()
    );

    println!("\nPermanent failures are not:");
    let mut attempts = 0;
    let result: Result<(), FetchError> = backoff.execute_if(
        || {
            attempts += 1;
            Err(FetchError::NotFound)
        },
        |err, _| matches!(err, FetchError::Unavailable(_)),
    );
    println!("  {:?} after {} attempt(s)", result, attempts);
}
