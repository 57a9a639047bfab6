//! HTTP layer: requests, raw responses, the blocking transport and the
//! retry policy wrapped around it.

pub use request::{Method, Request, RequestBuilder};
pub use response::{RateLimitInfo, Response};
pub use retry::RetryingTransport;
pub use transport::{HttpTransport, Transport, classify};

mod request;
pub mod response;
mod retry;
mod transport;

// Re-export HTTP types from the http crate for convenience
pub use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
