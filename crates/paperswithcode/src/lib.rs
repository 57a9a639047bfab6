//! # paperswithcode
//!
//! Typed, synchronous Rust client for the Papers with Code REST API:
//! - Papers, repositories, conferences and proceedings
//! - Areas, tasks, datasets, methods and authors
//! - Evaluation tables with their metrics, results and bulk synchronization
//! - Page-number pagination reconstructed from `next`/`previous` links
//! - Bounded retries with exponential backoff and rate-limit detection
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use paperswithcode::{Client, PageRequest};
//! use paperswithcode::types::PaperQuery;
//!
//! fn main() -> Result<(), paperswithcode::Error> {
//!     let client = Client::public()?;
//!
//!     let mut page = PageRequest::default();
//!     loop {
//!         let papers = client.papers().list(&PaperQuery::search("transformer"), page)?;
//!         for paper in &papers.results {
//!             println!("{} ({:?})", paper.title, paper.published);
//!         }
//!         match papers.next_page {
//!             Some(next) if next <= 3 => page = PageRequest::page(next),
//!             _ => break,
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Authentication
//!
//! Reads are public. Writes need a token, sent as `Authorization: JWT <token>`:
//!
//! ```rust,no_run
//! use paperswithcode::Client;
//!
//! let token = Client::public()?.login("username", "password")?;
//! let client = Client::with_token(token)?;
//! # Ok::<(), paperswithcode::Error>(())
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Re-export commonly used types
pub use client::Client;
pub use config::{ClientConfig, ClientConfigBuilder, RetryConfig};
pub use error::{Error, ErrorKind, Result};
pub use pagination::{Page, PageRequest};
pub use paperswithcode_core::resource::{LazyResource, Loader};

// Module declarations
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod observability;
pub mod pagination;
pub mod resources;
pub mod types;
pub mod validation;

/// Prelude module for common imports
///
/// # Examples
///
/// ```rust
/// use paperswithcode::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Client, ClientConfig, Error, LazyResource, Loader, Page, PageRequest, Result,
        types::{
            Dataset, EvaluationResult, EvaluationTable, EvaluationTableSyncRequest, Metric, Paper,
            PaperQuery, Task,
        },
    };
}

/// Crate version, automatically updated from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default server URL
pub const DEFAULT_BASE_URL: &str = "https://paperswithcode.com";

/// Default API version, the `N` in `/api/vN/`
pub const DEFAULT_API_VERSION: u32 = 1;
