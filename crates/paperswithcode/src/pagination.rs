//! Page-number pagination
//!
//! List endpoints answer with an envelope:
//!
//! ```json
//! {"count": 120, "next": "https://host/api/v1/papers/?page=3", "previous": "https://host/api/v1/papers/?page=1", "results": [...]}
//! ```
//!
//! [`Page`] turns that envelope into typed results plus the page numbers
//! hidden inside the `next`/`previous` links, so callers can walk a listing
//! with plain integers instead of URLs.

use crate::error::{Error, Result};
use crate::http::RequestBuilder;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

/// Default number of items requested per page.
pub const DEFAULT_ITEMS_PER_PAGE: u32 = 50;

/// Raw list envelope as sent by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Number of items matching the query across all pages
    pub count: u64,
    /// Link to the next page
    #[serde(default)]
    pub next: Option<String>,
    /// Link to the previous page
    #[serde(default)]
    pub previous: Option<String>,
    /// Items on this page, in server order
    #[serde(default)]
    pub results: Vec<Value>,
}

impl Envelope {
    /// Interpret a parsed JSON body as an envelope.
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| Error::Parse {
            message: format!("Malformed page envelope: {e}"),
            response: None,
        })
    }
}

/// One page of a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Number of items matching the query across all pages
    pub count: u64,
    /// Number of the next page, if there is one
    pub next_page: Option<u32>,
    /// Number of the previous page, if there is one
    pub previous_page: Option<u32>,
    /// Items on this page
    pub results: Vec<T>,
}

impl<T> Page<T> {
    /// Build a page from an envelope, converting each item with `item`.
    ///
    /// Item order is preserved and the first conversion error is returned.
    pub fn from_envelope<F>(envelope: Envelope, item: F) -> Result<Self>
    where
        F: FnMut(Value) -> Result<T>,
    {
        let next_page = page_number(envelope.next.as_deref())?;
        let previous_page = page_number(envelope.previous.as_deref())?;
        let results = envelope
            .results
            .into_iter()
            .map(item)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            count: envelope.count,
            next_page,
            previous_page,
            results,
        })
    }

    /// Whether another page follows this one.
    pub fn has_next(&self) -> bool {
        self.next_page.is_some()
    }

    /// Number of items on this page.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether this page holds no items.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl<T: DeserializeOwned> Page<T> {
    /// Decode a parsed list response, deserializing every item as `T`.
    pub fn decode(value: Value) -> Result<Self> {
        Self::from_envelope(Envelope::from_value(value)?, |item| {
            serde_json::from_value(item).map_err(Error::from)
        })
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}

/// Extract the page number from a `next`/`previous` link.
///
/// - no link: `None`
/// - link without a query string, or without a `page` parameter: `Some(1)`
/// - `page=N`: `Some(N)`
///
/// # Errors
///
/// [`Error::Parse`] when the link is not a URL or `page` is not a
/// non-negative integer.
pub fn page_number(url: Option<&str>) -> Result<Option<u32>> {
    let Some(url) = url else {
        return Ok(None);
    };

    let query = match Url::parse(url) {
        Ok(parsed) => parsed.query().map(str::to_owned),
        // Relative links still carry a usable query string
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            url.split_once('?').map(|(_, query)| query.to_owned())
        }
        Err(e) => {
            return Err(Error::Parse {
                message: format!("Invalid pagination URL '{url}': {e}"),
                response: None,
            });
        }
    };

    let Some(query) = query else {
        return Ok(Some(1));
    };

    match url::form_urlencoded::parse(query.as_bytes()).find(|(key, _)| key == "page") {
        None => Ok(Some(1)),
        Some((_, value)) => value.trim().parse::<u32>().map(Some).map_err(|_| Error::Parse {
            message: format!("Invalid page number '{value}' in '{url}'"),
            response: None,
        }),
    }
}

/// Which page to fetch and how large it should be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number
    pub page: u32,
    /// Items per page
    pub items_per_page: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
        }
    }
}

impl PageRequest {
    /// A specific page with the default page size.
    pub fn page(page: u32) -> Self {
        Self {
            page,
            ..Default::default()
        }
    }

    /// Change the page size.
    pub fn items_per_page(mut self, items_per_page: u32) -> Self {
        self.items_per_page = items_per_page;
        self
    }

    /// Append `page` and `items_per_page` to a request.
    pub(crate) fn apply(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .query("page", self.page)
            .query("items_per_page", self.items_per_page)
    }
}
