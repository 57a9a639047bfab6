//! Methods API endpoint

use paperswithcode_core::resource::Loader;

use super::{Resource, listing, segment};
use crate::{
    client::Client,
    error::{Error, Result},
    http::{Method as HttpMethod, Request},
    pagination::{Page, PageRequest},
    types::{Method, Paper},
};

/// Methods API resource.
#[derive(Debug, Clone)]
pub struct Methods {
    client: Client,
}

impl Methods {
    /// Create a new Methods resource.
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// List methods, optionally filtered by a search string.
    pub fn list(&self, q: Option<&str>, page: PageRequest) -> Result<Page<Method>> {
        self.client.list(listing("methods/", q), page)
    }

    /// Get a method by ID.
    pub fn get(&self, method_id: &str) -> Result<Method> {
        let id = segment("method_id", method_id)?;
        self.client.get(&format!("methods/{id}/"))
    }

    /// List papers that use a method.
    pub fn papers(&self, method_id: &str, page: PageRequest) -> Result<Page<Paper>> {
        let id = segment("method_id", method_id)?;
        let builder = Request::builder(HttpMethod::Get, format!("methods/{id}/papers/"));
        self.client.list(builder, page)
    }
}

impl Resource for Methods {
    fn client(&self) -> &Client {
        &self.client
    }
}

impl Loader<Method> for Methods {
    type Error = Error;

    fn load(&self, id: &str) -> Result<Method> {
        self.get(id)
    }
}
