//! Areas API endpoint

use paperswithcode_core::resource::Loader;

use super::{Resource, listing, segment};
use crate::{
    client::Client,
    error::{Error, Result},
    http::{Method, Request},
    pagination::{Page, PageRequest},
    types::{Area, Task},
};

/// Research areas API resource.
#[derive(Debug, Clone)]
pub struct Areas {
    client: Client,
}

impl Areas {
    /// Create a new Areas resource.
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// List areas, optionally filtered by a search string.
    pub fn list(&self, q: Option<&str>, page: PageRequest) -> Result<Page<Area>> {
        self.client.list(listing("areas/", q), page)
    }

    /// Get an area by ID.
    pub fn get(&self, area_id: &str) -> Result<Area> {
        let id = segment("area_id", area_id)?;
        self.client.get(&format!("areas/{id}/"))
    }

    /// List the tasks in an area.
    pub fn tasks(&self, area_id: &str, page: PageRequest) -> Result<Page<Task>> {
        let id = segment("area_id", area_id)?;
        let builder = Request::builder(Method::Get, format!("areas/{id}/tasks/"));
        self.client.list(builder, page)
    }
}

impl Resource for Areas {
    fn client(&self) -> &Client {
        &self.client
    }
}

impl Loader<Area> for Areas {
    type Error = Error;

    fn load(&self, id: &str) -> Result<Area> {
        self.get(id)
    }
}
