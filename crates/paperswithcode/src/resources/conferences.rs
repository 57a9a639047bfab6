//! Conferences API endpoint

use paperswithcode_core::resource::Loader;

use super::{Resource, listing, segment};
use crate::{
    client::Client,
    error::{Error, Result},
    http::{Method, Request},
    pagination::{Page, PageRequest},
    types::{Conference, Paper, Proceeding},
};

/// Conferences API resource.
///
/// Papers are reached through a conference's proceedings: a conference has
/// one proceeding per edition and each proceeding lists its papers.
#[derive(Debug, Clone)]
pub struct Conferences {
    client: Client,
}

impl Conferences {
    /// Create a new Conferences resource.
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// List conferences, optionally filtered by a search string.
    pub fn list(&self, q: Option<&str>, page: PageRequest) -> Result<Page<Conference>> {
        self.client.list(listing("conferences/", q), page)
    }

    /// Get a conference by ID.
    pub fn get(&self, conference_id: &str) -> Result<Conference> {
        let id = segment("conference_id", conference_id)?;
        self.client.get(&format!("conferences/{id}/"))
    }

    /// List the proceedings of a conference.
    pub fn proceedings(&self, conference_id: &str, page: PageRequest) -> Result<Page<Proceeding>> {
        let id = segment("conference_id", conference_id)?;
        let builder = Request::builder(Method::Get, format!("conferences/{id}/proceedings/"));
        self.client.list(builder, page)
    }

    /// Get one proceeding of a conference.
    pub fn proceeding(&self, conference_id: &str, proceeding_id: &str) -> Result<Proceeding> {
        let id = segment("conference_id", conference_id)?;
        let pid = segment("proceeding_id", proceeding_id)?;
        self.client
            .get(&format!("conferences/{id}/proceedings/{pid}/"))
    }

    /// List the papers published in a proceeding.
    pub fn proceeding_papers(
        &self,
        conference_id: &str,
        proceeding_id: &str,
        page: PageRequest,
    ) -> Result<Page<Paper>> {
        let id = segment("conference_id", conference_id)?;
        let pid = segment("proceeding_id", proceeding_id)?;
        let builder = Request::builder(
            Method::Get,
            format!("conferences/{id}/proceedings/{pid}/papers/"),
        );
        self.client.list(builder, page)
    }
}

impl Resource for Conferences {
    fn client(&self) -> &Client {
        &self.client
    }
}

impl Loader<Conference> for Conferences {
    type Error = Error;

    fn load(&self, id: &str) -> Result<Conference> {
        self.get(id)
    }
}
