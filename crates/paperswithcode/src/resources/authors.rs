//! Authors API endpoint

use paperswithcode_core::resource::Loader;

use super::{Resource, listing, segment};
use crate::{
    client::Client,
    error::{Error, Result},
    http::{Method, Request},
    pagination::{Page, PageRequest},
    types::{Author, Paper},
};

/// Authors API resource.
#[derive(Debug, Clone)]
pub struct Authors {
    client: Client,
}

impl Authors {
    /// Create a new Authors resource.
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// List authors, optionally filtered by a search string.
    pub fn list(&self, q: Option<&str>, page: PageRequest) -> Result<Page<Author>> {
        self.client.list(listing("authors/", q), page)
    }

    /// Get an author by ID.
    pub fn get(&self, author_id: &str) -> Result<Author> {
        let id = segment("author_id", author_id)?;
        self.client.get(&format!("authors/{id}/"))
    }

    /// List the papers of an author.
    pub fn papers(&self, author_id: &str, page: PageRequest) -> Result<Page<Paper>> {
        let id = segment("author_id", author_id)?;
        let builder = Request::builder(Method::Get, format!("authors/{id}/papers/"));
        self.client.list(builder, page)
    }
}

impl Resource for Authors {
    fn client(&self) -> &Client {
        &self.client
    }
}

impl Loader<Author> for Authors {
    type Error = Error;

    fn load(&self, id: &str) -> Result<Author> {
        self.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::testing::{Recorder, page, query};
    use serde_json::json;

    #[test]
    fn test_author_search_and_papers() {
        let (client, recorder) = Recorder::client(vec![
            page(vec![json!({"id": "kaiming-he", "full_name": "Kaiming He"})]),
            page(vec![json!({"id": "mask-r-cnn", "title": "Mask R-CNN"})]),
        ]);

        let authors = client.authors().list(Some("Kaiming"), PageRequest::default()).unwrap();
        assert_eq!(authors.results[0].id, "kaiming-he");
        assert_eq!(query(&recorder.last())[0], ("q", "Kaiming"));

        let papers = client.authors().papers("kaiming-he", PageRequest::default()).unwrap();
        assert_eq!(papers.results[0].title, "Mask R-CNN");
        assert_eq!(recorder.last().path(), "authors/kaiming-he/papers/");
    }
}
