//! Papers API endpoint

use paperswithcode_core::resource::Loader;

use super::{Resource, segment};
use crate::{
    client::Client,
    error::{Error, Result},
    http::{Method as HttpMethod, Request},
    pagination::{Page, PageRequest},
    types::{Author, EvaluationResult, Method, Paper, PaperQuery, Repository, Task},
};

/// Papers API resource.
#[derive(Debug, Clone)]
pub struct Papers {
    client: Client,
}

impl Papers {
    /// Create a new Papers resource.
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// List papers matching `query`.
    pub fn list(&self, query: &PaperQuery, page: PageRequest) -> Result<Page<Paper>> {
        let builder = Request::builder(HttpMethod::Get, "papers/").query_pairs(query.pairs());
        self.client.list(builder, page)
    }

    /// Get a paper by ID.
    pub fn get(&self, paper_id: &str) -> Result<Paper> {
        let id = segment("paper_id", paper_id)?;
        self.client.get(&format!("papers/{id}/"))
    }

    /// Repositories implementing a paper.
    pub fn repositories(&self, paper_id: &str, page: PageRequest) -> Result<Page<Repository>> {
        self.sublist(paper_id, "repositories", page)
    }

    /// Tasks a paper addresses.
    pub fn tasks(&self, paper_id: &str, page: PageRequest) -> Result<Page<Task>> {
        self.sublist(paper_id, "tasks", page)
    }

    /// Methods a paper uses or introduces.
    pub fn methods(&self, paper_id: &str, page: PageRequest) -> Result<Page<Method>> {
        self.sublist(paper_id, "methods", page)
    }

    /// Evaluation results reported in a paper.
    pub fn results(&self, paper_id: &str, page: PageRequest) -> Result<Page<EvaluationResult>> {
        self.sublist(paper_id, "results", page)
    }

    /// Authors of a paper.
    pub fn authors(&self, paper_id: &str, page: PageRequest) -> Result<Page<Author>> {
        self.sublist(paper_id, "authors", page)
    }

    fn sublist<T>(&self, paper_id: &str, collection: &str, page: PageRequest) -> Result<Page<T>>
    where
        T: serde::de::DeserializeOwned,
    {
        let id = segment("paper_id", paper_id)?;
        let builder = Request::builder(HttpMethod::Get, format!("papers/{id}/{collection}/"));
        self.client.list(builder, page)
    }
}

impl Resource for Papers {
    fn client(&self) -> &Client {
        &self.client
    }
}

impl Loader<Paper> for Papers {
    type Error = Error;

    fn load(&self, id: &str) -> Result<Paper> {
        self.get(id)
    }
}
