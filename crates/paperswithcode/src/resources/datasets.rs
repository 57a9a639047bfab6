//! Datasets API endpoint

use paperswithcode_core::resource::Loader;

use super::{Resource, listing, segment};
use crate::{
    client::Client,
    error::{Error, Result},
    http::{Method, Request},
    pagination::{Page, PageRequest},
    types::{Dataset, DatasetCreateRequest, DatasetUpdateRequest, EvaluationTable},
};

/// Datasets API resource.
#[derive(Debug, Clone)]
pub struct Datasets {
    client: Client,
}

impl Datasets {
    /// Create a new Datasets resource.
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// List datasets, optionally filtered by a search string.
    pub fn list(&self, q: Option<&str>, page: PageRequest) -> Result<Page<Dataset>> {
        self.client.list(listing("datasets/", q), page)
    }

    /// Get a dataset by ID.
    pub fn get(&self, dataset_id: &str) -> Result<Dataset> {
        let id = segment("dataset_id", dataset_id)?;
        self.client.get(&format!("datasets/{id}/"))
    }

    /// Create a dataset. Requires an authenticated client.
    pub fn create(&self, request: &DatasetCreateRequest) -> Result<Dataset> {
        self.client.send(Method::Post, "datasets/", request)
    }

    /// Update the fields set in `request`.
    pub fn update(&self, dataset_id: &str, request: &DatasetUpdateRequest) -> Result<Dataset> {
        let id = segment("dataset_id", dataset_id)?;
        self.client
            .send(Method::Patch, &format!("datasets/{id}/"), request)
    }

    /// Delete a dataset.
    pub fn delete(&self, dataset_id: &str) -> Result<()> {
        let id = segment("dataset_id", dataset_id)?;
        self.client.delete(&format!("datasets/{id}/"))
    }

    /// Evaluation tables built on a dataset.
    pub fn evaluations(
        &self,
        dataset_id: &str,
        page: PageRequest,
    ) -> Result<Page<EvaluationTable>> {
        let id = segment("dataset_id", dataset_id)?;
        let builder = Request::builder(Method::Get, format!("datasets/{id}/evaluations/"));
        self.client.list(builder, page)
    }
}

impl Resource for Datasets {
    fn client(&self) -> &Client {
        &self.client
    }
}

impl Loader<Dataset> for Datasets {
    type Error = Error;

    fn load(&self, id: &str) -> Result<Dataset> {
        self.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::testing::{Recorder, page, query};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_create_and_update() {
        let (client, recorder) = Recorder::client(vec![
            json!({"id": "mnist", "name": "MNIST", "url": "http://yann.lecun.com/exdb/mnist/"}),
            json!({"id": "mnist", "name": "MNIST", "full_name": "Modified NIST"}),
        ]);

        let created = client
            .datasets()
            .create(
                &DatasetCreateRequest::builder()
                    .name("MNIST")
                    .url("http://yann.lecun.com/exdb/mnist/")
                    .build()
                    .unwrap(),
            )
            .unwrap();
        assert_eq!(created.id, "mnist");

        let updated = client
            .datasets()
            .update(
                "mnist",
                &DatasetUpdateRequest::builder()
                    .full_name("Modified NIST")
                    .build()
                    .unwrap(),
            )
            .unwrap();
        assert_eq!(updated.full_name.as_deref(), Some("Modified NIST"));

        let requests = recorder.requests();
        assert_eq!(
            requests[0].body(),
            Some(&json!({"name": "MNIST", "url": "http://yann.lecun.com/exdb/mnist/"}))
        );
        assert_eq!(requests[1].path(), "datasets/mnist/");
        assert_eq!(requests[1].method(), Method::Patch);
    }

    #[test]
    fn test_list_and_evaluations() {
        let (client, recorder) = Recorder::client(vec![
            page(vec![json!({"id": "imagenet", "name": "ImageNet"})]),
            page(vec![]),
        ]);

        let datasets = client
            .datasets()
            .list(Some("imagenet"), PageRequest::default().items_per_page(5))
            .unwrap();
        assert_eq!(datasets.results[0].name, "ImageNet");
        assert_eq!(
            query(&recorder.last()),
            vec![("q", "imagenet"), ("page", "1"), ("items_per_page", "5")]
        );

        let tables = client.datasets().evaluations("imagenet", PageRequest::default()).unwrap();
        assert!(tables.is_empty());
        assert_eq!(recorder.last().path(), "datasets/imagenet/evaluations/");
    }
}
