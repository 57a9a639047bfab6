//! Evaluation tables API endpoint
//!
//! An evaluation table benchmarks one task on one dataset. Its metrics and
//! result rows are nested collections under `evaluations/{id}/`.
//! [`Evaluations::synchronize`] replaces the whole table, metrics and rows
//! included, in a single call.

use paperswithcode_core::resource::Loader;
use serde::de::DeserializeOwned;

use super::{Resource, segment};
use crate::{
    client::Client,
    error::{Error, Result},
    http::{Method, Request},
    pagination::{Page, PageRequest},
    types::{
        EvaluationResult, EvaluationTable, EvaluationTableCreateRequest,
        EvaluationTableSyncRequest, EvaluationTableSyncResponse, EvaluationTableUpdateRequest,
        Metric, MetricCreateRequest, MetricUpdateRequest, ResultCreateRequest,
        ResultUpdateRequest,
    },
};

/// Evaluation tables API resource.
#[derive(Debug, Clone)]
pub struct Evaluations {
    client: Client,
}

impl Evaluations {
    /// Create a new Evaluations resource.
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// List evaluation tables.
    pub fn list(&self, page: PageRequest) -> Result<Page<EvaluationTable>> {
        self.client
            .list(Request::builder(Method::Get, "evaluations/"), page)
    }

    /// Get an evaluation table by ID.
    pub fn get(&self, evaluation_id: &str) -> Result<EvaluationTable> {
        let id = segment("evaluation_id", evaluation_id)?;
        self.client.get(&format!("evaluations/{id}/"))
    }

    /// Create an evaluation table.
    pub fn create(&self, request: &EvaluationTableCreateRequest) -> Result<EvaluationTable> {
        self.client.send(Method::Post, "evaluations/", request)
    }

    /// Update the fields set in `request`.
    pub fn update(
        &self,
        evaluation_id: &str,
        request: &EvaluationTableUpdateRequest,
    ) -> Result<EvaluationTable> {
        let id = segment("evaluation_id", evaluation_id)?;
        self.client
            .send(Method::Patch, &format!("evaluations/{id}/"), request)
    }

    /// Delete an evaluation table.
    pub fn delete(&self, evaluation_id: &str) -> Result<()> {
        let id = segment("evaluation_id", evaluation_id)?;
        self.client.delete(&format!("evaluations/{id}/"))
    }

    /// List the metrics of a table.
    pub fn metrics(&self, evaluation_id: &str, page: PageRequest) -> Result<Page<Metric>> {
        self.nested_list(evaluation_id, "metrics", page)
    }

    /// Get one metric of a table.
    pub fn metric(&self, evaluation_id: &str, metric_id: &str) -> Result<Metric> {
        let path = nested(evaluation_id, "metrics", ("metric_id", metric_id))?;
        self.client.get(&path)
    }

    /// Add a metric to a table.
    pub fn create_metric(
        &self,
        evaluation_id: &str,
        request: &MetricCreateRequest,
    ) -> Result<Metric> {
        let id = segment("evaluation_id", evaluation_id)?;
        self.client
            .send(Method::Post, &format!("evaluations/{id}/metrics/"), request)
    }

    /// Update the fields set in `request`.
    pub fn update_metric(
        &self,
        evaluation_id: &str,
        metric_id: &str,
        request: &MetricUpdateRequest,
    ) -> Result<Metric> {
        let path = nested(evaluation_id, "metrics", ("metric_id", metric_id))?;
        self.client.send(Method::Patch, &path, request)
    }

    /// Remove a metric from a table.
    pub fn delete_metric(&self, evaluation_id: &str, metric_id: &str) -> Result<()> {
        let path = nested(evaluation_id, "metrics", ("metric_id", metric_id))?;
        self.client.delete(&path)
    }

    /// List the rows of a table.
    pub fn results(
        &self,
        evaluation_id: &str,
        page: PageRequest,
    ) -> Result<Page<EvaluationResult>> {
        self.nested_list(evaluation_id, "results", page)
    }

    /// Get one row of a table.
    pub fn result(&self, evaluation_id: &str, result_id: &str) -> Result<EvaluationResult> {
        let path = nested(evaluation_id, "results", ("result_id", result_id))?;
        self.client.get(&path)
    }

    /// Add a row to a table.
    pub fn create_result(
        &self,
        evaluation_id: &str,
        request: &ResultCreateRequest,
    ) -> Result<EvaluationResult> {
        let id = segment("evaluation_id", evaluation_id)?;
        self.client
            .send(Method::Post, &format!("evaluations/{id}/results/"), request)
    }

    /// Update the fields set in `request`.
    pub fn update_result(
        &self,
        evaluation_id: &str,
        result_id: &str,
        request: &ResultUpdateRequest,
    ) -> Result<EvaluationResult> {
        let path = nested(evaluation_id, "results", ("result_id", result_id))?;
        self.client.send(Method::Patch, &path, request)
    }

    /// Remove a row from a table.
    pub fn delete_result(&self, evaluation_id: &str, result_id: &str) -> Result<()> {
        let path = nested(evaluation_id, "results", ("result_id", result_id))?;
        self.client.delete(&path)
    }

    /// Reconcile a whole table with the server.
    ///
    /// The table is matched by `external_id`, or created; rows are matched
    /// by their own `external_id`. The answer is the table as stored.
    pub fn synchronize(
        &self,
        request: &EvaluationTableSyncRequest,
    ) -> Result<EvaluationTableSyncResponse> {
        self.client
            .send(Method::Post, "evaluations/synchronize/", request)
    }

    fn nested_list<T: DeserializeOwned>(
        &self,
        evaluation_id: &str,
        collection: &str,
        page: PageRequest,
    ) -> Result<Page<T>> {
        let id = segment("evaluation_id", evaluation_id)?;
        let builder = Request::builder(Method::Get, format!("evaluations/{id}/{collection}/"));
        self.client.list(builder, page)
    }
}

/// `evaluations/{id}/{collection}/{item}/` with both identifiers checked.
fn nested(evaluation_id: &str, collection: &str, (field, item_id): (&str, &str)) -> Result<String> {
    let id = segment("evaluation_id", evaluation_id)?;
    let item = segment(field, item_id)?;
    Ok(format!("evaluations/{id}/{collection}/{item}/"))
}

impl Resource for Evaluations {
    fn client(&self) -> &Client {
        &self.client
    }
}

impl Loader<EvaluationTable> for Evaluations {
    type Error = Error;

    fn load(&self, id: &str) -> Result<EvaluationTable> {
        self.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::testing::{Recorder, page};
    use crate::types::{MetricSyncRequest, ResultProvenance, ResultSyncRequest};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn table() -> serde_json::Value {
        json!({
            "id": "image-classification-on-imagenet",
            "task": "image-classification",
            "dataset": "imagenet",
            "description": "",
            "mirror_url": null
        })
    }

    #[test]
    fn test_table_crud_paths() {
        let (client, recorder) = Recorder::client(vec![
            page(vec![table()]),
            table(),
            table(),
            table(),
            json!({}),
        ]);
        let evaluations = client.evaluations();

        assert_eq!(evaluations.list(PageRequest::default()).unwrap().len(), 1);
        evaluations.get("image-classification-on-imagenet").unwrap();
        evaluations
            .create(
                &EvaluationTableCreateRequest::builder()
                    .task("image-classification")
                    .dataset("imagenet")
                    .build()
                    .unwrap(),
            )
            .unwrap();
        evaluations
            .update(
                "image-classification-on-imagenet",
                &EvaluationTableUpdateRequest::builder()
                    .description("ILSVRC 2012")
                    .build()
                    .unwrap(),
            )
            .unwrap();
        evaluations.delete("image-classification-on-imagenet").unwrap();

        let calls: Vec<(Method, String)> = recorder
            .requests()
            .iter()
            .map(|r| (r.method(), r.path().to_string()))
            .collect();
        assert_eq!(
            calls,
            vec![
                (Method::Get, "evaluations/".to_string()),
                (Method::Get, "evaluations/image-classification-on-imagenet/".to_string()),
                (Method::Post, "evaluations/".to_string()),
                (Method::Patch, "evaluations/image-classification-on-imagenet/".to_string()),
                (Method::Delete, "evaluations/image-classification-on-imagenet/".to_string()),
            ]
        );
    }

    #[test]
    fn test_metric_operations() {
        let metric = json!({"id": "top-1", "name": "Top 1 Accuracy", "description": "", "is_loss": false});
        let (client, recorder) = Recorder::client(vec![
            page(vec![metric.clone()]),
            metric.clone(),
            metric.clone(),
            metric,
            json!({}),
        ]);
        let evaluations = client.evaluations();
        let table = "image-classification-on-imagenet";

        assert_eq!(
            evaluations.metrics(table, PageRequest::default()).unwrap().results[0].name,
            "Top 1 Accuracy"
        );
        assert!(!evaluations.metric(table, "top-1").unwrap().is_loss);
        evaluations
            .create_metric(
                table,
                &MetricCreateRequest::builder()
                    .name("Top 1 Accuracy")
                    .build()
                    .unwrap(),
            )
            .unwrap();
        evaluations
            .update_metric(
                table,
                "top-1",
                &MetricUpdateRequest::builder().is_loss(false).build().unwrap(),
            )
            .unwrap();
        evaluations.delete_metric(table, "top-1").unwrap();

        let paths: Vec<String> = recorder
            .requests()
            .iter()
            .map(|r| r.path().to_string())
            .collect();
        assert_eq!(
            paths,
            vec![
                "evaluations/image-classification-on-imagenet/metrics/",
                "evaluations/image-classification-on-imagenet/metrics/top-1/",
                "evaluations/image-classification-on-imagenet/metrics/",
                "evaluations/image-classification-on-imagenet/metrics/top-1/",
                "evaluations/image-classification-on-imagenet/metrics/top-1/",
            ]
        );
    }

    #[test]
    fn test_result_operations() {
        let row = json!({
            "id": "resnet-50",
            "best_rank": 12,
            "metrics": {"Top 1 Accuracy": 76.1, "Top 5 Accuracy": "92.9%"},
            "methodology": "ResNet-50",
            "uses_additional_data": false,
            "paper": "deep-residual-learning-for-image-recognition",
            "best_metric": "Top 1 Accuracy",
            "evaluated_on": "2015-12-10"
        });
        let (client, recorder) =
            Recorder::client(vec![page(vec![row.clone()]), row.clone(), row.clone(), json!({})]);
        let evaluations = client.evaluations();
        let table = "image-classification-on-imagenet";

        let rows = evaluations.results(table, PageRequest::default()).unwrap();
        assert_eq!(rows.results[0].metrics["Top 1 Accuracy"], "76.1");

        let created = evaluations
            .create_result(
                table,
                &ResultCreateRequest::builder()
                    .metric("Top 1 Accuracy", "76.1")
                    .methodology("ResNet-50")
                    .paper("deep-residual-learning-for-image-recognition")
                    .build()
                    .unwrap(),
            )
            .unwrap();
        assert_eq!(created.evaluated_on, NaiveDate::from_ymd_opt(2015, 12, 10));

        evaluations
            .update_result(
                table,
                "resnet-50",
                &ResultUpdateRequest::builder()
                    .methodology("ResNet-50 (torchvision)")
                    .build()
                    .unwrap(),
            )
            .unwrap();
        evaluations.delete_result(table, "resnet-50").unwrap();

        let requests = recorder.requests();
        assert_eq!(
            requests[1].body(),
            Some(&json!({
                "metrics": {"Top 1 Accuracy": "76.1"},
                "methodology": "ResNet-50",
                "uses_additional_data": false,
                "paper": "deep-residual-learning-for-image-recognition"
            }))
        );
        assert_eq!(
            requests[2].path(),
            "evaluations/image-classification-on-imagenet/results/resnet-50/"
        );
        assert_eq!(requests[3].method(), Method::Delete);
    }

    #[test]
    fn test_nested_ids_are_validated() {
        let (client, recorder) = Recorder::client(vec![]);
        assert!(client.evaluations().metric("table", "../x").is_err());
        assert!(client.evaluations().delete_result("", "row").is_err());
        assert_eq!(recorder.calls(), 0);
    }

    #[test]
    fn test_synchronize() {
        let (client, recorder) = Recorder::client(vec![json!({
            "id": "image-classification-on-imagenet",
            "task": "image-classification",
            "dataset": "imagenet",
            "external_id": "imagenet-leaderboard",
            "metrics": [{"name": "Top 1 Accuracy", "description": "", "is_loss": false}],
            "results": [{
                "id": "resnet-50",
                "metrics": {"Top 1 Accuracy": "76.1"},
                "methodology": "ResNet-50",
                "paper": null,
                "uses_additional_data": false,
                "external_id": "row-1",
                "evaluated_on": "2015-12-10",
                "external_source_url": null
            }]
        })]);

        let request = EvaluationTableSyncRequest::builder()
            .task("image-classification")
            .dataset("imagenet")
            .external_id("imagenet-leaderboard")
            .metric(MetricSyncRequest::score("Top 1 Accuracy"))
            .result(
                ResultSyncRequest::builder()
                    .metric("Top 1 Accuracy", "76.1")
                    .methodology("ResNet-50")
                    .external_id("row-1")
                    .provenance(ResultProvenance::evaluated_on(
                        NaiveDate::from_ymd_opt(2015, 12, 10).unwrap(),
                    ))
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap();

        let response = client.evaluations().synchronize(&request).unwrap();
        assert_eq!(response.external_id, "imagenet-leaderboard");
        assert_eq!(response.results[0].external_id, "row-1");
        assert_eq!(
            response.results[0].provenance.as_ref().map(ResultProvenance::date),
            NaiveDate::from_ymd_opt(2015, 12, 10)
        );

        let sent = recorder.last();
        assert_eq!(sent.method(), Method::Post);
        assert_eq!(sent.path(), "evaluations/synchronize/");
        assert_eq!(sent.body().unwrap()["results"][0]["evaluated_on"], "2015-12-10");
    }
}
