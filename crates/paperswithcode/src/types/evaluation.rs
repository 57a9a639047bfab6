//! Evaluation tables, metrics and results

use crate::error::Result;
use crate::validation::{validate_id, validate_metrics, validate_optional, validate_required, validate_url};
use chrono::NaiveDate;
use derive_builder::Builder;
use paperswithcode_core::resource::{Identified, LazyResource};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

use super::{Dataset, Paper, Task};

/// Metric values keyed by metric name, e.g. `{"Top 1 Accuracy": "88.5"}`.
pub type Metrics = BTreeMap<String, String>;

/// Accept metric values sent as strings or as bare numbers.
pub(crate) fn deserialize_metrics<'de, D>(deserializer: D) -> std::result::Result<Metrics, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BTreeMap<String, serde_json::Value>>::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(name, value)| match value {
            serde_json::Value::String(s) => (name, s),
            other => (name, other.to_string()),
        })
        .collect())
}

/// A leaderboard: results of a task on a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationTable {
    /// Evaluation table ID
    pub id: String,

    /// Task being evaluated
    pub task: LazyResource<Task>,

    /// Dataset used for evaluation
    pub dataset: LazyResource<Dataset>,

    /// Table description
    #[serde(default)]
    pub description: String,

    /// URL of the table this one mirrors
    #[serde(default)]
    pub mirror_url: Option<String>,
}

impl Identified for EvaluationTable {
    fn id(&self) -> &str {
        &self.id
    }
}

/// A metric reported in an evaluation table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metric {
    /// Metric ID
    pub id: String,

    /// Metric name
    pub name: String,

    /// Metric description
    #[serde(default)]
    pub description: String,

    /// Lower is better
    #[serde(default)]
    pub is_loss: bool,
}

/// One row of an evaluation table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Result ID
    pub id: String,

    /// Best rank this row reached
    #[serde(default)]
    pub best_rank: Option<u32>,

    /// Metric values
    #[serde(default, deserialize_with = "deserialize_metrics")]
    pub metrics: Metrics,

    /// Methodology (model name) used for this row
    #[serde(default)]
    pub methodology: String,

    /// Whether data beyond the benchmark dataset was used
    #[serde(default)]
    pub uses_additional_data: bool,

    /// Paper describing the result
    #[serde(default)]
    pub paper: Option<LazyResource<Paper>>,

    /// Name of the metric this row ranks best on
    #[serde(default)]
    pub best_metric: Option<String>,

    /// Date the result was obtained
    #[serde(default, deserialize_with = "super::date::deserialize_opt")]
    pub evaluated_on: Option<NaiveDate>,

    /// External source of the result, e.g. a competition page
    #[serde(default)]
    pub external_source_url: Option<String>,
}

/// Request body for creating an evaluation table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
#[builder(
    setter(into),
    build_fn(validate = "Self::validate", error = "crate::Error")
)]
pub struct EvaluationTableCreateRequest {
    /// Task ID
    pub task: String,

    /// Dataset ID
    pub dataset: String,

    /// Table description
    #[builder(default)]
    pub description: String,

    /// URL of the table this one mirrors
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option, into))]
    pub mirror_url: Option<String>,
}

impl EvaluationTableCreateRequest {
    /// Create a builder for constructing an EvaluationTableCreateRequest.
    pub fn builder() -> EvaluationTableCreateRequestBuilder {
        EvaluationTableCreateRequestBuilder::default()
    }
}

impl EvaluationTableCreateRequestBuilder {
    fn validate(&self) -> Result<()> {
        if let Some(task) = &self.task {
            validate_id("task", task)?;
        }
        if let Some(dataset) = &self.dataset {
            validate_id("dataset", dataset)?;
        }
        validate_url("mirror_url", self.mirror_url.as_ref().and_then(|v| v.as_deref()))
    }
}

/// Request body for a partial evaluation table update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Builder)]
#[builder(
    default,
    setter(into, strip_option),
    build_fn(validate = "Self::validate", error = "crate::Error")
)]
pub struct EvaluationTableUpdateRequest {
    /// Task ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,

    /// Dataset ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataset: Option<String>,

    /// Table description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// URL of the table this one mirrors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mirror_url: Option<String>,
}

impl EvaluationTableUpdateRequest {
    /// Create a builder for constructing an EvaluationTableUpdateRequest.
    pub fn builder() -> EvaluationTableUpdateRequestBuilder {
        EvaluationTableUpdateRequestBuilder::default()
    }
}

impl EvaluationTableUpdateRequestBuilder {
    fn validate(&self) -> Result<()> {
        if let Some(Some(task)) = &self.task {
            validate_id("task", task)?;
        }
        if let Some(Some(dataset)) = &self.dataset {
            validate_id("dataset", dataset)?;
        }
        validate_url("mirror_url", self.mirror_url.as_ref().and_then(|v| v.as_deref()))
    }
}

/// Request body for creating a metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
#[builder(
    setter(into),
    build_fn(validate = "Self::validate", error = "crate::Error")
)]
pub struct MetricCreateRequest {
    /// Metric name
    pub name: String,

    /// Metric description
    #[builder(default)]
    pub description: String,

    /// Lower is better
    #[builder(default)]
    pub is_loss: bool,
}

impl MetricCreateRequest {
    /// Create a builder for constructing a MetricCreateRequest.
    pub fn builder() -> MetricCreateRequestBuilder {
        MetricCreateRequestBuilder::default()
    }
}

impl MetricCreateRequestBuilder {
    fn validate(&self) -> Result<()> {
        match &self.name {
            Some(name) => validate_required("name", name),
            None => Ok(()),
        }
    }
}

/// Request body for a partial metric update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Builder)]
#[builder(
    default,
    setter(into, strip_option),
    build_fn(validate = "Self::validate", error = "crate::Error")
)]
pub struct MetricUpdateRequest {
    /// Metric name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Metric description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Lower is better
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_loss: Option<bool>,
}

impl MetricUpdateRequest {
    /// Create a builder for constructing a MetricUpdateRequest.
    pub fn builder() -> MetricUpdateRequestBuilder {
        MetricUpdateRequestBuilder::default()
    }
}

impl MetricUpdateRequestBuilder {
    fn validate(&self) -> Result<()> {
        validate_optional("name", self.name.as_ref().and_then(|v| v.as_deref()))
    }
}

/// Request body for adding a row to an evaluation table.
///
/// `evaluated_on` is sent as `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
#[builder(
    setter(into),
    build_fn(validate = "Self::validate", error = "crate::Error")
)]
pub struct ResultCreateRequest {
    /// Metric values
    pub metrics: Metrics,

    /// Methodology (model name)
    pub methodology: String,

    /// Whether data beyond the benchmark dataset was used
    #[builder(default)]
    pub uses_additional_data: bool,

    /// Paper ID describing the result
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option, into))]
    pub paper: Option<String>,

    /// Date the result was obtained
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option))]
    pub evaluated_on: Option<NaiveDate>,

    /// External source of the result
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option, into))]
    pub external_source_url: Option<String>,
}

impl ResultCreateRequest {
    /// Create a builder for constructing a ResultCreateRequest.
    pub fn builder() -> ResultCreateRequestBuilder {
        ResultCreateRequestBuilder::default()
    }
}

impl ResultCreateRequestBuilder {
    /// Add a single metric value.
    pub fn metric(&mut self, name: impl Into<String>, value: impl ToString) -> &mut Self {
        self.metrics
            .get_or_insert_with(Metrics::new)
            .insert(name.into(), value.to_string());
        self
    }

    fn validate(&self) -> Result<()> {
        match &self.metrics {
            Some(metrics) => validate_metrics("metrics", metrics)?,
            None => validate_metrics("metrics", &Metrics::new())?,
        }
        if let Some(methodology) = &self.methodology {
            validate_required("methodology", methodology)?;
        }
        if let Some(Some(paper)) = &self.paper {
            validate_id("paper", paper)?;
        }
        validate_url(
            "external_source_url",
            self.external_source_url.as_ref().and_then(|v| v.as_deref()),
        )
    }
}

/// Request body for a partial result update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Builder)]
#[builder(
    default,
    setter(into, strip_option),
    build_fn(validate = "Self::validate", error = "crate::Error")
)]
pub struct ResultUpdateRequest {
    /// Metric values
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Metrics>,

    /// Methodology (model name)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub methodology: Option<String>,

    /// Whether data beyond the benchmark dataset was used
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uses_additional_data: Option<bool>,

    /// Paper ID describing the result
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paper: Option<String>,

    /// Date the result was obtained
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evaluated_on: Option<NaiveDate>,

    /// External source of the result
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_source_url: Option<String>,
}

impl ResultUpdateRequest {
    /// Create a builder for constructing a ResultUpdateRequest.
    pub fn builder() -> ResultUpdateRequestBuilder {
        ResultUpdateRequestBuilder::default()
    }
}

impl ResultUpdateRequestBuilder {
    fn validate(&self) -> Result<()> {
        if let Some(Some(metrics)) = &self.metrics {
            validate_metrics("metrics", metrics)?;
        }
        validate_optional("methodology", self.methodology.as_ref().and_then(|v| v.as_deref()))?;
        if let Some(Some(paper)) = &self.paper {
            validate_id("paper", paper)?;
        }
        validate_url(
            "external_source_url",
            self.external_source_url.as_ref().and_then(|v| v.as_deref()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_evaluation_table_references_are_stubs() {
        let table: EvaluationTable = serde_json::from_value(json!({
            "id": "image-classification-on-imagenet",
            "task": "image-classification",
            "dataset": "imagenet",
            "description": "",
            "mirror_url": null
        }))
        .unwrap();

        assert_eq!(table.task.id(), "image-classification");
        assert!(!table.task.is_loaded());
        assert_eq!(table.dataset.id(), "imagenet");
    }

    #[test]
    fn test_result_metrics_accept_numbers() {
        let result: EvaluationResult = serde_json::from_value(json!({
            "id": "r1",
            "best_rank": 1,
            "metrics": {"Top 1 Accuracy": "88.5%", "Params": 480, "FLOPs": null},
            "methodology": "EfficientNet-L2",
            "uses_additional_data": true,
            "paper": "self-training-with-noisy-student",
            "best_metric": "Top 1 Accuracy",
            "evaluated_on": "2019-11-11",
            "external_source_url": null
        }))
        .unwrap();

        assert_eq!(result.metrics["Top 1 Accuracy"], "88.5%");
        assert_eq!(result.metrics["Params"], "480");
        assert!(!result.metrics.contains_key("FLOPs"));
        assert_eq!(result.evaluated_on, NaiveDate::from_ymd_opt(2019, 11, 11));
    }

    #[test]
    fn test_result_create_request_formats_date() {
        let request = ResultCreateRequest::builder()
            .metric("Top 1 Accuracy", "76.1")
            .methodology("ResNet-50")
            .evaluated_on(NaiveDate::from_ymd_opt(2015, 12, 10).unwrap())
            .build()
            .unwrap();

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "metrics": {"Top 1 Accuracy": "76.1"},
                "methodology": "ResNet-50",
                "uses_additional_data": false,
                "evaluated_on": "2015-12-10"
            })
        );
    }

    #[test]
    fn test_result_create_request_requires_metrics() {
        let err = ResultCreateRequest::builder()
            .methodology("ResNet-50")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(msg) if msg.contains("metrics")));
    }

    #[test]
    fn test_table_create_request_validation() {
        assert!(
            EvaluationTableCreateRequest::builder()
                .task("image-classification")
                .dataset("imagenet")
                .build()
                .is_ok()
        );
        assert!(
            EvaluationTableCreateRequest::builder()
                .task("image-classification")
                .build()
                .is_err()
        );
    }

    #[test]
    fn test_metric_requests() {
        let create = MetricCreateRequest::builder()
            .name("Error rate")
            .is_loss(true)
            .build()
            .unwrap();
        assert_eq!(
            serde_json::to_value(&create).unwrap(),
            json!({"name": "Error rate", "description": "", "is_loss": true})
        );

        let update = MetricUpdateRequest::builder().is_loss(false).build().unwrap();
        assert_eq!(serde_json::to_value(&update).unwrap(), json!({"is_loss": false}));
    }
}
