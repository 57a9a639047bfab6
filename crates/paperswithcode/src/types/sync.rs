//! Evaluation table synchronization
//!
//! A sync request carries a whole evaluation table (metrics and rows) and
//! the server reconciles it with what it already has, matching rows by
//! `external_id`.
//!
//! Two server revisions disagree on how a row records when and where it was
//! obtained. [`ResultProvenance`] models both; it is flattened into the row
//! so the JSON stays flat either way.

use crate::error::Result;
use crate::validation::{validate_id, validate_metrics, validate_required, validate_url};
use chrono::NaiveDate;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use super::evaluation::{Metrics, deserialize_metrics};

fn default_true() -> bool {
    true
}

/// When and where a synchronized result was obtained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResultProvenance {
    /// Current shape: evaluation date plus an optional external source.
    EvaluatedOn {
        /// Date the result was obtained (`YYYY-MM-DD`)
        evaluated_on: NaiveDate,
        /// External source of the result
        #[serde(default, skip_serializing_if = "Option::is_none")]
        external_source_url: Option<String>,
    },
    /// Older shape: a single `evaluation_date` field.
    EvaluationDate {
        /// Date the result was obtained (`YYYY-MM-DD`)
        evaluation_date: NaiveDate,
    },
}

impl ResultProvenance {
    /// Current-shape provenance.
    pub fn evaluated_on(date: NaiveDate) -> Self {
        ResultProvenance::EvaluatedOn {
            evaluated_on: date,
            external_source_url: None,
        }
    }

    /// Date the result was obtained, whichever shape carries it.
    pub fn date(&self) -> NaiveDate {
        match self {
            ResultProvenance::EvaluatedOn { evaluated_on, .. } => *evaluated_on,
            ResultProvenance::EvaluationDate { evaluation_date } => *evaluation_date,
        }
    }
}

/// Provenance keys as they appear flat in a row.
#[derive(Deserialize)]
struct RawProvenance {
    #[serde(default)]
    evaluated_on: Option<NaiveDate>,
    #[serde(default)]
    external_source_url: Option<String>,
    #[serde(default)]
    evaluation_date: Option<NaiveDate>,
}

/// Decode the flattened provenance keys of a row.
///
/// A derived `Option` over the untagged enum would turn a malformed date into
/// `None`; here only a row without any date is `None`.
fn deserialize_provenance<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<ResultProvenance>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error as _;

    let raw = RawProvenance::deserialize(deserializer)?;
    match (raw.evaluated_on, raw.evaluation_date) {
        (Some(evaluated_on), None) => Ok(Some(ResultProvenance::EvaluatedOn {
            evaluated_on,
            external_source_url: raw.external_source_url,
        })),
        (None, Some(evaluation_date)) if raw.external_source_url.is_none() => {
            Ok(Some(ResultProvenance::EvaluationDate { evaluation_date }))
        }
        (None, Some(_)) => Err(D::Error::custom(
            "external_source_url requires evaluated_on, not evaluation_date",
        )),
        (Some(_), Some(_)) => Err(D::Error::custom(
            "row has both evaluated_on and evaluation_date",
        )),
        (None, None) if raw.external_source_url.is_some() => Err(D::Error::custom(
            "external_source_url requires evaluated_on",
        )),
        (None, None) => Ok(None),
    }
}

/// A row in a sync request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
#[builder(
    setter(into),
    build_fn(validate = "Self::validate", error = "crate::Error")
)]
pub struct ResultSyncRequest {
    /// Metric values
    pub metrics: Metrics,

    /// Methodology (model name)
    pub methodology: String,

    /// Paper ID describing the result
    #[builder(default, setter(strip_option, into))]
    pub paper: Option<String>,

    /// Whether data beyond the benchmark dataset was used
    #[serde(default)]
    #[builder(default)]
    pub uses_additional_data: bool,

    /// Caller-side ID used to match rows across syncs
    #[serde(default)]
    #[builder(default)]
    pub external_id: String,

    /// When and where the result was obtained
    #[serde(flatten, deserialize_with = "deserialize_provenance")]
    #[builder(default, setter(strip_option))]
    pub provenance: Option<ResultProvenance>,
}

impl ResultSyncRequest {
    /// Create a builder for constructing a ResultSyncRequest.
    pub fn builder() -> ResultSyncRequestBuilder {
        ResultSyncRequestBuilder::default()
    }
}

impl ResultSyncRequestBuilder {
    /// Add a single metric value.
    pub fn metric(&mut self, name: impl Into<String>, value: impl ToString) -> &mut Self {
        self.metrics
            .get_or_insert_with(Metrics::new)
            .insert(name.into(), value.to_string());
        self
    }

    fn validate(&self) -> Result<()> {
        if let Some(metrics) = &self.metrics {
            validate_metrics("metrics", metrics)?;
        }
        if let Some(methodology) = &self.methodology {
            validate_required("methodology", methodology)?;
        }
        if let Some(Some(paper)) = &self.paper {
            validate_id("paper", paper)?;
        }
        if let Some(Some(ResultProvenance::EvaluatedOn {
            external_source_url: Some(url),
            ..
        })) = &self.provenance
        {
            validate_url("external_source_url", Some(url))?;
        }
        Ok(())
    }
}

/// A metric in a sync request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricSyncRequest {
    /// Metric name
    pub name: String,

    /// Metric description
    #[serde(default)]
    pub description: String,

    /// Lower is better
    #[serde(default = "default_true")]
    pub is_loss: bool,
}

impl MetricSyncRequest {
    /// A metric where lower values are better.
    pub fn loss(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            is_loss: true,
        }
    }

    /// A metric where higher values are better.
    pub fn score(name: impl Into<String>) -> Self {
        Self {
            is_loss: false,
            ..Self::loss(name)
        }
    }
}

/// A whole evaluation table to reconcile with the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
#[builder(
    setter(into),
    build_fn(validate = "Self::validate", error = "crate::Error")
)]
pub struct EvaluationTableSyncRequest {
    /// Task ID
    pub task: String,

    /// Dataset ID
    pub dataset: String,

    /// Caller-side ID used to match tables across syncs
    #[serde(default)]
    #[builder(default)]
    pub external_id: String,

    /// Metrics reported by the table
    #[serde(default)]
    #[builder(default)]
    pub metrics: Vec<MetricSyncRequest>,

    /// Table rows
    #[serde(default)]
    #[builder(default)]
    pub results: Vec<ResultSyncRequest>,
}

impl EvaluationTableSyncRequest {
    /// Create a builder for constructing an EvaluationTableSyncRequest.
    pub fn builder() -> EvaluationTableSyncRequestBuilder {
        EvaluationTableSyncRequestBuilder::default()
    }
}

impl EvaluationTableSyncRequestBuilder {
    /// Append a metric.
    pub fn metric(&mut self, metric: MetricSyncRequest) -> &mut Self {
        self.metrics.get_or_insert_with(Vec::new).push(metric);
        self
    }

    /// Append a row.
    pub fn result(&mut self, result: ResultSyncRequest) -> &mut Self {
        self.results.get_or_insert_with(Vec::new).push(result);
        self
    }

    fn validate(&self) -> Result<()> {
        if let Some(task) = &self.task {
            validate_id("task", task)?;
        }
        if let Some(dataset) = &self.dataset {
            validate_id("dataset", dataset)?;
        }
        if let Some(metrics) = &self.metrics {
            for metric in metrics {
                validate_required("metrics.name", &metric.name)?;
            }
        }
        Ok(())
    }
}

/// A row as reconciled by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultSyncResponse {
    /// Result ID
    pub id: String,

    /// Metric values
    #[serde(default, deserialize_with = "deserialize_metrics")]
    pub metrics: Metrics,

    /// Methodology (model name)
    #[serde(default)]
    pub methodology: String,

    /// Paper ID describing the result
    #[serde(default)]
    pub paper: Option<String>,

    /// Whether data beyond the benchmark dataset was used
    #[serde(default)]
    pub uses_additional_data: bool,

    /// Caller-side ID used to match rows across syncs
    #[serde(default, deserialize_with = "null_as_empty")]
    pub external_id: String,

    /// When and where the result was obtained
    #[serde(flatten, deserialize_with = "deserialize_provenance")]
    pub provenance: Option<ResultProvenance>,
}

/// A metric as reconciled by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricSyncResponse {
    /// Metric name
    pub name: String,

    /// Metric description
    #[serde(default)]
    pub description: String,

    /// Lower is better
    #[serde(default = "default_true")]
    pub is_loss: bool,
}

/// The evaluation table as reconciled by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationTableSyncResponse {
    /// Evaluation table ID
    pub id: String,

    /// Task ID
    pub task: String,

    /// Dataset ID
    pub dataset: String,

    /// Caller-side ID used to match tables across syncs
    #[serde(default, deserialize_with = "null_as_empty")]
    pub external_id: String,

    /// Metrics reported by the table
    #[serde(default)]
    pub metrics: Vec<MetricSyncResponse>,

    /// Table rows
    #[serde(default)]
    pub results: Vec<ResultSyncResponse>,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_sync_request_current_shape() {
        let request = EvaluationTableSyncRequest::builder()
            .task("image-classification")
            .dataset("imagenet")
            .external_id("leaderboard-1")
            .metric(MetricSyncRequest::score("Top 1 Accuracy"))
            .result(
                ResultSyncRequest::builder()
                    .metric("Top 1 Accuracy", "88.5")
                    .methodology("EfficientNet-L2")
                    .external_id("row-1")
                    .provenance(ResultProvenance::EvaluatedOn {
                        evaluated_on: date(2019, 11, 11),
                        external_source_url: Some("https://example.com/board".to_string()),
                    })
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap();

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "task": "image-classification",
                "dataset": "imagenet",
                "external_id": "leaderboard-1",
                "metrics": [{"name": "Top 1 Accuracy", "description": "", "is_loss": false}],
                "results": [{
                    "metrics": {"Top 1 Accuracy": "88.5"},
                    "methodology": "EfficientNet-L2",
                    "paper": null,
                    "uses_additional_data": false,
                    "external_id": "row-1",
                    "evaluated_on": "2019-11-11",
                    "external_source_url": "https://example.com/board"
                }]
            })
        );
    }

    #[test]
    fn test_sync_row_older_shape() {
        let row = ResultSyncRequest::builder()
            .metric("mAP", 42.1)
            .methodology("Faster R-CNN")
            .provenance(ResultProvenance::EvaluationDate {
                evaluation_date: date(2016, 1, 6),
            })
            .build()
            .unwrap();

        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value["evaluation_date"], "2016-01-06");
        assert!(value.get("evaluated_on").is_none());
    }

    #[test]
    fn test_sync_response_decodes_either_shape() {
        let response: EvaluationTableSyncResponse = serde_json::from_value(json!({
            "id": "t1",
            "task": "object-detection",
            "dataset": "coco",
            "external_id": null,
            "metrics": [{"name": "box AP"}],
            "results": [
                {"id": "a", "metrics": {"box AP": 55.1}, "methodology": "DINO",
                 "evaluated_on": "2022-03-07", "external_source_url": null},
                {"id": "b", "metrics": {}, "methodology": "YOLO",
                 "evaluation_date": "2015-06-08"},
                {"id": "c", "metrics": {}, "methodology": "SSD"}
            ]
        }))
        .unwrap();

        assert_eq!(response.external_id, "");
        assert!(response.metrics[0].is_loss);
        assert_eq!(response.results[0].metrics["box AP"], "55.1");
        assert_eq!(
            response.results[0].provenance,
            Some(ResultProvenance::evaluated_on(date(2022, 3, 7)))
        );
        assert_eq!(
            response.results[1].provenance.as_ref().map(ResultProvenance::date),
            Some(date(2015, 6, 8))
        );
        assert_eq!(response.results[2].provenance, None);
    }

    #[test]
    fn test_sync_row_with_malformed_date_is_rejected() {
        let malformed = json!({
            "metrics": {"Top 1 Accuracy": "88.4"},
            "methodology": "EfficientNet",
            "evaluated_on": "2020/13/45"
        });
        assert!(serde_json::from_value::<ResultSyncRequest>(malformed).is_err());

        let older = json!({
            "id": "b", "metrics": {}, "methodology": "YOLO",
            "evaluation_date": "June 2015"
        });
        assert!(serde_json::from_value::<ResultSyncResponse>(older).is_err());

        let both = json!({
            "metrics": {"mAP": "1"}, "methodology": "SSD",
            "evaluated_on": "2016-01-01", "evaluation_date": "2016-01-01"
        });
        assert!(serde_json::from_value::<ResultSyncRequest>(both).is_err());
    }

    #[test]
    fn test_sync_row_decodes_back_to_the_same_value() {
        let row = ResultSyncRequest::builder()
            .metric("Top 1 Accuracy", "88.4")
            .methodology("EfficientNet")
            .provenance(ResultProvenance::EvaluatedOn {
                evaluated_on: date(2019, 5, 28),
                external_source_url: Some("https://example.com/board".to_string()),
            })
            .build()
            .unwrap();

        let decoded: ResultSyncRequest =
            serde_json::from_value(serde_json::to_value(&row).unwrap()).unwrap();
        assert_eq!(decoded, row);
    }

    #[test]
    fn test_sync_request_validation() {
        assert!(
            EvaluationTableSyncRequest::builder()
                .task("a/b")
                .dataset("coco")
                .build()
                .is_err()
        );
        assert!(
            ResultSyncRequest::builder()
                .metrics(Metrics::new())
                .methodology("x")
                .build()
                .is_err()
        );
    }
}
