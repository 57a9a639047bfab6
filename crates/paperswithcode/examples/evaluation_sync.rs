//! Push a small leaderboard with a single synchronize call
//!
//! # Prerequisites
//!
//! A token with write access:
//! ```bash
//! export PAPERSWITHCODE_TOKEN=...
//! ```
//!
//! # Usage
//!
//! ```bash
//! cargo run --example evaluation_sync
//! ```

use chrono::NaiveDate;
use paperswithcode::types::{
    EvaluationTableSyncRequest, MetricSyncRequest, ResultProvenance, ResultSyncRequest,
};
use paperswithcode::{Client, ClientConfig, Error};

fn row(
    external_id: &str,
    methodology: &str,
    top1: f64,
    evaluated_on: NaiveDate,
) -> Result<ResultSyncRequest, Error> {
    ResultSyncRequest::builder()
        .external_id(external_id)
        .methodology(methodology)
        .metric("Top 1 Accuracy", top1)
        .provenance(ResultProvenance::evaluated_on(evaluated_on))
        .build()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ClientConfig::from_dotenv()?;
    if !config.is_authenticated() {
        return Err("PAPERSWITHCODE_TOKEN is not set".into());
    }
    let client = Client::new(config)?;

    let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).ok_or("invalid date");
    let request = EvaluationTableSyncRequest::builder()
        .task("image-classification")
        .dataset("imagenet")
        .external_id("example-imagenet-top1")
        .metric(MetricSyncRequest::score("Top 1 Accuracy"))
        .result(row("resnet-50", "ResNet-50", 76.15, date(2015, 12, 10)?)?)
        .result(row("resnet-152", "ResNet-152", 78.57, date(2015, 12, 10)?)?)
        .build()?;

    let table = client.evaluations().synchronize(&request)?;
    println!("synchronized table {} ({} rows)", table.id, table.results.len());
    for result in &table.results {
        println!("  {:<12} {:?}", result.methodology, result.metrics);
    }

    Ok(())
}
