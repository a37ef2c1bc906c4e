//! Load-test analysis engine: per-endpoint latency statistics and threshold-based
//! optimization recommendations.

use loadreport_common::{AnalysisResult, Result, Sample};
use tracing::info;

pub mod aggregate;
pub mod config;
pub mod percentile;
pub mod recommend;

use config::Thresholds;

/// Aggregate `samples` and evaluate the recommendation rules against `thresholds`.
///
/// Fails with `EmptyInput` if `samples` is empty; no partial result is produced.
pub fn analyze(samples: &[Sample], thresholds: &Thresholds) -> Result<AnalysisResult> {
    let (summary, by_endpoint) = aggregate::aggregate(samples)?;
    let recommendations = recommend::recommend(&summary, &by_endpoint, thresholds);

    info!(
        requests = summary.total_requests,
        endpoints = by_endpoint.len(),
        recommendations = recommendations.len(),
        "analysis complete"
    );

    Ok(AnalysisResult { summary, by_endpoint, recommendations })
}
