use std::collections::HashMap;

use loadreport_common::{EndpointMetrics, EndpointTable, LoadReportError, Result, Sample, SummaryMetrics};
use tracing::debug;

use crate::percentile::percentile_of_sorted;

/// Compute the run summary and per-endpoint metrics for `samples`.
///
/// Returns [`LoadReportError::EmptyInput`] when there is nothing to aggregate.
/// Endpoints appear in the order their label was first seen.
pub fn aggregate(samples: &[Sample]) -> Result<(SummaryMetrics, EndpointTable)> {
    if samples.is_empty() {
        return Err(LoadReportError::EmptyInput);
    }

    let summary = summarize(samples);

    let mut by_endpoint = EndpointTable::new();
    for (label, group) in group_by_label(samples) {
        let metrics = endpoint_metrics(label, &group);
        debug!(
            endpoint = label,
            requests = metrics.requests,
            avg_ms = metrics.avg,
            p95_ms = metrics.p95,
            "endpoint aggregated"
        );
        by_endpoint.insert(metrics);
    }

    Ok((summary, by_endpoint))
}

/// Group samples by label, preserving first-seen label order.
pub fn group_by_label(samples: &[Sample]) -> Vec<(&str, Vec<&Sample>)> {
    let mut groups: Vec<(&str, Vec<&Sample>)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for s in samples {
        let pos = *index.entry(s.label()).or_insert_with(|| {
            groups.push((s.label(), Vec::new()));
            groups.len() - 1
        });
        groups[pos].1.push(s);
    }
    groups
}

fn summarize(samples: &[Sample]) -> SummaryMetrics {
    let total_requests = samples.len() as u64;
    let total_errors = samples.iter().filter(|s| !s.success()).count() as u64;
    let total_bytes: u128 = samples.iter().map(|s| s.bytes() as u128).sum();
    let total_bytes = u64::try_from(total_bytes).unwrap_or(u64::MAX);

    let start_time = samples.iter().map(|s| s.timestamp()).min().unwrap_or_default();
    let end_time = samples.iter().map(|s| s.timestamp()).max().unwrap_or_default();
    let duration = end_time.abs_diff(start_time) as f64 / 1000.0;
    let throughput = if duration > 0.0 { total_requests as f64 / duration } else { 0.0 };

    SummaryMetrics {
        total_requests,
        total_errors,
        error_rate: error_rate(total_errors, total_requests),
        throughput,
        total_bytes,
        duration,
        start_time,
        end_time,
    }
}

fn endpoint_metrics(label: &str, group: &[&Sample]) -> EndpointMetrics {
    let requests = group.len() as u64;
    let errors = group.iter().filter(|s| !s.success()).count() as u64;

    let mut elapsed: Vec<u64> = group.iter().map(|s| s.elapsed()).collect();
    elapsed.sort_unstable();

    let sum: u128 = elapsed.iter().map(|&e| e as u128).sum();
    let avg = if elapsed.is_empty() { 0.0 } else { sum as f64 / elapsed.len() as f64 };

    EndpointMetrics {
        label: label.to_string(),
        requests,
        errors,
        error_rate: error_rate(errors, requests),
        avg,
        min: elapsed.first().copied().unwrap_or_default(),
        max: elapsed.last().copied().unwrap_or_default(),
        p50: percentile_of_sorted(&elapsed, 50.0),
        p90: percentile_of_sorted(&elapsed, 90.0),
        p95: percentile_of_sorted(&elapsed, 95.0),
        p99: percentile_of_sorted(&elapsed, 99.0),
    }
}

/// Errors as a percentage of requests; 0 when there were no requests.
fn error_rate(errors: u64, requests: u64) -> f64 {
    if requests == 0 {
        return 0.0;
    }
    errors as f64 / requests as f64 * 100.0
}
