use loadreport_common::{EndpointTable, Priority, Recommendation, RecommendationKind, SummaryMetrics};
use tracing::debug;

use crate::config::Thresholds;

/// Evaluate the fixed rule set, in order:
///
/// 1. overall error rate (high, else medium)
/// 2. per-endpoint average latency (high, else medium)
/// 3. per-endpoint p95 latency (high), independent of rule 2
/// 4. overall throughput (medium)
///
/// Rules 2 and 3 run per endpoint in table order. An empty result means nothing needs
/// optimizing.
pub fn recommend(
    summary: &SummaryMetrics,
    by_endpoint: &EndpointTable,
    thresholds: &Thresholds,
) -> Vec<Recommendation> {
    let mut recs = Vec::new();

    if summary.error_rate > thresholds.error_rate_high {
        recs.push(run_wide(
            RecommendationKind::Error,
            Priority::High,
            format!(
                "Error rate is too high ({:.2}%); check system stability and error handling",
                summary.error_rate
            ),
        ));
    } else if summary.error_rate > thresholds.error_rate_medium {
        recs.push(run_wide(
            RecommendationKind::Error,
            Priority::Medium,
            format!(
                "Error rate is elevated ({:.2}%); review error handling logic",
                summary.error_rate
            ),
        ));
    }

    for m in by_endpoint {
        if m.avg > thresholds.avg_high_ms {
            recs.push(for_endpoint(
                &m.label,
                Priority::High,
                format!(
                    "{} average response time is too long ({:.0}ms); optimize database queries and business logic",
                    m.label, m.avg
                ),
            ));
        } else if m.avg > thresholds.avg_medium_ms {
            recs.push(for_endpoint(
                &m.label,
                Priority::Medium,
                format!(
                    "{} average response time is long ({:.0}ms); consider performance tuning",
                    m.label, m.avg
                ),
            ));
        }

        if m.p95 as f64 > thresholds.p95_high_ms {
            recs.push(for_endpoint(
                &m.label,
                Priority::High,
                format!(
                    "{} P95 response time is too long ({}ms); look for performance bottlenecks",
                    m.label, m.p95
                ),
            ));
        }
    }

    if summary.throughput < thresholds.throughput_min_rps {
        recs.push(run_wide(
            RecommendationKind::Throughput,
            Priority::Medium,
            format!(
                "System throughput is low ({:.2} req/s); improve concurrent request handling",
                summary.throughput
            ),
        ));
    }

    for r in &recs {
        debug!(kind = r.kind.as_name(), priority = r.priority.as_name(), "rule fired");
    }
    recs
}

fn run_wide(kind: RecommendationKind, priority: Priority, message: String) -> Recommendation {
    Recommendation { kind, priority, endpoint: None, message }
}

fn for_endpoint(label: &str, priority: Priority, message: String) -> Recommendation {
    Recommendation {
        kind: RecommendationKind::ResponseTime,
        priority,
        endpoint: Some(label.to_string()),
        message,
    }
}
