use loadreport_common::{LoadReportError, Result};
use serde::{Deserialize, Serialize};

/// Overall error rate (percent) above which a high-priority error finding is raised.
pub const ERROR_RATE_HIGH: f64 = 5.0;

/// Overall error rate (percent) above which a medium-priority error finding is raised.
pub const ERROR_RATE_MEDIUM: f64 = 1.0;

/// Per-endpoint average latency (ms) for a high-priority response-time finding.
pub const AVG_HIGH_MS: f64 = 5_000.0;

/// Per-endpoint average latency (ms) for a medium-priority response-time finding.
pub const AVG_MEDIUM_MS: f64 = 2_000.0;

/// Per-endpoint p95 latency (ms) for a high-priority response-time finding.
pub const P95_HIGH_MS: f64 = 10_000.0;

/// Run throughput (req/s) below which a throughput finding is raised.
pub const THROUGHPUT_MIN_RPS: f64 = 10.0;

/// Thresholds the recommendation rules compare against.
///
/// Every field is optional in JSON; missing fields fall back to the constants above.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Thresholds {
    pub error_rate_high: f64,
    pub error_rate_medium: f64,
    pub avg_high_ms: f64,
    pub avg_medium_ms: f64,
    pub p95_high_ms: f64,
    pub throughput_min_rps: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            error_rate_high: ERROR_RATE_HIGH,
            error_rate_medium: ERROR_RATE_MEDIUM,
            avg_high_ms: AVG_HIGH_MS,
            avg_medium_ms: AVG_MEDIUM_MS,
            p95_high_ms: P95_HIGH_MS,
            throughput_min_rps: THROUGHPUT_MIN_RPS,
        }
    }
}

impl Thresholds {
    /// Parse a (possibly partial) JSON threshold override.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| LoadReportError::InvalidConfig(e.to_string()))
    }
}
