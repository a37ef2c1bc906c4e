use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Error types for LoadReport operations
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadReportError {
    #[error("No samples to analyze")]
    EmptyInput,

    #[error("Malformed sample at line {line}: {reason}")]
    MalformedSample { line: u64, reason: String },

    #[error("Failed to read {path}: {reason}")]
    ReadFailure { path: String, reason: String },

    #[error("Failed to write {path}: {reason}")]
    WriteFailure { path: String, reason: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for LoadReport operations
pub type Result<T> = std::result::Result<T, LoadReportError>;

/// Why a [`Sample`] could not be constructed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SampleError {
    #[error("label must not be empty")]
    EmptyLabel,
}

/// One validated request measurement recorded by the load generator.
///
/// Fields are private so a `Sample` can only be built through [`Sample::new`],
/// which rejects an empty label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    label: String,
    timestamp: i64,
    elapsed: u64,
    success: bool,
    bytes: u64,
}

impl Sample {
    pub fn new(
        label: impl Into<String>,
        timestamp: i64,
        elapsed: u64,
        success: bool,
        bytes: u64,
    ) -> std::result::Result<Self, SampleError> {
        let label = label.into();
        if label.is_empty() {
            return Err(SampleError::EmptyLabel);
        }
        Ok(Self { label, timestamp, elapsed, success, bytes })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Epoch milliseconds.
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// Latency in milliseconds.
    pub fn elapsed(&self) -> u64 {
        self.elapsed
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn bytes(&self) -> u64 {
        self.bytes
    }
}

/// Run-wide statistics over every sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryMetrics {
    pub total_requests: u64,
    pub total_errors: u64,
    /// Percent, 0–100.
    pub error_rate: f64,
    /// Requests per second; 0 when `duration` is 0.
    pub throughput: f64,
    pub total_bytes: u64,
    /// Seconds between the first and last sample timestamps.
    pub duration: f64,
    /// Epoch milliseconds.
    pub start_time: i64,
    /// Epoch milliseconds.
    pub end_time: i64,
}

/// Latency and error statistics for one endpoint label. Latencies are milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointMetrics {
    pub label: String,
    pub requests: u64,
    pub errors: u64,
    pub error_rate: f64,
    pub avg: f64,
    pub min: u64,
    pub max: u64,
    pub p50: u64,
    pub p90: u64,
    pub p95: u64,
    pub p99: u64,
}

/// Label → [`EndpointMetrics`] mapping that iterates in first-seen label order.
///
/// Serializes as a JSON array so the order survives a round trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<EndpointMetrics>", into = "Vec<EndpointMetrics>")]
pub struct EndpointTable {
    entries: Vec<EndpointMetrics>,
    index: HashMap<String, usize>,
}

impl EndpointTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append metrics for a label. A label that is already present is replaced in place,
    /// keeping its original position.
    pub fn insert(&mut self, metrics: EndpointMetrics) {
        match self.index.get(&metrics.label) {
            Some(&pos) => self.entries[pos] = metrics,
            None => {
                self.index.insert(metrics.label.clone(), self.entries.len());
                self.entries.push(metrics);
            }
        }
    }

    pub fn get(&self, label: &str) -> Option<&EndpointMetrics> {
        self.index.get(label).map(|&pos| &self.entries[pos])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EndpointMetrics> {
        self.entries.iter()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|m| m.label.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<EndpointMetrics>> for EndpointTable {
    fn from(entries: Vec<EndpointMetrics>) -> Self {
        let mut table = EndpointTable::new();
        for m in entries {
            table.insert(m);
        }
        table
    }
}

impl From<EndpointTable> for Vec<EndpointMetrics> {
    fn from(table: EndpointTable) -> Self {
        table.entries
    }
}

impl<'a> IntoIterator for &'a EndpointTable {
    type Item = &'a EndpointMetrics;
    type IntoIter = std::slice::Iter<'a, EndpointMetrics>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    Error,
    ResponseTime,
    Throughput,
}

impl RecommendationKind {
    pub fn as_name(&self) -> &'static str {
        match self {
            RecommendationKind::Error => "error",
            RecommendationKind::ResponseTime => "response_time",
            RecommendationKind::Throughput => "throughput",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
}

impl Priority {
    pub fn as_name(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
        }
    }
}

/// A prioritized finding emitted when a metric crosses a threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub kind: RecommendationKind,
    pub priority: Priority,
    /// Endpoint the finding applies to; `None` for run-wide findings.
    pub endpoint: Option<String>,
    /// Human-readable text embedding the measured value that triggered the rule.
    pub message: String,
}

/// Everything the engine produces for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub summary: SummaryMetrics,
    pub by_endpoint: EndpointTable,
    pub recommendations: Vec<Recommendation>,
}

impl AnalysisResult {
    /// `false` means every rule passed and the run needs no optimization.
    pub fn needs_optimization(&self) -> bool {
        !self.recommendations.is_empty()
    }
}
