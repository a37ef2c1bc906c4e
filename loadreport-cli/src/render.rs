use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use loadreport_common::{AnalysisResult, EndpointMetrics, LoadReportError, Result};
use loadreport_engine::config::Thresholds;
use tracing::{info, warn};

/// Traffic-light status shown next to each endpoint in the HTML table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointStatus {
    Good,
    NeedsAttention,
    NeedsOptimization,
}

impl EndpointStatus {
    pub fn as_name(&self) -> &'static str {
        match self {
            EndpointStatus::Good => "good",
            EndpointStatus::NeedsAttention => "needs attention",
            EndpointStatus::NeedsOptimization => "needs optimization",
        }
    }

    fn css_class(&self) -> &'static str {
        match self {
            EndpointStatus::Good => "status-good",
            EndpointStatus::NeedsAttention => "status-warning",
            EndpointStatus::NeedsOptimization => "status-error",
        }
    }
}

/// Classify an endpoint by its own error rate and average latency.
pub fn endpoint_status(m: &EndpointMetrics, t: &Thresholds) -> EndpointStatus {
    if m.error_rate > t.error_rate_high || m.avg > t.avg_high_ms {
        EndpointStatus::NeedsOptimization
    } else if m.error_rate > t.error_rate_medium || m.avg > t.avg_medium_ms {
        EndpointStatus::NeedsAttention
    } else {
        EndpointStatus::Good
    }
}

/// Format epoch milliseconds as `YYYY-MM-DD HH:MM:SS UTC`, or `N/A` if out of range.
pub fn format_timestamp(ms: i64) -> String {
    DateTime::from_timestamp_millis(ms)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

pub fn bytes_to_mb(bytes: u64) -> f64 {
    bytes as f64 / 1024.0 / 1024.0
}

/// Render a standalone HTML report with inline CSS.
pub fn html_report(result: &AnalysisResult, thresholds: &Thresholds, generated_at: DateTime<Utc>) -> String {
    let s = &result.summary;

    let endpoint_rows: String = result
        .by_endpoint
        .iter()
        .map(|m| {
            let status = endpoint_status(m, thresholds);
            format!(
                "<tr><td>{}</td><td>{}</td><td>{:.2}%</td><td>{:.0}ms</td><td>{}ms</td>\
                 <td>{}ms</td><td>{}ms</td>\
                 <td><span class=\"status-indicator {}\"></span>{}</td></tr>",
                html_escape(&m.label),
                m.requests,
                m.error_rate,
                m.avg,
                m.min,
                m.max,
                m.p95,
                status.css_class(),
                status.as_name(),
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let recommendations = if result.recommendations.is_empty() {
        "<p class=\"no-recommendations\">No optimization needed: every metric is within its threshold.</p>"
            .to_string()
    } else {
        result
            .recommendations
            .iter()
            .map(|r| {
                format!(
                    "<div class=\"recommendation {p}\"><div class=\"priority\">{p} priority</div>\
                     <div class=\"kind\">{}</div><div>{}</div></div>",
                    r.kind.as_name(),
                    html_escape(&r.message),
                    p = r.priority.as_name(),
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Load Test Performance Report</title>
<style>
  body {{ font-family: -apple-system, 'Segoe UI', Arial, sans-serif; margin: 0; padding: 20px; background: #f5f5f5; }}
  .container {{ max-width: 1200px; margin: 0 auto; background: #fff; padding: 30px; border-radius: 10px; }}
  h1 {{ color: #2c3e50; margin-bottom: 4px; }}
  h2 {{ color: #34495e; border-bottom: 2px solid #3498db; padding-bottom: 8px; }}
  .meta {{ color: #7f8c8d; font-size: 14px; }}
  .cards {{ display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 20px; }}
  .card {{ background: #f8f9fa; padding: 20px; border-radius: 8px; text-align: center; border-left: 4px solid #3498db; }}
  .card .value {{ font-size: 24px; font-weight: bold; color: #3498db; }}
  table {{ width: 100%; border-collapse: collapse; }}
  th, td {{ padding: 10px; text-align: left; border-bottom: 1px solid #e0e0e0; }}
  th {{ background: #f8f9fa; }}
  .recommendation {{ padding: 12px; margin-bottom: 10px; border-radius: 5px; border-left: 4px solid; }}
  .recommendation.high {{ border-left-color: #e74c3c; background: #fdf2f2; }}
  .recommendation.medium {{ border-left-color: #f39c12; background: #fef9e7; }}
  .priority {{ font-weight: bold; text-transform: uppercase; }}
  .kind {{ color: #7f8c8d; font-size: 12px; }}
  .status-indicator {{ display: inline-block; width: 12px; height: 12px; border-radius: 50%; margin-right: 8px; }}
  .status-good {{ background: #27ae60; }}
  .status-warning {{ background: #f39c12; }}
  .status-error {{ background: #e74c3c; }}
</style>
</head>
<body>
<div class="container">
<h1>Load Test Performance Report</h1>
<p class="meta">Generated {generated}</p>

<h2>Overview</h2>
<div class="cards">
  <div class="card"><div>Total requests</div><div class="value">{total_requests}</div></div>
  <div class="card"><div>Error rate</div><div class="value">{error_rate:.2}%</div></div>
  <div class="card"><div>Throughput</div><div class="value">{throughput:.2} req/s</div></div>
  <div class="card"><div>Duration</div><div class="value">{duration:.1}s</div></div>
</div>

<h2>Endpoints</h2>
<table>
<thead><tr><th>Endpoint</th><th>Requests</th><th>Error rate</th><th>Avg</th><th>Min</th><th>Max</th><th>P95</th><th>Status</th></tr></thead>
<tbody>
{endpoint_rows}
</tbody>
</table>

<h2>Recommendations</h2>
{recommendations}

<h2>Test window</h2>
<p><strong>Start:</strong> {start}</p>
<p><strong>End:</strong> {end}</p>
<p><strong>Data transferred:</strong> {mb:.2} MB</p>
</div>
</body>
</html>
"#,
        generated = generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
        total_requests = s.total_requests,
        error_rate = s.error_rate,
        throughput = s.throughput,
        duration = s.duration,
        endpoint_rows = endpoint_rows,
        recommendations = recommendations,
        start = format_timestamp(s.start_time),
        end = format_timestamp(s.end_time),
        mb = bytes_to_mb(s.total_bytes),
    )
}

/// Render and write the HTML report to `path`.
pub fn write_html(
    result: &AnalysisResult,
    thresholds: &Thresholds,
    path: &Path,
    generated_at: DateTime<Utc>,
) -> Result<()> {
    write_artifact(path, html_report(result, thresholds, generated_at))
}

/// Write the whole result as pretty-printed JSON to `path`.
pub fn write_json(result: &AnalysisResult, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(result).map_err(|e| LoadReportError::WriteFailure {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    write_artifact(path, json)
}

fn write_artifact(path: &Path, contents: String) -> Result<()> {
    fs::write(path, contents).map_err(|e| {
        warn!(path = %path.display(), error = %e, "failed to write report");
        LoadReportError::WriteFailure { path: path.display().to_string(), reason: e.to_string() }
    })?;
    info!(path = %path.display(), "report written");
    Ok(())
}

/// Short plain-text summary for stdout.
pub fn console_summary(result: &AnalysisResult) -> String {
    let s = &result.summary;
    let mut out = String::new();

    let _ = writeln!(out, "Load Test Analysis");
    let _ = writeln!(out, "==================");
    let _ = writeln!(out, "Requests:              {}", s.total_requests);
    let _ = writeln!(out, "Errors:                {} ({:.2}%)", s.total_errors, s.error_rate);
    let _ = writeln!(out, "Throughput:            {:.2} req/s", s.throughput);
    let _ = writeln!(out, "Duration:              {:.1} s", s.duration);
    let _ = writeln!(out, "Data transferred:      {:.2} MB", bytes_to_mb(s.total_bytes));
    let _ = writeln!(out);

    for m in &result.by_endpoint {
        let _ = writeln!(
            out,
            "{:<22} {:>7} req  avg {:>8.0} ms  p95 {:>7} ms  err {:>6.2}%",
            m.label, m.requests, m.avg, m.p95, m.error_rate
        );
    }
    let _ = writeln!(out);

    if result.recommendations.is_empty() {
        let _ = writeln!(out, "No optimization needed.");
    } else {
        let _ = writeln!(out, "Recommendations:");
        for r in &result.recommendations {
            let _ = writeln!(out, "  [{}] {}", r.priority.as_name(), r.message);
        }
    }
    out
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
