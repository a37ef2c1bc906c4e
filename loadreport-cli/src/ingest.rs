use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use loadreport_common::{LoadReportError, Result, Sample};
use serde::Deserialize;
use tracing::info;

/// One JTL row as written by the load generator, before validation.
///
/// Only the columns the analysis needs are read; any others in the header are ignored.
#[derive(Debug, Deserialize)]
struct JtlRecord {
    label: String,
    #[serde(rename = "timeStamp")]
    time_stamp: String,
    elapsed: String,
    success: String,
    #[serde(default)]
    bytes: Option<String>,
}

impl JtlRecord {
    fn into_sample(self, line: u64) -> Result<Sample> {
        let timestamp: i64 = self
            .time_stamp
            .parse()
            .map_err(|_| malformed(line, format!("invalid timeStamp {:?}", self.time_stamp)))?;
        let elapsed = parse_count("elapsed", &self.elapsed, line)?;
        let success = parse_success(&self.success)
            .ok_or_else(|| malformed(line, format!("invalid success {:?}", self.success)))?;
        let bytes = match self.bytes.as_deref() {
            None | Some("") => 0,
            Some(raw) => parse_count("bytes", raw, line)?,
        };

        Sample::new(self.label, timestamp, elapsed, success, bytes)
            .map_err(|e| malformed(line, e.to_string()))
    }
}

/// Read and validate every record of the JTL file at `path`.
pub fn read_jtl(path: &Path) -> Result<Vec<Sample>> {
    let source = path.display().to_string();
    let file = File::open(path).map_err(|e| LoadReportError::ReadFailure {
        path: source.clone(),
        reason: e.to_string(),
    })?;
    let samples = parse(file, &source)?;
    info!(path = %source, samples = samples.len(), "log loaded");
    Ok(samples)
}

/// Parse JTL CSV (header row required) from any reader.
///
/// The first invalid record aborts the whole parse; no rows are skipped.
/// A header-only input yields an empty vector.
pub fn parse_jtl<R: Read>(reader: R) -> Result<Vec<Sample>> {
    parse(reader, "<input>")
}

fn parse<R: Read>(reader: R, source: &str) -> Result<Vec<Sample>> {
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let headers: StringRecord = rdr.headers().map_err(|e| csv_error(e, source))?.clone();

    let mut samples = Vec::new();
    for row in rdr.records() {
        let row = row.map_err(|e| csv_error(e, source))?;
        let line = row.position().map(|p| p.line()).unwrap_or_default();
        let record: JtlRecord = row
            .deserialize(Some(&headers))
            .map_err(|e| malformed(line, deserialize_reason(&e)))?;
        samples.push(record.into_sample(line)?);
    }
    Ok(samples)
}

fn parse_count(field: &str, raw: &str, line: u64) -> Result<u64> {
    raw.parse().map_err(|_| malformed(line, format!("invalid {field} {raw:?}")))
}

/// `true`/`false` in any case; anything else is rejected rather than read as a failure.
fn parse_success(raw: &str) -> Option<bool> {
    if raw.eq_ignore_ascii_case("true") {
        Some(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn malformed(line: u64, reason: String) -> LoadReportError {
    LoadReportError::MalformedSample { line, reason }
}

fn csv_error(e: csv::Error, source: &str) -> LoadReportError {
    if e.is_io_error() {
        return LoadReportError::ReadFailure { path: source.to_string(), reason: e.to_string() };
    }
    let line = e.position().map(|p| p.line()).unwrap_or_default();
    malformed(line, e.to_string())
}

// csv prefixes deserialize errors with record/field positions we already report.
fn deserialize_reason(e: &csv::Error) -> String {
    match e.kind() {
        csv::ErrorKind::Deserialize { err, .. } => err.to_string(),
        _ => e.to_string(),
    }
}
