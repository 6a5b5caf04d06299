//! Rendering of per-target outcomes.
//!
//! Text output is one line per target; JSON output is one object per line.

use serde::Serialize;
use symlen_core::{ParseError, StatsRecord, Target};

/// Marker printed in place of an undefined average or minimum
pub const NO_DATA: &str = "no data";

// ============================================================================
// Text
// ============================================================================

/// `target: identifiers: N total: N average: F min: N max: N ("longest")`
pub fn format_record(record: &StatsRecord) -> String {
  let average = record
    .average()
    .map(|avg| format!("{avg:.5}"))
    .unwrap_or_else(|| NO_DATA.to_string());
  let min = record
    .min_len()
    .map(|min| min.to_string())
    .unwrap_or_else(|| "-".to_string());

  format!(
    "{}: identifiers: {} total: {} average: {} min: {} max: {} ({:?})",
    record.name, record.count, record.total, average, min, record.max, record.longest
  )
}

pub fn format_failure(error: &ParseError) -> String {
  format!("error: {error}")
}

// ============================================================================
// JSON
// ============================================================================

#[derive(Serialize)]
struct RecordLine<'a> {
  target: &'a Target,
  count: u64,
  total: u64,
  average: Option<f64>,
  min: Option<u64>,
  max: u64,
  longest: &'a str,
}

#[derive(Serialize)]
struct FailureLine<'a> {
  target: &'a Target,
  error: String,
}

pub fn format_record_json(record: &StatsRecord) -> serde_json::Result<String> {
  let line = RecordLine {
    target: &record.name,
    count: record.count,
    total: record.total,
    average: record.average(),
    min: record.min_len(),
    max: record.max,
    longest: &record.longest,
  };
  serde_json::to_string(&line)
}

pub fn format_failure_json(error: &ParseError) -> serde_json::Result<String> {
  let line = FailureLine {
    target: &error.target,
    error: error.cause.to_string(),
  };
  serde_json::to_string(&line)
}
