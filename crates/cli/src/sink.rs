//! Result sink: drains a scheduler run and renders every outcome.

use std::io::Write;

use scheduler::Outcomes;
use symlen_core::{OutputFormat, WorkItem};
use tracing::{debug, warn};

use crate::format::{format_failure, format_failure_json, format_record, format_record_json};

/// Tally of a drained run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SinkReport {
  pub succeeded: usize,
  pub failed: usize,
  /// Succeeded targets without a single identifier
  pub empty: usize,
}

impl SinkReport {
  pub fn total(&self) -> usize {
    self.succeeded + self.failed
  }

  /// 0 when every target succeeded, 1 when any failed
  pub fn exit_code(&self) -> u8 {
    if self.failed == 0 { 0 } else { 1 }
  }
}

/// Writes records to `out` and failures to `err`.
///
/// A failed target is reported and skipped; it never stops the drain.
pub struct ResultSink<O, E> {
  format: OutputFormat,
  out: O,
  err: E,
  report: SinkReport,
}

impl<O: Write, E: Write> ResultSink<O, E> {
  pub fn new(format: OutputFormat, out: O, err: E) -> Self {
    Self {
      format,
      out,
      err,
      report: SinkReport::default(),
    }
  }

  /// Render outcomes until the stream closes.
  pub async fn drain(&mut self, outcomes: &mut Outcomes) -> std::io::Result<SinkReport> {
    while let Some(item) = outcomes.recv().await {
      self.render(item)?;
    }
    self.out.flush()?;
    self.err.flush()?;
    Ok(self.report)
  }

  /// Write one outcome. Write and serialization failures are returned as I/O errors.
  pub fn render(&mut self, item: WorkItem) -> std::io::Result<()> {
    match item.outcome {
      Ok(record) => {
        self.report.succeeded += 1;
        if record.is_empty() {
          self.report.empty += 1;
          warn!(path = %record.name, "No identifiers found, average undefined");
        }
        let line = match self.format {
          OutputFormat::Text => format_record(&record),
          OutputFormat::Json => format_record_json(&record)?,
        };
        writeln!(self.out, "{line}")
      }
      Err(error) => {
        self.report.failed += 1;
        debug!(path = %item.target, error = %error.cause, "Target failed");
        let line = match self.format {
          OutputFormat::Text => format_failure(&error),
          OutputFormat::Json => format_failure_json(&error)?,
        };
        writeln!(self.err, "{line}")
      }
    }
  }

  pub fn report(&self) -> SinkReport {
    self.report
  }

  pub fn into_writers(self) -> (O, E) {
    (self.out, self.err)
  }
}
