//! symlen CLI library - result rendering and the analysis entry point shared
//! by the binary and its integration tests.

pub mod format;
pub mod sink;

use std::io::Write;

use anyhow::{Context, Result};
use parser::IdentifierAggregator;
use scheduler::{Scheduler, SchedulerError};
use symlen_core::{Config, Target};
use tracing::{debug, info};

pub use sink::{ResultSink, SinkReport};

/// Scheduler over the tree-sitter aggregator, sized from `config`
pub fn build_scheduler(config: &Config) -> Result<Scheduler<IdentifierAggregator>, SchedulerError> {
  Scheduler::new(
    IdentifierAggregator::new(config.walk.clone()),
    config.scheduler.concurrency_limit,
  )
}

/// Analyze `targets` and render every outcome into `out` / `err`.
///
/// Startup problems (bad limit) are errors; per-target failures only show up
/// in the returned report.
pub async fn run_analysis<O, E>(targets: Vec<Target>, config: &Config, out: O, err: E) -> Result<SinkReport>
where
  O: Write,
  E: Write,
{
  let scheduler = build_scheduler(config).context("Invalid scheduler configuration")?;
  info!(targets = targets.len(), limit = scheduler.limit(), "Analyzing targets");

  let mut outcomes = scheduler.run(targets);
  let mut sink = ResultSink::new(config.output.format, out, err);
  let report = sink.drain(&mut outcomes).await.context("Failed to write results")?;
  let summary = outcomes.finish().await?;

  debug!(dispatched = summary.dispatched, rendered = report.total(), "Outcome stream closed");
  info!(
    succeeded = report.succeeded,
    failed = report.failed,
    empty = report.empty,
    "Analysis complete"
  );
  Ok(report)
}
