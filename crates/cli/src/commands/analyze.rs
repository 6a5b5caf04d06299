//! Identifier statistics for the requested source trees

use anyhow::Result;
use cli::run_analysis;
use std::io;
use symlen_core::{Config, Target};

/// Analyze every path and print one line per target.
///
/// Returns the process exit status: 0 when all targets succeeded, 1 otherwise.
pub async fn cmd_analyze(paths: Vec<std::path::PathBuf>, config: &Config) -> Result<u8> {
  let targets: Vec<Target> = paths.into_iter().map(Target::from).collect();
  let report = run_analysis(targets, config, io::stdout(), io::stderr()).await?;
  Ok(report.exit_code())
}
