//! Units of work and the aggregation contract the scheduler drives.

use serde::{Deserialize, Serialize};
use std::{
  fmt,
  path::{Path, PathBuf},
};

use crate::{ParseError, StatsRecord};

/// A source tree (or single file) analyzed independently of every other target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Target(PathBuf);

impl Target {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self(path.into())
  }

  pub fn path(&self) -> &Path {
    &self.0
  }
}

impl fmt::Display for Target {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0.display())
  }
}

impl From<&str> for Target {
  fn from(path: &str) -> Self {
    Self::new(path)
  }
}

impl From<PathBuf> for Target {
  fn from(path: PathBuf) -> Self {
    Self(path)
  }
}

/// A dispatched target paired with its outcome.
#[derive(Debug)]
pub struct WorkItem {
  pub target: Target,
  pub outcome: Result<StatsRecord, ParseError>,
}

impl WorkItem {
  pub fn is_ok(&self) -> bool {
    self.outcome.is_ok()
  }
}

/// Produces the statistics record for one target.
///
/// Implementations run on blocking worker threads, possibly many at once, so
/// any state they keep must be per call.
pub trait Aggregator: Send + Sync + 'static {
  fn aggregate(&self, target: &Target) -> Result<StatsRecord, ParseError>;
}

impl<F> Aggregator for F
where
  F: Fn(&Target) -> Result<StatsRecord, ParseError> + Send + Sync + 'static,
{
  fn aggregate(&self, target: &Target) -> Result<StatsRecord, ParseError> {
    self(target)
  }
}
