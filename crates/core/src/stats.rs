//! Per-target identifier statistics.

use crate::Target;

/// Identifier length statistics for one target.
///
/// Lengths are counted in Unicode scalar values. `min` holds `u64::MAX` until the
/// first identifier is observed; use [`StatsRecord::min_len`] to read it safely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsRecord {
  pub name: Target,
  pub count: u64,
  pub total: u64,
  pub min: u64,
  pub max: u64,
  /// First identifier seen at the current `max` length
  pub longest: String,
}

impl StatsRecord {
  pub fn new(name: Target) -> Self {
    Self {
      name,
      count: 0,
      total: 0,
      min: u64::MAX,
      max: 0,
      longest: String::new(),
    }
  }

  /// Fold one identifier into the record.
  ///
  /// Only a strictly longer identifier replaces `longest`, so ties keep the
  /// first holder in traversal order.
  pub fn observe(&mut self, identifier: &str) {
    let len = identifier.chars().count() as u64;
    self.count += 1;
    self.total += len;
    self.min = self.min.min(len);
    if len > self.max {
      self.max = len;
      self.longest.clear();
      self.longest.push_str(identifier);
    }
  }

  pub fn is_empty(&self) -> bool {
    self.count == 0
  }

  /// Mean identifier length, `None` when no identifier was observed.
  pub fn average(&self) -> Option<f64> {
    if self.count == 0 {
      return None;
    }
    Some(self.total as f64 / self.count as f64)
  }

  pub fn min_len(&self) -> Option<u64> {
    (self.count > 0).then_some(self.min)
  }
}
