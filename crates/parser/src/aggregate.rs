//! Identifier statistics for a whole source tree.

use std::path::PathBuf;

use ignore::WalkBuilder;
use tracing::{debug, trace};

use symlen_core::{Aggregator, Language, ParseCause, ParseError, StatsRecord, Target, WalkConfig};

use crate::TreeSitterParser;

/// Walks a target, parses every supported source file and counts identifiers.
///
/// Each call builds its own parser and record, so one instance can be shared
/// by every worker.
#[derive(Debug, Clone, Default)]
pub struct IdentifierAggregator {
  walk: WalkConfig,
}

impl IdentifierAggregator {
  pub fn new(walk: WalkConfig) -> Self {
    Self { walk }
  }

  /// Source files of `target` in file-name order, with their detected language.
  pub fn source_files(&self, target: &Target) -> Result<Vec<(PathBuf, Language)>, ParseCause> {
    let root = target.path();
    if !root.exists() {
      return Err(ParseCause::NotFound);
    }

    let filters = self.walk.git_ignore;
    let walker = WalkBuilder::new(root)
      .hidden(!self.walk.hidden)
      .ignore(filters)
      .parents(filters)
      .git_ignore(filters)
      .git_global(filters)
      .git_exclude(filters)
      .follow_links(self.walk.follow_links)
      .max_depth(self.walk.max_depth)
      .max_filesize(Some(self.walk.max_file_size))
      .sort_by_file_name(|a, b| a.cmp(b))
      .build();

    let mut files = Vec::new();
    for entry in walker {
      let entry = entry.map_err(|e| ParseCause::Walk { message: e.to_string() })?;
      if !entry.file_type().is_some_and(|t| t.is_file()) {
        continue;
      }

      let path = entry.path();
      let Some(lang) = path
        .extension()
        .and_then(|e| e.to_str())
        .and_then(Language::from_extension)
      else {
        trace!(file = %path.display(), "No grammar for extension, skipping");
        continue;
      };

      if !self.walk.accepts(lang) {
        trace!(file = %path.display(), %lang, "Language filtered out");
        continue;
      }

      files.push((path.to_path_buf(), lang));
    }

    Ok(files)
  }

  fn aggregate_files(&self, target: &Target) -> Result<StatsRecord, ParseCause> {
    let files = self.source_files(target)?;
    let mut parser = TreeSitterParser::new();
    let mut record = StatsRecord::new(target.clone());

    for (path, lang) in &files {
      let content = std::fs::read_to_string(path).map_err(|source| ParseCause::Unreadable {
        path: path.clone(),
        source,
      })?;
      parser.count_identifiers(path, &content, *lang, &mut record)?;
    }

    debug!(
      root = %target,
      files = files.len(),
      identifiers = record.count,
      "Aggregated target"
    );
    Ok(record)
  }
}

impl Aggregator for IdentifierAggregator {
  fn aggregate(&self, target: &Target) -> Result<StatsRecord, ParseError> {
    self
      .aggregate_files(target)
      .map_err(|cause| ParseError::new(target.clone(), cause))
  }
}
