use std::{io, path::PathBuf};

use crate::{Language, Target};

/// Failure to aggregate one target. Never fatal to the batch.
#[derive(Debug, thiserror::Error)]
#[error("{target}: {cause}")]
pub struct ParseError {
  pub target: Target,
  #[source]
  pub cause: ParseCause,
}

#[derive(Debug, thiserror::Error)]
pub enum ParseCause {
  /// Target path does not exist.
  #[error("no such file or directory")]
  NotFound,
  /// A source file could not be read.
  #[error("cannot read {}: {source}", path.display())]
  Unreadable {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
  /// Directory traversal failed.
  #[error("walk failed: {message}")]
  Walk { message: String },
  /// A source file contains syntax errors. Position is 1-based.
  #[error("syntax error in {}:{line}:{column}", path.display())]
  Syntax { path: PathBuf, line: usize, column: usize },
  /// The grammar for a detected language failed to load.
  #[error("no usable grammar for {language}")]
  Grammar { language: Language },
  /// The unit of work died before producing a record.
  #[error("worker failed: {message}")]
  Worker { message: String },
}

impl ParseError {
  pub fn new(target: Target, cause: ParseCause) -> Self {
    Self { target, cause }
  }
}

/// Startup-time configuration failure.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  #[error("cannot read config {}: {source}", path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
  #[error("invalid config {}: {source}", path.display())]
  Parse {
    path: PathBuf,
    #[source]
    source: toml::de::Error,
  },
  #[error("concurrency limit must be at least 1 (got {0})")]
  InvalidLimit(usize),
  #[error("max depth must be at least 1 (got 0)")]
  InvalidMaxDepth,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parse_error_display_includes_target_and_cause() {
    let err = ParseError::new(
      Target::from("pkg/b"),
      ParseCause::Syntax {
        path: PathBuf::from("pkg/b/main.go"),
        line: 3,
        column: 7,
      },
    );
    assert_eq!(err.to_string(), "pkg/b: syntax error in pkg/b/main.go:3:7");
  }

  #[test]
  fn test_unreadable_keeps_io_source() {
    use std::error::Error;

    let err = ParseError::new(
      Target::from("a"),
      ParseCause::Unreadable {
        path: PathBuf::from("a/x.rs"),
        source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
      },
    );
    let cause = err.source().expect("cause attached");
    assert!(cause.source().is_some());
  }
}
