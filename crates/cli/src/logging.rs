//! Logging setup for the CLI

use tracing_subscriber::{
  EnvFilter,
  filter::{Directive, LevelFilter},
};

/// Parse log level from config string
pub fn parse_log_level(level: &str) -> Option<tracing::Level> {
  match level.to_lowercase().as_str() {
    "off" => None,
    "error" => Some(tracing::Level::ERROR),
    "warn" => Some(tracing::Level::WARN),
    "info" => Some(tracing::Level::INFO),
    "debug" => Some(tracing::Level::DEBUG),
    "trace" => Some(tracing::Level::TRACE),
    _ => Some(tracing::Level::WARN),
  }
}

/// Apply `-v`/`-q` on top of the configured level
pub fn effective_level(configured: &str, verbose: u8, quiet: bool) -> Option<tracing::Level> {
  if quiet {
    return Some(tracing::Level::ERROR);
  }
  match verbose {
    0 => parse_log_level(configured),
    1 => Some(tracing::Level::INFO),
    2 => Some(tracing::Level::DEBUG),
    _ => Some(tracing::Level::TRACE),
  }
}

/// Initialize console logging on stderr. `RUST_LOG` overrides the level.
pub fn init_cli_logging(level: Option<tracing::Level>) {
  let directive: Directive = match level {
    Some(level) => LevelFilter::from_level(level).into(),
    None => LevelFilter::OFF.into(),
  };

  let env_filter = EnvFilter::builder().with_default_directive(directive).from_env_lossy();

  tracing_subscriber::fmt()
    .with_env_filter(env_filter)
    .with_target(false)
    .with_writer(std::io::stderr)
    .init();
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parse_log_level() {
    assert_eq!(parse_log_level("DEBUG"), Some(tracing::Level::DEBUG));
    assert_eq!(parse_log_level("off"), None);
    assert_eq!(parse_log_level("bogus"), Some(tracing::Level::WARN));
  }

  #[test]
  fn test_flags_override_config() {
    assert_eq!(effective_level("off", 2, false), Some(tracing::Level::DEBUG));
    assert_eq!(effective_level("trace", 0, true), Some(tracing::Level::ERROR));
    assert_eq!(effective_level("info", 0, false), Some(tracing::Level::INFO));
    assert_eq!(effective_level("warn", 9, false), Some(tracing::Level::TRACE));
  }
}
