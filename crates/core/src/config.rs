//! Configuration for symlen.
//!
//! Config priority: explicit `--config` file > project (./symlen.toml) > user (~/.config/symlen/config.toml)
//! > built-in defaults. A config file that exists but cannot be read or parsed is a startup error.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{ConfigError, Language};

/// File name looked up in the project directory
pub const PROJECT_CONFIG_FILE: &str = "symlen.toml";

/// Concurrent targets per available CPU when no limit is configured
pub const JOBS_PER_CPU: usize = 16;

// ============================================================================
// Scheduler Configuration
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
  /// Maximum number of targets analyzed at once.
  /// Default: available parallelism * 16
  #[serde(default = "default_concurrency_limit")]
  pub concurrency_limit: usize,
}

pub fn default_concurrency_limit() -> usize {
  num_cpus::get().max(1) * JOBS_PER_CPU
}

impl Default for SchedulerConfig {
  fn default() -> Self {
    Self {
      concurrency_limit: default_concurrency_limit(),
    }
  }
}

// ============================================================================
// Walk Configuration
// ============================================================================

/// Which files inside a target are parsed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkConfig {
  /// Include dot-files and dot-directories
  pub hidden: bool,
  /// Honour .gitignore, .ignore and git exclude files
  #[serde(default = "default_true")]
  pub git_ignore: bool,
  pub follow_links: bool,
  /// Directory depth below the target root; unset walks the whole tree
  pub max_depth: Option<usize>,
  /// Files larger than this many bytes are skipped
  #[serde(default = "default_max_file_size")]
  pub max_file_size: u64,
  /// Restrict parsing to these languages (empty = all supported)
  pub languages: Vec<Language>,
}

fn default_true() -> bool {
  true
}
fn default_max_file_size() -> u64 {
  4 * 1024 * 1024
}

impl Default for WalkConfig {
  fn default() -> Self {
    Self {
      hidden: false,
      git_ignore: default_true(),
      follow_links: false,
      max_depth: None,
      max_file_size: default_max_file_size(),
      languages: Vec::new(),
    }
  }
}

impl WalkConfig {
  /// Whether files of `lang` should be parsed under this config
  pub fn accepts(&self, lang: Language) -> bool {
    self.languages.is_empty() || self.languages.contains(&lang)
  }
}

// ============================================================================
// Output / Log Configuration
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
  #[default]
  Text,
  Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OutputConfig {
  pub format: OutputFormat,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
  /// Log level: "off", "error", "warn", "info", "debug", "trace"
  /// Default: "warn"
  #[serde(default = "default_log_level")]
  pub level: String,
}

fn default_log_level() -> String {
  "warn".to_string()
}

impl Default for LogConfig {
  fn default() -> Self {
    Self {
      level: default_log_level(),
    }
  }
}

// ============================================================================
// Main Configuration
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
  pub scheduler: SchedulerConfig,
  pub walk: WalkConfig,
  pub output: OutputConfig,
  pub log: LogConfig,
}

impl Config {
  /// Resolve the effective config: `explicit` if given, otherwise project then user file.
  pub fn load(explicit: Option<&Path>, project_path: &Path) -> Result<Self, ConfigError> {
    if let Some(path) = explicit {
      return Self::from_file(path);
    }
    Self::load_for_project(project_path)
  }

  /// Load config for a project, with fallback to user config
  pub fn load_for_project(project_path: &Path) -> Result<Self, ConfigError> {
    let project_config = Self::project_config_path(project_path);
    if project_config.exists() {
      return Self::from_file(&project_config);
    }

    if let Some(user_config_path) = Self::user_config_path()
      && user_config_path.exists()
    {
      return Self::from_file(&user_config_path);
    }

    Ok(Self::default())
  }

  pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
      path: path.to_path_buf(),
      source,
    })?;
    let config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
      path: path.to_path_buf(),
      source,
    })?;
    config.validate()?;
    Ok(config)
  }

  /// Get the user-level config path
  pub fn user_config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("SYMLEN_CONFIG_DIR") {
      return Some(PathBuf::from(path).join("config.toml"));
    }

    if let Ok(path) = std::env::var("XDG_CONFIG_HOME") {
      return Some(PathBuf::from(path).join("symlen").join("config.toml"));
    }

    dirs::config_dir().map(|p: PathBuf| p.join("symlen").join("config.toml"))
  }

  /// Get the project-relative config path
  pub fn project_config_path(project_path: &Path) -> PathBuf {
    project_path.join(PROJECT_CONFIG_FILE)
  }

  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.scheduler.concurrency_limit == 0 {
      return Err(ConfigError::InvalidLimit(0));
    }
    if self.walk.max_depth == Some(0) {
      return Err(ConfigError::InvalidMaxDepth);
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;
  use tempfile::TempDir;

  #[test]
  fn test_default_limit_scales_with_cpus() {
    let config = Config::default();
    assert!(config.scheduler.concurrency_limit >= JOBS_PER_CPU);
    assert_eq!(config.scheduler.concurrency_limit % JOBS_PER_CPU, 0);
  }

  #[test]
  fn test_partial_file_keeps_defaults() {
    let config: Config = toml::from_str(
      r#"
[walk]
max_depth = 1
languages = ["go", "rust"]
"#,
    )
    .unwrap();

    assert_eq!(config.walk.max_depth, Some(1));
    assert_eq!(config.walk.languages, vec![Language::Go, Language::Rust]);
    assert!(config.walk.git_ignore);
    assert_eq!(config.walk.max_file_size, 4 * 1024 * 1024);
    assert_eq!(config.output.format, OutputFormat::Text);
    assert_eq!(config.log.level, "warn");
    assert_eq!(config.scheduler, SchedulerConfig::default());
  }

  #[test]
  fn test_project_config_is_loaded() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
      dir.path().join(PROJECT_CONFIG_FILE),
      "[scheduler]\nconcurrency_limit = 3\n\n[output]\nformat = \"json\"\n",
    )
    .unwrap();

    let config = Config::load_for_project(dir.path()).unwrap();
    assert_eq!(config.scheduler.concurrency_limit, 3);
    assert_eq!(config.output.format, OutputFormat::Json);
  }

  #[test]
  fn test_zero_limit_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("zero.toml");
    std::fs::write(&path, "[scheduler]\nconcurrency_limit = 0\n").unwrap();

    let err = Config::load(Some(&path), dir.path()).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidLimit(0)));
  }

  #[test]
  fn test_zero_max_depth_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("shallow.toml");
    std::fs::write(&path, "[walk]\nmax_depth = 0\n").unwrap();

    let err = Config::load(Some(&path), dir.path()).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidMaxDepth), "got {err:?}");

    let mut config = Config::default();
    config.walk.max_depth = Some(1);
    assert!(config.validate().is_ok());
  }

  #[test]
  fn test_malformed_config_is_an_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(PROJECT_CONFIG_FILE), "[scheduler\nconcurrency_limit = ").unwrap();

    let err = Config::load_for_project(dir.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }), "got {err:?}");
  }

  #[test]
  fn test_missing_explicit_config_is_an_error() {
    let dir = TempDir::new().unwrap();
    let err = Config::load(Some(&dir.path().join("nope.toml")), dir.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
  }

  #[test]
  fn test_walk_accepts_all_when_unfiltered() {
    let walk = WalkConfig::default();
    assert!(Language::ALL.iter().all(|l| walk.accepts(*l)));

    let go_only = WalkConfig {
      languages: vec![Language::Go],
      ..Default::default()
    };
    assert!(go_only.accepts(Language::Go));
    assert!(!go_only.accepts(Language::Rust));
  }
}
