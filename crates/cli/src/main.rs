//! symlen - identifier length statistics for source trees

use anyhow::{Context, Result};
use clap::Parser;
use std::{path::PathBuf, process::ExitCode};
use symlen_core::{Config, Language, OutputFormat};

mod commands;
mod logging;

use commands::cmd_analyze;
use logging::{effective_level, init_cli_logging};

#[derive(Parser, Debug)]
#[command(name = "symlen")]
#[command(version, about = "Identifier length statistics for source trees")]
#[command(after_help = "\
EXAMPLES:
  symlen src/                     # One line for the src tree
  symlen -j 4 crates/*            # At most 4 trees in flight
  symlen --json --language go .   # Go files only, JSON lines

OUTPUT:
  One line per target on stdout, in completion order.
  Failed targets are reported on stderr and the exit status is 1.

CONFIG LOCATIONS:
  Project: ./symlen.toml
  User:    ~/.config/symlen/config.toml")]
struct Cli {
  /// Source trees (or single files) to analyze
  #[arg(required = true, value_name = "PATH")]
  paths: Vec<PathBuf>,

  /// Maximum number of targets analyzed concurrently (default: CPUs x 16)
  #[arg(short = 'j', long = "jobs", value_name = "N")]
  jobs: Option<usize>,

  /// Emit JSON lines instead of text
  #[arg(long)]
  json: bool,

  /// Only parse files of this language (repeatable)
  #[arg(short, long = "language", value_name = "LANG")]
  languages: Vec<Language>,

  /// Include hidden files and directories
  #[arg(long)]
  hidden: bool,

  /// Do not honour .gitignore / .ignore files
  #[arg(long)]
  no_ignore: bool,

  /// Follow symbolic links
  #[arg(long)]
  follow_links: bool,

  /// Maximum directory depth below each target (1 = target directory only)
  #[arg(long, value_name = "N")]
  max_depth: Option<usize>,

  /// Config file to use instead of ./symlen.toml or the user config
  #[arg(long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// More log output (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  verbose: u8,

  /// Only log errors
  #[arg(short, long, conflicts_with = "verbose")]
  quiet: bool,
}

impl Cli {
  /// Fold command-line overrides into the loaded config
  fn apply(&self, config: &mut Config) {
    if let Some(jobs) = self.jobs {
      config.scheduler.concurrency_limit = jobs;
    }
    if self.json {
      config.output.format = OutputFormat::Json;
    }
    if !self.languages.is_empty() {
      config.walk.languages = self.languages.clone();
    }
    if self.hidden {
      config.walk.hidden = true;
    }
    if self.no_ignore {
      config.walk.git_ignore = false;
    }
    if self.follow_links {
      config.walk.follow_links = true;
    }
    if self.max_depth.is_some() {
      config.walk.max_depth = self.max_depth;
    }
  }

  fn load_config(&self) -> Result<Config> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let mut config = Config::load(self.config.as_deref(), &cwd).context("Failed to load configuration")?;
    self.apply(&mut config);
    config.validate().context("Invalid configuration")?;
    Ok(config)
  }
}

#[tokio::main]
async fn main() -> ExitCode {
  let cli = Cli::parse();

  // Configuration problems are fatal before anything is dispatched
  let config = match cli.load_config() {
    Ok(config) => config,
    Err(e) => {
      eprintln!("Error: {e:#}");
      return ExitCode::from(2);
    }
  };

  init_cli_logging(effective_level(&config.log.level, cli.verbose, cli.quiet));

  match cmd_analyze(cli.paths, &config).await {
    Ok(code) => ExitCode::from(code),
    Err(e) => {
      eprintln!("Error: {e:#}");
      ExitCode::from(2)
    }
  }
}
