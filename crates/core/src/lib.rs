//! Core types for symlen: targets, statistics records, errors and configuration.

mod code;
pub mod config;
mod error;
mod stats;
mod work;

pub use code::Language;
pub use config::{Config, LogConfig, OutputConfig, OutputFormat, SchedulerConfig, WalkConfig};
pub use error::{ConfigError, ParseCause, ParseError};
pub use stats::StatsRecord;
pub use work::{Aggregator, Target, WorkItem};
