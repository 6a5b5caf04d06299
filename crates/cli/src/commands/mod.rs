//! Command implementations

mod analyze;

pub use analyze::cmd_analyze;
