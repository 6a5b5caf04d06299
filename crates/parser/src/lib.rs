//! Tree-sitter based identifier statistics for symlen
//!
//! This crate provides the per-target aggregation step:
//! - Walking a source tree (gitignore aware, file-name ordered)
//! - Parsing each file with the grammar matching its extension
//! - Folding every identifier token into a [`StatsRecord`](symlen_core::StatsRecord)
//!
//! # Example
//! ```ignore
//! use parser::IdentifierAggregator;
//! use symlen_core::{Aggregator, Target};
//!
//! let record = IdentifierAggregator::default().aggregate(&Target::from("src"))?;
//! println!("{} identifiers, longest {:?}", record.count, record.longest);
//! ```

mod aggregate;
mod parser;

pub use aggregate::IdentifierAggregator;
pub use parser::{TreeSitterParser, for_each_identifier, is_identifier};

// Re-export for convenience
pub use symlen_core::{Language, ParseCause, ParseError};
