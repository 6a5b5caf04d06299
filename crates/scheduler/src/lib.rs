//! Bounded worker pool for symlen.
//!
//! Fans targets out to an [`Aggregator`](symlen_core::Aggregator) with a fixed
//! concurrency limit and streams one [`WorkItem`](symlen_core::WorkItem) per
//! target back to a single consumer in completion order.

mod pool;

pub use pool::{DispatchSummary, Outcomes, Scheduler, SchedulerError};
