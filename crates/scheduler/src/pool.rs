//! Bounded worker pool.
//!
//! ```text
//! targets ──► dispatcher ──permit──► unit of work (blocking pool) ──► channel(limit) ──► consumer
//!                 ▲                          │
//!                 └──────── permit released ─┘
//! ```
//!
//! The dispatcher holds at most `limit` permits out at once. Once every target
//! is dispatched it re-acquires all `limit` permits, which can only succeed
//! after every unit has pushed its outcome, and only then drops its sender so
//! the stream closes.

use std::sync::Arc;

use symlen_core::{Aggregator, ParseCause, ParseError, Target, WorkItem};
use tokio::{
  sync::{OwnedSemaphorePermit, Semaphore, mpsc},
  task::JoinHandle,
};
use tracing::{debug, trace, warn};

#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
  #[error("concurrency limit must be between 1 and {} (got {limit})", u32::MAX)]
  InvalidLimit { limit: usize },
  #[error("dispatcher failed: {message}")]
  Dispatcher { message: String },
}

/// What the dispatcher did, available once the stream has closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchSummary {
  pub dispatched: usize,
}

/// Runs an [`Aggregator`] over many targets with at most `limit` in flight.
pub struct Scheduler<A> {
  aggregator: Arc<A>,
  limit: u32,
}

impl<A: Aggregator> Scheduler<A> {
  pub fn new(aggregator: A, limit: usize) -> Result<Self, SchedulerError> {
    let limit = match u32::try_from(limit) {
      Ok(l) if l > 0 => l,
      _ => return Err(SchedulerError::InvalidLimit { limit }),
    };
    Ok(Self {
      aggregator: Arc::new(aggregator),
      limit,
    })
  }

  pub fn limit(&self) -> usize {
    self.limit as usize
  }

  /// Start processing `targets` and return the outcome stream.
  ///
  /// Must be called from within a tokio runtime. Outcomes arrive in
  /// completion order; exactly one per target.
  pub fn run<I>(&self, targets: I) -> Outcomes
  where
    I: IntoIterator<Item = Target>,
    I::IntoIter: Send + 'static,
  {
    let capacity = self.limit as usize;
    let (tx, rx) = mpsc::channel(capacity);
    let semaphore = Arc::new(Semaphore::new(capacity));

    let dispatcher = tokio::spawn(dispatch(
      self.aggregator.clone(),
      targets.into_iter(),
      self.limit,
      semaphore,
      tx,
    ));

    Outcomes { rx, dispatcher }
  }
}

/// Receiving end of a scheduler run.
pub struct Outcomes {
  rx: mpsc::Receiver<WorkItem>,
  dispatcher: JoinHandle<DispatchSummary>,
}

impl Outcomes {
  /// Next completed outcome, or `None` once every dispatched target has reported.
  pub async fn recv(&mut self) -> Option<WorkItem> {
    self.rx.recv().await
  }

  /// Drain the remaining outcomes into a vector.
  pub async fn collect(mut self) -> Vec<WorkItem> {
    let mut items = Vec::new();
    while let Some(item) = self.rx.recv().await {
      items.push(item);
    }
    items
  }

  /// Stop receiving and wait for the dispatcher to drain.
  ///
  /// Outcomes not yet received are discarded; in-flight units still run to
  /// completion.
  pub async fn finish(self) -> Result<DispatchSummary, SchedulerError> {
    let Outcomes { rx, dispatcher } = self;
    drop(rx);
    dispatcher.await.map_err(|e| SchedulerError::Dispatcher { message: e.to_string() })
  }
}

async fn dispatch<A, I>(
  aggregator: Arc<A>,
  targets: I,
  limit: u32,
  semaphore: Arc<Semaphore>,
  tx: mpsc::Sender<WorkItem>,
) -> DispatchSummary
where
  A: Aggregator,
  I: Iterator<Item = Target>,
{
  let mut dispatched = 0;

  for target in targets {
    let permit = match semaphore.clone().acquire_owned().await {
      Ok(permit) => permit,
      Err(_) => {
        warn!(dispatched, "Permit pool closed, stopping dispatch");
        break;
      }
    };
    trace!(path = %target, available = semaphore.available_permits(), "Dispatching target");

    tokio::spawn(run_unit(aggregator.clone(), target, tx.clone(), permit));
    dispatched += 1;
  }

  debug!(dispatched, limit, "All targets dispatched, draining");
  match semaphore.acquire_many(limit).await {
    Ok(_all) => debug!(dispatched, "Drained, closing outcome stream"),
    Err(_) => warn!("Permit pool closed while draining"),
  }
  drop(tx);

  DispatchSummary { dispatched }
}

async fn run_unit<A: Aggregator>(
  aggregator: Arc<A>,
  target: Target,
  tx: mpsc::Sender<WorkItem>,
  permit: OwnedSemaphorePermit,
) {
  let job_target = target.clone();
  let outcome = match tokio::task::spawn_blocking(move || aggregator.aggregate(&job_target)).await {
    Ok(outcome) => outcome,
    Err(e) => {
      warn!(path = %target, error = %e, "Aggregator worker failed");
      Err(ParseError::new(
        target.clone(),
        ParseCause::Worker { message: e.to_string() },
      ))
    }
  };

  if tx.send(WorkItem { target, outcome }).await.is_err() {
    trace!("Outcome receiver dropped, discarding result");
  }

  // Sender goes before the permit: once the drain holds every permit, no
  // unit can still be holding a sender.
  drop(tx);
  drop(permit);
}
