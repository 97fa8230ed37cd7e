//! Bounded worker pool that turns records into a folded [`OutcomeTally`].
//!
//! Workers are scoped threads pulling the next record index from a shared
//! cursor, so at most `max_workers` records are in flight no matter how large
//! the input is. Every record taken yields exactly one outcome; a panicking
//! processor is reported as an `Error` outcome for that record.

use std::fmt;
use std::num::NonZeroUsize;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use std::time::Instant;

use qrbatch_model::{OutcomeKind, OutcomeTally, RecordOutcome};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Lifecycle of a [`BatchCoordinator`]. A coordinator runs at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchState {
    Idle,
    Running,
    Completed,
    Cancelled,
}

impl fmt::Display for BatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("batch already started (state: {state})")]
    AlreadyStarted { state: BatchState },

    #[error("batch cancelled after {processed} of {total} records")]
    Cancelled { processed: usize, total: usize },
}

/// Cooperative cancellation shared between the caller and the workers.
///
/// Workers check the flag before taking each record; records already in
/// flight run to completion.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Snapshot passed to the observer after each outcome is folded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchProgress {
    pub completed: usize,
    pub total: usize,
    pub last: OutcomeKind,
}

#[derive(Debug)]
pub struct BatchCoordinator {
    max_workers: NonZeroUsize,
    state: BatchState,
}

impl BatchCoordinator {
    pub fn new(max_workers: NonZeroUsize) -> Self {
        Self {
            max_workers,
            state: BatchState::Idle,
        }
    }

    pub fn state(&self) -> BatchState {
        self.state
    }

    pub fn max_workers(&self) -> NonZeroUsize {
        self.max_workers
    }

    /// Processes every item and returns the folded tally.
    ///
    /// `process` receives the item's index and the item. `observe` is called
    /// under the tally lock after each fold, so progress callbacks never
    /// interleave.
    pub fn run<T, P, O>(
        &mut self,
        items: &[T],
        cancel: Option<&CancelFlag>,
        process: P,
        observe: O,
    ) -> Result<OutcomeTally, BatchError>
    where
        T: Sync,
        P: Fn(usize, &T) -> RecordOutcome + Sync,
        O: Fn(&BatchProgress) + Sync,
    {
        if self.state != BatchState::Idle {
            return Err(BatchError::AlreadyStarted { state: self.state });
        }
        self.state = BatchState::Running;

        let total = items.len();
        let workers = self.max_workers.get().min(total);
        let start = Instant::now();
        debug!(total, workers, "batch started");

        let cursor = AtomicUsize::new(0);
        let tally = Mutex::new(OutcomeTally::default());

        thread::scope(|scope| {
            for _ in 0..workers {
                scope.spawn(|| {
                    loop {
                        if cancel.is_some_and(CancelFlag::is_cancelled) {
                            break;
                        }
                        let index = cursor.fetch_add(1, Ordering::SeqCst);
                        let Some(item) = items.get(index) else {
                            break;
                        };

                        let outcome = panic::catch_unwind(AssertUnwindSafe(|| process(index, item)))
                            .unwrap_or_else(|_| {
                                warn!(row = index + 1, "record processor panicked");
                                RecordOutcome::Error(format!("row {}: worker panicked", index + 1))
                            });
                        let last = outcome.kind();

                        let mut tally = tally.lock().unwrap_or_else(PoisonError::into_inner);
                        tally.record(outcome);
                        observe(&BatchProgress {
                            completed: tally.total(),
                            total,
                            last,
                        });
                    }
                });
            }
        });

        let tally = tally.into_inner().unwrap_or_else(PoisonError::into_inner);
        let processed = tally.total();

        if processed < total {
            self.state = BatchState::Cancelled;
            warn!(processed, total, "batch cancelled");
            return Err(BatchError::Cancelled { processed, total });
        }

        self.state = BatchState::Completed;
        info!(
            total,
            workers,
            generated = tally.generated,
            skipped = tally.skipped,
            invalid = tally.invalid,
            errors = tally.error_count(),
            duration_ms = start.elapsed().as_millis(),
            "batch complete"
        );
        Ok(tally)
    }
}
