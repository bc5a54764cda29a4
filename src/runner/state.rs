use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use crate::shutdown::StopCause;

use super::record::Record;

/// Mutable state of one run in progress.
///
/// This is the only shared mutable resource of a run: every dispatched call
/// appends its record here, and the live progress line reads from it. All
/// access goes through the single lock held by [`SharedRunState`].
#[derive(Debug)]
pub struct RunState {
    pub records: Vec<Record>,
    pub fail: usize,
    pub done: bool,
    pub cause: Option<StopCause>,
    pub start: Instant,
}

/// Point-in-time view of a run, for progress rendering outside the lock.
#[derive(Clone, Copy, Debug)]
pub struct RunSnapshot {
    pub collected: usize,
    pub fail: usize,
    pub done: bool,
    pub cause: Option<StopCause>,
    pub elapsed: Duration,
}

#[derive(Clone, Debug)]
pub(crate) struct SharedRunState(Arc<Mutex<RunState>>);

impl SharedRunState {
    pub(crate) fn new() -> Self {
        Self(Arc::new(Mutex::new(RunState {
            records: Vec::new(),
            fail: 0,
            done: false,
            cause: None,
            start: Instant::now(),
        })))
    }

    fn lock(&self) -> MutexGuard<'_, RunState> {
        // A poisoned lock only means a record append panicked mid-push;
        // the state itself stays usable.
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Marks the actual start of the benchmark, after the pre-flight ping.
    pub(crate) fn mark_start(&self) {
        self.lock().start = Instant::now();
    }

    pub(crate) fn push(&self, record: Record) {
        let mut state = self.lock();
        if record.is_failure() {
            state.fail = state.fail.saturating_add(1);
        }
        state.records.push(record);
    }

    /// Flips the finished flag and fixes the terminal cause. The state is
    /// treated as read-only by the run once this returns.
    pub(crate) fn finish(&self, cause: Option<StopCause>) {
        let mut state = self.lock();
        state.done = true;
        state.cause = cause;
    }

    pub(crate) fn snapshot(&self) -> RunSnapshot {
        let state = self.lock();
        RunSnapshot {
            collected: state.records.len(),
            fail: state.fail,
            done: state.done,
            cause: state.cause,
            elapsed: state.start.elapsed(),
        }
    }

    /// Moves the collected records and counters out for report building.
    pub(crate) fn take_results(&self) -> (Vec<Record>, usize, Duration) {
        let mut state = self.lock();
        let records = std::mem::take(&mut state.records);
        (records, state.fail, state.start.elapsed())
    }
}
