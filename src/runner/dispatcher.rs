use std::future::Future;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::error::DispatchError;
use crate::shutdown::ShutdownReceiver;

/// Bounded-concurrency executor for the benchmark loop.
///
/// `run` spawns the supplied callback up to `max_iter` times (0 meaning
/// unbounded), never keeping more than `num_worker` executions in flight at
/// once. Admission is gated by a counting semaphore: a new execution starts
/// only once a prior one finishes and releases its permit.
#[derive(Debug, Clone, Copy)]
pub struct Dispatcher {
    num_worker: usize,
}

impl Dispatcher {
    /// A worker count below 1 is coerced to 1 rather than rejected.
    #[must_use]
    pub fn new(num_worker: usize) -> Self {
        Self {
            num_worker: num_worker.max(1),
        }
    }

    #[must_use]
    pub const fn num_worker(&self) -> usize {
        self.num_worker
    }

    /// Executes `callback` at most `max_iter` times, or until `shutdown`
    /// fires. Cancellation is cooperative and checked only at admission
    /// time: executions already in flight always run to completion, and
    /// this method returns only once every spawned execution has finished.
    ///
    /// # Errors
    ///
    /// Returns a [`DispatchError`] if a spawned execution fails to join.
    /// Cancellation and deadline expiry are silent termination paths, not
    /// errors.
    pub async fn run<F, Fut>(
        &self,
        mut shutdown: ShutdownReceiver,
        max_iter: u64,
        callback: F,
    ) -> Result<(), DispatchError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let permits = Arc::new(Semaphore::new(self.num_worker));
        let mut in_flight: JoinSet<()> = JoinSet::new();
        let mut issued: u64 = 0;

        while max_iter == 0 || issued < max_iter {
            // The shutdown branch is checked first so a fired signal stops
            // admissions promptly even when a permit is already free.
            let acquired = tokio::select! {
                biased;
                _ = shutdown.recv() => None,
                permit = Arc::clone(&permits).acquire_owned() => permit.ok(),
            };
            let Some(permit) = acquired else { break };

            let execution = callback();
            in_flight.spawn(async move {
                execution.await;
                drop(permit);
            });
            issued = issued.saturating_add(1);

            // Reap finished tasks as we go so the join set stays bounded on
            // long deadline-driven runs.
            while let Some(joined) = in_flight.try_join_next() {
                joined?;
            }
        }

        while let Some(joined) = in_flight.join_next().await {
            joined?;
        }

        Ok(())
    }
}
