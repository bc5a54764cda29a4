use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use tokio::sync::{broadcast, watch};
use tracing::debug;

use crate::config::BenchmarkConfig;
use crate::error::{RunError, TransportError};
use crate::report::Report;
use crate::shutdown::{ShutdownReceiver, ShutdownSender};

use super::dispatcher::Dispatcher;
use super::progress::{render_state, ProgressSink};
use super::record::Record;
use super::state::{RunSnapshot, SharedRunState};
use super::template::RequestTemplate;
use super::tracer::Tracer;
use super::transport::send_traced;

/// How often the live progress line refreshes while a run is in flight.
const REFRESH_INTERVAL: Duration = Duration::from_secs(1);

/// Orchestrates one full benchmark run.
///
/// A run moves through: template construction, a pre-flight ping, the
/// dispatch loop under the global deadline, and report construction. The
/// ping fast-fails obviously-unreachable targets before any concurrent
/// workers spin up; once the dispatch loop starts, per-call failures are
/// recorded and never abort the run.
pub struct Requester {
    config: BenchmarkConfig,
    sink: ProgressSink,
    state: SharedRunState,
    shutdown_tx: ShutdownSender,
    // Subscribed at construction so a stop signal sent any time after
    // `new` (including during the ping window) is buffered, not dropped.
    dispatch_rx: Mutex<Option<ShutdownReceiver>>,
    cause_rx: Mutex<Option<ShutdownReceiver>>,
}

impl Requester {
    /// The configuration is assumed validated by the caller
    /// (`build_benchmark_config`); the engine does not re-validate.
    #[must_use]
    pub fn new(config: BenchmarkConfig) -> Self {
        let (shutdown_tx, dispatch_rx) = broadcast::channel(8);
        let cause_rx = shutdown_tx.subscribe();
        let sink = if config.output.silent {
            ProgressSink::Silent
        } else {
            ProgressSink::Stdout
        };
        Self {
            config,
            sink,
            state: SharedRunState::new(),
            shutdown_tx,
            dispatch_rx: Mutex::new(Some(dispatch_rx)),
            cause_rx: Mutex::new(Some(cause_rx)),
        }
    }

    /// Handle for canceling the run from outside (e.g. a Ctrl-C task).
    #[must_use]
    pub fn shutdown_sender(&self) -> ShutdownSender {
        self.shutdown_tx.clone()
    }

    /// Live view of the run for external progress consumers.
    #[must_use]
    pub fn snapshot(&self) -> RunSnapshot {
        self.state.snapshot()
    }

    /// Executes the benchmark and returns its report.
    ///
    /// Cancellation and deadline expiry are not errors: the report is built
    /// from whatever records were collected when the run stopped.
    ///
    /// # Errors
    ///
    /// Returns a [`RunError`] when the configured request is invalid, the
    /// pre-flight ping fails, or the dispatcher aborts abnormally. No
    /// report is produced in those cases.
    pub async fn run(&self) -> Result<Report, RunError> {
        let template = RequestTemplate::from_config(&self.config.request)?;
        let request_timeout = self.config.request.timeout;

        self.ping(&template, request_timeout).await?;
        debug!(url = %template.url(), "pre-flight ping succeeded");

        self.state.mark_start();
        let max_iter = self.config.runner.requests;
        let global_timeout = self.config.runner.global_timeout;
        let interval = self.config.runner.interval;

        let (done_tx, done_rx) = watch::channel(false);
        let timer = self.spawn_deadline_timer(global_timeout, done_rx.clone());
        let refresher = self.spawn_refresher(max_iter, global_timeout, done_rx);

        let dispatch_rx = self.take_receiver(&self.dispatch_rx);
        let mut cause_rx = self.take_receiver(&self.cause_rx);

        let callback = {
            let state = self.state.clone();
            let sink = self.sink;
            move || {
                let state = state.clone();
                let template = template.clone();
                async move {
                    let record = execute_call(&template, request_timeout).await;
                    state.push(record);
                    sink.print(&render_state(&state.snapshot(), max_iter, global_timeout));
                    if !interval.is_zero() {
                        tokio::time::sleep(interval).await;
                    }
                }
            }
        };

        let dispatcher = Dispatcher::new(self.config.runner.concurrency);
        let dispatched = dispatcher.run(dispatch_rx, max_iter, callback).await;

        let cause = cause_rx.try_recv().ok();
        self.state.finish(cause);
        done_tx.send(true).ok();
        refresher.await.ok();
        timer.await.ok();

        dispatched?;

        self.sink
            .print(&render_state(&self.state.snapshot(), max_iter, global_timeout));
        self.sink.finish_line();

        let (records, fail, duration) = self.state.take_results();
        Ok(Report::new(records, fail, duration))
    }

    /// Hands out a receiver subscribed at construction. A fresh
    /// subscription is only a fallback for a repeated `run` call; it does
    /// not see signals sent before it.
    fn take_receiver(&self, slot: &Mutex<Option<ShutdownReceiver>>) -> ShutdownReceiver {
        slot.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .unwrap_or_else(|| self.shutdown_tx.subscribe())
    }

    /// One synchronous pre-flight call under the per-call timeout.
    async fn ping(
        &self,
        template: &RequestTemplate,
        timeout: Duration,
    ) -> Result<(), RunError> {
        let tracer = Arc::new(Tracer::new());
        let outcome = tokio::time::timeout(timeout, send_traced(template, &tracer)).await;
        match outcome {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(source)) => Err(RunError::Connection { source }),
            Err(_elapsed) => Err(RunError::Connection {
                source: TransportError::TimedOut { timeout },
            }),
        }
    }

    fn spawn_deadline_timer(
        &self,
        global_timeout: Duration,
        mut done_rx: watch::Receiver<bool>,
    ) -> tokio::task::JoinHandle<()> {
        let shutdown_tx = self.shutdown_tx.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = done_rx.changed() => {}
                () = tokio::time::sleep(global_timeout) => {
                    drop(shutdown_tx.send(crate::shutdown::StopCause::Deadline));
                }
            }
        })
    }

    fn spawn_refresher(
        &self,
        max_iter: u64,
        global_timeout: Duration,
        mut done_rx: watch::Receiver<bool>,
    ) -> tokio::task::JoinHandle<()> {
        let state = self.state.clone();
        let sink = self.sink;
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(REFRESH_INTERVAL);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    _ = done_rx.changed() => break,
                    _ = ticker.tick() => {
                        sink.print(&render_state(&state.snapshot(), max_iter, global_timeout));
                    }
                }
            }
        })
    }
}

/// Performs one traced call bounded by the per-call timeout and turns its
/// outcome into a record. Failures, including timeouts, yield a record with
/// an error description and zero elapsed time.
async fn execute_call(template: &RequestTemplate, timeout: Duration) -> Record {
    let tracer = Arc::new(Tracer::new());
    let started = Instant::now();
    match tokio::time::timeout(timeout, send_traced(template, &tracer)).await {
        Ok(Ok(outcome)) => Record::success(
            started.elapsed(),
            outcome.status,
            outcome.bytes,
            tracer.take_events(),
        ),
        Ok(Err(err)) => Record::failure(err.to_string(), tracer.take_events()),
        Err(_elapsed) => Record::failure(
            TransportError::TimedOut { timeout }.to_string(),
            tracer.take_events(),
        ),
    }
}
