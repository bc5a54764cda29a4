use thiserror::Error;

use super::{TemplateError, TransportError};

/// Anomalous dispatcher terminations.
///
/// Cancellation and deadline expiry are expected, silent stop paths and are
/// not represented here. The only anomaly the dispatcher can observe is a
/// request task that failed to join (a panic inside the callback).
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("request task failed: {source}")]
    Join {
        #[from]
        source: tokio::task::JoinError,
    },
}

/// Fatal run failures.
///
/// `Request` and `Connection` short-circuit before any concurrent work
/// starts; `Dispatch` aborts a running benchmark. Per-call failures are
/// recorded on their records and never surface here.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("invalid request: {source}")]
    Request {
        #[from]
        source: TemplateError,
    },
    #[error("connection error: {source}")]
    Connection {
        #[source]
        source: TransportError,
    },
    #[error("run aborted: {source}")]
    Dispatch {
        #[from]
        source: DispatchError,
    },
}
