use std::time::Duration;

use serde::Serialize;

use crate::report::serialize_duration_us;

use super::tracer::Event;

/// The outcome of one dispatched HTTP call.
///
/// A record with an error is not a remote-server failure indicator: it means
/// the call itself could not be completed (DNS, connect, TLS, timeout, body
/// read). Such records carry zero elapsed time, are excluded from latency
/// statistics, and count toward the failure total.
#[derive(Clone, Debug, Serialize)]
pub struct Record {
    #[serde(rename = "elapsed_us", serialize_with = "serialize_duration_us")]
    pub elapsed: Duration,
    pub code: u16,
    pub bytes: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub events: Vec<Event>,
}

impl Record {
    #[must_use]
    pub fn success(elapsed: Duration, code: u16, bytes: usize, events: Vec<Event>) -> Self {
        Self {
            elapsed,
            code,
            bytes,
            error: None,
            events,
        }
    }

    #[must_use]
    pub fn failure(error: String, events: Vec<Event>) -> Self {
        Self {
            elapsed: Duration::ZERO,
            code: 0,
            bytes: 0,
            error: Some(error),
            events,
        }
    }

    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }
}
