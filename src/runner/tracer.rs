use std::pin::Pin;
use std::sync::{Arc, Mutex, PoisonError};
use std::task::{Context, Poll};
use std::time::{Duration, Instant};

use serde::Serialize;
use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};

use crate::report::serialize_duration_us;

/// Lifecycle stages of one outbound HTTP call, in the order they can occur.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    ConnAcquire,
    DnsStart,
    DnsDone,
    ConnectStart,
    ConnectDone,
    TlsHandshakeStart,
    TlsHandshakeDone,
    ConnAcquired,
    WroteHeaders,
    WroteRequest,
    FirstResponseByte,
    ConnRelease,
}

impl Stage {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Stage::ConnAcquire => "conn_acquire",
            Stage::DnsStart => "dns_start",
            Stage::DnsDone => "dns_done",
            Stage::ConnectStart => "connect_start",
            Stage::ConnectDone => "connect_done",
            Stage::TlsHandshakeStart => "tls_handshake_start",
            Stage::TlsHandshakeDone => "tls_handshake_done",
            Stage::ConnAcquired => "conn_acquired",
            Stage::WroteHeaders => "wrote_headers",
            Stage::WroteRequest => "wrote_request",
            Stage::FirstResponseByte => "first_response_byte",
            Stage::ConnRelease => "conn_release",
        }
    }
}

/// One timestamped lifecycle stage, relative to the call's start.
#[derive(Clone, Debug, Serialize)]
pub struct Event {
    pub name: &'static str,
    #[serde(rename = "time_us", serialize_with = "serialize_duration_us")]
    pub time: Duration,
}

/// Records the internal timeline of a single HTTP call.
///
/// A tracer is single-call-scoped: timestamps are relative to its creation,
/// which happens the moment connection acquisition begins. The event list
/// sits behind a mutex because byte-level events are recorded from the
/// connection driver task while orchestration events come from the caller.
#[derive(Debug)]
pub struct Tracer {
    start: Instant,
    events: Mutex<Vec<Event>>,
}

impl Tracer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            events: Mutex::new(Vec::with_capacity(12)),
        }
    }

    pub fn record(&self, stage: Stage) {
        let event = Event {
            name: stage.as_str(),
            time: self.start.elapsed(),
        };
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }

    /// Drains the recorded events in the order they occurred.
    #[must_use]
    pub fn take_events(&self) -> Vec<Event> {
        std::mem::take(
            &mut *self
                .events
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
        )
    }
}

impl Default for Tracer {
    fn default() -> Self {
        Self::new()
    }
}

/// IO decorator that timestamps byte-level request milestones.
///
/// The first successful write carries the request headers, the first
/// successful flush after writing marks the request as fully written, and
/// the first non-empty read is the first response byte.
pub(crate) struct TracedIo<T> {
    inner: T,
    tracer: Arc<Tracer>,
    wrote_headers: bool,
    wrote_request: bool,
    got_first_byte: bool,
}

impl<T> TracedIo<T> {
    pub(crate) fn new(inner: T, tracer: Arc<Tracer>) -> Self {
        Self {
            inner,
            tracer,
            wrote_headers: false,
            wrote_request: false,
            got_first_byte: false,
        }
    }
}

impl<T: AsyncRead + Unpin> AsyncRead for TracedIo<T> {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<std::io::Result<()>> {
        let before = buf.filled().len();
        let poll = Pin::new(&mut self.inner).poll_read(cx, buf);
        if let Poll::Ready(Ok(())) = &poll
            && !self.got_first_byte
            && buf.filled().len() > before
        {
            self.got_first_byte = true;
            self.tracer.record(Stage::FirstResponseByte);
        }
        poll
    }
}

impl<T: AsyncWrite + Unpin> AsyncWrite for TracedIo<T> {
    fn poll_write(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<std::io::Result<usize>> {
        let poll = Pin::new(&mut self.inner).poll_write(cx, buf);
        if let Poll::Ready(Ok(written)) = &poll
            && !self.wrote_headers
            && *written > 0
        {
            self.wrote_headers = true;
            self.tracer.record(Stage::WroteHeaders);
        }
        poll
    }

    fn poll_flush(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<std::io::Result<()>> {
        let poll = Pin::new(&mut self.inner).poll_flush(cx);
        if let Poll::Ready(Ok(())) = &poll
            && self.wrote_headers
            && !self.wrote_request
        {
            self.wrote_request = true;
            self.tracer.record(Stage::WroteRequest);
        }
        poll
    }

    fn poll_shutdown(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<std::io::Result<()>> {
        Pin::new(&mut self.inner).poll_shutdown(cx)
    }
}
