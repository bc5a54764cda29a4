use std::time::Duration;

use thiserror::Error;

/// Failures of one staged HTTP call, from DNS lookup to body read.
///
/// During a run these are per-record errors: they are captured on the
/// record and never abort the run. Only the pre-flight ping escalates one
/// of these into a fatal connection error.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("dns lookup failed for '{host}': {source}")]
    Dns {
        host: String,
        #[source]
        source: std::io::Error,
    },
    #[error("no address resolved for '{host}'")]
    NoAddress { host: String },
    #[error("connect to {addr} failed: {source}")]
    Connect {
        addr: std::net::SocketAddr,
        #[source]
        source: std::io::Error,
    },
    #[error("tls initialization failed: {source}")]
    Tls {
        #[source]
        source: Box<native_tls::Error>,
    },
    #[error("tls handshake with '{host}' failed: {source}")]
    TlsHandshake {
        host: String,
        #[source]
        source: Box<native_tls::Error>,
    },
    #[error("http handshake failed: {source}")]
    Handshake {
        #[source]
        source: hyper::Error,
    },
    #[error("request failed: {source}")]
    Request {
        #[source]
        source: hyper::Error,
    },
    #[error("failed to read response body: {source}")]
    Body {
        #[source]
        source: hyper::Error,
    },
    #[error("request failed to build: {source}")]
    BuildRequest {
        #[source]
        source: http::Error,
    },
    #[error("timed out after {timeout:?}")]
    TimedOut { timeout: Duration },
}
