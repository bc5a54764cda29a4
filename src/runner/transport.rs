use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use http_body_util::BodyExt;
use hyper::client::conn::http1;
use hyper_util::rt::TokioIo;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;

use crate::error::TransportError;

use super::template::RequestTemplate;
use super::tracer::{Stage, TracedIo, Tracer};

/// What one completed call produced.
#[derive(Clone, Copy, Debug)]
pub struct CallOutcome {
    pub status: u16,
    pub bytes: usize,
}

trait IoStream: AsyncRead + AsyncWrite + Unpin + Send {}
impl<T: AsyncRead + AsyncWrite + Unpin + Send> IoStream for T {}

/// Performs one HTTP/1.1 call over a freshly staged connection, recording
/// each lifecycle stage on `tracer` as it is reached.
///
/// The connection is explicit (DNS, TCP, optional TLS, HTTP handshake) so
/// every stage boundary is observable; pooled clients hide them. The
/// connection is dropped once the body has been read, so there is no idle
/// pool to return it to; the release stage marks that point.
///
/// # Errors
///
/// Returns a [`TransportError`] naming the stage that failed. The caller
/// applies the per-call timeout around this entire future.
pub(crate) async fn send_traced(
    template: &RequestTemplate,
    tracer: &Arc<Tracer>,
) -> Result<CallOutcome, TransportError> {
    let host = template.host().to_owned();
    let port = template.port();

    tracer.record(Stage::ConnAcquire);

    let addr = match host.parse::<IpAddr>() {
        Ok(ip) => SocketAddr::new(ip, port),
        Err(_) => {
            tracer.record(Stage::DnsStart);
            let mut addrs = tokio::net::lookup_host((host.as_str(), port))
                .await
                .map_err(|source| TransportError::Dns {
                    host: host.clone(),
                    source,
                })?;
            let addr = addrs
                .next()
                .ok_or_else(|| TransportError::NoAddress { host: host.clone() })?;
            tracer.record(Stage::DnsDone);
            addr
        }
    };

    tracer.record(Stage::ConnectStart);
    let stream = TcpStream::connect(addr)
        .await
        .map_err(|source| TransportError::Connect { addr, source })?;
    stream.set_nodelay(true).ok();
    tracer.record(Stage::ConnectDone);

    let io: Box<dyn IoStream> = if template.is_https() {
        tracer.record(Stage::TlsHandshakeStart);
        let connector = native_tls::TlsConnector::new()
            .map_err(|source| TransportError::Tls {
                source: Box::new(source),
            })?;
        let connector = tokio_native_tls::TlsConnector::from(connector);
        let tls = connector
            .connect(&host, stream)
            .await
            .map_err(|source| TransportError::TlsHandshake {
                host: host.clone(),
                source: Box::new(source),
            })?;
        tracer.record(Stage::TlsHandshakeDone);
        Box::new(tls)
    } else {
        Box::new(stream)
    };
    tracer.record(Stage::ConnAcquired);

    let traced = TracedIo::new(io, Arc::clone(tracer));
    let (mut sender, conn) = http1::handshake(TokioIo::new(traced))
        .await
        .map_err(|source| TransportError::Handshake { source })?;

    // Drives the connection until the call completes; errors surface
    // through the request future, not here.
    tokio::spawn(async move {
        conn.await.ok();
    });

    let request = template
        .build_request()
        .map_err(|source| TransportError::BuildRequest { source })?;

    let response = sender
        .send_request(request)
        .await
        .map_err(|source| TransportError::Request { source })?;
    let status = response.status().as_u16();

    let body = response
        .into_body()
        .collect()
        .await
        .map_err(|source| TransportError::Body { source })?
        .to_bytes();
    tracer.record(Stage::ConnRelease);

    Ok(CallOutcome {
        status,
        bytes: body.len(),
    })
}
