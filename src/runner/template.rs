use bytes::Bytes;
use http::header::{HeaderName, HeaderValue, HOST};
use http::{Method, Request};
use http_body_util::Full;
use url::Url;

use crate::config::RequestConfig;
use crate::error::TemplateError;

/// The immutable request a run issues repeatedly.
///
/// Cloning is cheap (the body is reference-counted), which matters because
/// every dispatched call needs its own request value: a request body cannot
/// be shared across concurrent calls.
#[derive(Clone, Debug)]
pub struct RequestTemplate {
    method: Method,
    url: Url,
    headers: Vec<(HeaderName, HeaderValue)>,
    body: Bytes,
}

impl RequestTemplate {
    /// Validates and builds the template from the request configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`TemplateError`] when the method, URL, or a header cannot
    /// be turned into a valid HTTP request.
    pub fn from_config(config: &RequestConfig) -> Result<Self, TemplateError> {
        let method = config
            .method
            .parse::<Method>()
            .map_err(|_err| TemplateError::InvalidMethod {
                method: config.method.clone(),
            })?;

        let url = Url::parse(&config.url).map_err(|source| TemplateError::InvalidUrl {
            url: config.url.clone(),
            source,
        })?;
        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(TemplateError::UnsupportedScheme {
                    scheme: other.to_owned(),
                });
            }
        }
        if url.host_str().is_none() {
            return Err(TemplateError::MissingHost);
        }

        let mut headers = Vec::with_capacity(config.headers.len());
        for (key, value) in &config.headers {
            let name = HeaderName::from_bytes(key.as_bytes()).map_err(|_err| {
                TemplateError::InvalidHeaderName { name: key.clone() }
            })?;
            let val =
                HeaderValue::from_str(value).map_err(|_err| TemplateError::InvalidHeaderValue {
                    name: key.clone(),
                })?;
            headers.push((name, val));
        }

        Ok(Self {
            method,
            url,
            headers,
            body: Bytes::from(config.body.clone().into_bytes()),
        })
    }

    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Host component of the target URL. Guaranteed present by construction.
    #[must_use]
    pub fn host(&self) -> &str {
        self.url.host_str().unwrap_or_default()
    }

    #[must_use]
    pub fn port(&self) -> u16 {
        self.url.port_or_known_default().unwrap_or(80)
    }

    #[must_use]
    pub fn is_https(&self) -> bool {
        self.url.scheme() == "https"
    }

    /// Renders the template as an HTTP request for the staged transport.
    ///
    /// The URI carries only the path and query (the connection is already
    /// established against the template's host), and a Host header is set
    /// unless the caller supplied one.
    pub(crate) fn build_request(&self) -> Result<Request<Full<Bytes>>, http::Error> {
        let mut path_and_query = self.url.path().to_owned();
        if let Some(query) = self.url.query() {
            path_and_query.push('?');
            path_and_query.push_str(query);
        }

        let mut builder = Request::builder()
            .method(self.method.clone())
            .uri(path_and_query);

        let has_host = self.headers.iter().any(|(name, _)| name == HOST);
        if !has_host && let Ok(host) = HeaderValue::from_str(&self.host_header_value()) {
            builder = builder.header(HOST, host);
        }
        for (name, value) in &self.headers {
            builder = builder.header(name.clone(), value.clone());
        }

        builder.body(Full::new(self.body.clone()))
    }

    fn host_header_value(&self) -> String {
        let host = self.host();
        match (self.is_https(), self.port()) {
            (false, 80) | (true, 443) => host.to_owned(),
            (_, port) => format!("{}:{}", host, port),
        }
    }
}
