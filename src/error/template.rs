use thiserror::Error;

/// Failures turning the configured request into a sendable template.
///
/// These are fatal and surface before any network work starts.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("unsupported scheme '{scheme}' (expected http or https)")]
    UnsupportedScheme { scheme: String },
    #[error("URL is missing a host")]
    MissingHost,
    #[error("invalid method '{method}'")]
    InvalidMethod { method: String },
    #[error("invalid header name '{name}'")]
    InvalidHeaderName { name: String },
    #[error("invalid header value for '{name}'")]
    InvalidHeaderValue { name: String },
}
