use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse TOML config '{path}': {source}")]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Failed to parse JSON config '{path}': {source}")]
    ParseJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Unsupported config extension '{ext}' (expected toml or json).")]
    UnsupportedExtension { ext: String },
    #[error("Config file has no extension (expected toml or json).")]
    MissingExtension,
    #[error("Missing URL (set --url or provide one in the config file).")]
    MissingUrl,
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Concurrency must be >= 1.")]
    ZeroConcurrency,
    #[error("Invalid header '{value}'. Expected 'Key: Value'.")]
    InvalidHeaderFormat { value: String },
    #[error("Invalid duration '{value}': {reason}")]
    InvalidDuration { value: String, reason: String },
    #[error("Unknown output strategy '{value}' (expected stdout, json or remote).")]
    UnknownStrategy { value: String },
    #[error("Output strategy 'remote' requires a remote URL (set --remote-url or output.remote_url).")]
    MissingRemoteUrl,
}
