use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::args::ExportKind;
use crate::report::serialize_duration_us;

/// Shape of a `volley.toml` / `volley.json` file. Every field is optional;
/// missing values fall back to CLI flags and their defaults.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub request: Option<RequestSection>,
    pub runner: Option<RunnerSection>,
    pub output: Option<OutputSection>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RequestSection {
    pub method: Option<crate::args::HttpMethod>,
    pub url: Option<String>,
    pub headers: Option<Vec<String>>,
    pub body: Option<String>,
    pub timeout: Option<DurationValue>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RunnerSection {
    pub requests: Option<i64>,
    pub concurrency: Option<usize>,
    pub interval: Option<DurationValue>,
    pub global_timeout: Option<DurationValue>,
}

#[derive(Debug, Default, Deserialize)]
pub struct OutputSection {
    pub out: Option<Vec<String>>,
    pub silent: Option<bool>,
    pub template: Option<String>,
    pub remote_url: Option<String>,
}

/// A duration given either as bare seconds or as text with a unit
/// ("500ms", "10s", "2m", "1h").
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> Result<Duration, String> {
        match self {
            DurationValue::Seconds(secs) => Ok(Duration::from_secs(*secs)),
            DurationValue::Text(text) => super::parse_duration_value(text),
        }
    }
}

/// Fully-resolved, validated configuration the engine runs with.
///
/// Serialized into report metadata, so every field must have a stable
/// representation.
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkConfig {
    pub request: RequestConfig,
    pub runner: RunnerConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct RequestConfig {
    pub method: String,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
    /// Per-call timeout. A call still in flight past it is recorded as failed.
    #[serde(rename = "timeout_us", serialize_with = "serialize_duration_us")]
    pub timeout: Duration,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunnerConfig {
    /// Iteration cap. Zero means unbounded, stopped by the global timeout.
    pub requests: u64,
    pub concurrency: usize,
    #[serde(rename = "interval_us", serialize_with = "serialize_duration_us")]
    pub interval: Duration,
    #[serde(rename = "global_timeout_us", serialize_with = "serialize_duration_us")]
    pub global_timeout: Duration,
}

#[derive(Debug, Clone, Serialize)]
pub struct OutputConfig {
    pub out: Vec<ExportKind>,
    pub silent: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_url: Option<String>,
}
