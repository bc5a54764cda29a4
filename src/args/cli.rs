use std::time::Duration;

use clap::Parser;

use super::parsers::{parse_duration_arg, parse_header};
use super::types::{ExportKind, HttpMethod};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Fire a volley of HTTP requests at a target and report latency statistics."
)]
pub struct RunnerArgs {
    /// Target URL for the benchmark
    #[arg(long, short)]
    pub url: Option<String>,

    /// HTTP method to use
    #[arg(long, short = 'X', default_value = "get", ignore_case = true)]
    pub method: HttpMethod,

    /// Request header as 'Key: Value' (repeatable)
    #[arg(long = "header", short = 'H', value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Request body sent with every request
    #[arg(long = "body", short = 'd', default_value = "")]
    pub body: String,

    /// Maximum number of requests to send (0 or less means unbounded)
    #[arg(long, short = 'n', default_value_t = 0, allow_negative_numbers = true)]
    pub requests: i64,

    /// Number of concurrent in-flight requests
    #[arg(long, short = 'c', default_value_t = 1)]
    pub concurrency: usize,

    /// Minimum wait between consecutive requests of one worker (supports ms/s/m/h)
    #[arg(long, short = 'i', default_value = "0ms", value_parser = parse_duration_arg)]
    pub interval: Duration,

    /// Timeout applied to each individual request (supports ms/s/m/h)
    #[arg(long, short = 't', default_value = "10s", value_parser = parse_duration_arg)]
    pub timeout: Duration,

    /// Deadline for the whole run (supports ms/s/m/h)
    #[arg(long = "global-timeout", short = 'T', default_value = "30s", value_parser = parse_duration_arg)]
    pub global_timeout: Duration,

    /// Path to a TOML or JSON config file
    #[arg(long)]
    pub config: Option<String>,

    /// Report destination (repeatable)
    #[arg(long, value_enum)]
    pub out: Vec<ExportKind>,

    /// Endpoint the report is uploaded to when --out remote is set
    #[arg(long = "remote-url")]
    pub remote_url: Option<String>,

    /// Suppress the live progress line
    #[arg(long, short = 's')]
    pub silent: bool,

    /// Enable debug logging (overridden by VOLLEY_LOG / RUST_LOG)
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

/// The zero-or-negative convention from the CLI collapses to 0, the
/// engine's unbounded marker.
#[must_use]
pub fn normalize_requests(requests: i64) -> u64 {
    u64::try_from(requests).unwrap_or(0)
}
