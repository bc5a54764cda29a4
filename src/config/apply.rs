use clap::ArgMatches;
use clap::parser::ValueSource;

use url::Url;

use crate::args::{ExportKind, RunnerArgs, normalize_requests, parse_header};
use crate::error::ConfigError;

use super::types::{
    BenchmarkConfig, ConfigFile, OutputConfig, RequestConfig, RunnerConfig,
};

/// Applies config file values to CLI arguments.
///
/// CLI flags given explicitly win over the file; the file wins over flag
/// defaults.
///
/// # Errors
///
/// Returns an error when a config value cannot be parsed.
pub fn apply_config(
    args: &mut RunnerArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> Result<(), ConfigError> {
    if let Some(request) = config.request.as_ref() {
        if !is_cli(matches, "method")
            && let Some(method) = request.method
        {
            args.method = method;
        }
        if !is_cli(matches, "url")
            && let Some(url) = request.url.clone()
        {
            args.url = Some(url);
        }
        if !is_cli(matches, "headers")
            && let Some(headers) = request.headers.as_ref()
        {
            let mut parsed = Vec::with_capacity(headers.len());
            for header in headers {
                parsed.push(parse_header(header)?);
            }
            args.headers = parsed;
        }
        if !is_cli(matches, "body")
            && let Some(body) = request.body.clone()
        {
            args.body = body;
        }
        if !is_cli(matches, "timeout")
            && let Some(timeout) = request.timeout.as_ref()
        {
            args.timeout = to_duration(timeout, "request.timeout")?;
        }
    }

    if let Some(runner) = config.runner.as_ref() {
        if !is_cli(matches, "requests")
            && let Some(requests) = runner.requests
        {
            args.requests = requests;
        }
        if !is_cli(matches, "concurrency")
            && let Some(concurrency) = runner.concurrency
        {
            args.concurrency = concurrency;
        }
        if !is_cli(matches, "interval")
            && let Some(interval) = runner.interval.as_ref()
        {
            args.interval = to_duration(interval, "runner.interval")?;
        }
        if !is_cli(matches, "global_timeout")
            && let Some(global_timeout) = runner.global_timeout.as_ref()
        {
            args.global_timeout = to_duration(global_timeout, "runner.global_timeout")?;
        }
    }

    if let Some(output) = config.output.as_ref() {
        if !is_cli(matches, "out")
            && let Some(out) = output.out.as_ref()
        {
            let mut parsed = Vec::with_capacity(out.len());
            for kind in out {
                parsed.push(kind.parse::<ExportKind>()?);
            }
            args.out = parsed;
        }
        if !is_cli(matches, "silent")
            && let Some(silent) = output.silent
        {
            args.silent = silent;
        }
        if !is_cli(matches, "remote_url")
            && let Some(remote_url) = output.remote_url.clone()
        {
            args.remote_url = Some(remote_url);
        }
    }

    Ok(())
}

/// Validates the merged arguments and produces the configuration the
/// engine runs with.
///
/// # Errors
///
/// Returns an error when required values are missing or invalid.
pub fn build_benchmark_config(
    args: &RunnerArgs,
    template: Option<String>,
) -> Result<BenchmarkConfig, ConfigError> {
    let url = args.url.clone().ok_or(ConfigError::MissingUrl)?;
    Url::parse(&url).map_err(|source| ConfigError::InvalidUrl {
        url: url.clone(),
        source,
    })?;

    if args.concurrency == 0 {
        return Err(ConfigError::ZeroConcurrency);
    }
    ensure_nonzero(args.timeout, "timeout")?;
    ensure_nonzero(args.global_timeout, "global-timeout")?;

    let mut out = args.out.clone();
    if out.is_empty() {
        out.push(ExportKind::Stdout);
    }
    if out.contains(&ExportKind::Remote) {
        let remote = args.remote_url.as_deref().ok_or(ConfigError::MissingRemoteUrl)?;
        Url::parse(remote).map_err(|source| ConfigError::InvalidUrl {
            url: remote.to_owned(),
            source,
        })?;
    }

    Ok(BenchmarkConfig {
        request: RequestConfig {
            method: args.method.as_str().to_owned(),
            url,
            headers: args.headers.clone(),
            body: args.body.clone(),
            timeout: args.timeout,
        },
        runner: RunnerConfig {
            requests: normalize_requests(args.requests),
            concurrency: args.concurrency,
            interval: args.interval,
            global_timeout: args.global_timeout,
        },
        output: OutputConfig {
            out,
            silent: args.silent,
            template,
            remote_url: args.remote_url.clone(),
        },
    })
}

fn is_cli(matches: &ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(ValueSource::CommandLine)
}

fn to_duration(
    value: &super::types::DurationValue,
    field: &str,
) -> Result<std::time::Duration, ConfigError> {
    value
        .to_duration()
        .map_err(|reason| ConfigError::InvalidDuration {
            value: field.to_owned(),
            reason,
        })
}

fn ensure_nonzero(value: std::time::Duration, field: &str) -> Result<(), ConfigError> {
    if value.is_zero() {
        return Err(ConfigError::InvalidDuration {
            value: field.to_owned(),
            reason: "Duration must be > 0.".to_owned(),
        });
    }
    Ok(())
}
