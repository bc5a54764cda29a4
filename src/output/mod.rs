//! Report export: stdout summary, JSON file, remote upload.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::ansi;
use crate::args::ExportKind;
use crate::config::BenchmarkConfig;
use crate::error::ExportError;
use crate::report::Report;

mod template;

#[cfg(test)]
mod tests;

pub use template::render_template;

/// A report tied to the configuration that produced it. This is the unit
/// of export: JSON files and remote uploads carry the whole structure so a
/// report stays interpretable on its own.
#[derive(Debug, Serialize)]
pub struct Benchmark {
    pub report: Report,
    pub metadata: Metadata,
}

#[derive(Debug, Serialize)]
pub struct Metadata {
    pub config: BenchmarkConfig,
    pub finished_at: DateTime<Utc>,
}

impl Benchmark {
    #[must_use]
    pub fn new(report: Report, config: BenchmarkConfig) -> Self {
        Self {
            report,
            metadata: Metadata {
                config,
                finished_at: Utc::now(),
            },
        }
    }
}

/// Runs every configured export strategy, attempting all of them even when
/// one fails.
///
/// # Errors
///
/// A single failing strategy returns its error directly; several failures
/// are aggregated into [`ExportError::Multi`].
pub async fn export(benchmark: &Benchmark) -> Result<(), ExportError> {
    let mut errors = Vec::new();
    for kind in &benchmark.metadata.config.output.out {
        let outcome = match kind {
            ExportKind::Stdout => export_stdout(benchmark),
            ExportKind::Json => export_json_file(benchmark),
            ExportKind::Remote => export_remote(benchmark).await,
        };
        if let Err(err) = outcome {
            errors.push(err);
        }
    }
    match errors.len() {
        0 => Ok(()),
        1 => match errors.pop() {
            Some(err) => Err(err),
            None => Ok(()),
        },
        _ => Err(ExportError::Multi(errors)),
    }
}

fn export_stdout(benchmark: &Benchmark) -> Result<(), ExportError> {
    let rendered = match benchmark.metadata.config.output.template.as_deref() {
        Some(template) => render_template(template, benchmark)?,
        None => default_summary(benchmark),
    };
    println!("{rendered}");
    Ok(())
}

fn export_json_file(benchmark: &Benchmark) -> Result<(), ExportError> {
    let path = json_report_path(&benchmark.metadata.finished_at);
    write_json_report(benchmark, &path)?;
    info!(path = %path, "report written");
    Ok(())
}

pub(crate) fn json_report_path(finished_at: &DateTime<Utc>) -> String {
    format!("volley.report.{}.json", finished_at.timestamp())
}

pub(crate) fn write_json_report(benchmark: &Benchmark, path: &str) -> Result<(), ExportError> {
    let encoded = serde_json::to_vec_pretty(benchmark)?;
    std::fs::write(path, encoded).map_err(|source| ExportError::WriteFile {
        path: std::path::PathBuf::from(path),
        source,
    })
}

async fn export_remote(benchmark: &Benchmark) -> Result<(), ExportError> {
    let Some(url) = benchmark.metadata.config.output.remote_url.clone() else {
        // Validation guarantees a URL when the remote strategy is selected.
        return Ok(());
    };
    let response = reqwest::Client::new()
        .post(&url)
        .json(benchmark)
        .send()
        .await
        .map_err(|source| ExportError::Upload {
            url: url.clone(),
            source,
        })?;
    let status = response.status();
    if !status.is_success() {
        return Err(ExportError::UploadStatus {
            url,
            status: status.as_u16(),
        });
    }
    info!(%url, "report uploaded");
    Ok(())
}

/// The built-in stdout summary used when no template is configured.
#[must_use]
pub fn default_summary(benchmark: &Benchmark) -> String {
    let report = &benchmark.report;
    let config = &benchmark.metadata.config;
    let stats = report.stats();
    let requests = if config.runner.requests == 0 {
        format!("{}", report.length)
    } else {
        format!("{}/{}", report.length, config.runner.requests)
    };
    format!(
        "{}\n  target:       {} {}\n  concurrency:  {}\n  requests:     {} ({} failed)\n  duration:     {}\n  min/max/mean: {} / {} / {}",
        ansi::bold("Benchmark summary"),
        config.request.method,
        config.request.url,
        config.runner.concurrency,
        requests,
        report.fail,
        human_duration(report.duration),
        human_duration(stats.min),
        human_duration(stats.max),
        human_duration(stats.mean),
    )
}

/// Renders a duration at a precision fit for latency numbers.
pub(crate) fn human_duration(value: Duration) -> String {
    if value < Duration::from_millis(1) {
        format!("{}\u{b5}s", value.as_micros())
    } else if value < Duration::from_secs(1) {
        let millis = value.as_secs_f64() * 1000.0;
        format!("{millis:.1}ms")
    } else {
        format!("{:.2}s", value.as_secs_f64())
    }
}
