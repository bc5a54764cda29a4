use std::time::Duration;

use crate::args::ExportKind;
use crate::config::{BenchmarkConfig, OutputConfig, RequestConfig, RunnerConfig};
use crate::report::Report;
use crate::runner::Record;

use super::{Benchmark, default_summary, human_duration, render_template, write_json_report};

fn sample_benchmark() -> Benchmark {
    let records = vec![
        Record::success(Duration::from_millis(20), 200, 128, Vec::new()),
        Record::success(Duration::from_millis(40), 200, 128, Vec::new()),
        Record::failure("connection reset".into(), Vec::new()),
    ];
    let report = Report::new(records, 1, Duration::from_secs(2));
    let config = BenchmarkConfig {
        request: RequestConfig {
            method: "GET".to_owned(),
            url: "http://localhost:8080/ping".to_owned(),
            headers: Vec::new(),
            body: String::new(),
            timeout: Duration::from_secs(10),
        },
        runner: RunnerConfig {
            requests: 3,
            concurrency: 2,
            interval: Duration::ZERO,
            global_timeout: Duration::from_secs(30),
        },
        output: OutputConfig {
            out: vec![ExportKind::Stdout],
            silent: false,
            template: None,
            remote_url: None,
        },
    };
    Benchmark::new(report, config)
}

#[test]
fn template_substitutes_placeholders() -> Result<(), String> {
    let benchmark = sample_benchmark();
    let rendered = render_template("{length} calls to {url}, {fail} failed", &benchmark)
        .map_err(|e| e.to_string())?;
    if rendered != "3 calls to http://localhost:8080/ping, 1 failed" {
        return Err(rendered);
    }
    Ok(())
}

#[test]
fn template_escapes_doubled_braces() -> Result<(), String> {
    let benchmark = sample_benchmark();
    let rendered =
        render_template("{{literal}} {success}", &benchmark).map_err(|e| e.to_string())?;
    if rendered != "{literal} 2" {
        return Err(rendered);
    }
    Ok(())
}

#[test]
fn template_rejects_unknown_placeholder() {
    let benchmark = sample_benchmark();
    assert!(render_template("{p99}", &benchmark).is_err());
    assert!(render_template("{length", &benchmark).is_err());
    assert!(render_template("length}", &benchmark).is_err());
}

#[test]
fn default_summary_names_the_target() -> Result<(), String> {
    let benchmark = sample_benchmark();
    let summary = default_summary(&benchmark);
    if !summary.contains("http://localhost:8080/ping") {
        return Err(format!("missing target in summary: {summary}"));
    }
    if !summary.contains("3/3 (1 failed)") {
        return Err(format!("missing request counts: {summary}"));
    }
    Ok(())
}

#[test]
fn json_report_round_trips_core_fields() -> Result<(), String> {
    let benchmark = sample_benchmark();
    let dir = tempfile::tempdir().map_err(|e| e.to_string())?;
    let path = dir
        .path()
        .join("report.json")
        .to_string_lossy()
        .into_owned();
    write_json_report(&benchmark, &path).map_err(|e| e.to_string())?;

    let content = std::fs::read_to_string(&path).map_err(|e| e.to_string())?;
    let value: serde_json::Value = serde_json::from_str(&content).map_err(|e| e.to_string())?;
    let length = value
        .get("report")
        .and_then(|r| r.get("length"))
        .and_then(serde_json::Value::as_u64)
        .ok_or("missing report.length")?;
    if length != 3 {
        return Err(format!("length: {length}"));
    }
    let url = value
        .get("metadata")
        .and_then(|m| m.get("config"))
        .and_then(|c| c.get("request"))
        .and_then(|r| r.get("url"))
        .and_then(serde_json::Value::as_str)
        .ok_or("missing metadata.config.request.url")?;
    if url != "http://localhost:8080/ping" {
        return Err(format!("url: {url}"));
    }
    Ok(())
}

#[test]
fn human_duration_picks_a_sensible_unit() {
    assert_eq!(human_duration(Duration::from_micros(450)), "450\u{b5}s");
    assert_eq!(human_duration(Duration::from_millis(38)), "38.0ms");
    assert_eq!(human_duration(Duration::from_millis(2500)), "2.50s");
}
