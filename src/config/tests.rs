use std::io::Write;
use std::time::Duration;

use clap::{ArgMatches, CommandFactory, FromArgMatches};

use crate::args::{ExportKind, RunnerArgs};
use crate::error::ConfigError;

use super::types::DurationValue;
use super::{apply_config, build_benchmark_config, load_config_file, parse_duration_value};

fn parse_args(argv: &[&str]) -> Result<(RunnerArgs, ArgMatches), String> {
    let matches = RunnerArgs::command()
        .try_get_matches_from(argv)
        .map_err(|e| e.to_string())?;
    let args = RunnerArgs::from_arg_matches(&matches).map_err(|e| e.to_string())?;
    Ok((args, matches))
}

#[test]
fn duration_values_accept_units_and_bare_seconds() -> Result<(), String> {
    if parse_duration_value("500ms")? != Duration::from_millis(500) {
        return Err("500ms".into());
    }
    if parse_duration_value("2m")? != Duration::from_secs(120) {
        return Err("2m".into());
    }
    if parse_duration_value("15")? != Duration::from_secs(15) {
        return Err("bare seconds".into());
    }
    if DurationValue::Seconds(3).to_duration()? != Duration::from_secs(3) {
        return Err("integer value".into());
    }
    if DurationValue::Text("1h".to_owned()).to_duration()? != Duration::from_secs(3600) {
        return Err("text value".into());
    }
    assert!(parse_duration_value("10 minutes").is_err());
    Ok(())
}

#[test]
fn loads_toml_config_file() -> Result<(), String> {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .map_err(|e| e.to_string())?;
    writeln!(
        file,
        r#"
[request]
url = "http://localhost:9000"
method = "POST"

[runner]
requests = 100
concurrency = 5
global_timeout = "45s"

[output]
out = ["json"]
"#
    )
    .map_err(|e| e.to_string())?;

    let config = load_config_file(file.path()).map_err(|e| e.to_string())?;
    let request = config.request.ok_or("missing request section")?;
    if request.url.as_deref() != Some("http://localhost:9000") {
        return Err(format!("url: {:?}", request.url));
    }
    let runner = config.runner.ok_or("missing runner section")?;
    if runner.requests != Some(100) || runner.concurrency != Some(5) {
        return Err("runner values".into());
    }
    Ok(())
}

#[test]
fn loads_json_config_file() -> Result<(), String> {
    let mut file = tempfile::Builder::new()
        .suffix(".json")
        .tempfile()
        .map_err(|e| e.to_string())?;
    write!(
        file,
        r#"{{"request": {{"url": "http://localhost", "timeout": 5}}}}"#
    )
    .map_err(|e| e.to_string())?;

    let config = load_config_file(file.path()).map_err(|e| e.to_string())?;
    let request = config.request.ok_or("missing request section")?;
    assert!(request.timeout.is_some());
    Ok(())
}

#[test]
fn unsupported_extension_is_rejected() -> Result<(), String> {
    let file = tempfile::Builder::new()
        .suffix(".yaml")
        .tempfile()
        .map_err(|e| e.to_string())?;
    if load_config_file(file.path()).is_ok() {
        return Err("expected yaml to be rejected".into());
    }
    Ok(())
}

#[test]
fn config_file_fills_missing_cli_values() -> Result<(), String> {
    let (mut args, matches) = parse_args(&["volley"])?;
    let config = toml::from_str(
        r#"
[request]
url = "http://localhost:1234"

[runner]
concurrency = 8
interval = "100ms"
"#,
    )
    .map_err(|e| e.to_string())?;

    apply_config(&mut args, &matches, &config).map_err(|e| e.to_string())?;
    if args.url.as_deref() != Some("http://localhost:1234") {
        return Err(format!("url: {:?}", args.url));
    }
    if args.concurrency != 8 || args.interval != Duration::from_millis(100) {
        return Err("runner values not applied".into());
    }
    Ok(())
}

#[test]
fn explicit_cli_flags_win_over_config_file() -> Result<(), String> {
    let (mut args, matches) =
        parse_args(&["volley", "-u", "http://cli.example", "-c", "2"])?;
    let config = toml::from_str(
        r#"
[request]
url = "http://file.example"

[runner]
concurrency = 50
"#,
    )
    .map_err(|e| e.to_string())?;

    apply_config(&mut args, &matches, &config).map_err(|e| e.to_string())?;
    if args.url.as_deref() != Some("http://cli.example") || args.concurrency != 2 {
        return Err("CLI values must take precedence".into());
    }
    Ok(())
}

#[test]
fn build_requires_a_url() -> Result<(), String> {
    let (args, _) = parse_args(&["volley"])?;
    match build_benchmark_config(&args, None) {
        Err(ConfigError::MissingUrl) => Ok(()),
        other => Err(format!("expected MissingUrl, got {other:?}")),
    }
}

#[test]
fn build_rejects_zero_concurrency() -> Result<(), String> {
    let (args, _) = parse_args(&["volley", "-u", "http://localhost", "-c", "0"])?;
    match build_benchmark_config(&args, None) {
        Err(ConfigError::ZeroConcurrency) => Ok(()),
        other => Err(format!("expected ZeroConcurrency, got {other:?}")),
    }
}

#[test]
fn build_defaults_output_to_stdout() -> Result<(), String> {
    let (args, _) = parse_args(&["volley", "-u", "http://localhost"])?;
    let config = build_benchmark_config(&args, None).map_err(|e| e.to_string())?;
    if config.output.out != vec![ExportKind::Stdout] {
        return Err(format!("out: {:?}", config.output.out));
    }
    if config.runner.requests != 0 {
        return Err("default request cap must be unbounded".into());
    }
    Ok(())
}

#[test]
fn remote_output_requires_a_remote_url() -> Result<(), String> {
    let (args, _) = parse_args(&["volley", "-u", "http://localhost", "--out", "remote"])?;
    match build_benchmark_config(&args, None) {
        Err(ConfigError::MissingRemoteUrl) => Ok(()),
        other => Err(format!("expected MissingRemoteUrl, got {other:?}")),
    }
}
