use clap::Parser;

use super::cli::normalize_requests;
use super::parsers::{parse_duration_arg, parse_header};
use super::{ExportKind, HttpMethod, RunnerArgs};

#[test]
fn parses_minimal_invocation_with_defaults() -> Result<(), String> {
    let args = RunnerArgs::try_parse_from(["volley", "--url", "http://localhost:8080"])
        .map_err(|e| e.to_string())?;
    if args.method != HttpMethod::Get {
        return Err(format!("method: {:?}", args.method));
    }
    if args.concurrency != 1 || args.requests != 0 {
        return Err("unexpected runner defaults".into());
    }
    if args.timeout.as_secs() != 10 || args.global_timeout.as_secs() != 30 {
        return Err("unexpected timeout defaults".into());
    }
    Ok(())
}

#[test]
fn repeatable_headers_accumulate() -> Result<(), String> {
    let args = RunnerArgs::try_parse_from([
        "volley",
        "-u",
        "http://localhost",
        "-H",
        "Accept: application/json",
        "-H",
        "X-Token:abc",
    ])
    .map_err(|e| e.to_string())?;
    if args.headers
        != vec![
            ("Accept".to_owned(), "application/json".to_owned()),
            ("X-Token".to_owned(), "abc".to_owned()),
        ]
    {
        return Err(format!("headers: {:?}", args.headers));
    }
    Ok(())
}

#[test]
fn header_without_colon_is_rejected() {
    assert!(parse_header("not-a-header").is_err());
    assert!(parse_header(": empty-key").is_err());
}

#[test]
fn duration_arg_supports_units() -> Result<(), String> {
    let parsed = parse_duration_arg("250ms").map_err(|e| e.to_string())?;
    if parsed.as_millis() != 250 {
        return Err(format!("250ms parsed to {parsed:?}"));
    }
    let parsed = parse_duration_arg("2m").map_err(|e| e.to_string())?;
    if parsed.as_secs() != 120 {
        return Err(format!("2m parsed to {parsed:?}"));
    }
    assert!(parse_duration_arg("fast").is_err());
    Ok(())
}

#[test]
fn negative_request_counts_mean_unbounded() -> Result<(), String> {
    let args =
        RunnerArgs::try_parse_from(["volley", "-u", "http://localhost", "-n", "-1"])
            .map_err(|e| e.to_string())?;
    if normalize_requests(args.requests) != 0 {
        return Err("expected -1 to normalize to unbounded".into());
    }
    if normalize_requests(12) != 12 {
        return Err("positive counts must pass through".into());
    }
    Ok(())
}

#[test]
fn out_flag_accepts_known_strategies() -> Result<(), String> {
    let args = RunnerArgs::try_parse_from([
        "volley",
        "-u",
        "http://localhost",
        "--out",
        "stdout",
        "--out",
        "json",
    ])
    .map_err(|e| e.to_string())?;
    if args.out != vec![ExportKind::Stdout, ExportKind::Json] {
        return Err(format!("out: {:?}", args.out));
    }
    assert!("remote".parse::<ExportKind>().is_ok());
    assert!("csv".parse::<ExportKind>().is_err());
    Ok(())
}
