use std::time::Duration;

use super::Report;
use crate::runner::Record;

fn ok(ms: u64) -> Record {
    Record::success(Duration::from_millis(ms), 200, 64, Vec::new())
}

#[test]
fn counts_split_between_success_and_fail() -> Result<(), String> {
    let records = vec![
        ok(10),
        Record::failure("connection refused".into(), Vec::new()),
        ok(30),
    ];
    let report = Report::new(records, 1, Duration::from_secs(1));
    if report.length != 3 || report.success != 2 || report.fail != 1 {
        return Err(format!(
            "unexpected counts: length={} success={} fail={}",
            report.length, report.success, report.fail
        ));
    }
    Ok(())
}

#[test]
fn stats_bound_the_mean() -> Result<(), String> {
    let report = Report::new(vec![ok(10), ok(20), ok(60)], 0, Duration::from_secs(1));
    let stats = report.stats();
    if stats.min != Duration::from_millis(10) {
        return Err(format!("min: {:?}", stats.min));
    }
    if stats.max != Duration::from_millis(60) {
        return Err(format!("max: {:?}", stats.max));
    }
    if stats.mean != Duration::from_millis(30) {
        return Err(format!("mean: {:?}", stats.mean));
    }
    if stats.mean < stats.min || stats.mean > stats.max {
        return Err("mean outside [min, max]".into());
    }
    Ok(())
}

#[test]
fn stats_ignore_failed_records() -> Result<(), String> {
    let records = vec![
        ok(40),
        Record::failure("timed out after 10s".into(), Vec::new()),
        ok(40),
    ];
    let report = Report::new(records, 1, Duration::from_secs(1));
    let stats = report.stats();
    if stats.mean != Duration::from_millis(40) {
        return Err(format!("failures leaked into mean: {:?}", stats.mean));
    }
    Ok(())
}

#[test]
fn stats_of_empty_report_are_zero() -> Result<(), String> {
    let report = Report::new(Vec::new(), 0, Duration::ZERO);
    let stats = report.stats();
    if stats.min != Duration::ZERO || stats.max != Duration::ZERO || stats.mean != Duration::ZERO {
        return Err(format!("expected zeros, got {stats:?}"));
    }
    Ok(())
}

#[test]
fn all_failures_yield_zero_stats() -> Result<(), String> {
    let records = vec![
        Record::failure("a".into(), Vec::new()),
        Record::failure("b".into(), Vec::new()),
    ];
    let report = Report::new(records, 2, Duration::from_secs(1));
    if report.success != 0 {
        return Err(format!("success: {}", report.success));
    }
    if report.stats().max != Duration::ZERO {
        return Err("expected zero max".into());
    }
    Ok(())
}

#[test]
fn report_serializes_duration_as_microseconds() -> Result<(), String> {
    let report = Report::new(vec![ok(5)], 0, Duration::from_millis(250));
    let value = serde_json::to_value(&report).map_err(|e| e.to_string())?;
    let us = value
        .get("duration_us")
        .and_then(serde_json::Value::as_u64)
        .ok_or("missing duration_us")?;
    if us != 250_000 {
        return Err(format!("duration_us: {us}"));
    }
    Ok(())
}
