//! Benchmark results: the collected records plus aggregate statistics.

use std::time::Duration;

use serde::{Serialize, Serializer};

use crate::runner::Record;

#[cfg(test)]
mod tests;

/// Serializes a duration as whole microseconds so report files stay
/// stable across platforms.
///
/// # Errors
///
/// Propagates the serializer's own failure, if any.
pub fn serialize_duration_us<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u128(value.as_micros())
}

/// The outcome of a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub records: Vec<Record>,
    /// Total number of calls performed, successful or not.
    pub length: usize,
    pub success: usize,
    pub fail: usize,
    /// Wall-clock duration of the whole run.
    #[serde(rename = "duration_us", serialize_with = "serialize_duration_us")]
    pub duration: Duration,
}

/// Latency aggregates over the successful records of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Stats {
    #[serde(rename = "min_us", serialize_with = "serialize_duration_us")]
    pub min: Duration,
    #[serde(rename = "max_us", serialize_with = "serialize_duration_us")]
    pub max: Duration,
    #[serde(rename = "mean_us", serialize_with = "serialize_duration_us")]
    pub mean: Duration,
}

impl Report {
    #[must_use]
    pub fn new(records: Vec<Record>, fail: usize, duration: Duration) -> Self {
        let length = records.len();
        Self {
            records,
            length,
            success: length.saturating_sub(fail),
            fail,
            duration,
        }
    }

    /// Min, max and mean latency over successful records. Failed records
    /// carry no meaningful timing and are excluded; with no successes all
    /// three aggregates are zero.
    #[must_use]
    pub fn stats(&self) -> Stats {
        let mut min = Duration::MAX;
        let mut max = Duration::ZERO;
        let mut sum = Duration::ZERO;
        let mut count: u32 = 0;
        for record in &self.records {
            if record.is_failure() {
                continue;
            }
            min = min.min(record.elapsed);
            max = max.max(record.elapsed);
            sum = sum.saturating_add(record.elapsed);
            count = count.saturating_add(1);
        }
        if count == 0 {
            return Stats {
                min: Duration::ZERO,
                max: Duration::ZERO,
                mean: Duration::ZERO,
            };
        }
        Stats {
            min,
            max,
            mean: sum.checked_div(count).unwrap_or_default(),
        }
    }
}
