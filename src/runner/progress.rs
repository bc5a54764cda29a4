use std::io::Write;
use std::time::Duration;

use crate::ansi;
use crate::shutdown::StopCause;

use super::state::RunSnapshot;

const TIMELINE_LEN: usize = 10;
const TIMELINE_BLOCK: &str = "\u{25fc}\u{fe0e}";

/// Where live progress lines go. The run tolerates a silent sink: progress
/// is observability output, never a correctness-relevant effect.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ProgressSink {
    #[default]
    Stdout,
    Silent,
}

impl ProgressSink {
    pub(crate) fn print(self, line: &str) {
        match self {
            ProgressSink::Stdout => {
                let mut out = std::io::stdout();
                out.write_all(line.as_bytes()).ok();
                out.flush().ok();
            }
            ProgressSink::Silent => {}
        }
    }

    /// Terminates the overwritten progress line once the run is over.
    pub(crate) fn finish_line(self) {
        self.print("\n");
    }
}

/// Renders the single overwritten progress line: colored status, a ten-block
/// timeline, percent done, request count against the cap, failure count, and
/// the countdown to the global deadline.
pub(crate) fn render_state(
    snapshot: &RunSnapshot,
    max_iter: u64,
    global_timeout: Duration,
) -> String {
    let status = status_text(snapshot);
    let pct = percent_done(snapshot, max_iter, global_timeout);
    let timeline = render_timeline(pct);
    let cap = if max_iter == 0 {
        "\u{221e}".to_owned()
    } else {
        max_iter.to_string()
    };
    let countdown = global_timeout.saturating_sub(snapshot.elapsed);

    format!(
        "{} {} {}% | {}/{} requests | {} failed | {}s timeout       \r",
        status,
        timeline,
        pct,
        snapshot.collected,
        cap,
        snapshot.fail,
        countdown.as_secs(),
    )
}

fn status_text(snapshot: &RunSnapshot) -> String {
    if !snapshot.done {
        return ansi::yellow("RUNNING");
    }
    match snapshot.cause {
        None => ansi::green("DONE"),
        Some(StopCause::Canceled) => ansi::cyan("CANCELED"),
        Some(StopCause::Deadline) => ansi::cyan("TIMEOUT"),
    }
}

fn render_timeline(pct: usize) -> String {
    let done_blocks = pct.saturating_mul(TIMELINE_LEN).saturating_add(99) / 100;
    let done_blocks = done_blocks.min(TIMELINE_LEN);
    let mut timeline = String::new();
    for i in 0..TIMELINE_LEN {
        if i < done_blocks {
            timeline.push_str(&ansi::green(TIMELINE_BLOCK));
        } else {
            timeline.push_str(&ansi::grey(TIMELINE_BLOCK));
        }
    }
    timeline
}

fn percent_done(snapshot: &RunSnapshot, max_iter: u64, global_timeout: Duration) -> usize {
    let pct = if max_iter == 0 {
        let total = global_timeout.as_millis().max(1);
        let elapsed = snapshot.elapsed.as_millis();
        elapsed.saturating_mul(100).checked_div(total).unwrap_or(0)
    } else {
        let collected = snapshot.collected as u128;
        collected
            .saturating_mul(100)
            .checked_div(u128::from(max_iter.max(1)))
            .unwrap_or(0)
    };
    usize::try_from(pct.min(100)).unwrap_or(100)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::runner::state::RunSnapshot;

    fn snapshot(collected: usize, elapsed: Duration) -> RunSnapshot {
        RunSnapshot {
            collected,
            fail: 0,
            done: false,
            cause: None,
            elapsed,
        }
    }

    #[test]
    fn rendered_line_carries_the_failure_count() {
        let mut snap = snapshot(7, Duration::from_secs(1));
        snap.fail = 2;
        let line = render_state(&snap, 12, Duration::from_secs(30));
        assert!(line.contains("2 failed"));
    }

    #[test]
    fn percent_is_capped_at_100() {
        let snap = snapshot(25, Duration::from_secs(1));
        assert_eq!(percent_done(&snap, 10, Duration::from_secs(30)), 100);
    }

    #[test]
    fn percent_tracks_records_for_bounded_runs() {
        let snap = snapshot(3, Duration::from_secs(1));
        assert_eq!(percent_done(&snap, 12, Duration::from_secs(30)), 25);
    }

    #[test]
    fn percent_tracks_elapsed_for_unbounded_runs() {
        let snap = snapshot(500, Duration::from_secs(15));
        assert_eq!(percent_done(&snap, 0, Duration::from_secs(30)), 50);
    }

    #[test]
    fn rendered_line_overwrites_itself() {
        let snap = snapshot(3, Duration::from_secs(1));
        let line = render_state(&snap, 12, Duration::from_secs(30));
        assert!(line.ends_with('\r'));
        assert!(line.contains("3/12 requests"));
        assert!(line.contains("RUNNING"));
    }

    #[test]
    fn unbounded_cap_renders_as_infinity() {
        let snap = snapshot(3, Duration::from_secs(1));
        let line = render_state(&snap, 0, Duration::from_secs(30));
        assert!(line.contains("3/\u{221e} requests"));
    }
}
