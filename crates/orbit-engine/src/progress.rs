//! Round observer that logs progress during long runs.
//!
//! Logging is best effort: the observer only reads the round counter and
//! never touches the game.

use std::time::Instant;

use orbit_core::runner::RoundObserver;
use orbit_ring::Label;
use tracing::info;

/// Logs a progress line every `interval` rounds.
pub struct ProgressLogger {
    /// Rounds between log lines. `0` disables logging.
    interval: u64,
    /// When the run started.
    started: Instant,
}

impl ProgressLogger {
    /// Create a progress logger reporting every `interval` rounds.
    pub fn new(interval: u64) -> Self {
        Self {
            interval,
            started: Instant::now(),
        }
    }

    /// Whether round `round` should produce a log line.
    const fn should_report(&self, round: u64) -> bool {
        match round.checked_rem(self.interval) {
            Some(rem) => rem == 0,
            None => false,
        }
    }
}

impl RoundObserver for ProgressLogger {
    fn on_round(&mut self, round: u64, total: u64, current: Label) {
        if !self.should_report(round) {
            return;
        }
        let percent = percent_complete(round, total);
        info!(
            round,
            total,
            percent,
            current,
            elapsed_ms = self.started.elapsed().as_millis(),
            "Progress"
        );
    }
}

/// Whole-number percentage of `round` out of `total`.
fn percent_complete(round: u64, total: u64) -> u64 {
    u128::from(round)
        .saturating_mul(100)
        .checked_div(u128::from(total))
        .and_then(|p| u64::try_from(p).ok())
        .unwrap_or(100)
}
