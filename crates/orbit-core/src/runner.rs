//! Round loop with an observer hook.
//!
//! [`run_rounds`] drives a [`Game`] for a fixed number of rounds, calling a
//! [`RoundObserver`] after each one. [`run_game`] wraps the whole lifecycle
//! (label expansion, construction, the loop, scoring) for a
//! [`GameConfig`]. [`play_labeling`] and [`play_product`] are one-call
//! entry points for the two standard scenarios.

use orbit_ring::{Label, RingError};
use tracing::{debug, info, warn};

use crate::config::GameConfig;
use crate::game::{DEFAULT_PICKUP_LEN, Game, GameError};
use crate::input::{self, InputError};
use crate::score::{self, Answer};

/// Errors that can occur during a full game run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// The label input could not be parsed.
    #[error("input error: {source}")]
    Input {
        /// The underlying input error.
        #[from]
        source: InputError,
    },

    /// Building or stepping the game failed.
    #[error("game error: {source}")]
    Game {
        /// The underlying game error.
        #[from]
        source: GameError,
    },

    /// Reading the answer off the final ring failed.
    #[error("score error: {source}")]
    Score {
        /// The underlying ring error.
        #[from]
        source: RingError,
    },
}

/// Callback invoked after each round completes.
///
/// Implementations must not influence the game; they only observe it.
pub trait RoundObserver {
    /// Called after round `round` of `total` completes, with the new
    /// current label.
    fn on_round(&mut self, round: u64, total: u64, current: Label);
}

/// A no-op round observer.
pub struct NoOpObserver;

impl RoundObserver for NoOpObserver {
    fn on_round(&mut self, _round: u64, _total: u64, _current: Label) {}
}

/// Summary of a completed round loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Rounds played by this call.
    pub rounds: u64,
    /// Current label after the last round.
    pub final_current: Label,
}

/// Outcome of a full game run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOutcome {
    /// The scored answer.
    pub answer: Answer,
    /// Number of labels in the ring.
    pub size: usize,
    /// Rounds played.
    pub rounds: u64,
    /// Current label after the last round.
    pub final_current: Label,
}

/// Play `rounds` rounds of `game`, notifying `observer` after each.
///
/// # Errors
///
/// Returns the first [`GameError`] raised by a round. The game is left in
/// the state reached before the failing round.
pub fn run_rounds(
    game: &mut Game,
    rounds: u64,
    observer: &mut dyn RoundObserver,
) -> Result<RunSummary, GameError> {
    debug!(rounds, start = game.current(), "round loop starting");

    for round in 1..=rounds {
        let current = game.step()?;
        observer.on_round(round, rounds, current);
    }

    Ok(RunSummary {
        rounds,
        final_current: game.current(),
    })
}

/// Build a game from `labels` per `config`, play it, and score it.
///
/// Labels are first expanded to `config.total_labels` when that is non-zero.
///
/// # Errors
///
/// Returns [`RunnerError`] if the game cannot be built, a round fails, or
/// scoring fails.
pub fn run_game(
    config: &GameConfig,
    labels: Vec<Label>,
    observer: &mut dyn RoundObserver,
) -> Result<GameOutcome, RunnerError> {
    let labels = if config.total_labels > 0 {
        if total_below_input(&labels, config.total_labels) {
            warn!(
                total_labels = config.total_labels,
                input_max = ?labels.iter().max(),
                "total_labels is below the largest input label, keeping the input as is"
            );
        }
        input::expand_labels(labels, config.total_labels)
    } else {
        labels
    };

    let mut game = Game::new(labels, config.pickup_len, config.start)?;
    info!(
        size = game.size(),
        rounds = config.rounds,
        pickup_len = game.pickup_len(),
        mode = ?config.mode,
        start = game.current(),
        "Game starting"
    );

    let summary = run_rounds(&mut game, config.rounds, observer)?;
    let answer = game.score(config.mode)?;

    Ok(GameOutcome {
        answer,
        size: game.size(),
        rounds: summary.rounds,
        final_current: summary.final_current,
    })
}

/// Whether padding to `total` is skipped because an input label already
/// exceeds it.
fn total_below_input(labels: &[Label], total: Label) -> bool {
    labels.iter().any(|&label| label > total)
}

/// Log the outcome of a game run.
pub fn log_game_end(outcome: &GameOutcome) {
    info!(
        size = outcome.size,
        rounds = outcome.rounds,
        final_current = outcome.final_current,
        answer = %outcome.answer,
        "Game finished"
    );
}

/// Play the standard game on a line of digits and return the labels after
/// label 1.
///
/// # Errors
///
/// Returns [`RunnerError`] if the input is invalid or the game fails.
pub fn play_labeling(line: &str, rounds: u64) -> Result<String, RunnerError> {
    let mut game = Game::new(input::parse_labels(line)?, DEFAULT_PICKUP_LEN, None)?;
    run_rounds(&mut game, rounds, &mut NoOpObserver)?;
    Ok(score::labels_after_one(game.ring())?)
}

/// Play the standard game on a line of digits expanded to `total` labels and
/// return the product of the two labels after label 1.
///
/// # Errors
///
/// Returns [`RunnerError`] if the input is invalid or the game fails.
pub fn play_product(line: &str, total: Label, rounds: u64) -> Result<u64, RunnerError> {
    let labels = input::expand_labels(input::parse_labels(line)?, total);
    let mut game = Game::new(labels, DEFAULT_PICKUP_LEN, None)?;
    run_rounds(&mut game, rounds, &mut NoOpObserver)?;
    Ok(score::product_after_one(game.ring())?)
}
