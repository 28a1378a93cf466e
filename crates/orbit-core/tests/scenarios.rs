//! End-to-end game scenarios for `orbit-core`.
//!
//! These drive the public API the way the engine binary does: parse a line
//! of digits, build a game, play rounds, and score the final ring.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::missing_panics_doc
)]

use orbit_core::config::GameConfig;
use orbit_core::game::{DEFAULT_PICKUP_LEN, Game};
use orbit_core::input::{expand_labels, parse_labels};
use orbit_core::runner::{self, NoOpObserver, RoundObserver};
use orbit_core::score::{Answer, ScoringMode};
use orbit_ring::{Label, Ring};

const EXAMPLE: &str = "389125467";

/// Ring order (any rotation) and current label before each of the first ten
/// moves, and after the tenth.
const EXPECTED_MOVES: [([Label; 9], Label); 11] = [
    ([3, 8, 9, 1, 2, 5, 4, 6, 7], 3),
    ([3, 2, 8, 9, 1, 5, 4, 6, 7], 2),
    ([3, 2, 5, 4, 6, 7, 8, 9, 1], 5),
    ([7, 2, 5, 8, 9, 1, 3, 4, 6], 8),
    ([3, 2, 5, 8, 4, 6, 7, 9, 1], 4),
    ([9, 2, 5, 8, 4, 1, 3, 6, 7], 1),
    ([7, 2, 5, 8, 4, 1, 9, 3, 6], 9),
    ([8, 3, 6, 7, 4, 1, 9, 2, 5], 2),
    ([7, 4, 1, 5, 8, 3, 9, 2, 6], 6),
    ([5, 7, 4, 1, 8, 3, 9, 2, 6], 5),
    ([5, 8, 3, 7, 4, 1, 9, 2, 6], 8),
];

fn example_game() -> Game {
    Game::new(parse_labels(EXAMPLE).unwrap(), DEFAULT_PICKUP_LEN, None).unwrap()
}

// =============================================================================
// Small scenario
// =============================================================================

#[test]
fn every_move_of_worked_example() {
    let mut game = example_game();

    for (round, (order, current)) in EXPECTED_MOVES.iter().enumerate() {
        assert_eq!(game.current(), *current, "current label before move {round}");
        assert_eq!(
            *game.ring(),
            Ring::new(*order).unwrap(),
            "ring order before move {round}"
        );
        game.step().unwrap();
    }
}

#[test]
fn labeling_after_ten_and_hundred_rounds() {
    assert_eq!(runner::play_labeling(EXAMPLE, 10).unwrap(), "92658374");
    assert_eq!(runner::play_labeling(EXAMPLE, 100).unwrap(), "67384529");
}

#[test]
fn run_game_matches_play_labeling() {
    let config = GameConfig {
        rounds: 100,
        mode: ScoringMode::Labeling,
        ..GameConfig::default()
    };
    let outcome = runner::run_game(&config, parse_labels(EXAMPLE).unwrap(), &mut NoOpObserver)
        .unwrap();
    assert_eq!(outcome.answer, Answer::Labels("67384529".to_owned()));
}

// =============================================================================
// Invariants
// =============================================================================

#[test]
fn ring_stays_consistent_every_round() {
    let mut game = Game::new(
        expand_labels(parse_labels(EXAMPLE).unwrap(), 100),
        DEFAULT_PICKUP_LEN,
        None,
    )
    .unwrap();

    for _ in 0..2_000 {
        game.step().unwrap();
        game.ring().verify().unwrap();
        assert_eq!(game.ring().len(), 100);

        // Walking the successors N times from any label returns to it.
        let start = game.current();
        let mut label = start;
        for _ in 0..game.size() {
            label = game.ring().successor(label).unwrap();
        }
        assert_eq!(label, start);
    }
}

/// Counts notifications without touching the game.
struct Counter {
    seen: u64,
    last: Option<(u64, u64)>,
}

impl RoundObserver for Counter {
    fn on_round(&mut self, round: u64, total: u64, _current: Label) {
        self.seen += 1;
        self.last = Some((round, total));
    }
}

#[test]
fn observer_does_not_change_outcome() {
    let mut observed = example_game();
    let mut counter = Counter {
        seen: 0,
        last: None,
    };
    runner::run_rounds(&mut observed, 100, &mut counter).unwrap();

    let mut silent = example_game();
    runner::run_rounds(&mut silent, 100, &mut NoOpObserver).unwrap();

    assert_eq!(counter.seen, 100);
    assert_eq!(counter.last, Some((100, 100)));
    assert_eq!(observed.ring(), silent.ring());
    assert_eq!(observed.current(), silent.current());
}

// =============================================================================
// Scaled scenario
// =============================================================================

#[test]
fn product_after_ten_million_rounds_on_a_million_labels() {
    let product = runner::play_product(EXAMPLE, 1_000_000, 10_000_000).unwrap();
    assert_eq!(product, 149_245_887_792);
}
