//! Round simulation, configuration, and scoring for the Orbit ring engine.
//!
//! This crate drives a [`Ring`] through a fixed number of rounds. Each round
//! picks up the run of labels after the current label, chooses a destination
//! by counting down from the current label, moves the run there, and
//! advances the current label by one position.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `orbit-config.yaml` into
//!   strongly-typed structs.
//! - [`game`] -- [`Game`] state and the single-round step.
//! - [`input`] -- Parsing a line of digits into labels and padding the
//!   label set up to a total count.
//! - [`runner`] -- The round loop with its [`RoundObserver`] hook, plus
//!   one-call entry points for the standard scenarios.
//! - [`score`] -- Reading the answer off the final ring.
//!
//! [`Ring`]: orbit_ring::Ring
//! [`Game`]: game::Game
//! [`RoundObserver`]: runner::RoundObserver

pub mod config;
pub mod game;
pub mod input;
pub mod runner;
pub mod score;
