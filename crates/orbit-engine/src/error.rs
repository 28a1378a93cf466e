//! Error types for the engine binary.
//!
//! [`EngineError`] is the top-level error type that wraps all possible
//! failure modes during engine startup and the game run.

use std::path::PathBuf;

/// Top-level error for the engine binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: orbit_core::config::ConfigError,
    },

    /// The input file could not be read.
    #[error("failed to read input file {}: {source}", path.display())]
    InputFile {
        /// Path of the input file.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The input file did not hold a valid label line.
    #[error("input error: {source}")]
    Input {
        /// The underlying input error.
        #[from]
        source: orbit_core::input::InputError,
    },

    /// The game run failed.
    #[error("runner error: {source}")]
    Runner {
        /// The underlying runner error.
        #[from]
        source: orbit_core::runner::RunnerError,
    },
}
