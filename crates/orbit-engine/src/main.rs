//! Engine binary for the Orbit ring simulation.
//!
//! Loads configuration, reads the starting labels, plays the configured
//! number of rounds and prints the answer on stdout.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `orbit-config.yaml` (or `ORBIT_CONFIG`)
//! 2. Initialize structured logging (tracing)
//! 3. Read and parse the first line of the input file
//! 4. Run the game with a progress logger attached
//! 5. Log the result and print the answer

mod error;
mod progress;

use std::path::{Path, PathBuf};
use std::time::Instant;

use orbit_core::config::SimulationConfig;
use orbit_core::input;
use orbit_core::runner;
use orbit_ring::Label;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;
use crate::progress::ProgressLogger;

/// Environment variable naming an alternative config file.
const CONFIG_ENV: &str = "ORBIT_CONFIG";

/// Config file read when `ORBIT_CONFIG` is unset.
const DEFAULT_CONFIG_PATH: &str = "orbit-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if the config or input cannot be loaded, or the game
/// itself fails.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration. Logging depends on it, so nothing is logged yet.
    let (config, config_path) = load_config()?;

    // 2. Initialize structured logging.
    let level = config.logging.level.clone();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_target(true)
        .init();

    info!("orbit-engine starting");
    match &config_path {
        Some(path) => info!(path = %path.display(), "Configuration loaded"),
        None => info!("Config file not found, using defaults"),
    }
    info!(
        rounds = config.game.rounds,
        pickup_len = config.game.pickup_len,
        total_labels = config.game.total_labels,
        mode = ?config.game.mode,
        input = %config.input.path.display(),
        "Game configuration"
    );

    // 3. Read the starting labels.
    let labels = load_labels(&config.input.path)?;
    info!(count = labels.len(), "Input labels parsed");

    // 4. Run the game.
    let mut progress = ProgressLogger::new(config.progress.interval_rounds);
    let started = Instant::now();
    let outcome =
        runner::run_game(&config.game, labels, &mut progress).map_err(EngineError::from)?;

    // 5. Report.
    runner::log_game_end(&outcome);
    info!(
        elapsed_ms = started.elapsed().as_millis(),
        "orbit-engine finished"
    );
    println!("{}", outcome.answer);

    Ok(())
}

/// Load configuration from `ORBIT_CONFIG` or `orbit-config.yaml`.
///
/// Falls back to defaults (with environment overrides applied) when the file
/// does not exist. Returns the path actually read, if any.
fn load_config() -> Result<(SimulationConfig, Option<PathBuf>), EngineError> {
    let config_path = std::env::var_os(CONFIG_ENV)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);

    if config_path.exists() {
        let config = SimulationConfig::from_file(&config_path)?;
        Ok((config, Some(config_path)))
    } else {
        let mut config = SimulationConfig::default();
        config.apply_env_overrides()?;
        Ok((config, None))
    }
}

/// Read the first line of the input file and parse it into labels.
fn load_labels(path: &Path) -> Result<Vec<Label>, EngineError> {
    let contents = std::fs::read_to_string(path).map_err(|source| EngineError::InputFile {
        path: path.to_path_buf(),
        source,
    })?;
    let line = contents.lines().next().unwrap_or_default();
    Ok(input::parse_labels(line)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use orbit_core::input::InputError;

    use super::*;

    /// Write `contents` to a per-test file in the temp directory.
    fn input_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "orbit-engine-{}-{name}.txt",
            std::process::id()
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn reads_only_the_first_line() {
        let path = input_file("first-line", "389125467\n12345\n");
        let labels = load_labels(&path);
        std::fs::remove_file(&path).unwrap();

        assert_eq!(labels.unwrap(), vec![3, 8, 9, 1, 2, 5, 4, 6, 7]);
    }

    #[test]
    fn empty_file_is_an_input_error() {
        let path = input_file("empty", "");
        let err = load_labels(&path).unwrap_err();
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(
            err,
            EngineError::Input {
                source: InputError::Empty
            }
        ));
    }

    #[test]
    fn missing_file_names_the_path() {
        let path = std::env::temp_dir().join("orbit-engine-does-not-exist.txt");
        let err = load_labels(&path).unwrap_err();

        assert!(matches!(
            err,
            EngineError::InputFile { path: ref reported, .. } if *reported == path
        ));
    }
}
