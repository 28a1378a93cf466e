//! Configuration loading and typed config structures for the Orbit engine.
//!
//! The configuration lives in `orbit-config.yaml`. This module defines
//! strongly-typed structs that mirror the YAML structure, and provides a
//! loader that reads the file and applies environment overrides.
//!
//! ```yaml
//! game:
//!   pickup_len: 3
//!   rounds: 100
//!   total_labels: 0      # 0 keeps the input labels as they are
//!   mode: labeling       # labeling | product
//! input:
//!   path: input.txt
//! progress:
//!   interval_rounds: 1000000
//! logging:
//!   level: info
//! ```

use std::path::{Path, PathBuf};

use orbit_ring::Label;
use serde::Deserialize;

use crate::game::DEFAULT_PICKUP_LEN;
use crate::score::ScoringMode;

/// Environment variable overriding `input.path`.
pub const INPUT_ENV: &str = "ORBIT_INPUT";

/// Environment variable overriding `game.rounds`.
pub const ROUNDS_ENV: &str = "ORBIT_ROUNDS";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// An environment override held a value that could not be parsed.
    #[error("invalid value {value:?} for {var}")]
    InvalidOverride {
        /// The environment variable name.
        var: &'static str,
        /// The rejected value.
        value: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration.
///
/// Mirrors the structure of `orbit-config.yaml`. Every section is optional
/// and falls back to its defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SimulationConfig {
    /// Game parameters.
    #[serde(default)]
    pub game: GameConfig,

    /// Where the starting labels come from.
    #[serde(default)]
    pub input: InputConfig,

    /// Progress reporting during long runs.
    #[serde(default)]
    pub progress: ProgressConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values:
    /// - `ORBIT_INPUT` overrides `input.path`
    /// - `ORBIT_ROUNDS` overrides `game.rounds`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::InvalidOverride`] for an unparsable override.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string, then apply environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::InvalidOverride`] for an unparsable override.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        Self::parse_with_overrides(yaml, |var| std::env::var(var).ok())
    }

    /// Parse configuration from a YAML string, then apply overrides
    /// resolved through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::InvalidOverride`] for an unparsable override.
    pub fn parse_with_overrides<F>(yaml: &str, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.apply_overrides(lookup)?;
        Ok(config)
    }

    /// Override values from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOverride`] for an unparsable override.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|var| std::env::var(var).ok())
    }

    /// Override values using `lookup` to resolve variable names.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOverride`] for an unparsable override.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(INPUT_ENV) {
            self.input.path = PathBuf::from(path);
        }
        if let Some(value) = lookup(ROUNDS_ENV) {
            self.game.rounds = value
                .trim()
                .parse()
                .map_err(|_err| ConfigError::InvalidOverride {
                    var: ROUNDS_ENV,
                    value,
                })?;
        }
        Ok(())
    }
}

/// Game parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GameConfig {
    /// Number of labels picked up each round.
    #[serde(default = "default_pickup_len")]
    pub pickup_len: usize,

    /// Number of rounds to play.
    #[serde(default = "default_rounds")]
    pub rounds: u64,

    /// Pad the input labels up to this many labels. `0` disables padding.
    #[serde(default)]
    pub total_labels: Label,

    /// How the final ring is scored.
    #[serde(default)]
    pub mode: ScoringMode,

    /// First current label. Defaults to the first input label.
    #[serde(default)]
    pub start: Option<Label>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            pickup_len: default_pickup_len(),
            rounds: default_rounds(),
            total_labels: 0,
            mode: ScoringMode::default(),
            start: None,
        }
    }
}

/// Input source configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InputConfig {
    /// File whose first line holds the starting labels as digits.
    #[serde(default = "default_input_path")]
    pub path: PathBuf,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: default_input_path(),
        }
    }
}

/// Progress reporting configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProgressConfig {
    /// Log progress every this many rounds. `0` disables progress logging.
    #[serde(default = "default_interval_rounds")]
    pub interval_rounds: u64,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            interval_rounds: default_interval_rounds(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default log filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

const fn default_pickup_len() -> usize {
    DEFAULT_PICKUP_LEN
}

const fn default_rounds() -> u64 {
    100
}

fn default_input_path() -> PathBuf {
    PathBuf::from("input.txt")
}

const fn default_interval_rounds() -> u64 {
    1_000_000
}

fn default_log_level() -> String {
    "info".to_owned()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = SimulationConfig::default();
        assert_eq!(config.game.pickup_len, 3);
        assert_eq!(config.game.rounds, 100);
        assert_eq!(config.game.total_labels, 0);
        assert_eq!(config.game.mode, ScoringMode::Labeling);
        assert_eq!(config.input.path, PathBuf::from("input.txt"));
        assert_eq!(config.progress.interval_rounds, 1_000_000);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
game:
  pickup_len: 3
  rounds: 10000000
  total_labels: 1000000
  mode: product
  start: 3

input:
  path: "puzzles/day23.txt"

progress:
  interval_rounds: 500000

logging:
  level: "debug"
"#;
        let config = SimulationConfig::parse_with_overrides(yaml, |_| None).unwrap();

        assert_eq!(config.game.rounds, 10_000_000);
        assert_eq!(config.game.total_labels, 1_000_000);
        assert_eq!(config.game.mode, ScoringMode::Product);
        assert_eq!(config.game.start, Some(3));
        assert_eq!(config.input.path, PathBuf::from("puzzles/day23.txt"));
        assert_eq!(config.progress.interval_rounds, 500_000);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn parse_minimal_yaml() {
        let yaml = "game:\n  rounds: 10\n";
        let config = SimulationConfig::parse_with_overrides(yaml, |_| None).unwrap();

        // Rounds is overridden
        assert_eq!(config.game.rounds, 10);
        // Everything else uses defaults
        assert_eq!(config.game.pickup_len, 3);
        assert_eq!(config.game.mode, ScoringMode::Labeling);
        assert_eq!(config.progress.interval_rounds, 1_000_000);
    }

    #[test]
    fn unknown_mode_rejected() {
        let yaml = "game:\n  mode: sum\n";
        let err = SimulationConfig::parse(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::Yaml { .. }));
    }

    #[test]
    fn overrides_apply_after_yaml() {
        let yaml = "game:\n  rounds: 10\ninput:\n  path: from-yaml.txt\n";
        let config = SimulationConfig::parse_with_overrides(yaml, |var| match var {
            ROUNDS_ENV => Some("250".to_owned()),
            INPUT_ENV => Some("from-env.txt".to_owned()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.game.rounds, 250);
        assert_eq!(config.input.path, PathBuf::from("from-env.txt"));
    }

    #[test]
    fn invalid_override_fails_parse() {
        let err = SimulationConfig::parse_with_overrides("{}", |var| {
            (var == ROUNDS_ENV).then(|| "-1".to_owned())
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidOverride { .. }));
    }

    #[test]
    fn parse_reads_sections_not_covered_by_overrides() {
        let yaml = "game:\n  mode: product\n  total_labels: 20\nprogress:\n  interval_rounds: 0\n";
        let config = SimulationConfig::parse(yaml).unwrap();
        assert_eq!(config.game.mode, ScoringMode::Product);
        assert_eq!(config.game.total_labels, 20);
        assert_eq!(config.progress.interval_rounds, 0);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn from_file_reads_yaml() {
        let path = std::env::temp_dir().join(format!(
            "orbit-config-test-{}.yaml",
            std::process::id()
        ));
        std::fs::write(&path, "game:\n  mode: product\n  pickup_len: 4\n").unwrap();

        let result = SimulationConfig::from_file(&path);
        std::fs::remove_file(&path).unwrap();

        let config = result.unwrap();
        assert_eq!(config.game.mode, ScoringMode::Product);
        assert_eq!(config.game.pickup_len, 4);
    }

    #[test]
    fn overrides_replace_values() {
        let mut config = SimulationConfig::default();
        config
            .apply_overrides(|var| match var {
                INPUT_ENV => Some("other.txt".to_owned()),
                ROUNDS_ENV => Some(" 42 ".to_owned()),
                _ => None,
            })
            .unwrap();
        assert_eq!(config.input.path, PathBuf::from("other.txt"));
        assert_eq!(config.game.rounds, 42);
    }

    #[test]
    fn invalid_rounds_override_rejected() {
        let mut config = SimulationConfig::default();
        let err = config
            .apply_overrides(|var| (var == ROUNDS_ENV).then(|| "many".to_owned()))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidOverride {
                var: ROUNDS_ENV,
                ..
            }
        ));
        assert_eq!(config.game.rounds, 100);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = SimulationConfig::from_file(Path::new("does/not/exist.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
