//! Game configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use pairs_core::{GridSize, RevealTiming};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Tunable settings for a game of pairs.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Board rows.
    #[serde(default = "default_rows")]
    rows: usize,

    /// Board columns.
    #[serde(default = "default_cols")]
    cols: usize,

    /// How long a matched pair stays highlighted, in milliseconds.
    #[serde(default = "default_match_delay_ms")]
    match_delay_ms: u64,

    /// How long a mismatched pair stays face-up, in milliseconds.
    #[serde(default = "default_mismatch_delay_ms")]
    mismatch_delay_ms: u64,

    /// Fixed shuffle seed. Drawn from the clock when absent.
    #[serde(default)]
    seed: Option<u64>,

    /// Upper bound on the time between two frames, in milliseconds.
    #[serde(default = "default_frame_interval_ms")]
    frame_interval_ms: u64,

    /// Turn indicator speed, in full slides per second.
    #[serde(default = "default_indicator_speed")]
    indicator_speed: f64,

    /// Where tracing output goes while the terminal is in raw mode.
    #[serde(default = "default_log_file")]
    log_file: PathBuf,
}

fn default_rows() -> usize {
    GridSize::STANDARD.rows()
}

fn default_cols() -> usize {
    GridSize::STANDARD.cols()
}

fn default_match_delay_ms() -> u64 {
    500
}

fn default_mismatch_delay_ms() -> u64 {
    1000
}

fn default_frame_interval_ms() -> u64 {
    16
}

fn default_indicator_speed() -> f64 {
    5.0
}

fn default_log_file() -> PathBuf {
    PathBuf::from("pairs_duel.log")
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            cols: default_cols(),
            match_delay_ms: default_match_delay_ms(),
            mismatch_delay_ms: default_mismatch_delay_ms(),
            seed: None,
            frame_interval_ms: default_frame_interval_ms(),
            indicator_speed: default_indicator_speed(),
            log_file: default_log_file(),
        }
    }
}

impl GameConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        Self::from_toml(&content)
    }

    /// Parses and validates configuration text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the file if it exists, otherwise falls back to defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::load_with_source(path).map(|(config, _)| config)
    }

    /// Like [`GameConfig::load`], also reporting where the values came from.
    #[instrument(skip(path), fields(path = %path.display()))]
    pub fn load_with_source(path: &Path) -> Result<(Self, ConfigSource), ConfigError> {
        if path.exists() {
            let config = Self::from_file(path)?;
            info!(rows = config.rows, cols = config.cols, "Config loaded");
            Ok((config, ConfigSource::File(path.to_path_buf())))
        } else {
            info!("Config file not found, using defaults");
            Ok((Self::default(), ConfigSource::Defaults))
        }
    }

    /// Applies command-line overrides on top of the loaded values.
    #[instrument(skip(self))]
    pub fn with_overrides(
        mut self,
        rows: Option<usize>,
        cols: Option<usize>,
        seed: Option<u64>,
        log_file: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        if let Some(rows) = rows {
            self.rows = rows;
        }
        if let Some(cols) = cols {
            self.cols = cols;
        }
        if seed.is_some() {
            self.seed = seed;
        }
        if let Some(log_file) = log_file {
            self.log_file = log_file;
        }
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.grid()?;
        if self.frame_interval_ms == 0 {
            return Err(ConfigError::new("frame_interval_ms must be positive".to_string()));
        }
        if !(self.indicator_speed.is_finite() && self.indicator_speed > 0.0) {
            return Err(ConfigError::new(format!(
                "indicator_speed must be a positive number, got {}",
                self.indicator_speed
            )));
        }
        Ok(())
    }

    /// Board dimensions.
    #[track_caller]
    pub fn grid(&self) -> Result<GridSize, ConfigError> {
        GridSize::new(self.rows, self.cols)
            .map_err(|e| ConfigError::new(format!("Invalid board {}x{}: {}", self.rows, self.cols, e)))
    }

    /// Reveal delays for the coordinator.
    pub fn timing(&self) -> RevealTiming {
        RevealTiming::new(
            Duration::from_millis(self.match_delay_ms),
            Duration::from_millis(self.mismatch_delay_ms),
        )
    }

    /// Frame pacing for the terminal loop.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }
}

/// Where a loaded configuration came from.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ConfigSource {
    /// Read from this file.
    #[display("file {}", _0.display())]
    File(PathBuf),
    /// No file found; built-in defaults.
    #[display("defaults")]
    Defaults,
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = GameConfig::from_toml("").unwrap();
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.grid().unwrap(), GridSize::STANDARD);
        assert_eq!(*config.timing().match_delay(), Duration::from_millis(500));
        assert_eq!(*config.timing().mismatch_delay(), Duration::from_millis(1000));
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let config = GameConfig::from_toml("rows = 2\ncols = 4\nseed = 42\n").unwrap();
        assert_eq!(*config.rows(), 2);
        assert_eq!(*config.cols(), 4);
        assert_eq!(*config.seed(), Some(42));
        assert_eq!(*config.match_delay_ms(), 500);
    }

    #[test]
    fn test_invalid_grid_rejected() {
        let err = GameConfig::from_toml("rows = 3\ncols = 3\n").unwrap_err();
        assert!(err.message.contains("3x3"), "{}", err);
    }

    #[test]
    fn test_zero_indicator_speed_rejected() {
        assert!(GameConfig::from_toml("indicator_speed = 0.0").is_err());
    }

    #[test]
    fn test_overrides_apply_and_validate() {
        let config = GameConfig::default()
            .with_overrides(Some(2), Some(2), Some(9), None)
            .unwrap();
        assert_eq!(config.grid().unwrap(), GridSize::new(2, 2).unwrap());
        assert_eq!(*config.seed(), Some(9));

        assert!(GameConfig::default().with_overrides(Some(5), Some(5), None, None).is_err());
    }
}
