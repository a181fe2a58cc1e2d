//! Application configuration.

use crate::games::hanoi::{Disc, DiscBounds, TOWER_COUNT};
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Game and session log settings, loaded from TOML.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
#[serde(default)]
pub struct HanoiConfig {
    /// Fewest discs a game may use.
    min_discs: Disc,

    /// Most discs a game may use.
    max_discs: Disc,

    /// Number of towers. Only 3 is supported.
    towers: usize,

    /// Whether interactive play records a session log.
    use_log: bool,

    /// Whether replay draws the board after every step.
    show_replay_moves: bool,

    /// Session log location.
    #[setters(into)]
    log_path: PathBuf,

    /// Whether the board is drawn with ANSI colours.
    color: bool,
}

impl Default for HanoiConfig {
    fn default() -> Self {
        Self {
            min_discs: DiscBounds::DEFAULT_MIN,
            max_discs: DiscBounds::DEFAULT_MAX,
            towers: TOWER_COUNT,
            use_log: true,
            show_replay_moves: true,
            log_path: PathBuf::from("Hanoi.log"),
            color: true,
        }
    }
}

impl HanoiConfig {
    /// Loads configuration from a TOML file. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or parsed, or if the
    /// values fail [`HanoiConfig::validate`].
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;

        info!(
            min_discs = config.min_discs,
            max_discs = config.max_discs,
            log_path = %config.log_path.display(),
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns the defaults.
    ///
    /// # Errors
    ///
    /// Same as [`HanoiConfig::from_file`] when the file exists.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Checks that the disc bounds are usable and the tower count is 3.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` describing the first bad value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.towers != TOWER_COUNT {
            return Err(ConfigError::new(format!(
                "Only {} towers are supported, got {}",
                TOWER_COUNT, self.towers
            )));
        }
        if DiscBounds::new(self.min_discs, self.max_discs).is_none() {
            return Err(ConfigError::new(format!(
                "Invalid disc bounds {}..={}",
                self.min_discs, self.max_discs
            )));
        }
        Ok(())
    }

    /// Disc count bounds for the engine.
    ///
    /// Falls back to the defaults if the configured bounds are invalid.
    pub fn bounds(&self) -> DiscBounds {
        DiscBounds::new(self.min_discs, self.max_discs).unwrap_or_default()
    }
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
