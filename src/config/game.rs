/// Game configuration constants.
///
/// This module defines the main gameplay parameters such as round duration,
/// board size, spawn pacing and hit scoring, plus the `GameConfig` built from them.
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Duration of a round in seconds.
pub const ROUND_DURATION: u32 = 30;

/// Number of slots on the board.
pub const MOLE_COUNT: usize = 9;

/// Shortest delay (ms) between two spawn attempts.
pub const MIN_POP_INTERVAL: u64 = 500;

/// Longest delay (ms) between two spawn attempts.
pub const MAX_POP_INTERVAL: u64 = 1500;

/// How long (ms) an unhit mole stays visible.
pub const MOLE_STAY_DURATION: u64 = 1000;

/// How long (ms) a hit mole stays on screen before it is cleared.
pub const HIT_RESET_DELAY: u64 = 200;

/// Points awarded per successful hit.
pub const HIT_AWARD: u32 = 10;

/// Period of the round clock.
pub const CLOCK_TICK: Duration = Duration::from_secs(1);

/// Environment variable pointing at an optional JSON config file.
pub const CONFIG_FILE_ENV: &str = "WHACK_CONFIG";

/// Gameplay parameters, fixed for the lifetime of a controller.
///
/// Every field falls back to its constant above when missing from a config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub round_duration: u32,
    pub mole_count: usize,
    pub min_pop_interval_ms: u64,
    pub max_pop_interval_ms: u64,
    pub mole_stay_ms: u64,
    pub hit_reset_ms: u64,
    pub hit_award: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            round_duration: ROUND_DURATION,
            mole_count: MOLE_COUNT,
            min_pop_interval_ms: MIN_POP_INTERVAL,
            max_pop_interval_ms: MAX_POP_INTERVAL,
            mole_stay_ms: MOLE_STAY_DURATION,
            hit_reset_ms: HIT_RESET_DELAY,
            hit_award: HIT_AWARD,
        }
    }
}

impl GameConfig {
    /// Load a config from a JSON file and validate it.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&text)
    }

    /// Parse a config from JSON text and validate it.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the parameters describe a playable round.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.mole_count == 0 {
            return Err(ConfigError::EmptyBoard);
        }
        if self.round_duration == 0 {
            return Err(ConfigError::ZeroDuration);
        }
        if self.min_pop_interval_ms == 0 || self.min_pop_interval_ms > self.max_pop_interval_ms {
            return Err(ConfigError::PopInterval {
                min: self.min_pop_interval_ms,
                max: self.max_pop_interval_ms,
            });
        }
        Ok(())
    }

    pub fn mole_stay(&self) -> Duration {
        Duration::from_millis(self.mole_stay_ms)
    }

    pub fn hit_reset(&self) -> Duration {
        Duration::from_millis(self.hit_reset_ms)
    }
}
