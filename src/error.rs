//! Error types for the fallible collaborators around the round core.
//!
//! The core itself never fails: mistimed hits are ignored and stale timers are
//! inert. Only configuration loading and best-score storage can go wrong.

use std::io;

use thiserror::Error;

/// Errors raised while reading or writing the best score.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The score file could not be read or written.
    #[error("score file I/O failed: {0}")]
    Io(#[from] io::Error),

    /// The score file exists but does not hold a JSON object of scores.
    #[error("score file is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Errors raised while loading or validating a `GameConfig`.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file could not be read: {0}")]
    Io(#[from] io::Error),

    #[error("config file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// A board needs at least one slot.
    #[error("mole_count must be at least 1")]
    EmptyBoard,

    #[error("round_duration must be at least 1 second")]
    ZeroDuration,

    /// Pop interval bounds must be positive and ordered.
    #[error("invalid pop interval: min {min} ms, max {max} ms")]
    PopInterval { min: u64, max: u64 },
}
