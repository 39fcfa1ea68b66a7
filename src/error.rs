//! Error types for game configuration and simulation.

use thiserror::Error;

/// Reasons a [`Config`](crate::Config) is rejected.
///
/// Every variant describes a configuration that would either make the game
/// unwinnable or let problem generation spin forever.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A floating point constant is NaN or infinite.
    #[error("{field} must be a finite number, got {value}")]
    NonFiniteValue {
        /// Name of the offending field.
        field: &'static str,
        /// The value that was supplied.
        value: f64,
    },

    /// The win zones would overlap or leave no playable middle.
    #[error("win_zone_width must be below 50, got {0}")]
    WinZoneTooWide(f64),

    /// The win zone width is negative.
    #[error("win_zone_width must not be negative, got {0}")]
    NegativeWinZone(f64),

    /// Correct answers would never move the rope.
    #[error("pull_strength must be greater than 0, got {0}")]
    NonPositivePull(f64),

    /// The pull is lost to rounding, so correct answers leave the rope in place.
    #[error("pull_strength {0} is too small to move the rope")]
    PullTooSmall(f64),

    /// Wrong answers would reward the player who made them.
    #[error("penalty_strength must not be negative, got {0}")]
    NegativePenalty(f64),

    /// `min_number` is greater than `max_number`.
    #[error("operand range is empty: min_number {min} > max_number {max}")]
    EmptyOperandRange {
        /// Lower bound supplied.
        min: u32,
        /// Upper bound supplied.
        max: u32,
    },

    /// Zero operands allow an answer of 0, which has too few positive neighbours.
    #[error("min_number must be at least 1 so every answer has two positive distractors")]
    ZeroOperand,

    /// Operand above the supported ceiling.
    #[error("max_number {value} exceeds the supported maximum {limit}")]
    OperandTooLarge {
        /// Value supplied.
        value: u32,
        /// Largest accepted operand.
        limit: u32,
    },

    /// The config file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid JSON for a config.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Reasons a simulation cannot be run.
#[derive(Debug, Error)]
pub enum SimError {
    /// The game configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A bot accuracy outside `[0, 1]`.
    #[error("accuracy for {slot} must be within [0, 1], got {value}")]
    InvalidAccuracy {
        /// Which bot was misconfigured.
        slot: crate::Slot,
        /// The supplied accuracy.
        value: f64,
    },

    /// A bot that never answers.
    #[error("think time for {0} must be greater than 0 ms")]
    ZeroThinkTime(crate::Slot),

    /// A match that can never make progress.
    #[error("max_duration_ms must be greater than 0")]
    ZeroDuration,
}
