//! Game tuning constants.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Largest operand accepted by [`Config::validate`].
pub const MAX_OPERAND: u32 = 1_000_000;

/// Neutral rope position.
pub const ROPE_CENTER: f64 = 50.0;

/// Length of the rope track.
pub const ROPE_LENGTH: f64 = 100.0;

/// The five tunable constants of a game.
///
/// Missing fields in a JSON file take their default values; unknown fields
/// are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Rope movement toward the answering player per correct answer.
    pub pull_strength: f64,
    /// Rope movement away from the answering player per wrong answer.
    pub penalty_strength: f64,
    /// Width of each win zone, in percent of the track.
    pub win_zone_width: f64,
    /// Smallest operand (inclusive).
    pub min_number: u32,
    /// Largest operand (inclusive).
    pub max_number: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pull_strength: 5.0,
            penalty_strength: 3.0,
            win_zone_width: 16.66,
            min_number: 1,
            max_number: 9,
        }
    }
}

impl Config {
    /// Check that this configuration yields a playable, winnable game.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("pull_strength", self.pull_strength),
            ("penalty_strength", self.penalty_strength),
            ("win_zone_width", self.win_zone_width),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFiniteValue { field, value });
            }
        }

        if self.win_zone_width < 0.0 {
            return Err(ConfigError::NegativeWinZone(self.win_zone_width));
        }
        if self.win_zone_width >= ROPE_CENTER {
            return Err(ConfigError::WinZoneTooWide(self.win_zone_width));
        }
        if self.pull_strength <= 0.0 {
            return Err(ConfigError::NonPositivePull(self.pull_strength));
        }
        // Must survive rounding at the far end of the rope
        if ROPE_LENGTH - self.pull_strength >= ROPE_LENGTH {
            return Err(ConfigError::PullTooSmall(self.pull_strength));
        }
        if self.penalty_strength < 0.0 {
            return Err(ConfigError::NegativePenalty(self.penalty_strength));
        }

        if self.min_number > self.max_number {
            return Err(ConfigError::EmptyOperandRange {
                min: self.min_number,
                max: self.max_number,
            });
        }
        if self.min_number == 0 {
            return Err(ConfigError::ZeroOperand);
        }
        if self.max_number > MAX_OPERAND {
            return Err(ConfigError::OperandTooLarge {
                value: self.max_number,
                limit: MAX_OPERAND,
            });
        }

        Ok(())
    }

    /// Parse and validate a JSON config.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the values are invalid.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Rope position at or below which player 1 wins.
    #[must_use]
    pub fn p1_threshold(&self) -> f64 {
        self.win_zone_width
    }

    /// Rope position at or above which player 2 wins.
    #[must_use]
    pub fn p2_threshold(&self) -> f64 {
        ROPE_LENGTH - self.win_zone_width
    }
}
