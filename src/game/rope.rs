//! Rope position and win detection.

// Power values are percentages of a bounded range
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use crate::config::{Config, ROPE_CENTER};
use crate::game::Slot;

/// Rope position above which player 1 looks like losing badly.
pub const P1_STRAIN_ABOVE: f64 = 70.0;

/// Rope position below which player 2 looks like losing badly.
pub const P2_STRAIN_BELOW: f64 = 30.0;

/// The tug-of-war rope.
///
/// Position 0 is player 1's end, 100 is player 2's end. Moves are not
/// clamped; only a declared win snaps the rope to the zone boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rope {
    position: f64,
}

impl Default for Rope {
    fn default() -> Self {
        Self {
            position: ROPE_CENTER,
        }
    }
}

impl Rope {
    /// A rope at an arbitrary position.
    #[must_use]
    pub const fn at(position: f64) -> Self {
        Self { position }
    }

    /// Current position.
    #[must_use]
    pub const fn position(&self) -> f64 {
        self.position
    }

    /// Move the rope back to the centre.
    pub fn reset(&mut self) {
        self.position = ROPE_CENTER;
    }

    /// Signed movement caused by a judged answer.
    #[must_use]
    pub fn contribution(config: &Config, slot: Slot, correct: bool) -> f64 {
        match (slot, correct) {
            (Slot::P1, true) => -config.pull_strength,
            (Slot::P2, true) => config.pull_strength,
            (Slot::P1, false) => config.penalty_strength,
            (Slot::P2, false) => -config.penalty_strength,
        }
    }

    /// Apply a judged answer and return the winner, if any.
    pub fn apply(&mut self, config: &Config, slot: Slot, correct: bool) -> Option<Slot> {
        self.position += Self::contribution(config, slot, correct);
        self.winner(config)
    }

    /// The slot whose win zone contains the rope. Player 1 is checked first.
    #[must_use]
    pub fn winner(&self, config: &Config) -> Option<Slot> {
        if self.position <= config.p1_threshold() {
            Some(Slot::P1)
        } else if self.position >= config.p2_threshold() {
            Some(Slot::P2)
        } else {
            None
        }
    }

    /// Snap the rope onto the boundary of `winner`'s zone.
    pub fn clamp_to_zone(&mut self, config: &Config, winner: Slot) {
        self.position = match winner {
            Slot::P1 => config.p1_threshold(),
            Slot::P2 => config.p2_threshold(),
        };
    }

    /// How close `slot` is to winning, as a percentage in `[0, 100]`.
    #[must_use]
    pub fn power(&self, config: &Config, slot: Slot) -> u8 {
        let distance = match slot {
            Slot::P1 => ROPE_CENTER - self.position,
            Slot::P2 => self.position - ROPE_CENTER,
        };
        let to_win = ROPE_CENTER - config.win_zone_width;
        let pct = (distance.max(0.0) / to_win * 100.0).floor();
        pct.clamp(0.0, 100.0) as u8
    }

    /// Whether `slot` is being dragged far toward the opponent's zone.
    #[must_use]
    pub fn strains(&self, slot: Slot) -> bool {
        match slot {
            Slot::P1 => self.position > P1_STRAIN_ABOVE,
            Slot::P2 => self.position < P2_STRAIN_BELOW,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn test_starts_centered() {
        assert_close(Rope::default().position(), 50.0);
    }

    #[test]
    fn test_directions() {
        let config = Config::default();
        let mut rope = Rope::default();

        rope.apply(&config, Slot::P1, true);
        assert_close(rope.position(), 45.0);
        rope.apply(&config, Slot::P2, true);
        assert_close(rope.position(), 50.0);
        rope.apply(&config, Slot::P1, false);
        assert_close(rope.position(), 53.0);
        rope.apply(&config, Slot::P2, false);
        assert_close(rope.position(), 50.0);
    }

    #[test]
    fn test_seven_pulls_win_for_p1() {
        let config = Config::default();
        let mut rope = Rope::default();

        for _ in 0..6 {
            assert_eq!(rope.apply(&config, Slot::P1, true), None);
        }
        assert_eq!(rope.apply(&config, Slot::P1, true), Some(Slot::P1));
        assert_close(rope.position(), 15.0);

        rope.clamp_to_zone(&config, Slot::P1);
        assert_close(rope.position(), 16.66);
    }

    #[test]
    fn test_p2_wins_at_boundary() {
        let config = Config {
            win_zone_width: 20.0,
            ..Config::default()
        };
        assert_eq!(Rope::at(80.0).winner(&config), Some(Slot::P2));
        assert_eq!(Rope::at(79.9).winner(&config), None);
        assert_eq!(Rope::at(20.0).winner(&config), Some(Slot::P1));
        assert_eq!(Rope::at(20.1).winner(&config), None);
    }

    #[test]
    fn test_penalty_can_win_for_opponent() {
        let config = Config::default();
        let mut rope = Rope::at(81.0);
        assert_eq!(rope.apply(&config, Slot::P1, false), Some(Slot::P2));
    }

    #[test]
    fn test_power() {
        let config = Config {
            win_zone_width: 25.0,
            ..Config::default()
        };
        assert_eq!(Rope::at(50.0).power(&config, Slot::P1), 0);
        assert_eq!(Rope::at(40.0).power(&config, Slot::P1), 40);
        assert_eq!(Rope::at(40.0).power(&config, Slot::P2), 0);
        assert_eq!(Rope::at(62.5).power(&config, Slot::P2), 50);
        assert_eq!(Rope::at(0.0).power(&config, Slot::P1), 100);
    }

    #[test]
    fn test_power_default_config() {
        let config = Config::default();
        // 15 / 33.34 * 100 = 44.99
        assert_eq!(Rope::at(35.0).power(&config, Slot::P1), 44);
    }

    #[test]
    fn test_strain() {
        assert!(Rope::at(71.0).strains(Slot::P1));
        assert!(!Rope::at(70.0).strains(Slot::P1));
        assert!(Rope::at(29.0).strains(Slot::P2));
        assert!(!Rope::at(50.0).strains(Slot::P2));
    }
}
