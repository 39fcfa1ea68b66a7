// Allow unwrap in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Tugmath: a two-player tug-of-war arithmetic game.
//!
//! Each player answers addition problems; correct answers pull the rope
//! toward them, wrong answers let it slip back. The first player to drag
//! the rope into their win zone wins the round.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Presentation (TUI) / Simulation   │
//! ├─────────────────────────────────────┤
//! │   Session: phases, events, timers   │
//! ├─────────────────────────────────────┤
//! │   Rope · Player slots · Problems    │
//! └─────────────────────────────────────┘
//! ```
//!
//! The core never renders and never reads a wall clock: callers forward
//! input, advance logical time and drain [`GameEvent`]s.

pub mod config;
pub mod cues;
pub mod error;
pub mod fireworks;
pub mod game;
pub mod sim;

pub use config::Config;
pub use error::{ConfigError, SimError};

// Re-export key game types at crate root for convenience
pub use game::{CountdownLabel, GameEvent, Phase, PlayerSlot, Problem, Session, Slot, SlotStatus};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reexports_drive_a_session() {
        let mut session = Session::new(Config::default(), 0).unwrap();
        assert!(session.begin());
        let events = session.drain_events();
        assert_eq!(events[0], GameEvent::PhaseChanged(Phase::Countdown));
        assert_eq!(events[1], GameEvent::CountdownTick(CountdownLabel::Count(3)));
    }
}
