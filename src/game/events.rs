//! Session phases and the notifications emitted to observers.

use crate::game::{Problem, Slot};
use std::fmt;

/// Top-level phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Title screen, waiting for the players to begin.
    #[default]
    Start,
    /// 3-2-1-Fight before a round.
    Countdown,
    /// Answers move the rope.
    Playing,
    /// A player won; waiting for a restart.
    End,
}

/// One step of the pre-round countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownLabel {
    /// Seconds remaining (3, 2, 1).
    Count(u8),
    /// The final call before play starts.
    Fight,
}

impl fmt::Display for CountdownLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CountdownLabel::Count(n) => write!(f, "{n}"),
            CountdownLabel::Fight => write!(f, "FIGHT!"),
        }
    }
}

/// Notification for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// The session moved to a new phase.
    PhaseChanged(Phase),
    /// A countdown step should be shown (and announced).
    CountdownTick(CountdownLabel),
    /// A slot received a new problem.
    ProblemChanged {
        /// Slot whose problem changed.
        slot: Slot,
        /// The new problem.
        problem: Problem,
    },
    /// The rope moved.
    RopePositionChanged(f64),
    /// An answer was judged.
    AnswerJudged {
        /// Slot that answered.
        slot: Slot,
        /// Whether the answer was right.
        correct: bool,
    },
    /// The round ended with a winner.
    GameEnded(Slot),
    /// The winner overlay should appear.
    WinnerRevealed(Slot),
}
