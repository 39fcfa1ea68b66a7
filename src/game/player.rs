//! Player slots and their round state.

use crate::game::Problem;
use serde::Serialize;
use std::fmt;

/// One of the two player identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    /// Left player, pulls the rope toward 0.
    P1,
    /// Right player, pulls the rope toward 100.
    P2,
}

impl Slot {
    /// Both slots in display order.
    pub const ALL: [Slot; 2] = [Slot::P1, Slot::P2];

    /// The opposing slot.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Slot::P1 => Slot::P2,
            Slot::P2 => Slot::P1,
        }
    }

    /// Index into per-slot arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Slot::P1 => 0,
            Slot::P2 => 1,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::P1 => write!(f, "p1"),
            Slot::P2 => write!(f, "p2"),
        }
    }
}

/// Whether a slot accepts answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlotStatus {
    /// Waiting for the player to answer.
    #[default]
    Idle,
    /// An answer was judged; the next problem is pending.
    Locked,
}

/// Round state owned by one player.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayerSlot {
    problem: Option<Problem>,
    status: SlotStatus,
}

impl PlayerSlot {
    /// The current problem, if a round has started.
    #[must_use]
    pub const fn problem(&self) -> Option<&Problem> {
        self.problem.as_ref()
    }

    /// Current status.
    #[must_use]
    pub const fn status(&self) -> SlotStatus {
        self.status
    }

    /// Whether an answer submitted now would be judged.
    #[must_use]
    pub const fn accepts_answers(&self) -> bool {
        self.problem.is_some() && matches!(self.status, SlotStatus::Idle)
    }

    /// Install a fresh problem and unlock the slot.
    pub(crate) fn assign(&mut self, problem: Problem) {
        self.problem = Some(problem);
        self.status = SlotStatus::Idle;
    }

    pub(crate) fn lock(&mut self) {
        self.status = SlotStatus::Locked;
    }

    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }
}
