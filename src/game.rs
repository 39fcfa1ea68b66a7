//! Game core for tugmath.
//!
//! Implements the rules independently of any rendering:
//! - Addition problems with shuffled options
//! - Two player slots with their round state
//! - The rope and its win zones
//! - The session state machine and its epoch-keyed scheduler

mod events;
mod invariants;
mod player;
mod problem;
mod rope;
mod scheduler;
mod session;

pub use events::{CountdownLabel, GameEvent, Phase};
pub use invariants::{InvariantViolation, assert_invariants, check_invariants, check_problem};
pub use player::{PlayerSlot, Slot, SlotStatus};
pub use problem::{DISTRACTOR_SPREAD, OPTION_COUNT, Problem, generate};
pub use rope::{P1_STRAIN_ABOVE, P2_STRAIN_BELOW, Rope};
pub use scheduler::{Scheduled, Scheduler};
pub use session::{
    CORRECT_REGEN_MS, COUNTDOWN_FROM, COUNTDOWN_STEP_MS, INCORRECT_REGEN_MS, REVEAL_DELAY_MS,
    Session,
};
