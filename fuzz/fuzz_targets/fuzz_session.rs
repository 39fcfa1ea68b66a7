#![no_main]

//! Session fuzzer.
//!
//! Drives a session with an arbitrary mix of frontend calls and clock
//! advances under an arbitrary (but valid) config, checking the invariants
//! after every step.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tugmath::game::check_invariants;
use tugmath::{Config, Phase, Session, Slot};

/// A fuzzer-generated frontend call.
#[derive(Arbitrary, Debug, Clone, Copy)]
enum FuzzOp {
    Begin,
    Restart,
    Reset,
    /// Pick one of the slot's three options.
    Answer { p2: bool, option: u8 },
    /// Submit a raw value, usually wrong.
    Submit { p2: bool, value: u32 },
    Advance { ms: u16 },
}

/// Structured input for session fuzzing.
#[derive(Arbitrary, Debug)]
struct SessionInput {
    pull: u8,
    penalty: u8,
    win_zone: u8,
    min_number: u16,
    span: u16,
    seed: u64,
    ops: Vec<FuzzOp>,
}

fuzz_target!(|input: SessionInput| {
    let min_number = u32::from(input.min_number).max(1);
    let config = Config {
        pull_strength: f64::from(input.pull.max(1)),
        penalty_strength: f64::from(input.penalty),
        win_zone_width: f64::from(input.win_zone % 50),
        min_number,
        max_number: min_number + u32::from(input.span),
    };
    let Ok(mut session) = Session::new(config, input.seed) else {
        return;
    };

    for op in input.ops.into_iter().take(500) {
        let phase = session.phase();
        let before = session.rope_position();
        let slot_of = |p2: bool| if p2 { Slot::P2 } else { Slot::P1 };

        let judged = match op {
            FuzzOp::Begin => {
                session.begin();
                None
            }
            FuzzOp::Restart => {
                session.restart();
                None
            }
            FuzzOp::Reset => {
                session.reset();
                None
            }
            FuzzOp::Answer { p2, option } => {
                let slot = slot_of(p2);
                let value = session
                    .slot(slot)
                    .problem()
                    .map_or(0, |p| p.options[usize::from(option % 3)]);
                Some(session.submit_answer(slot, value))
            }
            FuzzOp::Submit { p2, value } => Some(session.submit_answer(slot_of(p2), value)),
            FuzzOp::Advance { ms } => {
                session.advance(u64::from(ms));
                None
            }
        };

        // Ignored answers leave no trace
        if judged == Some(None) {
            assert!(session.drain_events().is_empty());
            assert_eq!(session.phase(), phase);
            assert!((session.rope_position() - before).abs() < f64::EPSILON);
        }

        if phase != Phase::Playing {
            assert!(judged.flatten().is_none());
        }

        let violations = check_invariants(&session);
        assert!(violations.is_empty(), "Invariants violated: {violations:?}");
        session.drain_events();
    }
});
