//! Session invariants - sanity checks that detect bugs.
//!
//! These should never trigger for a session driven only through its public
//! operations. Tests and the fuzz target call them after every step.

use crate::config::{Config, ROPE_LENGTH};
use crate::game::problem::DISTRACTOR_SPREAD;
use crate::game::{Phase, Problem, Session, Slot};

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check that `problem` is well formed under `config`.
#[must_use]
pub fn check_problem(config: &Config, problem: &Problem) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let mut push = |message: String| violations.push(InvariantViolation { message });

    let range = config.min_number..=config.max_number;
    if !range.contains(&problem.operand_a) || !range.contains(&problem.operand_b) {
        push(format!(
            "Operands {} + {} outside [{}, {}]",
            problem.operand_a, problem.operand_b, config.min_number, config.max_number
        ));
    }
    if u64::from(problem.answer) != u64::from(problem.operand_a) + u64::from(problem.operand_b) {
        push(format!(
            "Answer {} is not {} + {}",
            problem.answer, problem.operand_a, problem.operand_b
        ));
    }
    if !problem.options.contains(&problem.answer) {
        push(format!("Options {:?} miss answer {}", problem.options, problem.answer));
    }
    for (i, &option) in problem.options.iter().enumerate() {
        if option == 0 {
            push(format!("Option {i} is not positive"));
        }
        if problem.options[i + 1..].contains(&option) {
            push(format!("Option {option} appears twice in {:?}", problem.options));
        }
        if (i64::from(option) - i64::from(problem.answer)).abs() > DISTRACTOR_SPREAD {
            push(format!(
                "Option {option} further than {DISTRACTOR_SPREAD} from answer {}",
                problem.answer
            ));
        }
    }

    violations
}

/// Check all session invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(session: &Session) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let config = session.config();
    let position = session.rope_position();

    if !(0.0..=ROPE_LENGTH).contains(&position) {
        violations.push(InvariantViolation {
            message: format!("Rope position {position} outside the track"),
        });
    }

    match session.phase() {
        Phase::Playing => {
            if session.rope().winner(config).is_some() {
                violations.push(InvariantViolation {
                    message: format!("Rope at {position} is in a win zone while still playing"),
                });
            }
            for slot in Slot::ALL {
                if session.slot(slot).problem().is_none() {
                    violations.push(InvariantViolation {
                        message: format!("Slot {slot} has no problem while playing"),
                    });
                }
            }
        }
        Phase::End => match session.winner() {
            None => violations.push(InvariantViolation {
                message: "Session ended without a winner".to_string(),
            }),
            Some(winner) => {
                let boundary = match winner {
                    Slot::P1 => config.p1_threshold(),
                    Slot::P2 => config.p2_threshold(),
                };
                if (position - boundary).abs() > 1e-9 {
                    violations.push(InvariantViolation {
                        message: format!(
                            "Winner {winner} but rope at {position}, expected {boundary}"
                        ),
                    });
                }
            }
        },
        Phase::Countdown => {
            if session.countdown_label().is_none() {
                violations.push(InvariantViolation {
                    message: "Countdown phase without a countdown label".to_string(),
                });
            }
        }
        Phase::Start => {}
    }

    if session.phase() != Phase::End && session.winner().is_some() {
        violations.push(InvariantViolation {
            message: format!("Winner set during {:?}", session.phase()),
        });
    }

    for slot in Slot::ALL {
        if let Some(problem) = session.slot(slot).problem() {
            violations.extend(check_problem(config, problem));
        }
    }

    violations
}

/// Assert all session invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(session: &Session) {
    let violations = check_invariants(session);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("Session invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_session: &Session) {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_session_passes() {
        let session = Session::new(Config::default(), 1).unwrap();
        assert!(check_invariants(&session).is_empty());
    }

    #[test]
    fn test_session_through_a_round_passes() {
        let mut session = Session::new(Config::default(), 2).unwrap();
        session.begin();
        assert!(check_invariants(&session).is_empty());

        session.advance(4000);
        assert!(check_invariants(&session).is_empty());

        while session.phase() == Phase::Playing {
            let answer = session.slot(Slot::P2).problem().unwrap().answer;
            session.submit_answer(Slot::P2, answer);
            assert!(check_invariants(&session).is_empty());
            session.advance(200);
        }
        assert_eq!(session.winner(), Some(Slot::P2));
        assert_invariants(&session);
    }

    #[test]
    fn test_bad_problem_detected() {
        let config = Config::default();
        let problem = Problem {
            operand_a: 4,
            operand_b: 5,
            answer: 9,
            options: [8, 8, 12],
        };

        let violations = check_problem(&config, &problem);
        assert!(violations.iter().any(|v| v.message.contains("miss answer")));
        assert!(violations.iter().any(|v| v.message.contains("appears twice")));
        assert!(violations.iter().any(|v| v.message.contains("further than")));
    }

    #[test]
    fn test_out_of_range_operands_detected() {
        let config = Config::default();
        let problem = Problem {
            operand_a: 10,
            operand_b: 1,
            answer: 11,
            options: [10, 11, 12],
        };

        let violations = check_problem(&config, &problem);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("outside"));
    }

    #[test]
    fn test_valid_problem_passes() {
        let config = Config::default();
        let problem = Problem {
            operand_a: 9,
            operand_b: 9,
            answer: 18,
            options: [20, 18, 16],
        };
        assert!(check_problem(&config, &problem).is_empty());
    }
}
