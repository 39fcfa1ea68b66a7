//! Addition problems with multiple-choice options.

use crate::config::Config;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;

/// Number of options shown per problem.
pub const OPTION_COUNT: usize = 3;

/// Distractors are drawn from `answer - SPREAD ..= answer + SPREAD`.
pub const DISTRACTOR_SPREAD: i64 = 2;

/// An addition question and its shuffled answer options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Problem {
    /// Left operand.
    pub operand_a: u32,
    /// Right operand.
    pub operand_b: u32,
    /// `operand_a + operand_b`.
    pub answer: u32,
    /// Three distinct positive values, one of them `answer`.
    pub options: [u32; OPTION_COUNT],
}

impl Problem {
    pub(crate) const fn new(operand_a: u32, operand_b: u32, options: [u32; OPTION_COUNT]) -> Self {
        Self {
            operand_a,
            operand_b,
            answer: operand_a + operand_b,
            options,
        }
    }

    /// Whether `value` is the correct answer.
    #[must_use]
    pub const fn is_correct(&self, value: u32) -> bool {
        value == self.answer
    }

    /// Position of the correct answer within `options`.
    #[must_use]
    pub fn answer_index(&self) -> Option<usize> {
        self.options.iter().position(|&o| o == self.answer)
    }
}

/// Generate a fresh problem for `config`.
///
/// `config` must have passed [`Config::validate`]: a minimum operand of 1
/// guarantees the answer is at least 2, so three distinct positive values
/// always exist within the distractor spread and the rejection loop ends.
pub fn generate<R: Rng + ?Sized>(config: &Config, rng: &mut R) -> Problem {
    let operand_a = rng.random_range(config.min_number..=config.max_number);
    let operand_b = rng.random_range(config.min_number..=config.max_number);
    let answer = operand_a + operand_b;

    let mut options = [answer; OPTION_COUNT];
    let mut filled = 1;
    while filled < OPTION_COUNT {
        let candidate = i64::from(answer) + rng.random_range(-DISTRACTOR_SPREAD..=DISTRACTOR_SPREAD);
        let Ok(candidate) = u32::try_from(candidate) else {
            continue;
        };
        if candidate > 0 && !options[..filled].contains(&candidate) {
            options[filled] = candidate;
            filled += 1;
        }
    }

    // Fisher-Yates
    options.shuffle(rng);

    Problem::new(operand_a, operand_b, options)
}
