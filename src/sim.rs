//! Headless bot-vs-bot matches.
//!
//! Provides a pure function interface: `(seed, SimConfig) -> MatchResult`
//!
//! Each match drives a [`Session`] on its logical clock, so a match is fully
//! determined by its seed. Batches run in parallel with rayon; every match
//! owns its session and nothing is shared between threads.

// Rates and means are computed from counts
#![allow(clippy::cast_precision_loss)]

use crate::config::Config;
use crate::error::SimError;
use crate::game::{COUNTDOWN_FROM, COUNTDOWN_STEP_MS, Phase, Session, Slot, assert_invariants};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::Serialize;
use tracing::info;

/// Logical time advanced per simulation step.
pub const STEP_MS: u64 = 10;

/// Salt mixed into the seed of the bots' own random source.
const BOT_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// How a simulated player answers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BotProfile {
    /// Probability of choosing the correct option.
    pub accuracy: f64,
    /// Time spent on each problem before answering.
    pub think_ms: u64,
}

impl Default for BotProfile {
    fn default() -> Self {
        Self {
            accuracy: 0.8,
            think_ms: 1500,
        }
    }
}

/// Parameters shared by every match in a batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimConfig {
    /// Game constants.
    pub game: Config,
    /// Left bot.
    pub p1: BotProfile,
    /// Right bot.
    pub p2: BotProfile,
    /// A match still undecided after this much play time is a draw.
    pub max_duration_ms: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            game: Config::default(),
            p1: BotProfile::default(),
            p2: BotProfile::default(),
            max_duration_ms: 10 * 60 * 1000,
        }
    }
}

impl SimConfig {
    /// Profile for `slot`.
    #[must_use]
    pub const fn profile(&self, slot: Slot) -> &BotProfile {
        match slot {
            Slot::P1 => &self.p1,
            Slot::P2 => &self.p2,
        }
    }

    /// Check the game config and both bot profiles.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), SimError> {
        self.game.validate()?;
        for slot in Slot::ALL {
            let profile = self.profile(slot);
            if !(0.0..=1.0).contains(&profile.accuracy) {
                return Err(SimError::InvalidAccuracy {
                    slot,
                    value: profile.accuracy,
                });
            }
            if profile.think_ms == 0 {
                return Err(SimError::ZeroThinkTime(slot));
            }
        }
        if self.max_duration_ms == 0 {
            return Err(SimError::ZeroDuration);
        }
        Ok(())
    }
}

/// Per-slot answer counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AnswerCounts {
    /// Correct answers judged.
    pub correct: u32,
    /// Wrong answers judged.
    pub incorrect: u32,
}

impl AnswerCounts {
    /// Total answers judged.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.correct + self.incorrect
    }
}

/// Outcome of one match.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchResult {
    /// Seed the match ran with.
    pub seed: u64,
    /// Winner, or `None` for a draw.
    pub winner: Option<Slot>,
    /// Play time from "Fight" until the end, in ms.
    pub duration_ms: u64,
    /// Answers per slot, indexed by [`Slot::index`].
    pub answers: [AnswerCounts; 2],
    /// Rope position when the match stopped.
    pub final_position: f64,
}

/// A bot waiting to answer its current problem.
#[derive(Debug, Clone, Copy, Default)]
struct BotState {
    answer_at: Option<u64>,
}

/// Run one match to completion.
///
/// # Errors
///
/// Returns an error if `config` is invalid.
pub fn run_match(seed: u64, config: &SimConfig) -> Result<MatchResult, SimError> {
    config.validate()?;

    let mut session = Session::new(config.game, seed)?;
    let mut rng = StdRng::seed_from_u64(seed ^ BOT_SEED_SALT);
    let mut bots = [BotState::default(); 2];
    let mut answers = [AnswerCounts::default(); 2];

    session.begin();
    let play_start = u64::from(COUNTDOWN_FROM + 1) * COUNTDOWN_STEP_MS;
    session.advance_to(play_start);
    let deadline = play_start.saturating_add(config.max_duration_ms);

    while session.phase() == Phase::Playing && session.now_ms() < deadline {
        let now = session.now_ms();
        for slot in Slot::ALL {
            let state = session.slot(slot);
            let bot = &mut bots[slot.index()];
            if !state.accepts_answers() {
                bot.answer_at = None;
                continue;
            }
            let Some(problem) = state.problem().copied() else {
                continue;
            };
            let due = *bot
                .answer_at
                .get_or_insert(now.saturating_add(config.profile(slot).think_ms));
            if now < due {
                continue;
            }

            bot.answer_at = None;
            let value = if rng.random_bool(config.profile(slot).accuracy) {
                problem.answer
            } else {
                let wrong: Vec<u32> = problem
                    .options
                    .iter()
                    .copied()
                    .filter(|&o| o != problem.answer)
                    .collect();
                wrong.choose(&mut rng).copied().unwrap_or(problem.answer)
            };

            match session.submit_answer(slot, value) {
                Some(true) => answers[slot.index()].correct += 1,
                Some(false) => answers[slot.index()].incorrect += 1,
                None => {}
            }
            if session.phase() != Phase::Playing {
                break;
            }
        }
        session.drain_events();
        assert_invariants(&session);
        if session.phase() == Phase::Playing {
            session.advance(STEP_MS);
        }
    }

    Ok(MatchResult {
        seed,
        winner: session.winner(),
        duration_ms: session.now_ms().saturating_sub(play_start),
        answers,
        final_position: session.rope_position(),
    })
}

/// Aggregated statistics over many matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SimStats {
    /// Matches played.
    pub games: u64,
    /// Wins per slot, indexed by [`Slot::index`].
    pub wins: [u64; 2],
    /// Matches that hit the duration limit.
    pub draws: u64,
    /// Sum of match durations in ms.
    pub total_duration_ms: u64,
    /// Answers per slot across all matches.
    pub correct: [u64; 2],
    /// Wrong answers per slot across all matches.
    pub incorrect: [u64; 2],
}

impl SimStats {
    /// Fold a match into the totals.
    pub fn add_result(&mut self, result: &MatchResult) {
        self.games += 1;
        match result.winner {
            Some(slot) => self.wins[slot.index()] += 1,
            None => self.draws += 1,
        }
        self.total_duration_ms += result.duration_ms;
        for slot in Slot::ALL {
            let counts = result.answers[slot.index()];
            self.correct[slot.index()] += u64::from(counts.correct);
            self.incorrect[slot.index()] += u64::from(counts.incorrect);
        }
    }

    /// Combine two partial totals.
    pub fn merge(&mut self, other: &Self) {
        self.games += other.games;
        self.draws += other.draws;
        self.total_duration_ms += other.total_duration_ms;
        for i in 0..2 {
            self.wins[i] += other.wins[i];
            self.correct[i] += other.correct[i];
            self.incorrect[i] += other.incorrect[i];
        }
    }

    /// Share of matches won by `slot`.
    #[must_use]
    pub fn win_rate(&self, slot: Slot) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.wins[slot.index()] as f64 / self.games as f64
    }

    /// Observed share of correct answers for `slot`.
    #[must_use]
    pub fn observed_accuracy(&self, slot: Slot) -> f64 {
        let i = slot.index();
        let total = self.correct[i] + self.incorrect[i];
        if total == 0 {
            return 0.0;
        }
        self.correct[i] as f64 / total as f64
    }

    /// Mean match duration in ms.
    #[must_use]
    pub fn mean_duration_ms(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.total_duration_ms as f64 / self.games as f64
    }
}

/// Run `games` matches with seeds `base_seed + i` in parallel.
///
/// `on_done` is called once per finished match, from worker threads.
///
/// # Errors
///
/// Returns an error if `config` is invalid.
pub fn run_simulation<F>(
    base_seed: u64,
    games: u64,
    config: &SimConfig,
    on_done: F,
) -> Result<SimStats, SimError>
where
    F: Fn() + Sync,
{
    config.validate()?;
    info!(base_seed, games, "simulation started");

    let stats = (0..games)
        .into_par_iter()
        .map(|i| run_match(base_seed.wrapping_add(i), config))
        .try_fold(SimStats::default, |mut local, result| {
            local.add_result(&result?);
            on_done();
            Ok::<_, SimError>(local)
        })
        .try_reduce(SimStats::default, |mut a, b| {
            a.merge(&b);
            Ok(a)
        })?;

    info!(
        games = stats.games,
        p1_wins = stats.wins[0],
        p2_wins = stats.wins[1],
        draws = stats.draws,
        "simulation finished"
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_bot_beats_hopeless_bot() {
        let config = SimConfig {
            p1: BotProfile {
                accuracy: 1.0,
                think_ms: 500,
            },
            p2: BotProfile {
                accuracy: 0.0,
                think_ms: 500,
            },
            ..SimConfig::default()
        };

        let result = run_match(1, &config).unwrap();
        assert_eq!(result.winner, Some(Slot::P1));
        assert_eq!(result.answers[Slot::P2.index()].correct, 0);
        assert_eq!(result.answers[Slot::P1.index()].incorrect, 0);
    }

    #[test]
    fn test_match_is_deterministic() {
        let config = SimConfig::default();
        let a = run_match(77, &config).unwrap();
        let b = run_match(77, &config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_draw_at_deadline() {
        // Both bots are too slow to answer before the deadline.
        let config = SimConfig {
            p1: BotProfile {
                accuracy: 1.0,
                think_ms: 5000,
            },
            p2: BotProfile {
                accuracy: 1.0,
                think_ms: 5000,
            },
            max_duration_ms: 1000,
            ..SimConfig::default()
        };
        let result = run_match(3, &config).unwrap();
        assert_eq!(result.winner, None);
        assert_eq!(result.duration_ms, 1000);
        assert_eq!(result.answers[0].total() + result.answers[1].total(), 0);
    }

    #[test]
    fn test_endless_think_time_never_answers() {
        let config = SimConfig {
            p1: BotProfile {
                accuracy: 1.0,
                think_ms: u64::MAX,
            },
            max_duration_ms: 2000,
            ..SimConfig::default()
        };
        assert!(config.validate().is_ok());

        let result = run_match(4, &config).unwrap();
        assert_eq!(result.answers[Slot::P1.index()].total(), 0);
        assert_ne!(result.winner, Some(Slot::P1));
    }

    #[test]
    fn test_invalid_profiles_rejected() {
        let bad_accuracy = SimConfig {
            p2: BotProfile {
                accuracy: 1.5,
                think_ms: 100,
            },
            ..SimConfig::default()
        };
        assert!(matches!(
            run_match(1, &bad_accuracy),
            Err(SimError::InvalidAccuracy { slot: Slot::P2, .. })
        ));

        let no_think = SimConfig {
            p1: BotProfile {
                accuracy: 0.5,
                think_ms: 0,
            },
            ..SimConfig::default()
        };
        assert!(matches!(
            run_match(1, &no_think),
            Err(SimError::ZeroThinkTime(Slot::P1))
        ));
    }

    #[test]
    fn test_stats_aggregate() {
        let mut stats = SimStats::default();
        stats.add_result(&MatchResult {
            seed: 0,
            winner: Some(Slot::P1),
            duration_ms: 1000,
            answers: [
                AnswerCounts {
                    correct: 3,
                    incorrect: 1,
                },
                AnswerCounts::default(),
            ],
            final_position: 16.66,
        });
        stats.add_result(&MatchResult {
            seed: 1,
            winner: None,
            duration_ms: 3000,
            answers: [AnswerCounts::default(); 2],
            final_position: 50.0,
        });

        assert_eq!(stats.games, 2);
        assert_eq!(stats.draws, 1);
        assert!((stats.win_rate(Slot::P1) - 0.5).abs() < 1e-9);
        assert!((stats.mean_duration_ms() - 2000.0).abs() < 1e-9);
        assert!((stats.observed_accuracy(Slot::P1) - 0.75).abs() < 1e-9);
        assert!(stats.observed_accuracy(Slot::P2).abs() < 1e-9);

        let mut merged = SimStats::default();
        merged.merge(&stats);
        merged.merge(&stats);
        assert_eq!(merged.games, 4);
        assert_eq!(merged.wins, [2, 0]);
    }

    #[test]
    fn test_simulation_counts_every_game() {
        use std::sync::atomic::{AtomicU64, Ordering};

        let done = AtomicU64::new(0);
        let stats = run_simulation(10, 16, &SimConfig::default(), || {
            done.fetch_add(1, Ordering::Relaxed);
        })
        .unwrap();

        assert_eq!(stats.games, 16);
        assert_eq!(done.load(Ordering::Relaxed), 16);
        assert_eq!(stats.wins[0] + stats.wins[1] + stats.draws, 16);
    }
}
