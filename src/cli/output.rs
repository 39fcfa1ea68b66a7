//! Output formatting utilities for CLI.

// Percentages are computed from counts
#![allow(clippy::cast_precision_loss)]

use serde::Serialize;
use std::fmt::Write as _;
use tugmath::Slot;
use tugmath::sim::{SimConfig, SimStats};

/// JSON-serializable simulation result.
#[derive(Debug, Serialize)]
pub(super) struct JsonSimResult {
    /// First match seed.
    pub(super) base_seed: u64,
    /// Matches played.
    pub(super) games: u64,
    /// Matches that hit the duration limit.
    pub(super) draws: u64,
    /// Mean play time per match in ms.
    pub(super) mean_duration_ms: f64,
    /// Per-player results.
    pub(super) players: Vec<JsonPlayerResult>,
}

/// JSON-serializable player result.
#[derive(Debug, Serialize)]
pub(super) struct JsonPlayerResult {
    /// Player slot.
    pub(super) slot: Slot,
    /// Configured chance of answering correctly.
    pub(super) accuracy: f64,
    /// Configured thinking time in ms.
    pub(super) think_ms: u64,
    /// Matches won.
    pub(super) wins: u64,
    /// Share of matches won.
    pub(super) win_rate: f64,
    /// Correct answers across all matches.
    pub(super) correct: u64,
    /// Wrong answers across all matches.
    pub(super) incorrect: u64,
}

impl JsonSimResult {
    /// Create from aggregated stats.
    pub(super) fn from_stats(base_seed: u64, stats: &SimStats, config: &SimConfig) -> Self {
        Self {
            base_seed,
            games: stats.games,
            draws: stats.draws,
            mean_duration_ms: stats.mean_duration_ms(),
            players: Slot::ALL
                .iter()
                .map(|&slot| {
                    let profile = config.profile(slot);
                    JsonPlayerResult {
                        slot,
                        accuracy: profile.accuracy,
                        think_ms: profile.think_ms,
                        wins: stats.wins[slot.index()],
                        win_rate: stats.win_rate(slot),
                        correct: stats.correct[slot.index()],
                        incorrect: stats.incorrect[slot.index()],
                    }
                })
                .collect(),
        }
    }
}

/// Format simulation statistics as human-readable text.
pub(super) fn format_sim_text(base_seed: u64, stats: &SimStats, config: &SimConfig) -> String {
    let mut output = String::new();

    let _ = writeln!(
        output,
        "Simulation Results ({} games, base seed {base_seed})",
        stats.games
    );
    let _ = writeln!(output, "{}", "=".repeat(50));
    let _ = writeln!(
        output,
        "{:<6} {:>8} {:>8} {:>8} {:>10} {:>8}",
        "Player", "Acc", "Think", "Wins", "Win %", "Hit %"
    );

    for slot in Slot::ALL {
        let profile = config.profile(slot);
        let _ = writeln!(
            output,
            "{:<6} {:>8.2} {:>6}ms {:>8} {:>9.1}% {:>7.1}%",
            slot.to_string(),
            profile.accuracy,
            profile.think_ms,
            stats.wins[slot.index()],
            stats.win_rate(slot) * 100.0,
            stats.observed_accuracy(slot) * 100.0,
        );
    }

    let _ = writeln!(output);
    let draw_pct = if stats.games == 0 {
        0.0
    } else {
        stats.draws as f64 / stats.games as f64 * 100.0
    };
    let _ = writeln!(output, "Draws: {} ({draw_pct:.1}%)", stats.draws);
    let _ = writeln!(
        output,
        "Mean match length: {:.1}s",
        stats.mean_duration_ms() / 1000.0
    );

    output
}
