//! Simulate command implementation.

// Games per second is a display figure
#![allow(clippy::cast_precision_loss)]

use super::output::{JsonSimResult, format_sim_text};
use super::{CliError, OutputFormat, init_stderr_logging, load_config, resolve_seed};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;
use tugmath::sim::{BotProfile, SimConfig, run_simulation};

/// Arguments for the simulate command.
#[derive(Debug)]
pub(crate) struct SimulateArgs {
    /// Matches to run.
    pub(crate) games: u64,
    /// Base seed; match `i` uses `seed + i`.
    pub(crate) seed: Option<u64>,
    /// Player 1 accuracy and thinking time.
    pub(crate) p1: (f64, u64),
    /// Player 2 accuracy and thinking time.
    pub(crate) p2: (f64, u64),
    /// Play time before a match is a draw.
    pub(crate) max_duration: u64,
    /// Optional game config file.
    pub(crate) config: Option<PathBuf>,
    /// Rayon thread count.
    pub(crate) threads: Option<usize>,
    /// Output format.
    pub(crate) format: OutputFormat,
    /// Show a progress bar on stderr.
    pub(crate) progress: bool,
}

/// Execute the simulate command.
///
/// # Errors
///
/// Returns an error if the config or bot profiles are invalid.
pub(crate) fn execute(args: &SimulateArgs) -> Result<(), CliError> {
    init_stderr_logging()?;

    let config = SimConfig {
        game: load_config(args.config.as_deref())?,
        p1: BotProfile {
            accuracy: args.p1.0,
            think_ms: args.p1.1,
        },
        p2: BotProfile {
            accuracy: args.p2.0,
            think_ms: args.p2.1,
        },
        max_duration_ms: args.max_duration,
    };
    config.validate()?;

    // Set thread pool size if specified
    if let Some(num_threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .ok(); // Ignore error if already initialized
    }

    let base_seed = resolve_seed(args.seed);

    let pb = if args.progress {
        let pb = ProgressBar::new(args.games);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} games ({per_sec})")
                .map_err(|e| CliError::new(format!("Invalid progress template: {e}")))?
                .progress_chars("=>-"),
        );
        Some(pb)
    } else {
        None
    };

    let start = Instant::now();
    let stats = run_simulation(base_seed, args.games, &config, || {
        if let Some(pb) = &pb {
            pb.inc(1);
        }
    })?;

    if let Some(pb) = pb {
        pb.finish_with_message("done");
    }

    let duration = start.elapsed();
    let games_per_sec = if duration.as_secs_f64() > 0.0 {
        stats.games as f64 / duration.as_secs_f64()
    } else {
        0.0
    };

    match args.format {
        OutputFormat::Text => {
            println!();
            print!("{}", format_sim_text(base_seed, &stats, &config));
            println!();
            println!(
                "Duration: {:.2}s ({games_per_sec:.0} games/sec)",
                duration.as_secs_f64()
            );
        }
        OutputFormat::Json => {
            let json_result = JsonSimResult::from_stats(base_seed, &stats, &config);
            let json = serde_json::to_string_pretty(&json_result)
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
    }

    Ok(())
}
