//! Tugmath CLI - play, simulate and check configs.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

/// Tugmath - a two-player tug-of-war arithmetic game
#[derive(Parser, Debug)]
#[command(name = "tugmath")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play a local two-player game in the terminal
    Play {
        /// JSON config file (default: built-in constants)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Write logs to this file
        #[arg(long)]
        log_file: Option<PathBuf>,
    },

    /// Run bot-vs-bot matches and aggregate statistics
    Simulate {
        /// Number of matches to run (default: 1000)
        #[arg(short, long, default_value = "1000")]
        games: u64,

        /// Starting seed (increments for each match)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Chance that player 1 answers correctly
        #[arg(long, default_value = "0.8")]
        p1_accuracy: f64,

        /// Chance that player 2 answers correctly
        #[arg(long, default_value = "0.8")]
        p2_accuracy: f64,

        /// Player 1 thinking time per problem in milliseconds
        #[arg(long, default_value = "1500")]
        p1_think: u64,

        /// Player 2 thinking time per problem in milliseconds
        #[arg(long, default_value = "1500")]
        p2_think: u64,

        /// Play time in milliseconds before a match is a draw
        #[arg(long, default_value = "600000")]
        max_duration: u64,

        /// JSON config file (default: built-in constants)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,
    },

    /// Validate a JSON config file
    CheckConfig {
        /// Config file to validate
        #[arg(required = true)]
        config: PathBuf,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    let result = match args.command {
        Commands::Play {
            config,
            seed,
            log_file,
        } => cli::play::execute(config, seed, log_file),

        Commands::Simulate {
            games,
            seed,
            p1_accuracy,
            p2_accuracy,
            p1_think,
            p2_think,
            max_duration,
            config,
            threads,
            format,
            progress,
        } => cli::simulate::execute(&cli::simulate::SimulateArgs {
            games,
            seed,
            p1: (p1_accuracy, p1_think),
            p2: (p2_accuracy, p2_think),
            max_duration,
            config,
            threads,
            format,
            progress,
        }),

        Commands::CheckConfig { config } => cli::check_config::execute(&config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
