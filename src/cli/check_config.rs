//! Check-config command implementation.

use super::{CliError, init_stderr_logging, load_config};
use std::path::Path;

/// Execute the check-config command.
///
/// # Errors
///
/// Returns an error if the file cannot be loaded or fails validation.
pub(crate) fn execute(path: &Path) -> Result<(), CliError> {
    init_stderr_logging()?;
    let config = load_config(Some(path))?;

    let json = serde_json::to_string_pretty(&config)
        .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;

    println!("{}: OK", path.display());
    println!("{json}");
    println!();
    println!("Player 1 wins at or below {:.2}", config.p1_threshold());
    println!("Player 2 wins at or above {:.2}", config.p2_threshold());
    println!(
        "Correct answers to win from the centre: {}",
        pulls_to_win(config.pull_strength, config.win_zone_width)
    );

    Ok(())
}

/// Consecutive correct answers needed to reach a win zone from 50.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn pulls_to_win(pull: f64, win_zone: f64) -> u64 {
    ((50.0 - win_zone) / pull).ceil().max(1.0) as u64
}
