//! Interactive prompts using dialoguer

use std::path::Path;

use anyhow::Result;
use dialoguer::Confirm;

/// Prompt user to confirm proceeding with an action
pub fn confirm_step(message: &str) -> Result<bool> {
    let confirmed = Confirm::new()
        .with_prompt(message)
        .default(true)
        .interact()?;
    Ok(confirmed)
}

/// Prompt user to confirm generating synthetic data in place of a missing dataset
pub fn confirm_synthetic_data(missing: &Path, samples: usize) -> Result<bool> {
    let message = format!(
        "{} not found. Generate {} synthetic students instead?",
        missing.display(),
        samples
    );
    confirm_step(&message)
}
