//! Interactive prompts using dialoguer

use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, MultiSelect, Select};

/// Ask the user to pick the target column, starting on `default_index`
pub fn select_target(columns: &[String], default_index: usize) -> Result<String> {
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Select the target column")
        .items(columns)
        .default(default_index.min(columns.len().saturating_sub(1)))
        .interact()?;
    Ok(columns[selection].clone())
}

/// Ask the user which numeric features to describe per target class.
///
/// Entries in `preselected` start checked. An empty selection keeps the
/// preselected features.
pub fn select_features(numeric: &[String], preselected: &[String]) -> Result<Vec<String>> {
    let defaults: Vec<bool> = numeric.iter().map(|c| preselected.contains(c)).collect();
    let chosen = MultiSelect::with_theme(&ColorfulTheme::default())
        .with_prompt("Features to compare across target classes (space to toggle)")
        .items(numeric)
        .defaults(&defaults)
        .interact()?;

    if chosen.is_empty() {
        return Ok(preselected.to_vec());
    }
    Ok(chosen.into_iter().map(|i| numeric[i].clone()).collect())
}
