//! Init command - set up a survey workspace

use crate::config::{CONFIG_FILE_NAMES, EXAMPLE_CONFIG};
use anyhow::{Context, Result};
use console::style;
use std::path::Path;

/// Run the init command
pub fn run(root: &Path, force: bool) -> Result<()> {
    let root = root
        .canonicalize()
        .with_context(|| format!("Path does not exist: {}", root.display()))?;

    if !root.is_dir() {
        anyhow::bail!("Path is not a directory: {}", root.display());
    }

    println!("\n{} Initializing MindScope\n", style("◆").bold());

    let config_path = root.join(CONFIG_FILE_NAMES[0]);
    if config_path.exists() && !force {
        println!(
            "{} Config already exists at {} (use --force to overwrite)",
            style("✓").green(),
            style(config_path.display()).cyan()
        );
    } else {
        std::fs::write(&config_path, EXAMPLE_CONFIG)
            .with_context(|| format!("Failed to write {}", config_path.display()))?;
        println!(
            "{} Created {}",
            style("✓").green(),
            style(config_path.display()).cyan()
        );
    }

    // Re-read so a pre-existing config decides where data goes
    let config = crate::config::load_survey_config(&root);
    let data_dir = config.data_dir(&root);
    if data_dir.exists() {
        println!(
            "{} Data directory {}",
            style("✓").green(),
            style(data_dir.display()).cyan()
        );
    } else {
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create {}", data_dir.display()))?;
        println!(
            "{} Created {}",
            style("✓").green(),
            style(data_dir.display()).cyan()
        );
    }

    println!(
        "\nNext: {} to see the survey, {} to store a respondent.",
        style("mindscope questions").cyan(),
        style("mindscope submit <file.json>").cyan()
    );
    Ok(())
}
