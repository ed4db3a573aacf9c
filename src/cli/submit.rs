//! Submit command - validate, score and store a respondent

use super::{read_json, Workspace};
use crate::reporters::{report_with_format, OutputFormat, Report};
use crate::rubric::Rubric;
use crate::scoring::ScoringEngine;
use crate::submission::{Submission, SubmissionService};
use anyhow::{Context, Result};
use console::style;
use std::path::Path;

pub fn run(root: &Path, file: &Path, format: Option<&str>) -> Result<()> {
    let workspace = Workspace::load(root)?;
    let format = workspace.format(format)?;
    let submission: Submission = read_json(file)?;

    let rubric = Rubric::standard();
    let engine = ScoringEngine::new(&rubric, &workspace.config.scoring);
    let mut store = workspace.open_store()?;
    let respondent = SubmissionService::new(engine, &workspace.config.submission, &mut store)
        .submit(submission)
        .with_context(|| format!("Submission {} was rejected", file.display()))?;

    if format != OutputFormat::Json {
        println!(
            "{} Stored respondent {}",
            style("✓").green(),
            style(&respondent.id).cyan()
        );
    }
    println!("{}", report_with_format(Report::Respondent(&respondent), format)?);
    Ok(())
}
