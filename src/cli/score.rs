//! Score command - score answers without storing a respondent

use super::{read_json, Workspace};
use crate::models::AnsweredItem;
use crate::reporters::{report_with_format, OutputFormat, Report};
use crate::rubric::Rubric;
use crate::scoring::ScoringEngine;
use crate::submission::Submission;
use anyhow::{Context, Result};
use console::style;
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// Accepted score inputs: a bare answer list or a whole submission
#[derive(Deserialize)]
#[serde(untagged)]
enum ScoreInput {
    Answers(Vec<AnsweredItem>),
    Submission(Submission),
}

impl ScoreInput {
    fn into_answers(self) -> Vec<AnsweredItem> {
        match self {
            ScoreInput::Answers(answers) => answers,
            ScoreInput::Submission(submission) => submission.answers,
        }
    }
}

pub fn run(root: &Path, file: &Path, format: Option<&str>, explain: bool) -> Result<()> {
    let workspace = Workspace::load(root)?;
    let format = workspace.format(format)?;
    let answers = read_json::<ScoreInput>(file)?.into_answers();

    let rubric = Rubric::standard();
    let engine = ScoringEngine::new(&rubric, &workspace.config.scoring);
    let result = engine
        .score(&answers)
        .with_context(|| format!("Cannot score {}", file.display()))?;
    info!("Scored {} answers from {}", answers.len(), file.display());

    println!("{}", report_with_format(Report::Result(&result), format)?);

    if explain {
        let breakdown = engine.breakdown(&answers);
        let explanation = engine.explain(&breakdown);
        // Keep JSON output parseable
        if format == OutputFormat::Json {
            eprintln!("{}", explanation);
        } else {
            println!("{}", explanation);
        }
    }

    let missing = engine.missing_answers(&answers);
    if !missing.is_empty() {
        let parts: Vec<String> = missing
            .iter()
            .map(|(section, answered, expected)| format!("{section} {answered}/{expected}"))
            .collect();
        eprintln!(
            "{} Partial answers scored ({}); unanswered items count as zero",
            style("!").yellow(),
            parts.join(", ")
        );
    }
    Ok(())
}
