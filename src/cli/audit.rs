//! Audit command - re-score stored respondents and report drift
//!
//! Stored results are frozen at submission time. After a rubric or config
//! change (for example toggling `scoring.compare_rounded`) this shows which
//! respondents would be classified differently today.

use super::Workspace;
use crate::models::{PersonalityResult, Respondent};
use crate::rubric::Rubric;
use crate::scoring::ScoringEngine;
use crate::store::ResponseStore;
use anyhow::Result;
use console::style;
use rayon::prelude::*;
use std::path::Path;
use tracing::debug;

/// One respondent whose stored result differs from a fresh score
#[derive(Debug)]
pub(crate) struct Drift {
    pub id: String,
    pub name: String,
    pub changes: Vec<String>,
}

fn compare(stored: &PersonalityResult, fresh: &PersonalityResult) -> Vec<String> {
    let mut changes = Vec::new();
    let mut field = |name: &str, before: String, after: String| {
        if before != after {
            changes.push(format!("{name}: {before} -> {after}"));
        }
    };
    field(
        "invalidation",
        format!("{} ({:.1})", stored.invalidation_level, stored.invalidation_score),
        format!("{} ({:.1})", fresh.invalidation_level, fresh.invalidation_score),
    );
    field(
        "attachment",
        format!("{} ({:.1})", stored.attachment_style, stored.attachment_score),
        format!("{} ({:.1})", fresh.attachment_style, fresh.attachment_score),
    );
    field(
        "regulation",
        format!(
            "{} ({:.1}/{:.1})",
            stored.emotion_regulation_tendency, stored.reappraisal_score, stored.suppression_score
        ),
        format!(
            "{} ({:.1}/{:.1})",
            fresh.emotion_regulation_tendency, fresh.reappraisal_score, fresh.suppression_score
        ),
    );
    changes
}

/// Re-score every respondent in parallel
pub(crate) fn find_drift(engine: &ScoringEngine<'_>, respondents: &[Respondent]) -> Vec<Drift> {
    let mut drift: Vec<Drift> = respondents
        .par_iter()
        .filter_map(|respondent| {
            let changes = match engine.score(&respondent.answers) {
                Ok(fresh) => compare(&respondent.result, &fresh),
                Err(e) => vec![format!("answers no longer valid: {e}")],
            };
            (!changes.is_empty()).then(|| Drift {
                id: respondent.id.clone(),
                name: respondent.demographics.full_name.clone(),
                changes,
            })
        })
        .collect();
    drift.sort_by(|a, b| a.id.cmp(&b.id));
    drift
}

pub fn run(root: &Path, fail_on_drift: bool) -> Result<()> {
    let workspace = Workspace::load(root)?;
    let respondents = workspace.open_store()?.list()?;
    let rubric = Rubric::standard();
    let engine = ScoringEngine::new(&rubric, &workspace.config.scoring);

    let drift = find_drift(&engine, &respondents);
    debug!("Audited {} respondents, {} drifted", respondents.len(), drift.len());

    if drift.is_empty() {
        println!(
            "{} All {} stored results match a fresh score",
            style("✓").green(),
            respondents.len()
        );
        return Ok(());
    }

    println!(
        "\n{} {} of {} stored results differ from a fresh score\n",
        style("!").yellow().bold(),
        drift.len(),
        respondents.len()
    );
    for d in &drift {
        println!("  {} {}", style(&d.name).bold(), style(&d.id).dim());
        for change in &d.changes {
            println!("    {}", change);
        }
    }

    if fail_on_drift {
        anyhow::bail!("{} respondents drifted", drift.len());
    }
    Ok(())
}
