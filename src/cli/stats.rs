//! Stats command - aggregate counts over stored respondents

use super::Workspace;
use crate::reporters::{report_with_format, Report};
use crate::stats::SurveyStats;
use crate::store::ResponseStore;
use anyhow::Result;
use std::path::Path;

pub fn run(root: &Path, format: Option<&str>) -> Result<()> {
    let workspace = Workspace::load(root)?;
    let format = workspace.format(format)?;
    let respondents = workspace.open_store()?.list()?;
    let stats = SurveyStats::from_respondents(&respondents);
    println!("{}", report_with_format(Report::Stats(&stats), format)?);
    Ok(())
}
