//! Respondent commands - list, show, delete, check-email

use super::Workspace;
use crate::reporters::{report_with_format, Report};
use crate::store::ResponseStore;
use anyhow::Result;
use console::style;
use std::path::Path;

pub fn list(root: &Path, format: Option<&str>) -> Result<()> {
    let workspace = Workspace::load(root)?;
    let format = workspace.format(format)?;
    let respondents = workspace.open_store()?.list()?;
    println!("{}", report_with_format(Report::Respondents(&respondents), format)?);
    Ok(())
}

pub fn show(root: &Path, id: &str, format: Option<&str>) -> Result<()> {
    let workspace = Workspace::load(root)?;
    let format = workspace.format(format)?;
    let Some(respondent) = workspace.open_store()?.get(id)? else {
        anyhow::bail!("No respondent with id '{}'", id);
    };
    println!("{}", report_with_format(Report::Respondent(&respondent), format)?);
    Ok(())
}

pub fn delete(root: &Path, id: &str) -> Result<()> {
    let workspace = Workspace::load(root)?;
    let mut store = workspace.open_store()?;
    if !store.delete(id)? {
        anyhow::bail!("No respondent with id '{}'", id);
    }
    println!(
        "{} Deleted respondent {} with their answers and result",
        style("✓").green(),
        style(id).cyan()
    );
    Ok(())
}

pub fn check_email(root: &Path, email: &str, json: bool) -> Result<()> {
    let workspace = Workspace::load(root)?;
    let exists = workspace.open_store()?.find_by_email(email)?.is_some();
    if json {
        println!("{}", serde_json::json!({ "exists": exists }));
    } else if exists {
        println!("{} {} has already submitted", style("●").yellow(), email.trim());
    } else {
        println!("{} {} has not submitted yet", style("○").green(), email.trim());
    }
    Ok(())
}
