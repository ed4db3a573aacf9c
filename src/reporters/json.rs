//! JSON reporter
//!
//! Outputs the underlying records as pretty-printed JSON, in the same
//! camelCase shape the store persists. Useful for piping to jq.

use super::Report;
use anyhow::Result;

/// Render report as JSON
pub fn render(report: Report<'_>) -> Result<String> {
    let json = match report {
        Report::Result(result) => serde_json::to_string_pretty(result)?,
        Report::Respondent(respondent) => serde_json::to_string_pretty(respondent)?,
        Report::Respondents(respondents) => serde_json::to_string_pretty(respondents)?,
        Report::Stats(stats) => serde_json::to_string_pretty(stats)?,
    };
    Ok(json)
}
