//! Markdown reporter for GitHub-flavored Markdown output
//!
//! Suitable for sharing a respondent's profile or pasting survey
//! statistics into a report.

use super::Report;
use crate::models::{PersonalityResult, Respondent};
use crate::stats::{Bucket, SurveyStats};
use anyhow::Result;
use chrono::Local;

/// Render report as GitHub-flavored Markdown
pub fn render(report: Report<'_>) -> Result<String> {
    let mut md = String::new();
    match report {
        Report::Result(result) => {
            md.push_str("# Personality Profile\n\n");
            md.push_str(&render_result(result));
        }
        Report::Respondent(respondent) => md.push_str(&render_respondent(respondent)),
        Report::Respondents(respondents) => md.push_str(&render_listing(respondents)),
        Report::Stats(stats) => md.push_str(&render_stats(stats)),
    }
    md.push('\n');
    md.push_str(&render_footer());
    Ok(md)
}

fn render_result(result: &PersonalityResult) -> String {
    let mut md = String::new();
    md.push_str("| Indicator | Classification | Score |\n");
    md.push_str("|-----------|----------------|-------|\n");
    md.push_str(&format!(
        "| Childhood invalidation | {} | {:.1}% |\n",
        result.invalidation_level, result.invalidation_score
    ));
    md.push_str(&format!(
        "| Attachment style | {} | {:.1} / 5 |\n",
        result.attachment_style, result.attachment_score
    ));
    md.push_str(&format!(
        "| Emotion regulation | {} | reappraisal {:.1}, suppression {:.1} |\n",
        result.emotion_regulation_tendency, result.reappraisal_score, result.suppression_score
    ));
    md.push_str(&format!("\n> {}\n", result.personality_summary));
    md
}

fn render_respondent(respondent: &Respondent) -> String {
    let d = &respondent.demographics;
    let mut md = format!("# {}\n\n", escape(&d.full_name));
    md.push_str(&format!("- **Email:** {}\n", d.email));
    if let Some(age) = d.age {
        md.push_str(&format!("- **Age:** {}\n", age));
    }
    for (label, value) in [
        ("Gender", &d.gender),
        ("Education", &d.education),
        ("Occupation", &d.occupation),
        ("City", &d.city),
        ("State", &d.state),
    ] {
        if !value.is_empty() {
            md.push_str(&format!("- **{}:** {}\n", label, escape(value)));
        }
    }
    md.push_str(&format!(
        "- **Submitted:** {}\n- **ID:** `{}`\n\n",
        respondent.created_at.format("%Y-%m-%d %H:%M UTC"),
        respondent.id
    ));

    md.push_str("## Profile\n\n");
    md.push_str(&render_result(&respondent.result));

    if !respondent.answers.is_empty() {
        md.push_str("\n## Answers\n\n");
        md.push_str("| Section | # | Question | Answer |\n");
        md.push_str("|---------|---|----------|--------|\n");
        for item in &respondent.answers {
            let answer = if item.answer_label.is_empty() {
                item.answer.to_string()
            } else {
                format!("{} ({})", item.answer, escape(&item.answer_label))
            };
            md.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                item.section,
                item.question_index + 1,
                escape(&item.question_text),
                answer
            ));
        }
    }
    md
}

fn render_listing(respondents: &[Respondent]) -> String {
    let mut md = format!("# Respondents\n\n{} total\n\n", respondents.len());
    if respondents.is_empty() {
        return md;
    }
    md.push_str("| Submitted | Name | Invalidation | Attachment | Regulation | ID |\n");
    md.push_str("|-----------|------|--------------|------------|------------|----|\n");
    for r in respondents {
        md.push_str(&format!(
            "| {} | {} | {} | {} | {} | `{}` |\n",
            r.created_at.format("%Y-%m-%d %H:%M"),
            escape(&r.demographics.full_name),
            r.result.invalidation_level,
            r.result.attachment_style,
            r.result.emotion_regulation_tendency,
            r.id
        ));
    }
    md
}

fn render_stats(stats: &SurveyStats) -> String {
    let mut md = format!("# Survey Statistics\n\n**Total respondents:** {}\n", stats.total);
    let sections: [(&str, &[Bucket]); 7] = [
        ("Invalidation Level", &stats.invalidation_distribution),
        ("Attachment Style", &stats.attachment_distribution),
        ("Emotion Regulation", &stats.emotion_regulation_distribution),
        ("Age Group", &stats.age_distribution),
        ("Gender", &stats.gender_distribution),
        ("Education", &stats.education_distribution),
        ("Top States", &stats.location_distribution),
    ];
    for (title, buckets) in sections {
        if buckets.is_empty() {
            continue;
        }
        md.push_str(&format!("\n## {}\n\n| Value | Count | Share |\n|-------|-------|-------|\n", title));
        for bucket in buckets {
            let share = if stats.total > 0 {
                100.0 * bucket.count as f64 / stats.total as f64
            } else {
                0.0
            };
            md.push_str(&format!(
                "| {} | {} | {:.1}% |\n",
                escape(&bucket.label),
                bucket.count,
                share
            ));
        }
    }
    md
}

fn render_footer() -> String {
    format!(
        "---\n\n*Generated by MindScope on {}*\n",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    )
}

/// Escape table-breaking characters
fn escape(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::test_respondent;

    #[test]
    fn test_markdown_respondent() {
        let respondent = test_respondent();
        let md = render(Report::Respondent(&respondent)).unwrap();
        assert!(md.starts_with("# Ada Lovelace"));
        assert!(md.contains("| Attachment style | Secure |"));
        assert!(md.contains("## Answers"));
        assert!(md.contains("Generated by MindScope"));
    }

    #[test]
    fn test_markdown_stats_shares() {
        let respondents = vec![test_respondent()];
        let stats = SurveyStats::from_respondents(&respondents);
        let md = render(Report::Stats(&stats)).unwrap();
        assert!(md.contains("## Top States"));
        assert!(md.contains("| Maharashtra | 1 | 100.0% |"));
    }

    #[test]
    fn test_escape_pipes() {
        assert_eq!(escape("a|b\nc"), "a\\|b c");
    }
}
