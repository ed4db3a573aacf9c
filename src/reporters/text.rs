//! Text (terminal) reporter with colors and formatting

use super::Report;
use crate::models::{
    AttachmentStyle, EmotionRegulationTendency, InvalidationLevel, PersonalityResult, Respondent,
};
use crate::stats::{Bucket, SurveyStats};
use anyhow::Result;

/// Reset ANSI color
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

const RULE: &str = "──────────────────────────────────────";

/// Level colors
fn level_color(level: InvalidationLevel) -> &'static str {
    match level {
        InvalidationLevel::Low => "\x1b[32m",      // Green
        InvalidationLevel::Moderate => "\x1b[33m", // Yellow
        InvalidationLevel::High => "\x1b[31m",     // Red
    }
}

fn style_color(style: AttachmentStyle) -> &'static str {
    match style {
        AttachmentStyle::Secure => "\x1b[32m",
        AttachmentStyle::Anxious => "\x1b[35m", // Magenta
        AttachmentStyle::Avoidant => "\x1b[34m", // Blue
    }
}

fn tendency_color(tendency: EmotionRegulationTendency) -> &'static str {
    match tendency {
        EmotionRegulationTendency::CognitiveReappraisal => "\x1b[36m", // Cyan
        EmotionRegulationTendency::ExpressiveSuppression => "\x1b[33m",
        EmotionRegulationTendency::Balanced => "\x1b[32m",
    }
}

/// Render report as formatted terminal output
pub fn render(report: Report<'_>) -> Result<String> {
    Ok(match report {
        Report::Result(result) => render_result(result),
        Report::Respondent(respondent) => render_respondent(respondent),
        Report::Respondents(respondents) => render_listing(respondents),
        Report::Stats(stats) => render_stats(stats),
    })
}

fn render_result(result: &PersonalityResult) -> String {
    let mut out = String::new();
    out.push_str(&format!("\n{BOLD}Personality Profile{RESET}\n"));
    out.push_str(&format!("{DIM}{RULE}{RESET}\n"));

    let lc = level_color(result.invalidation_level);
    out.push_str(&format!(
        "  Invalidation:  {lc}{BOLD}{}{RESET}  ({:.1}%)\n",
        result.invalidation_level, result.invalidation_score
    ));
    let sc = style_color(result.attachment_style);
    out.push_str(&format!(
        "  Attachment:    {sc}{BOLD}{}{RESET}  ({:.1}/5)\n",
        result.attachment_style, result.attachment_score
    ));
    let tc = tendency_color(result.emotion_regulation_tendency);
    out.push_str(&format!(
        "  Regulation:    {tc}{BOLD}{}{RESET}  (reappraisal {:.1}, suppression {:.1})\n\n",
        result.emotion_regulation_tendency, result.reappraisal_score, result.suppression_score
    ));

    out.push_str(&format!("{BOLD}SUMMARY{RESET}\n"));
    out.push_str(&wrap(&result.personality_summary, 76, "  "));
    out.push('\n');
    out
}

fn render_respondent(respondent: &Respondent) -> String {
    let d = &respondent.demographics;
    let mut out = String::new();
    out.push_str(&format!("\n{BOLD}{}{RESET} <{}>\n", d.full_name, d.email));
    out.push_str(&format!(
        "{DIM}id {}  submitted {}{RESET}\n",
        respondent.id,
        respondent.created_at.format("%Y-%m-%d %H:%M UTC")
    ));

    let mut facts = Vec::new();
    if let Some(age) = d.age {
        facts.push(format!("age {age}"));
    }
    for value in [&d.gender, &d.education, &d.occupation] {
        if !value.is_empty() {
            facts.push(value.clone());
        }
    }
    let place: Vec<&str> = [d.city.as_str(), d.state.as_str()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect();
    if !place.is_empty() {
        facts.push(place.join(", "));
    }
    if !facts.is_empty() {
        out.push_str(&format!("  {}\n", facts.join(" · ")));
    }

    out.push_str(&render_result(&respondent.result));

    if !respondent.answers.is_empty() {
        out.push_str(&format!("\n{BOLD}ANSWERS{RESET} ({})\n", respondent.answers.len()));
        let mut current = None;
        for item in &respondent.answers {
            if current != Some(item.section) {
                out.push_str(&format!("  {DIM}{}{RESET}\n", item.section));
                current = Some(item.section);
            }
            let label = if item.answer_label.is_empty() {
                String::new()
            } else {
                format!(" {DIM}{}{RESET}", item.answer_label)
            };
            out.push_str(&format!(
                "  {:>3}. [{}]{} {}\n",
                item.question_index + 1,
                item.answer,
                label,
                item.question_text
            ));
        }
    }
    out
}

fn render_listing(respondents: &[Respondent]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "\n{BOLD}RESPONDENTS{RESET} ({} total)\n",
        respondents.len()
    ));
    if respondents.is_empty() {
        out.push_str(&format!("  {DIM}No responses yet{RESET}\n"));
        return out;
    }

    out.push_str(&format!(
        "{DIM}  SUBMITTED          NAME                      INVALIDATION  ATTACHMENT  REGULATION{RESET}\n"
    ));
    for r in respondents {
        let name: String = r.demographics.full_name.chars().take(24).collect();
        out.push_str(&format!(
            "  {}  {:<24}  {:<12}  {:<10}  {}\n",
            r.created_at.format("%Y-%m-%d %H:%M"),
            name,
            r.result.invalidation_level.to_string(),
            r.result.attachment_style.to_string(),
            r.result.emotion_regulation_tendency
        ));
        out.push_str(&format!("  {DIM}{}{RESET}\n", r.id));
    }
    out
}

fn render_stats(stats: &SurveyStats) -> String {
    let mut out = String::new();
    out.push_str(&format!("\n{BOLD}SURVEY STATISTICS{RESET}\n"));
    out.push_str(&format!("{DIM}{RULE}{RESET}\n"));
    out.push_str(&format!("Total respondents: {BOLD}{}{RESET}\n", stats.total));

    let sections: [(&str, &[Bucket]); 7] = [
        ("Invalidation", &stats.invalidation_distribution),
        ("Attachment", &stats.attachment_distribution),
        ("Regulation", &stats.emotion_regulation_distribution),
        ("Age", &stats.age_distribution),
        ("Gender", &stats.gender_distribution),
        ("Education", &stats.education_distribution),
        ("Top states", &stats.location_distribution),
    ];
    for (title, buckets) in sections {
        if buckets.is_empty() {
            continue;
        }
        out.push_str(&format!("\n{BOLD}{}{RESET}\n", title.to_uppercase()));
        for bucket in buckets {
            out.push_str(&format!(
                "  {:<24} {:>4}  {}\n",
                bucket.label,
                bucket.count,
                bar(bucket.count, stats.total)
            ));
        }
    }
    out
}

/// Proportional bar, 20 cells wide
fn bar(count: usize, total: usize) -> String {
    if total == 0 {
        return String::new();
    }
    let filled = (count * 20 + total / 2) / total;
    format!("{}{DIM}{}{RESET}", "█".repeat(filled), "░".repeat(20 - filled.min(20)))
}

/// Greedy word wrap with a prefix on every line
fn wrap(text: &str, width: usize, prefix: &str) -> String {
    let mut out = String::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && line.chars().count() + 1 + word.chars().count() > width {
            out.push_str(prefix);
            out.push_str(&line);
            out.push('\n');
            line.clear();
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        out.push_str(prefix);
        out.push_str(&line);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::test_respondent;

    #[test]
    fn test_text_result() {
        let respondent = test_respondent();
        let out = render(Report::Result(&respondent.result)).unwrap();
        assert!(out.contains("Personality Profile"));
        assert!(out.contains("Cognitive Reappraisal"));
        assert!(out.contains("reappraisal 6.0, suppression 2.0"));
        assert!(out.contains("SUMMARY"));
    }

    #[test]
    fn test_text_respondent_groups_answers() {
        let respondent = test_respondent();
        let out = render(Report::Respondent(&respondent)).unwrap();
        assert!(out.contains("Ada Lovelace"));
        assert!(out.contains("ANSWERS"));
        assert!(out.contains("age 24"));
        assert!(out.contains("Pune, Maharashtra"));
        assert!(out.contains("emotion"));
    }

    #[test]
    fn test_text_empty_listing() {
        let out = render(Report::Respondents(&[])).unwrap();
        assert!(out.contains("No responses yet"));
    }

    #[test]
    fn test_wrap_respects_width() {
        let wrapped = wrap("one two three four five six", 9, "> ");
        for line in wrapped.lines() {
            assert!(line.chars().count() <= 11, "{line}");
        }
        assert_eq!(wrapped.lines().count(), 4);
    }

    #[test]
    fn test_bar() {
        assert_eq!(bar(1, 0), "");
        assert!(bar(2, 2).starts_with(&"█".repeat(20)));
    }
}
