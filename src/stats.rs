//! Aggregate survey statistics
//!
//! Counts over stored respondents for the dashboard view. Every
//! distribution is sorted by count (descending), then label.

use crate::models::Respondent;
use serde::Serialize;
use std::collections::HashMap;

/// States shown in the location distribution
pub const TOP_STATES: usize = 10;

/// Label for blank demographic values
pub const UNSPECIFIED: &str = "Unspecified";

/// Age bucket labels, lower bounds inclusive
const AGE_GROUPS: [(u32, u32, &str); 4] = [
    (18, 20, "18-20"),
    (21, 23, "21-23"),
    (24, 26, "24-26"),
    (27, 30, "27-30"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bucket {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyStats {
    pub total: usize,
    pub gender_distribution: Vec<Bucket>,
    pub age_distribution: Vec<Bucket>,
    pub attachment_distribution: Vec<Bucket>,
    pub invalidation_distribution: Vec<Bucket>,
    pub emotion_regulation_distribution: Vec<Bucket>,
    pub education_distribution: Vec<Bucket>,
    pub location_distribution: Vec<Bucket>,
}

/// Age group label; anything outside 18-30 (or missing) is "Other"
pub fn age_group(age: Option<u32>) -> &'static str {
    age.and_then(|age| {
        AGE_GROUPS
            .iter()
            .find(|(lo, hi, _)| (*lo..=*hi).contains(&age))
            .map(|(_, _, label)| *label)
    })
    .unwrap_or("Other")
}

fn blank_as_unspecified(value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        UNSPECIFIED.to_string()
    } else {
        value.to_string()
    }
}

fn distribution<I>(labels: I) -> Vec<Bucket>
where
    I: IntoIterator<Item = String>,
{
    let mut counts: HashMap<String, usize> = HashMap::new();
    for label in labels {
        *counts.entry(label).or_insert(0) += 1;
    }
    let mut buckets: Vec<Bucket> = counts
        .into_iter()
        .map(|(label, count)| Bucket { label, count })
        .collect();
    buckets.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    buckets
}

/// Distribution of one free-text demographic field
fn demographic(respondents: &[Respondent], field: fn(&Respondent) -> &String) -> Vec<Bucket> {
    distribution(respondents.iter().map(|r| blank_as_unspecified(field(r))))
}

impl SurveyStats {
    pub fn from_respondents(respondents: &[Respondent]) -> Self {
        let mut location_distribution = demographic(respondents, |r| &r.demographics.state);
        location_distribution.truncate(TOP_STATES);

        Self {
            total: respondents.len(),
            gender_distribution: demographic(respondents, |r| &r.demographics.gender),
            age_distribution: distribution(
                respondents
                    .iter()
                    .map(|r| age_group(r.demographics.age).to_string()),
            ),
            attachment_distribution: distribution(
                respondents
                    .iter()
                    .map(|r| r.result.attachment_style.to_string()),
            ),
            invalidation_distribution: distribution(
                respondents
                    .iter()
                    .map(|r| r.result.invalidation_level.to_string()),
            ),
            emotion_regulation_distribution: distribution(
                respondents
                    .iter()
                    .map(|r| r.result.emotion_regulation_tendency.to_string()),
            ),
            education_distribution: demographic(respondents, |r| &r.demographics.education),
            location_distribution,
        }
    }
}
