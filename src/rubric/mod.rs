//! Question and rubric registry
//!
//! Holds the three fixed survey sections: their prompts, their response
//! scales and the subscales each question index belongs to. A [`Rubric`]
//! is built once (normally with [`Rubric::standard`]) and passed by
//! reference to the scoring engine; nothing mutates it afterwards.
//!
//! The engine trusts the registry's internal consistency.
//! [`Rubric::check_consistency`] exists so that trust can be tested.

mod tables;

use crate::models::{ScalePoint, SectionKey};
use serde::Serialize;
use thiserror::Error;

/// Invalidation items scored in reverse
pub const REVERSE: &str = "reverse";
/// Invalidation items scored as answered
pub const REMAINDER: &str = "remainder";
pub const SECURE: &str = "secure";
pub const ANXIOUS: &str = "anxious";
pub const AVOIDANT: &str = "avoidant";
pub const REAPPRAISAL: &str = "reappraisal";
pub const SUPPRESSION: &str = "suppression";

/// Registry construction problems
#[derive(Error, Debug, PartialEq)]
pub enum RubricError {
    #[error("section '{0}' is defined more than once")]
    DuplicateSection(SectionKey),

    #[error("section '{0}' has an empty response scale")]
    EmptyScale(SectionKey),

    #[error("section '{0}' has a scale that is not a contiguous ascending range")]
    NonContiguousScale(SectionKey),

    #[error("subscale '{subscale}' in section '{section}' references question {index}, but the section has {count} questions")]
    IndexOutOfRange {
        section: SectionKey,
        subscale: String,
        index: usize,
        count: usize,
    },

    #[error("question {index} in section '{section}' belongs to both '{first}' and '{second}'")]
    OverlappingSubscales {
        section: SectionKey,
        first: String,
        second: String,
        index: usize,
    },
}

/// A named group of question indices aggregated together
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Subscale {
    pub name: String,
    pub indices: Vec<usize>,
}

impl Subscale {
    pub fn new(name: &str, indices: &[usize]) -> Self {
        Self {
            name: name.to_string(),
            indices: indices.to_vec(),
        }
    }

    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }
}

/// One survey section
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionRubric {
    pub key: SectionKey,
    pub title: String,
    pub description: String,
    pub questions: Vec<String>,
    pub scale: Vec<ScalePoint>,
    #[serde(skip)]
    pub subscales: Vec<Subscale>,
}

impl SectionRubric {
    /// Lowest and highest scale values
    pub fn scale_range(&self) -> (i32, i32) {
        let min = self.scale.iter().map(|p| p.value).min().unwrap_or(0);
        let max = self.scale.iter().map(|p| p.value).max().unwrap_or(0);
        (min, max)
    }

    pub fn subscale(&self, name: &str) -> Option<&Subscale> {
        self.subscales.iter().find(|s| s.name == name)
    }

    /// Indices of a subscale, empty when the section doesn't define it
    pub fn subscale_indices(&self, name: &str) -> &[usize] {
        self.subscale(name)
            .map(|s| s.indices.as_slice())
            .unwrap_or(&[])
    }

    pub fn label_for(&self, value: i32) -> Option<&str> {
        self.scale
            .iter()
            .find(|p| p.value == value)
            .map(|p| p.label.as_str())
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }
}

/// Invalidation percentage cut-offs (inclusive upper bounds)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LevelCutoffs {
    pub low_max: f64,
    pub moderate_max: f64,
}

impl Default for LevelCutoffs {
    fn default() -> Self {
        Self {
            low_max: 33.0,
            moderate_max: 66.0,
        }
    }
}

/// The complete, immutable survey rubric
#[derive(Debug, Clone, Serialize)]
pub struct Rubric {
    pub sections: Vec<SectionRubric>,
    #[serde(skip)]
    pub invalidation_cutoffs: LevelCutoffs,
    /// Minimum average gap before one regulation strategy dominates
    #[serde(skip)]
    pub regulation_margin: f64,
}

impl Rubric {
    pub fn new(sections: Vec<SectionRubric>) -> Self {
        Self {
            sections,
            invalidation_cutoffs: LevelCutoffs::default(),
            regulation_margin: 0.5,
        }
    }

    /// The fixed three-section rubric the survey is scored against
    pub fn standard() -> Self {
        let remainder: Vec<usize> = (0..tables::INVALIDATION_QUESTIONS.len())
            .filter(|i| !tables::INVALIDATION_REVERSE.contains(i))
            .collect();

        Self::new(vec![
            build_section(
                SectionKey::Invalidation,
                0,
                tables::INVALIDATION_QUESTIONS,
                tables::INVALIDATION_SCALE,
                vec![
                    Subscale::new(REVERSE, tables::INVALIDATION_REVERSE),
                    Subscale::new(REMAINDER, &remainder),
                ],
            ),
            build_section(
                SectionKey::Attachment,
                1,
                tables::ATTACHMENT_QUESTIONS,
                tables::AGREEMENT_SCALE_5,
                vec![
                    Subscale::new(SECURE, tables::ATTACHMENT_SECURE),
                    Subscale::new(ANXIOUS, tables::ATTACHMENT_ANXIOUS),
                    Subscale::new(AVOIDANT, tables::ATTACHMENT_AVOIDANT),
                ],
            ),
            build_section(
                SectionKey::Emotion,
                2,
                tables::EMOTION_QUESTIONS,
                tables::AGREEMENT_SCALE_7,
                vec![
                    Subscale::new(REAPPRAISAL, tables::EMOTION_REAPPRAISAL),
                    Subscale::new(SUPPRESSION, tables::EMOTION_SUPPRESSION),
                ],
            ),
        ])
    }

    pub fn section(&self, key: SectionKey) -> Option<&SectionRubric> {
        self.sections.iter().find(|s| s.key == key)
    }

    /// Total number of questions across all sections
    pub fn question_count(&self) -> usize {
        self.sections.iter().map(|s| s.question_count()).sum()
    }

    /// Verify subscale indices, scales and section keys agree with each other
    pub fn check_consistency(&self) -> Result<(), RubricError> {
        for (i, section) in self.sections.iter().enumerate() {
            if self.sections[..i].iter().any(|s| s.key == section.key) {
                return Err(RubricError::DuplicateSection(section.key));
            }

            if section.scale.is_empty() {
                return Err(RubricError::EmptyScale(section.key));
            }
            let contiguous = section
                .scale
                .windows(2)
                .all(|w| w[1].value == w[0].value + 1);
            if !contiguous {
                return Err(RubricError::NonContiguousScale(section.key));
            }

            let count = section.question_count();
            for subscale in &section.subscales {
                if let Some(&index) = subscale.indices.iter().find(|&&idx| idx >= count) {
                    return Err(RubricError::IndexOutOfRange {
                        section: section.key,
                        subscale: subscale.name.clone(),
                        index,
                        count,
                    });
                }
            }

            for (a, first) in section.subscales.iter().enumerate() {
                for second in &section.subscales[a + 1..] {
                    if let Some(&index) = first.indices.iter().find(|idx| second.contains(**idx)) {
                        return Err(RubricError::OverlappingSubscales {
                            section: section.key,
                            first: first.name.clone(),
                            second: second.name.clone(),
                            index,
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

fn build_section(
    key: SectionKey,
    text_slot: usize,
    questions: &[&str],
    scale: &[(i32, &str)],
    subscales: Vec<Subscale>,
) -> SectionRubric {
    let (title, description) = tables::SECTION_TEXT[text_slot];
    SectionRubric {
        key,
        title: title.to_string(),
        description: description.to_string(),
        questions: questions.iter().map(|q| q.to_string()).collect(),
        scale: scale
            .iter()
            .map(|(value, label)| ScalePoint {
                value: *value,
                label: label.to_string(),
            })
            .collect(),
        subscales,
    }
}

/// A demographic input shown before the survey sections
#[derive(Debug, Clone, Serialize)]
pub struct DemographicField {
    pub name: &'static str,
    pub label: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub required: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<u32>,
}

/// Demographic form definition, with the age bounds the boundary enforces
pub fn demographic_fields(min_age: u32, max_age: u32) -> Vec<DemographicField> {
    let text = |name, label| DemographicField {
        name,
        label,
        kind: "text",
        required: true,
        options: Vec::new(),
        min: None,
        max: None,
    };
    let select = |name, label, options: &[&'static str]| DemographicField {
        name,
        label,
        kind: "select",
        required: true,
        options: options.to_vec(),
        min: None,
        max: None,
    };

    vec![
        text("fullName", "Full Name"),
        DemographicField {
            kind: "email",
            ..text("email", "Email Address")
        },
        DemographicField {
            kind: "number",
            min: Some(min_age),
            max: Some(max_age),
            ..text("age", "Age")
        },
        select(
            "gender",
            "Gender",
            &["Male", "Female", "Non-binary", "Prefer not to say"],
        ),
        select(
            "education",
            "Education Level",
            &["High School", "Undergraduate", "Postgraduate", "Doctorate", "Other"],
        ),
        text("occupation", "Occupation"),
        text("city", "City"),
        text("state", "State / Province"),
    ]
}
