//! Core data models for MindScope
//!
//! These models are shared by the rubric registry, the scoring engine,
//! the submission boundary and the reporters. Field names serialize in
//! camelCase so stored records and submission files keep the wire format
//! the survey front end already produces.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The three fixed survey sections
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SectionKey {
    Invalidation,
    Attachment,
    Emotion,
}

impl SectionKey {
    /// All sections in presentation order
    pub const ALL: [SectionKey; 3] = [
        SectionKey::Invalidation,
        SectionKey::Attachment,
        SectionKey::Emotion,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKey::Invalidation => "invalidation",
            SectionKey::Attachment => "attachment",
            SectionKey::Emotion => "emotion",
        }
    }
}

impl std::fmt::Display for SectionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One answered survey question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnsweredItem {
    pub section: SectionKey,
    /// 0-based position of the question within its section
    pub question_index: usize,
    #[serde(default)]
    pub question_text: String,
    pub answer: i32,
    #[serde(default, alias = "answerText")]
    pub answer_label: String,
}

impl AnsweredItem {
    /// Bare item without prompt or label text (filled in at submission time)
    pub fn new(section: SectionKey, question_index: usize, answer: i32) -> Self {
        Self {
            section,
            question_index,
            question_text: String::new(),
            answer,
            answer_label: String::new(),
        }
    }
}

/// A single point on a response scale
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScalePoint {
    pub value: i32,
    pub label: String,
}

/// Degree of childhood emotional invalidation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum InvalidationLevel {
    Low,
    Moderate,
    High,
}

impl std::fmt::Display for InvalidationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidationLevel::Low => write!(f, "Low"),
            InvalidationLevel::Moderate => write!(f, "Moderate"),
            InvalidationLevel::High => write!(f, "High"),
        }
    }
}

/// Dominant attachment style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AttachmentStyle {
    Secure,
    Anxious,
    Avoidant,
}

impl AttachmentStyle {
    /// Tie-break priority: earlier styles win equal averages
    pub const PRIORITY: [AttachmentStyle; 3] = [
        AttachmentStyle::Secure,
        AttachmentStyle::Anxious,
        AttachmentStyle::Avoidant,
    ];

    /// Name of the attachment subscale that measures this style
    pub fn subscale(&self) -> &'static str {
        match self {
            AttachmentStyle::Secure => crate::rubric::SECURE,
            AttachmentStyle::Anxious => crate::rubric::ANXIOUS,
            AttachmentStyle::Avoidant => crate::rubric::AVOIDANT,
        }
    }
}

impl std::fmt::Display for AttachmentStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttachmentStyle::Secure => write!(f, "Secure"),
            AttachmentStyle::Anxious => write!(f, "Anxious"),
            AttachmentStyle::Avoidant => write!(f, "Avoidant"),
        }
    }
}

/// Preferred emotion-regulation strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EmotionRegulationTendency {
    #[serde(rename = "Cognitive Reappraisal")]
    CognitiveReappraisal,
    #[serde(rename = "Expressive Suppression")]
    ExpressiveSuppression,
    Balanced,
}

impl std::fmt::Display for EmotionRegulationTendency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmotionRegulationTendency::CognitiveReappraisal => write!(f, "Cognitive Reappraisal"),
            EmotionRegulationTendency::ExpressiveSuppression => {
                write!(f, "Expressive Suppression")
            }
            EmotionRegulationTendency::Balanced => write!(f, "Balanced"),
        }
    }
}

/// Derived personality profile for one respondent.
///
/// Computed once at submission time and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalityResult {
    /// Invalidation percentage (0-100, one decimal)
    pub invalidation_score: f64,
    pub invalidation_level: InvalidationLevel,
    pub attachment_style: AttachmentStyle,
    /// Winning attachment subscale average (one decimal)
    pub attachment_score: f64,
    pub reappraisal_score: f64,
    pub suppression_score: f64,
    pub emotion_regulation_tendency: EmotionRegulationTendency,
    pub personality_summary: String,
}

/// Demographic record collected with a submission.
///
/// Opaque to the scoring engine; only the submission boundary and
/// the aggregate statistics look inside.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Demographics {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub education: String,
    #[serde(default)]
    pub occupation: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
}

/// A stored submission: demographics, raw answers and the derived result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Respondent {
    pub id: String,
    pub demographics: Demographics,
    pub answers: Vec<AnsweredItem>,
    pub result: PersonalityResult,
    pub created_at: DateTime<Utc>,
}

/// Normalize an email address for uniqueness checks
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
