//! Personality Scoring Engine
//!
//! Converts a respondent's Likert answers into three indicators plus a
//! narrative summary. Scoring is a pure function of the answers and the
//! injected [`Rubric`](crate::rubric::Rubric); no state survives a call.
//!
//! # Scoring Rules
//!
//! ```text
//! Invalidation % = 100 × Σ item / (scale_max × answered)
//!   where reverse items contribute (scale_min + scale_max − answer)
//!   Low ≤ 33 < Moderate ≤ 66 < High
//!
//! Subscale average = Σ answers in subscale / |subscale|
//!   Attachment: highest of secure / anxious / avoidant
//!               (ties: Secure, then Anxious, then Avoidant)
//!   Regulation: reappraisal > suppression + 0.5 → Cognitive Reappraisal
//!               suppression > reappraisal + 0.5 → Expressive Suppression
//!               otherwise                         → Balanced
//! ```
//!
//! Reported scores are rounded to one decimal; classification compares
//! the exact values unless `scoring.compare_rounded` is set.

mod engine;
mod summary;

pub use engine::{
    classify_invalidation, classify_regulation, compute_result, dominant_style, round1,
    ScoreBreakdown, ScoringEngine,
};
pub use summary::personality_summary;

use crate::models::SectionKey;
use thiserror::Error;

/// Answers the rubric cannot score
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScoringError {
    #[error("section '{0}' is not defined by the rubric")]
    UnknownSection(SectionKey),

    #[error("question {index} does not exist in section '{section}' ({count} questions)")]
    QuestionOutOfRange {
        section: SectionKey,
        index: usize,
        count: usize,
    },

    #[error("answer {answer} to {section} question {index} is outside the scale {min}-{max}")]
    AnswerOutOfRange {
        section: SectionKey,
        index: usize,
        answer: i32,
        min: i32,
        max: i32,
    },

    #[error("{section} question {index} was answered more than once")]
    DuplicateAnswer { section: SectionKey, index: usize },
}
