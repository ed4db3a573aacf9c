//! Rubric-driven personality scorer
//!
//! Turns a respondent's answered items into subscale averages, then into
//! the three classifications and the narrative summary.

use super::summary::personality_summary;
use super::ScoringError;
use crate::config::ScoringConfig;
use crate::models::{
    AnsweredItem, AttachmentStyle, EmotionRegulationTendency, InvalidationLevel,
    PersonalityResult, SectionKey,
};
use crate::rubric::{LevelCutoffs, Rubric, SectionRubric, REAPPRAISAL, REVERSE, SUPPRESSION};
use std::collections::HashSet;
use tracing::debug;

/// Unrounded intermediate values behind a [`PersonalityResult`]
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    /// Invalidation items answered
    pub invalidation_answered: usize,
    /// Invalidation total after reverse scoring
    pub invalidation_raw: i64,
    /// Highest possible total for the answered items
    pub invalidation_max: i64,
    /// Invalidation percentage (0-100)
    pub invalidation_percent: f64,
    pub secure_avg: f64,
    pub anxious_avg: f64,
    pub avoidant_avg: f64,
    pub reappraisal_avg: f64,
    pub suppression_avg: f64,
}

impl ScoreBreakdown {
    /// Subscale average backing an attachment style
    pub fn attachment_average(&self, style: AttachmentStyle) -> f64 {
        match style {
            AttachmentStyle::Secure => self.secure_avg,
            AttachmentStyle::Anxious => self.anxious_avg,
            AttachmentStyle::Avoidant => self.avoidant_avg,
        }
    }
}

/// Round to one decimal place
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Bucket an invalidation percentage; boundary values fall in the lower bucket
pub fn classify_invalidation(percent: f64, cutoffs: &LevelCutoffs) -> InvalidationLevel {
    if percent <= cutoffs.low_max {
        InvalidationLevel::Low
    } else if percent <= cutoffs.moderate_max {
        InvalidationLevel::Moderate
    } else {
        InvalidationLevel::High
    }
}

/// Pick the style with the strictly highest average.
///
/// Styles are visited in [`AttachmentStyle::PRIORITY`] order and a later
/// style only replaces the leader when its average is greater, so ties
/// resolve Secure, then Anxious, then Avoidant.
pub fn dominant_style(average: impl Fn(AttachmentStyle) -> f64) -> AttachmentStyle {
    let [first, rest @ ..] = AttachmentStyle::PRIORITY;
    rest.iter()
        .fold((first, average(first)), |(best, best_avg), &style| {
            let avg = average(style);
            if avg > best_avg {
                (style, avg)
            } else {
                (best, best_avg)
            }
        })
        .0
}

/// Compare reappraisal and suppression averages against a margin
pub fn classify_regulation(
    reappraisal: f64,
    suppression: f64,
    margin: f64,
) -> EmotionRegulationTendency {
    if reappraisal > suppression + margin {
        EmotionRegulationTendency::CognitiveReappraisal
    } else if suppression > reappraisal + margin {
        EmotionRegulationTendency::ExpressiveSuppression
    } else {
        EmotionRegulationTendency::Balanced
    }
}

/// Answers in one section
fn section_items(
    items: &[AnsweredItem],
    key: SectionKey,
) -> impl Iterator<Item = &AnsweredItem> + '_ {
    items.iter().filter(move |item| item.section == key)
}

/// Sum of answers in a subscale divided by the subscale's size.
///
/// Dividing by the set size (not the answered count) means skipped items
/// pull the average down. An empty or missing subscale averages 0.
fn subscale_average(
    section: Option<&SectionRubric>,
    items: &[AnsweredItem],
    key: SectionKey,
    name: &str,
) -> f64 {
    let indices = section.map(|s| s.subscale_indices(name)).unwrap_or(&[]);
    if indices.is_empty() {
        return 0.0;
    }
    let sum: i64 = section_items(items, key)
        .filter(|item| indices.contains(&item.question_index))
        .map(|item| i64::from(item.answer))
        .sum();
    sum as f64 / indices.len() as f64
}

/// Stateless scorer over an injected rubric
pub struct ScoringEngine<'a> {
    rubric: &'a Rubric,
    config: &'a ScoringConfig,
}

impl<'a> ScoringEngine<'a> {
    pub fn new(rubric: &'a Rubric, config: &'a ScoringConfig) -> Self {
        Self { rubric, config }
    }

    pub fn rubric(&self) -> &'a Rubric {
        self.rubric
    }

    /// Score answered items. Never fails: missing answers degrade to
    /// partial or zero scores.
    pub fn compute_result(&self, items: &[AnsweredItem]) -> PersonalityResult {
        let breakdown = self.breakdown(items);
        self.classify(&breakdown)
    }

    /// Validate, then score
    pub fn score(&self, items: &[AnsweredItem]) -> Result<PersonalityResult, ScoringError> {
        self.validate(items)?;
        Ok(self.compute_result(items))
    }

    /// Compute every subscale average without rounding
    pub fn breakdown(&self, items: &[AnsweredItem]) -> ScoreBreakdown {
        let invalidation = self.rubric.section(SectionKey::Invalidation);
        let (invalidation_answered, invalidation_raw, invalidation_max) = match invalidation {
            Some(section) => {
                let reverse = section.subscale_indices(REVERSE);
                let (min, max) = section.scale_range();
                // i64 keeps unvalidated answers from overflowing
                let (count, raw) = section_items(items, SectionKey::Invalidation).fold(
                    (0usize, 0i64),
                    |(count, raw), item| {
                        let answer = i64::from(item.answer);
                        let value = if reverse.contains(&item.question_index) {
                            i64::from(min) + i64::from(max) - answer
                        } else {
                            answer
                        };
                        (count + 1, raw + value)
                    },
                );
                (count, raw, i64::from(max) * count as i64)
            }
            None => (0, 0, 0),
        };
        let invalidation_percent = if invalidation_max > 0 {
            100.0 * invalidation_raw as f64 / invalidation_max as f64
        } else {
            0.0
        };

        let attachment = self.rubric.section(SectionKey::Attachment);
        let [secure_avg, anxious_avg, avoidant_avg] = AttachmentStyle::PRIORITY.map(|style| {
            subscale_average(attachment, items, SectionKey::Attachment, style.subscale())
        });

        let emotion = self.rubric.section(SectionKey::Emotion);
        let reappraisal_avg = subscale_average(emotion, items, SectionKey::Emotion, REAPPRAISAL);
        let suppression_avg = subscale_average(emotion, items, SectionKey::Emotion, SUPPRESSION);

        debug!(
            "Subscales: invalidation={:.2}% ({} items), secure={:.2}, anxious={:.2}, avoidant={:.2}, reappraisal={:.2}, suppression={:.2}",
            invalidation_percent,
            invalidation_answered,
            secure_avg,
            anxious_avg,
            avoidant_avg,
            reappraisal_avg,
            suppression_avg
        );

        ScoreBreakdown {
            invalidation_answered,
            invalidation_raw,
            invalidation_max,
            invalidation_percent,
            secure_avg,
            anxious_avg,
            avoidant_avg,
            reappraisal_avg,
            suppression_avg,
        }
    }

    /// Turn a breakdown into the final result record
    pub fn classify(&self, breakdown: &ScoreBreakdown) -> PersonalityResult {
        let compared = |value: f64| {
            if self.config.compare_rounded {
                round1(value)
            } else {
                value
            }
        };

        let invalidation_level = classify_invalidation(
            compared(breakdown.invalidation_percent),
            &self.rubric.invalidation_cutoffs,
        );
        let attachment_style =
            dominant_style(|style| compared(breakdown.attachment_average(style)));
        let tendency = classify_regulation(
            compared(breakdown.reappraisal_avg),
            compared(breakdown.suppression_avg),
            self.rubric.regulation_margin,
        );

        debug!(
            "Classified: invalidation={}, attachment={}, regulation={}",
            invalidation_level, attachment_style, tendency
        );

        PersonalityResult {
            invalidation_score: round1(breakdown.invalidation_percent),
            invalidation_level,
            attachment_style,
            attachment_score: round1(breakdown.attachment_average(attachment_style)),
            reappraisal_score: round1(breakdown.reappraisal_avg),
            suppression_score: round1(breakdown.suppression_avg),
            emotion_regulation_tendency: tendency,
            personality_summary: personality_summary(invalidation_level, attachment_style, tendency),
        }
    }

    /// Fail fast on answers the rubric can't score
    pub fn validate(&self, items: &[AnsweredItem]) -> Result<(), ScoringError> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in items {
            let section = self
                .rubric
                .section(item.section)
                .ok_or(ScoringError::UnknownSection(item.section))?;

            let count = section.question_count();
            if item.question_index >= count {
                return Err(ScoringError::QuestionOutOfRange {
                    section: item.section,
                    index: item.question_index,
                    count,
                });
            }

            let (min, max) = section.scale_range();
            if item.answer < min || item.answer > max {
                return Err(ScoringError::AnswerOutOfRange {
                    section: item.section,
                    index: item.question_index,
                    answer: item.answer,
                    min,
                    max,
                });
            }

            if !seen.insert((item.section, item.question_index)) {
                return Err(ScoringError::DuplicateAnswer {
                    section: item.section,
                    index: item.question_index,
                });
            }
        }
        Ok(())
    }

    /// Sections with unanswered questions, as (section, answered, expected)
    pub fn missing_answers(&self, items: &[AnsweredItem]) -> Vec<(SectionKey, usize, usize)> {
        self.rubric
            .sections
            .iter()
            .filter_map(|section| {
                let answered: HashSet<usize> = section_items(items, section.key)
                    .map(|item| item.question_index)
                    .filter(|&index| index < section.question_count())
                    .collect();
                let expected = section.question_count();
                (answered.len() < expected).then_some((section.key, answered.len(), expected))
            })
            .collect()
    }

    /// Human-readable explanation of a breakdown
    pub fn explain(&self, breakdown: &ScoreBreakdown) -> String {
        let result = self.classify(breakdown);
        let cutoffs = &self.rubric.invalidation_cutoffs;
        let mut lines = Vec::new();

        lines.push("# Score Breakdown\n".to_string());

        lines.push(format!("## Invalidation: {}\n", result.invalidation_level));
        lines.push(format!(
            "- Raw total: {} of {} ({} items answered, reverse items flipped)",
            breakdown.invalidation_raw, breakdown.invalidation_max, breakdown.invalidation_answered
        ));
        lines.push(format!(
            "- Percent: {:.4} (reported as {:.1})",
            breakdown.invalidation_percent, result.invalidation_score
        ));
        lines.push(format!(
            "- Buckets: Low <= {}, Moderate <= {}, High above\n",
            cutoffs.low_max, cutoffs.moderate_max
        ));

        lines.push(format!("## Attachment: {}\n", result.attachment_style));
        for style in AttachmentStyle::PRIORITY {
            let marker = if style == result.attachment_style { " <-" } else { "" };
            lines.push(format!(
                "- {}: {:.4}{}",
                style,
                breakdown.attachment_average(style),
                marker
            ));
        }
        lines.push("- Ties resolve Secure, Anxious, Avoidant\n".to_string());

        lines.push(format!(
            "## Emotion regulation: {}\n",
            result.emotion_regulation_tendency
        ));
        lines.push(format!("- Reappraisal: {:.4}", breakdown.reappraisal_avg));
        lines.push(format!("- Suppression: {:.4}", breakdown.suppression_avg));
        lines.push(format!(
            "- Margin: {} ({} values compared)",
            self.rubric.regulation_margin,
            if self.config.compare_rounded { "rounded" } else { "exact" }
        ));

        lines.join("\n")
    }
}

/// Score with a rubric and default scoring config
pub fn compute_result(rubric: &Rubric, items: &[AnsweredItem]) -> PersonalityResult {
    let config = ScoringConfig::default();
    ScoringEngine::new(rubric, &config).compute_result(items)
}
