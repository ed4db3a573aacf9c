//! Submission boundary
//!
//! Everything the scoring engine deliberately does not do happens here:
//! demographic checks, the one-respondent-per-email rule, the optional
//! completeness gate, filling answer text from the rubric, and handing the
//! scored respondent to a [`ResponseStore`].

use crate::config::SubmissionConfig;
use crate::models::{normalize_email, AnsweredItem, Demographics, Respondent, SectionKey};
use crate::scoring::{ScoringEngine, ScoringError};
use crate::store::{ResponseStore, StoreError};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

/// A raw submission as produced by the survey form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    #[serde(default)]
    pub demographics: Demographics,
    #[serde(default)]
    pub answers: Vec<AnsweredItem>,
}

#[derive(Error, Debug)]
pub enum SubmissionError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("age {age} is outside the accepted range {min}-{max}")]
    AgeOutOfRange { age: u32, min: u32, max: u32 },

    #[error("a response has already been submitted with email '{0}'")]
    DuplicateEmail(String),

    #[error("no answers were provided")]
    NoAnswers,

    #[error("invalid answers: {0}")]
    Invalid(#[from] ScoringError),

    #[error("section '{section}' is incomplete: {answered} of {expected} questions answered")]
    Incomplete {
        section: SectionKey,
        answered: usize,
        expected: usize,
    },

    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for SubmissionError {
    fn from(err: StoreError) -> Self {
        // The store re-checks uniqueness; surface it as the same user-facing error
        match err {
            StoreError::DuplicateEmail(email) => SubmissionError::DuplicateEmail(email),
            other => SubmissionError::Store(other),
        }
    }
}

/// Validates, scores and stores submissions
pub struct SubmissionService<'a, S: ResponseStore + ?Sized> {
    engine: ScoringEngine<'a>,
    config: &'a SubmissionConfig,
    store: &'a mut S,
}

impl<'a, S: ResponseStore + ?Sized> SubmissionService<'a, S> {
    pub fn new(engine: ScoringEngine<'a>, config: &'a SubmissionConfig, store: &'a mut S) -> Self {
        Self {
            engine,
            config,
            store,
        }
    }

    /// Whether a respondent already exists for this email
    pub fn email_exists(&self, email: &str) -> Result<bool, SubmissionError> {
        Ok(self.store.find_by_email(email)?.is_some())
    }

    /// Accept a submission and return the stored respondent
    pub fn submit(&mut self, submission: Submission) -> Result<Respondent, SubmissionError> {
        let Submission {
            mut demographics,
            answers,
        } = submission;

        self.check_demographics(&demographics)?;
        demographics.email = normalize_email(&demographics.email);
        demographics.full_name = demographics.full_name.trim().to_string();

        if self.email_exists(&demographics.email)? {
            return Err(SubmissionError::DuplicateEmail(demographics.email));
        }

        if answers.is_empty() {
            return Err(SubmissionError::NoAnswers);
        }
        self.engine.validate(&answers)?;

        if self.config.require_complete {
            if let Some((section, answered, expected)) =
                self.engine.missing_answers(&answers).into_iter().next()
            {
                return Err(SubmissionError::Incomplete {
                    section,
                    answered,
                    expected,
                });
            }
        }

        let answers = self.normalize_answers(answers);
        let result = self.engine.compute_result(&answers);

        let respondent = Respondent {
            id: Uuid::new_v4().to_string(),
            demographics,
            answers,
            result,
            created_at: Utc::now(),
        };
        self.store.insert(respondent.clone())?;

        info!(
            "Accepted submission {} into {} store ({} answers): {} invalidation, {} attachment, {}",
            respondent.id,
            self.store.name(),
            respondent.answers.len(),
            respondent.result.invalidation_level,
            respondent.result.attachment_style,
            respondent.result.emotion_regulation_tendency
        );
        Ok(respondent)
    }

    fn check_demographics(&self, demographics: &Demographics) -> Result<(), SubmissionError> {
        if demographics.full_name.trim().is_empty() {
            return Err(SubmissionError::MissingField("fullName"));
        }
        if demographics.email.trim().is_empty() {
            return Err(SubmissionError::MissingField("email"));
        }
        let age = demographics.age.ok_or(SubmissionError::MissingField("age"))?;
        if age < self.config.min_age || age > self.config.max_age {
            return Err(SubmissionError::AgeOutOfRange {
                age,
                min: self.config.min_age,
                max: self.config.max_age,
            });
        }
        Ok(())
    }

    /// Fill prompt and label text from the rubric, then order by section and index.
    /// Client-supplied labels are kept when the rubric has none for the value.
    fn normalize_answers(&self, mut answers: Vec<AnsweredItem>) -> Vec<AnsweredItem> {
        let rubric = self.engine.rubric();
        for item in &mut answers {
            let Some(section) = rubric.section(item.section) else {
                continue;
            };
            if let Some(text) = section.questions.get(item.question_index) {
                item.question_text = text.clone();
            }
            if let Some(label) = section.label_for(item.answer) {
                item.answer_label = label.to_string();
            } else if item.answer_label.is_empty() {
                item.answer_label = item.answer.to_string();
            }
        }
        answers.sort_by_key(|item| (item.section, item.question_index));
        debug!("Normalized {} answers", answers.len());
        answers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScoringConfig;
    use crate::models::{AttachmentStyle, InvalidationLevel};
    use crate::rubric::Rubric;
    use crate::store::MemoryStore;

    fn demographics(email: &str) -> Demographics {
        Demographics {
            full_name: "Ada Lovelace".into(),
            email: email.into(),
            age: Some(24),
            gender: "Female".into(),
            education: "Bachelor's".into(),
            occupation: "Student".into(),
            city: "Pune".into(),
            state: "Maharashtra".into(),
        }
    }

    fn full_answers() -> Vec<AnsweredItem> {
        let mut answers = Vec::new();
        for (i, v) in [5, 1, 5, 1, 5, 1, 5, 1, 5, 1, 5, 1].iter().enumerate() {
            answers.push(AnsweredItem::new(SectionKey::Invalidation, i, *v));
        }
        for (i, v) in [5, 1, 5, 1, 1, 5, 5, 1, 1, 1].iter().enumerate() {
            answers.push(AnsweredItem::new(SectionKey::Attachment, i, *v));
        }
        for i in 0..10 {
            answers.push(AnsweredItem::new(SectionKey::Emotion, i, 4));
        }
        // Submitted out of order on purpose
        answers.reverse();
        answers
    }

    fn submission(email: &str, answers: Vec<AnsweredItem>) -> Submission {
        Submission {
            demographics: demographics(email),
            answers,
        }
    }

    struct Fixture {
        rubric: Rubric,
        scoring: ScoringConfig,
        submission: SubmissionConfig,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                rubric: Rubric::standard(),
                scoring: ScoringConfig::default(),
                submission: SubmissionConfig::default(),
            }
        }

        fn service<'a>(&'a self, store: &'a mut MemoryStore) -> SubmissionService<'a, MemoryStore> {
            SubmissionService::new(
                ScoringEngine::new(&self.rubric, &self.scoring),
                &self.submission,
                store,
            )
        }
    }

    #[test]
    fn test_submit_scores_and_stores() {
        let fx = Fixture::new();
        let mut store = MemoryStore::new();
        let respondent = fx
            .service(&mut store)
            .submit(submission(" Ada@Example.com ", full_answers()))
            .unwrap();

        assert_eq!(respondent.demographics.email, "ada@example.com");
        assert_eq!(respondent.result.invalidation_score, 20.0);
        assert_eq!(respondent.result.invalidation_level, InvalidationLevel::Low);
        assert_eq!(respondent.result.attachment_style, AttachmentStyle::Secure);
        assert_eq!(respondent.result.attachment_score, 5.0);
        assert!(Uuid::parse_str(&respondent.id).is_ok());

        // Answers sorted and labelled from the rubric
        let first = &respondent.answers[0];
        assert_eq!(first.section, SectionKey::Invalidation);
        assert_eq!(first.question_index, 0);
        assert_eq!(first.answer_label, "Always");
        assert!(!first.question_text.is_empty());
        let last = respondent.answers.last().unwrap();
        assert_eq!(last.section, SectionKey::Emotion);
        assert_eq!(last.answer_label, "Neutral");

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&respondent.id).unwrap().unwrap(), respondent);
    }

    #[test]
    fn test_duplicate_email_is_rejected_before_scoring() {
        let fx = Fixture::new();
        let mut store = MemoryStore::new();
        fx.service(&mut store)
            .submit(submission("ada@example.com", full_answers()))
            .unwrap();

        // Invalid answers would fail validation; the duplicate check must win
        let bad = vec![AnsweredItem::new(SectionKey::Attachment, 0, 99)];
        let err = fx
            .service(&mut store)
            .submit(submission("ADA@example.com", bad))
            .unwrap_err();
        assert!(matches!(err, SubmissionError::DuplicateEmail(ref e) if e == "ada@example.com"));
        assert!(err.to_string().contains("already been submitted"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_missing_demographics() {
        let fx = Fixture::new();
        let mut store = MemoryStore::new();
        let mut service = fx.service(&mut store);

        let mut sub = submission("a@example.com", full_answers());
        sub.demographics.full_name = "   ".into();
        assert!(matches!(
            service.submit(sub).unwrap_err(),
            SubmissionError::MissingField("fullName")
        ));

        let mut sub = submission("", full_answers());
        sub.demographics.email.clear();
        assert!(matches!(
            service.submit(sub).unwrap_err(),
            SubmissionError::MissingField("email")
        ));

        let mut sub = submission("a@example.com", full_answers());
        sub.demographics.age = None;
        assert!(matches!(
            service.submit(sub).unwrap_err(),
            SubmissionError::MissingField("age")
        ));
    }

    #[test]
    fn test_age_bounds_are_inclusive() {
        let fx = Fixture::new();
        let mut store = MemoryStore::new();
        let mut service = fx.service(&mut store);

        for (email, age, ok) in [
            ("a@e.com", 17, false),
            ("b@e.com", 18, true),
            ("c@e.com", 30, true),
            ("d@e.com", 31, false),
        ] {
            let mut sub = submission(email, full_answers());
            sub.demographics.age = Some(age);
            let outcome = service.submit(sub);
            assert_eq!(outcome.is_ok(), ok, "age {age}");
            if !ok {
                assert!(matches!(
                    outcome.unwrap_err(),
                    SubmissionError::AgeOutOfRange { min: 18, max: 30, .. }
                ));
            }
        }
    }

    #[test]
    fn test_empty_answers_rejected() {
        let fx = Fixture::new();
        let mut store = MemoryStore::new();
        let err = fx
            .service(&mut store)
            .submit(submission("a@e.com", Vec::new()))
            .unwrap_err();
        assert!(matches!(err, SubmissionError::NoAnswers));
    }

    #[test]
    fn test_invalid_answers_are_not_stored() {
        let fx = Fixture::new();
        let mut store = MemoryStore::new();
        let bad = vec![AnsweredItem::new(SectionKey::Emotion, 0, 8)];
        let err = fx
            .service(&mut store)
            .submit(submission("a@e.com", bad))
            .unwrap_err();
        assert!(matches!(
            err,
            SubmissionError::Invalid(ScoringError::AnswerOutOfRange { answer: 8, max: 7, .. })
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_partial_answers_accepted_by_default() {
        let fx = Fixture::new();
        let mut store = MemoryStore::new();
        let partial = vec![AnsweredItem::new(SectionKey::Attachment, 1, 5)];
        let respondent = fx
            .service(&mut store)
            .submit(submission("a@e.com", partial))
            .unwrap();
        assert_eq!(respondent.result.attachment_style, AttachmentStyle::Anxious);
        assert_eq!(respondent.result.invalidation_score, 0.0);
    }

    #[test]
    fn test_require_complete_gate() {
        let mut fx = Fixture::new();
        fx.submission.require_complete = true;
        let mut store = MemoryStore::new();

        let mut answers = full_answers();
        answers.retain(|item| !(item.section == SectionKey::Attachment && item.question_index == 9));
        let err = fx
            .service(&mut store)
            .submit(submission("a@e.com", answers))
            .unwrap_err();
        assert!(matches!(
            err,
            SubmissionError::Incomplete {
                section: SectionKey::Attachment,
                answered: 9,
                expected: 10
            }
        ));

        fx.service(&mut store)
            .submit(submission("a@e.com", full_answers()))
            .unwrap();
    }

    #[test]
    fn test_email_exists() {
        let fx = Fixture::new();
        let mut store = MemoryStore::new();
        let mut service = fx.service(&mut store);
        assert!(!service.email_exists("ada@example.com").unwrap());
        service
            .submit(submission("ada@example.com", full_answers()))
            .unwrap();
        assert!(service.email_exists(" ADA@example.com").unwrap());
    }

    #[test]
    fn test_store_duplicate_maps_to_duplicate_email() {
        let err: SubmissionError = StoreError::DuplicateEmail("x@e.com".into()).into();
        assert!(matches!(err, SubmissionError::DuplicateEmail(_)));
        let err: SubmissionError = StoreError::DuplicateId("1".into()).into();
        assert!(matches!(err, SubmissionError::Store(_)));
    }

    #[test]
    fn test_submission_parses_form_json() {
        let json = r#"{
            "demographics": {"fullName": "Bo", "email": "bo@e.com", "age": 21, "state": "Goa"},
            "answers": [{"section": "emotion", "questionIndex": 2, "answer": 6, "answerText": "Agree"}]
        }"#;
        let sub: Submission = serde_json::from_str(json).unwrap();
        assert_eq!(sub.demographics.age, Some(21));
        assert_eq!(sub.answers[0].answer_label, "Agree");
    }
}
