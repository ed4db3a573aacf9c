//! MindScope - psychology survey scoring
//!
//! Scores a three-part Likert survey (childhood emotional invalidation,
//! adult attachment, emotion regulation) into a personality profile, and
//! manages the respondents who submitted it.
//!
//! The pieces, bottom up:
//! - [`rubric`] fixed question tables and subscale index sets
//! - [`scoring`] the pure scoring engine
//! - [`submission`] validation and the one-response-per-email rule
//! - [`store`] respondent persistence
//! - [`stats`] and [`reporters`] for output

pub mod cli;
pub mod config;
pub mod models;
pub mod reporters;
pub mod rubric;
pub mod scoring;
pub mod stats;
pub mod store;
pub mod submission;
