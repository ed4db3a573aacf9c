//! Configuration module for MindScope
//!
//! This module handles:
//! - Survey-level configuration (mindscope.toml)
//! - Scoring comparison mode
//! - Submission policy (completeness, age bounds)
//! - Storage location and CLI defaults

mod survey_config;

pub use survey_config::{
    CliDefaults,
    ScoringConfig,
    StorageConfig,
    SubmissionConfig,
    SurveyConfig,
    CONFIG_FILE_NAMES,
    EXAMPLE_CONFIG,
    load_survey_config,
};
