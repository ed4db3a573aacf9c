//! CLI command definitions and handlers

mod audit;
mod init;
mod questions;
mod responses;
mod score;
mod stats;
mod submit;

use crate::config::{load_survey_config, SurveyConfig};
use crate::reporters::OutputFormat;
use crate::store::JsonFileStore;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// MindScope - psychology survey scoring
///
/// Scores the childhood invalidation, attachment style and emotion
/// regulation survey, stores respondents locally and reports on them.
#[derive(Parser, Debug)]
#[command(name = "mindscope")]
#[command(
    version,
    about = "Score and manage psychology survey responses: childhood invalidation, attachment style and emotion regulation",
    after_help = "\
Examples:
  mindscope init                              Write an example mindscope.toml
  mindscope questions --format json           Print the survey definition
  mindscope score answers.json --explain      Score answers without storing them
  mindscope submit submission.json            Validate, score and store a respondent
  mindscope responses                         List stored respondents
  mindscope stats --format markdown           Aggregate statistics as Markdown"
)]
pub struct Cli {
    /// Survey workspace (holds mindscope.toml and the data directory)
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a mindscope.toml config file with example settings
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Print the survey: sections, questions, scales and demographic fields
    #[command(after_help = "\
Examples:
  mindscope questions                        Readable questionnaire
  mindscope questions --section attachment   One section only
  mindscope questions --format json          Machine-readable definition")]
    Questions {
        /// Output format: text, json, markdown (or md)
        #[arg(long, short = 'f', value_parser = ["text", "json", "markdown", "md"])]
        format: Option<String>,

        /// Only show one section (invalidation, attachment, emotion)
        #[arg(long, value_parser = ["invalidation", "attachment", "emotion"])]
        section: Option<String>,
    },

    /// Score answers without storing anything
    #[command(after_help = "\
Input is either a JSON array of answers or a submission object with an
\"answers\" field. Each answer: {\"section\": \"emotion\", \"questionIndex\": 0, \"answer\": 6}

Examples:
  mindscope score answers.json                 Profile as text
  mindscope score answers.json --format json   Result record as JSON
  mindscope score answers.json --explain       Show the unrounded breakdown")]
    Score {
        /// Answers file (JSON)
        file: PathBuf,

        /// Output format: text, json, markdown (or md)
        #[arg(long, short = 'f', value_parser = ["text", "json", "markdown", "md"])]
        format: Option<String>,

        /// Show the full scoring breakdown
        #[arg(long)]
        explain: bool,
    },

    /// Validate, score and store a submission
    #[command(after_help = "\
Input: {\"demographics\": {\"fullName\": ..., \"email\": ..., \"age\": 22, ...}, \"answers\": [...]}
Each email may submit once.")]
    Submit {
        /// Submission file (JSON)
        file: PathBuf,

        /// Output format: text, json, markdown (or md)
        #[arg(long, short = 'f', value_parser = ["text", "json", "markdown", "md"])]
        format: Option<String>,
    },

    /// List stored respondents, newest first
    Responses {
        /// Output format: text, json, markdown (or md)
        #[arg(long, short = 'f', value_parser = ["text", "json", "markdown", "md"])]
        format: Option<String>,
    },

    /// Show one respondent with answers and result
    Show {
        /// Respondent id
        id: String,

        /// Output format: text, json, markdown (or md)
        #[arg(long, short = 'f', value_parser = ["text", "json", "markdown", "md"])]
        format: Option<String>,
    },

    /// Delete a respondent together with their answers and result
    Delete {
        /// Respondent id
        id: String,
    },

    /// Check whether an email has already submitted
    CheckEmail {
        email: String,

        /// Print {"exists": bool} instead of text
        #[arg(long)]
        json: bool,
    },

    /// Aggregate statistics over stored respondents
    Stats {
        /// Output format: text, json, markdown (or md)
        #[arg(long, short = 'f', value_parser = ["text", "json", "markdown", "md"])]
        format: Option<String>,
    },

    /// Re-score stored respondents and report results that no longer match
    #[command(after_help = "\
Examples:
  mindscope audit                   Report drift
  mindscope audit --fail-on-drift   Exit code 1 if any stored result differs (CI mode)")]
    Audit {
        /// Exit with an error when any respondent drifted
        #[arg(long)]
        fail_on_drift: bool,
    },
}

/// Loaded survey workspace shared by the command handlers
pub(crate) struct Workspace {
    pub root: PathBuf,
    pub config: SurveyConfig,
}

impl Workspace {
    pub fn load(root: &Path) -> Result<Self> {
        if !root.is_dir() {
            anyhow::bail!("Survey root is not a directory: {}", root.display());
        }
        Ok(Self {
            root: root.to_path_buf(),
            config: load_survey_config(root),
        })
    }

    pub fn data_dir(&self) -> PathBuf {
        self.config.data_dir(&self.root)
    }

    pub fn open_store(&self) -> Result<JsonFileStore> {
        let data_dir = self.data_dir();
        JsonFileStore::open(&data_dir)
            .with_context(|| format!("Failed to open response store in {}", data_dir.display()))
    }

    /// Resolve the output format: flag, then config, then text
    pub fn format(&self, flag: Option<&str>) -> Result<OutputFormat> {
        OutputFormat::from_str(&self.config.output_format(flag))
    }
}

/// Read and parse a JSON input file
pub(crate) fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {}", path.display()))
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Init { force } => init::run(&cli.root, force),

        Commands::Questions { format, section } => {
            questions::run(&cli.root, format.as_deref(), section.as_deref())
        }

        Commands::Score {
            file,
            format,
            explain,
        } => score::run(&cli.root, &file, format.as_deref(), explain),

        Commands::Submit { file, format } => submit::run(&cli.root, &file, format.as_deref()),

        Commands::Responses { format } => responses::list(&cli.root, format.as_deref()),

        Commands::Show { id, format } => responses::show(&cli.root, &id, format.as_deref()),

        Commands::Delete { id } => responses::delete(&cli.root, &id),

        Commands::CheckEmail { email, json } => responses::check_email(&cli.root, &email, json),

        Commands::Stats { format } => stats::run(&cli.root, format.as_deref()),

        Commands::Audit { fail_on_drift } => audit::run(&cli.root, fail_on_drift),
    }
}
