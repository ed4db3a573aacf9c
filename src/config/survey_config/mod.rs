//! Survey-level configuration support
//!
//! Loads configuration from `mindscope.toml` or `.mindscoperc.json` in the
//! survey root directory.
//!
//! # Configuration Format
//!
//! ```toml
//! # mindscope.toml
//!
//! [scoring]
//! compare_rounded = false  # classify on one-decimal values like legacy reports
//!
//! [submission]
//! require_complete = false
//! min_age = 18
//! max_age = 30
//!
//! [storage]
//! data_dir = ".mindscope"
//!
//! [defaults]
//! format = "text"
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Config file names, in lookup order
pub const CONFIG_FILE_NAMES: &[&str] = &["mindscope.toml", ".mindscoperc.json"];

/// Survey configuration loaded from mindscope.toml or similar
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SurveyConfig {
    /// Scoring behaviour
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Submission boundary policy
    #[serde(default)]
    pub submission: SubmissionConfig,

    /// Where respondent records live
    #[serde(default)]
    pub storage: StorageConfig,

    /// Default CLI flags
    #[serde(default)]
    pub defaults: CliDefaults,
}

/// Scoring configuration
#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq)]
pub struct ScoringConfig {
    /// Classify on one-decimal rounded values instead of exact averages.
    /// Only useful to reproduce results stored by older releases.
    #[serde(default)]
    pub compare_rounded: bool,
}

/// Rules the submission boundary enforces before scoring
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SubmissionConfig {
    /// Reject submissions that skip any question
    #[serde(default)]
    pub require_complete: bool,

    /// Youngest accepted respondent (default: 18)
    #[serde(default = "default_min_age")]
    pub min_age: u32,

    /// Oldest accepted respondent (default: 30)
    #[serde(default = "default_max_age")]
    pub max_age: u32,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            require_complete: false,
            min_age: default_min_age(),
            max_age: default_max_age(),
        }
    }
}

fn default_min_age() -> u32 {
    18
}
fn default_max_age() -> u32 {
    30
}

/// Storage configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct StorageConfig {
    /// Data directory, relative to the survey root unless absolute
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".mindscope")
}

/// Default CLI flags that can be set in config
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CliDefaults {
    /// Default output format (text, json, markdown)
    #[serde(default)]
    pub format: Option<String>,
}

impl SurveyConfig {
    /// Resolved data directory for a survey root
    pub fn data_dir(&self, root: &Path) -> PathBuf {
        if self.storage.data_dir.is_absolute() {
            self.storage.data_dir.clone()
        } else {
            root.join(&self.storage.data_dir)
        }
    }

    /// Output format: explicit flag > config default > "text"
    pub fn output_format(&self, flag: Option<&str>) -> String {
        flag.or(self.defaults.format.as_deref())
            .unwrap_or("text")
            .to_string()
    }
}

/// Load survey configuration from the survey root.
///
/// Searches for configuration files in this order:
/// 1. `mindscope.toml`
/// 2. `.mindscoperc.json`
///
/// Returns default configuration if no usable config file is found.
pub fn load_survey_config(root: &Path) -> SurveyConfig {
    let toml_path = root.join(CONFIG_FILE_NAMES[0]);
    if toml_path.exists() {
        match load_toml_config(&toml_path) {
            Ok(config) => {
                debug!("Loaded survey config from {}", toml_path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {}", toml_path.display(), e);
            }
        }
    }

    let json_path = root.join(CONFIG_FILE_NAMES[1]);
    if json_path.exists() {
        match load_json_config(&json_path) {
            Ok(config) => {
                debug!("Loaded survey config from {}", json_path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {}", json_path.display(), e);
            }
        }
    }

    debug!("No survey config found, using defaults");
    SurveyConfig::default()
}

/// Load configuration from a TOML file
fn load_toml_config(path: &Path) -> anyhow::Result<SurveyConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: SurveyConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Load configuration from a JSON file
fn load_json_config(path: &Path) -> anyhow::Result<SurveyConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: SurveyConfig = serde_json::from_str(&content)?;
    Ok(config)
}

/// Example config written by `mindscope init`
pub const EXAMPLE_CONFIG: &str = r#"# MindScope survey configuration

[scoring]
# Classify on one-decimal rounded averages (reproduces legacy stored results).
# Exact averages are used when false.
compare_rounded = false

[submission]
# Reject submissions that leave any question unanswered
require_complete = false
min_age = 18
max_age = 30

[storage]
# Respondent records, relative to this file's directory
data_dir = ".mindscope"

[defaults]
# Output format: text, json, markdown
format = "text"
"#;

#[cfg(test)]
mod tests;
