use super::*;

#[test]
fn test_default_config() {
    let config = SurveyConfig::default();

    assert!(!config.scoring.compare_rounded);
    assert!(!config.submission.require_complete);
    assert_eq!(config.submission.min_age, 18);
    assert_eq!(config.submission.max_age, 30);
    assert_eq!(config.storage.data_dir, PathBuf::from(".mindscope"));
    assert!(config.defaults.format.is_none());
}

#[test]
fn test_parse_toml_config() {
    let toml_str = r#"
[scoring]
compare_rounded = true

[submission]
require_complete = true
max_age = 40

[storage]
data_dir = "/var/lib/mindscope"

[defaults]
format = "json"
"#;

    let config: SurveyConfig = toml::from_str(toml_str).unwrap();
    assert!(config.scoring.compare_rounded);
    assert!(config.submission.require_complete);
    // Unset fields keep their defaults
    assert_eq!(config.submission.min_age, 18);
    assert_eq!(config.submission.max_age, 40);
    assert_eq!(config.defaults.format.as_deref(), Some("json"));
}

#[test]
fn test_example_config_parses() {
    let config: SurveyConfig = toml::from_str(EXAMPLE_CONFIG).unwrap();
    assert_eq!(config.scoring, ScoringConfig::default());
    assert_eq!(config.submission, SubmissionConfig::default());
    assert_eq!(config.defaults.format.as_deref(), Some("text"));
}

#[test]
fn test_data_dir_resolution() {
    let root = Path::new("/srv/survey");

    let config = SurveyConfig::default();
    assert_eq!(config.data_dir(root), PathBuf::from("/srv/survey/.mindscope"));

    let mut absolute = SurveyConfig::default();
    absolute.storage.data_dir = PathBuf::from("/data");
    assert_eq!(absolute.data_dir(root), PathBuf::from("/data"));
}

#[test]
fn test_output_format_precedence() {
    let mut config = SurveyConfig::default();
    assert_eq!(config.output_format(None), "text");

    config.defaults.format = Some("markdown".into());
    assert_eq!(config.output_format(None), "markdown");
    assert_eq!(config.output_format(Some("json")), "json");
}

#[test]
fn test_load_toml_from_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("mindscope.toml"),
        "[scoring]\ncompare_rounded = true\n",
    )
    .unwrap();

    let config = load_survey_config(dir.path());
    assert!(config.scoring.compare_rounded);
}

#[test]
fn test_load_json_fallback() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(".mindscoperc.json"),
        r#"{"submission": {"require_complete": true}}"#,
    )
    .unwrap();

    let config = load_survey_config(dir.path());
    assert!(config.submission.require_complete);
}

#[test]
fn test_malformed_config_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("mindscope.toml"), "[scoring\ncompare_rounded = ").unwrap();

    let config = load_survey_config(dir.path());
    assert!(!config.scoring.compare_rounded);
}

#[test]
fn test_missing_config_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = load_survey_config(dir.path());
    assert_eq!(config.submission, SubmissionConfig::default());
}
