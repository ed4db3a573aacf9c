//! Questions command - print the survey definition

use super::Workspace;
use crate::models::SectionKey;
use crate::reporters::OutputFormat;
use crate::rubric::{demographic_fields, Rubric, SectionRubric};
use anyhow::{Context, Result};
use console::style;
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct SurveyDefinition<'a> {
    demographics: Vec<crate::rubric::DemographicField>,
    sections: Vec<&'a SectionRubric>,
}

fn parse_section(name: &str) -> Result<SectionKey> {
    SectionKey::ALL
        .into_iter()
        .find(|key| key.as_str() == name)
        .with_context(|| format!("Unknown section '{}'", name))
}

pub fn run(root: &Path, format: Option<&str>, section: Option<&str>) -> Result<()> {
    let workspace = Workspace::load(root)?;
    let format = workspace.format(format)?;
    let rubric = Rubric::standard();

    let selected: Vec<&SectionRubric> = match section {
        Some(name) => {
            let key = parse_section(name)?;
            vec![rubric
                .section(key)
                .with_context(|| format!("Section '{}' is not defined", key))?]
        }
        None => rubric.sections.iter().collect(),
    };
    let submission = &workspace.config.submission;

    match format {
        OutputFormat::Json => {
            let definition = SurveyDefinition {
                demographics: if section.is_none() {
                    demographic_fields(submission.min_age, submission.max_age)
                } else {
                    Vec::new()
                },
                sections: selected,
            };
            println!("{}", serde_json::to_string_pretty(&definition)?);
        }
        OutputFormat::Markdown => {
            for s in selected {
                println!("## {}\n\n{}\n", s.title, s.description);
                let scale: Vec<String> = s
                    .scale
                    .iter()
                    .map(|p| format!("{} = {}", p.value, p.label))
                    .collect();
                println!("*Scale: {}*\n", scale.join(", "));
                for (i, q) in s.questions.iter().enumerate() {
                    println!("{}. {}", i + 1, q);
                }
                println!();
            }
        }
        OutputFormat::Text => {
            if section.is_none() {
                println!("\n{}", style("ABOUT YOU").bold());
                for field in demographic_fields(submission.min_age, submission.max_age) {
                    let mut line = format!("  {} ({})", field.label, field.kind);
                    if !field.options.is_empty() {
                        line.push_str(&format!(": {}", field.options.join(" / ")));
                    }
                    if let (Some(min), Some(max)) = (field.min, field.max) {
                        line.push_str(&format!(": {}-{}", min, max));
                    }
                    println!("{}", line);
                }
            }
            for s in selected {
                println!(
                    "\n{} {}",
                    style(s.title.to_uppercase()).bold(),
                    style(format!("[{}]", s.key)).dim()
                );
                println!("  {}", style(&s.description).dim());
                let scale: Vec<String> = s
                    .scale
                    .iter()
                    .map(|p| format!("{} {}", p.value, p.label))
                    .collect();
                println!("  Scale: {}\n", style(scale.join(" · ")).cyan());
                for (i, q) in s.questions.iter().enumerate() {
                    println!("  {:>2}. {}", i + 1, q);
                }
            }
            println!();
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_section() {
        assert_eq!(parse_section("emotion").unwrap(), SectionKey::Emotion);
        assert!(parse_section("mood").is_err());
    }

    #[test]
    fn test_definition_serializes_sections() {
        let rubric = Rubric::standard();
        let definition = SurveyDefinition {
            demographics: demographic_fields(18, 30),
            sections: rubric.sections.iter().collect(),
        };
        let value = serde_json::to_value(&definition).unwrap();
        assert_eq!(value["sections"].as_array().unwrap().len(), 3);
        assert_eq!(value["sections"][0]["key"], "invalidation");
        assert_eq!(value["sections"][2]["scale"].as_array().unwrap().len(), 7);
        let age = value["demographics"]
            .as_array()
            .unwrap()
            .iter()
            .find(|f| f["name"] == "age")
            .unwrap();
        assert_eq!(age["max"], 30);
    }
}
