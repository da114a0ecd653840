use crate::analysis::AnalysisResult;
use serde::Serialize;
use serde_json::ser::Formatter;
use std::io;

/// Number of Python dependencies listed before the prompt truncates
pub const MAX_LISTED_DEPENDENCIES: usize = 20;

/// Marker appended after the listed dependencies when some were left out
pub const TRUNCATION_MARKER: &str = "...";

pub const PRECOMMIT_SYSTEM_PROMPT: &str = "You are an expert in software development best practices and tooling. \
    Your task is to generate a comprehensive pre-commit hook configuration for a codebase \
    with the following characteristics:";

pub const PRECOMMIT_REQUIREMENTS_PROMPT: &str = "Please generate a .pre-commit-config.yaml file that:
1. Includes appropriate hooks for the detected languages
2. Aligns with existing configurations
3. Complements the CI/CD workflows
4. Follows best practices for each language
5. Includes appropriate hooks for security, formatting, linting, and testing
6. Includes custom hooks for checking documentation freshness if appropriate";

pub const PRECOMMIT_OUTPUT_PROMPT: &str = "Return ONLY the YAML content for the .pre-commit-config.yaml file, \
    without any explanations or markdown formatting.
The output should be valid YAML that can be directly saved to a .pre-commit-config.yaml file.";

/// Build the instruction sent to the model for a given codebase analysis
pub fn build_precommit_prompt(analysis: &AnalysisResult) -> String {
    let existing_configs = encode_configs(&analysis.existing_configs);

    format!(
        "{}\n\n\
         File extensions: {}\n\
         Programming languages: {}\n\
         Python dependencies: {}\n\
         Existing configurations: {}\n\
         CI/CD workflows: {}\n\n\
         {}\n\n\
         {}\n",
        PRECOMMIT_SYSTEM_PROMPT,
        analysis.file_extensions.join(", "),
        analysis.languages.join(", "),
        format_dependencies(&analysis.python_dependencies),
        existing_configs,
        analysis.ci_workflows.join(", "),
        PRECOMMIT_REQUIREMENTS_PROMPT,
        PRECOMMIT_OUTPUT_PROMPT,
    )
}

/// Compact JSON with a space after `,` and `:`
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }
}

fn encode_configs(configs: &serde_json::Map<String, serde_json::Value>) -> String {
    let mut serializer = serde_json::Serializer::with_formatter(Vec::new(), SpacedFormatter);
    match configs.serialize(&mut serializer) {
        Ok(()) => String::from_utf8(serializer.into_inner()).unwrap_or_default(),
        Err(_) => serde_json::Value::Object(configs.clone()).to_string(),
    }
}

fn format_dependencies(dependencies: &[String]) -> String {
    let shown = dependencies
        .iter()
        .take(MAX_LISTED_DEPENDENCIES)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");

    if dependencies.len() > MAX_LISTED_DEPENDENCIES {
        format!("{}{}", shown, TRUNCATION_MARKER)
    } else {
        shown
    }
}
