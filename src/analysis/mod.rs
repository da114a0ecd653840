use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Errors that can occur while loading analysis results
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid JSON analysis: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid YAML analysis: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

pub type AnalysisLoadResult<T> = Result<T, AnalysisError>;

/// Summary of a codebase produced by an external scanner.
///
/// Every field is optional on the wire; missing keys deserialize as empty and
/// unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisResult {
    pub file_extensions: Vec<String>,
    pub languages: Vec<String>,
    pub python_dependencies: Vec<String>,
    /// Config name to path, in the order the scanner reported them
    pub existing_configs: serde_json::Map<String, serde_json::Value>,
    pub ci_workflows: Vec<String>,
}

impl AnalysisResult {
    /// Load analysis results from a `.json`, `.yaml` or `.yml` file.
    ///
    /// Files with any other extension are tried as JSON first, then YAML.
    pub fn from_path(path: &Path) -> AnalysisLoadResult<Self> {
        let content = fs::read_to_string(path)?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        debug!("Loading analysis results from {}", path.display());

        match extension.as_deref() {
            Some("json") => Ok(Self::from_json(&content)?),
            Some("yaml") | Some("yml") => Ok(Self::from_yaml(&content)?),
            _ => match Self::from_json(&content) {
                Ok(analysis) => Ok(analysis),
                Err(json_err) => {
                    debug!("Not JSON ({}), trying YAML", json_err);
                    Ok(Self::from_yaml(&content)?)
                }
            },
        }
    }

    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_missing_keys_default_to_empty() {
        let analysis = AnalysisResult::from_json(r#"{"languages": ["rust"], "test": "data"}"#).unwrap();

        assert_eq!(analysis.languages, vec!["rust"]);
        assert!(analysis.file_extensions.is_empty());
        assert!(analysis.python_dependencies.is_empty());
        assert!(analysis.existing_configs.is_empty());
        assert!(analysis.ci_workflows.is_empty());
    }

    #[test]
    fn test_existing_configs_keep_insertion_order() {
        let analysis = AnalysisResult::from_json(
            r#"{"existing_configs": {"ruff": "ruff.toml", "black": "pyproject.toml", "mypy": "mypy.ini"}}"#,
        )
        .unwrap();

        let keys: Vec<&str> = analysis.existing_configs.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["ruff", "black", "mypy"]);
    }

    #[test]
    fn test_from_path_yaml() {
        let mut file = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
        writeln!(file, "file_extensions:\n  - py\n  - md\nci_workflows:\n  - .github/workflows/ci.yml").unwrap();

        let analysis = AnalysisResult::from_path(file.path()).unwrap();
        assert_eq!(analysis.file_extensions, vec!["py", "md"]);
        assert_eq!(analysis.ci_workflows, vec![".github/workflows/ci.yml"]);
    }

    #[test]
    fn test_from_path_unknown_extension_falls_back_to_yaml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "languages: [python]").unwrap();

        let analysis = AnalysisResult::from_path(file.path()).unwrap();
        assert_eq!(analysis.languages, vec!["python"]);
    }

    #[test]
    fn test_from_path_invalid_json() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        writeln!(file, "{{not json").unwrap();

        let result = AnalysisResult::from_path(file.path());
        assert!(matches!(result, Err(AnalysisError::JsonError(_))));
    }
}
