use crate::analysis::AnalysisResult;
use crate::generator::{ConfigGenerator, GeneratedConfig};
use crate::llm::GeminiService;
use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub async fn handle_generate_command(
    analysis_path: PathBuf,
    output: PathBuf,
    api_key: Option<String>,
    stdout: bool,
    force: bool,
) -> Result<()> {
    let analysis = load_analysis(&analysis_path)?;

    if !stdout && output.exists() && !force {
        bail!(
            "{} already exists; pass --force to overwrite or --stdout to print instead",
            output.display()
        );
    }

    let generator = ConfigGenerator::<GeminiService>::from_env(api_key)?;
    let config = generator.generate(&analysis).await?;

    if stdout {
        println!("{}", config.yaml_content);
        return Ok(());
    }

    write_config(&output, &config)?;
    println!(
        "{} Pre-commit configuration written to {}",
        "✓".green().bold(),
        output.display()
    );

    Ok(())
}

pub fn load_analysis(path: &Path) -> Result<AnalysisResult> {
    info!("Loading analysis results from {}", path.display());
    let analysis = AnalysisResult::from_path(path)
        .with_context(|| format!("Failed to load analysis results from {}", path.display()))?;

    debug!(
        "Analysis: {} extensions, {} languages, {} python dependencies, {} existing configs, {} CI workflows",
        analysis.file_extensions.len(),
        analysis.languages.len(),
        analysis.python_dependencies.len(),
        analysis.existing_configs.len(),
        analysis.ci_workflows.len()
    );

    Ok(analysis)
}

/// Write the extracted configuration, ending it with a newline
pub fn write_config(path: &Path, config: &GeneratedConfig) -> Result<()> {
    let mut content = config.yaml_content.clone();
    if !content.ends_with('\n') {
        content.push('\n');
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Saved configuration to {}", path.display());

    Ok(())
}
