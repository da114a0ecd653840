use crate::analysis::AnalysisResult;
use crate::llm::{build_precommit_prompt, extract_config, GeminiService, LlmServiceError, TextGenerator};
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, error, info};

/// Conventional file name for the generated configuration
pub const PRECOMMIT_CONFIG_FILE: &str = ".pre-commit-config.yaml";

/// Errors that abort a generation attempt
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("API key not provided. Set AI_HOOKS_API_KEY (or GOOGLE_GEMINI_API_KEY) or pass an API key explicitly.")]
    MissingCredential,

    #[error("Failed to call AI service: {source}")]
    ServiceCall {
        #[source]
        source: LlmServiceError,
    },

    #[error("Failed to parse AI service response: {0}")]
    ResponseParse(String),
}

pub type GeneratorResult<T> = Result<T, GeneratorError>;

/// Configuration produced by the model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedConfig {
    /// Reply with code fences and surrounding whitespace removed
    pub yaml_content: String,
    /// Reply exactly as the service returned it
    pub raw_response: String,
}

/// Runs analysis -> prompt -> model -> extracted configuration
pub struct ConfigGenerator<G: TextGenerator = GeminiService> {
    generator: G,
}

impl ConfigGenerator<GeminiService> {
    /// Create a generator backed by Gemini, resolving the key from the
    /// argument and the process environment
    pub fn from_env(api_key: Option<String>) -> GeneratorResult<Self> {
        info!("Initializing AI client");
        let service = GeminiService::from_env(api_key)?;
        info!("AI client initialized successfully");
        Ok(Self::new(service))
    }
}

impl<G: TextGenerator> ConfigGenerator<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Generate a pre-commit configuration for the analysed codebase.
    ///
    /// Makes exactly one service call; the first failure aborts the attempt.
    pub async fn generate(&self, analysis: &AnalysisResult) -> GeneratorResult<GeneratedConfig> {
        info!("Generating pre-commit configuration based on analysis results");

        debug!("Creating prompt for AI service");
        let prompt = build_precommit_prompt(analysis);

        debug!("Calling AI service ({})", self.generator.model());
        let start = Instant::now();
        let response = self.generator.invoke(&prompt).await.map_err(|e| {
            error!("Failed to call AI service: {}", e);
            debug!("Full error details: {:?}", e);
            GeneratorError::ServiceCall { source: e }
        })?;
        debug!(
            "AI service call completed in {:.2} seconds",
            start.elapsed().as_secs_f64()
        );

        debug!("Parsing API response");
        let config = extract_config(&response).map_err(|e| {
            error!("{}", e);
            e
        })?;
        info!("Pre-commit configuration generated successfully");

        Ok(config)
    }
}

/// One-shot helper: build a Gemini-backed generator and run it once
pub async fn generate_precommit_config(
    analysis: &AnalysisResult,
    api_key: Option<String>,
) -> GeneratorResult<GeneratedConfig> {
    ConfigGenerator::<GeminiService>::from_env(api_key)?
        .generate(analysis)
        .await
}
