//! Generate pre-commit hook configurations from a codebase analysis.
//!
//! The pipeline is a single round trip: an [`AnalysisResult`] is turned into a
//! prompt, sent to a text generation service, and the reply is stripped of
//! Markdown fences to yield a [`GeneratedConfig`].

pub mod analysis;
pub mod cli;
pub mod generator;
pub mod llm;

pub use analysis::AnalysisResult;
pub use generator::{
    generate_precommit_config, ConfigGenerator, GeneratedConfig, GeneratorError, GeneratorResult,
    PRECOMMIT_CONFIG_FILE,
};
pub use llm::{GeminiService, LlmConfig, LlmServiceError, TextGenerator};
