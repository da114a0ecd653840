pub mod config;
pub mod prompts;
pub mod response;
pub mod service;

pub use config::LlmConfig;
pub use prompts::build_precommit_prompt;
pub use response::extract_config;
pub use service::{GeminiService, LlmServiceError, TextGenerator};
