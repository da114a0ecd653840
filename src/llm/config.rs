use std::env;

/// Primary environment variable holding the API key
pub const API_KEY_ENV: &str = "AI_HOOKS_API_KEY";

/// Legacy environment variable, still honoured after `AI_HOOKS_API_KEY`
pub const LEGACY_API_KEY_ENV: &str = "GOOGLE_GEMINI_API_KEY";

pub const MODEL_ENV: &str = "AI_HOOKS_MODEL";
pub const API_BASE_ENV: &str = "AI_HOOKS_API_BASE";

pub const DEFAULT_MODEL: &str = "gemini-pro";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Configuration for the text generation service
#[derive(Clone)]
pub struct LlmConfig {
    /// Gemini API key
    pub api_key: String,

    /// Model identifier sent with every request
    pub model: String,

    /// Base URL of the generative language REST API
    pub api_base: String,
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("api_key", &"<hidden>")
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }
}

impl LlmConfig {
    /// Build a configuration around an already resolved key, using defaults otherwise
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Load configuration from the process environment.
    ///
    /// `explicit_key` wins over both key variables. An unresolvable key leaves
    /// `api_key` empty; the service constructor rejects that. `.env` files are
    /// not read here; the binary loads one at startup.
    pub fn from_env(explicit_key: Option<String>) -> Self {
        let mut config = Self {
            api_key: resolve_api_key(explicit_key, |name| env::var(name).ok()).unwrap_or_default(),
            ..Default::default()
        };

        if let Some(model) = non_empty_var(MODEL_ENV) {
            config.model = model;
        }

        if let Some(api_base) = non_empty_var(API_BASE_ENV) {
            config.api_base = api_base.trim_end_matches('/').to_string();
        }

        config
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }
}

/// Resolve the API key: explicit argument, then `AI_HOOKS_API_KEY`, then
/// `GOOGLE_GEMINI_API_KEY`. Empty values count as unset.
pub fn resolve_api_key<F>(explicit_key: Option<String>, lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    explicit_key
        .filter(|k| !k.is_empty())
        .or_else(|| lookup(API_KEY_ENV).filter(|k| !k.is_empty()))
        .or_else(|| lookup(LEGACY_API_KEY_ENV).filter(|k| !k.is_empty()))
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}
