use crate::llm::config::{LlmConfig, API_BASE_ENV, API_KEY_ENV, LEGACY_API_KEY_ENV, MODEL_ENV};
use anyhow::Result;
use colored::Colorize;
use std::env;

pub fn handle_config_command(env_file_loaded: bool) -> Result<()> {
    let config = LlmConfig::from_env(None);

    println!("{}", "🔧 ai-hooks Configuration".bright_white().bold());
    println!("═══════════════════════════════════════");
    println!();

    println!("🌍 Environment:");
    if env_file_loaded {
        println!("  • .env file: ✅ Loaded");
    } else {
        println!("  • .env file: ⚠️  Not found (using system environment)");
    }

    for name in [API_KEY_ENV, LEGACY_API_KEY_ENV] {
        match env::var(name) {
            Ok(value) if !value.is_empty() => println!("  • {}: ✅ Set (hidden)", name),
            _ => println!("  • {}: ❌ Not set", name),
        }
    }

    for (name, default) in [(MODEL_ENV, "unset"), (API_BASE_ENV, "unset")] {
        match env::var(name) {
            Ok(value) => println!("  • {}: {}", name, value),
            Err(_) => println!("  • {}: {} (default)", name, default),
        }
    }

    for (name, default) in [("AI_HOOKS_LOG_LEVEL", "info"), ("AI_HOOKS_LOG_FILE", "none")] {
        match env::var(name) {
            Ok(value) => println!("  • {}: {}", name, value),
            Err(_) => println!("  • {}: {} (default)", name, default),
        }
    }

    println!();
    println!("🤖 Service:");
    println!("  • Model: {}", config.model);
    println!("  • API base: {}", config.api_base);
    if config.has_api_key() {
        println!("  • Generation: {}", "✅ Enabled".green());
    } else {
        println!("  • Generation: {}", "❌ Disabled (no API key)".red());
        println!();
        println!("💡 Set {} or pass --api-key to enable generation", API_KEY_ENV);
    }

    Ok(())
}
