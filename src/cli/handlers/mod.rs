pub mod config;
pub mod generate;
pub mod prompt;

// Re-export handler functions for convenience
pub use config::handle_config_command;
pub use generate::handle_generate_command;
pub use prompt::handle_prompt_command;
