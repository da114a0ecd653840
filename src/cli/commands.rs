use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "ai-hooks",
    about = "Generate pre-commit hook configurations from codebase analysis with AI",
    version,
    author
)]
pub struct Cli {
    /// Enable verbose output (same as --log-level debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log level
    #[arg(long, value_enum, env = "AI_HOOKS_LOG_LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    /// Output format for logs
    #[arg(long, value_enum, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Also write logs to this file
    #[arg(long, env = "AI_HOOKS_LOG_FILE", global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a pre-commit configuration from analysis results
    Generate {
        /// Analysis results file (JSON or YAML)
        #[arg(value_name = "ANALYSIS_FILE")]
        analysis: PathBuf,

        /// Where to write the configuration
        #[arg(short, long, default_value = ".pre-commit-config.yaml")]
        output: PathBuf,

        /// API key (overrides AI_HOOKS_API_KEY and GOOGLE_GEMINI_API_KEY)
        #[arg(long)]
        api_key: Option<String>,

        /// Print the configuration instead of writing it
        #[arg(long)]
        stdout: bool,

        /// Overwrite the output file if it already exists
        #[arg(short, long)]
        force: bool,
    },

    /// Print the prompt that would be sent, without calling the service
    Prompt {
        /// Analysis results file (JSON or YAML)
        #[arg(value_name = "ANALYSIS_FILE")]
        analysis: PathBuf,
    },

    /// Display current configuration
    Config,

    /// Show information about ai-hooks
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}
