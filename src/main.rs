use ai_hooks::cli::commands::{Cli, Commands};
use ai_hooks::cli::handlers::{handle_config_command, handle_generate_command, handle_prompt_command};
use ai_hooks::cli::utils::{effective_level, init_logging, print_info};
use anyhow::Result;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    // Pick up AI_HOOKS_* variables from .env before clap reads its env fallbacks
    let env_file_loaded = dotenv::dotenv().is_ok();

    let cli = Cli::parse();

    init_logging(
        effective_level(cli.verbose, cli.log_level),
        cli.log_format,
        cli.log_file.as_deref(),
    )?;

    match cli.command {
        Commands::Generate {
            analysis,
            output,
            api_key,
            stdout,
            force,
        } => handle_generate_command(analysis, output, api_key, stdout, force).await,

        Commands::Prompt { analysis } => handle_prompt_command(analysis),

        Commands::Config => handle_config_command(env_file_loaded),

        Commands::Info => {
            print_info();
            Ok(())
        }
    }
}
