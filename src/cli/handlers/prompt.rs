use crate::cli::handlers::generate::load_analysis;
use crate::llm::build_precommit_prompt;
use anyhow::Result;
use std::path::PathBuf;

pub fn handle_prompt_command(analysis_path: PathBuf) -> Result<()> {
    let analysis = load_analysis(&analysis_path)?;
    println!("{}", build_precommit_prompt(&analysis));
    Ok(())
}
