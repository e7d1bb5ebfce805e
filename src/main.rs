mod cli;
mod engine;
mod model;
mod normalize;
#[cfg(feature = "tui")]
mod orchestrator;
mod text_summary;
#[cfg(feature = "tui")]
mod tui;
mod validate;

use anyhow::Result;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();
    let is_one_shot = args.json || args.text || args.username.is_some();

    cli::run(args).await?;

    // Explicitly exit with code 0 on success for one-shot modes
    if is_one_shot {
        std::process::exit(0);
    }
    Ok(())
}
