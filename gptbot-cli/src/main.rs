//! gptbot: run the Telegram bot and the diction web endpoint. Config from env
//! and optional CLI args.

use anyhow::Result;
use clap::Parser;
use gptbot_cli::{config::AppConfig, run, Cli, Commands};
use gptbot_core::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => {
            let config = AppConfig::from_env(token)?;
            init_tracing(config.log_file.as_deref())?;
            run(config).await
        }
    }
}
