//! ASP namespace Merkle tree CLI

mod cli;
mod commands;

use clap::Parser as _;
use cli::{Cli, Commands, ConfigCommands};

fn init_tracing() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .with_target(false)
        .try_init()
        .map_err(|e| eyre::eyre!("Failed to initialize tracing: {:?}", e))?;

    Ok(())
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> eyre::Result<()> {
    // Load .env file (fails silently if not found)
    let _ = dotenvy::dotenv();

    init_tracing()?;

    let cli = Cli::parse();

    let res = match cli.command {
        Commands::Root { args } => {
            commands::tree_root(
                args.events,
                args.config.config,
                args.config.hash_function,
                args.out,
            )
            .await
        }
        Commands::Prove { args } => {
            commands::prove(
                args.events,
                args.namespace,
                args.config.config,
                args.config.hash_function,
                args.out,
            )
            .await
        }
        Commands::Config { command } => match command {
            ConfigCommands::Init { out } => commands::config_init(out).await,
        },
    };

    if let Err(e) = res {
        tracing::error!("Error: {:?}", e);
        std::process::exit(1);
    }

    Ok(())
}
