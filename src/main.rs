mod api;
mod catalog;
mod cli;
mod config;
mod error;
mod player;
mod ui;
mod watchlist;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::{Cli, Commands};
use crate::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();
    let ephemeral = cli.ephemeral;

    match cli.command {
        Some(Commands::Init) => {
            cli::commands::init().await?;
        }
        Some(Commands::Config { show, set, reset }) => {
            cli::commands::config(show, set, reset).await?;
        }
        Some(Commands::Search { query }) => {
            cli::commands::search(query, ephemeral).await?;
        }
        Some(Commands::Trending { tv, day }) => {
            cli::commands::trending(tv, day).await?;
        }
        Some(Commands::TopRated { tv }) => {
            cli::commands::top_rated(tv).await?;
        }
        Some(Commands::Show { key }) => {
            cli::commands::show(key, ephemeral).await?;
        }
        Some(Commands::Watchlist { action }) => {
            if !cli::commands::watchlist(action, ephemeral).await? {
                std::process::exit(1);
            }
        }
        None => {
            cli::commands::interactive(ephemeral).await?;
        }
    }

    Ok(())
}
