use std::fs::File;
use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use postboard::app::AppContext;
use postboard::cli::{commands, Cli, Commands};
use postboard::config::Config;
use postboard::render::Enrichment;

fn init_tracing(log: Option<&Path>, tui: bool) -> anyhow::Result<()> {
    let registry = tracing_subscriber::registry().with(EnvFilter::from_default_env());

    match log {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            registry
                .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                .init();
        }
        // Anything written to the terminal would corrupt the TUI.
        None if tui => registry.with(fmt::layer().with_writer(std::io::sink)).init(),
        None => registry.with(fmt::layer().with_writer(std::io::stderr)).init(),
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Tui);
    init_tracing(cli.log.as_deref(), matches!(command, Commands::Tui))?;

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }
    if cli.concurrent {
        config.render.enrichment = Enrichment::Concurrent;
    }

    let ctx = AppContext::new(config)?;

    match command {
        Commands::Users => {
            commands::list_users(&ctx).await?;
        }
        Commands::Posts { user_id, expand } => {
            commands::show_posts(&ctx, user_id, &expand).await?;
        }
        Commands::Tui => {
            postboard::tui::run(Arc::new(ctx)).await?;
        }
    }

    Ok(())
}
