//! jobwatch CLI entry point.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use jobwatch::cli::{commands, handle_error, Cli, CommandContext, Commands};
use jobwatch::infrastructure::clock::TokioClock;
use jobwatch::infrastructure::config::ConfigLoader;
use jobwatch::infrastructure::jenkins::{JenkinsClient, JenkinsClientConfig};
use jobwatch::infrastructure::logging::LoggerImpl;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json = cli.json;

    if let Err(err) = run(cli).await {
        handle_error(err, json);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = ConfigLoader::load(&cli.overrides()).context("Failed to load configuration")?;
    let _logger = LoggerImpl::init(&config.logging)?;
    debug!(server = ?config.server, job = ?config.job, "configuration loaded");

    let client = JenkinsClient::new(JenkinsClientConfig::from(&config.server))
        .context("Failed to create Jenkins client")?;

    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            debug!("interrupt received");
            interrupt.cancel();
        }
    });

    let ctx = CommandContext::new(
        config,
        Arc::new(client),
        Arc::new(TokioClock),
        cancel,
        cli.json,
    );

    let command = async {
        match cli.command {
            Commands::Build(args) => commands::build::execute(&ctx, args).await,
            Commands::Watch(args) => commands::watch::execute(&ctx, args).await,
            Commands::Status(args) => commands::status::execute(&ctx, args).await,
            Commands::Log(args) => commands::log::execute(&ctx, args).await,
            Commands::Pull(args) => commands::sync::pull(&ctx, args).await,
            Commands::Push(args) => commands::sync::push(&ctx, args).await,
        }
    };
    ctx.until_cancelled(command).await
}
