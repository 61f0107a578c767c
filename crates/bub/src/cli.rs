//! Command-line entry point

use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use bub_core::config::load_config;
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::{
    commands::run_command,
    reply::{ReplySink, SlackWebhookSink, StdoutSink},
    server::{serve, ServerState},
    App,
};

#[derive(Debug, Parser)]
#[command(name = "bub", version, about = "Claim shared servers and coordinate deploys from chat")]
pub struct Cli {
    /// Config file layered over the global one
    #[arg(long, env = "BUB_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the webhook server
    Serve,
    /// Run one chat command against fresh in-memory state and print the replies
    Exec {
        /// User issuing the command
        #[arg(long, env = "USER")]
        user: String,
        /// Channel the command came from
        #[arg(long, default_value = "general")]
        channel: String,
        /// Command text, e.g. `take sassy 3 days`
        #[arg(required = true, trailing_var_arg = true)]
        text: Vec<String>,
    },
}

pub async fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    init_tracing(config.log_filter.as_deref());

    let bind = config.bind.clone();
    let webhook_url = config.slack.webhook_url.clone();
    let app = App::from_config(config).context("Invalid configuration")?;

    match cli.command {
        Commands::Serve => {
            let sink: Arc<dyn ReplySink> = if let Some(url) = webhook_url {
                Arc::new(SlackWebhookSink::new(url))
            } else {
                warn!("No Slack webhook_url configured; replies go to stdout");
                Arc::new(StdoutSink)
            };
            info!(resources = ?app.claims.registry().iter().collect::<Vec<_>>(), "Starting server");
            serve(ServerState { app, sink }, &bind).await?;
        }
        Commands::Exec {
            user,
            channel,
            text,
        } => {
            let text = text.join(" ");
            let command_text = app.strip_trigger(&text).unwrap_or(text.as_str());
            let produced = run_command(&app, &user, &channel, command_text, &StdoutSink).await;
            if produced == 0 {
                anyhow::bail!("Unknown command: {text}");
            }
        }
    }

    Ok(())
}

fn init_tracing(filter: Option<&str>) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter.unwrap_or("info")))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
