//! # Branchdesk — guideline assistant for branch employees
//!
//! Answers work questions from a spreadsheet-backed guideline sheet, with a
//! generative fallback when the lexical match is only partial.
//!
//! Usage:
//!   branchdesk serve                  # Start the HTTP gateway
//!   branchdesk serve --port 8080      # Custom port
//!   branchdesk ask "사고 접수 방법"    # One-shot question from the terminal

use std::path::Path;

use anyhow::Result;
use branchdesk_core::BranchdeskConfig;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "branchdesk", version, about = "🛡️ Branchdesk — 지점 지침 AI 비서")]
struct Cli {
    /// Path to config TOML (default: ~/.branchdesk/config.toml)
    #[arg(short, long)]
    config: Option<String>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP gateway
    Serve {
        /// Override the configured port
        #[arg(short, long)]
        port: Option<u16>,
        /// Override the configured bind host
        #[arg(long)]
        host: Option<String>,
    },
    /// Ask a one-shot question from the terminal
    Ask {
        question: String,
        /// Display name used in the answer
        #[arg(long, default_value = "사용자")]
        name: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug,hyper=info,reqwest=info"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    let mut config = match &cli.config {
        Some(path) => {
            let expanded = shellexpand::tilde(path).to_string();
            BranchdeskConfig::load_from(Path::new(&expanded))?
        }
        None => BranchdeskConfig::load()?,
    };

    tracing::debug!(
        "⚙️ Config: provider={}, sheet='{}'",
        config.llm.provider,
        config.sheets.guideline_sheet
    );

    match cli.command {
        Command::Serve { port, host } => {
            if let Some(port) = port {
                config.gateway.port = port;
            }
            if let Some(host) = host {
                config.gateway.host = host;
            }
            branchdesk_gateway::start(&config).await
        }
        Command::Ask { question, name } => {
            let assistant = branchdesk_agent::Assistant::new(config)?;
            let answer = assistant.ask(&question, &name).await;
            println!("{answer}");
            Ok(())
        }
    }
}
