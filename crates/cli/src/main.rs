//! Petal CLI — the main entry point.
//!
//! Commands:
//! - `assemble`    — Reassemble a token stream into text
//! - `petals`      — List the configured petals
//! - `objectives`  — Show (and update) a petal's objectives
//! - `status`      — Show configuration

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "petal",
    about = "Petal — conversational assistant runtime",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Reassemble tokens (one JSON string per line) into text
    Assemble {
        /// Read tokens from a file instead of stdin
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Print every stream event as JSON
        #[arg(long)]
        events: bool,
    },

    /// List the configured petals
    Petals,

    /// Show a petal's objectives, optionally collecting some first
    Objectives {
        /// Petal name
        petal: String,

        /// Collect an objective (repeatable)
        #[arg(short, long = "set", value_name = "NAME=VALUE")]
        set: Vec<String>,

        /// Record an additional objective (repeatable)
        #[arg(short, long = "add", value_name = "NAME=VALUE")]
        add: Vec<String>,
    },

    /// Show configuration
    Status,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Assemble { file, events } => commands::assemble::run(file, events).await?,
        Commands::Petals => commands::petals::run().await?,
        Commands::Objectives { petal, set, add } => {
            commands::objectives::run(&petal, &set, &add).await?
        }
        Commands::Status => commands::status::run().await?,
    }

    Ok(())
}
