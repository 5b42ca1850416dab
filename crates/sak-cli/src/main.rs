// SPDX-License-Identifier: MIT OR Apache-2.0

mod commands;
mod json_script;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use json_script::JsonScriptLoader;
use sak_bundle::{Agent, BundleOverrides};
use sak_observer::{LoggingObserver, Observer};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Exit code for runtime errors.
const EXIT_RUNTIME_ERROR: i32 = 1;

#[derive(Parser, Debug)]
#[command(name = "sak", version, about = "Structured agent kernel CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging.
    #[arg(long)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run an agent bundle against a single user input.
    Run {
        /// Path to a bundle directory (containing `bundle.yaml`) or to the manifest file itself.
        bundle: PathBuf,

        /// The user message to run the agent on.
        #[arg(long)]
        input: String,

        /// Override the bundle's model/plugin name.
        #[arg(long)]
        model: Option<String>,

        /// Override the bundle's `max_turns`.
        #[arg(long)]
        max_turns: Option<u32>,

        /// Print the full conversation history as JSON instead of just the final message.
        #[arg(long)]
        json: bool,
    },

    /// Validate a bundle manifest without running it.
    ValidateBundle {
        /// Path to a bundle directory or manifest file.
        bundle: PathBuf,
    },

    /// List the model families the adapter registry knows about.
    ListModelFamilies,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = if cli.debug { EnvFilter::new("sak=debug") } else { EnvFilter::new("sak=info") };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let result = match cli.command {
        Commands::Run { bundle, input, model, max_turns, json } => cmd_run(&bundle, input, model, max_turns, json).await,
        Commands::ValidateBundle { bundle } => cmd_validate_bundle(&bundle),
        Commands::ListModelFamilies => cmd_list_model_families(),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(EXIT_RUNTIME_ERROR);
    }
}

async fn cmd_run(bundle: &std::path::Path, input: String, model: Option<String>, max_turns: Option<u32>, json: bool) -> Result<()> {
    let overrides = BundleOverrides { model, max_turns, base_url: None, api_key: None };
    let observer: Arc<dyn Observer> = Arc::new(LoggingObserver);
    let agent = Agent::from_bundle(bundle, &JsonScriptLoader, Some(observer), overrides)
        .await
        .with_context(|| format!("load bundle at '{}'", bundle.display()))?;

    let result = agent.run(input).await.context("run agent")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result.history)?);
    } else {
        println!("{}", result.final_message.content.as_deref().unwrap_or(""));
        eprintln!("turns: {}, termination: {:?}", result.turn_count, result.termination_reason);
    }

    Ok(())
}

fn cmd_validate_bundle(bundle: &std::path::Path) -> Result<()> {
    println!("{}", commands::validate_bundle(bundle)?);
    Ok(())
}

fn cmd_list_model_families() -> Result<()> {
    for family in commands::known_model_families() {
        println!("{family}");
    }
    Ok(())
}
