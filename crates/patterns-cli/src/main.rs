mod bridge_cmd;
mod config;
mod list_cmd;
mod mediator_cmd;
#[cfg(test)]
mod test_util;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use patterns_core::bridge;
use patterns_core::output::{Entry, Sink, StdoutSink};

use config::PatternsConfig;
use mediator_cmd::MediatorOptions;

#[derive(Parser)]
#[command(name = "patterns", about = "Bridge and Mediator pattern demonstrations")]
struct Cli {
    /// Config file path (overrides PATTERNS_CONFIG env var)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default config file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
    /// Run the bridge demo (omit both flags for the classic walkthrough)
    Bridge {
        /// Abstraction kind: base or extended (default: base)
        #[arg(long)]
        abstraction: Option<String>,
        /// Implementor name: a or b (default: a)
        #[arg(long)]
        implementor: Option<String>,
    },
    /// Run the mediator demo (omit --trigger for the classic walkthrough)
    Mediator {
        /// Action to start on its colleague: a, b, c or d (repeatable)
        #[arg(long = "trigger", value_name = "ACTION")]
        triggers: Vec<String>,
        /// Maximum reaction depth (overrides PATTERNS_MAX_DEPTH and config)
        #[arg(long)]
        max_depth: Option<usize>,
        /// Do not wire the colleagues to the mediator
        #[arg(long)]
        unwired: bool,
        /// Print the transcript as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run both classic walkthroughs
    All,
    /// List implementors, abstractions, actions and the reaction table
    List,
}

/// Execute the `patterns init` command: write config file.
fn cmd_init(cli_path: Option<&Path>, force: bool) -> anyhow::Result<()> {
    let (path, _) = config::config_path(cli_path);

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }

    config::save_config(&path, &config::ConfigFile::with_defaults())?;

    StdoutSink.emit(Entry::text(format!("Config written to {}", path.display())));
    Ok(())
}

/// Execute the `patterns all` command: both classic walkthroughs.
fn cmd_all(resolved: &PatternsConfig) -> anyhow::Result<()> {
    StdoutSink.emit(Entry::text("== Bridge =="));
    bridge::run_demo(&StdoutSink);
    StdoutSink.emit(Entry::blank());

    StdoutSink.emit(Entry::text("== Mediator =="));
    mediator_cmd::run_mediator(&resolved.mediator, &MediatorOptions::default())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Init { force } => {
            cmd_init(config_path, force)?;
        }
        Commands::Bridge {
            abstraction,
            implementor,
        } => {
            bridge_cmd::run_bridge(abstraction.as_deref(), implementor.as_deref())?;
        }
        Commands::Mediator {
            triggers,
            max_depth,
            unwired,
            json,
        } => {
            let resolved = PatternsConfig::resolve(config_path, max_depth)?;
            tracing::debug!(source = ?resolved.source, max_depth = resolved.mediator.max_depth, "config resolved");
            let options = MediatorOptions {
                triggers,
                unwired,
                json,
            };
            mediator_cmd::run_mediator(&resolved.mediator, &options)?;
        }
        Commands::All => {
            let resolved = PatternsConfig::resolve(config_path, None)?;
            cmd_all(&resolved)?;
        }
        Commands::List => {
            let resolved = PatternsConfig::resolve(config_path, None)?;
            list_cmd::run_list(&resolved);
        }
    }

    Ok(())
}
