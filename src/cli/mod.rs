//! Command-line surface.

mod output;
mod replay;
mod run;

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::logging::init_tracing;
use crate::scenarios::Scenario;

pub use output::{Emitter, RunError};
pub use replay::{replay, ReplaySummary};
pub use run::run;

#[derive(Debug, Parser)]
#[command(
    name = "fluxstore",
    version,
    about = "Run and replay state-container scenarios"
)]
pub struct Cli {
    /// Path to a config file (defaults to the user config directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the available scenarios
    Scenarios,
    /// Run a scenario's scripted walk-through, printing each state as JSON
    Run {
        #[arg(value_enum)]
        scenario: Scenario,
    },
    /// Dispatch a JSON-lines action log through a scenario's store
    Replay {
        #[arg(value_enum)]
        scenario: Scenario,
        /// File with one action object per line
        file: PathBuf,
        /// Skip invalid or rejected lines instead of stopping
        #[arg(long)]
        keep_going: bool,
    },
}

pub async fn execute(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    init_tracing(&config.logging);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Scenarios => {
            for scenario in Scenario::ALL {
                writeln!(out, "{:<10} {}", scenario.name(), scenario.description())?;
            }
        }
        Command::Run { scenario } => {
            run(scenario, &config, &mut out)
                .await
                .with_context(|| format!("Scenario '{}' failed", scenario.name()))?;
        }
        Command::Replay {
            scenario,
            file,
            keep_going,
        } => {
            let input = File::open(&file)
                .with_context(|| format!("Failed to open action log '{}'", file.display()))?;
            let summary = replay(scenario, &config, BufReader::new(input), keep_going, &mut out)
                .with_context(|| format!("Replay of '{}' failed", file.display()))?;
            tracing::info!(
                applied = summary.applied,
                unrecognized = summary.unrecognized,
                skipped = summary.skipped,
                "replay finished"
            );
        }
    }

    out.flush()?;
    Ok(())
}
