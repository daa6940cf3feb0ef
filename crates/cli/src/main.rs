//! `trigger-console` CLI entry-point.
//!
//! Available sub-commands:
//! - `validate`     — validate a trigger snapshot JSON file.
//! - `list`         — print trigger names from a snapshot.
//! - `replay`       — fold a JSON array of actions into events state.
//! - `action-types` — print every action-type identifier.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use events::{ActionType, EventsState, RAEvents, TriggerKind, Triggers};

#[derive(Parser)]
#[command(
    name = "trigger-console",
    about = "Inspect and validate event and scheduled trigger metadata",
    version
)]
struct Cli {
    /// Log filter used when RUST_LOG is not set.
    #[arg(long, global = true, env = "TRIGGER_CONSOLE_LOG", default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate a trigger snapshot (`{"scheduled": [..], "event": [..]}`).
    Validate {
        /// Path to the snapshot JSON file.
        path: PathBuf,
    },
    /// List trigger names in a snapshot.
    List {
        path: PathBuf,
        /// Only list one kind (`event` or `cron`).
        #[arg(long)]
        kind: Option<TriggerKind>,
    },
    /// Replay a JSON array of actions and print the resulting state.
    Replay {
        path: PathBuf,
    },
    /// Print the action-type identifiers.
    ActionTypes,
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read file {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("invalid JSON in {}", path.display()))
}

fn list_lines(triggers: &Triggers, kind: Option<TriggerKind>) -> Vec<String> {
    let kinds: &[TriggerKind] = match &kind {
        Some(kind) => std::slice::from_ref(kind),
        None => TriggerKind::ALL,
    };
    kinds
        .iter()
        .flat_map(|&kind| {
            triggers
                .names(kind)
                .into_iter()
                .map(move |name| format!("{kind}\t{name}"))
        })
        .collect()
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cli.log_level))
        .context("invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Validate { path } => {
            let triggers: Triggers = read_json(&path)?;
            info!(
                scheduled = triggers.scheduled.len(),
                event = triggers.event.len(),
                "validating {}",
                path.display()
            );

            match events::validate_triggers(&triggers) {
                Ok(()) => {
                    println!(
                        "✅ Triggers are valid: {} event, {} scheduled.",
                        triggers.event.len(),
                        triggers.scheduled.len()
                    );
                }
                Err(e) => {
                    eprintln!("❌ Validation failed: {e}");
                    std::process::exit(1);
                }
            }
        }
        Command::List { path, kind } => {
            let triggers: Triggers = read_json(&path)?;
            if triggers.is_empty() {
                warn!("{} contains no triggers", path.display());
            }
            for line in list_lines(&triggers, kind) {
                println!("{line}");
            }
        }
        Command::Replay { path } => {
            let actions: Vec<RAEvents> = read_json(&path)?;
            info!(count = actions.len(), "replaying actions");
            let state = EventsState::replay(&actions);
            println!("{}", serde_json::to_string_pretty(&state)?);
        }
        Command::ActionTypes => {
            for ty in ActionType::ALL {
                println!("{ty}");
            }
        }
    }

    Ok(())
}
