//! CLI Adapter.

mod render;
mod write;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use crate::adapters::TerminalNotifier;
use crate::app::api;
use crate::domain::configuration::load_config;
use crate::domain::{AppConfig, AppError};
use crate::ports::Notifier;

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "PUBFUND_LOG";
const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Parser)]
#[command(name = "pubfund")]
#[command(version)]
#[command(
    about = "Inspect and act on staged public-fund proposals held by a funding contract",
    long_about = None
)]
struct Cli {
    /// Path to the configuration file (defaults to $PUBFUND_CONFIG, then ./pubfund.toml)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every proposal with its votes, progress and available actions
    #[clap(visible_alias = "ls")]
    Proposals {
        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one proposal with its stages
    Show {
        /// Proposal id
        id: u64,
        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },
    /// Cast a public vote on a proposal
    Vote {
        /// Proposal id
        id: u64,
        /// Vote in favour
        #[arg(long, conflicts_with = "reject", required_unless_present = "reject")]
        approve: bool,
        /// Vote against
        #[arg(long, conflicts_with = "approve", required_unless_present = "approve")]
        reject: bool,
        /// Comment stored with the vote
        #[arg(short = 'm', long, default_value = "")]
        comment: String,
        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Close public voting on a proposal (admin)
    CloseVoting {
        /// Proposal id
        id: u64,
        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Release the current stage's funds to the recipient (admin)
    ReleaseStage {
        /// Proposal id
        id: u64,
        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// Treasury and funding statistics over all proposals
    Stats {
        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the connected account, its role and chain
    Whoami,
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();
    init_tracing();

    let result =
        load_config(cli.config.as_deref()).and_then(|config| dispatch(cli.command, &config));

    if let Err(e) = result {
        report_error(&e);
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn dispatch(command: Commands, config: &AppConfig) -> Result<(), AppError> {
    match command {
        Commands::Proposals { json } => {
            let listing = api::list_proposals(config)?;
            if json {
                print_json(&listing)?;
            } else {
                render::print_listing(&listing);
            }
        }
        Commands::Show { id, json } => {
            let view = api::show_proposal(config, id)?;
            if json {
                print_json(&view)?;
            } else {
                render::print_proposal(&view);
            }
        }
        Commands::Vote { id, approve, reject: _, comment, yes } => {
            write::run_write(config, api::WriteRequest::Vote { id, approve, comment }, yes)?;
        }
        Commands::CloseVoting { id, yes } => {
            write::run_write(config, api::WriteRequest::CloseVoting { id }, yes)?;
        }
        Commands::ReleaseStage { id, yes } => {
            write::run_write(config, api::WriteRequest::ReleaseStage { id }, yes)?;
        }
        Commands::Stats { json } => {
            let stats = api::statistics(config)?;
            if json {
                print_json(&stats)?;
            } else {
                render::print_statistics(&stats);
            }
        }
        Commands::Whoami => render::print_session(&api::whoami(config)?),
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|err| AppError::malformed("JSON output", err.to_string()))?;
    println!("{}", text);
    Ok(())
}

/// Upstream failures are surfaced as their category notification; everything
/// else is printed as a plain error line.
fn report_error(error: &AppError) {
    match error {
        AppError::Upstream { category, detail } => {
            TerminalNotifier.notify(category.notification(detail.as_deref()));
        }
        AppError::Aborted => eprintln!("Aborted."),
        other => eprintln!("Error: {}", other),
    }
}
