//! Lineup CLI
//!
//! Roster JSON → formation lineup / player ratings, printed as JSON.

#[cfg(feature = "cli")]
use anyhow::Result;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "lineup_cli")]
#[command(about = "Build squad lineups and player ratings from roster files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// List registered formations
    Formations {
        /// Print the summaries as JSON
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Assign a roster onto a formation
    Lineup {
        /// Roster JSON file (array of players or {"players": [...]})
        #[arg(long)]
        roster: PathBuf,

        /// Formation name (e.g., "4-4-2"); overrides the config
        #[arg(long)]
        formation: Option<String>,

        /// Goalkeeper id to select instead of the top-ranked one
        #[arg(long)]
        goalkeeper: Option<String>,

        /// Session config file (YAML, or JSON with a .json extension)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show category averages and goalkeeper rating for one player
    Rate {
        /// Roster JSON file
        #[arg(long)]
        roster: PathBuf,

        /// Player id
        #[arg(long)]
        player: String,
    },
}

#[cfg(feature = "cli")]
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("lineup_core=warn,lineup_cli=info"));

    // stdout carries the JSON output
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Formations { json } => {
            let summaries = lineup_cli::formation_summaries()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&summaries)?);
            } else {
                for summary in &summaries {
                    println!(
                        "{:<8} {}-{}-{}  {}",
                        summary.name,
                        summary.defenders,
                        summary.midfielders,
                        summary.forwards,
                        summary.metadata.description
                    );
                }
            }
        }

        Commands::Lineup { roster, formation, goalkeeper, config } => {
            let view = lineup_cli::build_lineup(&lineup_cli::LineupRequest {
                roster,
                config,
                formation,
                goalkeeper,
            })?;
            println!("{}", serde_json::to_string_pretty(&view)?);
        }

        Commands::Rate { roster, player } => {
            let view = lineup_cli::rate_player(&roster, &player)?;
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
    }

    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("lineup_cli is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
