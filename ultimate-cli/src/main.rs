//! Ultimate tic-tac-toe CLI
//!
//! Commands:
//! - play: one CPU-vs-CPU game, move by move
//! - match: a series between two difficulty levels
//! - suggest: replay a move list and ask the CPU for the next move

mod match_cmd;
mod play_cmd;
mod suggest_cmd;

use std::path::Path;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ultimate_core::{AiConfig, Difficulty};

#[derive(Parser)]
#[command(name = "ultimate")]
#[command(about = "Ultimate tic-tac-toe engine and CPU opponents")]
struct Cli {
    /// Random seed for reproducible games
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Log selector decisions (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a single CPU-vs-CPU game
    Play(play_cmd::PlayArgs),
    /// Play a series of games between two difficulty levels
    Match(match_cmd::MatchArgs),
    /// Suggest the next move for a position
    Suggest(suggest_cmd::SuggestArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Play(args) => play_cmd::run(args, cli.seed),
        Commands::Match(args) => match_cmd::run(args, cli.seed),
        Commands::Suggest(args) => suggest_cmd::run(args, cli.seed),
    }
}

/// Logs go to stderr so `--json` output stays clean
fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// CPU configuration shared by every command
pub(crate) fn cpu_config(
    difficulty: Difficulty,
    seed: Option<u64>,
    tuning: Option<&Path>,
) -> Result<AiConfig> {
    let mut config = AiConfig::new(difficulty);
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    if let Some(path) = tuning {
        config = config.with_tuning_file(path)?;
    }
    Ok(config)
}
