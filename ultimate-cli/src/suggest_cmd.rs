//! Suggest command - replay a move list and ask the CPU for the next move

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use ultimate_core::{CpuPlayer, Difficulty, GameState, Mode, Phase};

use crate::cpu_config;
use crate::play_cmd::describe_move;

#[derive(Args)]
pub struct SuggestArgs {
    /// Comma-separated global indices (0-80) played so far, X first
    #[arg(long, default_value = "")]
    pub moves: String,

    /// Difficulty used to pick the suggestion
    #[arg(long, default_value = "expert")]
    pub difficulty: Difficulty,

    /// Win condition: basic or extended
    #[arg(long, default_value = "basic")]
    pub mode: Mode,

    /// Heuristics JSON file
    #[arg(long, value_name = "FILE")]
    pub tuning: Option<PathBuf>,

    /// Print the suggestion as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: SuggestArgs, seed: Option<u64>) -> Result<()> {
    let moves = parse_moves(&args.moves)?;
    let state = replay(args.mode, &moves)?;

    if state.phase() != Phase::Playing {
        bail!("no move to suggest: {}", state.status());
    }

    let config = cpu_config(args.difficulty, seed, args.tuning.as_deref())?;
    let mut cpu = CpuPlayer::from_config(&config);
    let suggestion = cpu.choose_move(&state)?;
    tracing::info!(suggestion, difficulty = %args.difficulty, "suggested move");

    if args.json {
        let output = serde_json::json!({
            "player": state.current_player(),
            "suggestion": suggestion,
            "difficulty": args.difficulty,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", state.board());
        println!("{}", state.status());
        println!("Suggested move: {}", describe_move(suggestion));
    }
    Ok(())
}

/// Parse "40, 36,4" into indices; blank input means no moves
fn parse_moves(text: &str) -> Result<Vec<usize>> {
    text.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<usize>()
                .with_context(|| format!("Invalid move '{}'", part))
        })
        .collect()
}

/// Apply each move in order, rejecting the first illegal one
fn replay(mode: Mode, moves: &[usize]) -> Result<GameState> {
    moves
        .iter()
        .enumerate()
        .try_fold(GameState::new(mode), |state, (n, &mv)| {
            state
                .try_apply_move(mv)
                .with_context(|| format!("Move {} ({}) rejected", n + 1, mv))
        })
}
