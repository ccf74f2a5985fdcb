//! Play command - one CPU-vs-CPU game
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_players(), play_game(), report_game()
//! - Level 4: formatting utilities

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use ultimate_core::{
    display_number, to_sub_cell, CpuPlayer, Difficulty, GameResult, GameState, Mode, Phase, Player,
};

use crate::cpu_config;

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Difficulty playing X
    #[arg(long, default_value = "medium")]
    pub x: Difficulty,

    /// Difficulty playing O
    #[arg(long, default_value = "medium")]
    pub o: Difficulty,

    /// Win condition: basic or extended
    #[arg(long, default_value = "basic")]
    pub mode: Mode,

    /// Heuristics JSON file for both players
    #[arg(long, value_name = "FILE")]
    pub tuning: Option<PathBuf>,

    /// Print the final state as JSON
    #[arg(long)]
    pub json: bool,
}

/// Both CPU players, indexed by side
struct Players {
    x: CpuPlayer,
    o: CpuPlayer,
}

impl Players {
    fn for_side(&mut self, player: Player) -> &mut CpuPlayer {
        match player {
            Player::X => &mut self.x,
            Player::O => &mut self.o,
        }
    }
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

pub fn run(args: PlayArgs, seed: Option<u64>) -> Result<()> {
    let mut players = build_players(&args, seed)?;

    tracing::info!("Starting game: X={} vs O={} ({})", args.x, args.o, args.mode);

    let (state, moves) = play_game(&mut players, GameState::new(args.mode), !args.json)?;

    report_game(&state, &moves, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn build_players(args: &PlayArgs, seed: Option<u64>) -> Result<Players> {
    let tuning = args.tuning.as_deref();
    // Distinct streams per side so mirrored difficulties don't mirror moves
    let x = cpu_config(args.x, seed, tuning)?;
    let o = cpu_config(args.o, seed.map(|s| s.wrapping_add(1)), tuning)?;
    Ok(Players {
        x: CpuPlayer::from_config(&x),
        o: CpuPlayer::from_config(&o),
    })
}

fn play_game(
    players: &mut Players,
    initial: GameState,
    echo: bool,
) -> Result<(GameState, Vec<usize>)> {
    let mut state = initial;
    let mut moves = Vec::new();

    while state.phase() == Phase::Playing {
        let player = state.current_player();
        let mv = players.for_side(player).choose_move(&state)?;
        if echo {
            println!("{:>3}. {} plays {}", moves.len() + 1, player, describe_move(mv));
        }
        state = state.try_apply_move(mv)?;
        moves.push(mv);
    }

    Ok((state, moves))
}

fn report_game(state: &GameState, moves: &[usize], json: bool) -> Result<()> {
    if json {
        #[derive(Serialize)]
        struct JsonOutput<'a> {
            result: GameResult,
            moves: &'a [usize],
            state: &'a GameState,
        }

        let output = JsonOutput {
            result: state.result(),
            moves,
            state,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("\n{}", state.board());
        println!("{} after {} moves", state.status(), moves.len());
    }
    Ok(())
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Global index with its 1-based sub-board and cell numbers
pub fn describe_move(index: usize) -> String {
    let numbers = to_sub_cell(index)
        .and_then(|(sub_board, cell)| Ok((display_number(sub_board)?, display_number(cell)?)));
    match numbers {
        Ok((sub_board, cell)) => format!("{index} (sub-board {sub_board}, cell {cell})"),
        Err(_) => format!("{index} (off the board)"),
    }
}

// ============================================================================
// TESTS
// ============================================================================
