//! Match command - a series between two difficulty levels
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_configs(), play_match(), report_results()
//! - Level 3: play_single_game(), compute_match_statistics()
//! - Level 4: formatting utilities

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use ultimate_core::{AiConfig, CpuPlayer, Difficulty, GameResult, GameState, Mode, Phase, Player};

use crate::cpu_config;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct MatchArgs {
    /// Difficulty of the first contender (plays X in odd-numbered games)
    #[arg(long, default_value = "hard")]
    pub first: Difficulty,

    /// Difficulty of the second contender
    #[arg(long, default_value = "medium")]
    pub second: Difficulty,

    /// Number of games to play (will alternate sides)
    #[arg(long, default_value = "10")]
    pub games: usize,

    /// Win condition: basic or extended
    #[arg(long, default_value = "basic")]
    pub mode: Mode,

    /// Heuristics JSON file for both contenders
    #[arg(long, value_name = "FILE")]
    pub tuning: Option<PathBuf>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    /// Play games one after another instead of in parallel
    #[arg(long)]
    pub sequential: bool,
}

/// Result of a single game
#[derive(Clone, Debug)]
struct GameRecord {
    game_number: usize,
    /// Side the first contender played
    first_side: Player,
    result: GameResult,
    moves: usize,
}

impl GameRecord {
    fn first_won(&self) -> bool {
        self.result == GameResult::Won(self.first_side)
    }

    fn second_won(&self) -> bool {
        self.result == GameResult::Won(self.first_side.opponent())
    }
}

/// Aggregated match results
#[derive(Clone, Debug)]
struct MatchResults {
    games: Vec<GameRecord>,
    first_wins: usize,
    second_wins: usize,
    draws: usize,
    avg_moves: f32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run match command
///
/// 1. Build both CPU configurations
/// 2. Play the match
/// 3. Report results
pub fn run(args: MatchArgs, seed: Option<u64>) -> Result<()> {
    let (first, second) = build_configs(&args)?;

    tracing::info!(
        "Starting match: {} vs {} ({} games, {})",
        args.first,
        args.second,
        args.games,
        args.mode
    );

    let results = play_match(&first, &second, &args, seed);

    report_results(&results, &args);

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Configurations without seeds; each game gets its own
fn build_configs(args: &MatchArgs) -> Result<(AiConfig, AiConfig)> {
    let tuning = args.tuning.as_deref();
    let first = cpu_config(args.first, None, tuning)?;
    let second = cpu_config(args.second, None, tuning)?;
    Ok((first, second))
}

/// Play all games in the match
fn play_match(
    first: &AiConfig,
    second: &AiConfig,
    args: &MatchArgs,
    seed: Option<u64>,
) -> MatchResults {
    // Seeds are drawn up front so parallel scheduling cannot change them
    let mut rng = create_rng(seed);
    let seeds: Vec<u64> = (0..args.games).map(|_| rng.gen()).collect();

    let progress = if args.json {
        ProgressBar::hidden()
    } else {
        progress_bar(args.games as u64)
    };

    let play = |(index, game_seed): (usize, &u64)| {
        let record = play_single_game(first, second, index + 1, args.mode, *game_seed);
        tracing::info!(
            "Game {}: {:?} ({} moves)",
            record.game_number,
            record.result,
            record.moves
        );
        progress.inc(1);
        record
    };

    let games: Vec<GameRecord> = if args.sequential {
        seeds.iter().enumerate().map(play).collect()
    } else {
        seeds.par_iter().enumerate().map(play).collect()
    };
    progress.finish_and_clear();

    compute_match_statistics(games)
}

/// Report match results
fn report_results(results: &MatchResults, args: &MatchArgs) {
    if args.json {
        print_json_results(results, args);
    } else {
        print_text_results(results, args);
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Play one game; the first contender takes X in odd-numbered games
fn play_single_game(
    first: &AiConfig,
    second: &AiConfig,
    game_number: usize,
    mode: Mode,
    seed: u64,
) -> GameRecord {
    let first_side = if game_number % 2 == 1 { Player::X } else { Player::O };
    let (x_config, o_config) = match first_side {
        Player::X => (first, second),
        Player::O => (second, first),
    };
    let mut x = CpuPlayer::from_config(&x_config.clone().with_seed(seed));
    let mut o = CpuPlayer::from_config(&o_config.clone().with_seed(seed.wrapping_add(1)));

    let mut state = GameState::new(mode);
    let mut moves = 0;
    while state.phase() == Phase::Playing {
        let cpu = match state.current_player() {
            Player::X => &mut x,
            Player::O => &mut o,
        };
        match cpu.choose_move(&state) {
            Ok(mv) => {
                state = state.apply_move(mv);
                moves += 1;
            }
            Err(err) => {
                tracing::warn!(game_number, %err, "game abandoned");
                break;
            }
        }
    }

    GameRecord {
        game_number,
        first_side,
        result: state.result(),
        moves,
    }
}

/// Compute aggregate statistics from game records
fn compute_match_statistics(games: Vec<GameRecord>) -> MatchResults {
    let first_wins = games.iter().filter(|g| g.first_won()).count();
    let second_wins = games.iter().filter(|g| g.second_won()).count();
    let draws = games.iter().filter(|g| g.result == GameResult::Draw).count();

    let total_moves: usize = games.iter().map(|g| g.moves).sum();
    let avg_moves = if games.is_empty() {
        0.0
    } else {
        total_moves as f32 / games.len() as f32
    };

    MatchResults {
        games,
        first_wins,
        second_wins,
        draws,
        avg_moves,
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Create RNG from seed or random
fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

fn progress_bar(len: u64) -> ProgressBar {
    let bar = ProgressBar::new(len);
    if let Ok(style) = ProgressStyle::with_template("{bar:40} {pos}/{len} games ({elapsed})") {
        bar.set_style(style);
    }
    bar
}

fn percent(count: usize, total: usize) -> f32 {
    if total > 0 {
        count as f32 / total as f32 * 100.0
    } else {
        0.0
    }
}

fn describe_result(game: &GameRecord) -> &'static str {
    if game.first_won() {
        "first wins"
    } else if game.second_won() {
        "second wins"
    } else if game.result == GameResult::Draw {
        "draw"
    } else {
        "unfinished"
    }
}

/// Print results as JSON
fn print_json_results(results: &MatchResults, args: &MatchArgs) {
    #[derive(serde::Serialize)]
    struct JsonGame {
        game_number: usize,
        first_side: Player,
        result: GameResult,
        moves: usize,
    }

    #[derive(serde::Serialize)]
    struct JsonOutput {
        first: Difficulty,
        second: Difficulty,
        mode: Mode,
        total_games: usize,
        first_wins: usize,
        second_wins: usize,
        draws: usize,
        avg_moves: f32,
        first_win_rate: f32,
        games: Vec<JsonGame>,
    }

    let total = results.games.len();
    let output = JsonOutput {
        first: args.first,
        second: args.second,
        mode: args.mode,
        total_games: total,
        first_wins: results.first_wins,
        second_wins: results.second_wins,
        draws: results.draws,
        avg_moves: results.avg_moves,
        first_win_rate: percent(results.first_wins, total) / 100.0,
        games: results
            .games
            .iter()
            .map(|g| JsonGame {
                game_number: g.game_number,
                first_side: g.first_side,
                result: g.result,
                moves: g.moves,
            })
            .collect(),
    };

    if let Ok(json) = serde_json::to_string_pretty(&output) {
        println!("{}", json);
    }
}

/// Print results as text
fn print_text_results(results: &MatchResults, args: &MatchArgs) {
    let total = results.games.len();

    println!("\n=== Match Results ({}) ===", args.mode);
    println!("Total games: {}", total);
    println!(
        "{:<12} {} ({:.1}%)",
        format!("{} wins:", args.first),
        results.first_wins,
        percent(results.first_wins, total)
    );
    println!(
        "{:<12} {} ({:.1}%)",
        format!("{} wins:", args.second),
        results.second_wins,
        percent(results.second_wins, total)
    );
    println!(
        "{:<12} {} ({:.1}%)",
        "Draws:",
        results.draws,
        percent(results.draws, total)
    );
    println!("Avg moves:   {:.1}", results.avg_moves);

    println!("\nGame details:");
    for game in &results.games {
        println!(
            "  Game {}: first as {}, {} in {} moves",
            game.game_number,
            game.first_side,
            describe_result(game),
            game.moves
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================
