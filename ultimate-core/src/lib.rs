//! Ultimate tic-tac-toe core - rules engine and CPU opponents
//!
//! This crate provides:
//! - Board geometry (81 cells as nine 3x3 sub-boards)
//! - Line detection shared by sub-boards and the meta-board
//! - Smart-grid constraints, move validation and immutable state transitions
//! - Basic (first sub-board wins) and Extended (meta-board line) modes
//! - CPU move selection at four difficulty levels

pub mod error;
pub mod board;
pub mod lines;
pub mod game;
pub mod rules;
pub mod eval;
pub mod opening;
pub mod ai;
pub mod config;

// Re-exports for convenient access
pub use board::{display_number, to_global, to_sub_cell, CellKind, BOARD_CELLS, GRID_SIZE};
pub use error::{AiError, IndexError, MoveError, ParseNameError, SetupError};
pub use game::{
    new_game, Board, Constraint, GameResult, GameState, Mode, ParseBoardError, Phase, Player,
    PlayerMode, Settings, Status, CPU_PLAYER,
};
pub use lines::{check_master_grid_winner, detect_winner, winning_line};
pub use rules::{compute_next_constraint, is_legal, legal_moves, validate};
pub use eval::Heuristics;
pub use opening::OpeningBook;
pub use ai::{select_cpu_move, CpuPlayer, Difficulty};
pub use config::AiConfig;
