//! Smart-grid constraint and move legality

use crate::board::{cell_of, sub_board_of, to_sub_cell, BOARD_CELLS, GRID_SIZE};
use crate::error::{IndexError, MoveError};
use crate::game::{Board, Constraint, GameState, Phase, Player};

/// Every cell of a sub-board is occupied, won or not
pub(crate) fn is_sub_board_full(board: &Board, sub_board: usize) -> bool {
    board.slots(sub_board).iter().all(Option::is_some)
}

/// Sub-boards that still have an empty cell
pub fn playable_sub_boards(board: &Board) -> Vec<usize> {
    (0..GRID_SIZE)
        .filter(|&g| !is_sub_board_full(board, g))
        .collect()
}

/// Constraint handed to the opponent after a move at `index`
///
/// Playing local cell `c` sends the opponent to sub-board `c`, unless that
/// sub-board is full. A won sub-board with room left is still a target.
pub fn compute_next_constraint(index: usize, board: &Board) -> Result<Constraint, IndexError> {
    let (_, cell) = to_sub_cell(index)?;
    Ok(constraint_for_target(board, cell))
}

pub(crate) fn constraint_for_target(board: &Board, target: usize) -> Constraint {
    if is_sub_board_full(board, target) {
        Constraint::Unconstrained
    } else {
        Constraint::RestrictedTo(target)
    }
}

/// Whether taking empty cell `index` would leave the opponent a free choice
///
/// Judged on the board after the move, so filling the last gap of the
/// target sub-board counts.
pub fn would_trigger_free_choice(index: usize, board: &Board) -> bool {
    if !board.is_empty_cell(index) {
        return false;
    }
    let mut after = *board;
    after.place(index, Player::X);
    is_sub_board_full(&after, cell_of(index))
}

/// Empty cells whose play would hand the opponent a free choice
pub fn free_choice_cells(state: &GameState) -> Vec<usize> {
    state
        .board()
        .empty_cells()
        .filter(|&i| would_trigger_free_choice(i, state.board()))
        .collect()
}

/// Every index the current player may take
pub fn legal_moves(state: &GameState) -> Vec<usize> {
    if state.phase() != Phase::Playing {
        return Vec::new();
    }
    match (state.is_first_move(), state.constraint()) {
        (false, Constraint::RestrictedTo(g)) => {
            let start = g * GRID_SIZE;
            (start..start + GRID_SIZE)
                .filter(|&i| state.board().is_empty_cell(i))
                .collect()
        }
        _ => state.board().empty_cells().collect(),
    }
}

pub fn is_legal(state: &GameState, index: usize) -> bool {
    validate(state, index).is_ok()
}

/// Legality check with a reason suitable for showing to the player
pub fn validate(state: &GameState, index: usize) -> Result<(), MoveError> {
    if state.phase() != Phase::Playing {
        return Err(MoveError::GameNotInProgress);
    }
    if index >= BOARD_CELLS {
        return Err(MoveError::OutOfRange(index));
    }
    if state.board().get(index).is_some() {
        return Err(MoveError::CellOccupied(index));
    }
    if state.is_first_move() {
        return Ok(());
    }
    match state.constraint() {
        Constraint::Unconstrained => Ok(()),
        Constraint::RestrictedTo(g) if sub_board_of(index) == g => Ok(()),
        Constraint::RestrictedTo(g) => Err(MoveError::WrongSubBoard(g)),
    }
}
