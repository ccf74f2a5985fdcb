//! Error types

/// Index conversion given a value outside its range
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum IndexError {
    #[error("value {value} is out of range (0-{max})")]
    OutOfRange { value: usize, max: usize },
}

/// Reasons a move request is rejected
///
/// All of these come from routine human input and are meant to be shown to
/// the player, never treated as faults.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("the game is not in progress")]
    GameNotInProgress,

    #[error("cell {0} is outside the board")]
    OutOfRange(usize),

    #[error("cell {0} is already occupied")]
    CellOccupied(usize),

    #[error("you must play in sub-board {}", .0 + 1)]
    WrongSubBoard(usize),
}

/// Move selector failures
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AiError {
    #[error("no legal moves available")]
    NoLegalMoves,
}

/// Configuration changes that are not allowed in the current phase
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    #[error("the game mode cannot change once play has started")]
    GameInProgress,

    #[error("the game has already started")]
    AlreadyStarted,
}

/// Unrecognised name for a mode or difficulty
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{name}' (expected one of: {expected})")]
pub struct ParseNameError {
    pub kind: &'static str,
    pub name: String,
    pub expected: &'static str,
}
