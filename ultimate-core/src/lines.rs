//! Three-in-a-row detection on any 3x3 grid
//!
//! Sub-boards and the meta-board share one topology, so every check here
//! takes nine owner-or-empty slots: a sub-board's cells or the nine
//! sub-board winners.

use serde::{Deserialize, Serialize};

use crate::board::GRID_SIZE;
use crate::game::Player;

/// Nine owner-or-empty slots of one 3x3 grid
pub type Slots = [Option<Player>; GRID_SIZE];

/// The eight lines in scan order: rows, then columns, then diagonals
pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Shape of a line
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineKind {
    Row,
    Column,
    Diagonal,
}

/// Shape of the line at `line_index` in [`LINES`]
pub fn line_kind(line_index: usize) -> Option<LineKind> {
    match line_index {
        0..=2 => Some(LineKind::Row),
        3..=5 => Some(LineKind::Column),
        6 | 7 => Some(LineKind::Diagonal),
        _ => None,
    }
}

/// Player owning all three slots of some line
pub fn detect_winner(slots: &Slots) -> Option<Player> {
    winning_line(slots).and_then(|[a, _, _]| slots[a])
}

/// First complete line in scan order
pub fn winning_line(slots: &Slots) -> Option<[usize; 3]> {
    LINES.iter().copied().find(|&[a, b, c]| {
        slots[a].is_some() && slots[a] == slots[b] && slots[a] == slots[c]
    })
}

/// First line completed by `player`
pub fn winning_line_for(slots: &Slots, player: Player) -> Option<[usize; 3]> {
    LINES
        .iter()
        .copied()
        .find(|line| line.iter().all(|&i| slots[i] == Some(player)))
}

/// Count of `player` slots and empty slots on a line
pub(crate) fn line_counts(slots: &Slots, line: [usize; 3], player: Player) -> (usize, usize) {
    let own = line.iter().filter(|&&i| slots[i] == Some(player)).count();
    let empty = line.iter().filter(|&&i| slots[i].is_none()).count();
    (own, empty)
}

/// Empty slot that would complete a line for `player`, in scan order
pub fn completing_slot(slots: &Slots, player: Player) -> Option<usize> {
    LINES.iter().find_map(|&line| match line_counts(slots, line, player) {
        (2, 1) => line.iter().copied().find(|&i| slots[i].is_none()),
        _ => None,
    })
}

/// Meta-board winner over the nine sub-board winners
pub fn check_master_grid_winner(sub_board_winners: &Slots) -> Option<Player> {
    detect_winner(sub_board_winners)
}

/// Sub-boards forming the first complete meta-line
pub fn master_winning_sub_boards(sub_board_winners: &Slots) -> Option<[usize; 3]> {
    winning_line(sub_board_winners)
}
