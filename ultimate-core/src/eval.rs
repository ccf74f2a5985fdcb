//! Position evaluation and per-move heuristics

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::board::{cell_of, classify, sub_board_of, CellKind, CENTER_CELL, GRID_SIZE};
use crate::game::{Board, GameState, Mode, Player};
use crate::lines::{completing_slot, line_counts, Slots, LINES};
use crate::rules::{is_sub_board_full, would_trigger_free_choice};

/// Tuning weights for the heuristic tiers
///
/// None of these carry meaning beyond "what played well"; they can be
/// replaced wholesale from a JSON file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Heuristics {
    /// Local cell values
    pub center_value: i32,
    pub corner_value: i32,
    pub edge_value: i32,

    /// Where a move sends the opponent
    pub free_choice_bonus: i32,
    pub opponent_grid_penalty: i32,
    pub open_center_penalty: i32,

    /// Static evaluation
    pub game_win: i32,
    pub sub_board_win: i32,
    pub center_control: i32,
    pub grid_win: i32,
    pub meta_line_potential: i32,

    /// Expert: meta-board strategy
    pub meta_complete: i32,
    pub meta_build: i32,
    pub meta_block: i32,
    pub meta_disrupt: i32,
    pub center_grid: i32,
    pub corner_grid: i32,

    /// Expert: traps
    pub double_threat: i32,
    pub single_threat: i32,
    pub tight_squeeze: i32,
    pub loose_squeeze: i32,

    /// Expert: tempo
    pub tempo_gain: i32,
    pub tempo_loss: i32,
}

impl Default for Heuristics {
    fn default() -> Self {
        Self {
            center_value: 3,
            corner_value: 2,
            edge_value: 1,

            free_choice_bonus: 2,
            opponent_grid_penalty: 2,
            open_center_penalty: 1,

            game_win: 1000,
            sub_board_win: 10,
            center_control: 2,
            grid_win: 100,
            meta_line_potential: 50,

            meta_complete: 200,
            meta_build: 50,
            meta_block: 150,
            meta_disrupt: 30,
            center_grid: 25,
            corner_grid: 15,

            double_threat: 75,
            single_threat: 25,
            tight_squeeze: 40,
            loose_squeeze: 20,

            tempo_gain: 15,
            tempo_loss: 10,
        }
    }
}

impl Heuristics {
    /// Load from a JSON file; missing fields keep their defaults
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let heuristics = serde_json::from_str(&content)?;
        Ok(heuristics)
    }

    /// Save to a JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn cell_value(&self, kind: CellKind) -> i32 {
        match kind {
            CellKind::Center => self.center_value,
            CellKind::Corner => self.corner_value,
            CellKind::Edge => self.edge_value,
        }
    }
}

// ============================================================================
// STATIC EVALUATION
// ============================================================================

/// Score one sub-board from `player`'s point of view
pub(crate) fn evaluate_sub_board(
    state: &GameState,
    sub_board: usize,
    player: Player,
    h: &Heuristics,
) -> i32 {
    let opponent = player.opponent();
    match state.sub_board_winners()[sub_board] {
        Some(p) if p == player => return h.sub_board_win,
        Some(_) => return -h.sub_board_win,
        None => {}
    }

    let slots = state.board().slots(sub_board);
    let mut score = 0;
    for line in LINES {
        let (own, _) = line_counts(&slots, line, player);
        let (theirs, _) = line_counts(&slots, line, opponent);
        if own > 0 && theirs == 0 {
            score += own as i32;
        }
        if theirs > 0 && own == 0 {
            score -= theirs as i32;
        }
    }

    match slots[CENTER_CELL] {
        Some(p) if p == player => score += h.center_control,
        Some(_) => score -= h.center_control,
        None => {}
    }
    score
}

/// Score the whole position from `player`'s point of view
pub fn evaluate_board(state: &GameState, player: Player, h: &Heuristics) -> i32 {
    if let Some(winner) = state.winner() {
        return if winner == player { h.game_win } else { -h.game_win };
    }

    match state.mode() {
        Mode::Basic => (0..GRID_SIZE)
            .map(|g| evaluate_sub_board(state, g, player, h))
            .sum(),
        Mode::Extended => {
            let winners = state.sub_board_winners();
            let mut score = 0;
            for (g, winner) in winners.iter().enumerate() {
                match winner {
                    Some(p) if *p == player => score += h.grid_win,
                    Some(_) => score -= h.grid_win,
                    None if !is_sub_board_full(state.board(), g) => {
                        score += evaluate_sub_board(state, g, player, h);
                    }
                    None => {}
                }
            }
            for line in LINES {
                let (own, _) = line_counts(winners, line, player);
                let (theirs, _) = line_counts(winners, line, player.opponent());
                if own > 0 && theirs == 0 {
                    score += own as i32 * h.meta_line_potential;
                }
                if theirs > 0 && own == 0 {
                    score -= theirs as i32 * h.meta_line_potential;
                }
            }
            score
        }
    }
}

// ============================================================================
// MOVE HEURISTICS
// ============================================================================

/// Value of the local cell a move lands on
pub fn position_score(index: usize, h: &Heuristics) -> i32 {
    classify(cell_of(index)).map_or(0, |kind| h.cell_value(kind))
}

/// Adjustment for the sub-board a move sends the opponent to
///
/// The free-choice trigger looks at the board after the move; the
/// opponent-only and open-center checks look at the target as it stands.
pub(crate) fn grid_control(state: &GameState, index: usize, player: Player, h: &Heuristics) -> i32 {
    let board = state.board();
    if would_trigger_free_choice(index, board) {
        return h.free_choice_bonus;
    }

    let target = cell_of(index);
    if state.sub_board_winners()[target].is_some() {
        return 0;
    }

    let slots = board.slots(target);
    let own = count(&slots, player);
    let theirs = count(&slots, player.opponent());
    if theirs > 0 && own == 0 {
        return -h.opponent_grid_penalty;
    }
    if slots[CENTER_CELL].is_none() {
        return -h.open_center_penalty;
    }
    0
}

/// Extended mode: how a move's sub-board sits on the meta-board lines
pub(crate) fn master_grid_strategy(
    state: &GameState,
    index: usize,
    player: Player,
    h: &Heuristics,
) -> i32 {
    if state.mode() != Mode::Extended {
        return 0;
    }
    let g = sub_board_of(index);
    let winners = state.sub_board_winners();
    let mut score = 0;

    for line in LINES.iter().filter(|line| line.contains(&g)) {
        let (own, empty) = line_counts(winners, *line, player);
        let (theirs, _) = line_counts(winners, *line, player.opponent());

        match (own, empty) {
            (2, 1) => score += h.meta_complete,
            (1, 2) => score += h.meta_build,
            _ => {}
        }
        match (theirs, empty) {
            (2, 1) => score += h.meta_block,
            (1, 2) => score += h.meta_disrupt,
            _ => {}
        }
    }

    match g {
        CENTER_CELL => score += h.center_grid,
        0 | 2 | 6 | 8 => score += h.corner_grid,
        _ => {}
    }
    score
}

/// Threats a move creates and how tightly it boxes in the opponent
pub(crate) fn trap_setting(state: &GameState, index: usize, player: Player, h: &Heuristics) -> i32 {
    let winners = state.sub_board_winners();
    let after = placed(state.board(), index, player);
    let mut score = 0;

    let threats = (0..GRID_SIZE)
        .filter(|&g| winners[g].is_none())
        .filter(|&g| completing_slot(&after.slots(g), player).is_some())
        .count();
    if threats >= 2 {
        score += h.double_threat;
    } else if threats == 1 {
        score += h.single_threat;
    }

    let target = cell_of(index);
    if winners[target].is_none() {
        let room = after.slots(target).iter().filter(|c| c.is_none()).count();
        if room <= 2 {
            score += h.tight_squeeze;
        } else if room <= 4 {
            score += h.loose_squeeze;
        }
    }
    score
}

/// Whether the opponent is sent somewhere we already outnumber them
pub(crate) fn tempo(state: &GameState, index: usize, player: Player, h: &Heuristics) -> i32 {
    let target = cell_of(index);
    if state.sub_board_winners()[target].is_some() {
        return 0;
    }
    let slots = state.board().slots(target);
    let own = count(&slots, player);
    let theirs = count(&slots, player.opponent());
    if own > theirs {
        h.tempo_gain
    } else if theirs > own {
        -h.tempo_loss
    } else {
        0
    }
}

/// Combined per-move heuristic used by the expert search
pub(crate) fn advanced_move_score(
    state: &GameState,
    index: usize,
    player: Player,
    h: &Heuristics,
) -> i32 {
    position_score(index, h)
        + grid_control(state, index, player, h)
        + master_grid_strategy(state, index, player, h)
        + trap_setting(state, index, player, h)
        + tempo(state, index, player, h)
}

fn placed(board: &Board, index: usize, player: Player) -> Board {
    let mut after = *board;
    after.place(index, player);
    after
}

fn count(slots: &Slots, player: Player) -> usize {
    slots.iter().filter(|&&c| c == Some(player)).count()
}
