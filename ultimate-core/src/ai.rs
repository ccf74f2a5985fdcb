//! CPU move selection: four difficulty tiers

use std::fmt;
use std::str::FromStr;

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::board::{cell_of, classify, CellKind, CENTER_CELL, GRID_SIZE};
use crate::config::AiConfig;
use crate::error::{AiError, ParseNameError};
use crate::eval::{advanced_move_score, evaluate_board, grid_control, position_score, Heuristics};
use crate::game::{Board, Constraint, GameState, Phase, Player};
use crate::lines::completing_slot;
use crate::opening::OpeningBook;

// ============================================================================
// DIFFICULTY
// ============================================================================

/// CPU strength
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Uniform random legal move
    Easy,
    /// Win, block, then a one-move positional score
    #[default]
    Medium,
    /// Win, block, then a shallow minimax
    Hard,
    /// Opening book, win, block, then a deeper minimax with extra heuristics
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Expert,
    ];

    /// Next tier down, used when a selected move fails validation
    pub fn fallback(self) -> Option<Difficulty> {
        match self {
            Difficulty::Expert => Some(Difficulty::Hard),
            Difficulty::Hard => Some(Difficulty::Medium),
            Difficulty::Medium => Some(Difficulty::Easy),
            Difficulty::Easy => None,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Expert => "expert",
        };
        f.pad(name)
    }
}

impl FromStr for Difficulty {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseNameError {
                kind: "difficulty",
                name: s.to_string(),
                expected: "easy, medium, hard, expert",
            })
    }
}

// ============================================================================
// SELECTOR
// ============================================================================

/// Pick a move for the current player with default tuning
pub fn select_cpu_move<R: Rng + ?Sized>(
    state: &GameState,
    difficulty: Difficulty,
    rng: &mut R,
) -> Result<usize, AiError> {
    select_cpu_move_with(
        state,
        difficulty,
        rng,
        &Heuristics::default(),
        &OpeningBook::default(),
    )
}

/// Pick a move for the current player
///
/// The random source only matters for Easy and for Medium's tie-break; the
/// search tiers are deterministic.
pub fn select_cpu_move_with<R: Rng + ?Sized>(
    state: &GameState,
    difficulty: Difficulty,
    rng: &mut R,
    heuristics: &Heuristics,
    book: &OpeningBook,
) -> Result<usize, AiError> {
    let legal = state.legal_moves();
    if legal.is_empty() {
        return Err(AiError::NoLegalMoves);
    }

    let mv = match difficulty {
        Difficulty::Easy => legal.choose(rng).copied(),
        Difficulty::Medium => {
            immediate_tactic(state, &legal).or_else(|| medium_move(state, &legal, heuristics, rng))
        }
        Difficulty::Hard => {
            immediate_tactic(state, &legal).or_else(|| hard_move(state, &legal, heuristics))
        }
        Difficulty::Expert => match book.lookup(state, &legal) {
            Some(mv) => {
                debug!(mv, "opening book");
                Some(mv)
            }
            None => immediate_tactic(state, &legal)
                .or_else(|| expert_move(state, &legal, heuristics)),
        },
    };
    mv.ok_or(AiError::NoLegalMoves)
}

/// Sub-boards the current player may aim a win or block at
///
/// The constrained sub-board, or every unclaimed one under free choice.
pub fn reachable_sub_boards(state: &GameState) -> Vec<usize> {
    match (state.is_first_move(), state.constraint()) {
        (false, Constraint::RestrictedTo(g)) => vec![g],
        _ => (0..GRID_SIZE)
            .filter(|&g| state.sub_board_winners()[g].is_none())
            .collect(),
    }
}

/// Empty cell of `sub_board` that completes a line for `player`
pub(crate) fn find_winning_move(board: &Board, sub_board: usize, player: Player) -> Option<usize> {
    completing_slot(&board.slots(sub_board), player).map(|c| sub_board * GRID_SIZE + c)
}

/// Empty cell of `sub_board` that stops the opponent of `player` completing a line
pub(crate) fn find_blocking_move(board: &Board, sub_board: usize, player: Player) -> Option<usize> {
    find_winning_move(board, sub_board, player.opponent())
}

/// Win if possible, else block, across reachable sub-boards in order
fn immediate_tactic(state: &GameState, legal: &[usize]) -> Option<usize> {
    let board = state.board();
    let player = state.current_player();
    let targets = reachable_sub_boards(state);

    let win = targets
        .iter()
        .filter_map(|&g| find_winning_move(board, g, player))
        .find(|mv| legal.contains(mv));
    if let Some(mv) = win {
        debug!(mv, "taking win");
        return Some(mv);
    }

    let block = targets
        .iter()
        .filter_map(|&g| find_blocking_move(board, g, player))
        .find(|mv| legal.contains(mv));
    if let Some(mv) = block {
        debug!(mv, "blocking");
    }
    block
}

// ============================================================================
// MEDIUM
// ============================================================================

fn medium_move<R: Rng + ?Sized>(
    state: &GameState,
    legal: &[usize],
    h: &Heuristics,
    rng: &mut R,
) -> Option<usize> {
    let player = state.current_player();
    let scored: Vec<(usize, i32)> = legal
        .iter()
        .map(|&mv| (mv, position_score(mv, h) + grid_control(state, mv, player, h)))
        .collect();

    let best = scored.iter().map(|&(_, s)| s).max()?;
    let top: Vec<usize> = scored
        .iter()
        .filter(|&&(_, s)| s == best)
        .map(|&(mv, _)| mv)
        .collect();
    top.choose(rng).copied()
}

// ============================================================================
// SEARCH
// ============================================================================

/// Plies searched by Hard, the root move included
pub fn hard_search_depth(root_moves: usize) -> u32 {
    match root_moves {
        0..=10 => 4,
        11..=20 => 3,
        _ => 2,
    }
}

/// Plies searched by Expert, the root move included
pub fn expert_search_depth(root_moves: usize) -> u32 {
    match root_moves {
        0..=20 => 6,
        21..=30 => 5,
        _ => 4,
    }
}

fn hard_move(state: &GameState, legal: &[usize], h: &Heuristics) -> Option<usize> {
    let depth = hard_search_depth(legal.len());
    debug!(depth, moves = legal.len(), "hard search");
    let scored = score_root_moves(state, legal, depth, h, |_| 0);
    pick_best(&scored, |mv| u8::from(cell_of(mv) == CENTER_CELL))
}

fn expert_move(state: &GameState, legal: &[usize], h: &Heuristics) -> Option<usize> {
    let depth = expert_search_depth(legal.len());
    let player = state.current_player();
    debug!(depth, moves = legal.len(), "expert search");
    let scored = score_root_moves(state, legal, depth, h, |mv| {
        advanced_move_score(state, mv, player, h)
    });
    pick_best(&scored, |mv| match classify(cell_of(mv)) {
        Ok(CellKind::Center) => 2,
        Ok(CellKind::Corner) => 1,
        _ => 0,
    })
}

/// Minimax score of every root move plus a per-move bonus, in move order
fn score_root_moves<F>(
    state: &GameState,
    legal: &[usize],
    depth: u32,
    h: &Heuristics,
    bonus: F,
) -> Vec<(usize, i32)>
where
    F: Fn(usize) -> i32 + Sync,
{
    let root = state.current_player();
    legal
        .par_iter()
        .map(|&mv| {
            let child = state.apply_move(mv);
            let score = minimax(&child, depth - 1, i32::MIN, i32::MAX, false, root, h);
            (mv, score.saturating_add(bonus(mv)))
        })
        .collect()
}

/// Highest score wins; ties go to the higher rank, then the earlier move
fn pick_best(scored: &[(usize, i32)], rank: impl Fn(usize) -> u8) -> Option<usize> {
    let mut best: Option<(usize, i32)> = None;
    for &(mv, score) in scored {
        best = match best {
            Some((best_mv, best_score))
                if score < best_score || (score == best_score && rank(mv) <= rank(best_mv)) =>
            {
                Some((best_mv, best_score))
            }
            _ => Some((mv, score)),
        };
    }
    best.map(|(mv, _)| mv)
}

/// Alpha-beta search scored for `root` at every node
fn minimax(
    state: &GameState,
    depth: u32,
    mut alpha: i32,
    mut beta: i32,
    maximizing: bool,
    root: Player,
    h: &Heuristics,
) -> i32 {
    if depth == 0 || state.phase() != Phase::Playing {
        return evaluate_board(state, root, h);
    }
    let moves = state.legal_moves();
    if moves.is_empty() {
        return evaluate_board(state, root, h);
    }

    if maximizing {
        let mut best = i32::MIN;
        for mv in moves {
            let score = minimax(&state.apply_move(mv), depth - 1, alpha, beta, false, root, h);
            best = best.max(score);
            alpha = alpha.max(score);
            if beta <= alpha {
                break;
            }
        }
        best
    } else {
        let mut best = i32::MAX;
        for mv in moves {
            let score = minimax(&state.apply_move(mv), depth - 1, alpha, beta, true, root, h);
            best = best.min(score);
            beta = beta.min(score);
            if beta <= alpha {
                break;
            }
        }
        best
    }
}

// ============================================================================
// CPU PLAYER
// ============================================================================

/// Stateful CPU opponent owning its random source and tuning
pub struct CpuPlayer {
    pub difficulty: Difficulty,
    pub heuristics: Heuristics,
    pub opening_book: OpeningBook,
    rng: ChaCha8Rng,
}

impl CpuPlayer {
    pub fn new(difficulty: Difficulty) -> Self {
        Self::with_seed(difficulty, 42)
    }

    pub fn with_seed(difficulty: Difficulty, seed: u64) -> Self {
        Self {
            difficulty,
            heuristics: Heuristics::default(),
            opening_book: OpeningBook::default(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn from_config(config: &AiConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self {
            difficulty: config.difficulty,
            heuristics: config.heuristics.clone(),
            opening_book: config.opening_book.clone(),
            rng,
        }
    }

    /// Choose a move, dropping a tier whenever the pick fails validation
    pub fn choose_move(&mut self, state: &GameState) -> Result<usize, AiError> {
        let mut tier = Some(self.difficulty);
        while let Some(difficulty) = tier {
            let mv = select_cpu_move_with(
                state,
                difficulty,
                &mut self.rng,
                &self.heuristics,
                &self.opening_book,
            )?;
            match state.validate(mv) {
                Ok(()) => return Ok(mv),
                Err(err) => {
                    warn!(mv, %difficulty, %err, "selected move rejected, falling back");
                    tier = difficulty.fallback();
                }
            }
        }
        Err(AiError::NoLegalMoves)
    }

    /// Play both sides until the game ends
    pub fn play_game(&mut self, initial: GameState) -> (GameState, Vec<usize>) {
        let mut state = initial;
        let mut history = Vec::new();

        while state.phase() == Phase::Playing {
            match self.choose_move(&state) {
                Ok(mv) => {
                    history.push(mv);
                    state = state.apply_move(mv);
                }
                Err(_) => break,
            }
        }

        (state, history)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Mode, Settings};
    use crate::lines::LINES;
    use Player::{O, X};

    fn position(mode: Mode, text: &str, to_move: Player, constraint: Constraint) -> GameState {
        let board = text.parse().unwrap();
        GameState::from_position(Settings::with_mode(mode), board, to_move, constraint)
    }

    /// Whether taking `mv` completes a line for the mover in its sub-board
    fn completes_line(state: &GameState, mv: usize) -> bool {
        let g = mv / GRID_SIZE;
        let c = cell_of(mv);
        let mut slots = state.board().slots(g);
        slots[c] = Some(state.current_player());
        LINES
            .iter()
            .filter(|line| line.contains(&c))
            .any(|line| line.iter().all(|&i| slots[i] == Some(state.current_player())))
    }

    fn has_reachable_win(state: &GameState) -> bool {
        let legal = state.legal_moves();
        reachable_sub_boards(state)
            .into_iter()
            .filter_map(|g| find_winning_move(state.board(), g, state.current_player()))
            .any(|mv| legal.contains(&mv))
    }

    #[test]
    fn test_difficulty_names() {
        for d in Difficulty::ALL {
            assert_eq!(d.to_string().parse::<Difficulty>(), Ok(d));
        }
        assert_eq!("EXPERT".parse::<Difficulty>(), Ok(Difficulty::Expert));
        assert!("impossible".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_fallback_chain() {
        assert_eq!(Difficulty::Expert.fallback(), Some(Difficulty::Hard));
        assert_eq!(Difficulty::Hard.fallback(), Some(Difficulty::Medium));
        assert_eq!(Difficulty::Medium.fallback(), Some(Difficulty::Easy));
        assert_eq!(Difficulty::Easy.fallback(), None);
    }

    #[test]
    fn test_search_depths() {
        assert_eq!(hard_search_depth(10), 4);
        assert_eq!(hard_search_depth(11), 3);
        assert_eq!(hard_search_depth(20), 3);
        assert_eq!(hard_search_depth(21), 2);
        assert_eq!(expert_search_depth(20), 6);
        assert_eq!(expert_search_depth(30), 5);
        assert_eq!(expert_search_depth(81), 4);
    }

    #[test]
    fn test_no_legal_moves() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let setup = GameState::setup(Settings::default());
        for d in Difficulty::ALL {
            assert_eq!(select_cpu_move(&setup, d, &mut rng), Err(AiError::NoLegalMoves));
        }
        let text = format!("XXX{}", ".".repeat(78));
        let won = position(Mode::Basic, &text, O, Constraint::Unconstrained);
        assert_eq!(select_cpu_move(&won, Difficulty::Hard, &mut rng), Err(AiError::NoLegalMoves));
    }

    #[test]
    fn test_easy_always_legal() {
        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut state = GameState::new(Mode::Extended);
            while state.phase() == Phase::Playing {
                let mv = select_cpu_move(&state, Difficulty::Easy, &mut rng).unwrap();
                assert!(state.legal_moves().contains(&mv), "seed {seed}: {mv}");
                state = state.apply_move(mv);
            }
            assert!(state.invariant_violations().is_empty());
        }
    }

    #[test]
    fn test_easy_is_deterministic_per_seed() {
        let state = GameState::new(Mode::Basic);
        let a = select_cpu_move(&state, Difficulty::Easy, &mut ChaCha8Rng::seed_from_u64(7));
        let b = select_cpu_move(&state, Difficulty::Easy, &mut ChaCha8Rng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn test_takes_constrained_win() {
        // X holds 36 and 37; O just played local cell 4 somewhere
        let text = format!("{}XX.......{}", ".".repeat(36), ".".repeat(36));
        let state = position(Mode::Basic, &text, X, Constraint::RestrictedTo(4));
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        for d in [Difficulty::Medium, Difficulty::Hard, Difficulty::Expert] {
            assert_eq!(select_cpu_move(&state, d, &mut rng), Ok(38), "{d}");
        }
    }

    #[test]
    fn test_win_beats_block() {
        // O threatens sub-board 1 and X can complete sub-board 2
        let text = format!("......... OO....... X.X......{}", ".".repeat(54));
        let state = position(Mode::Basic, &text, X, Constraint::Unconstrained);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        for d in [Difficulty::Medium, Difficulty::Hard, Difficulty::Expert] {
            assert_eq!(select_cpu_move(&state, d, &mut rng), Ok(19), "{d}");
        }
    }

    #[test]
    fn test_blocks_when_no_win() {
        let text = format!("......... OO.......{}", ".".repeat(63));
        let state = position(Mode::Basic, &text, X, Constraint::RestrictedTo(1));
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        for d in [Difficulty::Medium, Difficulty::Hard, Difficulty::Expert] {
            assert_eq!(select_cpu_move(&state, d, &mut rng), Ok(11), "{d}");
        }
    }

    #[test]
    fn test_free_choice_skips_claimed_sub_boards() {
        // Sub-board 0 is already X's; the only open threat is in sub-board 3
        let text = format!("XXX.O.O.. ......... ......... XX.......{}", ".".repeat(45));
        let state = position(Mode::Extended, &text, X, Constraint::Unconstrained);
        assert_eq!(reachable_sub_boards(&state), vec![1, 2, 3, 4, 5, 6, 7, 8]);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(select_cpu_move(&state, Difficulty::Medium, &mut rng), Ok(29));
    }

    #[test]
    fn test_always_takes_available_win() {
        let mut checked = 0;
        for seed in 0..30 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut state = GameState::new(Mode::Extended);
            while state.phase() == Phase::Playing {
                if has_reachable_win(&state) {
                    for d in [Difficulty::Medium, Difficulty::Hard, Difficulty::Expert] {
                        let mv = select_cpu_move(&state, d, &mut rng).unwrap();
                        assert!(completes_line(&state, mv), "seed {seed}, {d}: {mv}");
                    }
                    checked += 1;
                }
                let mv = select_cpu_move(&state, Difficulty::Easy, &mut rng).unwrap();
                state = state.apply_move(mv);
            }
        }
        assert!(checked > 0);
    }

    #[test]
    fn test_medium_breaks_ties_at_random() {
        // The center scores 3 but leaves sub-board 4's center open (-1); the
        // corner sending O back to sub-board 0 scores 2 with nothing off.
        // Other corners and edges point at empty sub-boards and score less.
        let state = GameState::new(Mode::Basic).apply_move(0).apply_move(4);
        assert_eq!(state.constraint(), Constraint::RestrictedTo(4));

        let mut picked = Vec::new();
        for seed in 0..20 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mv = select_cpu_move(&state, Difficulty::Medium, &mut rng).unwrap();
            assert!(mv == 36 || mv == 40, "seed {seed}: {mv}");
            if !picked.contains(&mv) {
                picked.push(mv);
            }
        }
        assert_eq!(picked.len(), 2);
    }

    #[test]
    fn test_expert_opening_book() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let state = GameState::new(Mode::Basic);
        assert_eq!(select_cpu_move(&state, Difficulty::Expert, &mut rng), Ok(40));
        let reply = state.apply_move(40);
        assert_eq!(select_cpu_move(&reply, Difficulty::Expert, &mut rng), Ok(36));
    }

    /// Drawn pattern everywhere; sub-board 8 reopens local cells 4 and 8
    fn near_full() -> GameState {
        let mut text = "XOXXOOOXX".repeat(8);
        text.push_str("XOXX.OOX.");
        position(Mode::Basic, &text, X, Constraint::RestrictedTo(8))
    }

    #[test]
    fn test_search_prefers_center_on_near_full_board() {
        let state = near_full();
        assert_eq!(state.legal_moves(), vec![76, 80]);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(select_cpu_move(&state, Difficulty::Hard, &mut rng), Ok(76));
        assert_eq!(select_cpu_move(&state, Difficulty::Expert, &mut rng), Ok(76));
    }

    /// O owns 9 and 10; X must answer in sub-board 4 around O's corner
    fn gift_position() -> GameState {
        let text = format!(
            "......... OO....... ......... ......... O...X....{}",
            ".".repeat(36)
        );
        position(Mode::Basic, &text, X, Constraint::RestrictedTo(4))
    }

    #[test]
    fn test_search_scores_gift_as_loss_for_root() {
        let state = gift_position();
        let h = Heuristics::default();
        let legal = state.legal_moves();
        assert_eq!(legal, vec![37, 38, 39, 41, 42, 43, 44]);

        // 37 sends O to sub-board 1, where 11 wins the game
        let scored = score_root_moves(&state, &legal, 2, &h, |_| 0);
        let gift = scored.iter().find(|&&(mv, _)| mv == 37).map(|&(_, s)| s);
        assert_eq!(gift, Some(-h.game_win));
        assert!(scored.iter().filter(|&&(mv, _)| mv != 37).all(|&(_, s)| s > -h.game_win));
    }

    #[test]
    fn test_search_avoids_sending_opponent_to_win() {
        let state = gift_position();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        for d in [Difficulty::Hard, Difficulty::Expert] {
            let mv = select_cpu_move(&state, d, &mut rng).unwrap();
            assert_ne!(mv, 37, "{d}");
            assert!(state.is_legal(mv), "{d}: {mv}");
        }
    }

    /// O threatens sub-boards 1 and 4; X's only moves in sub-board 8 send O
    /// to one of them
    fn meta_choice_position() -> GameState {
        let text = "......... OO....... ......... ......... OO....... \
                    ......... ......... ......... X.OO.XXOO";
        position(Mode::Extended, text, X, Constraint::RestrictedTo(8))
    }

    #[test]
    fn test_search_weighs_meta_lines() {
        let state = meta_choice_position();
        let legal = state.legal_moves();
        assert_eq!(legal, vec![73, 76]);

        // O winning sub-board 1 opens two meta-lines for O, sub-board 4 four
        let h = Heuristics::default();
        let scored = score_root_moves(&state, &legal, 2, &h, |_| 0);
        assert_eq!(scored, vec![(73, -205), (76, -303)]);
        assert_eq!(pick_best(&scored, |_| 0), Some(73));

        // Without the meta-line term the center bonus in sub-board 8 tips it
        let flat = Heuristics {
            meta_line_potential: 0,
            ..Heuristics::default()
        };
        let scored = score_root_moves(&state, &legal, 2, &flat, |_| 0);
        assert_eq!(scored, vec![(73, -105), (76, -103)]);
        assert_eq!(pick_best(&scored, |_| 0), Some(76));
    }

    #[test]
    fn test_pick_best_tie_breaks() {
        let center = |mv: usize| u8::from(cell_of(mv) == CENTER_CELL);
        // Equal scores: the center cell wins even though it comes later
        assert_eq!(pick_best(&[(0, 5), (1, 5), (4, 5)], center), Some(4));
        // Equal scores and ranks: the earliest move wins
        assert_eq!(pick_best(&[(1, 5), (3, 5)], center), Some(1));
        // A strictly better score always wins
        assert_eq!(pick_best(&[(4, 5), (7, 6)], center), Some(7));
        assert_eq!(pick_best(&[], center), None);
    }

    #[test]
    fn test_search_does_not_touch_state() {
        let state = GameState::new(Mode::Basic).apply_move(40);
        let before = state.clone();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let _ = select_cpu_move(&state, Difficulty::Hard, &mut rng);
        assert_eq!(state, before);
    }

    #[test]
    fn test_cpu_player_full_game() {
        let mut cpu = CpuPlayer::with_seed(Difficulty::Medium, 11);
        let (state, history) = cpu.play_game(GameState::new(Mode::Basic));
        assert_eq!(state.phase(), Phase::Finished);
        assert_eq!(history.len(), state.board().occupied_count());
        assert!(state.invariant_violations().is_empty());
    }

    #[test]
    fn test_cpu_player_reproducible() {
        let play = |seed| {
            CpuPlayer::with_seed(Difficulty::Easy, seed)
                .play_game(GameState::new(Mode::Extended))
                .1
        };
        assert_eq!(play(5), play(5));
    }

    #[test]
    fn test_cpu_player_from_config() {
        let config = AiConfig::default()
            .with_difficulty(Difficulty::Expert)
            .with_seed(9)
            .with_opening_book(OpeningBook::empty());
        let mut cpu = CpuPlayer::from_config(&config);
        assert_eq!(cpu.difficulty, Difficulty::Expert);
        assert!(cpu.opening_book.first_moves.is_empty());
        assert_eq!(cpu.choose_move(&near_full()), Ok(76));
    }
}
