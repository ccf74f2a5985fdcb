//! Game state and transitions

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::ai::Difficulty;
use crate::board::{
    cell_of, display_number, from_row_col, sub_board_cells, sub_board_of, BOARD_CELLS, BOARD_SIDE,
    GRID_SIZE,
};
use crate::error::{IndexError, MoveError, ParseNameError, SetupError};
use crate::lines::{detect_winner, master_winning_sub_boards, winning_line_for, Slots, LINES};
use crate::rules;

// ============================================================================
// CORE TYPES
// ============================================================================

/// Player mark
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::X => f.pad("X"),
            Player::O => f.pad("O"),
        }
    }
}

/// The side the computer plays in human-vs-CPU games
pub const CPU_PLAYER: Player = Player::O;

/// Win condition
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// First sub-board won ends the game
    #[default]
    Basic,
    /// Three sub-boards in a row on the meta-board end the game
    Extended,
}

impl FromStr for Mode {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "basic" => Ok(Mode::Basic),
            "extended" => Ok(Mode::Extended),
            _ => Err(ParseNameError {
                kind: "mode",
                name: s.to_string(),
                expected: "basic, extended",
            }),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Basic => f.pad("basic"),
            Mode::Extended => f.pad("extended"),
        }
    }
}

/// Who is sitting at the board
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlayerMode {
    #[default]
    HumanVsHuman,
    HumanVsCpu,
}

/// Lifecycle phase
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Setup,
    Playing,
    Finished,
}

/// Where the next move may go
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Constraint {
    Unconstrained,
    RestrictedTo(usize),
}

/// Game result summary
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Ongoing,
    Won(Player),
    Draw,
}

/// Configuration chosen before play, kept across resets
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub mode: Mode,
    pub player_mode: PlayerMode,
    pub difficulty: Difficulty,
}

impl Settings {
    pub fn with_mode(mode: Mode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }
}

// ============================================================================
// BOARD
// ============================================================================

/// The 81 cells, indexed `sub_board * 9 + cell`
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board([Option<Player>; BOARD_CELLS]);

impl Board {
    pub fn empty() -> Self {
        Self([None; BOARD_CELLS])
    }

    /// Cell contents; `None` for empty or off-board indices
    pub fn get(&self, index: usize) -> Option<Player> {
        self.0.get(index).copied().flatten()
    }

    pub fn is_empty_cell(&self, index: usize) -> bool {
        index < BOARD_CELLS && self.0[index].is_none()
    }

    pub fn cells(&self) -> &[Option<Player>; BOARD_CELLS] {
        &self.0
    }

    /// The nine cells of one sub-board
    pub fn sub_board(&self, sub_board: usize) -> Result<Slots, IndexError> {
        let cells = sub_board_cells(sub_board)?;
        let mut slots = [None; GRID_SIZE];
        slots.copy_from_slice(&self.0[cells]);
        Ok(slots)
    }

    /// Cells of a sub-board index already known to be below 9
    pub(crate) fn slots(&self, sub_board: usize) -> Slots {
        let mut slots = [None; GRID_SIZE];
        let start = sub_board * GRID_SIZE;
        slots.copy_from_slice(&self.0[start..start + GRID_SIZE]);
        slots
    }

    pub fn occupied_count(&self) -> usize {
        self.0.iter().filter(|c| c.is_some()).count()
    }

    pub fn is_full(&self) -> bool {
        self.0.iter().all(Option::is_some)
    }

    pub fn empty_cells(&self) -> impl Iterator<Item = usize> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_none())
            .map(|(i, _)| i)
    }

    pub(crate) fn place(&mut self, index: usize, player: Player) {
        self.0[index] = Some(player);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Board(\"")?;
        for cell in &self.0 {
            f.write_str(mark(*cell))?;
        }
        f.write_str("\")")
    }
}

/// Plain-text 9x9 rendering with sub-board separators
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_SIDE {
            if row > 0 && row % 3 == 0 {
                writeln!(f, "------+-------+------")?;
            }
            for col in 0..BOARD_SIDE {
                if col > 0 && col % 3 == 0 {
                    f.write_str("| ")?;
                }
                let index = from_row_col(row, col).map_err(|_| fmt::Error)?;
                write!(f, "{} ", mark(self.0[index]))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn mark(cell: Option<Player>) -> &'static str {
    match cell {
        Some(Player::X) => "X",
        Some(Player::O) => "O",
        None => ".",
    }
}

/// Board text could not be parsed
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseBoardError {
    #[error("unexpected character {0:?} (expected X, O, . or -)")]
    BadCharacter(char),
    #[error("expected 81 cells, found {0}")]
    WrongLength(usize),
}

/// Parses 81 marks in index order (`X`, `O`, `.` or `-`), ignoring whitespace
/// and `|` separators
impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = Vec::with_capacity(BOARD_CELLS);
        for ch in s.chars().filter(|c| !c.is_whitespace() && *c != '|') {
            cells.push(match ch {
                'X' | 'x' => Some(Player::X),
                'O' | 'o' => Some(Player::O),
                '.' | '-' => None,
                other => return Err(ParseBoardError::BadCharacter(other)),
            });
        }
        let cells: [Option<Player>; BOARD_CELLS] = cells
            .try_into()
            .map_err(|v: Vec<_>| ParseBoardError::WrongLength(v.len()))?;
        Ok(Board(cells))
    }
}

impl Serialize for Board {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter())
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let cells = Vec::<Option<Player>>::deserialize(deserializer)?;
        let len = cells.len();
        let cells: [Option<Player>; BOARD_CELLS] = cells.try_into().map_err(|_| {
            serde::de::Error::invalid_length(len, &"exactly 81 cells")
        })?;
        Ok(Board(cells))
    }
}

// ============================================================================
// GAME STATE
// ============================================================================

/// Immutable game snapshot; every move produces a new one
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    board: Board,
    sub_board_winners: Slots,
    constraint: Constraint,
    current_player: Player,
    first_move: bool,
    settings: Settings,
    phase: Phase,
    winner: Option<Player>,
    winning_cells: Vec<usize>,
}

impl GameState {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Fresh game ready for X's first move
    pub fn new(mode: Mode) -> Self {
        Self::blank(Settings::with_mode(mode), Phase::Playing)
    }

    /// Fresh game in the setup phase
    pub fn setup(settings: Settings) -> Self {
        Self::blank(settings, Phase::Setup)
    }

    /// Rebuild a snapshot from an arbitrary position
    ///
    /// Sub-board winners, the overall winner and the phase are derived from
    /// the board. Meant for analysis and tests; positions that cannot arise
    /// in play are accepted as given.
    pub fn from_position(
        settings: Settings,
        board: Board,
        current_player: Player,
        constraint: Constraint,
    ) -> Self {
        let mut sub_board_winners = [None; GRID_SIZE];
        for (g, slot) in sub_board_winners.iter_mut().enumerate() {
            *slot = detect_winner(&board.slots(g));
        }
        let (winner, winning_cells) = game_winner(&board, &sub_board_winners, settings.mode);
        let phase = if winner.is_some() || board.is_full() {
            Phase::Finished
        } else {
            Phase::Playing
        };
        let first_move = board.occupied_count() == 0;
        Self {
            board,
            sub_board_winners,
            constraint: if first_move {
                Constraint::Unconstrained
            } else {
                constraint
            },
            current_player,
            first_move,
            settings,
            phase,
            winner,
            winning_cells,
        }
    }

    fn blank(settings: Settings, phase: Phase) -> Self {
        Self {
            board: Board::empty(),
            sub_board_winners: [None; GRID_SIZE],
            constraint: Constraint::Unconstrained,
            current_player: Player::X,
            first_move: true,
            settings,
            phase,
            winner: None,
            winning_cells: Vec::new(),
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn sub_board_winners(&self) -> &Slots {
        &self.sub_board_winners
    }

    pub fn constraint(&self) -> Constraint {
        self.constraint
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn is_first_move(&self) -> bool {
        self.first_move
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub fn mode(&self) -> Mode {
        self.settings.mode
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    /// Global indices of the winning line(s), empty while undecided
    pub fn winning_cells(&self) -> &[usize] {
        &self.winning_cells
    }

    pub fn result(&self) -> GameResult {
        match (self.winner, self.phase) {
            (Some(player), _) => GameResult::Won(player),
            (None, Phase::Finished) => GameResult::Draw,
            _ => GameResult::Ongoing,
        }
    }

    // ========================================================================
    // MOVES
    // ========================================================================

    /// Every index the current player may take
    pub fn legal_moves(&self) -> Vec<usize> {
        rules::legal_moves(self)
    }

    pub fn is_legal(&self, index: usize) -> bool {
        rules::is_legal(self, index)
    }

    pub fn validate(&self, index: usize) -> Result<(), MoveError> {
        rules::validate(self, index)
    }

    /// Next snapshot after the current player takes `index`
    ///
    /// The move must already be validated. An illegal move is logged and the
    /// state comes back unchanged.
    pub fn apply_move(&self, index: usize) -> GameState {
        if let Err(err) = rules::validate(self, index) {
            tracing::warn!(index, %err, "ignoring illegal move");
            return self.clone();
        }

        let player = self.current_player;
        let mut board = self.board;
        board.place(index, player);

        // Only the touched sub-board can change hands
        let mut sub_board_winners = self.sub_board_winners;
        let sub_board = sub_board_of(index);
        if sub_board_winners[sub_board].is_none() {
            sub_board_winners[sub_board] = detect_winner(&board.slots(sub_board));
        }

        let (winner, winning_cells) = game_winner(&board, &sub_board_winners, self.settings.mode);
        let constraint = rules::constraint_for_target(&board, cell_of(index));
        let phase = if winner.is_some() || board.is_full() {
            Phase::Finished
        } else {
            Phase::Playing
        };

        GameState {
            board,
            sub_board_winners,
            constraint,
            current_player: player.opponent(),
            first_move: false,
            settings: self.settings,
            phase,
            winner,
            winning_cells,
        }
    }

    /// Validate, then apply
    pub fn try_apply_move(&self, index: usize) -> Result<GameState, MoveError> {
        rules::validate(self, index)?;
        Ok(self.apply_move(index))
    }

    // ========================================================================
    // SETUP AND FLOW
    // ========================================================================

    pub fn set_mode(&self, mode: Mode) -> Result<GameState, SetupError> {
        if self.phase != Phase::Setup {
            return Err(SetupError::GameInProgress);
        }
        let mut next = self.clone();
        next.settings.mode = mode;
        Ok(next)
    }

    pub fn set_player_mode(&self, player_mode: PlayerMode) -> GameState {
        let mut next = self.clone();
        next.settings.player_mode = player_mode;
        next
    }

    pub fn set_difficulty(&self, difficulty: Difficulty) -> GameState {
        let mut next = self.clone();
        next.settings.difficulty = difficulty;
        next
    }

    /// Leave setup and accept moves
    pub fn start(&self) -> Result<GameState, SetupError> {
        if self.phase != Phase::Setup {
            return Err(SetupError::AlreadyStarted);
        }
        let mut next = self.clone();
        next.phase = Phase::Playing;
        Ok(next)
    }

    /// Empty board with the same settings, ready to play
    pub fn reset_keeping_settings(&self) -> GameState {
        Self::blank(self.settings, Phase::Playing)
    }

    /// Whether the computer should move now
    pub fn is_cpu_turn(&self) -> bool {
        self.settings.player_mode == PlayerMode::HumanVsCpu
            && self.current_player == CPU_PLAYER
            && self.phase == Phase::Playing
    }

    pub fn status(&self) -> Status {
        match self.phase {
            Phase::Setup => Status::Setup,
            Phase::Finished => match self.winner {
                Some(player) => Status::Won(player),
                None => Status::Draw,
            },
            Phase::Playing if self.first_move => Status::FirstMove(self.current_player),
            Phase::Playing => match self.constraint {
                Constraint::Unconstrained => Status::FreeChoice(self.current_player),
                Constraint::RestrictedTo(g) => Status::Restricted(self.current_player, g),
            },
        }
    }

    /// Descriptions of broken snapshot invariants; empty when consistent
    pub fn invariant_violations(&self) -> Vec<String> {
        let mut problems = Vec::new();
        let occupied = self.board.occupied_count();

        if self.first_move != (occupied == 0) {
            problems.push(format!(
                "first-move flag is {} with {} occupied cells",
                self.first_move, occupied
            ));
        }
        if self.winner.is_some() && self.phase != Phase::Finished {
            problems.push(format!("winner set while phase is {:?}", self.phase));
        }
        if self.winner.is_none() && !self.winning_cells.is_empty() {
            problems.push("winning cells without a winner".to_string());
        }
        if self.phase == Phase::Finished && self.winner.is_none() && !self.board.is_full() {
            problems.push("finished without a winner on a board with empty cells".to_string());
        }
        if let Constraint::RestrictedTo(g) = self.constraint {
            if g >= GRID_SIZE {
                problems.push(format!("constraint targets sub-board {g}"));
            } else if rules::is_sub_board_full(&self.board, g) {
                problems.push(format!("constraint targets full sub-board {g}"));
            }
        }
        for chunk in self.winning_cells.chunks(3) {
            let whole_line = chunk.len() == 3 && {
                let g = sub_board_of(chunk[0]);
                let local = [cell_of(chunk[0]), cell_of(chunk[1]), cell_of(chunk[2])];
                chunk.iter().all(|&i| sub_board_of(i) == g)
                    && LINES.contains(&local)
                    && chunk.iter().all(|&i| self.board.get(i) == self.winner)
            };
            if !whole_line {
                problems.push(format!("winning cells {chunk:?} are not a single line"));
            }
        }
        for (g, recorded) in self.sub_board_winners.iter().enumerate() {
            if let Some(player) = recorded {
                if winning_line_for(&self.board.slots(g), *player).is_none() {
                    problems.push(format!("sub-board {g} credited to {player} without a line"));
                }
            }
        }
        problems
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Mode::Basic)
    }
}

/// Convenience alias matching the functional interface
pub fn new_game(mode: Mode) -> GameState {
    GameState::new(mode)
}

/// Overall winner and the cells that prove it
fn game_winner(
    board: &Board,
    sub_board_winners: &Slots,
    mode: Mode,
) -> (Option<Player>, Vec<usize>) {
    match mode {
        Mode::Basic => sub_board_winners
            .iter()
            .enumerate()
            .find_map(|(g, w)| w.map(|player| (g, player)))
            .map(|(g, player)| (Some(player), sub_board_winning_cells(board, g, player)))
            .unwrap_or_default(),
        Mode::Extended => match master_winning_sub_boards(sub_board_winners) {
            Some(grids) => {
                let player = sub_board_winners[grids[0]];
                let cells = grids
                    .iter()
                    .filter_map(|&g| sub_board_winners[g].map(|p| (g, p)))
                    .flat_map(|(g, p)| sub_board_winning_cells(board, g, p))
                    .collect();
                (player, cells)
            }
            None => (None, Vec::new()),
        },
    }
}

/// Global indices of the line that won sub-board `g` for `player`
fn sub_board_winning_cells(board: &Board, g: usize, player: Player) -> Vec<usize> {
    winning_line_for(&board.slots(g), player)
        .map(|line| line.iter().map(|&c| g * GRID_SIZE + c).collect())
        .unwrap_or_default()
}

// ============================================================================
// STATUS
// ============================================================================

/// What the game is waiting for
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Setup,
    Won(Player),
    Draw,
    FirstMove(Player),
    FreeChoice(Player),
    Restricted(Player, usize),
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Setup => write!(f, "Choose game options and start the game"),
            Status::Won(player) => write!(f, "Player {player} wins!"),
            Status::Draw => write!(f, "Game ended in a draw!"),
            Status::FirstMove(player) => {
                write!(f, "Player {player}'s turn - play anywhere on the board")
            }
            Status::FreeChoice(player) => {
                write!(f, "Player {player}'s turn - play in any sub-board with room")
            }
            Status::Restricted(player, g) => {
                let number = display_number(*g).map_err(|_| fmt::Error)?;
                write!(f, "Player {player}'s turn - play in sub-board {number}")
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use Player::{O, X};

    /// X completes the top row of sub-board 0 on move nine
    const X_TAKES_TOP_ROW: [usize; 9] = [0, 4, 37, 9, 1, 13, 38, 18, 2];

    fn play(mode: Mode, moves: &[usize]) -> GameState {
        moves.iter().fold(GameState::new(mode), |state, &mv| {
            state.try_apply_move(mv).expect("scripted move must be legal")
        })
    }

    #[test]
    fn test_new_game() {
        let state = GameState::new(Mode::Basic);
        assert_eq!(state.phase(), Phase::Playing);
        assert_eq!(state.current_player(), X);
        assert!(state.is_first_move());
        assert_eq!(state.constraint(), Constraint::Unconstrained);
        assert_eq!(state.legal_moves().len(), BOARD_CELLS);
        assert!(state.invariant_violations().is_empty());
    }

    #[test]
    fn test_basic_mode_row_win() {
        let state = play(Mode::Basic, &X_TAKES_TOP_ROW);
        assert_eq!(state.winner(), Some(X));
        assert_eq!(state.winning_cells(), &[0, 1, 2]);
        assert_eq!(state.phase(), Phase::Finished);
        assert_eq!(state.result(), GameResult::Won(X));
        assert!(state.legal_moves().is_empty());
        assert!(state.invariant_violations().is_empty());
    }

    #[test]
    fn test_basic_row_win_from_placements() {
        // X on 0, 1, 2 and O on 9, 10; O's replies ignore the sub-board rule,
        // so the position is built directly rather than replayed.
        let board: Board = "XXX...... OO....... ......... ......... ......... \
                            ......... ......... ......... ........."
            .parse()
            .unwrap();
        let state = GameState::from_position(
            Settings::with_mode(Mode::Basic),
            board,
            O,
            Constraint::RestrictedTo(2),
        );
        assert_eq!(state.winner(), Some(X));
        assert_eq!(state.winning_cells(), &[0, 1, 2]);
        assert_eq!(state.phase(), Phase::Finished);

        let after_first = GameState::new(Mode::Basic).apply_move(0);
        assert_eq!(after_first.try_apply_move(9), Err(MoveError::WrongSubBoard(0)));
    }

    #[test]
    fn test_transition_leaves_input_untouched() {
        let start = GameState::new(Mode::Basic);
        let next = start.apply_move(40);
        assert_eq!(start.board().occupied_count(), 0);
        assert_eq!(next.board().get(40), Some(X));
        assert_eq!(next.current_player(), O);
        assert!(!next.is_first_move());
        assert_eq!(next.constraint(), Constraint::RestrictedTo(4));
    }

    #[test]
    fn test_illegal_apply_returns_same_state() {
        let state = GameState::new(Mode::Basic).apply_move(40);
        // O is restricted to sub-board 4
        let same = state.apply_move(0);
        assert_eq!(same, state);
        assert_eq!(state.try_apply_move(0), Err(MoveError::WrongSubBoard(4)));
        assert_eq!(state.try_apply_move(40), Err(MoveError::CellOccupied(40)));
    }

    #[test]
    fn test_extended_mode_meta_line() {
        // X takes the top row of sub-boards 0, 1 and 2; O answers in the
        // sub-boards X points at without completing anything.
        let board: Board = "XXX OO. ...
                            XXX OO. ...
                            XXX O.. ...
                            ... ... ...
                            ... ... ...
                            O.. ... ...
                            ... ... ...
                            ... ... ...
                            ... ... ..."
            .parse()
            .unwrap();
        let settings = Settings::with_mode(Mode::Extended);
        let state = GameState::from_position(settings, board, O, Constraint::Unconstrained);
        assert_eq!(state.winner(), Some(X));
        let mut cells = state.winning_cells().to_vec();
        cells.sort_unstable();
        assert_eq!(cells, vec![0, 1, 2, 9, 10, 11, 18, 19, 20]);
        assert_eq!(state.phase(), Phase::Finished);
    }

    #[test]
    fn test_extended_mode_sub_board_win_does_not_end_game() {
        let state = play(Mode::Extended, &X_TAKES_TOP_ROW);
        assert_eq!(state.sub_board_winners()[0], Some(X));
        assert_eq!(state.winner(), None);
        assert_eq!(state.phase(), Phase::Playing);
        assert!(state.winning_cells().is_empty());
        // The winning cell is local 2
        assert_eq!(state.constraint(), Constraint::RestrictedTo(2));
    }

    #[test]
    fn test_sub_board_winner_is_monotonic() {
        // X wins sub-board 0 with its top row, then O completes the bottom row
        // of the same sub-board; the slot stays X's.
        let board: Board = "XXX ... OO.
                            ... ... ...
                            ... ... ...
                            ... ... ...
                            ... ... ...
                            ... ... ...
                            ... ... ...
                            ... ... ...
                            ... ... ..."
            .parse()
            .unwrap();
        let settings = Settings::with_mode(Mode::Extended);
        let state = GameState::from_position(settings, board, O, Constraint::RestrictedTo(0));
        assert_eq!(state.sub_board_winners()[0], Some(X));
        let next = state.apply_move(8).apply_move(72);
        assert_eq!(next.sub_board_winners()[0], Some(X));
    }

    #[test]
    fn test_draw_when_board_fills() {
        // Every sub-board holds the same drawn pattern
        let pattern = "XOXXOOOXX";
        let text: String = pattern.repeat(9);
        let mut board: Board = text.parse().unwrap();
        // Reopen one cell so the final move can fill it
        board.0[80] = None;
        let state = GameState::from_position(
            Settings::with_mode(Mode::Extended),
            board,
            X,
            Constraint::RestrictedTo(8),
        );
        assert_eq!(state.phase(), Phase::Playing);
        let done = state.apply_move(80);
        assert_eq!(done.winner(), None);
        assert_eq!(done.phase(), Phase::Finished);
        assert_eq!(done.result(), GameResult::Draw);
        assert_eq!(done.status(), Status::Draw);
    }

    #[test]
    fn test_setup_flow() {
        let state = GameState::setup(Settings::default());
        assert_eq!(state.phase(), Phase::Setup);
        assert_eq!(state.validate(40), Err(MoveError::GameNotInProgress));
        let state = state.set_mode(Mode::Extended).unwrap();
        let state = state.set_player_mode(PlayerMode::HumanVsCpu);
        let state = state.set_difficulty(Difficulty::Hard);
        let state = state.start().unwrap();
        assert_eq!(state.start(), Err(SetupError::AlreadyStarted));
        assert_eq!(state.set_mode(Mode::Basic), Err(SetupError::GameInProgress));

        let state = state.apply_move(40);
        assert!(state.is_cpu_turn());
        let reset = state.reset_keeping_settings();
        assert_eq!(reset.settings(), state.settings());
        assert_eq!(reset.mode(), Mode::Extended);
        assert_eq!(reset.phase(), Phase::Playing);
        assert!(reset.is_first_move());
        assert!(!reset.is_cpu_turn());
    }

    #[test]
    fn test_status_messages() {
        let state = GameState::new(Mode::Basic);
        assert_eq!(
            state.status().to_string(),
            "Player X's turn - play anywhere on the board"
        );
        let state = state.apply_move(40);
        assert_eq!(state.status(), Status::Restricted(O, 4));
        assert_eq!(
            state.status().to_string(),
            "Player O's turn - play in sub-board 5"
        );
        let won = play(Mode::Basic, &X_TAKES_TOP_ROW);
        assert_eq!(won.status().to_string(), "Player X wins!");
    }

    #[test]
    fn test_sub_board_access_is_range_checked() {
        let board = *GameState::new(Mode::Basic).apply_move(40).board();
        let center = board.sub_board(4).unwrap();
        assert_eq!(center[4], Some(X));
        assert_eq!(center.iter().flatten().count(), 1);
        assert_eq!(
            board.sub_board(9),
            Err(IndexError::OutOfRange { value: 9, max: 8 })
        );
    }

    #[test]
    fn test_board_display_rows() {
        let mut board = Board::empty();
        board.place(40, X);
        board.place(9, O);
        let text = board.to_string();
        let rows: Vec<&str> = text.lines().collect();
        assert_eq!(rows.len(), 11);
        // Index 9 is the top-left cell of sub-board 1, fourth column
        assert_eq!(rows[0], ". . . | O . . | . . . ");
        assert_eq!(rows[3], "------+-------+------");
        assert_eq!(rows[5], ". . . | . X . | . . . ");
    }

    #[test]
    fn test_board_parse_errors() {
        assert_eq!(
            "X".parse::<Board>(),
            Err(ParseBoardError::WrongLength(1))
        );
        assert_eq!(
            "Z".repeat(81).parse::<Board>(),
            Err(ParseBoardError::BadCharacter('Z'))
        );
    }

    #[test]
    fn test_mode_names() {
        assert_eq!("Extended".parse::<Mode>(), Ok(Mode::Extended));
        assert_eq!(Mode::Basic.to_string(), "basic");
        assert!("meta".parse::<Mode>().is_err());
    }

    #[test]
    fn test_state_json_round_trip() {
        let state = play(Mode::Basic, &[40, 36, 4]);
        let json = serde_json::to_string(&state).unwrap();
        let back: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
