//! Expert opening book

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::game::GameState;

/// Ranked first moves plus replies keyed by the opponent's opening cell
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpeningBook {
    pub first_moves: Vec<usize>,
    pub responses: FxHashMap<usize, Vec<usize>>,
}

impl Default for OpeningBook {
    fn default() -> Self {
        let mut responses = FxHashMap::default();
        // Center of center: answer in a corner of the center sub-board
        responses.insert(40, vec![36, 38, 54, 56]);
        for corner in [36, 38, 54, 56] {
            responses.insert(corner, vec![40]);
        }
        responses.insert(4, vec![40, 36]);
        responses.insert(76, vec![40, 44]);

        Self {
            first_moves: vec![40, 36, 44, 4, 76],
            responses,
        }
    }
}

impl OpeningBook {
    /// An empty book never matches
    pub fn empty() -> Self {
        Self {
            first_moves: Vec::new(),
            responses: FxHashMap::default(),
        }
    }

    /// Book move for the first two plies, if one of its candidates is legal
    pub fn lookup(&self, state: &GameState, legal: &[usize]) -> Option<usize> {
        let occupied = state.board().occupied_count();

        if state.is_first_move() {
            if let Some(mv) = first_legal(&self.first_moves, legal) {
                return Some(mv);
            }
        }

        if occupied != 1 {
            return None;
        }
        let opening = state.board().cells().iter().position(Option::is_some)?;
        self.responses
            .get(&opening)
            .and_then(|replies| first_legal(replies, legal))
    }
}

fn first_legal(candidates: &[usize], legal: &[usize]) -> Option<usize> {
    candidates.iter().copied().find(|mv| legal.contains(mv))
}
