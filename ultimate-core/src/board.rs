//! Board geometry: flat 0-80 indices, (sub-board, cell) pairs and 9x9 rows/columns

use serde::{Deserialize, Serialize};
use std::ops::Range;

use crate::error::IndexError;

/// Cells on the whole board
pub const BOARD_CELLS: usize = 81;

/// Sub-boards on the board, and cells in each sub-board
pub const GRID_SIZE: usize = 9;

/// Rows (and columns) of the full 9x9 board
pub const BOARD_SIDE: usize = 9;

/// Local index of a sub-board's center cell
pub const CENTER_CELL: usize = 4;

const MAX_GLOBAL: usize = BOARD_CELLS - 1;
const MAX_LOCAL: usize = GRID_SIZE - 1;

/// Position class of a local cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    Center,
    Corner,
    Edge,
}

/// Split a global index into (sub-board, local cell)
pub fn to_sub_cell(global: usize) -> Result<(usize, usize), IndexError> {
    check(global, MAX_GLOBAL)?;
    Ok((global / GRID_SIZE, global % GRID_SIZE))
}

/// Join a (sub-board, local cell) pair into a global index
pub fn to_global(sub_board: usize, cell: usize) -> Result<usize, IndexError> {
    check(sub_board, MAX_LOCAL)?;
    check(cell, MAX_LOCAL)?;
    Ok(sub_board * GRID_SIZE + cell)
}

/// Classify a local cell as center, corner or edge
pub fn classify(cell: usize) -> Result<CellKind, IndexError> {
    check(cell, MAX_LOCAL)?;
    Ok(match cell {
        CENTER_CELL => CellKind::Center,
        0 | 2 | 6 | 8 => CellKind::Corner,
        _ => CellKind::Edge,
    })
}

/// Row and column of a global index on the 9x9 board
pub fn to_row_col(global: usize) -> Result<(usize, usize), IndexError> {
    let (sub_board, cell) = to_sub_cell(global)?;
    let row = (sub_board / 3) * 3 + cell / 3;
    let col = (sub_board % 3) * 3 + cell % 3;
    Ok((row, col))
}

/// Global index of a 9x9 row and column
pub fn from_row_col(row: usize, col: usize) -> Result<usize, IndexError> {
    check(row, BOARD_SIDE - 1)?;
    check(col, BOARD_SIDE - 1)?;
    let sub_board = (row / 3) * 3 + col / 3;
    let cell = (row % 3) * 3 + col % 3;
    to_global(sub_board, cell)
}

/// 1-based number shown to players for a local cell or sub-board
pub fn display_number(index: usize) -> Result<usize, IndexError> {
    check(index, MAX_LOCAL)?;
    Ok(index + 1)
}

/// Inverse of [`display_number`]
pub fn from_display_number(number: usize) -> Result<usize, IndexError> {
    if !(1..=GRID_SIZE).contains(&number) {
        return Err(IndexError::OutOfRange {
            value: number,
            max: GRID_SIZE,
        });
    }
    Ok(number - 1)
}

/// Global indices covered by a sub-board
pub fn sub_board_cells(sub_board: usize) -> Result<Range<usize>, IndexError> {
    check(sub_board, MAX_LOCAL)?;
    let start = sub_board * GRID_SIZE;
    Ok(start..start + GRID_SIZE)
}

/// Sub-board of an index already known to be on the board
pub(crate) fn sub_board_of(global: usize) -> usize {
    global / GRID_SIZE
}

/// Local cell of an index already known to be on the board
pub(crate) fn cell_of(global: usize) -> usize {
    global % GRID_SIZE
}

fn check(value: usize, max: usize) -> Result<(), IndexError> {
    if value > max {
        Err(IndexError::OutOfRange { value, max })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_sub_cell_round_trip() {
        for i in 0..BOARD_CELLS {
            let (g, c) = to_sub_cell(i).unwrap();
            assert_eq!(to_global(g, c).unwrap(), i);
        }
        for g in 0..GRID_SIZE {
            for c in 0..GRID_SIZE {
                assert_eq!(to_sub_cell(to_global(g, c).unwrap()).unwrap(), (g, c));
            }
        }
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert_eq!(
            to_sub_cell(81),
            Err(IndexError::OutOfRange { value: 81, max: 80 })
        );
        assert!(to_global(9, 0).is_err());
        assert!(to_global(0, 9).is_err());
        assert!(classify(9).is_err());
        assert!(from_row_col(9, 0).is_err());
        assert!(from_display_number(0).is_err());
        assert!(from_display_number(10).is_err());
        assert!(sub_board_cells(9).is_err());
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify(4).unwrap(), CellKind::Center);
        for c in [0, 2, 6, 8] {
            assert_eq!(classify(c).unwrap(), CellKind::Corner);
        }
        for c in [1, 3, 5, 7] {
            assert_eq!(classify(c).unwrap(), CellKind::Edge);
        }
    }

    #[test]
    fn test_row_col() {
        assert_eq!(to_row_col(0).unwrap(), (0, 0));
        // Sub-board 1, cell 0 sits at the top of the fourth column
        assert_eq!(to_row_col(9).unwrap(), (0, 3));
        // Center of center
        assert_eq!(to_row_col(40).unwrap(), (4, 4));
        assert_eq!(to_row_col(80).unwrap(), (8, 8));
        assert_eq!(from_row_col(4, 4).unwrap(), 40);
    }

    #[test]
    fn test_display_numbers() {
        assert_eq!(display_number(0).unwrap(), 1);
        assert_eq!(display_number(8).unwrap(), 9);
        assert_eq!(from_display_number(9).unwrap(), 8);
    }

    #[test]
    fn test_sub_board_cells() {
        assert_eq!(sub_board_cells(2).unwrap(), 18..27);
    }

    proptest! {
        #[test]
        fn prop_row_col_round_trip(i in 0usize..BOARD_CELLS) {
            let (row, col) = to_row_col(i).unwrap();
            prop_assert!(row < BOARD_SIDE && col < BOARD_SIDE);
            prop_assert_eq!(from_row_col(row, col).unwrap(), i);
        }

        #[test]
        fn prop_sub_cell_matches_helpers(i in 0usize..BOARD_CELLS) {
            prop_assert_eq!(to_sub_cell(i).unwrap(), (sub_board_of(i), cell_of(i)));
        }
    }
}
