//! Collision and bounds predicates
//!
//! Pure functions over a [`Board`]; the controller calls them speculatively
//! before committing any move or rotation.

use crate::board::{Board, BOARD_HEIGHT, BOARD_WIDTH};
use crate::tetromino::Offset;

/// Whether (col, row) lies inside the grid
pub fn in_bounds(col: i32, row: i32) -> bool {
    (0..BOARD_WIDTH as i32).contains(&col) && (0..BOARD_HEIGHT as i32).contains(&row)
}

/// Whether a settled block sits at (col, row). Out-of-bounds cells are never occupied.
pub fn is_occupied(board: &Board, col: i32, row: i32) -> bool {
    board.get(col, row).unwrap_or(false)
}

/// Every cell in bounds and unoccupied
pub fn fits(board: &Board, cells: &[Offset]) -> bool {
    cells
        .iter()
        .all(|&(col, row)| in_bounds(col, row) && !is_occupied(board, col, row))
}

/// Any in-bounds cell lands on a settled block
pub fn hits_settled(board: &Board, cells: &[Offset]) -> bool {
    cells.iter().any(|&(col, row)| is_occupied(board, col, row))
}

/// Smallest `(dcol, drow)` shift that brings every cell inside the grid.
///
/// `(0, 0)` when already in bounds, `None` when the cells overflow both
/// sides of an axis and no shift can help.
pub fn bounds_shift(cells: &[Offset]) -> Option<(i32, i32)> {
    let min_col = cells.iter().map(|&(col, _)| col).min()?;
    let max_col = cells.iter().map(|&(col, _)| col).max()?;
    let min_row = cells.iter().map(|&(_, row)| row).min()?;
    let max_row = cells.iter().map(|&(_, row)| row).max()?;

    let dcol = axis_shift(min_col, max_col, BOARD_WIDTH as i32)?;
    let drow = axis_shift(min_row, max_row, BOARD_HEIGHT as i32)?;
    Some((dcol, drow))
}

fn axis_shift(min: i32, max: i32, len: i32) -> Option<i32> {
    if max - min >= len {
        None
    } else if min < 0 {
        Some(-min)
    } else if max >= len {
        Some(len - 1 - max)
    } else {
        Some(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_bounds_edges() {
        assert!(in_bounds(0, 0));
        assert!(in_bounds(9, 19));
        assert!(!in_bounds(-1, 0));
        assert!(!in_bounds(10, 0));
        assert!(!in_bounds(0, 20));
        assert!(!in_bounds(0, -1));
    }

    #[test]
    fn test_is_occupied() {
        let mut board = Board::new();
        board.set(3, 4, true);
        assert!(is_occupied(&board, 3, 4));
        assert!(!is_occupied(&board, 4, 3));
        assert!(!is_occupied(&board, -5, 4));
    }

    #[test]
    fn test_fits() {
        let mut board = Board::new();
        let cells = [(0, 0), (1, 0), (2, 0), (3, 0)];
        assert!(fits(&board, &cells));
        board.set(2, 0, true);
        assert!(!fits(&board, &cells));
        assert!(!fits(&Board::new(), &[(-1, 0), (0, 0), (1, 0), (2, 0)]));
    }

    #[test]
    fn test_hits_settled_ignores_out_of_bounds() {
        let mut board = Board::new();
        board.set(9, 5, true);
        assert!(!hits_settled(&board, &[(10, 5), (11, 5)]));
        assert!(hits_settled(&board, &[(9, 5), (10, 5)]));
    }

    #[test]
    fn test_bounds_shift() {
        assert_eq!(bounds_shift(&[(4, 4), (5, 4)]), Some((0, 0)));
        assert_eq!(bounds_shift(&[(8, 0), (9, 0), (10, 0), (11, 0)]), Some((-2, 0)));
        assert_eq!(bounds_shift(&[(-1, 0), (0, 0)]), Some((1, 0)));
        assert_eq!(bounds_shift(&[(5, 18), (5, 19), (5, 20), (5, 21)]), Some((0, -2)));
        assert_eq!(bounds_shift(&[(-1, 0), (10, 0)]), None);
    }
}
