//! Occupancy grid and row compaction

use crate::tetromino::Offset;

/// Grid dimensions
pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;

/// One row of the grid, `true` where a settled block sits
pub type Row = [bool; BOARD_WIDTH];

/// The settled blocks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Grid stored as [row][col], row 0 is the top, row increases downward
    cells: [Row; BOARD_HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [[false; BOARD_WIDTH]; BOARD_HEIGHT],
        }
    }

    /// Get the cell at (col, row)
    /// Returns None if out of bounds
    pub fn get(&self, col: i32, row: i32) -> Option<bool> {
        if col < 0 || row < 0 {
            return None;
        }
        let (col, row) = (col as usize, row as usize);
        if col >= BOARD_WIDTH || row >= BOARD_HEIGHT {
            return None;
        }
        Some(self.cells[row][col])
    }

    /// Set a cell, returns false if out of bounds
    pub fn set(&mut self, col: i32, row: i32, filled: bool) -> bool {
        if col < 0 || row < 0 {
            return false;
        }
        let (col, row) = (col as usize, row as usize);
        if col >= BOARD_WIDTH || row >= BOARD_HEIGHT {
            return false;
        }
        self.cells[row][col] = filled;
        true
    }

    /// Merge a locked piece's absolute cells into the grid.
    ///
    /// Every cell must be in bounds and currently empty; anything else means the
    /// controller let an illegal piece through and scoring can no longer be trusted.
    pub fn merge(&mut self, cells: &[Offset]) {
        for &(col, row) in cells {
            match self.get(col, row) {
                Some(false) => {
                    self.set(col, row, true);
                }
                Some(true) => panic!("merge onto settled block at ({}, {})", col, row),
                None => panic!("merge outside the grid at ({}, {})", col, row),
            }
        }
    }

    /// Whether every column of a row is filled
    pub fn is_row_full(&self, row: usize) -> bool {
        self.cells[row].iter().all(|&filled| filled)
    }

    /// Indices of full rows, ascending (top first)
    pub fn full_rows(&self) -> Vec<usize> {
        (0..BOARD_HEIGHT).filter(|&row| self.is_row_full(row)).collect()
    }

    /// Remove every full row and let the rows above fall into place.
    /// Returns the number of rows removed.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut cleared = 0;
        let mut write_row = BOARD_HEIGHT;

        // Walk bottom-up, copying surviving rows down over the gaps
        for read_row in (0..BOARD_HEIGHT).rev() {
            if self.is_row_full(read_row) {
                cleared += 1;
                continue;
            }
            write_row -= 1;
            if write_row != read_row {
                self.cells[write_row] = self.cells[read_row];
            }
        }

        for row in 0..write_row {
            self.cells[row] = [false; BOARD_WIDTH];
        }

        debug_assert!(self.full_rows().is_empty());
        cleared
    }

    /// Number of settled blocks
    pub fn filled_count(&self) -> usize {
        self.cells
            .iter()
            .map(|row| row.iter().filter(|&&filled| filled).count())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.filled_count() == 0
    }

    /// Rows from top to bottom
    pub fn rows(&self) -> &[Row; BOARD_HEIGHT] {
        &self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_row(board: &mut Board, row: i32) {
        for col in 0..BOARD_WIDTH as i32 {
            board.set(col, row, true);
        }
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert!(board.is_empty());
        assert!(board.full_rows().is_empty());
    }

    #[test]
    fn test_set_and_get() {
        let mut board = Board::new();
        assert!(board.set(5, 7, true));
        assert_eq!(board.get(5, 7), Some(true));
        assert_eq!(board.get(7, 5), Some(false));
    }

    #[test]
    fn test_out_of_bounds() {
        let mut board = Board::new();
        assert_eq!(board.get(-1, 0), None);
        assert_eq!(board.get(0, -1), None);
        assert_eq!(board.get(BOARD_WIDTH as i32, 0), None);
        assert_eq!(board.get(0, BOARD_HEIGHT as i32), None);
        assert!(!board.set(0, BOARD_HEIGHT as i32, true));
    }

    #[test]
    fn test_clear_single_line() {
        let mut board = Board::new();
        let bottom = BOARD_HEIGHT as i32 - 1;
        fill_row(&mut board, bottom);
        board.set(0, bottom - 1, true);

        assert_eq!(board.clear_full_rows(), 1);
        // The block above the cleared row drops onto the bottom
        assert_eq!(board.get(0, bottom), Some(true));
        assert_eq!(board.get(0, bottom - 1), Some(false));
        assert_eq!(board.filled_count(), 1);
    }

    #[test]
    fn test_clear_split_rows_compacts_once() {
        let mut board = Board::new();
        let bottom = BOARD_HEIGHT as i32 - 1;
        // full, partial(col 3), full, partial(col 7) from the bottom up
        fill_row(&mut board, bottom);
        board.set(3, bottom - 1, true);
        fill_row(&mut board, bottom - 2);
        board.set(7, bottom - 3, true);

        assert_eq!(board.full_rows(), vec![(bottom - 2) as usize, bottom as usize]);
        assert_eq!(board.clear_full_rows(), 2);

        assert_eq!(board.get(3, bottom), Some(true));
        assert_eq!(board.get(7, bottom - 1), Some(true));
        assert_eq!(board.filled_count(), 2);
    }

    #[test]
    fn test_clear_reduces_count_by_width_per_row() {
        let mut board = Board::new();
        for row in 16..20 {
            fill_row(&mut board, row);
        }
        board.set(4, 15, true);
        let before = board.filled_count();
        let cleared = board.clear_full_rows();
        assert_eq!(cleared, 4);
        assert_eq!(before - board.filled_count(), cleared * BOARD_WIDTH);
        assert_eq!(board.get(4, 19), Some(true));
    }

    #[test]
    fn test_merge_fills_cells() {
        let mut board = Board::new();
        board.merge(&[(0, 19), (1, 19), (0, 18), (1, 18)]);
        assert_eq!(board.filled_count(), 4);
    }

    #[test]
    #[should_panic(expected = "settled block")]
    fn test_merge_onto_block_panics() {
        let mut board = Board::new();
        board.set(2, 2, true);
        board.merge(&[(2, 2)]);
    }
}
