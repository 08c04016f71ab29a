//! Active falling piece logic

use crate::board::{Board, BOARD_WIDTH};
use crate::collision::{bounds_shift, fits, hits_settled};
use crate::tetromino::{Offset, PieceKind};
use serde::{Deserialize, Serialize};

/// Horizontal direction for a shift
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    fn delta(self) -> i32 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }
}

/// An active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    /// Index into the kind's rotation list, 0 = base shape
    pub rotation: usize,
    /// Grid position of the shape's (0, 0) offset
    pub col: i32,
    pub row: i32,
}

impl Piece {
    /// Create a piece at the spawn origin: horizontally centered, top row
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: 0,
            col: (BOARD_WIDTH as i32 - kind.base_width()) / 2,
            row: 0,
        }
    }

    /// Place a new piece at the spawn origin.
    ///
    /// The piece comes back either way; `Err` carries a piece that overlaps
    /// the stack, which is the game-over condition.
    pub fn try_spawn(kind: PieceKind, board: &Board) -> Result<Self, Self> {
        let piece = Self::new(kind);
        if fits(board, &piece.cells()) {
            Ok(piece)
        } else {
            Err(piece)
        }
    }

    /// Absolute (col, row) positions of all 4 blocks
    pub fn cells(&self) -> [Offset; 4] {
        self.cells_at(self.rotation, self.col, self.row)
    }

    fn cells_at(&self, rotation: usize, col: i32, row: i32) -> [Offset; 4] {
        self.kind
            .shape(rotation)
            .map(|(dx, dy)| (col + dx, row + dy))
    }

    /// Topmost occupied row
    pub fn top_row(&self) -> i32 {
        self.cells().iter().map(|&(_, row)| row).min().unwrap_or(self.row)
    }

    /// Shift one column, returns true if successful
    pub fn try_move(&mut self, direction: Direction, board: &Board) -> bool {
        let col = self.col + direction.delta();
        if fits(board, &self.cells_at(self.rotation, col, self.row)) {
            self.col = col;
            true
        } else {
            false
        }
    }

    pub fn move_left(&mut self, board: &Board) -> bool {
        self.try_move(Direction::Left, board)
    }

    pub fn move_right(&mut self, board: &Board) -> bool {
        self.try_move(Direction::Right, board)
    }

    /// Advance to the next rotation variant.
    ///
    /// A settled block in the way rejects the rotation outright. Overflowing the
    /// grid edges is cured by a single nudge of the origin just far enough to
    /// bring the shape back inside, provided the nudged position is also clear.
    pub fn try_rotate(&mut self, board: &Board) -> bool {
        let rotation = (self.rotation + 1) % self.kind.rotation_count();
        let rotated = self.cells_at(rotation, self.col, self.row);

        if hits_settled(board, &rotated) {
            return false;
        }

        let Some((dcol, drow)) = bounds_shift(&rotated) else {
            return false;
        };

        let (col, row) = (self.col + dcol, self.row + drow);
        if !fits(board, &self.cells_at(rotation, col, row)) {
            return false;
        }

        self.rotation = rotation;
        self.col = col;
        self.row = row;
        true
    }

    /// Fall one row, returns true if successful
    pub fn tick_gravity(&mut self, board: &Board) -> bool {
        let row = self.row + 1;
        if fits(board, &self.cells_at(self.rotation, self.col, row)) {
            self.row = row;
            true
        } else {
            false
        }
    }

    /// Where the piece would come to rest if it kept falling
    pub fn landed(&self, board: &Board) -> Piece {
        let mut probe = *self;
        while probe.tick_gravity(board) {}
        probe
    }
}
