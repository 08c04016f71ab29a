//! Read-only view of a session for renderers and other collaborators

use crate::board::{Row, BOARD_HEIGHT};
use crate::game::Phase;
use crate::tetromino::{Offset, PieceKind};
use serde::{Deserialize, Serialize};

/// The falling piece as seen from outside
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: usize,
    /// Absolute (col, row) cells
    pub cells: [Offset; 4],
    /// Cells the piece would occupy if it fell as far as it can
    pub landing_cells: [Offset; 4],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: Phase,
    /// Settled blocks, row 0 at the top
    pub grid: [Row; BOARD_HEIGHT],
    pub active: Option<ActiveSnapshot>,
    pub next: PieceKind,
    pub score: u64,
    pub lines: u32,
    pub level: u32,
    pub fall_interval_ms: u64,
    pub accelerating: bool,
}

impl Snapshot {
    /// Whether an active piece covers (col, row)
    pub fn is_active_cell(&self, col: i32, row: i32) -> bool {
        self.active
            .map(|active| active.cells.contains(&(col, row)))
            .unwrap_or(false)
    }

    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string(self).map_err(|e| format!("Failed to serialize snapshot: {}", e))
    }
}
