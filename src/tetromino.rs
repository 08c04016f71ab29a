//! Tetromino catalog
//!
//! The 7 piece kinds and their rotation variants. Offsets are `(dx, dy)` pairs
//! relative to the piece origin: `dx` grows rightward, `dy` grows downward, and
//! every offset is non-negative. Index 0 is always the base (spawn) shape.

use serde::{Deserialize, Serialize};

/// Relative cell offset `(dx, dy)` inside a piece
pub type Offset = (i32, i32);

/// A piece is always made of four cells
pub type Shape = [Offset; 4];

/// The 7 piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    I, // long bar
    L,
    J,
    O, // square, never rotates
    T,
    S,
    Z,
}

// Base shape followed by the alternates, in rotation order.
const I_SHAPES: &[Shape] = &[
    [(0, 0), (1, 0), (2, 0), (3, 0)],
    [(1, 0), (1, 1), (1, 2), (1, 3)],
    [(0, 1), (1, 1), (2, 1), (3, 1)],
    [(2, 0), (2, 1), (2, 2), (2, 3)],
];

// L:   ..L    .L.    ...    LL.
//      LLL    .L.    LLL    .L.
//      ...    .LL    L..    .L.
const L_SHAPES: &[Shape] = &[
    [(2, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (1, 2), (2, 2)],
    [(0, 1), (1, 1), (2, 1), (0, 2)],
    [(0, 0), (1, 0), (1, 1), (1, 2)],
];

// J:   J..    .JJ    ...    .J.
//      JJJ    .J.    JJJ    .J.
//      ...    .J.    ..J    JJ.
const J_SHAPES: &[Shape] = &[
    [(0, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (2, 0), (1, 1), (1, 2)],
    [(0, 1), (1, 1), (2, 1), (2, 2)],
    [(1, 0), (1, 1), (0, 2), (1, 2)],
];

const O_SHAPES: &[Shape] = &[[(0, 0), (1, 0), (0, 1), (1, 1)]];

const T_SHAPES: &[Shape] = &[
    [(1, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (2, 1), (1, 2)],
    [(0, 1), (1, 1), (2, 1), (1, 2)],
    [(1, 0), (0, 1), (1, 1), (1, 2)],
];

// S:   .SS    .S.    ...    S..
//      SS.    .SS    .SS    SS.
//      ...    ..S    SS.    .S.
const S_SHAPES: &[Shape] = &[
    [(1, 0), (2, 0), (0, 1), (1, 1)],
    [(1, 0), (1, 1), (2, 1), (2, 2)],
    [(1, 1), (2, 1), (0, 2), (1, 2)],
    [(0, 0), (0, 1), (1, 1), (1, 2)],
];

const Z_SHAPES: &[Shape] = &[
    [(0, 0), (1, 0), (1, 1), (2, 1)],
    [(2, 0), (1, 1), (2, 1), (1, 2)],
    [(0, 1), (1, 1), (1, 2), (2, 2)],
    [(1, 0), (0, 1), (1, 1), (0, 2)],
];

impl PieceKind {
    /// All kinds, in draw order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::L,
        PieceKind::J,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
    ];

    fn shapes(&self) -> &'static [Shape] {
        match self {
            PieceKind::I => I_SHAPES,
            PieceKind::L => L_SHAPES,
            PieceKind::J => J_SHAPES,
            PieceKind::O => O_SHAPES,
            PieceKind::T => T_SHAPES,
            PieceKind::S => S_SHAPES,
            PieceKind::Z => Z_SHAPES,
        }
    }

    /// The spawn shape
    pub fn base_shape(&self) -> Shape {
        self.shapes()[0]
    }

    /// Alternate shapes reached by rotating away from the base (empty for O)
    pub fn variants(&self) -> &'static [Shape] {
        &self.shapes()[1..]
    }

    /// Number of distinct rotation states, base included
    pub fn rotation_count(&self) -> usize {
        self.shapes().len()
    }

    /// Shape at a rotation index; indices wrap, so `rotation_count()` is the base again
    pub fn shape(&self, rotation: usize) -> Shape {
        let shapes = self.shapes();
        shapes[rotation % shapes.len()]
    }

    /// Width of the base shape's bounding box
    pub fn base_width(&self) -> i32 {
        self.base_shape().iter().map(|&(dx, _)| dx).max().unwrap_or(0) + 1
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::L => "L",
            PieceKind::J => "J",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
        }
    }
}
