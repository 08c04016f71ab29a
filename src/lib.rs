//! DROPTRIS - falling-block puzzle engine
//!
//! The engine is a single owned [`Game`] driven by discrete [`Command`]s and a
//! gravity timer, read back through [`Snapshot`]s. It does no rendering,
//! input handling or persistence; the `droptris` binary supplies those.
//!
//! ```
//! use droptris::{Command, Game, Phase};
//! use std::time::Duration;
//!
//! let mut game = Game::with_seed(7);
//! game.apply(Command::Start);
//! game.apply(Command::MoveLeft);
//! game.advance(Duration::from_millis(600));
//! assert_eq!(game.snapshot().phase, Phase::Playing);
//! ```

pub mod bag;
pub mod board;
pub mod collision;
pub mod game;
pub mod piece;
pub mod record;
pub mod rules;
pub mod scheduler;
pub mod score;
pub mod snapshot;
pub mod tetromino;

pub use board::{Board, BOARD_HEIGHT, BOARD_WIDTH};
pub use game::{Command, Game, GameEvent, Phase};
pub use piece::Piece;
pub use record::{Recording, Step};
pub use rules::Rules;
pub use score::Score;
pub use snapshot::{ActiveSnapshot, Snapshot};
pub use tetromino::PieceKind;
