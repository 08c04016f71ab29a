//! Session state machine and command dispatch
//!
//! A [`Game`] owns the grid, the falling piece and the session counters. It is
//! mutated only through [`Game::apply`] (discrete commands) and [`Game::tick`]
//! (one gravity step, normally driven by [`Game::advance`]). Each call runs to
//! completion, so commands and ticks never interleave.

use crate::bag::Bag;
use crate::board::Board;
use crate::piece::{Direction, Piece};
use crate::record::{Recording, Step};
use crate::rules::Rules;
use crate::scheduler::Scheduler;
use crate::score::Score;
use crate::snapshot::{ActiveSnapshot, Snapshot};
use crate::tetromino::PieceKind;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    NotStarted,
    Playing,
    Paused,
    GameOver,
}

/// Inbound commands. Any command issued in a phase that does not accept it is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    MoveLeft,
    MoveRight,
    Rotate,
    Accelerate(bool),
    Start,
    Pause,
    Resume,
    Replay,
}

/// Notable things that happened since the last [`Game::take_events`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Started,
    Paused,
    Resumed,
    PieceLocked { kind: PieceKind },
    LinesCleared { count: usize, points: u64 },
    LevelUp { level: u32, fall_interval_ms: u64 },
    GameOver { score: u64, lines: u32, level: u32 },
}

/// The main game struct
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    /// Current falling piece
    current: Piece,
    next: PieceKind,
    bag: Bag,
    score: Score,
    phase: Phase,
    rules: Rules,
    fall_interval_ms: u64,
    /// Soft drop held
    accelerating: bool,
    scheduler: Scheduler,
    events: Vec<GameEvent>,
    recording: Recording,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Create a game with a random seed and default rules
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_rules(seed, Rules::default())
    }

    pub fn with_rules(seed: u64, rules: Rules) -> Self {
        let rules = rules.sanitized();
        let mut bag = Bag::with_seed(seed);
        let first = bag.next();
        let next = bag.next();
        let board = Board::new();

        Self {
            current: Piece::new(first),
            board,
            next,
            bag,
            score: Score::new(),
            phase: Phase::NotStarted,
            rules,
            fall_interval_ms: rules.fall_interval_for(0),
            accelerating: false,
            scheduler: Scheduler::new(),
            events: Vec::new(),
            recording: Recording::new(seed, rules),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_piece(&self) -> &Piece {
        &self.current
    }

    pub fn next_kind(&self) -> PieceKind {
        self.next
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn fall_interval_ms(&self) -> u64 {
        self.fall_interval_ms
    }

    pub fn is_accelerating(&self) -> bool {
        self.accelerating
    }

    pub fn recording(&self) -> &Recording {
        &self.recording
    }

    /// Drain pending events
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Current gravity period
    pub fn tick_period(&self) -> Duration {
        if self.accelerating {
            Duration::from_millis(self.rules.accelerated_interval_ms)
        } else {
            Duration::from_millis(self.fall_interval_ms)
        }
    }

    /// Apply one command. Returns true if it changed anything.
    pub fn apply(&mut self, command: Command) -> bool {
        self.recording.push(Step::Command(command));

        match (self.phase, command) {
            (Phase::NotStarted, Command::Start) => {
                self.phase = Phase::Playing;
                self.scheduler.reset();
                self.events.push(GameEvent::Started);
                tracing::debug!("session started, first={:?} next={:?}", self.current.kind, self.next);
                true
            }
            (Phase::Playing, Command::Pause) => {
                self.phase = Phase::Paused;
                // Held keys are forgotten across a pause
                self.accelerating = false;
                self.scheduler.reset();
                self.events.push(GameEvent::Paused);
                tracing::debug!("paused");
                true
            }
            (Phase::Paused, Command::Resume) => {
                self.phase = Phase::Playing;
                self.scheduler.reset();
                self.events.push(GameEvent::Resumed);
                tracing::debug!("resumed");
                true
            }
            (Phase::GameOver, Command::Replay) => {
                self.reset();
                true
            }
            (Phase::Playing, Command::MoveLeft) => self.current.try_move(Direction::Left, &self.board),
            (Phase::Playing, Command::MoveRight) => self.current.try_move(Direction::Right, &self.board),
            (Phase::Playing, Command::Rotate) => self.current.try_rotate(&self.board),
            (Phase::Playing, Command::Accelerate(on)) => {
                let changed = self.accelerating != on;
                self.accelerating = on;
                changed
            }
            _ => false,
        }
    }

    /// Feed wall-clock time to the gravity timer and run every tick that falls due.
    /// Returns the number of ticks run.
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        if self.phase != Phase::Playing {
            self.scheduler.reset();
            return 0;
        }

        let period = self.tick_period();
        if !self.scheduler.feed(elapsed, period) {
            return 0;
        }

        let mut ticks = 0;
        while self.phase == Phase::Playing && self.scheduler.is_due() {
            self.scheduler.fire();
            self.tick();
            ticks += 1;
            // A level-up re-arms the timer on the next feed
            if self.tick_period() != period {
                break;
            }
        }
        ticks
    }

    /// One gravity step: fall a row, or lock, or end the session.
    /// Returns true if the piece fell.
    pub fn tick(&mut self) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }
        self.recording.push(Step::Tick);

        if self.current.tick_gravity(&self.board) {
            if self.accelerating {
                self.score.add_soft_drop(1, &self.rules);
            }
            return true;
        }

        if self.current.top_row() > 0 {
            self.lock_piece();
        } else {
            // Stuck where it spawned: the stack has reached the top
            self.game_over();
        }
        false
    }

    /// Merge the current piece, clear rows, score, and bring in the next piece
    fn lock_piece(&mut self) {
        let piece = self.current;
        self.board.merge(&piece.cells());
        self.events.push(GameEvent::PieceLocked { kind: piece.kind });

        let rows = self.board.clear_full_rows();
        let outcome = self.score.add_clear(rows, &self.rules);
        tracing::debug!(
            "locked {:?} at ({}, {}), cleared {} for {}",
            piece.kind,
            piece.col,
            piece.row,
            rows,
            outcome.points
        );

        if rows > 0 {
            self.events.push(GameEvent::LinesCleared {
                count: rows,
                points: outcome.points,
            });
        }

        if let Some(level) = outcome.level_up {
            self.fall_interval_ms = self.rules.fall_interval_for(level);
            self.events.push(GameEvent::LevelUp {
                level,
                fall_interval_ms: self.fall_interval_ms,
            });
            tracing::debug!("level {} reached, fall interval {}ms", level, self.fall_interval_ms);
        }

        debug_assert_eq!(self.score.level, self.score.lines / self.rules.lines_per_level);

        self.spawn_next();
    }

    fn spawn_next(&mut self) {
        let kind = self.next;
        self.next = self.bag.next();

        match Piece::try_spawn(kind, &self.board) {
            Ok(piece) => {
                self.current = piece;
            }
            Err(piece) => {
                // Keep the blocked piece visible; the grid stays as it was
                self.current = piece;
                self.game_over();
            }
        }
    }

    fn game_over(&mut self) {
        self.phase = Phase::GameOver;
        self.scheduler.reset();
        self.events.push(GameEvent::GameOver {
            score: self.score.points,
            lines: self.score.lines,
            level: self.score.level,
        });
        tracing::info!(
            "game over: score={} lines={} level={}",
            self.score.points,
            self.score.lines,
            self.score.level
        );
    }

    /// Full reset for a new round; the piece stream carries on
    fn reset(&mut self) {
        self.board = Board::new();
        self.score = Score::new();
        self.fall_interval_ms = self.rules.fall_interval_for(0);
        self.accelerating = false;
        self.scheduler.reset();

        let kind = self.bag.next();
        self.next = self.bag.next();
        self.current = Piece::new(kind);

        self.phase = Phase::Playing;
        self.events.push(GameEvent::Started);
        tracing::debug!("replay started, first={:?} next={:?}", kind, self.next);
    }

    /// Immutable view for renderers
    pub fn snapshot(&self) -> Snapshot {
        let active = (self.phase != Phase::NotStarted).then(|| ActiveSnapshot {
            kind: self.current.kind,
            rotation: self.current.rotation,
            cells: self.current.cells(),
            landing_cells: self.current.landed(&self.board).cells(),
        });

        Snapshot {
            phase: self.phase,
            grid: *self.board.rows(),
            active,
            next: self.next,
            score: self.score.points,
            lines: self.score.lines,
            level: self.score.level,
            fall_interval_ms: self.fall_interval_ms,
            accelerating: self.accelerating,
        }
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    #[cfg(test)]
    pub(crate) fn set_current(&mut self, piece: Piece) {
        self.current = piece;
    }

    #[cfg(test)]
    pub(crate) fn set_next(&mut self, kind: PieceKind) {
        self.next = kind;
    }
}
