//! Session recording and deterministic replay
//!
//! A session is fully determined by its seed, its rules and the ordered list
//! of commands and gravity ticks applied to it.

use crate::game::{Command, Game};
use crate::rules::Rules;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One input to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Step {
    Command(Command),
    Tick,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recording {
    pub seed: u64,
    pub rules: Rules,
    pub steps: Vec<Step>,
}

impl Recording {
    pub fn new(seed: u64, rules: Rules) -> Self {
        Self {
            seed,
            rules,
            steps: Vec::new(),
        }
    }

    pub fn push(&mut self, step: Step) {
        self.steps.push(step);
    }

    /// Rebuild the session by re-applying every step
    pub fn replay(&self) -> Game {
        let mut game = Game::with_rules(self.seed, self.rules);
        for step in &self.steps {
            match *step {
                Step::Command(command) => {
                    game.apply(command);
                }
                Step::Tick => {
                    game.tick();
                }
            }
        }
        game
    }

    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string(self).map_err(|e| format!("Failed to serialize recording: {}", e))
    }

    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Failed to parse recording: {}", e))
    }

    /// Write the recording as JSON
    pub fn save(&self, path: &Path) -> Result<(), String> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .map_err(|e| format!("Failed to create {}: {}", dir.display(), e))?;
        }
        fs::write(path, self.to_json()?)
            .map_err(|e| format!("Failed to write {}: {}", path.display(), e))
    }

    pub fn load(path: &Path) -> Result<Self, String> {
        let contents = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        Self::from_json(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Phase;

    fn scripted_session(seed: u64) -> Game {
        let mut game = Game::with_seed(seed);
        game.apply(Command::Start);
        for i in 0..400 {
            match i % 7 {
                0 => game.apply(Command::MoveLeft),
                2 => game.apply(Command::Rotate),
                4 => game.apply(Command::MoveRight),
                5 => game.apply(Command::Accelerate(i % 3 == 0)),
                _ => false,
            };
            game.tick();
            if game.phase() == Phase::GameOver {
                game.apply(Command::Replay);
            }
        }
        game
    }

    #[test]
    fn test_replay_reproduces_snapshot() {
        let game = scripted_session(99);
        let replayed = game.recording().replay();
        assert_eq!(replayed.snapshot(), game.snapshot());
        assert_eq!(replayed.recording(), game.recording());
    }

    #[test]
    fn test_json_round_trip_replays() {
        let game = scripted_session(2024);
        let json = game.recording().to_json().unwrap();
        let parsed = Recording::from_json(&json).unwrap();
        assert_eq!(parsed.replay().snapshot(), game.snapshot());
    }

    #[test]
    fn test_save_and_load() {
        let game = scripted_session(5);
        let path = std::env::temp_dir()
            .join(format!("droptris-test-{}", std::process::id()))
            .join("recording.json");
        game.recording().save(&path).unwrap();
        let loaded = Recording::load(&path).unwrap();
        assert_eq!(&loaded, game.recording());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(Recording::from_json("{not json").is_err());
    }
}
