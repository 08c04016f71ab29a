//! Key handling: maps terminal key events to engine commands
//!
//! Uses a polling-based approach for the held accelerate key that doesn't rely
//! on key release events, which are unreliable on Linux terminals.

use crate::settings::Settings;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use droptris::{Command, Phase};
use std::time::{Duration, Instant};

/// Time after which we consider a repeating key "released" if no repeat received
const KEY_TIMEOUT: Duration = Duration::from_millis(100);
/// Grace period before the terminal's auto-repeat kicks in
const REPEAT_DELAY: Duration = Duration::from_millis(550);

/// What a key press asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Command(Command),
    Quit,
}

/// Key bindings configuration - supports multiple keys per command
#[derive(Debug, Clone)]
pub struct KeyBindings {
    pub move_left: Vec<KeyCode>,
    pub move_right: Vec<KeyCode>,
    pub rotate: Vec<KeyCode>,
    pub accelerate: Vec<KeyCode>,
    pub start: Vec<KeyCode>,
    pub pause: Vec<KeyCode>,
    pub quit: Vec<KeyCode>,
}

impl KeyBindings {
    /// Parse a key string into KeyCode
    fn parse_key(s: &str) -> Option<KeyCode> {
        let code = match s.to_lowercase().as_str() {
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "space" => KeyCode::Char(' '),
            "enter" => KeyCode::Enter,
            "tab" => KeyCode::Tab,
            "esc" | "escape" => KeyCode::Esc,
            s if s.chars().count() == 1 => KeyCode::Char(s.chars().next()?),
            other => {
                tracing::warn!("Ignoring unknown key binding {:?}", other);
                return None;
            }
        };
        Some(code)
    }

    /// Parse a list of key strings into KeyCodes
    fn parse_keys(keys: &[String]) -> Vec<KeyCode> {
        keys.iter().filter_map(|s| Self::parse_key(s)).collect()
    }

    /// Create keybindings from settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            move_left: Self::parse_keys(&settings.keys.move_left),
            move_right: Self::parse_keys(&settings.keys.move_right),
            rotate: Self::parse_keys(&settings.keys.rotate),
            accelerate: Self::parse_keys(&settings.keys.accelerate),
            start: Self::parse_keys(&settings.keys.start),
            pause: Self::parse_keys(&settings.keys.pause),
            quit: Self::parse_keys(&settings.keys.quit),
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

#[derive(Debug, Clone, Copy)]
struct HeldKey {
    first_press: Instant,
    last_seen: Instant,
}

impl HeldKey {
    fn timed_out(&self, now: Instant) -> bool {
        if self.last_seen == self.first_press {
            now.duration_since(self.first_press) > REPEAT_DELAY
        } else {
            now.duration_since(self.last_seen) > KEY_TIMEOUT
        }
    }
}

/// Translates key events into commands for the current phase
pub struct InputHandler {
    bindings: KeyBindings,
    /// Accelerate key currently held
    accelerate: Option<HeldKey>,
}

impl InputHandler {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            accelerate: None,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(KeyBindings::from_settings(settings))
    }

    /// Handle a key press (or terminal repeat)
    pub fn key_down(&mut self, key: KeyEvent, phase: Phase) -> Option<Input> {
        self.key_down_at(key, phase, Instant::now())
    }

    fn key_down_at(&mut self, key: KeyEvent, phase: Phase, now: Instant) -> Option<Input> {
        // Ctrl+C always quits
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Input::Quit);
        }

        let code = normalize_key(key.code);
        let b = &self.bindings;

        if b.quit.contains(&code) {
            Some(Input::Quit)
        } else if b.start.contains(&code) {
            match phase {
                Phase::NotStarted => Some(Input::Command(Command::Start)),
                Phase::GameOver => Some(Input::Command(Command::Replay)),
                _ => None,
            }
        } else if b.pause.contains(&code) {
            match phase {
                Phase::Playing => Some(Input::Command(Command::Pause)),
                Phase::Paused => Some(Input::Command(Command::Resume)),
                _ => None,
            }
        } else if b.move_left.contains(&code) {
            Some(Input::Command(Command::MoveLeft))
        } else if b.move_right.contains(&code) {
            Some(Input::Command(Command::MoveRight))
        } else if b.rotate.contains(&code) {
            Some(Input::Command(Command::Rotate))
        } else if b.accelerate.contains(&code) {
            match &mut self.accelerate {
                Some(held) => {
                    held.last_seen = now;
                    None
                }
                None => {
                    self.accelerate = Some(HeldKey {
                        first_press: now,
                        last_seen: now,
                    });
                    Some(Input::Command(Command::Accelerate(true)))
                }
            }
        } else {
            None
        }
    }

    /// Handle a key release event (may never be called on Linux)
    pub fn key_up(&mut self, key: KeyEvent) -> Option<Input> {
        let code = normalize_key(key.code);
        if self.bindings.accelerate.contains(&code) && self.accelerate.take().is_some() {
            return Some(Input::Command(Command::Accelerate(false)));
        }
        None
    }

    /// Release the accelerate key once it stops repeating (call every frame)
    pub fn update(&mut self) -> Option<Input> {
        self.update_at(Instant::now())
    }

    fn update_at(&mut self, now: Instant) -> Option<Input> {
        match self.accelerate {
            Some(held) if held.timed_out(now) => {
                self.accelerate = None;
                Some(Input::Command(Command::Accelerate(false)))
            }
            _ => None,
        }
    }

    /// Forget held keys (pause, replay)
    pub fn clear(&mut self) {
        self.accelerate = None;
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new(KeyBindings::default())
    }
}

/// Normalize key codes for consistent handling
fn normalize_key(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}
