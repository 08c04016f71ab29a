//! Settings persistence using TOML
//!
//! Stores settings in ~/.config/droptris/settings.toml (or platform equivalent)

use directories::ProjectDirs;
use droptris::Rules;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Front-end settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Keybindings
    pub keys: KeyBindings,
    /// Timing and scoring rules handed to the engine
    pub rules: Rules,
    /// Visual settings
    pub visual: VisualSettings,
    /// Session recording
    pub recording: RecordingSettings,
}

/// Key bindings (stored as strings for easy editing)
/// Each command can have one or more keys bound to it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub move_left: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub move_right: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub rotate: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub accelerate: Vec<String>,
    /// Start a new game, or replay after game over
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub start: Vec<String>,
    /// Pause / resume
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub pause: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys", serialize_with = "serialize_keys")]
    pub quit: Vec<String>,
}

/// Deserialize keys as either a single string or array of strings
fn deserialize_keys<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};

    struct KeysVisitor;

    impl<'de> Visitor<'de> for KeysVisitor {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a string or array of strings")
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![v.to_string()])
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: de::SeqAccess<'de>,
        {
            let mut keys = Vec::new();
            while let Some(key) = seq.next_element::<String>()? {
                keys.push(key);
            }
            Ok(keys)
        }
    }

    deserializer.deserialize_any(KeysVisitor)
}

/// Serialize keys: single key as string, multiple as array
fn serialize_keys<S>(keys: &Vec<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    use serde::ser::SerializeSeq;

    if keys.len() == 1 {
        serializer.serialize_str(&keys[0])
    } else {
        let mut seq = serializer.serialize_seq(Some(keys.len()))?;
        for key in keys {
            seq.serialize_element(key)?;
        }
        seq.end()
    }
}

/// Visual settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualSettings {
    /// Landing preview visibility
    pub show_ghost: bool,
    /// Block style: "solid", "bracket", "round"
    pub block_style: String,
}

/// Recording settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordingSettings {
    /// Save the last session's recording on exit
    pub save_last_game: bool,
    /// Fixed seed for the piece stream (random when absent)
    pub seed: Option<u64>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            move_left: vec!["Left".to_string(), "a".to_string()],
            move_right: vec!["Right".to_string(), "d".to_string()],
            rotate: vec!["Up".to_string(), "w".to_string()],
            accelerate: vec!["Down".to_string(), "s".to_string()],
            start: vec!["Enter".to_string(), "Space".to_string()],
            pause: vec!["p".to_string(), "Esc".to_string()],
            quit: vec!["q".to_string()],
        }
    }
}

impl Default for VisualSettings {
    fn default() -> Self {
        Self {
            show_ghost: true,
            block_style: "solid".to_string(),
        }
    }
}

impl Default for RecordingSettings {
    fn default() -> Self {
        Self {
            save_last_game: true,
            seed: None,
        }
    }
}

impl Settings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("com", "droptris", "droptris").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Get the settings file path
    fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("settings.toml"))
    }

    /// Load settings from the config dir. A missing file is created with defaults.
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            tracing::warn!("No config directory, using default settings");
            return Self::default();
        };

        if !path.exists() {
            let settings = Self::default();
            match settings.save_to(&path) {
                Ok(()) => tracing::info!("Wrote default settings to {}", path.display()),
                Err(e) => tracing::warn!("{}", e),
            }
            return settings;
        }

        Self::load_from(&path)
    }

    /// Load settings from a file, falling back to defaults if it is unreadable
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => Self::parse(&contents).unwrap_or_else(|e| {
                tracing::warn!("{}: {}, using defaults", path.display(), e);
                Self::default()
            }),
            Err(e) => {
                tracing::warn!("Could not read {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn parse(contents: &str) -> Result<Self, String> {
        toml::from_str(contents).map_err(|e| format!("Invalid settings: {}", e))
    }

    /// Save settings to a file
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|e| format!("Failed to create config dir: {}", e))?;
        }

        let contents =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize: {}", e))?;

        fs::write(path, contents).map_err(|e| format!("Failed to write settings: {}", e))?;

        Ok(())
    }
}

impl VisualSettings {
    /// Get the block characters based on style: (block, ghost)
    pub fn block_chars(&self) -> (&'static str, &'static str) {
        match self.block_style.as_str() {
            "bracket" => ("[]", ".."),
            "round" => ("()", ".."),
            _ => ("██", "░░"), // "solid" or default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_accept_string_or_array() {
        let settings = Settings::parse(
            r#"
            [keys]
            move_left = "h"
            rotate = ["k", "Up"]
            "#,
        )
        .unwrap();
        assert_eq!(settings.keys.move_left, vec!["h"]);
        assert_eq!(settings.keys.rotate, vec!["k", "Up"]);
        // Untouched bindings keep their defaults
        assert_eq!(settings.keys.quit, vec!["q"]);
    }

    #[test]
    fn test_rules_section() {
        let settings = Settings::parse("[rules]\nsoft_drop_points = 0\n").unwrap();
        assert_eq!(settings.rules.soft_drop_points, 0);
        assert_eq!(settings.rules.base_fall_interval_ms, 600);
    }

    #[test]
    fn test_round_trip_through_file() {
        let path = std::env::temp_dir()
            .join(format!("droptris-settings-{}", std::process::id()))
            .join("settings.toml");
        let mut settings = Settings::default();
        settings.recording.seed = Some(77);
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(&path);
        assert_eq!(loaded.recording.seed, Some(77));
        assert_eq!(loaded.keys.move_left, settings.keys.move_left);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_malformed_file_falls_back() {
        assert!(Settings::parse("keys = 3").is_err());
    }
}
