//! Tunable rule constants

use serde::{Deserialize, Serialize};

/// Timing and scoring rules for a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    /// Gravity period at level 0
    pub base_fall_interval_ms: u64,
    /// Gravity period while accelerating
    pub accelerated_interval_ms: u64,
    /// How much the gravity period shrinks per level gained
    pub level_step_ms: u64,
    /// Floor for the gravity period
    pub min_fall_interval_ms: u64,
    /// Lines needed per level
    pub lines_per_level: u32,
    /// Points per row descended while accelerating (0 disables)
    pub soft_drop_points: u64,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            base_fall_interval_ms: 600,
            accelerated_interval_ms: 50,
            level_step_ms: 50,
            min_fall_interval_ms: 150,
            lines_per_level: 10,
            soft_drop_points: 1,
        }
    }
}

impl Rules {
    /// Copy with every period positive and `lines_per_level` at least 1
    pub fn sanitized(mut self) -> Self {
        self.min_fall_interval_ms = self.min_fall_interval_ms.max(1);
        self.base_fall_interval_ms = self.base_fall_interval_ms.max(self.min_fall_interval_ms);
        self.accelerated_interval_ms = self.accelerated_interval_ms.max(1);
        self.lines_per_level = self.lines_per_level.max(1);
        self
    }

    /// Gravity period after `levels` level-ups
    pub fn fall_interval_for(&self, levels: u32) -> u64 {
        self.base_fall_interval_ms
            .saturating_sub(self.level_step_ms.saturating_mul(levels as u64))
            .max(self.min_fall_interval_ms)
    }
}
