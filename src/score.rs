//! Line-clear scoring and level progression

use crate::rules::Rules;
use serde::{Deserialize, Serialize};

/// Base points per number of rows cleared at once, before the level multiplier
pub const LINE_SCORES: [u64; 5] = [0, 40, 100, 300, 1200];

/// Base points for clearing `rows` rows at once
pub fn base_score(rows: usize) -> u64 {
    match LINE_SCORES.get(rows) {
        Some(&points) => points,
        None => panic!("a single lock cannot clear {} rows", rows),
    }
}

/// Result of scoring one lock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearOutcome {
    pub rows: usize,
    pub points: u64,
    /// New level if this clear crossed a level boundary
    pub level_up: Option<u32>,
}

/// Session counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Score {
    pub points: u64,
    pub lines: u32,
    pub level: u32,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    /// Score a lock that cleared `rows` rows.
    ///
    /// Points use the level in force before the clear; `lines` and `level`
    /// are updated afterwards.
    pub fn add_clear(&mut self, rows: usize, rules: &Rules) -> ClearOutcome {
        let points = base_score(rows) * (self.level as u64 + 1);
        self.points += points;
        self.lines += rows as u32;

        let level = self.lines / rules.lines_per_level;
        let level_up = (level > self.level).then_some(level);
        self.level = level;

        ClearOutcome {
            rows,
            points,
            level_up,
        }
    }

    /// Points for rows descended while accelerating
    pub fn add_soft_drop(&mut self, rows: u32, rules: &Rules) {
        self.points += rows as u64 * rules.soft_drop_points;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_clear() {
        let mut score = Score::new();
        let outcome = score.add_clear(1, &Rules::default());
        assert_eq!(outcome.points, 40);
        assert_eq!(score.points, 40);
        assert_eq!(score.lines, 1);
        assert_eq!(outcome.level_up, None);
    }

    #[test]
    fn test_no_clear_scores_nothing() {
        let mut score = Score::new();
        let outcome = score.add_clear(0, &Rules::default());
        assert_eq!(outcome.points, 0);
        assert_eq!(score, Score::new());
    }

    #[test]
    fn test_four_rows_by_level() {
        let rules = Rules::default();
        let mut score = Score::new();
        assert_eq!(score.add_clear(4, &rules).points, 1200);

        let mut score = Score { points: 0, lines: 10, level: 1 };
        assert_eq!(score.add_clear(4, &rules).points, 2400);
    }

    #[test]
    fn test_level_up() {
        let rules = Rules::default();
        let mut score = Score::new();
        for _ in 0..9 {
            score.add_clear(1, &rules);
        }
        assert_eq!(score.level, 0);
        let outcome = score.add_clear(1, &rules);
        assert_eq!(outcome.level_up, Some(1));
        assert_eq!(score.level, score.lines / 10);
    }

    #[test]
    fn test_soft_drop_points() {
        let mut score = Score::new();
        score.add_soft_drop(3, &Rules::default());
        assert_eq!(score.points, 3);
        score.add_soft_drop(3, &Rules { soft_drop_points: 0, ..Rules::default() });
        assert_eq!(score.points, 3);
    }

    #[test]
    #[should_panic]
    fn test_five_rows_is_a_defect() {
        base_score(5);
    }
}
