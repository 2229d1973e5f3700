//! Point arithmetic for answered problems.
//!
//! Scoring never touches session state: [`ScoringTable::score`] maps its
//! inputs to a [`ScoreEvent`] and the caller applies `total`.

use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize};

use crate::drill_engine::models::{Difficulty, GameMode, ScoreEvent};

/// One value per difficulty tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerTier {
    pub easy: u32,
    pub medium: u32,
    pub hard: u32,
}

impl PerTier {
    pub fn get(&self, difficulty: Difficulty) -> u32 {
        match difficulty {
            Difficulty::Easy   => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard   => self.hard,
        }
    }
}

/// A [`PerTier`] as written in config JSON: any tier may be left out.
#[derive(Debug, Deserialize)]
struct PerTierOverride {
    easy: Option<u32>,
    medium: Option<u32>,
    hard: Option<u32>,
}

impl PerTierOverride {
    fn over(self, defaults: PerTier) -> PerTier {
        PerTier {
            easy: self.easy.unwrap_or(defaults.easy),
            medium: self.medium.unwrap_or(defaults.medium),
            hard: self.hard.unwrap_or(defaults.hard),
        }
    }
}

fn base_points_over_defaults<'de, D: Deserializer<'de>>(de: D) -> Result<PerTier, D::Error> {
    Ok(PerTierOverride::deserialize(de)?.over(ScoringTable::default_base_points()))
}

fn problems_over_defaults<'de, D: Deserializer<'de>>(de: D) -> Result<PerTier, D::Error> {
    Ok(PerTierOverride::deserialize(de)?.over(ScoringTable::default_problems_per_session()))
}

/// Awarded when more than `above_secs` remain on the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeedStep {
    pub above_secs: u32,
    pub points: u32,
}

/// One-shot bonus when the streak reaches exactly `streak`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakMilestone {
    pub streak: u32,
    pub points: u32,
}

/// Everything [`ScoringTable::score`] needs about one correct answer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreInput {
    pub difficulty: Difficulty,
    pub hint_level: u8,
    pub game_mode: GameMode,
    pub time_remaining: Duration,
    pub timer_mode: bool,
    /// Streak including this answer.
    pub streak: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringTable {
    #[serde(default = "ScoringTable::default_base_points", deserialize_with = "base_points_over_defaults")]
    pub base_points: PerTier,
    #[serde(default = "ScoringTable::default_problems_per_session", deserialize_with = "problems_over_defaults")]
    pub problems_per_session: PerTier,
    /// Cost indexed by hint level 0..=3.
    #[serde(default = "ScoringTable::default_hint_penalty")]
    pub hint_penalty: [u32; 4],
    /// Checked top-down; first step whose threshold is exceeded wins.
    #[serde(default = "ScoringTable::default_speed_steps")]
    pub speed_steps: Vec<SpeedStep>,
    #[serde(default = "ScoringTable::default_streak_milestones")]
    pub streak_milestones: Vec<StreakMilestone>,
    /// Points granted (competition only) when the full solution is revealed.
    #[serde(default = "ScoringTable::default_solution_consolation")]
    pub solution_consolation: u32,
}

impl ScoringTable {
    const fn default_base_points() -> PerTier {
        PerTier { easy: 10, medium: 15, hard: 20 }
    }

    const fn default_problems_per_session() -> PerTier {
        PerTier { easy: 5, medium: 8, hard: 10 }
    }

    const fn default_hint_penalty() -> [u32; 4] {
        [0, 2, 4, 7]
    }

    fn default_speed_steps() -> Vec<SpeedStep> {
        vec![
            SpeedStep { above_secs: 70, points: 10 },
            SpeedStep { above_secs: 60, points: 5 },
        ]
    }

    fn default_streak_milestones() -> Vec<StreakMilestone> {
        vec![
            StreakMilestone { streak: 3, points: 5 },
            StreakMilestone { streak: 5, points: 10 },
        ]
    }

    const fn default_solution_consolation() -> u32 {
        2
    }

    pub fn base(&self, difficulty: Difficulty) -> i32 {
        self.base_points.get(difficulty) as i32
    }

    pub fn total_problems(&self, difficulty: Difficulty) -> u32 {
        self.problems_per_session.get(difficulty)
    }

    /// Hint cost for `hint_level`; always 0 in practice mode.
    pub fn hint_penalty(&self, hint_level: u8, mode: GameMode) -> i32 {
        if mode == GameMode::Practice {
            return 0;
        }
        let idx = (hint_level as usize).min(self.hint_penalty.len() - 1);
        self.hint_penalty[idx] as i32
    }

    /// Step function of the remaining time; 0 without a running timer.
    /// Sub-second remainders count: 70.5 s left is more than 70.
    pub fn speed_bonus(&self, timer_mode: bool, time_remaining: Duration) -> i32 {
        if !timer_mode {
            return 0;
        }
        self.speed_steps
            .iter()
            .find(|step| time_remaining > Duration::from_secs(step.above_secs as u64))
            .map_or(0, |step| step.points as i32)
    }

    /// Fires only at the exact milestone streaks, never in between or past them.
    pub fn streak_bonus(&self, streak: u32) -> i32 {
        self.streak_milestones
            .iter()
            .find(|m| m.streak == streak)
            .map_or(0, |m| m.points as i32)
    }

    /// Breakdown for a correct answer. Incorrect answers score [`ScoreEvent::zero`].
    pub fn score(&self, input: &ScoreInput) -> ScoreEvent {
        let base = self.base(input.difficulty);
        let hint_penalty = self.hint_penalty(input.hint_level, input.game_mode);
        let speed_bonus = self.speed_bonus(input.timer_mode, input.time_remaining);
        let streak_bonus = self.streak_bonus(input.streak);
        ScoreEvent {
            base,
            hint_penalty,
            speed_bonus,
            streak_bonus,
            total: base - hint_penalty + speed_bonus + streak_bonus,
        }
    }

    /// Points granted for revealing the full solution.
    pub fn solution_points(&self, mode: GameMode) -> i32 {
        match mode {
            GameMode::Competition => self.solution_consolation as i32,
            GameMode::Practice    => 0,
        }
    }

    /// `base × totalProblems`, the reference for completion percentage.
    pub fn max_score(&self, difficulty: Difficulty) -> i32 {
        self.base(difficulty) * self.total_problems(difficulty) as i32
    }

    /// Score as a percentage of [`max_score`](Self::max_score), capped at 100.
    pub fn completion_percent(&self, difficulty: Difficulty, score: i32) -> f64 {
        let max = self.max_score(difficulty);
        if max <= 0 {
            return 0.0;
        }
        (score.max(0) as f64 / max as f64 * 100.0).min(100.0)
    }
}

impl Default for ScoringTable {
    fn default() -> Self {
        Self {
            base_points: Self::default_base_points(),
            problems_per_session: Self::default_problems_per_session(),
            hint_penalty: Self::default_hint_penalty(),
            speed_steps: Self::default_speed_steps(),
            streak_milestones: Self::default_streak_milestones(),
            solution_consolation: Self::default_solution_consolation(),
        }
    }
}
