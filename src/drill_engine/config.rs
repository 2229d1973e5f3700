//! Injectable engine configuration.
//!
//! One [`EngineConfig`] parameterizes every game built on the engine:
//! which problem kinds appear per tier, how points are computed, timer
//! lengths, answer tolerance, the caller's chemical tables and the
//! achievement rules. Every field defaults, so a JSON override only needs
//! the keys it changes.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::drill_engine::{
    achievements::{self, AchievementRule},
    catalog::ProblemCatalog,
    generator::LookupTables,
    models::Difficulty,
    scoring::ScoringTable,
    validator::ValidationSettings,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSettings {
    /// Countdown per problem when timer mode is on.
    #[serde(default = "TimerSettings::default_time_limit_secs")]
    pub time_limit_secs: u32,
    /// How long the feedback panel stays up before the next problem.
    #[serde(default = "TimerSettings::default_feedback_delay_ms")]
    pub feedback_delay_ms: u64,
}

impl TimerSettings {
    const fn default_time_limit_secs() -> u32 {
        90
    }

    const fn default_feedback_delay_ms() -> u64 {
        2000
    }

    pub fn time_limit(&self) -> Duration {
        Duration::from_secs(self.time_limit_secs as u64)
    }

    pub fn feedback_delay(&self) -> Duration {
        Duration::from_millis(self.feedback_delay_ms)
    }
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            time_limit_secs: Self::default_time_limit_secs(),
            feedback_delay_ms: Self::default_feedback_delay_ms(),
        }
    }
}

/// Errors raised when configuration invariants are violated.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("base points must strictly increase with difficulty ({lower} at {lower_tier} vs {higher} at {higher_tier})")]
    BaseNotIncreasing {
        lower_tier: Difficulty,
        lower: u32,
        higher_tier: Difficulty,
        higher: u32,
    },
    #[error("problems per session must not decrease with difficulty ({lower_tier} → {higher_tier})")]
    ProblemsDecreasing { lower_tier: Difficulty, higher_tier: Difficulty },
    #[error("{0} sessions need at least one problem")]
    NoProblems(Difficulty),
    #[error("hint penalties must not decrease with hint level")]
    HintPenaltyDecreasing,
    #[error("no problem kinds configured for {0}")]
    EmptyTier(Difficulty),
    #[error("{field} must be positive (got {value})")]
    NotPositive { field: &'static str, value: f64 },
    #[error("time limit must be at least one second")]
    ZeroTimeLimit,
    #[error("catalog uses {0} problems but the {0} table is empty")]
    MissingTable(&'static str),
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    #[serde(default)]
    pub catalog: ProblemCatalog,
    #[serde(default)]
    pub scoring: ScoringTable,
    #[serde(default)]
    pub timer: TimerSettings,
    #[serde(default)]
    pub validation: ValidationSettings,
    #[serde(default)]
    pub tables: LookupTables,
    #[serde(default = "achievements::default_rules")]
    pub achievements: Vec<AchievementRule>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            catalog: ProblemCatalog::default(),
            scoring: ScoringTable::default(),
            timer: TimerSettings::default(),
            validation: ValidationSettings::default(),
            tables: LookupTables::default(),
            achievements: achievements::default_rules(),
        }
    }
}

impl EngineConfig {
    /// Parse a (possibly partial) JSON config and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let scoring = &self.scoring;
        for pair in Difficulty::ALL.windows(2) {
            let (lo, hi) = (pair[0], pair[1]);
            let (lower, higher) = (scoring.base_points.get(lo), scoring.base_points.get(hi));
            if lower >= higher {
                return Err(ConfigError::BaseNotIncreasing {
                    lower_tier: lo,
                    lower,
                    higher_tier: hi,
                    higher,
                });
            }
            if scoring.total_problems(lo) > scoring.total_problems(hi) {
                return Err(ConfigError::ProblemsDecreasing { lower_tier: lo, higher_tier: hi });
            }
        }

        for difficulty in Difficulty::ALL {
            if scoring.total_problems(difficulty) == 0 {
                return Err(ConfigError::NoProblems(difficulty));
            }
            if self.catalog.kinds_for(difficulty).is_empty() {
                return Err(ConfigError::EmptyTier(difficulty));
            }
        }

        if scoring.hint_penalty.windows(2).any(|w| w[0] > w[1]) {
            return Err(ConfigError::HintPenaltyDecreasing);
        }

        let v = &self.validation;
        for (field, value) in [
            ("tolerance_percent", v.tolerance_percent),
            ("absolute_floor", v.absolute_floor),
            ("ceiling", v.ceiling),
        ] {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        if self.timer.time_limit_secs == 0 {
            return Err(ConfigError::ZeroTimeLimit);
        }

        if self.catalog.all_kinds().any(|k| k.needs_solutes()) && self.tables.solutes.is_empty() {
            return Err(ConfigError::MissingTable("solute"));
        }
        if self.catalog.all_kinds().any(|k| k.needs_acids()) && self.tables.acids.is_empty() {
            return Err(ConfigError::MissingTable("acid"));
        }

        Ok(())
    }
}
