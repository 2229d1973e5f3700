//! Per-session results and the cross-session stats blob.
//!
//! The UI owns storage (localStorage or anything else); the engine only
//! produces a [`SessionSummary`] and knows how to fold it into the
//! persisted [`GameStats`] JSON shape.

use serde::{Deserialize, Serialize};

use crate::drill_engine::models::{Difficulty, GameMode};

/// Final numbers of one play-through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub difficulty: Difficulty,
    pub game_mode: GameMode,
    pub score: i32,
    pub max_score: i32,
    /// `score / max_score`, capped at 100.
    pub percent: f64,
    pub problems_completed: u32,
    pub correct: u32,
    pub best_streak: u32,
}

/// Accumulated stats per game, stored by the UI as
/// `{ totalScore, totalQuestions, totalCorrect, bestStreak, gamesPlayed }`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameStats {
    pub total_score: i64,
    pub total_questions: u32,
    pub total_correct: u32,
    pub best_streak: u32,
    pub games_played: u32,
}

impl GameStats {
    /// Fold one finished session in.
    pub fn record(&mut self, summary: &SessionSummary) {
        self.total_score += summary.score as i64;
        self.total_questions += summary.problems_completed;
        self.total_correct += summary.correct;
        self.best_streak = self.best_streak.max(summary.best_streak);
        self.games_played += 1;
    }

    /// Lifetime accuracy in percent; 0 before the first question.
    pub fn accuracy(&self) -> f64 {
        if self.total_questions == 0 {
            return 0.0;
        }
        self.total_correct as f64 / self.total_questions as f64 * 100.0
    }

    /// Parse a stored blob; anything unreadable starts fresh.
    pub fn from_json_or_default(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(stats) => stats,
            Err(e) => {
                log::warn!("discarding unreadable stats blob: {e}");
                GameStats::default()
            }
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(score: i32, completed: u32, correct: u32, best_streak: u32) -> SessionSummary {
        SessionSummary {
            difficulty: Difficulty::Easy,
            game_mode: GameMode::Competition,
            score,
            max_score: 50,
            percent: 0.0,
            problems_completed: completed,
            correct,
            best_streak,
        }
    }

    #[test]
    fn record_accumulates_and_keeps_best_streak() {
        let mut stats = GameStats::default();
        stats.record(&summary(40, 5, 4, 3));
        stats.record(&summary(12, 5, 2, 1));
        assert_eq!(
            stats,
            GameStats {
                total_score: 52,
                total_questions: 10,
                total_correct: 6,
                best_streak: 3,
                games_played: 2,
            }
        );
        assert_eq!(stats.accuracy(), 60.0);
    }

    #[test]
    fn blob_uses_camel_case_keys() {
        let mut stats = GameStats::default();
        stats.record(&summary(10, 5, 1, 1));
        let json = stats.to_json().unwrap();
        for key in ["totalScore", "totalQuestions", "totalCorrect", "bestStreak", "gamesPlayed"] {
            assert!(json.contains(key), "missing {key} in {json}");
        }
    }

    #[test]
    fn partial_or_broken_blobs_recover() {
        let stats = GameStats::from_json_or_default(r#"{ "totalScore": 99 }"#);
        assert_eq!(stats.total_score, 99);
        assert_eq!(stats.games_played, 0);
        assert_eq!(GameStats::from_json_or_default("not json"), GameStats::default());
    }
}
