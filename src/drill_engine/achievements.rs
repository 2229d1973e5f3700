use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::drill_engine::models::ProblemKind;

/// Predicate over `(streak, problem kind)` evaluated on a correct answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "when", rename_all = "camelCase")]
pub enum Trigger {
    StreakEquals { streak: u32 },
    StreakAtLeast { streak: u32 },
    KindSolved { kind: ProblemKind },
}

impl Trigger {
    pub fn matches(self, streak: u32, kind: ProblemKind) -> bool {
        match self {
            Trigger::StreakEquals { streak: n } => streak == n,
            Trigger::StreakAtLeast { streak: n } => streak >= n,
            Trigger::KindSolved { kind: k } => kind == k,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementRule {
    pub id: String,
    pub title: String,
    pub trigger: Trigger,
}

fn rule(id: &str, title: &str, trigger: Trigger) -> AchievementRule {
    AchievementRule { id: id.to_string(), title: title.to_string(), trigger }
}

/// Strongest badges first so a weaker one never shadows them.
pub fn default_rules() -> Vec<AchievementRule> {
    vec![
        rule("perfect_ten",    "Perfect Ten",    Trigger::StreakAtLeast { streak: 10 }),
        rule("hot_streak",     "Hot Streak",     Trigger::StreakEquals { streak: 5 }),
        rule("on_a_roll",      "On a Roll",      Trigger::StreakEquals { streak: 3 }),
        rule("buffer_builder", "Buffer Builder", Trigger::KindSolved { kind: ProblemKind::BufferPh }),
        rule("mix_master",     "Mix Master",     Trigger::KindSolved { kind: ProblemKind::Mixing }),
        rule("first_dilution", "First Dilution", Trigger::KindSolved { kind: ProblemKind::Dilution }),
    ]
}

/// First matching rule, top-down. Stateless.
pub fn evaluate<'a>(rules: &'a [AchievementRule], streak: u32, kind: ProblemKind) -> Option<&'a AchievementRule> {
    rules.iter().find(|r| r.trigger.matches(streak, kind))
}

/// Notification token for the UI; display and dismissal are the UI's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementUnlocked {
    pub id: String,
    pub title: String,
}

/// Per-session view of the rule table that never reports the same badge twice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AchievementTracker {
    shown: HashSet<String>,
}

impl AchievementTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Like [`evaluate`], skipping rules already shown this session.
    pub fn observe(&mut self, rules: &[AchievementRule], streak: u32, kind: ProblemKind) -> Option<AchievementUnlocked> {
        let hit = rules
            .iter()
            .filter(|r| !self.shown.contains(&r.id))
            .find(|r| r.trigger.matches(streak, kind))?;
        self.shown.insert(hit.id.clone());
        log::info!("achievement unlocked: {}", hit.id);
        Some(AchievementUnlocked { id: hit.id.clone(), title: hit.title.clone() })
    }

    pub fn has_shown(&self, id: &str) -> bool {
        self.shown.contains(id)
    }

    pub fn clear(&mut self) {
        self.shown.clear();
    }
}
