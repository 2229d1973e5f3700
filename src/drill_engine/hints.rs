use crate::drill_engine::{
    models::GameMode,
    scoring::ScoringTable,
};

/// Highest hint tier; matches the three hints every problem carries.
pub const MAX_HINT_LEVEL: u8 = 3;

/// Wrong, well-formed answers needed before the full solution unlocks.
pub const SOLUTION_UNLOCK_ATTEMPTS: u32 = 2;

/// Progressive hint reveal for the current problem.
///
/// The ladder's cost is read from the scoring table keyed by the level
/// *after* the reveal. Revealing the full solution is a separate action
/// with the opposite sign: it grants points instead of charging them.
#[derive(Debug, Clone, Copy)]
pub struct HintLadder<'a> {
    scoring: &'a ScoringTable,
    cap: u8,
}

impl<'a> HintLadder<'a> {
    pub fn new(scoring: &'a ScoringTable, hint_count: usize) -> Self {
        let cap = (hint_count.min(MAX_HINT_LEVEL as usize)) as u8;
        HintLadder { scoring, cap }
    }

    pub fn cap(&self) -> u8 {
        self.cap
    }

    /// Next level, or `None` once the cap is reached.
    pub fn reveal(&self, current: u8) -> Option<u8> {
        (current < self.cap).then_some(current + 1)
    }

    /// Penalty attached to holding `level` hints, given the mode.
    pub fn cost(&self, level: u8, mode: GameMode) -> i32 {
        self.scoring.hint_penalty(level, mode)
    }

    /// Extra penalty of stepping from `current` to the next level.
    pub fn marginal_cost(&self, current: u8, mode: GameMode) -> Option<i32> {
        self.reveal(current)
            .map(|next| self.cost(next, mode) - self.cost(current, mode))
    }

    pub fn can_reveal_solution(&self, incorrect_attempts: u32) -> bool {
        incorrect_attempts >= SOLUTION_UNLOCK_ATTEMPTS
    }

    /// Consolation granted for revealing the solution.
    pub fn solution_points(&self, mode: GameMode) -> i32 {
        self.scoring.solution_points(mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reveal_stops_at_cap() {
        let table = ScoringTable::default();
        let ladder = HintLadder::new(&table, 3);
        assert_eq!(ladder.reveal(0), Some(1));
        assert_eq!(ladder.reveal(2), Some(3));
        assert_eq!(ladder.reveal(3), None);
    }

    #[test]
    fn short_hint_lists_lower_the_cap() {
        let table = ScoringTable::default();
        assert_eq!(HintLadder::new(&table, 1).cap(), 1);
        assert_eq!(HintLadder::new(&table, 9).cap(), MAX_HINT_LEVEL);
    }

    #[test]
    fn cost_is_keyed_by_resulting_level() {
        let table = ScoringTable::default();
        let ladder = HintLadder::new(&table, 3);
        let next = ladder.reveal(0).unwrap();
        assert_eq!(ladder.cost(next, GameMode::Competition), 2);
        assert_eq!(ladder.marginal_cost(2, GameMode::Competition), Some(3));
        assert_eq!(ladder.marginal_cost(3, GameMode::Competition), None);
        assert_eq!(ladder.cost(next, GameMode::Practice), 0);
    }

    #[test]
    fn solution_unlocks_after_two_misses_and_pays_out() {
        let table = ScoringTable::default();
        let ladder = HintLadder::new(&table, 3);
        assert!(!ladder.can_reveal_solution(1));
        assert!(ladder.can_reveal_solution(2));
        assert!(ladder.solution_points(GameMode::Competition) > 0);
        assert_eq!(ladder.solution_points(GameMode::Practice), 0);
    }
}
