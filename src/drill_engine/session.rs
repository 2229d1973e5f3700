//! The per-session state machine shared by every game.
//!
//! ```text
//! Idle ──start──▶ InProgress ──submit / timeout / reveal──▶ Feedback
//!                     ▲                                         │
//!                     └────────────── advance ──────────────────┤
//!                                                               ▼
//!                                            Complete (after the last problem)
//! ```
//!
//! A wrong but well-formed answer leaves the problem unresolved: `advance`
//! returns to the same problem with the paused countdown resumed. Correct
//! answers, timeouts and revealed solutions resolve it, and only resolved
//! problems count towards `problems_completed`. Malformed input never
//! transitions.
//!
//! [`Session`] owns its RNG, so a seeded session is fully reproducible.
//! Time only moves through [`Session::tick`] / [`Session::poll`].

use std::fmt;
use std::time::Duration;

use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::drill_engine::{
    achievements::{AchievementTracker, AchievementUnlocked},
    config::{ConfigError, EngineConfig},
    generator::{self, GenerateError},
    hints::{HintLadder, SOLUTION_UNLOCK_ATTEMPTS},
    models::{Difficulty, GameMode, Problem, ScoreEvent},
    scoring::ScoreInput,
    stats::SessionSummary,
    timer::{Clock, Countdown, CountdownTick},
    validator::{self, ErrorBand, ValidationError},
};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    /// Menu; no session running.
    Idle,
    /// Problem shown, awaiting an answer.
    InProgress,
    /// Result shown, countdown paused.
    Feedback,
    Complete,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Idle       => write!(f, "idle"),
            Phase::InProgress => write!(f, "in progress"),
            Phase::Feedback   => write!(f, "showing feedback"),
            Phase::Complete   => write!(f, "complete"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Verdict {
    Correct,
    /// Wrong but well-formed; the problem stays open for another try.
    Incorrect,
    TimedOut,
    SolutionRevealed,
}

impl Verdict {
    /// Whether the problem is finished and the session moves on.
    pub fn resolves_problem(self) -> bool {
        self != Verdict::Incorrect
    }
}

/// What the feedback panel shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub verdict: Verdict,
    pub submitted: Option<f64>,
    pub answer: f64,
    pub score_event: ScoreEvent,
    pub error_band: Option<ErrorBand>,
    pub message: String,
    pub achievement: Option<AchievementUnlocked>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub phase: Phase,
    pub difficulty: Difficulty,
    pub game_mode: GameMode,
    /// Effective timer mode; always off in practice.
    pub timer_mode: bool,
    pub current_problem: Option<Problem>,
    pub problems_completed: u32,
    pub total_problems: u32,
    pub score: i32,
    pub correct: u32,
    pub streak: u32,
    pub best_streak: u32,
    pub hint_level: u8,
    pub incorrect_attempts: u32,
    pub feedback: Option<Feedback>,
    pub countdown: Countdown,
    pub feedback_window: Countdown,
}

impl SessionState {
    pub fn idle() -> Self {
        SessionState {
            phase: Phase::Idle,
            difficulty: Difficulty::Easy,
            game_mode: GameMode::Competition,
            timer_mode: false,
            current_problem: None,
            problems_completed: 0,
            total_problems: 0,
            score: 0,
            correct: 0,
            streak: 0,
            best_streak: 0,
            hint_level: 0,
            incorrect_attempts: 0,
            feedback: None,
            countdown: Countdown::new(),
            feedback_window: Countdown::new(),
        }
    }

    /// Only meaningful with `timer_mode` on.
    pub fn time_remaining(&self) -> Duration {
        self.countdown.remaining()
    }

    /// Hints revealed so far for the current problem.
    pub fn revealed_hints(&self) -> &[String] {
        match &self.current_problem {
            Some(problem) => {
                let n = (self.hint_level as usize).min(problem.hints.len());
                &problem.hints[..n]
            }
            None => &[],
        }
    }
}

// ---------------------------------------------------------------------------
// Operation results
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
    #[error("cannot {action} while the session is {phase}")]
    InvalidPhase { action: &'static str, phase: Phase },
    #[error("the full solution unlocks after {required} wrong answers ({attempts} so far)")]
    SolutionLocked { attempts: u32, required: u32 },
    #[error(transparent)]
    Generate(#[from] GenerateError),
}

/// Result of a submitted answer.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Malformed input; still `InProgress`. `EmptyInput` carries no message.
    Rejected(ValidationError),
    Answered(AnswerReport),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnswerReport {
    pub correct: bool,
    pub score_event: ScoreEvent,
    pub achievement: Option<AchievementUnlocked>,
    pub error_band: Option<ErrorBand>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HintReveal {
    pub level: u8,
    pub text: String,
    /// Penalty the next correct answer will carry at this level.
    pub cost: i32,
    /// How much this reveal added to `cost`.
    pub extra_cost: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SolutionReveal {
    pub answer: f64,
    pub steps: Vec<String>,
    pub points: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AdvanceOutcome {
    /// Back to the same problem after a wrong answer.
    Retry,
    NextProblem,
    Complete(SessionSummary),
}

#[derive(Debug, Clone, PartialEq)]
pub enum TickEvent {
    TimedOut,
    Advanced(AdvanceOutcome),
}

/// Every input the state machine accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Start { difficulty: Difficulty, mode: GameMode, timer_mode: bool },
    Submit(String),
    RequestHint,
    RevealSolution,
    Advance,
    Tick(Duration),
    Reset,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Started,
    Submitted(SubmitOutcome),
    Hint(Option<HintReveal>),
    Solution(SolutionReveal),
    Advanced(AdvanceOutcome),
    Ticked(Option<TickEvent>),
    Reset,
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

pub struct Session<R: Rng = StdRng> {
    config: EngineConfig,
    rng: R,
    state: SessionState,
    achievements: AchievementTracker,
    last_poll: Option<Duration>,
}

impl Session<StdRng> {
    /// Seeded when `rng_seed` is given, from entropy otherwise.
    pub fn seeded(config: EngineConfig, rng_seed: Option<u64>) -> Result<Self, ConfigError> {
        let rng = match rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None       => StdRng::from_entropy(),
        };
        Session::new(config, rng)
    }
}

impl<R: Rng> Session<R> {
    /// An idle session over a validated config.
    pub fn new(config: EngineConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Session {
            config,
            rng,
            state: SessionState::idle(),
            achievements: AchievementTracker::new(),
            last_poll: None,
        })
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// The single transition entry point; the named operations below are
    /// what it routes to.
    pub fn dispatch(&mut self, action: Action) -> Result<Outcome, SessionError> {
        Ok(match action {
            Action::Start { difficulty, mode, timer_mode } => {
                self.start(difficulty, mode, timer_mode)?;
                Outcome::Started
            }
            Action::Submit(raw)    => Outcome::Submitted(self.submit_answer(&raw)?),
            Action::RequestHint    => Outcome::Hint(self.request_hint()?),
            Action::RevealSolution => Outcome::Solution(self.reveal_solution()?),
            Action::Advance        => Outcome::Advanced(self.advance()?),
            Action::Tick(dt)       => Outcome::Ticked(self.tick(dt)?),
            Action::Reset => {
                self.reset();
                Outcome::Reset
            }
        })
    }

    fn expect_phase(&self, action: &'static str, phase: Phase) -> Result<(), SessionError> {
        if self.state.phase == phase {
            Ok(())
        } else {
            Err(SessionError::InvalidPhase { action, phase: self.state.phase })
        }
    }

    fn next_problem(&mut self) -> Result<Problem, GenerateError> {
        generator::generate_within(
            self.state.difficulty,
            &self.config.catalog,
            &self.config.tables,
            self.config.validation.ceiling,
            &mut self.rng,
        )
    }

    /// Show `problem` with a clean hint ladder and a fresh countdown.
    fn present(&mut self, problem: Problem) {
        log::debug!("presenting {} ({}/{})", problem.id, self.state.problems_completed + 1, self.state.total_problems);
        self.state.current_problem = Some(problem);
        self.state.hint_level = 0;
        self.state.incorrect_attempts = 0;
        self.state.feedback = None;
        if self.state.timer_mode {
            self.state.countdown.start(self.config.timer.time_limit());
        } else {
            self.state.countdown.cancel();
        }
        self.state.phase = Phase::InProgress;
    }

    /// Idle → InProgress.
    pub fn start(&mut self, difficulty: Difficulty, mode: GameMode, timer_mode: bool) -> Result<&SessionState, SessionError> {
        self.expect_phase("start", Phase::Idle)?;

        let mut state = SessionState::idle();
        state.difficulty = difficulty;
        state.game_mode = mode;
        state.timer_mode = timer_mode && mode == GameMode::Competition;
        state.total_problems = self.config.scoring.total_problems(difficulty);
        self.state = state;
        self.achievements.clear();

        let problem = match self.next_problem() {
            Ok(problem) => problem,
            Err(e) => {
                self.state = SessionState::idle();
                return Err(e.into());
            }
        };
        log::info!(
            "session started: {difficulty}, {mode}, timer {}, {} problems",
            if self.state.timer_mode { "on" } else { "off" },
            self.state.total_problems
        );
        self.present(problem);
        Ok(&self.state)
    }

    fn enter_feedback(&mut self, feedback: Feedback) {
        if feedback.verdict.resolves_problem() {
            self.state.problems_completed += 1;
        }
        self.state.countdown.pause();
        self.state.feedback_window.start(self.config.timer.feedback_delay());
        self.state.feedback = Some(feedback);
        self.state.phase = Phase::Feedback;
    }

    /// InProgress → Feedback on a well-formed answer; no transition otherwise.
    pub fn submit_answer(&mut self, raw: &str) -> Result<SubmitOutcome, SessionError> {
        self.expect_phase("submit an answer", Phase::InProgress)?;

        let value = match validator::validate_with(raw, &self.config.validation) {
            Ok(value) => value,
            Err(e) => {
                log::debug!("rejected input {raw:?}: {e:?}");
                return Ok(SubmitOutcome::Rejected(e));
            }
        };

        let Some(problem) = &self.state.current_problem else {
            return Err(SessionError::InvalidPhase { action: "submit an answer", phase: self.state.phase });
        };
        let (answer, kind) = (problem.answer, problem.kind());
        let correct = validator::check_answer_with(value, answer, &self.config.validation);

        let report = if correct {
            self.state.streak += 1;
            self.state.best_streak = self.state.best_streak.max(self.state.streak);
            self.state.correct += 1;
            self.state.incorrect_attempts = 0;

            let score_event = self.config.scoring.score(&ScoreInput {
                difficulty: self.state.difficulty,
                hint_level: self.state.hint_level,
                game_mode: self.state.game_mode,
                time_remaining: self.state.countdown.remaining(),
                timer_mode: self.state.timer_mode,
                streak: self.state.streak,
            });
            self.state.score = (self.state.score + score_event.total).max(0);
            let achievement = self.achievements.observe(&self.config.achievements, self.state.streak, kind);

            AnswerReport { correct, score_event, achievement, error_band: None }
        } else {
            self.state.streak = 0;
            self.state.incorrect_attempts += 1;
            let band = validator::contextual_feedback(value, answer);
            AnswerReport { correct, score_event: ScoreEvent::zero(), achievement: None, error_band: Some(band) }
        };

        let message = match report.error_band {
            Some(band) => band.message().to_string(),
            None => format!("Correct! +{} points", report.score_event.total),
        };
        self.enter_feedback(Feedback {
            verdict: if correct { Verdict::Correct } else { Verdict::Incorrect },
            submitted: Some(value),
            answer,
            score_event: report.score_event,
            error_band: report.error_band,
            message,
            achievement: report.achievement.clone(),
        });
        Ok(SubmitOutcome::Answered(report))
    }

    /// Reveal the next hint tier; `None` once all are showing.
    pub fn request_hint(&mut self) -> Result<Option<HintReveal>, SessionError> {
        self.expect_phase("request a hint", Phase::InProgress)?;
        let Some(problem) = &self.state.current_problem else { return Ok(None) };

        let ladder = HintLadder::new(&self.config.scoring, problem.hints.len());
        let mode = self.state.game_mode;
        let (Some(level), Some(extra_cost)) = (
            ladder.reveal(self.state.hint_level),
            ladder.marginal_cost(self.state.hint_level, mode),
        ) else {
            return Ok(None);
        };
        let text = problem.hints[level as usize - 1].clone();
        let cost = ladder.cost(level, mode);
        self.state.hint_level = level;
        Ok(Some(HintReveal { level, text, cost, extra_cost }))
    }

    /// Show the full worked solution. Gated on wrong attempts; grants the
    /// consolation points instead of charging a penalty, and resolves the
    /// problem.
    pub fn reveal_solution(&mut self) -> Result<SolutionReveal, SessionError> {
        self.expect_phase("reveal the solution", Phase::InProgress)?;
        let Some(problem) = &self.state.current_problem else {
            return Err(SessionError::InvalidPhase { action: "reveal the solution", phase: self.state.phase });
        };

        let ladder = HintLadder::new(&self.config.scoring, problem.hints.len());
        if !ladder.can_reveal_solution(self.state.incorrect_attempts) {
            return Err(SessionError::SolutionLocked {
                attempts: self.state.incorrect_attempts,
                required: SOLUTION_UNLOCK_ATTEMPTS,
            });
        }

        let points = ladder.solution_points(self.state.game_mode);
        let reveal = SolutionReveal {
            answer: problem.answer,
            steps: problem.hints.clone(),
            points,
        };
        self.state.hint_level = ladder.cap();
        self.state.streak = 0;
        self.state.score = (self.state.score + points).max(0);

        self.enter_feedback(Feedback {
            verdict: Verdict::SolutionRevealed,
            submitted: None,
            answer: reveal.answer,
            score_event: ScoreEvent { total: points, ..ScoreEvent::zero() },
            error_band: None,
            message: reveal.steps.join("\n"),
            achievement: None,
        });
        Ok(reveal)
    }

    /// InProgress → Feedback when the countdown runs out. Counts as an
    /// incorrect answer with no score change.
    fn time_out(&mut self) {
        let answer = self.state.current_problem.as_ref().map_or(0.0, |p| p.answer);
        self.state.streak = 0;
        self.state.incorrect_attempts += 1;
        log::debug!("problem timed out");
        self.enter_feedback(Feedback {
            verdict: Verdict::TimedOut,
            submitted: None,
            answer,
            score_event: ScoreEvent::zero(),
            error_band: None,
            message: "Time's up!".to_string(),
            achievement: None,
        });
    }

    /// Feedback → InProgress (retry or next problem) or Complete.
    pub fn advance(&mut self) -> Result<AdvanceOutcome, SessionError> {
        self.expect_phase("advance", Phase::Feedback)?;
        self.state.feedback_window.cancel();

        let resolved = self.state.feedback.as_ref().map_or(true, |f| f.verdict.resolves_problem());
        if !resolved {
            self.state.feedback = None;
            if self.state.timer_mode {
                self.state.countdown.resume();
            }
            self.state.phase = Phase::InProgress;
            return Ok(AdvanceOutcome::Retry);
        }

        if self.state.problems_completed >= self.state.total_problems {
            self.state.countdown.cancel();
            self.state.phase = Phase::Complete;
            let summary = self.summary();
            log::info!(
                "session complete: {} / {} points ({:.0}%), best streak {}",
                summary.score, summary.max_score, summary.percent, summary.best_streak
            );
            return Ok(AdvanceOutcome::Complete(summary));
        }

        let problem = self.next_problem()?;
        self.present(problem);
        Ok(AdvanceOutcome::NextProblem)
    }

    /// Back to Idle from anywhere. Cancels every timer.
    pub fn reset(&mut self) -> &SessionState {
        self.state.countdown.cancel();
        self.state.feedback_window.cancel();
        self.state = SessionState::idle();
        self.achievements.clear();
        self.last_poll = None;
        log::debug!("session reset");
        &self.state
    }

    /// Advance time by `dt`: expires the problem countdown, or ends the
    /// feedback window and moves on.
    pub fn tick(&mut self, dt: Duration) -> Result<Option<TickEvent>, SessionError> {
        match self.state.phase {
            Phase::InProgress => match self.state.countdown.tick(dt) {
                CountdownTick::Expired => {
                    self.time_out();
                    Ok(Some(TickEvent::TimedOut))
                }
                CountdownTick::Running(left) => {
                    log::trace!("{:.1}s left", left.as_secs_f64());
                    Ok(None)
                }
                CountdownTick::Idle => Ok(None),
            },
            Phase::Feedback => match self.state.feedback_window.tick(dt) {
                CountdownTick::Expired => Ok(Some(TickEvent::Advanced(self.advance()?))),
                _ => Ok(None),
            },
            Phase::Idle | Phase::Complete => Ok(None),
        }
    }

    /// [`tick`](Self::tick) by the time elapsed on `clock` since the last poll.
    pub fn poll(&mut self, clock: &impl Clock) -> Result<Option<TickEvent>, SessionError> {
        let now = clock.now();
        let dt = self.last_poll.map_or(Duration::ZERO, |last| now.saturating_sub(last));
        self.last_poll = Some(now);
        self.tick(dt)
    }

    pub fn summary(&self) -> SessionSummary {
        let scoring = &self.config.scoring;
        let difficulty = self.state.difficulty;
        SessionSummary {
            difficulty,
            game_mode: self.state.game_mode,
            score: self.state.score,
            max_score: scoring.max_score(difficulty),
            percent: scoring.completion_percent(difficulty, self.state.score),
            problems_completed: self.state.problems_completed,
            correct: self.state.correct,
            best_streak: self.state.best_streak,
        }
    }
}

/// Build a session and start it in one step.
pub fn start_session(
    config: EngineConfig,
    difficulty: Difficulty,
    mode: GameMode,
    timer_mode: bool,
    rng_seed: Option<u64>,
) -> Result<Session<StdRng>, StartError> {
    let mut session = Session::seeded(config, rng_seed)?;
    session.start(difficulty, mode, timer_mode)?;
    Ok(session)
}

/// Return any session to Idle.
pub fn reset_session<R: Rng>(session: &mut Session<R>) -> &SessionState {
    session.reset()
}

#[derive(Debug, Error)]
pub enum StartError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Session(#[from] SessionError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drill_engine::{catalog::ProblemCatalog, models::ProblemKind};

    const SEC: Duration = Duration::from_secs(1);

    fn session(kind: ProblemKind, seed: u64) -> Session {
        let config = EngineConfig { catalog: ProblemCatalog::only(kind), ..EngineConfig::default() };
        Session::seeded(config, Some(seed)).unwrap()
    }

    fn answer_text(s: &Session) -> String {
        s.state().current_problem.as_ref().unwrap().answer.to_string()
    }

    #[test]
    fn operations_outside_their_phase_are_rejected() {
        let mut s = session(ProblemKind::Dilution, 1);
        assert!(matches!(
            s.submit_answer("1"),
            Err(SessionError::InvalidPhase { phase: Phase::Idle, .. })
        ));
        assert!(s.advance().is_err());
        s.start(Difficulty::Easy, GameMode::Competition, false).unwrap();
        assert!(s.start(Difficulty::Easy, GameMode::Competition, false).is_err());
    }

    #[test]
    fn malformed_input_never_transitions() {
        let mut s = session(ProblemKind::Dilution, 2);
        s.start(Difficulty::Easy, GameMode::Competition, false).unwrap();
        for raw in ["", "abc", "-1", "5000"] {
            let outcome = s.submit_answer(raw).unwrap();
            assert!(matches!(outcome, SubmitOutcome::Rejected(_)));
            assert_eq!(s.phase(), Phase::InProgress);
        }
        assert_eq!(s.state().incorrect_attempts, 0);
    }

    #[test]
    fn wrong_answer_retries_same_problem() {
        let mut s = session(ProblemKind::Mixing, 3);
        s.start(Difficulty::Medium, GameMode::Competition, true).unwrap();
        let id = s.state().current_problem.as_ref().unwrap().id.clone();

        s.tick(SEC * 10).unwrap();
        let outcome = s.submit_answer("999").unwrap();
        let SubmitOutcome::Answered(report) = outcome else { panic!("expected an answer") };
        assert!(!report.correct);
        assert_eq!(report.score_event, ScoreEvent::zero());
        assert_eq!(s.phase(), Phase::Feedback);
        assert!(!s.state().countdown.is_running());
        assert_eq!(s.state().problems_completed, 0);

        assert_eq!(s.advance().unwrap(), AdvanceOutcome::Retry);
        assert_eq!(s.state().current_problem.as_ref().unwrap().id, id);
        assert!(s.state().countdown.is_running());
        assert_eq!(s.state().time_remaining(), SEC * 80);
    }

    #[test]
    fn hints_stop_at_cap_and_price_the_answer() {
        let mut s = session(ProblemKind::Dilution, 4);
        s.start(Difficulty::Easy, GameMode::Competition, false).unwrap();
        let reveals: Vec<HintReveal> = (0..5).filter_map(|_| s.request_hint().unwrap()).collect();
        let levels: Vec<u8> = reveals.iter().map(|h| h.level).collect();
        let extra: Vec<i32> = reveals.iter().map(|h| h.extra_cost).collect();
        assert_eq!(levels, vec![1, 2, 3]);
        assert_eq!(extra, vec![2, 2, 3]);
        assert_eq!(reveals[2].cost, 7);
        assert_eq!(s.state().revealed_hints().len(), 3);

        let answer = answer_text(&s);
        let SubmitOutcome::Answered(report) = s.submit_answer(&answer).unwrap() else { panic!() };
        assert_eq!(report.score_event.hint_penalty, 7);
        assert_eq!(report.score_event.total, 3);
    }

    #[test]
    fn solution_is_gated_and_pays_consolation() {
        let mut s = session(ProblemKind::Molarity, 5);
        s.start(Difficulty::Easy, GameMode::Competition, false).unwrap();
        assert_eq!(
            s.reveal_solution().unwrap_err(),
            SessionError::SolutionLocked { attempts: 0, required: 2 }
        );

        for _ in 0..2 {
            s.submit_answer("999").unwrap();
            s.advance().unwrap();
        }
        let reveal = s.reveal_solution().unwrap();
        assert_eq!(reveal.points, 2);
        assert_eq!(reveal.steps.len(), 3);
        assert_eq!(s.state().score, 2);
        let feedback = s.state().feedback.as_ref().unwrap();
        assert_eq!(feedback.verdict, Verdict::SolutionRevealed);
        assert_eq!(feedback.score_event.total, 2);
        assert_eq!(s.state().problems_completed, 1);
        assert_eq!(s.advance().unwrap(), AdvanceOutcome::NextProblem);
        assert_eq!(s.state().incorrect_attempts, 0);
        assert_eq!(s.state().hint_level, 0);
    }

    #[test]
    fn half_seconds_left_still_count_for_speed_bonus() {
        let mut s = session(ProblemKind::Dilution, 3);
        s.start(Difficulty::Easy, GameMode::Competition, true).unwrap();
        s.tick(Duration::from_millis(19_500)).unwrap();
        assert_eq!(s.state().time_remaining(), Duration::from_millis(70_500));

        let answer = answer_text(&s);
        let SubmitOutcome::Answered(report) = s.submit_answer(&answer).unwrap() else { panic!() };
        assert_eq!(report.score_event.speed_bonus, 10);
    }

    #[test]
    fn countdown_expiry_times_out_without_points() {
        let mut s = session(ProblemKind::Dilution, 6);
        s.start(Difficulty::Easy, GameMode::Competition, true).unwrap();
        s.submit_answer("999").unwrap();
        s.advance().unwrap();
        assert_eq!(s.tick(SEC * 89).unwrap(), None);
        assert_eq!(s.tick(SEC).unwrap(), Some(TickEvent::TimedOut));
        assert_eq!(s.phase(), Phase::Feedback);
        assert_eq!(s.state().score, 0);
        assert_eq!(s.state().streak, 0);
        assert_eq!(s.state().incorrect_attempts, 2);
        assert_eq!(s.state().problems_completed, 1);
    }

    #[test]
    fn feedback_window_auto_advances() {
        let mut s = session(ProblemKind::Dilution, 7);
        s.start(Difficulty::Easy, GameMode::Practice, false).unwrap();
        let answer = answer_text(&s);
        s.submit_answer(&answer).unwrap();
        assert_eq!(s.tick(Duration::from_millis(1999)).unwrap(), None);
        assert_eq!(
            s.tick(Duration::from_millis(1)).unwrap(),
            Some(TickEvent::Advanced(AdvanceOutcome::NextProblem))
        );
        assert_eq!(s.phase(), Phase::InProgress);
    }

    #[test]
    fn practice_mode_forces_timer_off() {
        let mut s = session(ProblemKind::Dilution, 8);
        s.start(Difficulty::Hard, GameMode::Practice, true).unwrap();
        assert!(!s.state().timer_mode);
        assert!(!s.state().countdown.is_running());
        assert_eq!(s.tick(SEC * 500).unwrap(), None);
        assert_eq!(s.phase(), Phase::InProgress);
    }

    #[test]
    fn poll_uses_clock_deltas() {
        use crate::drill_engine::timer::ManualClock;
        let clock = ManualClock::new();
        let mut s = session(ProblemKind::Dilution, 9);
        s.start(Difficulty::Easy, GameMode::Competition, true).unwrap();
        s.poll(&clock).unwrap();
        clock.advance(SEC * 30);
        s.poll(&clock).unwrap();
        assert_eq!(s.state().time_remaining(), SEC * 60);
        clock.advance(SEC * 60);
        assert_eq!(s.poll(&clock).unwrap(), Some(TickEvent::TimedOut));
    }

    #[test]
    fn reset_returns_to_idle_and_stops_timers() {
        let mut s = session(ProblemKind::Dilution, 10);
        s.start(Difficulty::Easy, GameMode::Competition, true).unwrap();
        let state = s.reset();
        assert_eq!(state.phase, Phase::Idle);
        assert!(!state.countdown.is_running());
        assert!(state.current_problem.is_none());
        assert!(s.start(Difficulty::Medium, GameMode::Competition, true).is_ok());
    }

    #[test]
    fn dispatch_routes_actions() {
        let mut s = session(ProblemKind::Dilution, 11);
        let started = s
            .dispatch(Action::Start { difficulty: Difficulty::Easy, mode: GameMode::Competition, timer_mode: false })
            .unwrap();
        assert_eq!(started, Outcome::Started);
        assert!(matches!(s.dispatch(Action::RequestHint).unwrap(), Outcome::Hint(Some(_))));
        assert!(matches!(
            s.dispatch(Action::Submit(String::new())).unwrap(),
            Outcome::Submitted(SubmitOutcome::Rejected(ValidationError::EmptyInput))
        ));
        assert_eq!(s.dispatch(Action::Reset).unwrap(), Outcome::Reset);
        assert_eq!(s.phase(), Phase::Idle);
    }
}
