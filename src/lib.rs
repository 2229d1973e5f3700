//! # chem_drill_gen
//!
//! An offline, deterministic engine for solution-chemistry drill games.
//!
//! The engine generates numeric problems (dilution, molarity, mass from
//! molarity, mixing, buffer pH), checks typed answers within a relative
//! tolerance, scores them, reveals hints on a fixed ladder and drives a
//! per-session state machine. It has no UI: a front end renders the JSON
//! snapshot from [`ui_adapter::to_view_state`] and feeds user actions back.
//!
//! ## How it works
//!
//! 1. Build an [`EngineConfig`] (defaults, or partial JSON through
//!    [`EngineConfig::from_json`]).
//! 2. Call [`start_session`] with a difficulty, mode, timer flag and an
//!    optional RNG seed.
//! 3. Feed actions in: `submit_answer`, `request_hint`, `reveal_solution`,
//!    `advance`, and `tick`/`poll` for time.
//! 4. When the session completes, fold its [`SessionSummary`] into the
//!    stored [`GameStats`].
//!
//! ## Key features
//!
//! - **Deterministic**: the same seed reproduces the same problems, ids
//!   and hint text.
//! - **Analytic answers**: every `Problem::answer` is recomputed from its
//!   `given` by a closed-form formula, never stored separately.
//! - **Tolerant checking**: 2 % relative tolerance with a 0.01 absolute
//!   floor, decimal commas accepted.
//!
//! ## Quick start
//!
//! ```rust
//! use chem_drill_gen::{
//!     generate, start_session, Difficulty, EngineConfig, GameMode, Phase, SubmitOutcome,
//! };
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! // One-off problem:
//! let config = EngineConfig::default();
//! let mut rng = StdRng::seed_from_u64(42);
//! let problem = generate(Difficulty::Medium, &config.catalog, &config.tables, &mut rng).unwrap();
//! println!("{} → {} {}", problem.question, problem.answer, problem.unit);
//!
//! // A whole session:
//! let mut session = start_session(config, Difficulty::Easy, GameMode::Competition, true, Some(7)).unwrap();
//! let answer = session.state().current_problem.as_ref().unwrap().answer;
//! let outcome = session.submit_answer(&answer.to_string()).unwrap();
//! assert!(matches!(outcome, SubmitOutcome::Answered(ref r) if r.correct));
//! assert_eq!(session.phase(), Phase::Feedback);
//! ```

pub mod drill_engine;
pub mod ui_adapter;

// Convenience re-exports so callers can use `chem_drill_gen::start_session`
// directly without reaching into `drill_engine::`.
pub use drill_engine::{
    check_answer, generate, reset_session, start_session, validate, Action, ConfigError,
    Difficulty, EngineConfig, GameMode, GameStats, GenerateError, Given, LookupTables, Outcome,
    Phase, Problem, ProblemKind, ScoreEvent, Session, SessionError, SessionState,
    SessionSummary, SubmitOutcome, ValidationError,
};

#[cfg(test)]
mod tests;
