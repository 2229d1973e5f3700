//! Core drill engine: problem generation, answer checking, scoring and the
//! session state machine.
//!
//! ## Module overview
//!
//! | Module         | Purpose |
//! |----------------|---------|
//! | `models`       | Shared types: difficulty, modes, problem kinds, `Given`, `Problem`, `ScoreEvent` |
//! | `chemistry`    | Closed-form formulas and the default solute / weak-acid tables |
//! | `sampler`      | Bounded, rounded parameter draws from an injected RNG |
//! | `catalog`      | Which problem kinds each difficulty may draw |
//! | `helpers`      | Number formatting and the shared problem builder used by topics |
//! | `topics`       | One generator per problem family (dilution, molarity, mixing, buffer) |
//! | `generator`    | Entry point `generate()` with degenerate-draw resampling |
//! | `validator`    | Input parsing, tolerance check, error-band feedback |
//! | `scoring`      | Points table and per-answer `ScoreEvent` |
//! | `hints`        | Three-tier hint ladder and solution-reveal gating |
//! | `timer`        | Countdown with single live handle, `Clock` abstraction |
//! | `achievements` | Ordered rule table and the per-session tracker |
//! | `config`       | `EngineConfig`, JSON loading and validation |
//! | `stats`        | Session summary and the persisted cross-session stats blob |
//! | `session`      | `Session` state machine and `dispatch` |

pub mod achievements;
pub mod catalog;
pub mod chemistry;
pub mod config;
pub mod generator;
pub mod helpers;
pub mod hints;
pub mod models;
pub mod sampler;
pub mod scoring;
pub mod session;
pub mod stats;
pub mod timer;
pub mod topics;
pub mod validator;

pub use config::{ConfigError, EngineConfig};
pub use generator::{generate, GenerateError, LookupTables};
pub use models::{Difficulty, GameMode, Given, Problem, ProblemKind, ScoreEvent};
pub use session::{
    reset_session, start_session, Action, Outcome, Phase, Session, SessionError, SessionState,
    SubmitOutcome,
};
pub use stats::{GameStats, SessionSummary};
pub use validator::{check_answer, validate, ValidationError};
