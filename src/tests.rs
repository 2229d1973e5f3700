//! Crate-level tests for `chem_drill_gen`.
//!
//! Included from `lib.rs` under `#[cfg(test)]`.
//!
//! | Group | What is tested |
//! |-------|----------------|
//! | Determinism | Same seed → identical problems; different seeds → varied problems |
//! | Structural | Answer reproducible from `given`; id prefixes; three hints; answers inside the validator's range |
//! | Worked scenarios | Easy dilution 0.4, mixing 3.0, the 23-point answer |
//! | Session | Incorrect answers, termination, practice mode, stats folding |

use std::time::Duration;

use rand::{rngs::StdRng, SeedableRng};

use crate::drill_engine::{
    catalog::ProblemCatalog,
    session::{AdvanceOutcome, AnswerReport},
    validator::{self, ValidationSettings},
};
use crate::{
    check_answer, generate, start_session, Difficulty, EngineConfig, GameMode, GameStats, Given,
    Phase, Problem, ProblemKind, Session, SubmitOutcome,
};

// ── helpers ──────────────────────────────────────────────────────────────────

const SEEDS: [u64; 5] = [1, 42, 999, 0xDEAD_BEEF, 7];

fn draw(kind: ProblemKind, difficulty: Difficulty, seed: u64) -> Problem {
    let config = EngineConfig::default();
    let mut rng = StdRng::seed_from_u64(seed);
    generate(difficulty, &ProblemCatalog::only(kind), &config.tables, &mut rng).unwrap()
}

fn only(kind: ProblemKind) -> EngineConfig {
    EngineConfig { catalog: ProblemCatalog::only(kind), ..EngineConfig::default() }
}

fn current_answer(s: &Session) -> String {
    s.state().current_problem.as_ref().unwrap().answer.to_string()
}

fn answer(s: &mut Session, raw: &str) -> AnswerReport {
    match s.submit_answer(raw).unwrap() {
        SubmitOutcome::Answered(report) => report,
        SubmitOutcome::Rejected(e) => panic!("input {raw:?} rejected: {e:?}"),
    }
}

// ── determinism ──────────────────────────────────────────────────────────────

#[test]
fn same_seed_produces_identical_problem() {
    for kind in ProblemKind::ALL {
        for difficulty in Difficulty::ALL {
            let a = draw(kind, difficulty, 12345);
            let b = draw(kind, difficulty, 12345);
            assert_eq!(a, b, "problem mismatch for {kind:?} at {difficulty:?}");
        }
    }
}

#[test]
fn different_seeds_produce_varied_questions() {
    let mut same_count = 0usize;
    let pairs = 40u64;
    for seed in 0..pairs {
        let a = draw(ProblemKind::Mixing, Difficulty::Medium, seed);
        let b = draw(ProblemKind::Mixing, Difficulty::Medium, seed + 500);
        if a.question == b.question {
            same_count += 1;
        }
    }
    assert!(
        same_count < pairs as usize / 4,
        "Too many identical questions across different seeds ({same_count}/{pairs})"
    );
}

#[test]
fn seeded_sessions_replay_identically() {
    let a = start_session(EngineConfig::default(), Difficulty::Hard, GameMode::Competition, true, Some(77)).unwrap();
    let b = start_session(EngineConfig::default(), Difficulty::Hard, GameMode::Competition, true, Some(77)).unwrap();
    assert_eq!(a.state(), b.state());
}

#[test]
fn entropy_seed_produces_a_valid_session() {
    let s = start_session(EngineConfig::default(), Difficulty::Medium, GameMode::Practice, false, None).unwrap();
    assert_eq!(s.phase(), Phase::InProgress);
    assert!(s.state().current_problem.is_some());
}

// ── structural invariants ────────────────────────────────────────────────────

#[test]
fn answer_is_reproducible_from_given() {
    for kind in ProblemKind::ALL {
        for difficulty in Difficulty::ALL {
            for seed in SEEDS {
                let p = draw(kind, difficulty, seed);
                assert!(
                    (p.given.solve() - p.answer).abs() < 1e-6,
                    "{kind:?}/{difficulty:?}/{seed}: answer {} vs formula {}",
                    p.answer,
                    p.given.solve()
                );
            }
        }
    }
}

#[test]
fn answers_fall_inside_validator_range() {
    let settings = ValidationSettings::default();
    for kind in ProblemKind::ALL {
        for difficulty in Difficulty::ALL {
            for seed in 0..50 {
                let p = draw(kind, difficulty, seed);
                assert!(p.answer > 0.0 && p.answer < settings.ceiling, "{kind:?} answer {}", p.answer);
                assert_eq!(validator::validate(&p.answer.to_string()), Ok(p.answer));
            }
        }
    }
}

#[test]
fn problems_carry_prefix_unit_and_three_hints() {
    for kind in ProblemKind::ALL {
        let p = draw(kind, Difficulty::Hard, 3);
        assert_eq!(p.kind(), kind);
        assert!(p.id.starts_with(kind.id_prefix()), "{kind:?} id {}", p.id);
        assert_eq!(p.id.len(), kind.id_prefix().len() + 1 + 8);
        assert_eq!(p.unit, p.given.unit());
        assert_eq!(p.hints.len(), 3, "{kind:?} hints");
        assert!(p.hints.iter().all(|h| !h.is_empty()));
        assert!(!p.question.is_empty());
    }
}

#[test]
fn easy_tier_only_draws_easy_kinds() {
    let config = EngineConfig::default();
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..100 {
        let p = generate(Difficulty::Easy, &config.catalog, &config.tables, &mut rng).unwrap();
        assert!(config.catalog.easy.contains(&p.kind()), "unexpected {:?}", p.kind());
    }
}

// ── worked scenarios ─────────────────────────────────────────────────────────

#[test]
fn easy_dilution_tolerance_scenario() {
    let given = Given::Dilution { m1: 2.0, v1: 50.0, v2: 250.0 };
    let answer = given.solve();
    assert!((answer - 0.4).abs() < 1e-12);
    assert!(check_answer(0.4, answer, 2.0));
    assert!(check_answer(0.39, answer, 2.0));
    assert!(!check_answer(0.3, answer, 2.0));
}

#[test]
fn mixing_scenario() {
    let given = Given::Mixing { m1: 2.0, v1: 100.0, m2: 4.0, v2: 100.0 };
    assert!((given.solve() - 3.0).abs() < 1e-12);
}

#[test]
fn third_straight_answer_with_one_hint_scores_23() {
    let mut s = start_session(only(ProblemKind::Dilution), Difficulty::Easy, GameMode::Competition, true, Some(3)).unwrap();

    for _ in 0..2 {
        let raw = current_answer(&s);
        let report = answer(&mut s, &raw);
        assert_eq!(report.score_event.total, 20);
        assert_eq!(s.advance().unwrap(), AdvanceOutcome::NextProblem);
    }

    s.request_hint().unwrap();
    s.tick(Duration::from_secs(15)).unwrap();
    let raw = current_answer(&s);
    let report = answer(&mut s, &raw);
    assert_eq!(report.score_event.total, 23);
    assert_eq!(s.state().score, 63);
    assert_eq!(s.state().streak, 3);
}

// ── session ──────────────────────────────────────────────────────────────────

#[test]
fn incorrect_answer_keeps_score_and_resets_streak() {
    let mut s = start_session(only(ProblemKind::Molarity), Difficulty::Easy, GameMode::Competition, false, Some(8)).unwrap();
    let raw = current_answer(&s);
    answer(&mut s, &raw);
    s.advance().unwrap();
    let score = s.state().score;

    for attempt in 1..=3 {
        let report = answer(&mut s, "999");
        assert!(!report.correct);
        assert_eq!(s.state().score, score);
        assert_eq!(s.state().streak, 0);
        assert_eq!(s.state().incorrect_attempts, attempt);
        s.advance().unwrap();
    }
}

#[test]
fn session_completes_after_exactly_total_problems() {
    for difficulty in Difficulty::ALL {
        let config = EngineConfig::default();
        let total = config.scoring.total_problems(difficulty);
        let mut s = start_session(config, difficulty, GameMode::Competition, true, Some(11)).unwrap();

        let mut completed = 0;
        let summary = loop {
            let raw = current_answer(&s);
            answer(&mut s, &raw);
            completed += 1;
            match s.advance().unwrap() {
                AdvanceOutcome::NextProblem => assert!(completed < total),
                AdvanceOutcome::Complete(summary) => break summary,
                AdvanceOutcome::Retry => panic!("correct answer should not retry"),
            }
        };

        assert_eq!(completed, total, "{difficulty:?}");
        assert_eq!(s.phase(), Phase::Complete);
        assert_eq!(summary.problems_completed, total);
        assert_eq!(summary.correct, total);
        assert_eq!(summary.best_streak, total);
        assert!(summary.score > summary.max_score);
        assert_eq!(summary.percent, 100.0);
    }
}

#[test]
fn practice_mode_never_penalises_hints() {
    let mut s = start_session(only(ProblemKind::Mixing), Difficulty::Medium, GameMode::Practice, true, Some(4)).unwrap();
    while s.request_hint().unwrap().is_some() {}
    let raw = current_answer(&s);
    let report = answer(&mut s, &raw);
    assert_eq!(report.score_event.hint_penalty, 0);
    assert_eq!(report.score_event.speed_bonus, 0);
    assert_eq!(report.score_event.total, 15);
}

#[test]
fn completed_session_folds_into_stats() {
    let mut s = start_session(EngineConfig::default(), Difficulty::Easy, GameMode::Competition, false, Some(19)).unwrap();
    let summary = loop {
        let raw = current_answer(&s);
        answer(&mut s, &raw);
        if let AdvanceOutcome::Complete(summary) = s.advance().unwrap() {
            break summary;
        }
    };

    let mut stats = GameStats::from_json_or_default("");
    stats.record(&summary);
    let back = GameStats::from_json_or_default(&stats.to_json().unwrap());
    assert_eq!(back.games_played, 1);
    assert_eq!(back.total_questions, 5);
    assert_eq!(back.total_correct, 5);
    assert_eq!(back.total_score, summary.score as i64);
}
