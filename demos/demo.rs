//! Plays one scripted session end to end.
//!
//! Run with: `cargo run --example demo`
//!
//! The session is seeded, so the output is the same on every run. It shows:
//!
//! - `start_session` with a config loaded from partial JSON.
//! - Rejected input (`""`, `"abc"`) leaving the session where it was.
//! - A wrong answer, a retry with a hint, and a correct answer.
//! - Time driven explicitly through `tick`.
//! - The final summary folded into a `GameStats` blob.

use std::time::Duration;

use chem_drill_gen::{
    drill_engine::session::AdvanceOutcome, start_session, ui_adapter::to_view_state, Difficulty,
    EngineConfig, GameMode, GameStats, SubmitOutcome,
};

const CONFIG: &str = r#"{
    "timer": { "timeLimitSecs": 60 },
    "validation": { "tolerancePercent": 2.0 }
}"#;

fn main() {
    let config = match EngineConfig::from_json(CONFIG) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("bad config: {e}");
            return;
        }
    };

    let mut session = match start_session(config, Difficulty::Medium, GameMode::Competition, true, Some(2024)) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("could not start: {e}");
            return;
        }
    };

    let mut round = 0;
    let summary = loop {
        round += 1;
        let Some(problem) = session.state().current_problem.clone() else { break None };
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        println!("  [{}]  {}  {}", problem.id, problem.kind(), problem.difficulty);
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        println!("  Q: {}", problem.question);

        for raw in ["", "abc"] {
            if let Ok(SubmitOutcome::Rejected(e)) = session.submit_answer(raw) {
                println!("  {raw:?} → rejected ({e:?}) {}", e);
            }
        }

        // Every other problem: miss once, then take a hint.
        if round % 2 == 0 {
            let wrong = format!("{}", problem.answer * 1.5);
            if let Ok(SubmitOutcome::Answered(report)) = session.submit_answer(&wrong) {
                println!("  {wrong} → {:?}", report.error_band.map(|b| b.message()));
            }
            let _ = session.advance();
            if let Ok(Some(hint)) = session.request_hint() {
                println!("  hint {} (−{}): {}", hint.level, hint.cost, hint.text);
            }
        }

        let _ = session.tick(Duration::from_secs(5 * round));
        let raw = format!("{:.3}", problem.answer);
        if let Ok(SubmitOutcome::Answered(report)) = session.submit_answer(&raw) {
            let e = report.score_event;
            println!(
                "  {raw} {} → +{} (base {}, hints −{}, speed +{}, streak +{})",
                problem.unit, e.total, e.base, e.hint_penalty, e.speed_bonus, e.streak_bonus
            );
            if let Some(badge) = report.achievement {
                println!("  🏆 {}", badge.title);
            }
        }
        println!();

        match session.advance() {
            Ok(AdvanceOutcome::Complete(summary)) => break Some(summary),
            Ok(_) => {}
            Err(e) => {
                eprintln!("{e}");
                break None;
            }
        }
    };

    println!("══ Final view ══");
    println!("{:#}", to_view_state(session.state()));

    if let Some(summary) = summary {
        println!();
        println!(
            "Score {} / {} ({:.0}%), best streak {}",
            summary.score, summary.max_score, summary.percent, summary.best_streak
        );
        let mut stats = GameStats::default();
        stats.record(&summary);
        if let Ok(json) = stats.to_json() {
            println!("stats blob: {json}");
        }
    }
}
