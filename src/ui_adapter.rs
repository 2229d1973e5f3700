use std::time::Duration;

use serde_json::{json, Value};

use crate::drill_engine::{
    models::Problem,
    session::{Feedback, Phase, SessionState},
    validator::ErrorBand,
};

/// Client-side phase key.
fn phase_str(phase: Phase) -> &'static str {
    match phase {
        Phase::Idle       => "menu",
        Phase::InProgress => "playing",
        Phase::Feedback   => "feedback",
        Phase::Complete   => "complete",
    }
}

fn band_str(band: ErrorBand) -> &'static str {
    match band {
        ErrorBand::WayOff    => "wayOff",
        ErrorBand::Far       => "far",
        ErrorBand::Close     => "close",
        ErrorBand::VeryClose => "veryClose",
    }
}

/// Whole seconds as a countdown displays them: 70.5 s left shows as 71.
fn seconds_shown(left: Duration) -> u64 {
    left.as_secs() + u64::from(left.subsec_nanos() > 0)
}

/// The problem card. The answer stays hidden until feedback.
fn problem_card(problem: &Problem, hints: &[String]) -> Value {
    json!({
        "id": problem.id,
        "kind": problem.kind().to_string(),
        "question": problem.question,
        "unit": problem.unit,
        "difficulty": problem.difficulty,
        "hints": hints,
        "totalHints": problem.hints.len(),
    })
}

fn feedback_panel(feedback: &Feedback) -> Value {
    json!({
        "verdict": feedback.verdict,
        "submitted": feedback.submitted,
        "answer": feedback.answer,
        "message": feedback.message,
        "band": feedback.error_band.map(band_str),
        "points": feedback.score_event,
        "achievement": feedback.achievement.as_ref().map(|a| json!({ "id": a.id, "title": a.title })),
    })
}

/// Snapshot of `state` as plain JSON for the UI layer.
pub fn to_view_state(state: &SessionState) -> Value {
    let problem = state
        .current_problem
        .as_ref()
        .map(|p| problem_card(p, state.revealed_hints()));

    let timer = if state.timer_mode {
        json!({
            "running": state.countdown.is_running(),
            "secondsLeft": seconds_shown(state.time_remaining()),
        })
    } else {
        Value::Null
    };

    json!({
        "phase": phase_str(state.phase),
        "difficulty": state.difficulty,
        "mode": state.game_mode,
        "progress": {
            "completed": state.problems_completed,
            "total": state.total_problems,
        },
        "score": state.score,
        "streak": state.streak,
        "bestStreak": state.best_streak,
        "hintLevel": state.hint_level,
        "incorrectAttempts": state.incorrect_attempts,
        "problem": problem,
        "timer": timer,
        "feedback": state.feedback.as_ref().map(feedback_panel),
    })
}
