//! Shared builder functions used by every topic generator.
//!
//! Each topic samples its own typed [`Given`], writes the question and the
//! first two hint tiers, then hands everything to [`finish`], which computes
//! the answer, rejects degenerate draws and appends the final-result hint.

use crate::drill_engine::{
    generator::DegenerateProblem,
    models::{Difficulty, Given, Problem},
};

/// Answers that would display as zero at [`ANSWER_DECIMALS`] are ill-defined.
const MIN_ANSWER: f64 = 0.0005;

/// Decimals shown in the final-result hint.
pub const ANSWER_DECIMALS: usize = 3;

/// Format a number with at most `decimals` places, trailing zeros trimmed
/// (e.g. `0.400` → `"0.4"`, `250.0` → `"250"`).
pub fn fmt_num(value: f64, decimals: usize) -> String {
    let s = format!("{:.*}", decimals, value);
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

/// Format a sampled parameter. Parameters are already rounded on draw,
/// so four places never truncates them.
pub fn p(value: f64) -> String {
    fmt_num(value, 4)
}

/// Reject non-positive inputs before any formula divides by them.
pub fn require_positive(given: &Given, values: &[f64], reason: &'static str) -> Result<(), DegenerateProblem> {
    if values.iter().all(|v| v.is_finite() && *v > 0.0) {
        Ok(())
    } else {
        Err(DegenerateProblem { kind: given.kind(), reason })
    }
}

/// Assemble the final [`Problem`].
///
/// `hints` holds the first two tiers (formula name, substituted formula);
/// the third tier, the final numeric result, is derived from the answer.
/// Fails when the answer is non-finite, not positive, or not below
/// `answer_ceiling` (the validator could never accept it).
pub fn finish(
    id: String,
    difficulty: Difficulty,
    given: Given,
    question: String,
    hints: [String; 2],
    result_label: &str,
    answer_ceiling: f64,
) -> Result<Problem, DegenerateProblem> {
    let kind = given.kind();
    let answer = given.solve();
    if !answer.is_finite() {
        return Err(DegenerateProblem { kind, reason: "answer is not finite" });
    }
    if answer < MIN_ANSWER {
        return Err(DegenerateProblem { kind, reason: "answer rounds to zero" });
    }
    if answer >= answer_ceiling {
        return Err(DegenerateProblem { kind, reason: "answer exceeds input ceiling" });
    }

    let unit = given.unit();
    let [formula, substituted] = hints;
    let result = format!("{result_label} = {} {unit}", fmt_num(answer, ANSWER_DECIMALS));

    Ok(Problem {
        id,
        given,
        answer,
        unit: unit.to_string(),
        difficulty,
        question,
        hints: vec![formula, substituted, result],
    })
}
