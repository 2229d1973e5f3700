//! Free-text answer parsing and tolerance-based checking.
//!
//! [`validate`] turns raw input into a number or a [`ValidationError`];
//! [`check_answer`] decides correctness; [`contextual_feedback`] is an
//! advisory hint about how far off a wrong answer was.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Inputs at or above this value are rejected as out of range.
pub const DEFAULT_CEILING: f64 = 1000.0;
pub const DEFAULT_TOLERANCE_PERCENT: f64 = 2.0;
/// Smallest allowed absolute error, so near-zero answers never get a
/// zero-width tolerance band.
pub const DEFAULT_ABSOLUTE_FLOOR: f64 = 0.01;

/// Absorbs binary rounding when the error sits exactly on the band edge
/// (`0.4 - 0.39` is slightly above `0.01` in f64).
const BOUNDARY_SLACK: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Blank input: ignored without a message.
    #[error("")]
    EmptyInput,
    #[error("Please enter a number.")]
    NotANumber,
    #[error("The answer must be greater than zero.")]
    NonPositive,
    #[error("That value is too large. Check your units.")]
    OutOfRange,
}

impl ValidationError {
    /// `EmptyInput` is swallowed silently by the UI.
    pub fn is_silent(self) -> bool {
        self == ValidationError::EmptyInput
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSettings {
    #[serde(default = "ValidationSettings::default_tolerance_percent")]
    pub tolerance_percent: f64,
    #[serde(default = "ValidationSettings::default_absolute_floor")]
    pub absolute_floor: f64,
    /// Exclusive upper bound on accepted input.
    #[serde(default = "ValidationSettings::default_ceiling")]
    pub ceiling: f64,
}

impl ValidationSettings {
    const fn default_tolerance_percent() -> f64 {
        DEFAULT_TOLERANCE_PERCENT
    }

    const fn default_absolute_floor() -> f64 {
        DEFAULT_ABSOLUTE_FLOOR
    }

    const fn default_ceiling() -> f64 {
        DEFAULT_CEILING
    }

    /// Allowed absolute error around `answer`.
    pub fn tolerance(&self, answer: f64) -> f64 {
        (answer.abs() * self.tolerance_percent / 100.0).max(self.absolute_floor)
    }
}

impl Default for ValidationSettings {
    fn default() -> Self {
        Self {
            tolerance_percent: Self::default_tolerance_percent(),
            absolute_floor: Self::default_absolute_floor(),
            ceiling: Self::default_ceiling(),
        }
    }
}

/// Parse raw user input with the default ceiling.
pub fn validate(raw: &str) -> Result<f64, ValidationError> {
    validate_with(raw, &ValidationSettings::default())
}

/// Parse raw user input. Accepts surrounding whitespace, a leading `+`
/// and a decimal comma (`0,4`).
pub fn validate_with(raw: &str, settings: &ValidationSettings) -> Result<f64, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyInput);
    }

    let normalized = trimmed.replace(',', ".");
    let value: f64 = normalized.parse().map_err(|_| ValidationError::NotANumber)?;
    if !value.is_finite() {
        return Err(ValidationError::NotANumber);
    }
    if value <= 0.0 {
        return Err(ValidationError::NonPositive);
    }
    if value >= settings.ceiling {
        return Err(ValidationError::OutOfRange);
    }
    Ok(value)
}

/// Tolerance check with the default absolute floor.
pub fn check_answer(value: f64, answer: f64, tolerance_percent: f64) -> bool {
    let settings = ValidationSettings { tolerance_percent, ..ValidationSettings::default() };
    check_answer_with(value, answer, &settings)
}

/// `|value - answer| <= max(|answer| · tolerance%, floor)`.
pub fn check_answer_with(value: f64, answer: f64, settings: &ValidationSettings) -> bool {
    (value - answer).abs() <= settings.tolerance(answer) + BOUNDARY_SLACK
}

/// How far a wrong answer landed, bucketed by percent error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorBand {
    /// More than 50 % off.
    WayOff,
    /// More than 20 % off.
    Far,
    /// More than 5 % off.
    Close,
    VeryClose,
}

impl ErrorBand {
    pub fn message(self) -> &'static str {
        match self {
            ErrorBand::WayOff =>
                "That's far from the answer. Check that you used the right formula.",
            ErrorBand::Far =>
                "You're in the right area. Check your unit conversions (mL vs L).",
            ErrorBand::Close =>
                "Close! Re-check your arithmetic and rounding.",
            ErrorBand::VeryClose =>
                "Very close. Watch your rounding in the final step.",
        }
    }
}

/// Advisory diagnosis of a wrong answer; never decides correctness.
pub fn contextual_feedback(value: f64, answer: f64) -> ErrorBand {
    let percent_error = if answer == 0.0 {
        f64::INFINITY
    } else {
        ((value - answer) / answer).abs() * 100.0
    };

    if percent_error > 50.0 {
        ErrorBand::WayOff
    } else if percent_error > 20.0 {
        ErrorBand::Far
    } else if percent_error > 5.0 {
        ErrorBand::Close
    } else {
        ErrorBand::VeryClose
    }
}
