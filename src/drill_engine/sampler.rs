use rand::Rng;
use serde::{Deserialize, Serialize};

/// Inclusive sampling bounds plus the number of decimals the drawn value
/// is rounded to, so displayed numbers stay human-friendly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldRange {
    pub min: f64,
    pub max: f64,
    pub decimals: u32,
}

impl FieldRange {
    pub const fn new(min: f64, max: f64, decimals: u32) -> Self {
        FieldRange { min, max, decimals }
    }
}

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Draw a value in `[range.min, range.max]`, rounded per the range's policy.
pub fn sample<R: Rng + ?Sized>(rng: &mut R, range: FieldRange) -> f64 {
    let raw = if range.min < range.max {
        rng.gen_range(range.min..=range.max)
    } else {
        range.min
    };
    round_to(raw, range.decimals).clamp(range.min, range.max)
}

/// Draw a whole multiple of `step` in `[min, max]` (e.g. volumes in 10 mL steps).
pub fn sample_step<R: Rng + ?Sized>(rng: &mut R, min: u32, max: u32, step: u32) -> f64 {
    let step = step.max(1);
    let lo = min.div_ceil(step);
    let hi = (max / step).max(lo);
    (rng.gen_range(lo..=hi) * step) as f64
}

/// Pick one element uniformly; `None` on an empty slice.
pub fn pick<'a, T, R: Rng + ?Sized>(rng: &mut R, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    Some(&items[rng.gen_range(0..items.len())])
}
