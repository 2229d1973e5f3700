use rand::Rng;

use crate::drill_engine::{
    generator::DegenerateProblem,
    helpers::{finish, p, require_positive},
    models::{Difficulty, Given, Problem, ProblemKind, WeakAcid},
    sampler::{pick, sample, FieldRange},
};

/// Easy buffers use whole ratios so the log term is 0 or ±1.
const EASY_RATIOS: [f64; 3] = [0.1, 1.0, 10.0];

/// Design a buffer recipe: find the pH of a weak acid / conjugate base mix.
pub fn generate<R: Rng>(
    rng: &mut R,
    difficulty: Difficulty,
    acids: &[WeakAcid],
    id: String,
    ceiling: f64,
) -> Result<Problem, DegenerateProblem> {
    let acid = pick(rng, acids)
        .ok_or(DegenerateProblem { kind: ProblemKind::BufferPh, reason: "empty acid table" })?
        .clone();

    let (acid_molarity, base_molarity) = match difficulty {
        Difficulty::Easy => {
            let ha = sample(rng, FieldRange::new(0.1, 0.5, 1));
            let ratio = EASY_RATIOS[rng.gen_range(0..EASY_RATIOS.len())];
            (ha, ha * ratio)
        }
        Difficulty::Medium => (
            sample(rng, FieldRange::new(0.05, 1.0, 2)),
            sample(rng, FieldRange::new(0.05, 1.0, 2)),
        ),
        Difficulty::Hard => (
            sample(rng, FieldRange::new(0.01, 1.5, 3)),
            sample(rng, FieldRange::new(0.01, 1.5, 3)),
        ),
    };

    let question = format!(
        "A buffer contains {} M {} (pKa {}) and {} M {}. What is the pH of the buffer?",
        p(acid_molarity), acid.name, p(acid.pka), p(base_molarity), acid.conjugate_base
    );
    let hints = [
        "Use the Henderson–Hasselbalch equation: pH = pKa + log10([A⁻] / [HA]).".to_string(),
        format!(
            "pH = {} + log10({} / {})",
            p(acid.pka), p(base_molarity), p(acid_molarity)
        ),
    ];

    let pka = acid.pka;
    let given = Given::BufferPh { acid, acid_molarity, base_molarity };
    require_positive(&given, &[acid_molarity, base_molarity, pka], "zero concentration or pKa")?;

    finish(id, difficulty, given, question, hints, "pH", ceiling)
}
