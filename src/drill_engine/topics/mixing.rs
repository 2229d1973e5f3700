use rand::Rng;

use crate::drill_engine::{
    generator::DegenerateProblem,
    helpers::{finish, p, require_positive},
    models::{Difficulty, Given, Problem},
    sampler::{sample, sample_step, FieldRange},
};

fn concentration(difficulty: Difficulty) -> FieldRange {
    match difficulty {
        Difficulty::Easy   => FieldRange::new(1.0, 5.0, 0),
        Difficulty::Medium => FieldRange::new(0.1, 4.0, 2),
        Difficulty::Hard   => FieldRange::new(0.01, 6.0, 3),
    }
}

fn portion<R: Rng>(rng: &mut R, difficulty: Difficulty) -> f64 {
    match difficulty {
        Difficulty::Easy   => sample_step(rng, 50, 200, 50),
        Difficulty::Medium => sample_step(rng, 20, 400, 10),
        Difficulty::Hard   => sample_step(rng, 5, 500, 1),
    }
}

/// Combine two solutions of the same solute: find the final concentration.
pub fn generate<R: Rng>(
    rng: &mut R,
    difficulty: Difficulty,
    id: String,
    ceiling: f64,
) -> Result<Problem, DegenerateProblem> {
    let range = concentration(difficulty);
    let m1 = sample(rng, range);
    let v1 = portion(rng, difficulty);
    let m2 = sample(rng, range);
    let v2 = portion(rng, difficulty);

    let given = Given::Mixing { m1, v1, m2, v2 };
    require_positive(&given, &[m1, v1, m2, v2], "zero volume or concentration")?;

    let question = format!(
        "You mix {} mL of a {} M solution with {} mL of a {} M solution of the same solute. \
         What is the concentration of the mixture (in M)?",
        p(v1), p(m1), p(v2), p(m2)
    );
    let hints = [
        "Add up the moles from both solutions and divide by the total volume: \
         M = (M1 × V1 + M2 × V2) / (V1 + V2)."
            .to_string(),
        format!(
            "M = ({} × {} + {} × {}) / ({} + {})",
            p(m1), p(v1), p(m2), p(v2), p(v1), p(v2)
        ),
    ];

    finish(id, difficulty, given, question, hints, "M", ceiling)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn mixture_lies_between_inputs() {
        let mut rng = StdRng::seed_from_u64(31);
        for i in 0..100 {
            let problem = generate(&mut rng, Difficulty::Medium, format!("MX-{i}"), 1000.0).unwrap();
            let Given::Mixing { m1, m2, .. } = problem.given else { panic!("wrong variant") };
            let (lo, hi) = if m1 < m2 { (m1, m2) } else { (m2, m1) };
            assert!(problem.answer >= lo - 1e-9 && problem.answer <= hi + 1e-9);
        }
    }
}
