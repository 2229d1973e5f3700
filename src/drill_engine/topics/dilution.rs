use rand::Rng;

use crate::drill_engine::{
    generator::DegenerateProblem,
    helpers::{finish, p, require_positive},
    models::{Difficulty, Given, Problem},
    sampler::{sample, sample_step, FieldRange},
};

/// Dilution factors that keep an integer stock's target to at most two decimals.
const EASY_FACTORS: [f64; 4] = [2.0, 4.0, 5.0, 10.0];

/// Stock concentration, wider and finer at higher tiers.
fn stock_range(difficulty: Difficulty) -> FieldRange {
    match difficulty {
        Difficulty::Easy   => FieldRange::new(1.0, 5.0, 0),
        Difficulty::Medium => FieldRange::new(0.5, 3.0, 2),
        Difficulty::Hard   => FieldRange::new(0.05, 6.0, 3),
    }
}

/// Aliquot volume V1 in mL.
fn aliquot<R: Rng>(rng: &mut R, difficulty: Difficulty) -> f64 {
    match difficulty {
        Difficulty::Easy   => sample_step(rng, 10, 100, 10),
        Difficulty::Medium => sample_step(rng, 10, 250, 5),
        Difficulty::Hard   => sample_step(rng, 5, 500, 1),
    }
}

/// Final volume V2 in mL. Easy draws a whole-number dilution factor so the
/// arithmetic stays mental; harder tiers draw freely and may need a resample.
fn final_volume<R: Rng>(rng: &mut R, difficulty: Difficulty, v1: f64) -> f64 {
    match difficulty {
        Difficulty::Easy   => v1 * rng.gen_range(2..=5u32) as f64,
        Difficulty::Medium => v1 + sample_step(rng, 50, 500, 10),
        Difficulty::Hard   => sample_step(rng, 5, 1000, 1),
    }
}

/// Dilute a stock solution: find `M2`.
pub fn generate_concentration<R: Rng>(
    rng: &mut R,
    difficulty: Difficulty,
    id: String,
    ceiling: f64,
) -> Result<Problem, DegenerateProblem> {
    let m1 = sample(rng, stock_range(difficulty));
    let v1 = aliquot(rng, difficulty);
    let v2 = final_volume(rng, difficulty, v1);

    let given = Given::Dilution { m1, v1, v2 };
    require_positive(&given, &[m1, v1, v2], "zero volume or concentration")?;
    if v2 <= v1 {
        return Err(DegenerateProblem { kind: given.kind(), reason: "final volume must exceed aliquot" });
    }

    let question = format!(
        "You take {} mL of a {} M stock solution and dilute it with water to a final \
         volume of {} mL. What is the concentration of the diluted solution (in M)?",
        p(v1), p(m1), p(v2)
    );
    let hints = [
        "Moles of solute stay the same when you add water: M1 × V1 = M2 × V2.".to_string(),
        format!("M2 = M1 × V1 / V2 = {} × {} / {}", p(m1), p(v1), p(v2)),
    ];

    finish(id, difficulty, given, question, hints, "M2", ceiling)
}

/// Plan a dilution: find the final volume `V2` that reaches a target `M2`.
pub fn generate_volume<R: Rng>(
    rng: &mut R,
    difficulty: Difficulty,
    id: String,
    ceiling: f64,
) -> Result<Problem, DegenerateProblem> {
    let m1 = sample(rng, stock_range(difficulty));
    let v1 = aliquot(rng, difficulty);
    let m2 = match difficulty {
        Difficulty::Easy => m1 / EASY_FACTORS[rng.gen_range(0..EASY_FACTORS.len())],
        _ => sample(rng, FieldRange::new(0.01, m1, 3)),
    };

    let given = Given::DilutionVolume { m1, v1, m2 };
    require_positive(&given, &[m1, v1, m2], "zero volume or concentration")?;
    if m2 >= m1 {
        return Err(DegenerateProblem { kind: given.kind(), reason: "target must be weaker than stock" });
    }

    let question = format!(
        "How much water must you dilute {} mL of a {} M stock solution to, so that the \
         final concentration is {} M? Give the final volume in mL.",
        p(v1), p(m1), p(m2)
    );
    let hints = [
        "Use the dilution relation M1 × V1 = M2 × V2 and solve for V2.".to_string(),
        format!("V2 = M1 × V1 / M2 = {} × {} / {}", p(m1), p(v1), p(m2)),
    ];

    finish(id, difficulty, given, question, hints, "V2", ceiling)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn easy_dilution_uses_whole_factor() {
        let mut rng = StdRng::seed_from_u64(4);
        for i in 0..50 {
            let Ok(problem) = generate_concentration(&mut rng, Difficulty::Easy, format!("DL-{i}"), 1000.0)
            else { continue };
            let Given::Dilution { m1, v1, v2 } = problem.given else { panic!("wrong variant") };
            assert_eq!(m1.fract(), 0.0);
            assert_eq!(v1 % 10.0, 0.0);
            let factor = v2 / v1;
            assert!((2.0..=5.0).contains(&factor) && factor.fract() == 0.0);
        }
    }

    #[test]
    fn volume_answer_exceeds_aliquot() {
        let mut rng = StdRng::seed_from_u64(8);
        for i in 0..50 {
            if let Ok(problem) = generate_volume(&mut rng, Difficulty::Hard, format!("DV-{i}"), 1000.0) {
                let Given::DilutionVolume { v1, .. } = problem.given else { panic!("wrong variant") };
                assert!(problem.answer > v1);
                assert!(problem.answer < 1000.0);
            }
        }
    }
}
