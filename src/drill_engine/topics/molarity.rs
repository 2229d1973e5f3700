use rand::Rng;

use crate::drill_engine::{
    generator::DegenerateProblem,
    helpers::{finish, p, require_positive},
    models::{Difficulty, Given, Problem, ProblemKind, Solute},
    sampler::{pick, sample, sample_step, FieldRange},
};

/// Solution volume in mL.
fn volume<R: Rng>(rng: &mut R, difficulty: Difficulty) -> f64 {
    match difficulty {
        Difficulty::Easy   => sample_step(rng, 100, 1000, 100),
        Difficulty::Medium => sample_step(rng, 50, 1000, 25),
        Difficulty::Hard   => sample_step(rng, 10, 1000, 1),
    }
}

fn molarity_range(difficulty: Difficulty) -> FieldRange {
    match difficulty {
        Difficulty::Easy   => FieldRange::new(0.1, 2.0, 1),
        Difficulty::Medium => FieldRange::new(0.05, 2.5, 2),
        Difficulty::Hard   => FieldRange::new(0.01, 3.0, 3),
    }
}

fn pick_solute<'a, R: Rng>(
    rng: &mut R,
    solutes: &'a [Solute],
    kind: ProblemKind,
) -> Result<&'a Solute, DegenerateProblem> {
    pick(rng, solutes).ok_or(DegenerateProblem { kind, reason: "empty solute table" })
}

/// Moles dissolved to a volume: find `M`.
pub fn generate_molarity<R: Rng>(
    rng: &mut R,
    difficulty: Difficulty,
    id: String,
    ceiling: f64,
) -> Result<Problem, DegenerateProblem> {
    let moles = match difficulty {
        Difficulty::Easy   => sample(rng, FieldRange::new(0.1, 2.0, 1)),
        Difficulty::Medium => sample(rng, FieldRange::new(0.05, 2.5, 2)),
        Difficulty::Hard   => sample(rng, FieldRange::new(0.005, 1.5, 3)),
    };
    let volume_ml = volume(rng, difficulty);

    let given = Given::Molarity { moles, volume_ml };
    require_positive(&given, &[moles, volume_ml], "zero moles or volume")?;

    let question = format!(
        "{} mol of solute is dissolved in enough water to make {} mL of solution. \
         What is the molarity (in M)?",
        p(moles), p(volume_ml)
    );
    let hints = [
        "Molarity is moles of solute per liter of solution: M = n / V. Convert mL to L first.".to_string(),
        format!("M = {} mol / ({} mL / 1000) = {} / {}", p(moles), p(volume_ml), p(moles), p(volume_ml / 1000.0)),
    ];

    finish(id, difficulty, given, question, hints, "M", ceiling)
}

/// Weighed mass of a solute made up to a volume: find `M`.
pub fn generate_from_mass<R: Rng>(
    rng: &mut R,
    difficulty: Difficulty,
    solutes: &[Solute],
    id: String,
    ceiling: f64,
) -> Result<Problem, DegenerateProblem> {
    let solute = pick_solute(rng, solutes, ProblemKind::MolarityFromMass)?.clone();
    let mass_g = match difficulty {
        Difficulty::Easy   => sample(rng, FieldRange::new(1.0, 50.0, 0)),
        Difficulty::Medium => sample(rng, FieldRange::new(0.5, 80.0, 1)),
        Difficulty::Hard   => sample(rng, FieldRange::new(0.1, 120.0, 2)),
    };
    let volume_ml = volume(rng, difficulty);
    let molar_mass = solute.molar_mass;

    let question = format!(
        "{} g of {} ({}, molar mass {} g/mol) is dissolved to make {} mL of solution. \
         What is the molarity (in M)?",
        p(mass_g), solute.name, solute.formula, p(molar_mass), p(volume_ml)
    );
    let hints = [
        "First convert mass to moles (n = m / MM), then divide by the volume in liters (M = n / V).".to_string(),
        format!(
            "M = ({} g / {} g/mol) / ({} mL / 1000)",
            p(mass_g), p(molar_mass), p(volume_ml)
        ),
    ];

    let given = Given::MolarityFromMass { solute, mass_g, volume_ml };
    require_positive(&given, &[mass_g, molar_mass, volume_ml], "zero mass, molar mass or volume")?;

    finish(id, difficulty, given, question, hints, "M", ceiling)
}

/// Prepare a target molarity: find the mass of solute to weigh out.
pub fn generate_mass<R: Rng>(
    rng: &mut R,
    difficulty: Difficulty,
    solutes: &[Solute],
    id: String,
    ceiling: f64,
) -> Result<Problem, DegenerateProblem> {
    let solute = pick_solute(rng, solutes, ProblemKind::MassFromMolarity)?.clone();
    let molarity = sample(rng, molarity_range(difficulty));
    let volume_ml = volume(rng, difficulty);
    let molar_mass = solute.molar_mass;

    let question = format!(
        "How many grams of {} ({}, molar mass {} g/mol) do you need to prepare {} mL \
         of a {} M solution?",
        solute.name, solute.formula, p(molar_mass), p(volume_ml), p(molarity)
    );
    let hints = [
        "Moles needed are M × V (in liters); multiply moles by the molar mass to get grams.".to_string(),
        format!(
            "m = {} M × ({} mL / 1000) × {} g/mol",
            p(molarity), p(volume_ml), p(molar_mass)
        ),
    ];

    let given = Given::MassFromMolarity { solute, molarity, volume_ml };
    require_positive(&given, &[molarity, molar_mass, volume_ml], "zero molarity, molar mass or volume")?;

    finish(id, difficulty, given, question, hints, "m", ceiling)
}
