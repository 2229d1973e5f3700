use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::drill_engine::{
    catalog::ProblemCatalog,
    chemistry,
    models::{Difficulty, Problem, ProblemKind, Solute, WeakAcid},
    sampler, topics,
    validator::DEFAULT_CEILING,
};

/// Resample budget per problem before giving up on a kind.
pub const MAX_DRAW_ATTEMPTS: u32 = 64;

/// A draw whose answer would be undefined, infinite, zero or unanswerable.
/// Never leaves the generator: the draw is thrown away and resampled.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("degenerate {kind} draw: {reason}")]
pub struct DegenerateProblem {
    pub kind: ProblemKind,
    pub reason: &'static str,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerateError {
    #[error("no problem kinds configured for {0} difficulty")]
    EmptyCatalog(Difficulty),
    #[error("no {0} table supplied for {1} problems")]
    MissingTable(&'static str, ProblemKind),
    #[error("gave up after {attempts} degenerate {kind} draws")]
    Degenerate { kind: ProblemKind, attempts: u32 },
}

/// Static chemical data supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupTables {
    #[serde(default = "chemistry::default_solutes")]
    pub solutes: Vec<Solute>,
    #[serde(default = "chemistry::default_acids")]
    pub acids: Vec<WeakAcid>,
}

impl Default for LookupTables {
    fn default() -> Self {
        LookupTables {
            solutes: chemistry::default_solutes(),
            acids: chemistry::default_acids(),
        }
    }
}

/// Generate a unique-enough problem id from kind + RNG.
fn make_problem_id(kind: ProblemKind, rng: &mut impl Rng) -> String {
    format!("{}-{:08X}", kind.id_prefix(), rng.next_u32())
}

/// Draw one problem of `kind`, dispatching to its topic module.
fn draw<R: Rng>(
    rng: &mut R,
    kind: ProblemKind,
    difficulty: Difficulty,
    tables: &LookupTables,
    ceiling: f64,
) -> Result<Problem, DegenerateProblem> {
    let id = make_problem_id(kind, rng);
    match kind {
        ProblemKind::Dilution =>
            topics::dilution::generate_concentration(rng, difficulty, id, ceiling),

        ProblemKind::DilutionVolume =>
            topics::dilution::generate_volume(rng, difficulty, id, ceiling),

        ProblemKind::Molarity =>
            topics::molarity::generate_molarity(rng, difficulty, id, ceiling),

        ProblemKind::MolarityFromMass =>
            topics::molarity::generate_from_mass(rng, difficulty, &tables.solutes, id, ceiling),

        ProblemKind::MassFromMolarity =>
            topics::molarity::generate_mass(rng, difficulty, &tables.solutes, id, ceiling),

        ProblemKind::Mixing =>
            topics::mixing::generate(rng, difficulty, id, ceiling),

        ProblemKind::BufferPh =>
            topics::buffer::generate(rng, difficulty, &tables.acids, id, ceiling),
    }
}

/// Generate a problem for `difficulty` whose answer the default validator
/// can accept.
pub fn generate<R: Rng>(
    difficulty: Difficulty,
    catalog: &ProblemCatalog,
    tables: &LookupTables,
    rng: &mut R,
) -> Result<Problem, GenerateError> {
    generate_within(difficulty, catalog, tables, DEFAULT_CEILING, rng)
}

/// Core entry point: pick a kind allowed at `difficulty`, then draw until
/// a non-degenerate problem with `0 < answer < ceiling` comes out.
pub fn generate_within<R: Rng>(
    difficulty: Difficulty,
    catalog: &ProblemCatalog,
    tables: &LookupTables,
    ceiling: f64,
    rng: &mut R,
) -> Result<Problem, GenerateError> {
    let kind = *sampler::pick(rng, catalog.kinds_for(difficulty))
        .ok_or(GenerateError::EmptyCatalog(difficulty))?;

    if kind.needs_solutes() && tables.solutes.is_empty() {
        return Err(GenerateError::MissingTable("solute", kind));
    }
    if kind.needs_acids() && tables.acids.is_empty() {
        return Err(GenerateError::MissingTable("acid", kind));
    }

    for attempt in 1..=MAX_DRAW_ATTEMPTS {
        match draw(rng, kind, difficulty, tables, ceiling) {
            Ok(problem) => {
                log::debug!(
                    "generated {} ({kind}, {difficulty}) after {attempt} draw(s)",
                    problem.id
                );
                return Ok(problem);
            }
            Err(degenerate) => log::debug!("resampling: {degenerate}"),
        }
    }

    log::warn!("{kind} at {difficulty}: {MAX_DRAW_ATTEMPTS} degenerate draws in a row");
    Err(GenerateError::Degenerate { kind, attempts: MAX_DRAW_ATTEMPTS })
}
