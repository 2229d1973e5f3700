//! One problem per kind and difficulty, with its hint ladder.
//!
//! Run with: `cargo run --example topics`
//!
//! Seeds are fixed so the output is reproducible. Kinds outside the
//! default catalog for a tier are still generated here through
//! `ProblemCatalog::only`, to show how the ranges widen with difficulty.

use chem_drill_gen::{
    drill_engine::{catalog::ProblemCatalog, helpers::fmt_num},
    generate, Difficulty, LookupTables, ProblemKind,
};
use rand::{rngs::StdRng, SeedableRng};

fn main() {
    let tables = LookupTables::default();

    for (i, kind) in ProblemKind::ALL.into_iter().enumerate() {
        println!();
        println!("══ {kind} ══");
        for difficulty in Difficulty::ALL {
            let mut rng = StdRng::seed_from_u64(100 + i as u64);
            let problem = match generate(difficulty, &ProblemCatalog::only(kind), &tables, &mut rng) {
                Ok(problem) => problem,
                Err(e) => {
                    println!("  {difficulty}: {e}");
                    continue;
                }
            };

            println!("  [{difficulty}] {}  {}", problem.id, problem.question);
            for (level, hint) in problem.hints.iter().enumerate() {
                println!("      {}. {hint}", level + 1);
            }
            println!("      answer: {} {}", fmt_num(problem.answer, 3), problem.unit);
        }
    }
}
