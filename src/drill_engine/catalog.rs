use serde::{Deserialize, Serialize};

use crate::drill_engine::models::{Difficulty, ProblemKind};

/// Which problem kinds may be drawn at each difficulty.
///
/// Easier tiers restrict to a smaller set; the default catalog is nested
/// (every kind allowed on Easy is also allowed on Medium and Hard).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProblemCatalog {
    pub easy: Vec<ProblemKind>,
    pub medium: Vec<ProblemKind>,
    pub hard: Vec<ProblemKind>,
}

impl ProblemCatalog {
    pub fn kinds_for(&self, difficulty: Difficulty) -> &[ProblemKind] {
        match difficulty {
            Difficulty::Easy   => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard   => &self.hard,
        }
    }

    /// A catalog that offers exactly one kind at every tier.
    pub fn only(kind: ProblemKind) -> Self {
        ProblemCatalog { easy: vec![kind], medium: vec![kind], hard: vec![kind] }
    }

    /// Every kind used anywhere in the catalog.
    pub fn all_kinds(&self) -> impl Iterator<Item = ProblemKind> + '_ {
        self.easy.iter().chain(&self.medium).chain(&self.hard).copied()
    }
}

impl Default for ProblemCatalog {
    fn default() -> Self {
        use ProblemKind::*;
        ProblemCatalog {
            easy: vec![Dilution, Molarity],
            medium: vec![Dilution, Molarity, MolarityFromMass, MassFromMolarity, Mixing],
            hard: vec![
                Dilution, DilutionVolume, Molarity, MolarityFromMass,
                MassFromMolarity, Mixing, BufferPh,
            ],
        }
    }
}
