use std::fmt;
use serde::{Deserialize, Serialize};

use crate::drill_engine::chemistry;

// ---------------------------------------------------------------------------
// Session-level enums
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// All tiers, easiest first.
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy   => write!(f, "Easy"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Hard   => write!(f, "Hard"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameMode {
    /// Full scoring: hint penalties apply and the countdown may run.
    Competition,
    /// No penalties, no time pressure.
    Practice,
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameMode::Competition => write!(f, "Competition"),
            GameMode::Practice    => write!(f, "Practice"),
        }
    }
}

// ---------------------------------------------------------------------------
// Chemical lookup entries
// ---------------------------------------------------------------------------

/// A solute the caller can ask mass/molarity questions about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Solute {
    pub name: String,
    pub formula: String,
    /// g/mol
    pub molar_mass: f64,
}

/// A weak acid / conjugate base pair for buffer questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeakAcid {
    pub name: String,
    pub conjugate_base: String,
    pub pka: f64,
}

// ---------------------------------------------------------------------------
// Problem kinds and their typed parameters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProblemKind {
    Dilution,
    DilutionVolume,
    Molarity,
    MolarityFromMass,
    MassFromMolarity,
    Mixing,
    BufferPh,
}

impl ProblemKind {
    pub const ALL: [ProblemKind; 7] = [
        ProblemKind::Dilution,
        ProblemKind::DilutionVolume,
        ProblemKind::Molarity,
        ProblemKind::MolarityFromMass,
        ProblemKind::MassFromMolarity,
        ProblemKind::Mixing,
        ProblemKind::BufferPh,
    ];

    /// Two-letter prefix used in problem ids.
    pub fn id_prefix(self) -> &'static str {
        match self {
            ProblemKind::Dilution         => "DL",
            ProblemKind::DilutionVolume   => "DV",
            ProblemKind::Molarity         => "MO",
            ProblemKind::MolarityFromMass => "MM",
            ProblemKind::MassFromMolarity => "MA",
            ProblemKind::Mixing           => "MX",
            ProblemKind::BufferPh         => "BP",
        }
    }

    pub fn needs_solutes(self) -> bool {
        matches!(self, ProblemKind::MolarityFromMass | ProblemKind::MassFromMolarity)
    }

    pub fn needs_acids(self) -> bool {
        self == ProblemKind::BufferPh
    }
}

impl fmt::Display for ProblemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProblemKind::Dilution         => "Dilution",
            ProblemKind::DilutionVolume   => "Dilution Volume",
            ProblemKind::Molarity         => "Molarity",
            ProblemKind::MolarityFromMass => "Molarity from Mass",
            ProblemKind::MassFromMolarity => "Mass from Molarity",
            ProblemKind::Mixing           => "Mixing Solutions",
            ProblemKind::BufferPh         => "Buffer pH",
        };
        write!(f, "{}", s)
    }
}

/// The parameters of a problem, one variant per [`ProblemKind`].
///
/// Volumes are in mL, concentrations in mol/L, masses in g.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Given {
    /// Find the diluted concentration `M2`.
    Dilution { m1: f64, v1: f64, v2: f64 },
    /// Find the final volume `V2` that reaches `M2`.
    DilutionVolume { m1: f64, v1: f64, m2: f64 },
    /// Find the molarity of `moles` dissolved to `volume_ml`.
    Molarity { moles: f64, volume_ml: f64 },
    MolarityFromMass { solute: Solute, mass_g: f64, volume_ml: f64 },
    MassFromMolarity { solute: Solute, molarity: f64, volume_ml: f64 },
    /// Find the concentration after combining two solutions of the same solute.
    Mixing { m1: f64, v1: f64, m2: f64, v2: f64 },
    BufferPh { acid: WeakAcid, acid_molarity: f64, base_molarity: f64 },
}

impl Given {
    pub fn kind(&self) -> ProblemKind {
        match self {
            Given::Dilution { .. }         => ProblemKind::Dilution,
            Given::DilutionVolume { .. }   => ProblemKind::DilutionVolume,
            Given::Molarity { .. }         => ProblemKind::Molarity,
            Given::MolarityFromMass { .. } => ProblemKind::MolarityFromMass,
            Given::MassFromMolarity { .. } => ProblemKind::MassFromMolarity,
            Given::Mixing { .. }           => ProblemKind::Mixing,
            Given::BufferPh { .. }         => ProblemKind::BufferPh,
        }
    }

    /// Apply the kind's closed-form formula.
    pub fn solve(&self) -> f64 {
        match self {
            Given::Dilution { m1, v1, v2 } => chemistry::dilution(*m1, *v1, *v2),
            Given::DilutionVolume { m1, v1, m2 } => chemistry::dilution_volume(*m1, *v1, *m2),
            Given::Molarity { moles, volume_ml } => chemistry::molarity(*moles, *volume_ml),
            Given::MolarityFromMass { solute, mass_g, volume_ml } =>
                chemistry::molarity_from_mass(*mass_g, solute.molar_mass, *volume_ml),
            Given::MassFromMolarity { solute, molarity, volume_ml } =>
                chemistry::mass_from_molarity(*molarity, *volume_ml, solute.molar_mass),
            Given::Mixing { m1, v1, m2, v2 } => chemistry::mixing(*m1, *v1, *m2, *v2),
            Given::BufferPh { acid, acid_molarity, base_molarity } =>
                chemistry::buffer_ph(acid.pka, *acid_molarity, *base_molarity),
        }
    }

    /// Display unit of the answer. Informational only.
    pub fn unit(&self) -> &'static str {
        match self {
            Given::Dilution { .. }
            | Given::Molarity { .. }
            | Given::MolarityFromMass { .. }
            | Given::Mixing { .. } => "M",
            Given::DilutionVolume { .. } => "mL",
            Given::MassFromMolarity { .. } => "g",
            Given::BufferPh { .. } => "pH",
        }
    }
}

// ---------------------------------------------------------------------------
// Problem / score types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    pub id: String,
    pub given: Given,
    /// Computed once from `given`; always equals `given.solve()`.
    pub answer: f64,
    pub unit: String,
    pub difficulty: Difficulty,
    pub question: String,
    /// Formula name, substituted formula, final result. Never empty.
    pub hints: Vec<String>,
}

impl Problem {
    pub fn kind(&self) -> ProblemKind {
        self.given.kind()
    }
}

/// Point breakdown for one answered problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreEvent {
    pub base: i32,
    pub hint_penalty: i32,
    pub speed_bonus: i32,
    pub streak_bonus: i32,
    pub total: i32,
}

impl ScoreEvent {
    /// The (empty) event for an incorrect answer or a timeout.
    pub fn zero() -> Self {
        Self::default()
    }
}
