//! Pure solution-chemistry formulas and the default lookup tables.
//!
//! Volumes are taken in mL and converted to L internally.

use crate::drill_engine::models::{Solute, WeakAcid};

const ML_PER_L: f64 = 1000.0;

/// `M2 = M1·V1 / V2`
pub fn dilution(m1: f64, v1: f64, v2: f64) -> f64 {
    m1 * v1 / v2
}

/// `V2 = M1·V1 / M2`
pub fn dilution_volume(m1: f64, v1: f64, m2: f64) -> f64 {
    m1 * v1 / m2
}

/// `M = n / V`
pub fn molarity(moles: f64, volume_ml: f64) -> f64 {
    moles / (volume_ml / ML_PER_L)
}

/// `M = (m / MM) / V`
pub fn molarity_from_mass(mass_g: f64, molar_mass: f64, volume_ml: f64) -> f64 {
    (mass_g / molar_mass) / (volume_ml / ML_PER_L)
}

/// `m = M · V · MM`
pub fn mass_from_molarity(molarity: f64, volume_ml: f64, molar_mass: f64) -> f64 {
    molarity * (volume_ml / ML_PER_L) * molar_mass
}

/// `M = (M1·V1 + M2·V2) / (V1 + V2)`
pub fn mixing(m1: f64, v1: f64, m2: f64, v2: f64) -> f64 {
    (m1 * v1 + m2 * v2) / (v1 + v2)
}

/// Henderson–Hasselbalch: `pH = pKa + log10([A⁻] / [HA])`.
pub fn buffer_ph(pka: f64, acid_molarity: f64, base_molarity: f64) -> f64 {
    pka + (base_molarity / acid_molarity).log10()
}

fn solute(name: &str, formula: &str, molar_mass: f64) -> Solute {
    Solute { name: name.to_string(), formula: formula.to_string(), molar_mass }
}

fn acid(name: &str, conjugate_base: &str, pka: f64) -> WeakAcid {
    WeakAcid { name: name.to_string(), conjugate_base: conjugate_base.to_string(), pka }
}

/// Common lab solutes with molar masses in g/mol.
pub fn default_solutes() -> Vec<Solute> {
    vec![
        solute("sodium chloride",     "NaCl",      58.44),
        solute("sodium hydroxide",    "NaOH",      40.00),
        solute("potassium chloride",  "KCl",       74.55),
        solute("calcium chloride",    "CaCl2",    110.98),
        solute("copper(II) sulfate",  "CuSO4",    159.61),
        solute("glucose",             "C6H12O6",  180.16),
        solute("potassium nitrate",   "KNO3",     101.10),
    ]
}

/// Weak acids used for buffer recipes.
pub fn default_acids() -> Vec<WeakAcid> {
    vec![
        acid("acetic acid",          "acetate",            4.76),
        acid("formic acid",          "formate",            3.75),
        acid("dihydrogen phosphate", "hydrogen phosphate", 7.21),
        acid("ammonium",             "ammonia",            9.25),
        acid("carbonic acid",        "bicarbonate",        6.35),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn dilution_matches_worked_example() {
        // 2 M × 50 mL diluted to 250 mL → 0.4 M
        assert!(close(dilution(2.0, 50.0, 250.0), 0.4));
        assert!(close(dilution_volume(2.0, 50.0, 0.4), 250.0));
    }

    #[test]
    fn mixing_equal_volumes_averages() {
        assert!(close(mixing(2.0, 100.0, 4.0, 100.0), 3.0));
    }

    #[test]
    fn mass_and_molarity_are_inverse() {
        let mass = mass_from_molarity(0.5, 250.0, 58.44);
        assert!(close(mass, 7.305));
        assert!(close(molarity_from_mass(mass, 58.44, 250.0), 0.5));
    }

    #[test]
    fn equal_buffer_ratio_gives_pka() {
        assert!(close(buffer_ph(4.76, 0.1, 0.1), 4.76));
        assert!(buffer_ph(4.76, 0.1, 1.0) > 5.7);
    }

    #[test]
    fn default_tables_are_positive() {
        assert!(default_solutes().iter().all(|s| s.molar_mass > 0.0));
        assert!(default_acids().iter().all(|a| a.pka > 0.0));
    }
}
