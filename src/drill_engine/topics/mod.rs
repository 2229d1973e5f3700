//! Topic generators grouped by problem family.
//!
//! Every public function follows the same shape:
//!
//! ```ignore
//! pub fn generate_<name><R: Rng>(
//!     rng: &mut R,
//!     difficulty: Difficulty,
//!     /* lookup table, when the family needs one */
//!     id: String,
//!     ceiling: f64,
//! ) -> Result<Problem, DegenerateProblem>
//! ```
//!
//! A `DegenerateProblem` tells the generator to throw the draw away and
//! resample; see `generator.rs`.

/// Dilution (DL-), DilutionVolume (DV-)
pub mod dilution;
/// Molarity (MO-), MolarityFromMass (MM-), MassFromMolarity (MA-)
pub mod molarity;
/// Mixing (MX-)
pub mod mixing;
/// BufferPh (BP-)
pub mod buffer;
