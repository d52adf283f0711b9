//! This module defines fundamental physical constants used throughout the cneo
//! library.

/// Conversion factor from Bohr radii to angstroms.
///
/// Molecule positions are stored in Bohr; this constant converts user-facing
/// angstrom coordinates into the internal unit.
///
/// The value is approximately 0.529 Å per Bohr radius.
pub const BOHR_TO_ANGSTROM: f64 = 0.529_177_210_903;

/// Threshold for considering two distances equal in Bohr units.
///
/// Distances smaller than this value are considered coincident centers,
/// preventing division by zero in the classical nuclear repulsion sum.
pub const DISTANCE_THRESHOLD_BOHR: f64 = 1e-12;
