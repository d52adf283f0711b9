//! cneo - nuclear-electronic orbital molecule partitioning and analytical
//! gradients.
//!
//! Selected nuclei (typically protons) are treated quantum-mechanically
//! alongside electrons. The library derives the electron and nuclear
//! subsystem descriptors from a base [`Molecule`] and assembles the per-atom
//! forces of a converged coupled SCF solution. Integral evaluation and the
//! coupled SCF itself stay in the host framework, reached through the
//! [`IntegralEngine`] seam.
//!
//! ```no_run
//! use cneo::{get_default_nuclear_basis, Atom, Molecule, Partitioner};
//!
//! # fn main() -> Result<(), cneo::CneoError> {
//! let mut mol = Molecule::new(
//!     vec![
//!         Atom::new(1, [0.0, 0.0, 0.0]),
//!         Atom::new(6, [0.0, 0.0, 2.01]),
//!         Atom::new(7, [0.0, 0.0, 4.19]),
//!     ],
//!     0,
//! );
//! mol.set_quantum_nuclei(&[0])?;
//!
//! let partitioner = Partitioner::new(get_default_nuclear_basis());
//! let systems = partitioner.partition(&mol)?;
//! assert_eq!(systems.electron.charge, -1);
//! assert_eq!(systems.nuclear.charge, 1);
//! # Ok(())
//! # }
//! ```

pub mod basis;
pub mod engine;
pub mod error;
pub mod grad;
pub mod math;
pub mod params;
pub mod partition;
pub mod scf;
pub mod types;

pub use basis::{AoSlice, BasisShell, EtbShell, QuantumBasisSet};
pub use engine::IntegralEngine;
pub use error::CneoError;
pub use grad::Gradients;
pub use math::tensor::CartTensor;
pub use params::{NuclearBasisMap, SpeciesBasis};
pub use partition::Partitioner;
pub use scf::CoupledScfSolution;
pub use types::{Atom, AtomView, Molecule, Subsystems};

use std::sync::OnceLock;

static DEFAULT_NUCLEAR_BASIS: OnceLock<NuclearBasisMap> = OnceLock::new();

/// Returns the embedded default nuclear basis recipes.
///
/// Covers the proton (8s8p8d even-tempered set); heavier quantum nuclei need
/// recipes loaded through [`NuclearBasisMap::load_from_file`].
pub fn get_default_nuclear_basis() -> &'static NuclearBasisMap {
    DEFAULT_NUCLEAR_BASIS.get_or_init(|| {
        const DEFAULT_BASIS_TOML: &str = include_str!("../resources/nuc.basis.toml");
        NuclearBasisMap::load_from_str(DEFAULT_BASIS_TOML)
            .expect("Failed to parse embedded default basis recipes. This is a library bug.")
    })
}
