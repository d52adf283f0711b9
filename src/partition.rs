//! Derivation of the electron and nuclear subsystems from a base molecule.
//!
//! A quantum nucleus's positive charge is moved out of the fixed classical
//! frame and into a quantum degree of freedom with its own basis. The two
//! derivations account for that move on opposite sides:
//!
//! - the electron subsystem zeroes the quantum nuclei's point charges and
//!   lowers the net charge by the quantum-nucleus count (relative to the base
//!   molecule's charge);
//! - the nuclear subsystem zeroes the classical nuclei's point charges and
//!   sets the net charge to the quantum-nucleus count outright.
//!
//! The delta-versus-absolute asymmetry between the two charge assignments is
//! part of the established convention and is preserved as-is.

use crate::basis::{BasisShell, QuantumBasisSet};
use crate::error::CneoError;
use crate::params::NuclearBasisMap;
use crate::types::{Molecule, Subsystems};
use log::debug;

/// Derives electron and nuclear subsystem descriptors from a base molecule.
///
/// The partitioner borrows a [`NuclearBasisMap`] so one recipe set can serve
/// many molecules.
pub struct Partitioner<'p> {
    basis_map: &'p NuclearBasisMap,
}

impl<'p> Partitioner<'p> {
    /// Creates a partitioner over the given basis recipes.
    ///
    /// # Examples
    ///
    /// ```
    /// use cneo::{get_default_nuclear_basis, Partitioner};
    ///
    /// let partitioner = Partitioner::new(get_default_nuclear_basis());
    /// ```
    pub fn new(basis_map: &'p NuclearBasisMap) -> Self {
        Self { basis_map }
    }

    /// Derives the electron subsystem.
    ///
    /// Every quantum nucleus's point charge is zeroed in the copy, and the net
    /// charge drops by the quantum-nucleus count: the electrons that used to
    /// balance those protons stay in the subsystem, but the protons' positive
    /// charge no longer appears in its electrostatics.
    pub fn electron_subsystem(&self, mol: &Molecule) -> Molecule {
        let mut elec = mol.clone();
        for i in 0..elec.natm() {
            if elec.is_quantum(i) {
                elec.zero_charge(i);
            }
        }
        elec.charge = mol.charge - mol.n_quantum() as i32;
        debug!(
            "electron subsystem: {} atoms, charge {}",
            elec.natm(),
            elec.charge
        );
        elec
    }

    /// Derives the nuclear subsystem.
    ///
    /// Every classical nucleus's point charge is zeroed in the copy, each
    /// quantum nucleus is assigned its species' even-tempered basis, the AO
    /// bookkeeping is rebuilt for the new basis, and the net charge is set to
    /// the quantum-nucleus count.
    ///
    /// # Errors
    ///
    /// Returns [`CneoError::SpeciesBasisNotFound`] if a quantum nucleus's
    /// species has no registered recipe.
    pub fn nuclear_subsystem(&self, mol: &Molecule) -> Result<Molecule, CneoError> {
        let mut nuc = mol.clone();

        let mut shells: Vec<Vec<BasisShell>> = Vec::with_capacity(nuc.natm());
        for i in 0..nuc.natm() {
            if nuc.is_quantum(i) {
                let species = self.basis_map.get(nuc.atoms()[i].atomic_number)?;
                shells.push(species.expand());
            } else {
                shells.push(Vec::new());
                nuc.zero_charge(i);
            }
        }
        let basis = QuantumBasisSet::new(shells);
        debug!(
            "nuclear subsystem: {} quantum nuclei, {} AO functions",
            nuc.n_quantum(),
            basis.nao()
        );
        nuc.basis = Some(basis);
        nuc.charge = mol.n_quantum() as i32;
        Ok(nuc)
    }

    /// Derives both subsystems in one call.
    pub fn partition(&self, mol: &Molecule) -> Result<Subsystems, CneoError> {
        Ok(Subsystems {
            electron: self.electron_subsystem(mol),
            nuclear: self.nuclear_subsystem(mol)?,
        })
    }
}
