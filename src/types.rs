//! This module defines the core types used in the cneo library for representing
//! molecules that mix classical and quantum nuclei.
//!
//! It includes the `AtomView` trait for abstracting atom data access, the `Atom`
//! struct for concrete atom representation, and the `Molecule` descriptor that
//! carries the per-atom quantum-nucleus flags from which the electron and
//! nuclear subsystems are derived. These types form the foundation for the
//! decoupled design that allows integration with external molecular data
//! structures and integral engines.

use crate::basis::QuantumBasisSet;
use crate::error::CneoError;
use crate::math::constants::{BOHR_TO_ANGSTROM, DISTANCE_THRESHOLD_BOHR};

/// A trait for viewing atom data without owning it.
///
/// This trait provides a common interface for accessing an atom's atomic number
/// and 3D position, enabling the partitioner and gradient calculator to work
/// with different atom representations. By decoupling the library from specific
/// data structures, users can build a [`Molecule`] from their own atom types
/// without data conversion overhead.
pub trait AtomView {
    /// Returns the atomic number of the atom.
    fn atomic_number(&self) -> u8;

    /// Returns the 3D position of the atom in Cartesian coordinates, in Bohr.
    fn position(&self) -> [f64; 3];
}

/// A concrete representation of an atom with atomic number, position, and an
/// effective nuclear charge.
///
/// The nuclear charge is stored separately from the atomic number because the
/// subsystem derivations zero it out selectively: a quantum nucleus contributes
/// no point charge to the electron subsystem, and a classical nucleus
/// contributes none to the nuclear subsystem. The atomic number always keeps
/// identifying the chemical species.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Atom {
    /// The atomic number of the atom, identifying its chemical element.
    pub atomic_number: u8,
    /// The 3D position of the atom in Cartesian coordinates, in Bohr.
    pub position: [f64; 3],
    /// The effective nuclear point charge, in units of elementary charge.
    pub nuclear_charge: f64,
}

impl Atom {
    /// Creates an atom whose nuclear charge equals its atomic number.
    pub fn new(atomic_number: u8, position: [f64; 3]) -> Self {
        Self {
            atomic_number,
            position,
            nuclear_charge: f64::from(atomic_number),
        }
    }

    /// Creates an atom from a position given in angstroms.
    pub fn new_angstrom(atomic_number: u8, position: [f64; 3]) -> Self {
        Self::new(atomic_number, position.map(|x| x / BOHR_TO_ANGSTROM))
    }
}

impl AtomView for Atom {
    #[inline(always)]
    fn atomic_number(&self) -> u8 {
        self.atomic_number
    }

    #[inline(always)]
    fn position(&self) -> [f64; 3] {
        self.position
    }
}

/// A molecular descriptor that partitions its nuclei into classical point
/// charges and quantum-mechanical nuclei.
///
/// Invariant: atoms flagged quantum are excluded from classical nuclear-charge
/// accounting (nuclear repulsion, electron-subsystem electrostatics) and vice
/// versa. The flags are all-classical after construction; call
/// [`Molecule::set_quantum_nuclei`] to promote selected nuclei.
#[derive(Debug, Clone, PartialEq)]
pub struct Molecule {
    atoms: Vec<Atom>,
    /// Net charge of the system in units of elementary charge.
    pub charge: i32,
    quantum: Vec<bool>,
    /// Basis assignment for quantum nuclei, present only on descriptors
    /// produced by the nuclear-subsystem derivation.
    pub basis: Option<QuantumBasisSet>,
}

impl Molecule {
    /// Creates a molecule from owned atoms and a net charge.
    ///
    /// All nuclei start out classical.
    pub fn new(atoms: Vec<Atom>, charge: i32) -> Self {
        let natm = atoms.len();
        Self {
            atoms,
            charge,
            quantum: vec![false; natm],
            basis: None,
        }
    }

    /// Creates a molecule from any slice of [`AtomView`] implementors.
    ///
    /// Each atom's nuclear charge is initialized to its atomic number.
    pub fn from_views<A: AtomView>(views: &[A], charge: i32) -> Self {
        let atoms = views
            .iter()
            .map(|v| Atom::new(v.atomic_number(), v.position()))
            .collect();
        Self::new(atoms, charge)
    }

    /// Returns the number of atoms in the molecule.
    #[inline]
    pub fn natm(&self) -> usize {
        self.atoms.len()
    }

    /// Returns the atoms in index order.
    #[inline]
    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    /// Returns the effective nuclear point charge of atom `i`.
    #[inline]
    pub fn atom_charge(&self, i: usize) -> f64 {
        self.atoms[i].nuclear_charge
    }

    /// Marks exactly the listed atoms as quantum nuclei.
    ///
    /// Every atom not listed becomes classical, so repeated calls fully
    /// replace earlier flag sets and an empty list restores the all-classical
    /// state. Indices outside the molecule are rejected.
    pub fn set_quantum_nuclei(&mut self, indices: &[usize]) -> Result<(), CneoError> {
        let natm = self.natm();
        for &i in indices {
            if i >= natm {
                return Err(CneoError::AtomIndexOutOfRange { index: i, natm });
            }
        }
        self.quantum = vec![false; natm];
        for &i in indices {
            self.quantum[i] = true;
        }
        Ok(())
    }

    /// Returns the per-atom quantum-nucleus flags in atom-index order.
    #[inline]
    pub fn quantum_flags(&self) -> &[bool] {
        &self.quantum
    }

    /// Returns true if atom `i` is a quantum nucleus.
    #[inline]
    pub fn is_quantum(&self, i: usize) -> bool {
        self.quantum[i]
    }

    /// Returns the number of quantum nuclei.
    pub fn n_quantum(&self) -> usize {
        self.quantum.iter().filter(|&&q| q).count()
    }

    /// Returns the atom indices of the classical nuclei, in order.
    pub fn classical_indices(&self) -> Vec<usize> {
        (0..self.natm()).filter(|&i| !self.quantum[i]).collect()
    }

    /// Returns the atom indices of the quantum nuclei, in order.
    pub fn quantum_indices(&self) -> Vec<usize> {
        (0..self.natm()).filter(|&i| self.quantum[i]).collect()
    }

    /// Returns the number of electrons implied by the atomic numbers and the
    /// net charge.
    pub fn num_electrons(&self) -> i32 {
        let z_total: i32 = self.atoms.iter().map(|a| i32::from(a.atomic_number)).sum();
        z_total - self.charge
    }

    /// Computes the Coulomb repulsion energy between the classical point
    /// charges, in Hartree.
    ///
    /// Quantum nuclei are excluded; their repulsion is part of the coupled
    /// SCF energy, not the classical frame.
    pub fn classical_nuclear_repulsion(&self) -> f64 {
        let mut energy = 0.0;
        for i in 0..self.natm() {
            if self.quantum[i] {
                continue;
            }
            for j in (i + 1)..self.natm() {
                if self.quantum[j] {
                    continue;
                }
                let pi = self.atoms[i].position;
                let pj = self.atoms[j].position;
                let dist_sq: f64 = pi
                    .iter()
                    .zip(pj.iter())
                    .map(|(a, b)| (a - b).powi(2))
                    .sum();
                let dist = dist_sq.sqrt();
                if dist > DISTANCE_THRESHOLD_BOHR {
                    energy += self.atoms[i].nuclear_charge * self.atoms[j].nuclear_charge / dist;
                }
            }
        }
        energy
    }

    pub(crate) fn zero_charge(&mut self, i: usize) {
        self.atoms[i].nuclear_charge = 0.0;
    }
}

/// The pair of derived descriptors produced by the partitioner.
///
/// The electron subsystem sees quantum nuclei as charge-free centers; the
/// nuclear subsystem sees classical nuclei as charge-free centers and carries
/// the even-tempered basis on its quantum nuclei. Returning both explicitly
/// keeps the base molecule immutable, rather than attaching derived state to
/// it by side effect.
#[derive(Debug, Clone, PartialEq)]
pub struct Subsystems {
    /// The electron subsystem descriptor.
    pub electron: Molecule,
    /// The nuclear subsystem descriptor.
    pub nuclear: Molecule,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn water() -> Molecule {
        Molecule::new(
            vec![
                Atom::new(8, [0.0, 0.0, 0.0]),
                Atom::new(1, [1.8, 0.0, 0.0]),
                Atom::new(1, [-0.45, 1.75, 0.0]),
            ],
            0,
        )
    }

    #[test]
    fn test_new_molecule_is_all_classical() {
        let mol = water();
        assert_eq!(mol.quantum_flags(), &[false, false, false]);
        assert_eq!(mol.n_quantum(), 0);
        assert_eq!(mol.classical_indices(), vec![0, 1, 2]);
    }

    #[test]
    fn test_set_quantum_nuclei_replaces_prior_flags() {
        let mut mol = water();
        mol.set_quantum_nuclei(&[1, 2]).unwrap();
        assert_eq!(mol.quantum_flags(), &[false, true, true]);

        mol.set_quantum_nuclei(&[]).unwrap();
        assert_eq!(mol.quantum_flags(), &[false, false, false]);

        mol.set_quantum_nuclei(&[0]).unwrap();
        assert_eq!(mol.quantum_flags(), &[true, false, false]);
        assert_eq!(mol.quantum_indices(), vec![0]);
        assert_eq!(mol.classical_indices(), vec![1, 2]);
    }

    #[test]
    fn test_set_quantum_nuclei_rejects_out_of_range() {
        let mut mol = water();
        let err = mol.set_quantum_nuclei(&[3]).unwrap_err();
        assert!(matches!(
            err,
            CneoError::AtomIndexOutOfRange { index: 3, natm: 3 }
        ));
        // Flags are untouched on failure.
        assert_eq!(mol.n_quantum(), 0);
    }

    #[test]
    fn test_num_electrons_follows_charge() {
        let mut mol = water();
        assert_eq!(mol.num_electrons(), 10);
        mol.charge = -1;
        assert_eq!(mol.num_electrons(), 11);
    }

    #[test]
    fn test_classical_nuclear_repulsion_excludes_quantum() {
        let mut mol = water();
        let full = mol.classical_nuclear_repulsion();
        assert!(full > 0.0);

        mol.set_quantum_nuclei(&[1]).unwrap();
        let partial = mol.classical_nuclear_repulsion();
        assert!(partial < full);

        // Only the O-H(2) pair remains: 8 * 1 / r.
        let pi = mol.atoms()[0].position;
        let pj = mol.atoms()[2].position;
        let r = pi
            .iter()
            .zip(pj.iter())
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f64>()
            .sqrt();
        assert!((partial - 8.0 / r).abs() < 1e-12);
    }

    #[test]
    fn test_new_angstrom_converts_to_bohr() {
        let atom = Atom::new_angstrom(1, [0.529_177_210_903, 0.0, 0.0]);
        assert!((atom.position[0] - 1.0).abs() < 1e-12);
        assert_eq!(atom.nuclear_charge, 1.0);
    }

    #[test]
    fn test_from_views_initializes_charges() {
        let views = vec![Atom::new(6, [0.0, 0.0, 0.0]), Atom::new(1, [2.0, 0.0, 0.0])];
        let mol = Molecule::from_views(&views, 1);
        assert_eq!(mol.natm(), 2);
        assert_eq!(mol.atom_charge(0), 6.0);
        assert_eq!(mol.atom_charge(1), 1.0);
        assert_eq!(mol.num_electrons(), 6);
    }
}
