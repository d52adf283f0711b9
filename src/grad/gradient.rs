//! Per-atom force assembly for coupled nuclear-electronic orbital solutions.
//!
//! The total derivative splits into three contributions:
//!
//! 1. the electronic gradient of the electron subsystem, delegated to the
//!    host engine and restricted to classical atoms;
//! 2. the core-Hamiltonian nuclear-attraction derivative of the quantum
//!    nuclei moving against each classical nucleus, contracted with the
//!    nuclear density matrix;
//! 3. the electron/quantum-nucleus Coulomb cross derivative, contracted with
//!    the electron density matrix over each classical atom's AO block.
//!
//! Quantum nuclei themselves feel no geometric derivative: their positions
//! are expectation values of the coupled SCF, so their force row is the
//! negated converged constraint force.

use crate::engine::IntegralEngine;
use crate::error::CneoError;
use crate::math::tensor::CartTensor;
use crate::scf::CoupledScfSolution;
use crate::types::{Molecule, Subsystems};
use faer::Mat;
use log::debug;
use rayon::prelude::*;

/// Analytical gradient calculator over a converged coupled SCF solution.
///
/// Holds only borrows; the converged inputs are consumed read-only and the
/// calculator carries no state beyond the cached classical atom list.
pub struct Gradients<'a, E: IntegralEngine> {
    engine: &'a E,
    mol: &'a Molecule,
    subsystems: &'a Subsystems,
    scf: &'a CoupledScfSolution,
    classical: Vec<usize>,
}

impl<'a, E: IntegralEngine + Sync> Gradients<'a, E> {
    /// Creates a gradient calculator, recording the classical atom indices
    /// and checking the nuclear density matrix against the nuclear-subsystem
    /// basis size.
    ///
    /// # Errors
    ///
    /// Returns [`CneoError::DimensionMismatch`] if the nuclear density matrix
    /// does not match the nuclear-subsystem AO count.
    pub fn new(
        engine: &'a E,
        mol: &'a Molecule,
        subsystems: &'a Subsystems,
        scf: &'a CoupledScfSolution,
    ) -> Result<Self, CneoError> {
        if let Some(basis) = &subsystems.nuclear.basis {
            if scf.nao_nuc() != basis.nao() {
                return Err(CneoError::DimensionMismatch {
                    context: "nuclear density matrix",
                    expected: format!("{n} x {n}", n = basis.nao()),
                    actual: format!("{n} x {n}", n = scf.nao_nuc()),
                });
            }
        }
        let classical = mol.classical_indices();
        Ok(Self {
            engine,
            mol,
            subsystems,
            scf,
            classical,
        })
    }

    /// The classical atom indices recorded at construction, in order.
    #[inline]
    pub fn classical_atoms(&self) -> &[usize] {
        &self.classical
    }

    /// Delegates to the engine's electronic nuclear gradient for the electron
    /// subsystem, restricted to `atoms` (default: all classical atoms).
    ///
    /// Returns one 3-vector per requested atom, in the order given.
    pub fn electronic_gradient(
        &self,
        atoms: Option<&[usize]>,
    ) -> Result<Vec<[f64; 3]>, CneoError> {
        let atoms = atoms.unwrap_or(&self.classical);
        let grad = self
            .engine
            .electronic_gradient(&self.subsystems.electron, atoms)?;
        if grad.len() != atoms.len() {
            return Err(CneoError::DimensionMismatch {
                context: "electronic gradient",
                expected: format!("{} rows", atoms.len()),
                actual: format!("{} rows", grad.len()),
            });
        }
        Ok(grad)
    }

    /// Computes the core-Hamiltonian nuclear-attraction derivative for the
    /// motion of classical atom `atom`, over the nuclear-subsystem basis.
    ///
    /// The engine's `<nabla mu | 1/r_A | nu>` tensor is scaled by the atom's
    /// point charge in the base molecule and symmetrized as `M + M^T` per
    /// Cartesian component, so the result is symmetric in the two AO indices.
    pub fn core_hamiltonian_deriv(&self, atom: usize) -> Result<CartTensor, CneoError> {
        let natm = self.mol.natm();
        if atom >= natm {
            return Err(CneoError::AtomIndexOutOfRange { index: atom, natm });
        }
        let vrinv = self
            .engine
            .nuclear_attraction_deriv(&self.subsystems.nuclear, atom)?;
        let nao = self.scf.nao_nuc();
        if vrinv.nrows() != nao || vrinv.ncols() != nao {
            return Err(CneoError::DimensionMismatch {
                context: "nuclear-attraction derivative",
                expected: format!("{nao} x {nao}"),
                actual: format!("{} x {}", vrinv.nrows(), vrinv.ncols()),
            });
        }
        // The charge comes from the base molecule: the nuclear-subsystem copy
        // has all classical point charges zeroed.
        Ok(vrinv.scaled(self.mol.atom_charge(atom)).symmetrized())
    }

    /// Builds the energy-weighted nuclear density matrix from the nuclear MO
    /// coefficients, energies, and occupations.
    ///
    /// Intended for a Pulay-type overlap-derivative force term. The term is
    /// not part of [`Gradients::kernel`]; see DESIGN.md before wiring it in.
    pub fn weighted_nuclear_density(&self) -> Mat<f64> {
        let c = &self.scf.mo_coeff_nuc;
        let e = &self.scf.mo_energy_nuc;
        let occ = &self.scf.mo_occ_nuc;
        let nao = c.nrows();
        Mat::from_fn(nao, nao, |i, j| {
            (0..c.ncols())
                .filter(|&k| occ[k] > 0.0)
                .map(|k| occ[k] * e[k] * c[(i, k)] * c[(j, k)])
                .sum()
        })
    }

    /// Computes the derivative of the electron/quantum-nucleus Coulomb
    /// interaction, contracted against the nuclear density matrix and indexed
    /// by electron-subsystem AO pairs.
    ///
    /// The attractive-interaction convention negates the raw contraction.
    pub fn cross_gradient(&self) -> Result<CartTensor, CneoError> {
        let jcross = self.engine.coulomb_cross_deriv(
            &self.subsystems.electron,
            &self.subsystems.nuclear,
            &self.scf.dm_nuc,
        )?;
        let nao = self.scf.nao_elec();
        if jcross.nrows() != nao || jcross.ncols() != nao {
            return Err(CneoError::DimensionMismatch {
                context: "Coulomb cross derivative",
                expected: format!("{nao} x {nao}"),
                actual: format!("{} x {}", jcross.nrows(), jcross.ncols()),
            });
        }
        Ok(jcross.scaled(-1.0))
    }

    /// The force on the quantum nuclei: the negated converged constraint
    /// force from the coupled SCF.
    ///
    /// A quantum nucleus's position is an expectation value, not a fixed
    /// coordinate, so no geometric derivative applies.
    #[inline]
    pub fn quantum_nucleus_gradient(&self) -> [f64; 3] {
        let f = self.scf.f_nuc;
        [-f[0], -f[1], -f[2]]
    }

    /// Assembles the per-atom forces for `atoms` (default: every atom of the
    /// base molecule, in index order).
    ///
    /// Quantum atoms receive [`Gradients::quantum_nucleus_gradient`].
    /// Classical atoms receive the core-Hamiltonian derivative contracted
    /// with the nuclear density, minus twice the cross gradient restricted to
    /// the atom's electron-subsystem AO row block contracted with the
    /// matching electron-density rows, plus their row of the delegated
    /// electronic gradient.
    pub fn kernel(&self, atoms: Option<&[usize]>) -> Result<Vec<[f64; 3]>, CneoError> {
        let all: Vec<usize>;
        let atmlst: &[usize] = match atoms {
            Some(list) => {
                let natm = self.mol.natm();
                for &i in list {
                    if i >= natm {
                        return Err(CneoError::AtomIndexOutOfRange { index: i, natm });
                    }
                }
                list
            }
            None => {
                all = (0..self.mol.natm()).collect();
                &all
            }
        };
        debug!("assembling forces for {} atoms", atmlst.len());

        let jcross = self.cross_gradient()?;
        let slices = self
            .engine
            .ao_slice_by_atom(&self.subsystems.electron)?;
        let nao_elec = self.scf.nao_elec();
        if slices.len() != self.mol.natm()
            || slices.iter().any(|s| s.ao0 > s.ao1 || s.ao1 > nao_elec)
        {
            return Err(CneoError::DimensionMismatch {
                context: "electron AO slices",
                expected: format!("{} atoms within {nao_elec} AO functions", self.mol.natm()),
                actual: format!("{} atoms", slices.len()),
            });
        }

        let mut de: Vec<[f64; 3]> = atmlst
            .par_iter()
            .map(|&ia| -> Result<[f64; 3], CneoError> {
                if self.mol.is_quantum(ia) {
                    return Ok(self.quantum_nucleus_gradient());
                }
                let h1ao = self.core_hamiltonian_deriv(ia)?;
                let mut force = h1ao.contract(&self.scf.dm_nuc);
                let slice = slices[ia];
                let cross = jcross.contract_rows(slice.ao0..slice.ao1, &self.scf.dm_elec);
                for x in 0..3 {
                    force[x] -= 2.0 * cross[x];
                }
                Ok(force)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let grad_elec = self.electronic_gradient(None)?;
        for (k, &ia) in atmlst.iter().enumerate() {
            if let Ok(pos) = self.classical.binary_search(&ia) {
                for x in 0..3 {
                    de[k][x] += grad_elec[pos][x];
                }
            }
        }
        Ok(de)
    }
}
