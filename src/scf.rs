//! Read-only snapshot of a converged coupled SCF calculation.
//!
//! The coupled electron/nuclear SCF itself is out of scope; the gradient
//! calculator only consumes its converged outputs. The constructor validates
//! the shapes once so the assembly code can index freely afterwards.

use crate::error::CneoError;
use faer::{Col, Mat};

/// Converged quantities from a coupled electron/nuclear SCF run.
#[derive(Debug, Clone)]
pub struct CoupledScfSolution {
    /// Electron density matrix in the electron-subsystem AO basis.
    pub dm_elec: Mat<f64>,
    /// Nuclear density matrix in the nuclear-subsystem AO basis.
    pub dm_nuc: Mat<f64>,
    /// Nuclear MO coefficients, one column per orbital.
    pub mo_coeff_nuc: Mat<f64>,
    /// Nuclear MO energies, one per orbital.
    pub mo_energy_nuc: Col<f64>,
    /// Nuclear MO occupation numbers, one per orbital.
    pub mo_occ_nuc: Col<f64>,
    /// The converged position-constraint force on the quantum nuclei, the
    /// Lagrange-multiplier term of the constrained SCF.
    pub f_nuc: [f64; 3],
}

impl CoupledScfSolution {
    /// Validates the internal shape consistency of a converged solution.
    ///
    /// Both density matrices must be square, the nuclear MO coefficients must
    /// have as many rows as the nuclear density matrix, and the nuclear MO
    /// energies and occupations must have one entry per coefficient column.
    pub fn new(
        dm_elec: Mat<f64>,
        dm_nuc: Mat<f64>,
        mo_coeff_nuc: Mat<f64>,
        mo_energy_nuc: Col<f64>,
        mo_occ_nuc: Col<f64>,
        f_nuc: [f64; 3],
    ) -> Result<Self, CneoError> {
        if dm_elec.nrows() != dm_elec.ncols() {
            return Err(dimension_mismatch(
                "electron density matrix",
                &format!("{n} x {n}", n = dm_elec.nrows()),
                &format!("{} x {}", dm_elec.nrows(), dm_elec.ncols()),
            ));
        }
        if dm_nuc.nrows() != dm_nuc.ncols() {
            return Err(dimension_mismatch(
                "nuclear density matrix",
                &format!("{n} x {n}", n = dm_nuc.nrows()),
                &format!("{} x {}", dm_nuc.nrows(), dm_nuc.ncols()),
            ));
        }
        if mo_coeff_nuc.nrows() != dm_nuc.nrows() {
            return Err(dimension_mismatch(
                "nuclear MO coefficients",
                &format!("{} x nmo", dm_nuc.nrows()),
                &format!("{} x {}", mo_coeff_nuc.nrows(), mo_coeff_nuc.ncols()),
            ));
        }
        let nmo = mo_coeff_nuc.ncols();
        if mo_energy_nuc.nrows() != nmo {
            return Err(dimension_mismatch(
                "nuclear MO energies",
                &nmo.to_string(),
                &mo_energy_nuc.nrows().to_string(),
            ));
        }
        if mo_occ_nuc.nrows() != nmo {
            return Err(dimension_mismatch(
                "nuclear MO occupations",
                &nmo.to_string(),
                &mo_occ_nuc.nrows().to_string(),
            ));
        }

        Ok(Self {
            dm_elec,
            dm_nuc,
            mo_coeff_nuc,
            mo_energy_nuc,
            mo_occ_nuc,
            f_nuc,
        })
    }

    /// Number of AO functions in the electron-subsystem basis.
    #[inline]
    pub fn nao_elec(&self) -> usize {
        self.dm_elec.nrows()
    }

    /// Number of AO functions in the nuclear-subsystem basis.
    #[inline]
    pub fn nao_nuc(&self) -> usize {
        self.dm_nuc.nrows()
    }
}

fn dimension_mismatch(context: &'static str, expected: &str, actual: &str) -> CneoError {
    CneoError::DimensionMismatch {
        context,
        expected: expected.to_string(),
        actual: actual.to_string(),
    }
}
