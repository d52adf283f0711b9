//! The seam between this library and the host quantum-chemistry framework.
//!
//! Integral evaluation, basis management for electrons, and the electronic
//! gradient all live in the host framework; this trait names exactly the
//! evaluations the gradient assembly consumes. Implementations typically wrap
//! an external integral engine; tests drive a deterministic synthetic one.

use crate::basis::AoSlice;
use crate::error::CneoError;
use crate::math::tensor::CartTensor;
use crate::types::Molecule;
use faer::Mat;

/// Host-framework evaluations consumed by the gradient calculator.
///
/// All matrices are in the AO basis of the molecule they were evaluated for.
/// Any engine-side failure should be reported as [`CneoError::Engine`].
pub trait IntegralEngine {
    /// Returns the AO slice of each atom of `mol` in the engine's electronic
    /// basis, in atom-index order.
    fn ao_slice_by_atom(&self, mol: &Molecule) -> Result<Vec<AoSlice>, CneoError>;

    /// Evaluates the converged electronic nuclear gradient of the electron
    /// subsystem, restricted to `atoms`. One 3-vector per requested atom, in
    /// the order given.
    fn electronic_gradient(
        &self,
        mol: &Molecule,
        atoms: &[usize],
    ) -> Result<Vec<[f64; 3]>, CneoError>;

    /// Evaluates `<nabla mu | 1/r_A | nu>` over the nuclear-subsystem basis of
    /// `mol`, with the reference nucleus placed at atom `atom`. Unscaled and
    /// unsymmetrized; the caller applies the charge factor and the transpose.
    fn nuclear_attraction_deriv(
        &self,
        mol: &Molecule,
        atom: usize,
    ) -> Result<CartTensor, CneoError>;

    /// Evaluates the derivative two-electron Coulomb integral over the
    /// electron/nuclear AO blocks, contracted against the nuclear density
    /// matrix (`ijkl, lk -> ij` per Cartesian component). The result is
    /// indexed by electron-subsystem AO pairs.
    fn coulomb_cross_deriv(
        &self,
        elec: &Molecule,
        nuc: &Molecule,
        dm_nuc: &Mat<f64>,
    ) -> Result<CartTensor, CneoError>;
}
