use cneo::{AoSlice, Atom, CartTensor, CneoError, IntegralEngine, Molecule};
use faer::Mat;

/// AO functions per atom in the synthetic electronic basis.
pub const ELEC_AO_PER_ATOM: usize = 3;

/// A linear H-C-N molecule with bond lengths in Bohr.
pub fn hcn() -> Molecule {
    Molecule::new(
        vec![
            Atom::new(1, [0.0, 0.0, 0.0]),
            Atom::new(6, [0.0, 0.0, 2.011]),
            Atom::new(7, [0.0, 0.0, 4.196]),
        ],
        0,
    )
}

/// The deterministic electronic gradient row the synthetic engine reports for
/// atom `ia`.
pub fn elec_grad_row(ia: usize) -> [f64; 3] {
    [0.1 * (ia as f64 + 1.0), -0.2 * ia as f64, 0.05]
}

/// The raw (unscaled, unsymmetrized) nuclear-attraction derivative entry for
/// Cartesian component `x`, reference atom `atom`, and AO pair `(i, j)`.
/// Deliberately asymmetric in `(i, j)`.
pub fn rinv_entry(x: usize, atom: usize, i: usize, j: usize) -> f64 {
    (x as f64 + 1.0) * (0.3 * i as f64 - 0.7 * j as f64 + 0.25 * atom as f64 + 0.11)
}

/// The Coulomb cross derivative entry before scaling by the nuclear density
/// weight, for component `x` and electron AO pair `(i, j)`.
pub fn cross_entry(x: usize, i: usize, j: usize) -> f64 {
    0.01 * (x as f64 + 1.0) * (i as f64 + 2.0 * j as f64 + 1.0)
}

/// A deterministic stand-in for the host integral engine.
///
/// Every evaluation is a closed-form function of the indices, so tests can
/// compute expected values independently. The cross derivative scales with
/// the sum of the nuclear density entries, which makes it vanish whenever no
/// quantum nuclei (and hence no nuclear AO functions) exist.
pub struct SyntheticEngine;

impl IntegralEngine for SyntheticEngine {
    fn ao_slice_by_atom(&self, mol: &Molecule) -> Result<Vec<AoSlice>, CneoError> {
        Ok((0..mol.natm())
            .map(|i| AoSlice {
                shell0: i,
                shell1: i + 1,
                ao0: i * ELEC_AO_PER_ATOM,
                ao1: (i + 1) * ELEC_AO_PER_ATOM,
            })
            .collect())
    }

    fn electronic_gradient(
        &self,
        _mol: &Molecule,
        atoms: &[usize],
    ) -> Result<Vec<[f64; 3]>, CneoError> {
        Ok(atoms.iter().map(|&ia| elec_grad_row(ia)).collect())
    }

    fn nuclear_attraction_deriv(
        &self,
        mol: &Molecule,
        atom: usize,
    ) -> Result<CartTensor, CneoError> {
        let nao = mol.basis.as_ref().map_or(0, |b| b.nao());
        Ok(CartTensor::new([0, 1, 2].map(|x| {
            Mat::from_fn(nao, nao, |i, j| rinv_entry(x, atom, i, j))
        })))
    }

    fn coulomb_cross_deriv(
        &self,
        elec: &Molecule,
        _nuc: &Molecule,
        dm_nuc: &Mat<f64>,
    ) -> Result<CartTensor, CneoError> {
        let nao = elec.natm() * ELEC_AO_PER_ATOM;
        let mut weight = 0.0;
        for i in 0..dm_nuc.nrows() {
            for j in 0..dm_nuc.ncols() {
                weight += dm_nuc[(i, j)];
            }
        }
        Ok(CartTensor::new([0, 1, 2].map(|x| {
            Mat::from_fn(nao, nao, |i, j| cross_entry(x, i, j) * weight)
        })))
    }
}
