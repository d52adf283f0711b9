//! Even-tempered Gaussian basis construction and atomic-orbital bookkeeping
//! for quantum nuclei.
//!
//! A quantum nucleus is expanded in uncontracted Gaussian shells whose
//! exponents follow a geometric progression `alpha * beta^i`. The recipe for a
//! species is a list of [`EtbShell`] entries (one per angular momentum), and
//! expanding a recipe yields one single-primitive [`BasisShell`] per exponent.
//! The [`QuantumBasisSet`] tracks which contiguous AO index range belongs to
//! each atom, which the gradient kernel needs to slice per-atom blocks out of
//! density and derivative matrices.

use serde::Deserialize;

/// An even-tempered shell recipe: `n` uncontracted primitives of angular
/// momentum `l` with exponents `alpha * beta^i` for `i = 0..n`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct EtbShell {
    /// Angular momentum quantum number (0 = s, 1 = p, 2 = d, ...).
    pub l: u8,
    /// Number of primitives in the geometric progression.
    pub n: u32,
    /// Starting exponent of the progression.
    pub alpha: f64,
    /// Common ratio of the progression.
    pub beta: f64,
}

impl EtbShell {
    /// Expands the recipe into one single-primitive shell per exponent,
    /// tightest exponent last.
    pub fn expand(&self) -> Vec<BasisShell> {
        (0..self.n)
            .map(|i| BasisShell {
                l: self.l,
                exponent: self.alpha * self.beta.powi(i as i32),
            })
            .collect()
    }
}

/// A single uncontracted Gaussian shell placed on one atom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BasisShell {
    /// Angular momentum quantum number.
    pub l: u8,
    /// Gaussian exponent of the primitive.
    pub exponent: f64,
}

impl BasisShell {
    /// Number of spherical components carried by this shell, `2l + 1`.
    #[inline]
    pub fn degeneracy(&self) -> usize {
        2 * usize::from(self.l) + 1
    }
}

/// The contiguous shell and AO index ranges belonging to one atom.
///
/// Mirrors the `(shl0, shl1, p0, p1)` convention of AO-slice-by-atom lookups:
/// shells `shell0..shell1` and AO functions `ao0..ao1` sit on the atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AoSlice {
    /// First shell index on the atom.
    pub shell0: usize,
    /// One past the last shell index on the atom.
    pub shell1: usize,
    /// First AO function index on the atom.
    pub ao0: usize,
    /// One past the last AO function index on the atom.
    pub ao1: usize,
}

impl AoSlice {
    /// Number of AO functions on the atom.
    #[inline]
    pub fn nao(&self) -> usize {
        self.ao1 - self.ao0
    }
}

/// A per-atom basis assignment with precomputed AO offsets.
///
/// Atoms without shells (classical nuclei in the nuclear subsystem) occupy
/// zero-width slices, so slice lookups stay valid for every atom index.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantumBasisSet {
    shells: Vec<Vec<BasisShell>>,
    slices: Vec<AoSlice>,
    nao: usize,
}

impl QuantumBasisSet {
    /// Builds the basis set from one shell list per atom, computing shell and
    /// AO offsets in atom-index order.
    pub fn new(shells: Vec<Vec<BasisShell>>) -> Self {
        let mut slices = Vec::with_capacity(shells.len());
        let mut shell_offset = 0;
        let mut ao_offset = 0;
        for atom_shells in &shells {
            let n_shells = atom_shells.len();
            let n_ao: usize = atom_shells.iter().map(BasisShell::degeneracy).sum();
            slices.push(AoSlice {
                shell0: shell_offset,
                shell1: shell_offset + n_shells,
                ao0: ao_offset,
                ao1: ao_offset + n_ao,
            });
            shell_offset += n_shells;
            ao_offset += n_ao;
        }
        Self {
            shells,
            slices,
            nao: ao_offset,
        }
    }

    /// Total number of AO functions in the basis.
    #[inline]
    pub fn nao(&self) -> usize {
        self.nao
    }

    /// Shells sitting on atom `i`.
    #[inline]
    pub fn shells(&self, i: usize) -> &[BasisShell] {
        &self.shells[i]
    }

    /// AO slice of atom `i`.
    #[inline]
    pub fn ao_slice(&self, i: usize) -> AoSlice {
        self.slices[i]
    }
}
