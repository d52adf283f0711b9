//! A three-component Cartesian tensor over AO index pairs.
//!
//! Derivative integrals come out of the host engine as one matrix per
//! Cartesian direction. This wrapper keeps the three components together and
//! provides the contractions the gradient assembly needs.

use faer::Mat;
use std::ops::Range;

/// One `nao x nao'` matrix per Cartesian component (x, y, z).
#[derive(Debug, Clone)]
pub struct CartTensor {
    comps: [Mat<f64>; 3],
}

impl CartTensor {
    /// Wraps three equally shaped component matrices.
    ///
    /// # Panics
    ///
    /// Panics if the components disagree on shape.
    pub fn new(comps: [Mat<f64>; 3]) -> Self {
        let (r, c) = (comps[0].nrows(), comps[0].ncols());
        assert!(
            comps.iter().all(|m| m.nrows() == r && m.ncols() == c),
            "Cartesian components must share one shape"
        );
        Self { comps }
    }

    /// Number of rows of each component.
    #[inline]
    pub fn nrows(&self) -> usize {
        self.comps[0].nrows()
    }

    /// Number of columns of each component.
    #[inline]
    pub fn ncols(&self) -> usize {
        self.comps[0].ncols()
    }

    /// The component matrix for Cartesian direction `x` (0, 1, or 2).
    #[inline]
    pub fn comp(&self, x: usize) -> &Mat<f64> {
        &self.comps[x]
    }

    /// Returns `M + M^T` per component, symmetrizing the two AO indices.
    ///
    /// # Panics
    ///
    /// Panics if the components are not square.
    pub fn symmetrized(&self) -> Self {
        let n = self.nrows();
        assert_eq!(n, self.ncols(), "symmetrization requires square components");
        Self {
            comps: [0, 1, 2].map(|x| {
                let m = &self.comps[x];
                Mat::from_fn(n, n, |i, j| m[(i, j)] + m[(j, i)])
            }),
        }
    }

    /// Returns the tensor with every component multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            comps: [0, 1, 2].map(|x| {
                let m = &self.comps[x];
                Mat::from_fn(m.nrows(), m.ncols(), |i, j| factor * m[(i, j)])
            }),
        }
    }

    /// Full contraction `sum_ij t[x, i, j] * dm[i, j]` per component.
    ///
    /// # Panics
    ///
    /// Panics if `dm` does not match the component shape.
    pub fn contract(&self, dm: &Mat<f64>) -> [f64; 3] {
        self.contract_rows(0..self.nrows(), dm)
    }

    /// Contraction restricted to the row block `rows`, with `dm` indexed by
    /// the same absolute row indices: `sum_{i in rows, j} t[x, i, j] * dm[i, j]`.
    ///
    /// # Panics
    ///
    /// Panics if `rows` or `dm` fall outside the component shape.
    pub fn contract_rows(&self, rows: Range<usize>, dm: &Mat<f64>) -> [f64; 3] {
        assert!(rows.end <= self.nrows() && rows.end <= dm.nrows());
        assert_eq!(self.ncols(), dm.ncols());
        let mut out = [0.0; 3];
        for (x, comp) in self.comps.iter().enumerate() {
            let mut acc = 0.0;
            for i in rows.clone() {
                for j in 0..comp.ncols() {
                    acc += comp[(i, j)] * dm[(i, j)];
                }
            }
            out[x] = acc;
        }
        out
    }
}
