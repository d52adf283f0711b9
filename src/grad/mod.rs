//! This module contains the analytical gradient calculator for coupled
//! nuclear-electronic orbital calculations.
//!
//! It provides the [`Gradients`] assembly over a converged coupled SCF
//! solution, combining the delegated electronic gradient with the
//! nuclear-motion and electron-nucleus cross terms.

mod gradient;

pub use gradient::Gradients;
