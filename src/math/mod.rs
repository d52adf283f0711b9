//! This module provides mathematical utilities and physical constants for the
//! cneo library.
//!
//! It contains fundamental constants for unit conversions and numerical
//! thresholds, and the Cartesian-component tensor type used to carry
//! derivative integrals through contraction and symmetrization.

/// Physical and mathematical constants used throughout the library.
pub mod constants;

/// Three-component Cartesian tensors over AO index pairs.
pub mod tensor;
