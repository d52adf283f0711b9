use std::path::PathBuf;
use thiserror::Error;

/// The primary error type for all fallible operations in the `cneo` library.
///
/// Failures in the host integral engine are carried through unchanged as
/// [`CneoError::Engine`]; everything the library itself can detect up front
/// (bad atom indices, missing basis recipes, inconsistent matrix shapes) gets
/// its own variant so callers can react before an expensive gradient run.
#[derive(Error, Debug)]
pub enum CneoError {
    /// An atom index referred to an atom that does not exist in the molecule.
    ///
    /// Raised by [`crate::Molecule::set_quantum_nuclei`] and by the gradient
    /// kernel when an explicit atom subset is supplied.
    #[error("Atom index {index} is out of range for a molecule with {natm} atoms")]
    AtomIndexOutOfRange {
        /// The offending index.
        index: usize,
        /// The number of atoms in the molecule.
        natm: usize,
    },

    /// No even-tempered basis recipe is registered for a quantum-nucleus
    /// species, identified by its atomic number.
    ///
    /// The embedded defaults cover hydrogen only; heavier quantum nuclei
    /// require an entry in the [`crate::params::NuclearBasisMap`].
    #[error("No nuclear basis recipe registered for element with atomic number: {0}")]
    SpeciesBasisNotFound(u8),

    /// A matrix or vector supplied to the gradient calculator does not have
    /// the shape implied by the subsystem basis sets.
    #[error("Dimension mismatch in {context}: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Which quantity had the wrong shape.
        context: &'static str,
        /// The expected shape, formatted as `rows x cols`.
        expected: String,
        /// The shape that was actually supplied.
        actual: String,
    },

    /// A failure reported by the host integral engine while evaluating an
    /// integral or the delegated electronic gradient.
    ///
    /// The message is whatever diagnostic the engine produced; the library
    /// performs no recovery.
    #[error("Integral engine failure: {0}")]
    Engine(String),

    /// An I/O error that occurred while reading a basis-recipe file.
    #[error("I/O error at path '{path}': {source}")]
    IoError {
        /// The path of the file that caused the I/O error.
        path: PathBuf,
        /// The underlying `std::io::Error`.
        #[source]
        source: std::io::Error,
    },

    /// An error that occurred while parsing a basis-recipe file, typically
    /// invalid TOML or a structural mismatch with the expected format.
    #[error("Failed to deserialize TOML basis recipes: {0}")]
    DeserializationError(#[from] toml::de::Error),
}
