//! This module provides per-species nuclear basis recipes and utilities for
//! loading them from TOML files.
//!
//! Each quantum-nucleus species is assigned a list of [`EtbShell`] recipes
//! describing its even-tempered expansion. The embedded defaults cover the
//! proton (8s8p8d, alpha = 2*sqrt(2), beta = sqrt(2)); heavier quantum nuclei
//! can be registered through a TOML file keyed by atomic number or element
//! symbol.

use crate::basis::{BasisShell, EtbShell};
use crate::error::CneoError;
use serde::Deserialize;
use serde::de::{self, Deserializer, MapAccess, Visitor};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

/// The even-tempered shell recipes for one species.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct SpeciesBasis {
    /// One recipe per angular momentum, expanded in listed order.
    pub shells: Vec<EtbShell>,
}

impl SpeciesBasis {
    /// Expands every recipe into single-primitive shells, in listed order.
    pub fn expand(&self) -> Vec<BasisShell> {
        self.shells.iter().flat_map(EtbShell::expand).collect()
    }
}

/// A collection of nuclear basis recipes for multiple species.
///
/// Recipes are indexed by atomic number for lookup during the
/// nuclear-subsystem derivation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NuclearBasisMap {
    /// A mapping from atomic number to the species' shell recipes.
    #[serde(deserialize_with = "deserialize_species_map")]
    pub species: HashMap<u8, SpeciesBasis>,
}

impl NuclearBasisMap {
    /// Creates a new empty `NuclearBasisMap`.
    pub fn new() -> Self {
        NuclearBasisMap {
            species: HashMap::new(),
        }
    }

    /// Loads basis recipes from a TOML file.
    ///
    /// The file should contain a `[species]` table keyed by atomic number or
    /// element symbol, for example:
    ///
    /// ```toml
    /// [species]
    /// "H" = { shells = [{ l = 0, n = 8, alpha = 2.828, beta = 1.414 }] }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`CneoError::IoError`] if the file cannot be read, or
    /// [`CneoError::DeserializationError`] if the TOML content is invalid.
    pub fn load_from_file(path: &Path) -> Result<Self, CneoError> {
        let content = std::fs::read_to_string(path).map_err(|io_error| CneoError::IoError {
            path: path.to_path_buf(),
            source: io_error,
        })?;

        Self::load_from_str(&content)
    }

    /// Parses basis recipes from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`CneoError::DeserializationError`] if the TOML content is
    /// invalid or contains unrecognized species keys.
    pub fn load_from_str(toml_str: &str) -> Result<Self, CneoError> {
        toml::from_str(toml_str).map_err(CneoError::from)
    }

    /// Looks up the recipe for a species by atomic number.
    ///
    /// # Errors
    ///
    /// Returns [`CneoError::SpeciesBasisNotFound`] if no recipe is registered.
    pub fn get(&self, atomic_number: u8) -> Result<&SpeciesBasis, CneoError> {
        self.species
            .get(&atomic_number)
            .ok_or(CneoError::SpeciesBasisNotFound(atomic_number))
    }
}

impl Default for NuclearBasisMap {
    fn default() -> Self {
        Self::new()
    }
}

/// Deserializes a species map with flexible key types.
///
/// Keys can be atomic numbers (as strings) or element symbols; symbols are
/// converted to atomic numbers for internal storage.
fn deserialize_species_map<'de, D>(deserializer: D) -> Result<HashMap<u8, SpeciesBasis>, D::Error>
where
    D: Deserializer<'de>,
{
    struct SpeciesMapVisitor;

    impl<'de> Visitor<'de> for SpeciesMapVisitor {
        type Value = HashMap<u8, SpeciesBasis>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a map from atomic number or symbol to shell recipes")
        }

        fn visit_map<M>(self, mut map: M) -> Result<Self::Value, M::Error>
        where
            M: MapAccess<'de>,
        {
            let mut species = HashMap::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((key, value)) = map.next_entry::<String, SpeciesBasis>()? {
                let atomic_number = key.parse::<u8>().or_else(|_| {
                    element_symbol_to_atomic_number(&key)
                        .ok_or_else(|| de::Error::custom(format!("invalid species key: '{}'", key)))
                })?;
                species.insert(atomic_number, value);
            }
            Ok(species)
        }
    }

    deserializer.deserialize_map(SpeciesMapVisitor)
}

/// Converts an element symbol to its atomic number.
///
/// Quantum-nuclear treatment is only meaningful for light nuclei, so the table
/// stops at argon.
fn element_symbol_to_atomic_number(symbol: &str) -> Option<u8> {
    match symbol {
        "H" => Some(1),
        "He" => Some(2),
        "Li" => Some(3),
        "Be" => Some(4),
        "B" => Some(5),
        "C" => Some(6),
        "N" => Some(7),
        "O" => Some(8),
        "F" => Some(9),
        "Ne" => Some(10),
        "Na" => Some(11),
        "Mg" => Some(12),
        "Al" => Some(13),
        "Si" => Some(14),
        "P" => Some(15),
        "S" => Some(16),
        "Cl" => Some(17),
        "Ar" => Some(18),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_toml_string() -> String {
        r#"
        [species.1]
        shells = [
            { l = 0, n = 8, alpha = 2.8284271247461903, beta = 1.4142135623730951 },
            { l = 1, n = 8, alpha = 2.8284271247461903, beta = 1.4142135623730951 },
            { l = 2, n = 8, alpha = 2.8284271247461903, beta = 1.4142135623730951 },
        ]

        [species.Li]
        shells = [
            { l = 0, n = 12, alpha = 4.0, beta = 1.8 },
        ]
        "#
        .to_string()
    }

    #[test]
    fn test_load_from_str_valid() {
        let map = NuclearBasisMap::load_from_str(&create_test_toml_string()).unwrap();
        assert_eq!(map.species.len(), 2);

        let proton = map.get(1).unwrap();
        assert_eq!(proton.shells.len(), 3);
        assert_eq!(proton.shells[0].n, 8);
        assert_eq!(proton.expand().len(), 24);

        let lithium = map.get(3).unwrap();
        assert_eq!(lithium.shells.len(), 1);
        assert_eq!(lithium.expand().len(), 12);
    }

    #[test]
    fn test_get_missing_species() {
        let map = NuclearBasisMap::load_from_str(&create_test_toml_string()).unwrap();
        let err = map.get(6).unwrap_err();
        assert!(matches!(err, CneoError::SpeciesBasisNotFound(6)));
    }

    #[test]
    fn test_load_from_str_invalid_toml() {
        let result = NuclearBasisMap::load_from_str("this is not valid toml");
        assert!(matches!(result, Err(CneoError::DeserializationError(_))));
    }

    #[test]
    fn test_load_from_str_invalid_species_key() {
        let toml_str = r#"
        [species]
        "Xx" = { shells = [{ l = 0, n = 2, alpha = 1.0, beta = 2.0 }] }
        "#;
        let result = NuclearBasisMap::load_from_str(toml_str);
        assert!(result.is_err());
        let error_string = result.unwrap_err().to_string();
        assert!(error_string.contains("invalid species key: 'Xx'"));
    }

    #[test]
    fn test_load_from_file_valid() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", create_test_toml_string()).unwrap();

        let map = NuclearBasisMap::load_from_file(temp_file.path()).unwrap();
        assert!(map.get(1).is_ok());
    }

    #[test]
    fn test_load_from_file_not_found() {
        let result = NuclearBasisMap::load_from_file(Path::new("non_existent_file.toml"));
        assert!(matches!(result, Err(CneoError::IoError { .. })));
    }

    #[test]
    fn test_element_symbol_to_atomic_number() {
        assert_eq!(element_symbol_to_atomic_number("H"), Some(1));
        assert_eq!(element_symbol_to_atomic_number("Li"), Some(3));
        assert_eq!(element_symbol_to_atomic_number("Ar"), Some(18));
        assert_eq!(element_symbol_to_atomic_number("Fe"), None);
        assert_eq!(element_symbol_to_atomic_number("h"), None);
    }
}
