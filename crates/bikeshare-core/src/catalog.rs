//! City catalog
//!
//! The catalog is the single place that knows which cities exist and where
//! their trip data lives. Adding a city means adding a [`CitySource`] to
//! [`DEFAULT_CITY_SOURCES`]; nothing else changes.
//!
//! # Examples
//!
//! ```
//! use bikeshare_core::catalog::CityCatalog;
//!
//! let catalog = CityCatalog::new("data");
//! let entry = catalog.lookup("New York City").unwrap();
//! assert!(entry.path.ends_with("new_york_city.csv"));
//! assert!(catalog.lookup("boston").is_none());
//! ```

use crate::error::{BikeshareError, Result};
use crate::types::CityName;
use std::path::{Path, PathBuf};

/// Static description of one city's data source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CitySource {
    /// Lowercase city name the user types
    pub name: &'static str,
    /// File name inside the data directory
    pub file_name: &'static str,
    /// Whether the file is expected to carry gender and birth year columns
    pub demographics: bool,
}

/// Cities shipped with the US bikeshare dataset
pub const DEFAULT_CITY_SOURCES: &[CitySource] = &[
    CitySource {
        name: "chicago",
        file_name: "chicago.csv",
        demographics: true,
    },
    CitySource {
        name: "new york city",
        file_name: "new_york_city.csv",
        demographics: true,
    },
    CitySource {
        name: "washington",
        file_name: "washington.csv",
        demographics: false,
    },
];

/// A catalog city resolved against a data directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityEntry {
    /// Normalized city name
    pub name: CityName,
    /// Full path of the city's CSV file
    pub path: PathBuf,
    /// Whether demographic columns are expected
    pub demographics: bool,
}

/// Immutable mapping from city name to data file
#[derive(Debug, Clone)]
pub struct CityCatalog {
    entries: Vec<CityEntry>,
}

impl CityCatalog {
    /// Catalog of the default cities, with files resolved under `data_dir`
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self::from_sources(data_dir, DEFAULT_CITY_SOURCES)
    }

    /// Catalog built from an explicit source list
    pub fn from_sources(data_dir: impl AsRef<Path>, sources: &[CitySource]) -> Self {
        let data_dir = data_dir.as_ref();
        let entries = sources
            .iter()
            .map(|source| CityEntry {
                name: CityName::new(source.name),
                path: data_dir.join(source.file_name),
                demographics: source.demographics,
            })
            .collect();
        Self { entries }
    }

    /// Find a city by user input, ignoring case and surrounding whitespace
    pub fn lookup(&self, input: &str) -> Option<&CityEntry> {
        let wanted = CityName::new(input);
        self.entries.iter().find(|entry| entry.name == wanted)
    }

    /// Find a city that is known to be in the catalog
    ///
    /// # Errors
    ///
    /// Returns [`BikeshareError::UnknownCity`] if the name is not cataloged
    pub fn get(&self, city: &CityName) -> Result<&CityEntry> {
        self.entries
            .iter()
            .find(|entry| &entry.name == city)
            .ok_or_else(|| BikeshareError::UnknownCity(city.to_string()))
    }

    /// Whether the catalog knows `city`
    pub fn contains(&self, city: &CityName) -> bool {
        self.entries.iter().any(|entry| &entry.name == city)
    }

    /// All entries in catalog order
    pub fn entries(&self) -> &[CityEntry] {
        &self.entries
    }

    /// Title-cased, comma-separated city list for prompts
    pub fn display_list(&self) -> String {
        self.entries
            .iter()
            .map(|entry| entry.name.title())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog() {
        let catalog = CityCatalog::new("/data");
        assert_eq!(catalog.entries().len(), 3);
        assert_eq!(catalog.display_list(), "Chicago, New York City, Washington");

        let washington = catalog.lookup("WASHINGTON").unwrap();
        assert_eq!(washington.path, PathBuf::from("/data/washington.csv"));
        assert!(!washington.demographics);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let catalog = CityCatalog::new(".");
        assert!(catalog.lookup("  new YORK city").is_some());
        assert!(catalog.lookup("newyorkcity").is_none());
        assert!(catalog.lookup("").is_none());
    }

    #[test]
    fn test_get_unknown_city() {
        let catalog = CityCatalog::new(".");
        let result = catalog.get(&CityName::new("boston"));
        assert!(matches!(result, Err(BikeshareError::UnknownCity(name)) if name == "boston"));
        assert!(catalog.contains(&CityName::new("chicago")));
    }

    #[test]
    fn test_custom_sources() {
        let sources = [CitySource {
            name: "Portland",
            file_name: "portland.csv",
            demographics: false,
        }];
        let catalog = CityCatalog::from_sources("trips", &sources);
        let entry = catalog.lookup("portland").unwrap();
        assert_eq!(entry.name.as_str(), "portland");
        assert_eq!(entry.path, PathBuf::from("trips/portland.csv"));
    }
}
