//! Core types, catalog, and filters for bikeshare
//!
//! This crate provides the foundational trip types, the city catalog,
//! error handling, time filters, and aggregation result types used
//! by the other bikeshare crates.

pub mod aggregation_types;
pub mod catalog;
pub mod error;
pub mod filters;
pub mod types;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types
pub use catalog::{CityCatalog, CityEntry, CitySource};
pub use error::{BikeshareError, Result};
pub use types::{
    CityName, ColumnSet, DerivedTime, FilterAxis, Selection, StationName, TripRecord, TripTable,
};
