//! Error types for bikeshare
//!
//! This module defines the error types used throughout the bikeshare crates.
//! All errors are derived from `thiserror` for convenient error handling
//! and automatic `From` implementations.
//!
//! Invalid user input and missing optional columns are not errors: the
//! prompt loop re-asks and the aggregators report an unavailable column.
//!
//! # Example
//!
//! ```
//! use bikeshare_core::error::{BikeshareError, Result};
//!
//! fn example_function() -> Result<()> {
//!     // This will automatically convert io::Error to BikeshareError
//!     let _file = std::fs::read_to_string("nonexistent.csv")?;
//!     Ok(())
//! }
//!
//! assert!(matches!(example_function(), Err(BikeshareError::Io(_))));
//! ```

use std::path::PathBuf;
use thiserror::Error;

use crate::types::CityName;

/// Main error type for bikeshare operations
#[derive(Error, Debug)]
pub enum BikeshareError {
    /// IO error occurred while talking to the terminal
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The trip data for a city could not be loaded
    #[error("Data unavailable for {city} ({}): {reason}", .path.display())]
    DataUnavailable {
        /// The city whose data was requested
        city: CityName,
        /// The file backing that city
        path: PathBuf,
        /// What went wrong
        reason: String,
    },

    /// Timestamp that matches none of the accepted layouts
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// City that is not part of the catalog
    #[error("Unknown city: {0}")]
    UnknownCity(String),

    /// Standard input reached end of file while a prompt was waiting
    #[error("Input closed")]
    InputClosed,
}

impl BikeshareError {
    /// Build a [`BikeshareError::DataUnavailable`] from any displayable cause
    pub fn data_unavailable(
        city: &CityName,
        path: impl Into<PathBuf>,
        reason: impl std::fmt::Display,
    ) -> Self {
        Self::DataUnavailable {
            city: city.clone(),
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// Convenience type alias for Results in bikeshare
pub type Result<T> = std::result::Result<T, BikeshareError>;
