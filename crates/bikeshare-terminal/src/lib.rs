//! Terminal output formatting for bikeshare
//!
//! This crate renders trip statistics and raw-data pages as text.

pub mod output;

pub use output::{ReportFormatter, TableFormatter, get_formatter};
