//! bikeshare - Explore US bikeshare trip data from the terminal
//!
//! This library provides functionality to:
//! - Load a city's trip CSV into memory with derived month, weekday and hour
//! - Ask the user for a city and a month or weekday filter
//! - Compute popular times, stations, trip durations and user demographics
//! - Page through the filtered raw data five rows at a time
//!
//! # Examples
//!
//! ```no_run
//! use bikeshare::{
//!     data_loader::DataLoader,
//!     prompt::Prompter,
//!     session::Session,
//! };
//! use bikeshare_core::catalog::CityCatalog;
//! use bikeshare_terminal::get_formatter;
//!
//! fn main() -> bikeshare::Result<()> {
//!     let stdin = std::io::stdin();
//!     let prompter = Prompter::new(stdin.lock(), std::io::stdout());
//!     let mut session = Session::new(
//!         CityCatalog::new("data"),
//!         DataLoader::new(),
//!         get_formatter(false),
//!         prompter,
//!     );
//!     session.run()?;
//!     Ok(())
//! }
//! ```

pub mod aggregation;
pub mod browser;
pub mod cli;
pub mod data_loader;
pub mod prompt;
pub mod selector;
pub mod session;

// Re-export commonly used types
pub use bikeshare_core::error::{BikeshareError, Result};
pub use bikeshare_core::types::{CityName, Selection, TripRecord, TripTable};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
