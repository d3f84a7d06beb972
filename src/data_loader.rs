//! Data loader module for city trip files
//!
//! This module reads a city's CSV file fully into memory, parses the start
//! timestamps, and derives month, weekday, and hour for every trip.
//!
//! Required columns are `Start Time`, `Trip Duration`, `Start Station`,
//! `End Station` and `User Type`. `End Time`, `Gender` and `Birth Year` are
//! picked up when the header has them. Other columns are ignored.
//!
//! Inside the rows the loader is lenient: blank cells and short rows leave
//! the affected fields empty, and only a row whose `Start Time` cannot be
//! parsed is skipped (with a warning).
//!
//! # Examples
//!
//! ```no_run
//! use bikeshare::data_loader::DataLoader;
//! use bikeshare_core::catalog::CityCatalog;
//!
//! # fn example() -> bikeshare::Result<()> {
//! let catalog = CityCatalog::new("data");
//! let entry = catalog.lookup("chicago").unwrap();
//!
//! let table = DataLoader::new().load(entry)?;
//! println!("Loaded {} trips for {}", table.len(), table.city());
//! # Ok(())
//! # }
//! ```

use bikeshare_core::catalog::CityEntry;
use bikeshare_core::error::{BikeshareError, Result};
use bikeshare_core::types::{ColumnSet, DerivedTime, StationName, TripRecord, TripTable};
use chrono::NaiveDateTime;
use csv::{ReaderBuilder, Trim};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Columns every city file must have
pub const REQUIRED_COLUMNS: [&str; 5] = [
    "Start Time",
    "Trip Duration",
    "Start Station",
    "End Station",
    "User Type",
];

/// Timestamp layouts accepted in `Start Time` and `End Time`
const TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Parse a trip timestamp
///
/// # Errors
///
/// Returns [`BikeshareError::InvalidTimestamp`] if no accepted layout matches
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime> {
    let value = value.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .ok_or_else(|| BikeshareError::InvalidTimestamp(value.to_string()))
}

/// One CSV row as it appears on disk
///
/// Every cell is optional: blank cells, unparseable numbers and cells past
/// the end of a short row all read as `None`.
#[derive(Debug, Deserialize)]
struct RawTrip {
    #[serde(rename = "Start Time", default)]
    start_time: Option<String>,
    #[serde(rename = "End Time", default)]
    end_time: Option<String>,
    #[serde(rename = "Trip Duration", default, deserialize_with = "csv::invalid_option")]
    trip_duration: Option<f64>,
    #[serde(rename = "Start Station", default)]
    start_station: Option<String>,
    #[serde(rename = "End Station", default)]
    end_station: Option<String>,
    #[serde(rename = "User Type", default)]
    user_type: Option<String>,
    #[serde(rename = "Gender", default)]
    gender: Option<String>,
    #[serde(rename = "Birth Year", default, deserialize_with = "csv::invalid_option")]
    birth_year: Option<f64>,
}

impl RawTrip {
    /// Only the start time is mandatory; everything else may be missing
    fn into_trip(self) -> Result<TripRecord> {
        let start_time = parse_timestamp(self.start_time.as_deref().unwrap_or_default())?;
        let end_time = self
            .end_time
            .as_deref()
            .and_then(|value| parse_timestamp(value).ok());

        Ok(TripRecord {
            start_time,
            end_time,
            trip_duration: self.trip_duration,
            start_station: self.start_station.map(StationName::new),
            end_station: self.end_station.map(StationName::new),
            user_type: self.user_type,
            gender: self.gender,
            birth_year: self.birth_year,
            derived: DerivedTime::from_start(&start_time),
        })
    }
}

/// Loader for city trip files
///
/// Every call to [`DataLoader::load`] reads the file again; tables are not
/// cached between session iterations.
#[derive(Debug, Default, Clone)]
pub struct DataLoader {
    /// Whether to show a spinner while reading
    show_progress: bool,
}

impl DataLoader {
    /// Create a new DataLoader
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the loading spinner
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Load the trip table of a catalog city
    ///
    /// # Errors
    ///
    /// Returns [`BikeshareError::DataUnavailable`] if the file cannot be
    /// opened, its header cannot be read, or it lacks a required column
    pub fn load(&self, entry: &CityEntry) -> Result<TripTable> {
        debug!("Opening {} for {}", entry.path.display(), entry.name);
        let file = File::open(&entry.path)
            .map_err(|e| BikeshareError::data_unavailable(&entry.name, &entry.path, e))?;

        let table = self.read_table(entry, file)?;
        info!(
            "Loaded {} trips for {} from {}",
            table.len(),
            entry.name,
            entry.path.display()
        );
        Ok(table)
    }

    /// Parse a trip table from any CSV reader
    pub fn read_table<R: Read>(&self, entry: &CityEntry, reader: R) -> Result<TripTable> {
        let unavailable =
            |reason: String| BikeshareError::data_unavailable(&entry.name, &entry.path, reason);

        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::Headers)
            .from_reader(reader);

        let headers = csv_reader
            .headers()
            .map_err(|e| unavailable(format!("unreadable header: {e}")))?
            .clone();
        let has_column = |name: &str| headers.iter().any(|header| header == name);

        if let Some(missing) = REQUIRED_COLUMNS
            .into_iter()
            .find(|column| !has_column(*column))
        {
            return Err(unavailable(format!("missing required column '{missing}'")));
        }

        let columns = ColumnSet {
            end_time: has_column("End Time"),
            gender: has_column("Gender"),
            birth_year: has_column("Birth Year"),
        };
        debug!("Optional columns for {}: {:?}", entry.name, columns);

        if columns.has_demographics() != entry.demographics {
            warn!(
                "Catalog expects demographics={} for {} but the file header says otherwise; using the header",
                entry.demographics, entry.name
            );
        }

        let progress = if self.show_progress {
            let pb = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg} [{elapsed_precise}] {pos} trips read")
            {
                pb.set_style(style);
            }
            pb.set_message(format!("Loading {} trip data", entry.name.title()));
            pb.enable_steady_tick(Duration::from_millis(120));
            Some(pb)
        } else {
            None
        };

        let mut rows = Vec::new();
        let mut missing_durations = 0;
        for (index, result) in csv_reader.deserialize::<RawTrip>().enumerate() {
            // Row 1 is the first line after the header
            let row_number = index + 1;
            let parsed = result
                .map_err(|e| e.to_string())
                .and_then(|raw| raw.into_trip().map_err(|e| e.to_string()));

            match parsed {
                Ok(trip) => {
                    if trip.trip_duration.is_none() {
                        missing_durations += 1;
                    }
                    rows.push(trip);
                }
                Err(reason) => {
                    warn!(
                        "Skipping row {row_number} of {}: {reason}",
                        entry.path.display()
                    );
                }
            }

            if let Some(pb) = &progress {
                pb.inc(1);
            }
        }

        if let Some(pb) = progress {
            pb.finish_and_clear();
        }

        if missing_durations > 0 {
            warn!(
                "{missing_durations} trips for {} have no trip duration and are left out of duration statistics",
                entry.name
            );
        }

        Ok(TripTable::new(entry.name.clone(), columns, rows))
    }
}
