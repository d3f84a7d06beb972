//! Common test utilities and helpers for bikeshare tests
//!
//! Builders for trip rows, and helpers that write city CSV files into a
//! temporary data directory the way the real data files are laid out.

use bikeshare_core::types::TripRecord;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Header of a city file with demographic columns
pub const FULL_HEADER: &str =
    ",Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year";

/// Header of a city file without demographic columns
pub const BASIC_HEADER: &str =
    ",Start Time,End Time,Trip Duration,Start Station,End Station,User Type";

/// Builder for creating test trip rows
#[derive(Debug, Clone)]
pub struct TripRowBuilder {
    start_time: NaiveDateTime,
    duration: f64,
    start_station: String,
    end_station: String,
    user_type: String,
    gender: Option<String>,
    birth_year: Option<i32>,
}

impl TripRowBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            start_time: at(2017, 1, 2, 8),
            duration: 600.0,
            start_station: "Canal St & Adams St".to_string(),
            end_station: "Clark St & Randolph St".to_string(),
            user_type: "Subscriber".to_string(),
            gender: None,
            birth_year: None,
        }
    }

    pub fn starting(mut self, year: i32, month: u32, day: u32, hour: u32) -> Self {
        self.start_time = at(year, month, day, hour);
        self
    }

    pub fn with_duration(mut self, seconds: f64) -> Self {
        self.duration = seconds;
        self
    }

    pub fn with_stations(mut self, from: &str, to: &str) -> Self {
        self.start_station = from.to_string();
        self.end_station = to.to_string();
        self
    }

    pub fn with_user_type(mut self, user_type: &str) -> Self {
        self.user_type = user_type.to_string();
        self
    }

    pub fn with_gender(mut self, gender: &str) -> Self {
        self.gender = Some(gender.to_string());
        self
    }

    pub fn with_birth_year(mut self, year: i32) -> Self {
        self.birth_year = Some(year);
        self
    }

    fn end_time(&self) -> NaiveDateTime {
        self.start_time + Duration::seconds(self.duration as i64)
    }

    /// Render the row as a CSV line with a leading index cell
    pub fn csv_line(&self, index: usize, demographics: bool) -> String {
        let mut cells = vec![
            index.to_string(),
            self.start_time.format("%Y-%m-%d %H:%M:%S").to_string(),
            self.end_time().format("%Y-%m-%d %H:%M:%S").to_string(),
            self.duration.to_string(),
            self.start_station.clone(),
            self.end_station.clone(),
            self.user_type.clone(),
        ];
        if demographics {
            cells.push(self.gender.clone().unwrap_or_default());
            cells.push(
                self.birth_year
                    .map(|year| format!("{year}.0"))
                    .unwrap_or_default(),
            );
        }
        cells.join(",")
    }

    /// The record the loader should produce for [`Self::csv_line`]
    pub fn build(&self) -> TripRecord {
        let mut trip = TripRecord::new(
            self.start_time,
            self.start_station.as_str(),
            self.end_station.as_str(),
            self.duration,
        )
        .with_end_time(self.end_time())
        .with_user_type(self.user_type.as_str());
        if let Some(gender) = &self.gender {
            trip = trip.with_gender(gender.as_str());
        }
        if let Some(year) = self.birth_year {
            trip = trip.with_birth_year(f64::from(year));
        }
        trip
    }
}

impl Default for TripRowBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Timestamp at the top of the given hour
pub fn at(year: i32, month: u32, day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

/// Write a city CSV file into `dir`
pub fn write_city_file(
    dir: &Path,
    file_name: &str,
    rows: &[TripRowBuilder],
    demographics: bool,
) -> PathBuf {
    let header = if demographics { FULL_HEADER } else { BASIC_HEADER };
    let mut content = String::from(header);
    content.push('\n');
    for (index, row) in rows.iter().enumerate() {
        content.push_str(&row.csv_line(index, demographics));
        content.push('\n');
    }

    let path = dir.join(file_name);
    fs::write(&path, content).unwrap();
    path
}

/// Chicago trips spread over January to March
pub fn chicago_rows() -> Vec<TripRowBuilder> {
    vec![
        // Sunday 2017-01-01
        TripRowBuilder::new()
            .starting(2017, 1, 1, 9)
            .with_duration(3600.0)
            .with_gender("Male")
            .with_birth_year(1985),
        // Monday 2017-01-02
        TripRowBuilder::new()
            .starting(2017, 1, 2, 9)
            .with_duration(1800.0)
            .with_stations("Canal St & Adams St", "Wells St & Elm St")
            .with_user_type("Customer"),
        // Monday 2017-01-09
        TripRowBuilder::new()
            .starting(2017, 1, 9, 17)
            .with_duration(900.0)
            .with_gender("Female")
            .with_birth_year(1990),
        // Monday 2017-02-06
        TripRowBuilder::new()
            .starting(2017, 2, 6, 17)
            .with_stations("Clark St & Randolph St", "Canal St & Adams St")
            .with_gender("Female")
            .with_birth_year(1990),
        // Tuesday 2017-03-07
        TripRowBuilder::new()
            .starting(2017, 3, 7, 8)
            .with_gender("Male")
            .with_birth_year(2001),
    ]
}

/// Washington trips; the file has no demographic columns
pub fn washington_rows() -> Vec<TripRowBuilder> {
    vec![
        TripRowBuilder::new()
            .starting(2017, 4, 3, 7)
            .with_stations("Union Station", "Dupont Circle"),
        TripRowBuilder::new()
            .starting(2017, 4, 4, 7)
            .with_stations("Union Station", "Dupont Circle")
            .with_user_type("Customer"),
        TripRowBuilder::new()
            .starting(2017, 6, 10, 18)
            .with_stations("Dupont Circle", "Union Station"),
    ]
}

/// Data directory with chicago.csv and washington.csv, but no New York file
pub fn sample_data_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_city_file(dir.path(), "chicago.csv", &chicago_rows(), true);
    write_city_file(dir.path(), "washington.csv", &washington_rows(), false);
    dir
}
