//! Core domain types for bikeshare
//!
//! This module contains the fundamental types used throughout the bikeshare
//! crates: strongly-typed city and station names, trip records with their
//! derived time fields, the in-memory trip table, and the user's filter
//! selection.

use chrono::{Datelike, Month, NaiveDateTime, Timelike, Weekday};
use std::fmt;

/// Months a user may filter by. The source datasets cover January to June.
pub const ADMITTED_MONTHS: [Month; 6] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
];

/// Weekdays in the order they are offered to the user
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Full English name of a weekday, e.g. `Monday`
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Full English name of a month number (1-12)
pub fn month_name(month: u32) -> Option<&'static str> {
    u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name())
}

/// Parse one of the admitted month names, ignoring case and surrounding whitespace
pub fn parse_admitted_month(input: &str) -> Option<Month> {
    let input = input.trim();
    ADMITTED_MONTHS
        .into_iter()
        .find(|m| m.name().eq_ignore_ascii_case(input))
}

/// Parse a full weekday name, ignoring case and surrounding whitespace
pub fn parse_weekday(input: &str) -> Option<Weekday> {
    let input = input.trim();
    WEEKDAYS
        .into_iter()
        .find(|d| weekday_name(*d).eq_ignore_ascii_case(input))
}

/// Normalized city name
///
/// City names are stored lowercase so catalog lookups are case-insensitive.
///
/// # Examples
/// ```
/// use bikeshare_core::types::CityName;
///
/// let city = CityName::new("  New York City ");
/// assert_eq!(city.as_str(), "new york city");
/// assert_eq!(city.title(), "New York City");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CityName(String);

impl CityName {
    /// Create a new CityName, trimming and lowercasing the input
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(name.as_ref().trim().to_lowercase())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Title-cased form for display (`new york city` -> `New York City`)
    pub fn title(&self) -> String {
        self.0
            .split(' ')
            .filter(|word| !word.is_empty())
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            })
            .collect::<Vec<String>>()
            .join(" ")
    }
}

impl fmt::Display for CityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Strongly-typed station name wrapper
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationName(String);

impl StationName {
    /// Create a new StationName
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for StationName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Time fields derived from a trip's start timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedTime {
    /// Month of year, 1-12
    pub month: u32,
    /// Day of week
    pub weekday: Weekday,
    /// Hour of day, 0-23
    pub hour: u32,
}

impl DerivedTime {
    /// Derive month, weekday, and hour from a start timestamp
    pub fn from_start(start: &NaiveDateTime) -> Self {
        Self {
            month: start.month(),
            weekday: start.weekday(),
            hour: start.hour(),
        }
    }
}

/// One bicycle-share ride
///
/// # Examples
/// ```
/// use bikeshare_core::types::TripRecord;
/// use chrono::{NaiveDate, Weekday};
///
/// let start = NaiveDate::from_ymd_opt(2017, 1, 2)
///     .unwrap()
///     .and_hms_opt(8, 15, 0)
///     .unwrap();
/// let trip = TripRecord::new(start, "Canal St", "Clark St", 600.0);
///
/// assert_eq!(trip.derived.month, 1);
/// assert_eq!(trip.derived.weekday, Weekday::Mon);
/// assert_eq!(trip.trip_label().as_deref(), Some("Canal St to Clark St"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TripRecord {
    /// When the ride started
    pub start_time: NaiveDateTime,
    /// When the ride ended, if the source file carries it
    pub end_time: Option<NaiveDateTime>,
    /// Ride length in seconds, `None` when the cell is blank
    pub trip_duration: Option<f64>,
    /// Station the ride started from
    pub start_station: Option<StationName>,
    /// Station the ride ended at
    pub end_station: Option<StationName>,
    /// Rider category (e.g. `Subscriber`, `Customer`)
    pub user_type: Option<String>,
    /// Rider gender, only present in some cities
    pub gender: Option<String>,
    /// Rider birth year, only present in some cities
    pub birth_year: Option<f64>,
    /// Fields derived from `start_time`
    pub derived: DerivedTime,
}

impl TripRecord {
    /// Create a trip with the required fields; optional fields start empty
    pub fn new(
        start_time: NaiveDateTime,
        start_station: impl Into<String>,
        end_station: impl Into<String>,
        trip_duration: f64,
    ) -> Self {
        Self {
            start_time,
            end_time: None,
            trip_duration: Some(trip_duration),
            start_station: Some(StationName::new(start_station)),
            end_station: Some(StationName::new(end_station)),
            user_type: None,
            gender: None,
            birth_year: None,
            derived: DerivedTime::from_start(&start_time),
        }
    }

    /// Set the end timestamp
    pub fn with_end_time(mut self, end_time: NaiveDateTime) -> Self {
        self.end_time = Some(end_time);
        self
    }

    /// Set the user type
    pub fn with_user_type(mut self, user_type: impl Into<String>) -> Self {
        self.user_type = Some(user_type.into());
        self
    }

    /// Set the gender
    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    /// Set the birth year
    pub fn with_birth_year(mut self, year: f64) -> Self {
        self.birth_year = Some(year);
        self
    }

    /// Composite point-to-point label, `<start> to <end>`
    ///
    /// `None` unless both stations are known.
    pub fn trip_label(&self) -> Option<String> {
        match (&self.start_station, &self.end_station) {
            (Some(start), Some(end)) => Some(format!("{start} to {end}")),
            _ => None,
        }
    }
}

/// Optional columns present in a city's source file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnSet {
    /// `End Time` column
    pub end_time: bool,
    /// `Gender` column
    pub gender: bool,
    /// `Birth Year` column
    pub birth_year: bool,
}

impl ColumnSet {
    /// Every optional column present
    pub fn full() -> Self {
        Self {
            end_time: true,
            gender: true,
            birth_year: true,
        }
    }

    /// Whether both demographic columns are present
    pub fn has_demographics(&self) -> bool {
        self.gender && self.birth_year
    }
}

/// Trip records for one city, in file order
#[derive(Debug, Clone, PartialEq)]
pub struct TripTable {
    city: CityName,
    columns: ColumnSet,
    rows: Vec<TripRecord>,
}

impl TripTable {
    /// Create a table from already parsed rows
    pub fn new(city: CityName, columns: ColumnSet, rows: Vec<TripRecord>) -> Self {
        Self {
            city,
            columns,
            rows,
        }
    }

    /// City the rows belong to
    pub fn city(&self) -> &CityName {
        &self.city
    }

    /// Optional columns this table carries
    pub fn columns(&self) -> ColumnSet {
        self.columns
    }

    /// All rows
    pub fn rows(&self) -> &[TripRecord] {
        &self.rows
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate over rows
    pub fn iter(&self) -> std::slice::Iter<'_, TripRecord> {
        self.rows.iter()
    }

    /// Rows `offset..offset + len`, clamped to the table bounds
    pub fn page(&self, offset: usize, len: usize) -> &[TripRecord] {
        let start = offset.min(self.rows.len());
        let end = offset.saturating_add(len).min(self.rows.len());
        &self.rows[start..end]
    }
}

impl<'a> IntoIterator for &'a TripTable {
    type Item = &'a TripRecord;
    type IntoIter = std::slice::Iter<'a, TripRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Which single dimension the user chose to restrict by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterAxis {
    Month,
    Day,
    Neither,
}

impl FilterAxis {
    /// All axes in prompt order
    pub const ALL: [FilterAxis; 3] = [FilterAxis::Month, FilterAxis::Day, FilterAxis::Neither];

    /// Lowercase token the user types for this axis
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterAxis::Month => "month",
            FilterAxis::Day => "day",
            FilterAxis::Neither => "neither",
        }
    }

    /// Parse a user token, ignoring case and surrounding whitespace
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        Self::ALL
            .into_iter()
            .find(|axis| axis.as_str().eq_ignore_ascii_case(input))
    }
}

impl fmt::Display for FilterAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The user's filter choice for one session iteration
///
/// Only the axis the user picked can carry a value, so at most one of
/// month and day is ever restricted.
///
/// # Examples
/// ```
/// use bikeshare_core::types::{CityName, FilterAxis, Selection};
/// use chrono::Month;
///
/// let selection = Selection::by_month(CityName::new("chicago"), Some(Month::March));
/// assert_eq!(selection.axis(), FilterAxis::Month);
/// assert_eq!(selection.month(), Some(Month::March));
/// assert_eq!(selection.day(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    city: CityName,
    month: Option<Month>,
    day: Option<Weekday>,
    axis: FilterAxis,
}

impl Selection {
    /// No time restriction
    pub fn unfiltered(city: CityName) -> Self {
        Self {
            city,
            month: None,
            day: None,
            axis: FilterAxis::Neither,
        }
    }

    /// Restrict by month; `None` means all months
    pub fn by_month(city: CityName, month: Option<Month>) -> Self {
        Self {
            city,
            month,
            day: None,
            axis: FilterAxis::Month,
        }
    }

    /// Restrict by weekday; `None` means all days
    pub fn by_day(city: CityName, day: Option<Weekday>) -> Self {
        Self {
            city,
            month: None,
            day,
            axis: FilterAxis::Day,
        }
    }

    /// Selected city
    pub fn city(&self) -> &CityName {
        &self.city
    }

    /// Selected month, `None` for all
    pub fn month(&self) -> Option<Month> {
        self.month
    }

    /// Selected weekday, `None` for all
    pub fn day(&self) -> Option<Weekday> {
        self.day
    }

    /// Axis the user chose to filter on
    pub fn axis(&self) -> FilterAxis {
        self.axis
    }

    /// Lowercase month token, or `all`
    pub fn month_label(&self) -> String {
        self.month
            .map(|m| m.name().to_lowercase())
            .unwrap_or_else(|| "all".to_string())
    }

    /// Lowercase weekday token, or `all`
    pub fn day_label(&self) -> String {
        self.day
            .map(|d| weekday_name(d).to_lowercase())
            .unwrap_or_else(|| "all".to_string())
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "city={}, month={}, day={}",
            self.city,
            self.month_label(),
            self.day_label()
        )
    }
}
