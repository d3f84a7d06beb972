//! Aggregation data types for bikeshare
//!
//! Pure data structures holding the results of the four trip statistics.
//! These types have no dependencies on the data loader or the terminal.

use crate::types::{FilterAxis, StationName};
use chrono::Weekday;

/// Most frequent value of a column and how often it occurred
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mode<T> {
    /// The most frequent value
    pub value: T,
    /// Number of occurrences
    pub count: usize,
}

/// Outcome of a statistic over an optional column
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnStat<T> {
    /// The column exists and has values in the filtered rows
    Available(T),
    /// The column exists but every filtered row is blank
    Empty,
    /// The city's data has no such column
    Unavailable,
}

impl<T> ColumnStat<T> {
    /// Whether a value was computed
    pub fn is_available(&self) -> bool {
        matches!(self, ColumnStat::Available(_))
    }

    /// The computed value, if any
    pub fn as_available(&self) -> Option<&T> {
        match self {
            ColumnStat::Available(value) => Some(value),
            _ => None,
        }
    }
}

/// Occurrences of one distinct value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueCount {
    /// The distinct value
    pub value: String,
    /// Number of rows holding it
    pub count: usize,
}

/// Most frequent times of travel
#[derive(Debug, Clone, PartialEq)]
pub struct TimeStats {
    /// Axis the table was filtered on; that axis's mode is not computed
    pub axis: FilterAxis,
    /// Most common month number (1-12)
    pub popular_month: Option<Mode<u32>>,
    /// Most common weekday
    pub popular_day: Option<Mode<Weekday>>,
    /// Most common start hour (0-23)
    pub popular_hour: Option<Mode<u32>>,
}

impl TimeStats {
    /// Whether the month mode is reported for this axis
    pub fn reports_month(&self) -> bool {
        self.axis != FilterAxis::Month
    }

    /// Whether the weekday mode is reported for this axis
    pub fn reports_day(&self) -> bool {
        self.axis != FilterAxis::Day
    }
}

/// Most popular stations and trip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationStats {
    /// Most common start station
    pub popular_start: Option<Mode<StationName>>,
    /// Most common end station
    pub popular_end: Option<Mode<StationName>>,
    /// Most common `<start> to <end>` combination
    pub popular_trip: Option<Mode<String>>,
}

/// Total and average trip duration
///
/// # Examples
/// ```
/// use bikeshare_core::aggregation_types::DurationStats;
///
/// let stats = DurationStats {
///     trip_count: 3,
///     total_seconds: 6300.0,
///     mean_seconds: Some(2100.0),
/// };
/// assert_eq!(stats.total_hours(), 1.75);
/// assert_eq!(stats.mean_minutes(), Some(35.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DurationStats {
    /// Number of trips with a recorded duration
    pub trip_count: usize,
    /// Sum of trip durations in seconds
    pub total_seconds: f64,
    /// Mean trip duration in seconds, `None` when no trip has a duration
    pub mean_seconds: Option<f64>,
}

impl DurationStats {
    /// Total travel time in hours
    pub fn total_hours(&self) -> f64 {
        self.total_seconds / 3600.0
    }

    /// Mean trip length in minutes
    pub fn mean_minutes(&self) -> Option<f64> {
        self.mean_seconds.map(|mean| mean / 60.0)
    }
}

/// Earliest, latest, and most common rider birth year
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BirthYearStats {
    /// Oldest rider's birth year
    pub earliest: i32,
    /// Youngest rider's birth year
    pub most_recent: i32,
    /// Most common birth year
    pub most_common: Mode<i32>,
}

/// Rider demographics
#[derive(Debug, Clone, PartialEq)]
pub struct UserStats {
    /// Count per user type, most frequent first
    pub user_types: Vec<ValueCount>,
    /// Count per gender, most frequent first
    pub genders: ColumnStat<Vec<ValueCount>>,
    /// Birth year summary
    pub birth_years: ColumnStat<BirthYearStats>,
}
