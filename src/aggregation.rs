//! Aggregation module for trip statistics
//!
//! Four independent, stateless statistics over a (filtered) [`TripTable`]:
//! times of travel, stations and trips, durations, and user demographics.
//!
//! # Mode tie-breaking
//!
//! When several values share the highest count, the smallest of them in its
//! natural order wins: lexicographic for text, numeric for months, hours and
//! years, and Monday-first for weekdays.
//!
//! # Examples
//!
//! ```
//! use bikeshare::aggregation::{duration_stats, mode};
//! use bikeshare_core::types::{CityName, ColumnSet, TripRecord, TripTable};
//! use chrono::NaiveDate;
//!
//! let start = NaiveDate::from_ymd_opt(2017, 1, 2).unwrap().and_hms_opt(8, 0, 0).unwrap();
//! let rows = vec![
//!     TripRecord::new(start, "A", "B", 3600.0),
//!     TripRecord::new(start, "A", "C", 1800.0),
//!     TripRecord::new(start, "B", "C", 900.0),
//! ];
//! let table = TripTable::new(CityName::new("chicago"), ColumnSet::default(), rows);
//!
//! let stats = duration_stats(&table);
//! assert_eq!(stats.total_hours(), 1.75);
//!
//! let popular = mode(["b", "a", "b", "a"]).unwrap();
//! assert_eq!(popular.value, "a");
//! ```

use bikeshare_core::aggregation_types::{
    BirthYearStats, ColumnStat, DurationStats, Mode, StationStats, TimeStats, UserStats,
    ValueCount,
};
use bikeshare_core::types::{FilterAxis, TripTable};
use std::collections::BTreeMap;
use tracing::debug;

/// Pick the first entry with the highest count from an ordered sequence
fn first_max<T>(counts: impl IntoIterator<Item = (T, usize)>) -> Option<Mode<T>> {
    let mut best: Option<Mode<T>> = None;
    for (value, count) in counts {
        if best.as_ref().is_none_or(|b| count > b.count) {
            best = Some(Mode { value, count });
        }
    }
    best
}

/// Most frequent value; ties go to the smallest value
pub fn mode<T: Ord>(values: impl IntoIterator<Item = T>) -> Option<Mode<T>> {
    let mut counts: BTreeMap<T, usize> = BTreeMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }
    first_max(counts)
}

/// Most frequent value, comparing and ordering by `key`
///
/// For value types that have no natural order of their own, such as
/// `chrono::Weekday`.
pub fn mode_by<T, K: Ord>(
    values: impl IntoIterator<Item = T>,
    key: impl Fn(&T) -> K,
) -> Option<Mode<T>> {
    let mut counts: BTreeMap<K, (T, usize)> = BTreeMap::new();
    for value in values {
        counts.entry(key(&value)).or_insert((value, 0)).1 += 1;
    }
    first_max(counts.into_values())
}

/// Occurrences of each distinct value, most frequent first, ties by value
pub fn value_counts<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<ValueCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }

    let mut result: Vec<ValueCount> = counts
        .into_iter()
        .map(|(value, count)| ValueCount {
            value: value.to_string(),
            count,
        })
        .collect();
    // Stable sort keeps the alphabetical order among equal counts
    result.sort_by(|a, b| b.count.cmp(&a.count));
    result
}

/// Most frequent month, weekday, and start hour
///
/// The mode of the axis the table was filtered on is not computed since
/// every row shares the same value.
pub fn time_stats(table: &TripTable, axis: FilterAxis) -> TimeStats {
    let popular_month = if axis == FilterAxis::Month {
        None
    } else {
        mode(table.iter().map(|trip| trip.derived.month))
    };

    let popular_day = if axis == FilterAxis::Day {
        None
    } else {
        mode_by(table.iter().map(|trip| trip.derived.weekday), |day| {
            day.num_days_from_monday()
        })
    };

    let popular_hour = mode(table.iter().map(|trip| trip.derived.hour));

    debug!(
        "Time stats over {} trips: month={:?} day={:?} hour={:?}",
        table.len(),
        popular_month,
        popular_day,
        popular_hour
    );

    TimeStats {
        axis,
        popular_month,
        popular_day,
        popular_hour,
    }
}

/// Most frequent start station, end station, and start/end combination
pub fn station_stats(table: &TripTable) -> StationStats {
    let popular_start =
        mode(table.iter().filter_map(|trip| trip.start_station.as_ref())).map(|m| Mode {
            value: m.value.clone(),
            count: m.count,
        });
    let popular_end =
        mode(table.iter().filter_map(|trip| trip.end_station.as_ref())).map(|m| Mode {
            value: m.value.clone(),
            count: m.count,
        });
    let popular_trip = mode(table.iter().filter_map(|trip| trip.trip_label()));

    StationStats {
        popular_start,
        popular_end,
        popular_trip,
    }
}

/// Total and mean trip duration
///
/// Durations are used as recorded; negative or outlying values are not
/// filtered. Trips with a blank duration are left out of both the sum and
/// the mean.
pub fn duration_stats(table: &TripTable) -> DurationStats {
    let durations: Vec<f64> = table.iter().filter_map(|trip| trip.trip_duration).collect();
    let trip_count = durations.len();
    let total_seconds: f64 = durations.iter().sum();
    let mean_seconds = (trip_count > 0).then(|| total_seconds / trip_count as f64);

    if trip_count < table.len() {
        debug!(
            "{} of {} trips have no duration",
            table.len() - trip_count,
            table.len()
        );
    }

    DurationStats {
        trip_count,
        total_seconds,
        mean_seconds,
    }
}

/// User type, gender, and birth year statistics
///
/// Gender and birth year depend on optional columns; a table without them
/// yields [`ColumnStat::Unavailable`].
pub fn user_stats(table: &TripTable) -> UserStats {
    let user_types = value_counts(table.iter().filter_map(|trip| trip.user_type.as_deref()));

    let genders = if table.columns().gender {
        let counts = value_counts(table.iter().filter_map(|trip| trip.gender.as_deref()));
        if counts.is_empty() {
            ColumnStat::Empty
        } else {
            ColumnStat::Available(counts)
        }
    } else {
        debug!("No gender column for {}", table.city());
        ColumnStat::Unavailable
    };

    let birth_years = if table.columns().birth_year {
        birth_year_stats(table).map_or(ColumnStat::Empty, ColumnStat::Available)
    } else {
        debug!("No birth year column for {}", table.city());
        ColumnStat::Unavailable
    };

    UserStats {
        user_types,
        genders,
        birth_years,
    }
}

/// Birth years as whole years, ignoring blank and non-finite cells
fn birth_year_stats(table: &TripTable) -> Option<BirthYearStats> {
    let years: Vec<i32> = table
        .iter()
        .filter_map(|trip| trip.birth_year)
        .filter(|year| year.is_finite())
        .map(|year| year.trunc() as i32)
        .collect();

    let earliest = years.iter().copied().min()?;
    let most_recent = years.iter().copied().max()?;
    let most_common = mode(years)?;

    Some(BirthYearStats {
        earliest,
        most_recent,
        most_common,
    })
}
