//! Filtering module for trip tables
//!
//! This module restricts a loaded [`TripTable`] to the month and weekday the
//! user selected. Filtering never mutates its input and may yield an empty
//! table.
//!
//! # Examples
//!
//! ```
//! use bikeshare_core::filters::TripFilter;
//! use chrono::{Month, Weekday};
//!
//! // Trips on Mondays in February
//! let filter = TripFilter::new()
//!     .with_month(Month::February)
//!     .with_day(Weekday::Mon);
//! assert!(!filter.is_unrestricted());
//! ```

use crate::types::{Selection, TripRecord, TripTable};
use chrono::{Month, Weekday};
use tracing::debug;

/// Month and weekday restriction for trip records
///
/// Both restrictions are optional; a filter with neither set matches every
/// trip.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TripFilter {
    /// Only keep trips that started in this month
    pub month: Option<Month>,
    /// Only keep trips that started on this weekday
    pub day: Option<Weekday>,
}

impl TripFilter {
    /// Create a new filter with no restrictions
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter matching a user's selection
    pub fn from_selection(selection: &Selection) -> Self {
        Self {
            month: selection.month(),
            day: selection.day(),
        }
    }

    /// Set the month filter
    pub fn with_month(mut self, month: Month) -> Self {
        self.month = Some(month);
        self
    }

    /// Set the weekday filter
    pub fn with_day(mut self, day: Weekday) -> Self {
        self.day = Some(day);
        self
    }

    /// Whether this filter keeps every trip
    pub fn is_unrestricted(&self) -> bool {
        self.month.is_none() && self.day.is_none()
    }

    /// Check if a trip passes the filter
    pub fn matches(&self, trip: &TripRecord) -> bool {
        if let Some(month) = self.month {
            if trip.derived.month != month.number_from_month() {
                return false;
            }
        }

        if let Some(day) = self.day {
            if trip.derived.weekday != day {
                return false;
            }
        }

        true
    }

    /// Return a new table holding the matching rows of `table`
    ///
    /// Row order, city, and column set are preserved.
    pub fn apply(&self, table: &TripTable) -> TripTable {
        if self.is_unrestricted() {
            return table.clone();
        }

        let rows: Vec<TripRecord> = table
            .iter()
            .filter(|trip| self.matches(trip))
            .cloned()
            .collect();

        debug!(
            "Filter {:?} kept {} of {} rows for {}",
            self,
            rows.len(),
            table.len(),
            table.city()
        );

        TripTable::new(table.city().clone(), table.columns(), rows)
    }
}
