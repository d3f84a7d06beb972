//! Shared test utilities for unit tests
//!
//! Integration tests (in tests/) cannot access this module because it's
//! marked with #[cfg(test)]. They have their own helpers in
//! tests/common/mod.rs.

use crate::types::{CityName, ColumnSet, TripRecord, TripTable};
use chrono::NaiveDateTime;

/// Parse a `YYYY-MM-DD HH:MM:SS` timestamp
pub fn at(ts: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M:%S").unwrap()
}

/// Trip with only the required fields set
pub fn trip(start: &str, from: &str, to: &str, duration: f64) -> TripRecord {
    TripRecord::new(at(start), from, to, duration)
}

/// A small Chicago-like table spanning January to March
///
/// - 2017-01-01 is a Sunday, 2017-01-02 a Monday
/// - 2017-02-06 is a Monday, 2017-03-07 a Tuesday
pub fn sample_table() -> TripTable {
    let rows = vec![
        trip("2017-01-01 09:00:00", "Canal St", "Clark St", 600.0)
            .with_user_type("Subscriber")
            .with_gender("Male")
            .with_birth_year(1985.0),
        trip("2017-01-02 09:30:00", "Canal St", "Wells St", 300.0)
            .with_user_type("Customer"),
        trip("2017-02-06 17:10:00", "Clark St", "Canal St", 900.0)
            .with_user_type("Subscriber")
            .with_gender("Female")
            .with_birth_year(1990.0),
        trip("2017-03-07 09:45:00", "Canal St", "Clark St", 1200.0)
            .with_user_type("Subscriber")
            .with_gender("Male")
            .with_birth_year(1990.0),
    ];
    TripTable::new(CityName::new("chicago"), ColumnSet::full(), rows)
}
