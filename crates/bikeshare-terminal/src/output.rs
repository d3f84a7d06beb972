//! Output formatting module for bikeshare
//!
//! This module turns aggregation results and raw trip rows into terminal
//! text. Value counts and raw-data pages are rendered as ASCII tables.
//!
//! # Examples
//!
//! ```
//! use bikeshare_core::aggregation_types::DurationStats;
//! use bikeshare_terminal::get_formatter;
//!
//! let stats = DurationStats {
//!     trip_count: 3,
//!     total_seconds: 6300.0,
//!     mean_seconds: Some(2100.0),
//! };
//!
//! let formatter = get_formatter(false);
//! let text = formatter.format_duration_stats(&stats);
//! assert!(text.contains("1.75 hours"));
//! assert!(text.contains("35.00 minutes"));
//! ```

use bikeshare_core::aggregation_types::{
    BirthYearStats, ColumnStat, DurationStats, Mode, StationStats, TimeStats, UserStats,
    ValueCount,
};
use bikeshare_core::types::{ColumnSet, TripRecord, month_name, weekday_name};
use colored::*;
use prettytable::{Row, Table, format, row};
use std::time::Duration;

/// Width of the separator line printed after each section
pub const SEPARATOR_WIDTH: usize = 40;

/// Trait for report formatters
///
/// One method per report section so the session can print each statistic as
/// soon as it has been computed.
pub trait ReportFormatter {
    /// Banner printed before a statistic is computed
    fn format_section_start(&self, title: &str) -> String;

    /// Elapsed time and separator printed after a statistic
    fn format_section_end(&self, elapsed: Duration) -> String;

    /// Most frequent times of travel
    fn format_time_stats(&self, stats: &TimeStats) -> String;

    /// Most popular stations and trip
    fn format_station_stats(&self, stats: &StationStats) -> String;

    /// Total and mean trip duration
    fn format_duration_stats(&self, stats: &DurationStats) -> String;

    /// Rider demographics
    fn format_user_stats(&self, stats: &UserStats) -> String;

    /// One page of raw rows; `offset` is the index of the first row
    fn format_rows(&self, rows: &[TripRecord], offset: usize, columns: ColumnSet) -> String;
}

/// Table formatter for human-readable output
pub struct TableFormatter {
    /// Whether to emphasize headings with terminal colors
    pub colored_output: bool,
}

impl TableFormatter {
    /// Create a new TableFormatter
    pub fn new(colored_output: bool) -> Self {
        Self { colored_output }
    }

    /// Format a number with thousands separators
    fn format_number(n: usize) -> String {
        let s = n.to_string();
        let mut result = String::new();

        for (count, ch) in s.chars().rev().enumerate() {
            if count > 0 && count % 3 == 0 {
                result.push(',');
            }
            result.push(ch);
        }

        result.chars().rev().collect()
    }

    fn heading(&self, text: &str) -> String {
        if self.colored_output {
            text.bold().cyan().to_string()
        } else {
            text.to_string()
        }
    }

    fn highlight(&self, text: &str) -> String {
        if self.colored_output {
            text.green().to_string()
        } else {
            text.to_string()
        }
    }

    fn mode_suffix<T>(mode: &Mode<T>) -> String {
        format!(" (count: {})", Self::format_number(mode.count))
    }

    fn counts_table(label: &str, counts: &[ValueCount]) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
        table.set_titles(row![b -> label, b -> "Count"]);

        for entry in counts {
            table.add_row(row![entry.value, r -> Self::format_number(entry.count)]);
        }

        table.to_string()
    }

    fn format_birth_years(&self, stats: &BirthYearStats) -> String {
        format!(
            "The earliest birth year is {}.\nThe most recent birth year is {}.\nThe most common birth year is {}{}.\n",
            self.highlight(&stats.earliest.to_string()),
            self.highlight(&stats.most_recent.to_string()),
            self.highlight(&stats.most_common.value.to_string()),
            Self::mode_suffix(&stats.most_common)
        )
    }

    fn format_timestamp(ts: &chrono::NaiveDateTime) -> String {
        ts.format("%Y-%m-%d %H:%M:%S").to_string()
    }

    fn optional_text<T: std::fmt::Display>(value: &Option<T>) -> String {
        value.as_ref().map(ToString::to_string).unwrap_or_default()
    }
}

impl ReportFormatter for TableFormatter {
    fn format_section_start(&self, title: &str) -> String {
        format!("\n{}\n", self.heading(title))
    }

    fn format_section_end(&self, elapsed: Duration) -> String {
        format!(
            "\nThis took {:.6} seconds.\n{}",
            elapsed.as_secs_f64(),
            "-".repeat(SEPARATOR_WIDTH)
        )
    }

    fn format_time_stats(&self, stats: &TimeStats) -> String {
        let mut output = String::new();

        if stats.reports_month() {
            match stats
                .popular_month
                .as_ref()
                .and_then(|m| month_name(m.value).map(|name| (name, m)))
            {
                Some((name, mode)) => output.push_str(&format!(
                    "Bikeshare users most often used this service in the month of {}{}.\n",
                    self.highlight(name),
                    Self::mode_suffix(mode)
                )),
                None => output.push_str("No trips to determine the most common month.\n"),
            }
        }

        if stats.reports_day() {
            match &stats.popular_day {
                Some(mode) => output.push_str(&format!(
                    "Bikeshare users most often used this service on {}{}.\n",
                    self.highlight(weekday_name(mode.value)),
                    Self::mode_suffix(mode)
                )),
                None => output.push_str("No trips to determine the most common day.\n"),
            }
        }

        match &stats.popular_hour {
            Some(mode) => output.push_str(&format!(
                "Bikeshare users most often started their journey in hour {}{}.\n",
                self.highlight(&mode.value.to_string()),
                Self::mode_suffix(mode)
            )),
            None => output.push_str("No trips to determine the most common start hour.\n"),
        }

        output
    }

    fn format_station_stats(&self, stats: &StationStats) -> String {
        let mut output = String::new();

        match &stats.popular_start {
            Some(mode) => output.push_str(&format!(
                "The most commonly used start station was {}{}.\n",
                self.highlight(mode.value.as_str()),
                Self::mode_suffix(mode)
            )),
            None => output.push_str("No trips to determine the most common start station.\n"),
        }

        match &stats.popular_end {
            Some(mode) => output.push_str(&format!(
                "The most commonly used end station was {}{}.\n",
                self.highlight(mode.value.as_str()),
                Self::mode_suffix(mode)
            )),
            None => output.push_str("No trips to determine the most common end station.\n"),
        }

        match &stats.popular_trip {
            Some(mode) => output.push_str(&format!(
                "The most frequent trip was from {}{}.\n",
                self.highlight(&mode.value),
                Self::mode_suffix(mode)
            )),
            None => output.push_str("No trips to determine the most frequent trip.\n"),
        }

        output
    }

    fn format_duration_stats(&self, stats: &DurationStats) -> String {
        let mut output = format!(
            "The total time traveled was {} hours over {} trips.\n",
            self.highlight(&format!("{:.2}", stats.total_hours())),
            Self::format_number(stats.trip_count)
        );

        match stats.mean_minutes() {
            Some(mean) => output.push_str(&format!(
                "The average trip length was {} minutes.\n",
                self.highlight(&format!("{mean:.2}"))
            )),
            None => output.push_str("No trips to determine the average trip length.\n"),
        }

        output
    }

    fn format_user_stats(&self, stats: &UserStats) -> String {
        let mut output = String::from("The count of user types are:\n");
        output.push_str(&Self::counts_table("User Type", &stats.user_types));

        output.push('\n');
        match &stats.genders {
            ColumnStat::Available(counts) => {
                output.push_str("The number of users by gender are:\n");
                output.push_str(&Self::counts_table("Gender", counts));
            }
            ColumnStat::Empty => output.push_str("No gender values in the selected trips.\n"),
            ColumnStat::Unavailable => output.push_str("No gender data is available.\n"),
        }

        output.push('\n');
        match &stats.birth_years {
            ColumnStat::Available(years) => output.push_str(&self.format_birth_years(years)),
            ColumnStat::Empty => output.push_str("No birth year values in the selected trips.\n"),
            ColumnStat::Unavailable => output.push_str("No birth year data is available.\n"),
        }

        output
    }

    fn format_rows(&self, rows: &[TripRecord], offset: usize, columns: ColumnSet) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);

        let mut titles = vec!["#", "Start Time"];
        if columns.end_time {
            titles.push("End Time");
        }
        titles.extend(["Trip Duration", "Start Station", "End Station", "User Type"]);
        if columns.gender {
            titles.push("Gender");
        }
        if columns.birth_year {
            titles.push("Birth Year");
        }
        table.set_titles(Row::from(titles));

        for (index, trip) in rows.iter().enumerate() {
            let mut cells = vec![
                (offset + index).to_string(),
                Self::format_timestamp(&trip.start_time),
            ];
            if columns.end_time {
                cells.push(
                    trip.end_time
                        .as_ref()
                        .map(Self::format_timestamp)
                        .unwrap_or_default(),
                );
            }
            cells.extend([
                Self::optional_text(&trip.trip_duration),
                Self::optional_text(&trip.start_station),
                Self::optional_text(&trip.end_station),
                Self::optional_text(&trip.user_type),
            ]);
            if columns.gender {
                cells.push(Self::optional_text(&trip.gender));
            }
            if columns.birth_year {
                cells.push(
                    trip.birth_year
                        .map(|year| format!("{year:.0}"))
                        .unwrap_or_default(),
                );
            }
            table.add_row(Row::from(cells));
        }

        table.to_string()
    }
}

/// Build the formatter used by the interactive session
pub fn get_formatter(colored_output: bool) -> Box<dyn ReportFormatter> {
    Box::new(TableFormatter::new(colored_output))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bikeshare_core::types::{FilterAxis, StationName};
    use chrono::{NaiveDate, Weekday};

    fn plain() -> TableFormatter {
        TableFormatter::new(false)
    }

    fn trip_at(day: u32, hour: u32) -> TripRecord {
        let start = NaiveDate::from_ymd_opt(2017, 1, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap();
        TripRecord::new(start, "Canal St", "Clark St", 321.0).with_user_type("Subscriber")
    }

    #[test]
    fn test_number_formatting() {
        assert_eq!(TableFormatter::format_number(1234567), "1,234,567");
        assert_eq!(TableFormatter::format_number(999), "999");
        assert_eq!(TableFormatter::format_number(0), "0");
        assert_eq!(TableFormatter::format_number(1000), "1,000");
    }

    #[test]
    fn test_time_stats_omits_filtered_month() {
        let stats = TimeStats {
            axis: FilterAxis::Month,
            popular_month: None,
            popular_day: Some(Mode {
                value: Weekday::Mon,
                count: 12,
            }),
            popular_hour: Some(Mode {
                value: 17,
                count: 4,
            }),
        };

        let output = plain().format_time_stats(&stats);
        assert!(!output.contains("month"));
        assert!(output.contains("on Monday (count: 12)"));
        assert!(output.contains("hour 17"));
    }

    #[test]
    fn test_time_stats_without_trips() {
        let stats = TimeStats {
            axis: FilterAxis::Neither,
            popular_month: None,
            popular_day: None,
            popular_hour: None,
        };

        let output = plain().format_time_stats(&stats);
        assert!(output.contains("most common month"));
        assert!(output.contains("most common day"));
        assert!(output.contains("most common start hour"));
    }

    #[test]
    fn test_station_stats() {
        let stats = StationStats {
            popular_start: Some(Mode {
                value: StationName::new("Canal St"),
                count: 3,
            }),
            popular_end: Some(Mode {
                value: StationName::new("Clark St"),
                count: 2,
            }),
            popular_trip: Some(Mode {
                value: "Canal St to Clark St".to_string(),
                count: 2,
            }),
        };

        let output = plain().format_station_stats(&stats);
        assert!(output.contains("start station was Canal St"));
        assert!(output.contains("end station was Clark St"));
        assert!(output.contains("trip was from Canal St to Clark St"));
    }

    #[test]
    fn test_user_stats_unavailable_columns() {
        let stats = UserStats {
            user_types: vec![ValueCount {
                value: "Subscriber".to_string(),
                count: 1500,
            }],
            genders: ColumnStat::Unavailable,
            birth_years: ColumnStat::Unavailable,
        };

        let output = plain().format_user_stats(&stats);
        assert!(output.contains("Subscriber"));
        assert!(output.contains("1,500"));
        assert!(output.contains("No gender data is available."));
        assert!(output.contains("No birth year data is available."));
    }

    #[test]
    fn test_user_stats_with_birth_years() {
        let stats = UserStats {
            user_types: Vec::new(),
            genders: ColumnStat::Empty,
            birth_years: ColumnStat::Available(BirthYearStats {
                earliest: 1899,
                most_recent: 2001,
                most_common: Mode {
                    value: 1989,
                    count: 7,
                },
            }),
        };

        let output = plain().format_user_stats(&stats);
        assert!(output.contains("No gender values"));
        assert!(output.contains("earliest birth year is 1899"));
        assert!(output.contains("most recent birth year is 2001"));
        assert!(output.contains("most common birth year is 1989"));
    }

    #[test]
    fn test_format_rows_uses_absolute_index_and_columns() {
        let rows = vec![trip_at(2, 8), trip_at(3, 9)];

        let output = plain().format_rows(&rows, 5, ColumnSet::default());
        assert!(output.contains("Start Time"));
        assert!(!output.contains("Gender"));
        assert!(!output.contains("End Time"));
        assert!(output.contains("| 5 "));
        assert!(output.contains("| 6 "));
        assert!(output.contains("2017-01-02 08:00:00"));

        let with_demographics = plain().format_rows(&rows, 0, ColumnSet::full());
        assert!(with_demographics.contains("Gender"));
        assert!(with_demographics.contains("Birth Year"));
    }

    #[test]
    fn test_format_rows_leaves_missing_cells_blank() {
        let partial = TripRecord {
            trip_duration: None,
            end_station: None,
            ..trip_at(2, 8)
        };

        let output = plain().format_rows(&[partial], 0, ColumnSet::default());
        assert!(output.contains("Canal St"));
        assert!(!output.contains("Clark St"));
        assert!(!output.contains("321"));
    }

    #[test]
    fn test_section_end_has_separator() {
        let output = plain().format_section_end(Duration::from_millis(1500));
        assert!(output.contains("This took 1.500000 seconds."));
        assert!(output.ends_with(&"-".repeat(SEPARATOR_WIDTH)));
    }
}
