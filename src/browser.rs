//! Paginated raw-data browser
//!
//! Shows the filtered trips five at a time for as long as the user keeps
//! answering `yes`. A page is only offered while rows remain, so the browser
//! never asks for data past the end of the table.

use crate::prompt::Prompter;
use bikeshare_core::error::Result;
use bikeshare_core::types::{TripRecord, TripTable};
use bikeshare_terminal::ReportFormatter;
use std::io::{BufRead, Write};
use tracing::debug;

/// Rows shown per page
pub const PAGE_SIZE: usize = 5;

/// Iterator over `(offset, rows)` pages of a table
pub struct Pages<'a> {
    table: &'a TripTable,
    offset: usize,
    size: usize,
}

/// Split `table` into consecutive pages of `size` rows
///
/// # Examples
/// ```
/// use bikeshare::browser::pages;
/// use bikeshare_core::types::{CityName, ColumnSet, TripTable};
///
/// let empty = TripTable::new(CityName::new("chicago"), ColumnSet::default(), Vec::new());
/// assert_eq!(pages(&empty, 5).count(), 0);
/// ```
pub fn pages(table: &TripTable, size: usize) -> Pages<'_> {
    Pages {
        table,
        offset: 0,
        size: size.max(1),
    }
}

impl<'a> Iterator for Pages<'a> {
    type Item = (usize, &'a [TripRecord]);

    fn next(&mut self) -> Option<Self::Item> {
        if self.offset >= self.table.len() {
            return None;
        }
        let offset = self.offset;
        let rows = self.table.page(offset, self.size);
        self.offset += self.size;
        Some((offset, rows))
    }
}

/// Run the browser dialogue, returning the number of pages shown
pub fn browse<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    formatter: &dyn ReportFormatter,
    table: &TripTable,
) -> Result<usize> {
    if table.is_empty() {
        prompter.say("\nThere is no raw data to display for this selection.")?;
        return Ok(0);
    }

    let mut shown = 0;
    for (offset, rows) in pages(table, PAGE_SIZE) {
        let question = if shown == 0 {
            format!("\nWould you like to view {PAGE_SIZE} rows of the raw data? Enter yes or no.\n")
        } else {
            format!("\nWould you like to view {PAGE_SIZE} more rows of the raw data? Enter yes or no.\n")
        };
        if !prompter.confirm(&question)? {
            debug!("Raw data browsing stopped after {shown} pages");
            return Ok(shown);
        }

        prompter.say(&formatter.format_rows(rows, offset, table.columns()))?;
        shown += 1;
    }

    prompter.say("\nThat was all of the raw data.")?;
    Ok(shown)
}
