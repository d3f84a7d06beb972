//! Session loop
//!
//! One iteration selects filters, loads the city file, filters it, prints the
//! four statistic sections and offers the raw-data browser. The user is then
//! asked whether to go again.

use crate::aggregation::{duration_stats, station_stats, time_stats, user_stats};
use crate::browser::browse;
use crate::data_loader::DataLoader;
use crate::prompt::Prompter;
use crate::selector::select_filters;
use bikeshare_core::catalog::CityCatalog;
use bikeshare_core::error::{BikeshareError, Result};
use bikeshare_core::filters::TripFilter;
use bikeshare_core::types::{Selection, TripTable};
use bikeshare_terminal::ReportFormatter;
use std::io::{BufRead, Write};
use std::time::Instant;
use tracing::{debug, error, info};

const RESTART_QUESTION: &str = "\nWould you like to restart? Enter yes or no.\n";

/// Interactive exploration session
pub struct Session<R, W> {
    catalog: CityCatalog,
    loader: DataLoader,
    formatter: Box<dyn ReportFormatter>,
    prompter: Prompter<R, W>,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Create a session over the given catalog and terminal streams
    pub fn new(
        catalog: CityCatalog,
        loader: DataLoader,
        formatter: Box<dyn ReportFormatter>,
        prompter: Prompter<R, W>,
    ) -> Self {
        Self {
            catalog,
            loader,
            formatter,
            prompter,
        }
    }

    /// Run iterations until the user declines to restart
    ///
    /// Returns the number of iterations started. A closed input ends the
    /// session without an error.
    ///
    /// # Errors
    ///
    /// Only terminal I/O failures are returned.
    pub fn run(&mut self) -> Result<usize> {
        let mut iterations = 0;
        loop {
            iterations += 1;
            info!("Starting session iteration {iterations}");

            match self.run_iteration() {
                Ok(()) => {}
                Err(BikeshareError::InputClosed) => {
                    info!("Input closed, ending session");
                    return Ok(iterations);
                }
                Err(err @ BikeshareError::DataUnavailable { .. }) => {
                    error!("{err}");
                    self.prompter.say(&format!("\n{err}"))?;
                }
                Err(err) => return Err(err),
            }

            match self.prompter.confirm(RESTART_QUESTION) {
                Ok(true) => continue,
                Ok(false) | Err(BikeshareError::InputClosed) => {
                    info!("Session finished after {iterations} iterations");
                    return Ok(iterations);
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Run a single select, load, report and browse pass
    pub fn run_iteration(&mut self) -> Result<()> {
        let selection = select_filters(&mut self.prompter, &self.catalog)?;
        let entry = self.catalog.get(selection.city())?;

        let table = self.loader.load(entry)?;
        let filtered = TripFilter::from_selection(&selection).apply(&table);
        debug!(
            "{} of {} trips match {selection}",
            filtered.len(),
            table.len()
        );
        drop(table);

        self.report(&filtered, &selection)?;
        browse(&mut self.prompter, self.formatter.as_ref(), &filtered)?;
        Ok(())
    }

    fn report(&mut self, table: &TripTable, selection: &Selection) -> Result<()> {
        let start = Instant::now();
        let text = self
            .formatter
            .format_time_stats(&time_stats(table, selection.axis()));
        self.section("Calculating The Most Frequent Times of Travel...", text, start)?;

        let start = Instant::now();
        let text = self.formatter.format_station_stats(&station_stats(table));
        self.section("Calculating The Most Popular Stations and Trip...", text, start)?;

        let start = Instant::now();
        let text = self.formatter.format_duration_stats(&duration_stats(table));
        self.section("Calculating Trip Duration...", text, start)?;

        let start = Instant::now();
        let text = self.formatter.format_user_stats(&user_stats(table));
        self.section("Calculating User Stats...", text, start)?;

        Ok(())
    }

    fn section(&mut self, title: &str, body: String, start: Instant) -> Result<()> {
        let opening = self.formatter.format_section_start(title);
        let closing = self.formatter.format_section_end(start.elapsed());
        self.prompter.say(&opening)?;
        self.prompter.say(&body)?;
        self.prompter.say(&closing)
    }

    /// Give back the terminal streams
    pub fn into_inner(self) -> (R, W) {
        self.prompter.into_inner()
    }
}
