//! CLI interface for bikeshare
//!
//! The exploration itself is interactive; the command line only configures
//! where the city files live and how output and logging look.
//!
//! # Example
//!
//! ```bash
//! # Use the CSV files in ./data
//! bikeshare --data-dir data
//!
//! # Same, via the environment, with informational logging
//! BIKESHARE_DATA_DIR=data bikeshare --verbose
//! ```

use clap::Parser;
use std::path::PathBuf;

/// Explore US bikeshare trip data interactively
#[derive(Parser, Debug, Clone)]
#[command(name = "bikeshare")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Directory containing chicago.csv, new_york_city.csv, and washington.csv
    #[arg(long, short = 'd', env = "BIKESHARE_DATA_DIR", default_value = ".")]
    pub data_dir: PathBuf,

    /// Show informational output (default is quiet mode with only warnings and errors)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    /// Log directive used when `RUST_LOG` is not set
    pub fn default_log_directive(&self) -> &'static str {
        if self.verbose { "bikeshare=info" } else { "warn" }
    }

    /// Whether headings should be colored, given whether stdout is a terminal
    pub fn use_color(&self, stdout_is_terminal: bool) -> bool {
        stdout_is_terminal && !self.no_color
    }
}
