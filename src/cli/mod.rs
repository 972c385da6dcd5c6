//! Command line interface.

pub mod command;

use std::{path::PathBuf, time::Duration};

use chrono::NaiveDate;
use clap::{command, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

use crate::{config::Settings, prompt::DEFAULT_ENTRIES};

#[derive(Parser)]
#[command(version, about, long_about = None)]
/// Contains the commands
pub struct Cli {
    #[command(flatten)]
    pub settings: Settings,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scrape daily temperatures into the JSON cache
    Scrape {
        /// Scrape again even if the cache exists
        #[arg(long)]
        refresh: bool,
    },
    /// Save the dataset into the SQLite database
    Save {
        /// Scrape again even if the cache exists
        #[arg(long)]
        refresh: bool,
    },
    /// Delete every row from the SQLite database
    Purge {},
    /// Summarise cached mean temperatures by month
    Plot {
        /// First year of the monthly summary
        #[arg(long)]
        from: Option<i32>,
        /// Last year of the monthly summary
        #[arg(long)]
        to: Option<i32>,
        /// Show the daily series of one month instead (needs --month)
        #[arg(long, requires = "month")]
        year: Option<i32>,
        #[arg(long, requires = "year", value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,
    },
    /// Print a forecasting prompt built from the cached dataset
    Prompt {
        /// Date to predict, e.g. 2024-01-01
        #[arg(long)]
        date: NaiveDate,
        /// Number of records to include
        #[arg(long, default_value_t = DEFAULT_ENTRIES)]
        entries: usize,
    },
    /// Export the cached dataset to a parquet file
    Export {
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

/// Creates a spinner.
pub fn create_spinner(message: String) -> ProgressBar {
    let bar = ProgressBar::new_spinner().with_message(message);
    bar.enable_steady_tick(Duration::from_millis(100));

    bar
}

/// Creates a progress bar.
pub fn create_progress_bar(size: u64, message: String) -> ProgressBar {
    let bar = ProgressBar::new(size).with_message(message);
    if let Ok(style) = ProgressStyle::with_template("[{eta_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}") {
        bar.set_style(style.progress_chars("##-"));
    }

    bar
}

// -- Tests -------------------------------------------------------------------
