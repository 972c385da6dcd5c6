//! Walks the archive month by month and merges every page into one dataset.

use std::future::Future;

use anyhow::Result;
use chrono::{Datelike, NaiveDate};

use crate::{
    cli::create_progress_bar,
    reading::{parse_month, WeatherDataset},
};

/// Supplies the page for one station-month.
pub trait MonthSource {
    fn fetch_month(&self, year: i32, month: u32) -> impl Future<Output = Result<String>>;
}

/// Every (year, month) from the start month through `today`'s month,
/// inclusive and in order. Empty when the start lies after `today`.
pub fn month_range(start_year: i32, start_month: u32, today: NaiveDate) -> Vec<(i32, u32)> {
    let end = (today.year(), today.month());
    let mut months = Vec::new();
    let (mut year, mut month) = (start_year, start_month);

    while (year, month) <= end {
        months.push((year, month));

        month += 1;
        if month == 13 {
            month = 1;
            year += 1;
        }
    }

    months
}

/// Fetches and parses each month in turn, merging into `dataset`.
///
/// A month whose fetch fails is logged and skipped. Returns the number of
/// months that were fetched.
pub async fn scrape<S: MonthSource>(
    source: &S,
    months: &[(i32, u32)],
    dataset: &mut WeatherDataset,
) -> usize {
    let pb = create_progress_bar(months.len() as u64, "Scraping months...".to_string());
    let mut fetched = 0;

    for &(year, month) in months {
        pb.set_message(format!("Scraping {year}-{month:02}"));

        match source.fetch_month(year, month).await {
            Ok(html) => {
                let page = parse_month(&html, year, month);
                tracing::info!(year, month, records = page.len(), "parsed month");
                dataset.merge(page);
                fetched += 1;
            }
            Err(e) => tracing::warn!("Error fetching data for {year}-{month:02}: {e:#}"),
        }

        pb.inc(1);
    }

    pb.finish_with_message("Months scraped");

    fetched
}

// -- Tests -------------------------------------------------------------------
