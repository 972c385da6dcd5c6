//! Formats recent records into a free-text forecasting prompt.

use chrono::NaiveDate;

use crate::reading::WeatherDataset;

pub const DEFAULT_ENTRIES: usize = 10;

/// One line per record, in date order, for the first `max_entries` records.
pub fn format_weather_data(dataset: &WeatherDataset, max_entries: usize) -> String {
    dataset
        .iter()
        .take(max_entries)
        .map(|(date, t)| {
            format!(
                "{date}: Mean={}, Max={}, Min={}\n",
                temp(t.mean),
                temp(t.max),
                temp(t.min)
            )
        })
        .collect()
}

pub fn build_prompt(dataset: &WeatherDataset, date: NaiveDate, max_entries: usize) -> String {
    format!(
        "Here is the historical data:\n{}\n Predict max, min, and mean temperatures in Canada, on {}. \
         Use typical seasonal patterns for this region, factoring in the likelihood of winter conditions. ",
        format_weather_data(dataset, max_entries),
        date.format("%Y-%m-%d")
    )
}

// `{:?}` keeps a trailing `.0` on whole numbers.
fn temp(value: f64) -> String {
    format!("{value:?}")
}

// -- Tests -------------------------------------------------------------------
