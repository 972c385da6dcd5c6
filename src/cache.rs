//! JSON cache of a scraped dataset, so the archive is only scraped once.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::{
    config::Settings,
    error::ScrapeError,
    reading::WeatherDataset,
    scrape::{month_range, scrape, MonthSource},
};

/// Writes the dataset as a JSON object keyed by date.
pub fn save_dataset(dataset: &WeatherDataset, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(dataset)?;
    fs::write(path, json).with_context(|| format!("Failed to write `{}`", path.display()))?;

    Ok(())
}

pub fn load_dataset(path: &Path) -> Result<WeatherDataset, ScrapeError> {
    let text = fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            ScrapeError::DatasetMissing {
                path: path.to_path_buf(),
            }
        } else {
            ScrapeError::DatasetRead {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    serde_json::from_str(&text).map_err(|source| ScrapeError::DatasetDecode {
        path: path.to_path_buf(),
        source,
    })
}

/// Returns the cached dataset, scraping and caching it first when there is
/// no cache or `refresh` is set.
pub async fn fetch_weather_data<S: MonthSource>(
    settings: &Settings,
    source: &S,
    refresh: bool,
    today: NaiveDate,
) -> Result<WeatherDataset> {
    let path = settings.cache_path();

    if refresh || !path.exists() {
        let months = month_range(settings.start_year, settings.start_month, today);
        tracing::info!(months = months.len(), "scraping daily archive");

        let mut dataset = WeatherDataset::new();
        let fetched = scrape(source, &months, &mut dataset).await;
        tracing::info!(fetched, records = dataset.len(), "scrape finished");

        save_dataset(&dataset, &path)?;
    } else {
        tracing::info!(path = %path.display(), "using cached dataset");
    }

    Ok(load_dataset(&path)?)
}

// -- Tests -------------------------------------------------------------------
