pub mod export;
pub mod plot;
pub mod prompt;
pub mod save;
pub mod scrape;

use std::path::PathBuf;

use anyhow::Result;
use chrono::{Datelike, Local, NaiveDate};

pub use export::export;
pub use plot::plot;
pub use prompt::prompt;
pub use save::{purge, save};
pub use scrape::scrape;

use crate::{
    cache,
    cli::create_spinner,
    config::{data_dir, Settings},
    download::HttpSource,
    reading::WeatherDataset,
};

pub fn make_parquet_file_name(station_id: u32) -> PathBuf {
    let today = Local::now();
    let file_name = format!(
        "climate-daily-{}-{}-{:02}-{:02}.parquet",
        station_id,
        today.year(),
        today.month(),
        today.day()
    );

    data_dir().join(file_name)
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Loads the cached dataset, scraping the archive first if needed.
async fn load_or_scrape(settings: &Settings, refresh: bool) -> Result<WeatherDataset> {
    let source = HttpSource::new(settings);
    cache::fetch_weather_data(settings, &source, refresh, today()).await
}

/// Loads the cached dataset without touching the network.
fn load_cached(settings: &Settings) -> Result<WeatherDataset> {
    let bar = create_spinner("Loading cached dataset...".to_string());
    let dataset = cache::load_dataset(&settings.cache_path())?;
    bar.finish_with_message(format!("Loaded {} records", dataset.len()));

    Ok(dataset)
}
