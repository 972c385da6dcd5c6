//! Settings shared by every command, from flags or the environment.

use std::path::PathBuf;

use clap::Args;

pub const DEFAULT_STATION_ID: u32 = 27174;
pub const DEFAULT_LOCATION: &str = "Winnipeg, MB";
pub const DEFAULT_START_YEAR: i32 = 2020;
pub const DEFAULT_START_MONTH: u32 = 1;

const ARCHIVE_URL: &str = "https://climate.weather.gc.ca/climate_data/daily_data_e.html";

#[derive(Debug, Clone, Args)]
pub struct Settings {
    /// Environment Canada climate station
    #[arg(long, env = "CLIMATE_STATION_ID", default_value_t = DEFAULT_STATION_ID, global = true)]
    pub station_id: u32,

    /// Location label stored with each database row
    #[arg(long, env = "CLIMATE_LOCATION", default_value = DEFAULT_LOCATION, global = true)]
    pub location: String,

    /// JSON dataset cache [default: ~/weather_data.json]
    #[arg(long = "cache", env = "CLIMATE_CACHE", global = true)]
    pub cache: Option<PathBuf>,

    /// SQLite database [default: ~/weather.sqlite]
    #[arg(long = "db", env = "CLIMATE_DB", global = true)]
    pub db: Option<PathBuf>,

    /// First year to scrape
    #[arg(long, default_value_t = DEFAULT_START_YEAR, global = true)]
    pub start_year: i32,

    /// First month to scrape
    #[arg(
        long,
        default_value_t = DEFAULT_START_MONTH,
        value_parser = clap::value_parser!(u32).range(1..=12),
        global = true
    )]
    pub start_month: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            station_id: DEFAULT_STATION_ID,
            location: DEFAULT_LOCATION.to_string(),
            cache: None,
            db: None,
            start_year: DEFAULT_START_YEAR,
            start_month: DEFAULT_START_MONTH,
        }
    }
}

impl Settings {
    pub fn cache_path(&self) -> PathBuf {
        self.cache
            .clone()
            .unwrap_or_else(|| data_dir().join("weather_data.json"))
    }

    pub fn db_path(&self) -> PathBuf {
        self.db
            .clone()
            .unwrap_or_else(|| data_dir().join("weather.sqlite"))
    }

    /// Daily data page for one station-month.
    pub fn month_url(&self, year: i32, month: u32) -> String {
        format!(
            "{ARCHIVE_URL}?StationID={}&timeframe=2&StartYear=1840&EndYear={year}&Day=1&Year={year}&Month={month}",
            self.station_id
        )
    }
}

/// Home directory, or the working directory when there is none.
pub fn data_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

// -- Tests -------------------------------------------------------------------
