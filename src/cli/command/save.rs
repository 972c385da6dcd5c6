use anyhow::Result;

use crate::{config::Settings, db::WeatherDb, summary::MONTH_NAMES};

use super::load_or_scrape;

/// Inserts the dataset into the database. Returns the number of new rows.
pub async fn save(settings: &Settings, refresh: bool) -> Result<usize> {
    let dataset = load_or_scrape(settings, refresh).await?;

    let mut db = WeatherDb::open(&settings.db_path())?;
    let inserted = db.insert_dataset(&dataset, &settings.location)?;
    tracing::info!(total = db.count()?, "rows in database");

    for (month, means) in db.monthly_means()? {
        tracing::info!(month = MONTH_NAMES[(month - 1) as usize], days = means.len(), "stored");
    }

    Ok(inserted)
}

/// Empties the database. Returns the number of deleted rows.
pub fn purge(settings: &Settings) -> Result<usize> {
    let db = WeatherDb::open(&settings.db_path())?;
    db.purge()
}
