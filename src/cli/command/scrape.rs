use anyhow::Result;

use crate::config::Settings;

use super::load_or_scrape;

/// Scrapes (or reuses) the JSON cache. Returns the cache path.
pub async fn scrape(settings: &Settings, refresh: bool) -> Result<String> {
    let dataset = load_or_scrape(settings, refresh).await?;
    if dataset.is_empty() {
        tracing::warn!("no records were scraped");
    } else {
        tracing::info!(records = dataset.len(), "dataset ready");
    }

    Ok(settings.cache_path().to_string_lossy().to_string())
}
