//! Downloads station-month pages from the climate archive.

use anyhow::{anyhow, Context, Result};
use reqwest::Client;

use crate::{config::Settings, scrape::MonthSource};

/// Fetches pages over HTTP, one request per station-month.
pub struct HttpSource {
    client: Client,
    settings: Settings,
}

impl HttpSource {
    pub fn new(settings: &Settings) -> Self {
        HttpSource {
            client: Client::new(),
            settings: settings.clone(),
        }
    }
}

impl MonthSource for HttpSource {
    async fn fetch_month(&self, year: i32, month: u32) -> Result<String> {
        let url = self.settings.month_url(year, month);
        download_page(&self.client, &url).await
    }
}

/// Downloads the page at `url` as text. Non-success statuses are errors.
pub async fn download_page(client: &Client, url: &str) -> Result<String> {
    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("Failed to download `{url}`"))?;

    if !response.status().is_success() {
        return Err(anyhow!(
            "Failed to download `{}`: {}",
            url,
            response.status()
        ));
    }

    let body = response
        .text()
        .await
        .with_context(|| format!("Failed to decode `{url}`"))?;

    Ok(body)
}
