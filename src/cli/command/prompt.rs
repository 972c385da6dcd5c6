use anyhow::Result;
use chrono::NaiveDate;

use crate::{config::Settings, prompt::build_prompt};

use super::load_cached;

/// Builds the forecasting prompt from the cached dataset.
pub fn prompt(settings: &Settings, date: NaiveDate, entries: usize) -> Result<String> {
    let dataset = load_cached(settings)?;
    Ok(build_prompt(&dataset, date, entries))
}
