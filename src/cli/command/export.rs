use std::path::PathBuf;

use anyhow::Result;

use crate::{config::Settings, parquet};

use super::{load_cached, make_parquet_file_name};

/// Writes the cached dataset to parquet. Returns the file path.
pub fn export(settings: &Settings, out: Option<PathBuf>) -> Result<String> {
    let dataset = load_cached(settings)?;
    let file_name = out.unwrap_or_else(|| make_parquet_file_name(settings.station_id));

    let written = parquet::save_daily(&dataset, &file_name)?;
    tracing::info!(written, "exported records");

    Ok(file_name.to_string_lossy().to_string())
}
