//! Typed failures of the parsing core and the dataset cache.

use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    /// A day label that is not a day of the month, or not a real calendar date.
    #[error("malformed day label `{label}` for {year}-{month:02}")]
    MalformedDayLabel { label: String, year: i32, month: u32 },

    #[error("dataset cache `{}` does not exist", .path.display())]
    DatasetMissing { path: PathBuf },

    #[error("could not read dataset cache `{}`", .path.display())]
    DatasetRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not decode dataset cache `{}`", .path.display())]
    DatasetDecode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
