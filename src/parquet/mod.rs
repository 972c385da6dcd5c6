//! Handles serialising and saving data to disk in the _parquet_ file format.

pub mod daily;

pub use daily::save_daily;
