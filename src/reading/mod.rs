//! Daily temperature records and the parser that extracts them from the
//! archive's station-month pages.

pub mod daily;
pub mod dataset;
pub mod field;
pub mod navigator;
pub mod tokenize;

pub use daily::{DailyRecordBuilder, RowOutcome};
pub use dataset::{day_date, TemperatureRecord, WeatherDataset};
pub use field::Field;
pub use tokenize::parse_month;
