//! Save the daily records to a parquet file.

use std::{fs::File, path::Path, sync::Arc};

use anyhow::Result;
use arrow::{
    array::{Date32Builder, Float64Builder},
    datatypes::{DataType, Field, Schema},
    record_batch::RecordBatch,
};
use chrono::Datelike;
use parquet::{arrow::ArrowWriter, file::properties::WriterProperties};

use crate::{cli::create_progress_bar, reading::WeatherDataset};

/// `NaiveDate::num_days_from_ce` of 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

pub fn save_daily(dataset: &WeatherDataset, file_path: &Path) -> Result<usize> {
    let file = File::create(file_path)?;

    let schema = Arc::new(Schema::new(vec![
        Field::new("date", DataType::Date32, false),
        Field::new("max", DataType::Float64, false),
        Field::new("min", DataType::Float64, false),
        Field::new("mean", DataType::Float64, false),
    ]));

    let props = WriterProperties::builder()
        .set_compression(parquet::basic::Compression::ZSTD(
            parquet::basic::ZstdLevel::default(),
        ))
        .build();

    let mut writer = ArrowWriter::try_new(file, schema.clone(), Some(props))?;
    let pb = create_progress_bar(dataset.len() as u64, "Writing parquet file".to_string());

    let rows = dataset.len();
    let mut date_builder = Date32Builder::with_capacity(rows);
    let mut max_builder = Float64Builder::with_capacity(rows);
    let mut min_builder = Float64Builder::with_capacity(rows);
    let mut mean_builder = Float64Builder::with_capacity(rows);

    let mut written = 0;
    for (date, record) in dataset.dated() {
        date_builder.append_value(date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE);
        max_builder.append_value(record.max);
        min_builder.append_value(record.min);
        mean_builder.append_value(record.mean);

        written += 1;
        pb.inc(1);
    }

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(date_builder.finish()),
            Arc::new(max_builder.finish()),
            Arc::new(min_builder.finish()),
            Arc::new(mean_builder.finish()),
        ],
    )?;

    writer.write(&batch)?;
    writer.close()?;
    pb.finish_with_message("Finished writing Parquet file");

    Ok(written)
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod test {
    use std::fs;

    use arrow::array::{Array, Date32Array, Float64Array};
    use chrono::NaiveDate;
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
    use tempfile::NamedTempFile;

    use crate::reading::TemperatureRecord;

    use super::*;

    #[test]
    fn should_write_dates_and_temperatures() {
        let mut dataset = WeatherDataset::new();
        dataset.insert(
            NaiveDate::from_ymd_opt(1970, 1, 2).unwrap(),
            TemperatureRecord { max: 1.0, min: -1.0, mean: 0.0 },
        );
        dataset.insert(
            NaiveDate::from_ymd_opt(2020, 1, 12).unwrap(),
            TemperatureRecord { max: 5.4, min: 0.0, mean: 2.7 },
        );

        let temp_file = NamedTempFile::new().unwrap();
        let written = save_daily(&dataset, temp_file.path()).unwrap();
        assert_eq!(written, 2);

        let file = fs::File::open(temp_file.path()).unwrap();
        let mut reader = ParquetRecordBatchReaderBuilder::try_new(file)
            .unwrap()
            .build()
            .unwrap();
        let batch = reader.next().unwrap().unwrap();

        assert_eq!(batch.num_rows(), 2);
        assert_eq!(batch.schema().field(0).name(), "date");

        let dates = batch
            .column(0)
            .as_any()
            .downcast_ref::<Date32Array>()
            .unwrap();
        assert_eq!(dates.value(0), 1);
        assert_eq!(dates.value(1), 18273);

        let means = batch
            .column(3)
            .as_any()
            .downcast_ref::<Float64Array>()
            .unwrap();
        assert_eq!(means.len(), 2);
        assert_eq!(means.value(1), 2.7);
    }
}
