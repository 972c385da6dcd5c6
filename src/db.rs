//! SQLite persistence of daily records, one row per date and location.

use std::{collections::BTreeMap, path::Path};

use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use crate::reading::WeatherDataset;

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS WeatherData (
    id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
    sample_date TEXT NOT NULL,
    location TEXT NOT NULL,
    min_temp REAL NOT NULL,
    max_temp REAL NOT NULL,
    avg_temp REAL NOT NULL,
    UNIQUE(sample_date, location)
)";

pub struct WeatherDb {
    conn: Connection,
}

impl WeatherDb {
    /// Opens (or creates) the database and makes sure the table exists.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database `{}`", path.display()))?;
        Self::initialise(conn)
    }

    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self> {
        Self::initialise(Connection::open_in_memory()?)
    }

    fn initialise(conn: Connection) -> Result<Self> {
        conn.execute_batch(CREATE_TABLE)?;
        Ok(WeatherDb { conn })
    }

    /// Inserts every record under `location`, skipping dates already stored
    /// for it. Returns the number of new rows.
    pub fn insert_dataset(&mut self, dataset: &WeatherDataset, location: &str) -> Result<usize> {
        let tx = self.conn.transaction()?;
        let mut inserted = 0;

        {
            let mut stmt = tx.prepare(
                "INSERT OR IGNORE INTO WeatherData (sample_date, location, min_temp, max_temp, avg_temp)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;

            for (date, record) in dataset.iter() {
                inserted += stmt.execute(params![date, location, record.min, record.max, record.mean])?;
            }
        }

        tx.commit()?;
        tracing::info!(inserted, total = dataset.len(), "saved records");

        Ok(inserted)
    }

    /// Stored mean temperatures grouped by calendar month. Every month
    /// 1..=12 is present, possibly empty.
    pub fn monthly_means(&self) -> Result<BTreeMap<u32, Vec<f64>>> {
        let mut months: BTreeMap<u32, Vec<f64>> = (1..=12).map(|m| (m, Vec::new())).collect();

        let mut stmt = self
            .conn
            .prepare("SELECT sample_date, avg_temp FROM WeatherData ORDER BY sample_date")?;
        let rows = stmt.query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, f64>(1)?)))?;

        for row in rows {
            let (date, mean) = row?;
            match date.get(5..7).and_then(|m| m.parse::<u32>().ok()) {
                Some(month) if (1..=12).contains(&month) => {
                    months.entry(month).or_default().push(mean)
                }
                _ => tracing::warn!(date = %date, "skipping row with malformed date"),
            }
        }

        Ok(months)
    }

    pub fn count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM WeatherData", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Deletes every row. Returns the number deleted.
    pub fn purge(&self) -> Result<usize> {
        let deleted = self.conn.execute("DELETE FROM WeatherData", [])?;
        Ok(deleted)
    }
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod test {
    use chrono::NaiveDate;

    use crate::reading::TemperatureRecord;

    use super::*;

    fn dataset() -> WeatherDataset {
        let mut dataset = WeatherDataset::new();
        for (m, d, mean) in [(1, 1, -12.5), (1, 2, -10.0), (2, 1, -8.0), (7, 15, 21.3)] {
            dataset.insert(
                NaiveDate::from_ymd_opt(2020, m, d).unwrap(),
                TemperatureRecord {
                    max: mean + 5.0,
                    min: mean - 5.0,
                    mean,
                },
            );
        }
        dataset
    }

    #[test]
    fn should_insert_and_ignore_duplicates() {
        let mut db = WeatherDb::open_in_memory().unwrap();

        assert_eq!(db.insert_dataset(&dataset(), "Winnipeg, MB").unwrap(), 4);
        assert_eq!(db.insert_dataset(&dataset(), "Winnipeg, MB").unwrap(), 0);
        assert_eq!(db.count().unwrap(), 4);
    }

    #[test]
    fn should_keep_locations_apart() {
        let mut db = WeatherDb::open_in_memory().unwrap();

        db.insert_dataset(&dataset(), "Winnipeg, MB").unwrap();
        db.insert_dataset(&dataset(), "Brandon, MB").unwrap();

        assert_eq!(db.count().unwrap(), 8);
    }

    #[test]
    fn should_group_means_by_month() {
        let mut db = WeatherDb::open_in_memory().unwrap();
        db.insert_dataset(&dataset(), "Winnipeg, MB").unwrap();

        let months = db.monthly_means().unwrap();

        assert_eq!(months.len(), 12);
        assert_eq!(months[&1], vec![-12.5, -10.0]);
        assert_eq!(months[&2], vec![-8.0]);
        assert_eq!(months[&7], vec![21.3]);
        assert!(months[&12].is_empty());
    }

    #[test]
    fn should_purge_all_rows() {
        let mut db = WeatherDb::open_in_memory().unwrap();
        db.insert_dataset(&dataset(), "Winnipeg, MB").unwrap();

        assert_eq!(db.purge().unwrap(), 4);
        assert_eq!(db.count().unwrap(), 0);
    }
}
