//! The date-indexed dataset produced by a scrape, and the date keys it uses.

use std::collections::{btree_map, BTreeMap};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ScrapeError;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
/// A validated day: all three temperatures are always present.
pub struct TemperatureRecord {
    #[serde(rename = "Max")]
    pub max: f64,
    #[serde(rename = "Min")]
    pub min: f64,
    #[serde(rename = "Mean")]
    pub mean: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
/// Temperature records keyed by ISO date (`YYYY-MM-DD`).
///
/// Keys sort lexically, which for ISO dates is chronological order.
pub struct WeatherDataset {
    records: BTreeMap<String, TemperatureRecord>,
}

impl WeatherDataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a record, replacing any earlier record for the same date.
    pub fn insert(&mut self, date: NaiveDate, record: TemperatureRecord) {
        self.records.insert(date_key(date), record);
    }

    /// Merges another dataset into this one; its records win on collision.
    pub fn merge(&mut self, other: WeatherDataset) {
        self.records.extend(other.records);
    }

    pub fn get(&self, date: &str) -> Option<&TemperatureRecord> {
        self.records.get(date)
    }

    pub fn contains(&self, date: &str) -> bool {
        self.records.contains_key(date)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, TemperatureRecord> {
        self.records.iter()
    }

    /// Iterates records whose key parses as a date. Keys loaded from a
    /// hand-edited cache may not.
    pub fn dated(&self) -> impl Iterator<Item = (NaiveDate, &TemperatureRecord)> + '_ {
        self.records.iter().filter_map(|(key, record)| {
            match NaiveDate::parse_from_str(key, DATE_FORMAT) {
                Ok(date) => Some((date, record)),
                Err(_) => {
                    tracing::warn!(key = %key, "skipping record with unparseable date key");
                    None
                }
            }
        })
    }
}

/// Formats a date as a dataset key.
pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// True for a non-empty run of ASCII digits.
pub fn is_day_literal(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

/// Combines a day-label text with the page's year and month.
///
/// The label must be a plain non-negative integer and the result a real
/// calendar date.
pub fn day_date(year: i32, month: u32, label: &str) -> Result<NaiveDate, ScrapeError> {
    let malformed = || ScrapeError::MalformedDayLabel {
        label: label.to_string(),
        year,
        month,
    };

    if !is_day_literal(label) {
        return Err(malformed());
    }
    let day: u32 = label.parse().map_err(|_| malformed())?;
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(malformed)
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod test {

    use super::*;

    fn record(max: f64, min: f64, mean: f64) -> TemperatureRecord {
        TemperatureRecord { max, min, mean }
    }

    #[test]
    fn should_build_date_key() {
        let date = day_date(2021, 3, "5").unwrap();
        assert_eq!(date_key(date), "2021-03-05");
    }

    #[test]
    fn should_accept_zero_padded_label() {
        let date = day_date(2020, 12, "09").unwrap();
        assert_eq!(date_key(date), "2020-12-09");
    }

    #[test]
    fn should_reject_day_outside_month() {
        let err = day_date(2021, 4, "31").unwrap_err();
        assert!(matches!(
            err,
            ScrapeError::MalformedDayLabel { ref label, year: 2021, month: 4 } if label == "31"
        ));

        assert!(day_date(2021, 2, "29").is_err());
        assert!(day_date(2020, 2, "29").is_ok());
        assert!(day_date(2020, 2, "0").is_err());
    }

    #[test]
    fn should_reject_signed_label() {
        assert!(!is_day_literal("+5"));
        assert!(day_date(2020, 1, "+5").is_err());
        assert!(day_date(2020, 1, "-5").is_err());
    }

    #[test]
    fn should_reject_overflowing_label() {
        assert!(day_date(2020, 1, "99999999999999999999").is_err());
    }

    #[test]
    fn should_let_later_write_win() {
        let date = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let mut dataset = WeatherDataset::new();
        dataset.insert(date, record(1.0, 0.0, 0.5));
        dataset.insert(date, record(2.0, 1.0, 1.5));

        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.get("2020-01-01"), Some(&record(2.0, 1.0, 1.5)));
    }

    #[test]
    fn should_serialise_with_capitalised_fields() {
        let mut dataset = WeatherDataset::new();
        dataset.insert(
            NaiveDate::from_ymd_opt(2020, 1, 2).unwrap(),
            record(-3.5, -10.0, -6.8),
        );

        let json = serde_json::to_value(&dataset).unwrap();
        assert_eq!(json["2020-01-02"]["Max"], -3.5);
        assert_eq!(json["2020-01-02"]["Min"], -10.0);
        assert_eq!(json["2020-01-02"]["Mean"], -6.8);
    }

    #[test]
    fn should_skip_undated_keys() {
        let dataset: WeatherDataset = serde_json::from_str(
            r#"{"2020-01-01": {"Max": 1.0, "Min": 0.0, "Mean": 0.5},
                "garbage": {"Max": 1.0, "Min": 0.0, "Mean": 0.5}}"#,
        )
        .unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.dated().count(), 1);
    }
}
