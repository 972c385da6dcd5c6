//! Accumulates one row's raw cell text and turns it into a validated record.
//!
//! The archive marks gaps explicitly: `M` for a missing sample and `A` for an
//! accumulated one. Neither parses as a number, so both count as invalid.
//! A row with some valid values is repaired by zero-filling Max/Min and, when
//! Mean is also missing, averaging the repaired Max and Min. Zero here is a
//! fill value, not a missing-value sentinel.

use chrono::NaiveDate;

use super::{Field, TemperatureRecord};

#[derive(Debug, Clone, Default, PartialEq)]
/// Raw text seen for the current row, not yet validated.
pub struct DailyTemps {
    max: Option<String>,
    min: Option<String>,
    mean: Option<String>,
}

impl DailyTemps {
    /// Sets a field, replacing anything written earlier in the same row.
    pub fn set(&mut self, field: Field, raw: impl Into<String>) {
        let slot = match field {
            Field::Max => &mut self.max,
            Field::Min => &mut self.min,
            Field::Mean => &mut self.mean,
        };
        *slot = Some(raw.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Max => self.max.as_deref(),
            Field::Min => self.min.as_deref(),
            Field::Mean => self.mean.as_deref(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.max.is_none() && self.min.is_none() && self.mean.is_none()
    }

    pub fn is_complete(&self) -> bool {
        self.max.is_some() && self.min.is_some() && self.mean.is_some()
    }
}

/// Parses a raw cell value, keeping sign and digits verbatim. Non-finite
/// spellings (`nan`, `inf`) are not temperatures.
pub fn parse_temp(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

pub fn is_valid_temp(raw: &str) -> bool {
    parse_temp(raw).is_some()
}

/// Validates and repairs a complete row. Returns `None` when a field was
/// never seen or when no value is numeric.
pub fn finalize(temps: &DailyTemps) -> Option<TemperatureRecord> {
    let max = parse_temp(temps.get(Field::Max)?);
    let min = parse_temp(temps.get(Field::Min)?);
    let mean = parse_temp(temps.get(Field::Mean)?);

    if max.is_none() && min.is_none() && mean.is_none() {
        return None;
    }

    let max = max.unwrap_or(0.0);
    let min = min.unwrap_or(0.0);
    // Uses the zero-filled extremes, not only the valid ones.
    let mean = mean.unwrap_or((max + min) / 2.0);

    Some(TemperatureRecord { max, min, mean })
}

#[derive(Debug, Clone, PartialEq)]
/// What happened to a row when it closed.
pub enum RowOutcome {
    /// No day label was read for the row (header, summary, bad label).
    Undated,
    /// Dated, but no data cell text arrived.
    Empty,
    /// Fewer than three data cells arrived.
    Incomplete,
    /// Every value failed to parse; expected for fully missing days.
    AllInvalid,
    Complete(NaiveDate, TemperatureRecord),
    Repaired(NaiveDate, TemperatureRecord),
}

impl RowOutcome {
    pub fn record(&self) -> Option<(NaiveDate, TemperatureRecord)> {
        match self {
            RowOutcome::Complete(date, record) | RowOutcome::Repaired(date, record) => {
                Some((*date, *record))
            }
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
/// Owns the accumulator for the row in progress.
pub struct DailyRecordBuilder {
    temps: DailyTemps,
}

impl DailyRecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, field: Field, raw: impl Into<String>) {
        self.temps.set(field, raw);
    }

    #[cfg(test)]
    fn temps(&self) -> &DailyTemps {
        &self.temps
    }

    /// Finalizes the row for `date` and resets the accumulator, whether or
    /// not a record came out of it.
    pub fn close_row(&mut self, date: Option<NaiveDate>) -> RowOutcome {
        let temps = std::mem::take(&mut self.temps);

        let Some(date) = date else {
            return RowOutcome::Undated;
        };
        if temps.is_empty() {
            return RowOutcome::Empty;
        }
        if !temps.is_complete() {
            return RowOutcome::Incomplete;
        }

        let valid = Field::ALL
            .iter()
            .filter(|&&field| temps.get(field).is_some_and(is_valid_temp))
            .count();

        match finalize(&temps) {
            Some(record) if valid == Field::ALL.len() => RowOutcome::Complete(date, record),
            Some(record) => RowOutcome::Repaired(date, record),
            None => RowOutcome::AllInvalid,
        }
    }
}

// -- Tests ----------------------------------------------------------------------------
