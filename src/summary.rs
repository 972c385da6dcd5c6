//! Monthly aggregates of daily mean temperatures, for box and line plots.

use std::collections::BTreeMap;

use chrono::Datelike;

use crate::reading::WeatherDataset;

pub const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FiveNumber {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl FiveNumber {
    /// Summary with linearly interpolated quartiles; `None` for no values.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        Some(FiveNumber {
            min: sorted[0],
            q1: percentile(&sorted, 0.25),
            median: percentile(&sorted, 0.5),
            q3: percentile(&sorted, 0.75),
            max: sorted[sorted.len() - 1],
        })
    }
}

fn percentile(sorted: &[f64], p: f64) -> f64 {
    let rank = p * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let weight = rank - lower as f64;

    sorted[lower] + (sorted[upper] - sorted[lower]) * weight
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthSummary {
    pub month: u32,
    pub count: usize,
    pub stats: Option<FiveNumber>,
}

#[derive(Debug, Default)]
/// Daily means grouped by year, then month, in date order.
pub struct MonthlyMeans {
    by_year: BTreeMap<i32, BTreeMap<u32, Vec<f64>>>,
}

impl MonthlyMeans {
    pub fn from_dataset(dataset: &WeatherDataset) -> Self {
        let mut by_year: BTreeMap<i32, BTreeMap<u32, Vec<f64>>> = BTreeMap::new();

        for (date, record) in dataset.dated() {
            by_year
                .entry(date.year())
                .or_default()
                .entry(date.month())
                .or_default()
                .push(record.mean);
        }

        MonthlyMeans { by_year }
    }

    /// Means for one month in day order, or `None` when there is no data.
    pub fn daily_series(&self, year: i32, month: u32) -> Option<&[f64]> {
        self.by_year
            .get(&year)
            .and_then(|months| months.get(&month))
            .map(Vec::as_slice)
            .filter(|values| !values.is_empty())
    }

    /// Means for `month` pooled across the inclusive year range.
    pub fn pooled(&self, month: u32, first_year: i32, last_year: i32) -> Vec<f64> {
        (first_year..=last_year)
            .filter_map(|year| self.daily_series(year, month))
            .flatten()
            .copied()
            .collect()
    }

    /// One summary per calendar month across the inclusive year range.
    pub fn box_summary(&self, first_year: i32, last_year: i32) -> Vec<MonthSummary> {
        (1..=12)
            .map(|month| {
                let values = self.pooled(month, first_year, last_year);
                MonthSummary {
                    month,
                    count: values.len(),
                    stats: FiveNumber::from_values(&values),
                }
            })
            .collect()
    }

    pub fn years(&self) -> Option<(i32, i32)> {
        let first = *self.by_year.keys().next()?;
        let last = *self.by_year.keys().next_back()?;
        Some((first, last))
    }
}

/// Renders box summaries as a fixed-width table.
pub fn render_box_summary(summaries: &[MonthSummary], first_year: i32, last_year: i32) -> String {
    let mut out = format!("Mean Temperatures from {first_year} to {last_year}\n");
    out.push_str("Month  Days     Min      Q1  Median      Q3     Max\n");

    for s in summaries {
        let name = MONTH_NAMES[(s.month - 1) as usize];
        match s.stats {
            Some(st) => out.push_str(&format!(
                "{name:<5} {:>5} {:>7.1} {:>7.1} {:>7.1} {:>7.1} {:>7.1}\n",
                s.count, st.min, st.q1, st.median, st.q3, st.max
            )),
            None => out.push_str(&format!("{name:<5} {:>5}  no data\n", s.count)),
        }
    }

    out
}

/// Renders one month's daily means, or the no-data message.
pub fn render_daily_series(means: &MonthlyMeans, year: i32, month: u32) -> String {
    match means.daily_series(year, month) {
        Some(values) => {
            let mut out = format!("Daily Mean Temperatures for {month}/{year}\n");
            for (i, value) in values.iter().enumerate() {
                out.push_str(&format!("{:>3} {:>7.1}\n", i + 1, value));
            }
            out
        }
        None => format!("No data available for {year}-{month:02}."),
    }
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod test {
    use chrono::NaiveDate;

    use crate::reading::TemperatureRecord;

    use super::*;

    fn dataset(entries: &[(i32, u32, u32, f64)]) -> WeatherDataset {
        let mut dataset = WeatherDataset::new();
        for &(y, m, d, mean) in entries {
            dataset.insert(
                NaiveDate::from_ymd_opt(y, m, d).unwrap(),
                TemperatureRecord {
                    max: mean,
                    min: mean,
                    mean,
                },
            );
        }
        dataset
    }

    #[test]
    fn should_group_by_year_and_month() {
        let means = MonthlyMeans::from_dataset(&dataset(&[
            (2020, 1, 2, -10.0),
            (2020, 1, 1, -12.0),
            (2021, 1, 1, -20.0),
        ]));

        assert_eq!(means.daily_series(2020, 1), Some(&[-12.0, -10.0][..]));
        assert_eq!(means.daily_series(2021, 1), Some(&[-20.0][..]));
        assert_eq!(means.years(), Some((2020, 2021)));
    }

    #[test]
    fn should_report_no_data_for_empty_month() {
        let means = MonthlyMeans::from_dataset(&dataset(&[(2020, 1, 1, 0.0)]));

        assert_eq!(means.daily_series(2020, 12), None);
        assert_eq!(
            render_daily_series(&means, 2020, 12),
            "No data available for 2020-12."
        );
    }

    #[test]
    fn should_pool_across_year_range() {
        let means = MonthlyMeans::from_dataset(&dataset(&[
            (2019, 7, 1, 30.0),
            (2020, 7, 1, 20.0),
            (2021, 7, 1, 22.0),
            (2022, 7, 1, 24.0),
        ]));

        assert_eq!(means.pooled(7, 2020, 2021), vec![20.0, 22.0]);
    }

    #[test]
    fn should_interpolate_quartiles() {
        let stats = FiveNumber::from_values(&[4.0, 1.0, 3.0, 2.0]).unwrap();

        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.q1, 1.75);
        assert_eq!(stats.median, 2.5);
        assert_eq!(stats.q3, 3.25);
        assert_eq!(stats.max, 4.0);
    }

    #[test]
    fn should_summarise_every_month() {
        let means = MonthlyMeans::from_dataset(&dataset(&[(2020, 3, 1, -2.0), (2020, 3, 2, 2.0)]));

        let summaries = means.box_summary(2020, 2024);

        assert_eq!(summaries.len(), 12);
        assert_eq!(summaries[2].count, 2);
        assert_eq!(summaries[2].stats.unwrap().median, 0.0);
        assert!(summaries[0].stats.is_none());

        let table = render_box_summary(&summaries, 2020, 2024);
        assert!(table.contains("Jan       0  no data"));
        assert!(table.lines().any(|l| l.starts_with("Mar")));
    }
}
