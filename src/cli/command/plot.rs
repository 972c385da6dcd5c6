use anyhow::{anyhow, Result};

use crate::{
    config::Settings,
    summary::{render_box_summary, render_daily_series, MonthlyMeans},
};

use super::load_cached;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlotRequest {
    /// Monthly box summary over an inclusive year range; open ends default
    /// to the first and last year in the data.
    Box { from: Option<i32>, to: Option<i32> },
    /// Daily means of one month.
    Line { year: i32, month: u32 },
}

pub fn plot(settings: &Settings, request: PlotRequest) -> Result<String> {
    let dataset = load_cached(settings)?;
    render(&MonthlyMeans::from_dataset(&dataset), request)
}

fn render(means: &MonthlyMeans, request: PlotRequest) -> Result<String> {
    match request {
        PlotRequest::Line { year, month } => Ok(render_daily_series(means, year, month)),
        PlotRequest::Box { from, to } => {
            let years = means.years();
            let (Some(from), Some(to)) = (
                from.or(years.map(|y| y.0)),
                to.or(years.map(|y| y.1)),
            ) else {
                return Ok("No data available.".to_string());
            };
            if from > to {
                return Err(anyhow!("--from {} is after --to {}", from, to));
            }
            Ok(render_box_summary(&means.box_summary(from, to), from, to))
        }
    }
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod test {
    use chrono::NaiveDate;

    use crate::reading::{TemperatureRecord, WeatherDataset};

    use super::*;

    fn means() -> MonthlyMeans {
        let mut dataset = WeatherDataset::new();
        for (y, m) in [(2020, 1), (2022, 6)] {
            dataset.insert(
                NaiveDate::from_ymd_opt(y, m, 1).unwrap(),
                TemperatureRecord { max: 1.0, min: -1.0, mean: 0.0 },
            );
        }
        MonthlyMeans::from_dataset(&dataset)
    }

    #[test]
    fn should_default_year_range_to_data() {
        let text = render(&means(), PlotRequest::Box { from: None, to: None }).unwrap();

        assert!(text.starts_with("Mean Temperatures from 2020 to 2022"));
    }

    #[test]
    fn should_reject_reversed_range() {
        let request = PlotRequest::Box { from: Some(2024), to: Some(2020) };

        assert!(render(&means(), request).is_err());
    }

    #[test]
    fn should_report_no_data() {
        let empty = MonthlyMeans::from_dataset(&WeatherDataset::new());

        let text = render(&empty, PlotRequest::Box { from: None, to: None }).unwrap();
        assert_eq!(text, "No data available.");

        let text = render(&means(), PlotRequest::Line { year: 2021, month: 2 }).unwrap();
        assert_eq!(text, "No data available for 2021-02.");
    }
}
