/// Historical station-data ingest.
///
/// Each monitoring station has one CSV file: a `Date` column, one numeric
/// column per tracked parameter, and ancillary `Temperature`, `Rainfall`,
/// and `Quality` columns that are excluded from the parameter list.
///
/// Ingest normalizes the date column through `dates::parse_flexible_date`,
/// drops rows whose date fails to parse (counted, never retained with a null
/// date), and indexes the remainder by date, ascending and unique, with the
/// last row winning a duplicate date.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::NaiveDate;

use crate::dates::{is_ambiguous, parse_flexible_date};
use crate::logging::{self, DataSource};
use crate::model::Observation;
use crate::parameters::is_parameter_column;

/// A station's full historical record, indexed by normalized date.
#[derive(Debug, Clone)]
pub struct StationHistory {
    /// Column names in file order, `Date` excluded.
    columns: Vec<String>,
    /// Per-date cell values, aligned with `columns`. `None` marks an empty
    /// or non-numeric cell.
    rows: BTreeMap<NaiveDate, Vec<Option<f64>>>,
    /// Rows dropped because their date matched no supported format.
    pub dropped_rows: usize,
    /// Rows whose date string was valid under both day-first and
    /// month-first readings (resolved day-first).
    pub ambiguous_dates: usize,
}

/// Summary statistics for one parameter's full series, used by the report
/// payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesStats {
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub count: usize,
}

impl StationHistory {
    /// Reads and indexes a station CSV file.
    ///
    /// A ragged row never aborts the load; missing trailing cells read as
    /// empty.
    pub fn load(path: &Path) -> Result<StationHistory, Box<dyn std::error::Error>> {
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
        let headers = reader.headers()?.clone();

        let date_index = headers
            .iter()
            .position(|h| h.trim() == "Date")
            .ok_or("Station file has no Date column")?;

        let columns: Vec<String> = headers
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != date_index)
            .map(|(_, h)| h.trim().to_string())
            .collect();

        let mut history = StationHistory {
            columns,
            rows: BTreeMap::new(),
            dropped_rows: 0,
            ambiguous_dates: 0,
        };

        for record in reader.records() {
            let record = record?;
            let raw_date = record.get(date_index).unwrap_or("");

            let date = match parse_flexible_date(raw_date) {
                Ok(date) => date,
                Err(_) => {
                    history.dropped_rows += 1;
                    continue;
                }
            };
            if is_ambiguous(raw_date) {
                history.ambiguous_dates += 1;
            }

            let values: Vec<Option<f64>> = (0..headers.len())
                .filter(|&i| i != date_index)
                .map(|i| {
                    record
                        .get(i)
                        .and_then(|cell| cell.trim().parse::<f64>().ok())
                })
                .collect();

            history.rows.insert(date, values);
        }

        if history.dropped_rows > 0 {
            logging::warn(
                DataSource::History,
                path.to_str(),
                &format!("{} rows dropped for unparseable dates", history.dropped_rows),
            );
        }
        if history.ambiguous_dates > 0 {
            logging::warn(
                DataSource::History,
                path.to_str(),
                &format!(
                    "{} ambiguous date strings resolved day-first",
                    history.ambiguous_dates
                ),
            );
        }

        Ok(history)
    }

    /// Columns that hold forecastable parameter values, in file order.
    pub fn parameters(&self) -> Vec<&str> {
        self.columns
            .iter()
            .map(|c| c.as_str())
            .filter(|c| is_parameter_column(c))
            .collect()
    }

    /// The most recent observation date, or `None` for an empty file.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.rows.keys().next_back().copied()
    }

    /// Number of dated rows retained.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// One parameter's series, ascending by date, skipping empty cells.
    pub fn parameter_series(&self, parameter: &str) -> Vec<Observation> {
        let Some(column) = self.columns.iter().position(|c| c == parameter) else {
            return Vec::new();
        };
        self.rows
            .iter()
            .filter_map(|(&date, values)| {
                values[column].map(|value| Observation { date, value })
            })
            .collect()
    }

    /// Mean, sample standard deviation, and extremes of one parameter's
    /// full series. `None` when the series is empty.
    pub fn statistics(&self, parameter: &str) -> Option<SeriesStats> {
        let series = self.parameter_series(parameter);
        if series.is_empty() {
            return None;
        }
        let count = series.len();
        let values: Vec<f64> = series.iter().map(|o| o.value).collect();
        let mean = values.iter().sum::<f64>() / count as f64;
        let std_dev = if count > 1 {
            let variance = values
                .iter()
                .map(|v| (v - mean).powi(2))
                .sum::<f64>()
                / (count - 1) as f64;
            variance.sqrt()
        } else {
            0.0
        };
        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        Some(SeriesStats {
            mean,
            std_dev,
            min,
            max,
            count,
        })
    }

    /// Builds a history directly from dated rows; test and replay helper.
    pub fn from_rows(
        columns: Vec<String>,
        dated_rows: Vec<(NaiveDate, Vec<Option<f64>>)>,
    ) -> StationHistory {
        let mut rows = BTreeMap::new();
        for (date, values) in dated_rows {
            rows.insert(date, values);
        }
        StationHistory {
            columns,
            rows,
            dropped_rows: 0,
            ambiguous_dates: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn write_temp_csv(contents: &str) -> std::path::PathBuf {
        let mut path = std::env::temp_dir();
        let unique = format!(
            "aquamon_history_test_{}_{:?}.csv",
            std::process::id(),
            std::thread::current().id()
        );
        path.push(unique);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    const SAMPLE: &str = "\
Date,Dissolved Oxygen,pH,Temperature,Rainfall,Quality
13-01-2020,6.1,7.4,18.0,0.0,Good
14-01-2020,6.3,7.5,18.5,1.2,Good
garbage-date,9.9,9.9,0.0,0.0,Bad
15-01-2020,6.0,,19.0,0.0,Good
14-01-2020,6.4,7.6,18.6,1.0,Good
";

    #[test]
    fn test_load_drops_bad_dates_and_dedups() {
        let path = write_temp_csv(SAMPLE);
        let history = StationHistory::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        // Four parseable dates, one duplicate: three retained rows.
        assert_eq!(history.len(), 3);
        assert_eq!(history.dropped_rows, 1);
        // The later 14-01 row wins.
        let series = history.parameter_series("Dissolved Oxygen");
        assert_eq!(
            series,
            vec![
                Observation { date: ymd(2020, 1, 13), value: 6.1 },
                Observation { date: ymd(2020, 1, 14), value: 6.4 },
                Observation { date: ymd(2020, 1, 15), value: 6.0 },
            ]
        );
    }

    #[test]
    fn test_empty_cells_are_skipped_not_zeroed() {
        let path = write_temp_csv(SAMPLE);
        let history = StationHistory::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let ph = history.parameter_series("pH");
        // The 15-01 pH cell is empty and must not appear as 0.0.
        assert_eq!(ph.len(), 2);
        assert!(ph.iter().all(|o| o.date != ymd(2020, 1, 15)));
    }

    #[test]
    fn test_ancillary_columns_are_excluded_from_parameters() {
        let path = write_temp_csv(SAMPLE);
        let history = StationHistory::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(history.parameters(), vec!["Dissolved Oxygen", "pH"]);
    }

    #[test]
    fn test_last_date() {
        let path = write_temp_csv(SAMPLE);
        let history = StationHistory::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(history.last_date(), Some(ymd(2020, 1, 15)));
    }

    #[test]
    fn test_ambiguous_dates_are_counted() {
        let csv = "\
Date,pH
03-04-2021,7.0
13-04-2021,7.1
";
        let path = write_temp_csv(csv);
        let history = StationHistory::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(history.ambiguous_dates, 1);
        // Day-first resolution: 3 April, not 4 March.
        assert_eq!(
            history.parameter_series("pH")[0].date,
            ymd(2021, 4, 3)
        );
    }

    #[test]
    fn test_statistics() {
        let history = StationHistory::from_rows(
            vec!["pH".to_string()],
            vec![
                (ymd(2021, 1, 1), vec![Some(7.0)]),
                (ymd(2021, 1, 2), vec![Some(7.5)]),
                (ymd(2021, 1, 3), vec![Some(8.0)]),
            ],
        );
        let stats = history.statistics("pH").unwrap();
        assert!((stats.mean - 7.5).abs() < 1e-12);
        assert!((stats.std_dev - 0.5).abs() < 1e-12);
        assert_eq!(stats.min, 7.0);
        assert_eq!(stats.max, 8.0);
        assert_eq!(stats.count, 3);
    }

    #[test]
    fn test_statistics_for_missing_parameter_is_none() {
        let history = StationHistory::from_rows(vec!["pH".to_string()], vec![]);
        assert!(history.statistics("pH").is_none());
        assert!(history.statistics("Nitrate").is_none());
    }

    #[test]
    fn test_series_for_unknown_column_is_empty() {
        let history = StationHistory::from_rows(
            vec!["pH".to_string()],
            vec![(ymd(2021, 1, 1), vec![Some(7.0)])],
        );
        assert!(history.parameter_series("Turbidity").is_empty());
    }
}
