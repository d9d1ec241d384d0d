/// Forecast post-processing.
///
/// The model emits values in the same normalized range as its history input.
/// This stage inverts the target-parameter scale mapping to recover physical
/// units and pairs each recovered value with its forecast calendar date:
/// step i (0-based) lands on `last_observed_date + (i + 1)` days.
///
/// Pure functions of their inputs; output length always equals input length
/// and dates increase by exactly one day per step.

use chrono::{Duration, NaiveDate};

use crate::forecast::scaling::MinMaxScaler;
use crate::model::ForecastPoint;

/// Inverts normalized model output and aligns it to forecast dates.
pub fn to_forecast_points(
    raw_output: &[f64],
    target_scaler: &MinMaxScaler,
    last_observed_date: NaiveDate,
) -> Vec<ForecastPoint> {
    raw_output
        .iter()
        .enumerate()
        .map(|(i, &scaled)| ForecastPoint {
            date: last_observed_date + Duration::days(i as i64 + 1),
            value: target_scaler.inverse(scaled),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
