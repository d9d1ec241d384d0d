/// Model input assembly.
///
/// Turns a parameter's observation history and a 5-day weather window into
/// the fixed-shape tensors the forecasting model expects:
///
///   history tensor:   1 sequence × 10 timesteps × 1 channel
///   exogenous tensor: 1 sequence × 5 timesteps × 2 channels (temp, rain)
///
/// Each channel is normalized with its own min-max mapping, fit only on the
/// values in that channel. The target-parameter scaler is retained so the
/// model's output can be inverted back to physical units.

use chrono::NaiveDate;
use ndarray::Array3;

use crate::forecast::scaling::MinMaxScaler;
use crate::model::{Observation, PipelineError, WeatherWindow, FORECAST_WINDOW, HISTORY_WINDOW};

/// The assembled model input: both tensors, the scale mappings needed for
/// inversion, and the window metadata downstream stages need.
#[derive(Debug, Clone)]
pub struct ModelInput {
    /// 1 × 10 × 1 normalized history of the target parameter.
    pub history: Array3<f64>,
    /// 1 × 5 × 2 normalized exogenous window: channel 0 temperature,
    /// channel 1 rainfall.
    pub exogenous: Array3<f64>,
    /// Scaler fit on the 10-value history window; inverts model output.
    pub target_scaler: MinMaxScaler,
    pub temperature_scaler: MinMaxScaler,
    pub rainfall_scaler: MinMaxScaler,
    /// The raw (physical-unit) history window, oldest first.
    pub history_values: Vec<f64>,
    /// Date of the last observation; forecast dates count forward from here.
    pub last_observed_date: NaiveDate,
}

/// Builds the model input from a parameter's full observation history
/// (ascending by date) and a coerced 5-day weather window.
///
/// Fails with `InsufficientHistory` when fewer than [`HISTORY_WINDOW`]
/// observations exist. Short histories are rejected, never padded: a padded
/// window would feed the model fabricated readings.
pub fn build_model_input(
    parameter: &str,
    observations: &[Observation],
    weather: &WeatherWindow,
) -> Result<ModelInput, PipelineError> {
    if observations.len() < HISTORY_WINDOW {
        return Err(PipelineError::InsufficientHistory {
            parameter: parameter.to_string(),
            available: observations.len(),
        });
    }
    debug_assert_eq!(weather.days.len(), FORECAST_WINDOW);

    let window = &observations[observations.len() - HISTORY_WINDOW..];
    let history_values: Vec<f64> = window.iter().map(|o| o.value).collect();
    let last_observed_date = window[HISTORY_WINDOW - 1].date;

    let temps: Vec<f64> = weather.days.iter().map(|d| d.temperature_c).collect();
    let rains: Vec<f64> = weather.days.iter().map(|d| d.rainfall_mm).collect();

    // fit() only fails on empty input; both windows are length-checked above.
    let target_scaler = MinMaxScaler::fit(&history_values).ok_or_else(|| {
        PipelineError::InsufficientHistory {
            parameter: parameter.to_string(),
            available: 0,
        }
    })?;
    let temperature_scaler = MinMaxScaler::fit(&temps).ok_or_else(|| {
        PipelineError::WeatherFetch("empty temperature channel".to_string())
    })?;
    let rainfall_scaler = MinMaxScaler::fit(&rains).ok_or_else(|| {
        PipelineError::WeatherFetch("empty rainfall channel".to_string())
    })?;

    let scaled_history = target_scaler.transform_all(&history_values);
    let scaled_temps = temperature_scaler.transform_all(&temps);
    let scaled_rains = rainfall_scaler.transform_all(&rains);

    let mut history = Array3::zeros((1, HISTORY_WINDOW, 1));
    for (t, &v) in scaled_history.iter().enumerate() {
        history[[0, t, 0]] = v;
    }

    let mut exogenous = Array3::zeros((1, FORECAST_WINDOW, 2));
    for t in 0..FORECAST_WINDOW {
        exogenous[[0, t, 0]] = scaled_temps[t];
        exogenous[[0, t, 1]] = scaled_rains[t];
    }

    Ok(ModelInput {
        history,
        exogenous,
        target_scaler,
        temperature_scaler,
        rainfall_scaler,
        history_values,
        last_observed_date,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
