/// Core data types for the river water-quality forecasting service.
///
/// This module defines the shared domain model imported by all other modules.
/// It contains no logic, no I/O, and no external dependencies beyond chrono;
/// only types.

use chrono::NaiveDate;

// ---------------------------------------------------------------------------
// Pipeline shape constants
// ---------------------------------------------------------------------------

/// Number of trailing historical observations fed to the forecasting model.
pub const HISTORY_WINDOW: usize = 10;

/// Number of forecast days in the exogenous weather window, and the number
/// of steps the forecasting model predicts.
pub const FORECAST_WINDOW: usize = 5;

// ---------------------------------------------------------------------------
// Observation types
// ---------------------------------------------------------------------------

/// A single dated measurement of one water-quality parameter.
///
/// Produced by `ingest::history` after date normalization. Rows whose date
/// string fails to parse are dropped during ingest and never reach this type.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub date: NaiveDate,
    pub value: f64,
}

/// One day of weather forecast used as an exogenous model input.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherDay {
    pub date: NaiveDate,
    pub temperature_c: f64,
    pub rainfall_mm: f64,
}

/// Where a weather window came from. `Fallback` marks synthetic default data
/// substituted after a fetch failure, so the display layer can warn the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherSource {
    Api,
    Fallback,
}

/// A weather window of exactly [`FORECAST_WINDOW`] days plus its provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherWindow {
    pub days: Vec<WeatherDay>,
    pub source: WeatherSource,
}

impl WeatherWindow {
    pub fn is_fallback(&self) -> bool {
        self.source == WeatherSource::Fallback
    }
}

// ---------------------------------------------------------------------------
// Forecast types
// ---------------------------------------------------------------------------

/// One predicted step in physical units, paired with its forecast date.
///
/// Produced by `forecast::postprocess` by inverting the model's normalized
/// output through the target-parameter scale mapping. For step index i
/// (0-based) the date is `last_observed_date + (i + 1)` days.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub value: f64,
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can arise along one parameter's forecasting pipeline.
///
/// Failures in one parameter's pipeline never abort other parameters; the
/// station-level evaluation records the error and moves on.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineError {
    /// A date string matched none of the supported calendar formats.
    /// Recovered locally by dropping the row.
    DateParse(String),
    /// Fewer than [`HISTORY_WINDOW`] observations exist for a parameter.
    /// Surfaced as "forecast unavailable", never padded with fabricated
    /// history.
    InsufficientHistory { parameter: String, available: usize },
    /// Weather API failure that could not be recovered by substituting the
    /// synthetic default window.
    WeatherFetch(String),
    /// No forecasting artifact is registered or present for a parameter.
    ModelUnavailable { parameter: String, artifact: String },
    /// The model produced no predicted steps.
    EmptyPrediction { parameter: String },
    /// Narrative-generation collaborator failure. Recovered locally by
    /// surfacing the raw error text in place of the narrative.
    ReportGeneration(String),
}

impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineError::DateParse(s) => write!(f, "Unable to parse date: {}", s),
            PipelineError::InsufficientHistory { parameter, available } => write!(
                f,
                "Insufficient history for {}: {} of {} required observations",
                parameter, available, HISTORY_WINDOW
            ),
            PipelineError::WeatherFetch(msg) => write!(f, "Weather fetch failed: {}", msg),
            PipelineError::ModelUnavailable { parameter, artifact } => {
                write!(f, "Model for {} not found ({})", parameter, artifact)
            }
            PipelineError::EmptyPrediction { parameter } => {
                write!(f, "Model for {} returned no predicted steps", parameter)
            }
            PipelineError::ReportGeneration(msg) => {
                write!(f, "Report generation failed: {}", msg)
            }
        }
    }
}

impl std::error::Error for PipelineError {}
