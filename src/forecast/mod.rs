/// The per-parameter forecasting pipeline.
///
/// One evaluation runs strictly forward: historical series → exogenous
/// weather window → sequence building → opaque model call → inverse scaling
/// and date alignment → per-step risk classification. The weather window is
/// fetched once per station and shared by every parameter's pipeline.
///
/// Submodules:
/// - `scaling` — reversible min-max normalization.
/// - `sequence` — fixed-shape model input assembly.
/// - `postprocess` — output inversion and forecast date alignment.

pub mod postprocess;
pub mod scaling;
pub mod sequence;

use crate::ingest::history::StationHistory;
use crate::logging;
use crate::model::{ForecastPoint, Observation, PipelineError, WeatherWindow, HISTORY_WINDOW};
use crate::model_store::ModelResolver;
use crate::parameters::find_parameter;
use crate::risk::{classify, RiskAssessment};

/// Everything the display layer needs for one parameter: the forecast in
/// physical units, its per-step risk classification, the history window it
/// was built from, and the weather provenance.
#[derive(Debug, Clone)]
pub struct ParameterEvaluation {
    pub parameter: String,
    /// Natural unit, empty for unregistered parameters.
    pub unit: &'static str,
    /// The 10 observations the model saw, oldest first.
    pub recent_history: Vec<Observation>,
    pub forecast: Vec<ForecastPoint>,
    /// One assessment per forecast step.
    pub assessments: Vec<RiskAssessment>,
    /// True when the exogenous window was the synthetic fallback; the
    /// display layer must surface this.
    pub used_fallback_weather: bool,
    /// Narrative from the report collaborator, attached by the caller when
    /// report generation is enabled.
    pub narrative: Option<String>,
}

/// Runs one parameter's pipeline end to end.
pub fn evaluate_parameter(
    parameter: &str,
    history: &StationHistory,
    weather: &WeatherWindow,
    models: &dyn ModelResolver,
) -> Result<ParameterEvaluation, PipelineError> {
    let series = history.parameter_series(parameter);
    let model = models.model_for(parameter)?;

    let input = sequence::build_model_input(parameter, &series, weather)?;
    let raw_output = model.predict(&input.history, &input.exogenous)?;
    if raw_output.is_empty() {
        return Err(PipelineError::EmptyPrediction {
            parameter: parameter.to_string(),
        });
    }

    let forecast =
        postprocess::to_forecast_points(&raw_output, &input.target_scaler, input.last_observed_date);
    let assessments: Vec<RiskAssessment> = forecast
        .iter()
        .map(|point| classify(point.value, parameter))
        .collect();

    let recent_history = series[series.len() - HISTORY_WINDOW..].to_vec();
    let unit = find_parameter(parameter).map(|p| p.unit).unwrap_or("");

    Ok(ParameterEvaluation {
        parameter: parameter.to_string(),
        unit,
        recent_history,
        forecast,
        assessments,
        used_fallback_weather: weather.is_fallback(),
        narrative: None,
    })
}

/// The outcome of evaluating every parameter a station reports.
///
/// Each parameter's pipeline is independent: a failed parameter is recorded
/// here and never aborts the others.
pub struct StationEvaluation {
    pub station: String,
    pub results: Vec<(String, Result<ParameterEvaluation, PipelineError>)>,
}

impl StationEvaluation {
    pub fn successes(&self) -> impl Iterator<Item = &ParameterEvaluation> {
        self.results.iter().filter_map(|(_, r)| r.as_ref().ok())
    }

    pub fn failure_count(&self) -> usize {
        self.results.iter().filter(|(_, r)| r.is_err()).count()
    }
}

/// Evaluates every parameter column in a station's history file.
pub fn evaluate_station(
    station_name: &str,
    history: &StationHistory,
    weather: &WeatherWindow,
    models: &dyn ModelResolver,
) -> StationEvaluation {
    let mut results = Vec::new();
    for parameter in history.parameters() {
        let result = evaluate_parameter(parameter, history, weather, models);
        if let Err(err) = &result {
            logging::warn(
                logging::DataSource::Model,
                Some(station_name),
                &format!("{}: {}", parameter, err),
            );
        }
        results.push((parameter.to_string(), result));
    }

    let total = results.len();
    let failed = results.iter().filter(|(_, r)| r.is_err()).count();
    logging::log_evaluation_summary(station_name, total, total - failed, failed);

    StationEvaluation {
        station: station_name.to_string(),
        results,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
