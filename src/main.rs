//! Console driver for the water-quality forecasting service.
//!
//! Loads configuration, walks the station registry, runs every parameter's
//! pipeline, and renders the evaluations as text. The graphical display
//! layer consumes the same `ParameterEvaluation` values; this binary is the
//! headless rendering of them.

use std::path::Path;
use std::time::Duration;

use aquamon_service::config::{api_key_from_env, Config, REPORT_API_KEY_VAR, WEATHER_API_KEY_VAR};
use aquamon_service::forecast::{self, StationEvaluation};
use aquamon_service::ingest::history::StationHistory;
use aquamon_service::ingest::weather;
use aquamon_service::logging::{self, DataSource};
use aquamon_service::model_store::{DevModeResolver, ModelStore};
use aquamon_service::report;
use aquamon_service::stations::STATION_REGISTRY;
use aquamon_service::view::{NavAction, View};

fn main() {
    dotenv::dotenv().ok();

    let config = match Config::load(Path::new("aquamon.toml")) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Failed to load configuration: {}", err);
            std::process::exit(1);
        }
    };
    logging::init_logger(
        config.min_log_level(),
        config.logging.file.as_deref(),
        config.logging.console_timestamps,
    );

    // Navigation state is an explicit value threaded into the render path,
    // not ambient global state. The first CLI argument plays the user
    // action; no argument opens the water-quality view.
    let action = match std::env::args().nth(1).as_deref() {
        Some("home") => NavAction::GoHome,
        Some("feedback") => NavAction::OpenFeedback,
        _ => NavAction::OpenWaterQuality,
    };
    render_view(View::default().apply(action), &config);
}

fn render_view(view: View, config: &Config) {
    match view {
        View::Home => {
            println!("Monitored stations:");
            for station in STATION_REGISTRY {
                println!(
                    "  {} ({:.4}, {:.4}) - {:?}",
                    station.name, station.latitude, station.longitude, station.quality_class
                );
            }
        }
        View::WaterQuality => run_water_quality(config),
        View::Feedback => {
            println!("Feedback is collected through the web display layer.");
        }
    }
}

fn run_water_quality(config: &Config) {
    let client = match reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
    {
        Ok(client) => client,
        Err(err) => {
            logging::error(DataSource::System, None, &format!("HTTP client: {}", err));
            std::process::exit(1);
        }
    };

    let weather_key = api_key_from_env(WEATHER_API_KEY_VAR);
    let report_key = api_key_from_env(REPORT_API_KEY_VAR);
    let resolver = DevModeResolver::new(ModelStore::new(config.model_dir.clone()));

    for station in STATION_REGISTRY {
        println!("\n=== {} ===", station.name);
        println!(
            "Overall water quality: {:?} - {}",
            station.quality_class,
            station.quality_class.description()
        );

        let history_path = config.data_dir.join(station.data_file);
        let history = match StationHistory::load(&history_path) {
            Ok(history) => history,
            Err(err) => {
                logging::error(
                    DataSource::History,
                    Some(station.name),
                    &format!("Could not read {}: {}", history_path.display(), err),
                );
                continue;
            }
        };
        let Some(last_date) = history.last_date() else {
            logging::warn(DataSource::History, Some(station.name), "No dated rows");
            continue;
        };

        let window = match &weather_key {
            Some(key) => weather::forecast_window(
                &client,
                station.latitude,
                station.longitude,
                key,
                last_date,
            ),
            None => {
                logging::warn(
                    DataSource::Weather,
                    Some(station.name),
                    &format!("{} unset; using synthetic weather", WEATHER_API_KEY_VAR),
                );
                weather::synthetic_window(last_date)
            }
        };

        let mut evaluation = forecast::evaluate_station(station.name, &history, &window, &resolver);
        if let Some(key) = &report_key {
            attach_narratives(&client, config, key, &history, &mut evaluation);
        }
        render_station(&evaluation);
    }
}

fn attach_narratives(
    client: &reqwest::blocking::Client,
    config: &Config,
    api_key: &str,
    history: &StationHistory,
    evaluation: &mut StationEvaluation,
) {
    for (_, result) in evaluation.results.iter_mut() {
        let Ok(parameter_evaluation) = result else {
            continue;
        };
        let Some(stats) = history.statistics(&parameter_evaluation.parameter) else {
            continue;
        };
        let prompt = report::build_prompt(
            &parameter_evaluation.parameter,
            parameter_evaluation.unit,
            &stats,
            &parameter_evaluation.forecast,
            &parameter_evaluation.assessments,
        );
        let narrative = report::generate_report_or_error_text(
            client,
            config.report_api_url.as_deref(),
            api_key,
            &prompt,
        );
        parameter_evaluation.narrative = Some(narrative);
    }
}

fn render_station(evaluation: &StationEvaluation) {
    for (parameter, result) in &evaluation.results {
        match result {
            Ok(parameter_evaluation) => {
                println!("\n  {} ({})", parameter, parameter_evaluation.unit);
                if parameter_evaluation.used_fallback_weather {
                    println!("  (forecast built with synthetic fallback weather)");
                }
                for (point, assessment) in parameter_evaluation
                    .forecast
                    .iter()
                    .zip(&parameter_evaluation.assessments)
                {
                    println!(
                        "    {}  {:>10.4}  {} ({})",
                        point.date, point.value, assessment.label, assessment.severity
                    );
                }
                if let Some(narrative) = &parameter_evaluation.narrative {
                    println!("\n  Report:\n{}", indent(narrative, "    "));
                }
            }
            Err(err) => {
                println!("\n  {}: not available: {}", parameter, err);
            }
        }
    }
}

fn indent(text: &str, prefix: &str) -> String {
    text.lines()
        .map(|line| format!("{}{}", prefix, line))
        .collect::<Vec<_>>()
        .join("\n")
}
