/// Short-range weather forecast client.
///
/// Retrieves the 5-day/3-hour forecast from the OpenWeatherMap API and
/// collapses it into one entry per calendar date: daily temperature is the
/// maximum over the day's 3-hour slots, daily rainfall the sum of the slot
/// accumulations.
///
/// The forecasting model requires exactly [`FORECAST_WINDOW`] days, so the
/// collapsed sequence is coerced: short sequences are extended by repeating
/// the last entry with dates incremented a day at a time, long ones are
/// truncated. On any fetch or parse failure the service fails open with a
/// deterministic synthetic window, flagged so the display layer can warn
/// that the data is synthetic.
///
/// API documentation: https://openweathermap.org/forecast5

use chrono::{DateTime, Duration, NaiveDate};
use serde::Deserialize;

use crate::logging::{self, DataSource};
use crate::model::{WeatherDay, WeatherSource, WeatherWindow, FORECAST_WINDOW};

const OWM_BASE_URL: &str = "https://api.openweathermap.org/data/2.5/forecast";

/// Temperature assumed by the synthetic fallback window, in °C.
pub const FALLBACK_TEMPERATURE_C: f64 = 25.0;

/// Rainfall assumed by the synthetic fallback window, in mm.
pub const FALLBACK_RAINFALL_MM: f64 = 0.0;

// ============================================================================
// API Response Structures
// ============================================================================

/// 5-day/3-hour forecast response.
#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub list: Vec<ForecastSlot>,
}

/// One 3-hour forecast slot.
#[derive(Debug, Deserialize)]
pub struct ForecastSlot {
    /// Unix timestamp of the slot start, UTC.
    pub dt: i64,
    pub main: SlotMain,
    pub rain: Option<SlotRain>,
}

#[derive(Debug, Deserialize)]
pub struct SlotMain {
    pub temp: f64,
}

#[derive(Debug, Deserialize)]
pub struct SlotRain {
    #[serde(rename = "3h")]
    pub three_hour_mm: Option<f64>,
}

// ============================================================================
// Aggregation
// ============================================================================

/// Collapses 3-hour slots into daily entries from `start_date` forward.
///
/// Slots before `start_date` are discarded. Each retained date gets the
/// maximum slot temperature and the summed slot rainfall. Output is ordered
/// by date.
pub fn group_daily(response: &ForecastResponse, start_date: NaiveDate) -> Vec<WeatherDay> {
    let mut days: Vec<WeatherDay> = Vec::new();
    for slot in &response.list {
        let Some(timestamp) = DateTime::from_timestamp(slot.dt, 0) else {
            continue;
        };
        let date = timestamp.date_naive();
        if date < start_date {
            continue;
        }
        let rainfall = slot
            .rain
            .as_ref()
            .and_then(|r| r.three_hour_mm)
            .unwrap_or(0.0);

        match days.iter_mut().find(|d| d.date == date) {
            Some(day) => {
                day.temperature_c = day.temperature_c.max(slot.main.temp);
                day.rainfall_mm += rainfall;
            }
            None => days.push(WeatherDay {
                date,
                temperature_c: slot.main.temp,
                rainfall_mm: rainfall,
            }),
        }
    }
    days.sort_by_key(|d| d.date);
    days
}

/// Coerces a daily sequence to exactly [`FORECAST_WINDOW`] entries.
///
/// Shorter sequences are extended by repeating the last entry with the date
/// advanced one day per copy; longer ones keep only the first five. Returns
/// `None` for an empty input, since there is nothing to repeat.
pub fn coerce_window(mut days: Vec<WeatherDay>) -> Option<Vec<WeatherDay>> {
    if days.is_empty() {
        return None;
    }
    while days.len() < FORECAST_WINDOW {
        let last = days[days.len() - 1].clone();
        days.push(WeatherDay {
            date: last.date + Duration::days(1),
            temperature_c: last.temperature_c,
            rainfall_mm: last.rainfall_mm,
        });
    }
    days.truncate(FORECAST_WINDOW);
    Some(days)
}

/// The deterministic synthetic window substituted on fetch failure: flat
/// 25 °C and 0 mm for the five calendar days after `start_date`.
pub fn synthetic_window(start_date: NaiveDate) -> WeatherWindow {
    let days = (1..=FORECAST_WINDOW as i64)
        .map(|i| WeatherDay {
            date: start_date + Duration::days(i),
            temperature_c: FALLBACK_TEMPERATURE_C,
            rainfall_mm: FALLBACK_RAINFALL_MM,
        })
        .collect();
    WeatherWindow {
        days,
        source: WeatherSource::Fallback,
    }
}

// ============================================================================
// API Client
// ============================================================================

/// Fetches and collapses the forecast for a coordinate pair.
///
/// Errors here are recoverable: callers go through [`forecast_window`],
/// which substitutes the synthetic default.
pub fn fetch_forecast(
    client: &reqwest::blocking::Client,
    latitude: f64,
    longitude: f64,
    api_key: &str,
    start_date: NaiveDate,
) -> Result<Vec<WeatherDay>, Box<dyn std::error::Error>> {
    let url = format!(
        "{}?lat={}&lon={}&appid={}&units=metric",
        OWM_BASE_URL, latitude, longitude, api_key
    );

    let response = client.get(&url).send()?;
    if !response.status().is_success() {
        return Err(format!("Weather API error: {}", response.status()).into());
    }

    let forecast: ForecastResponse = response.json()?;
    Ok(group_daily(&forecast, start_date))
}

/// Produces the exogenous weather window for a station, failing open.
///
/// On success the window is the coerced API forecast; on any failure it is
/// the synthetic default, and the failure is logged. The window's `source`
/// records which path was taken.
pub fn forecast_window(
    client: &reqwest::blocking::Client,
    latitude: f64,
    longitude: f64,
    api_key: &str,
    start_date: NaiveDate,
) -> WeatherWindow {
    match fetch_forecast(client, latitude, longitude, api_key, start_date) {
        Ok(days) => match coerce_window(days) {
            Some(days) => WeatherWindow {
                days,
                source: WeatherSource::Api,
            },
            None => {
                logging::warn(
                    DataSource::Weather,
                    None,
                    "Forecast response held no usable days; using synthetic window",
                );
                synthetic_window(start_date)
            }
        },
        Err(err) => {
            logging::log_weather_failure("forecast fetch", err.as_ref());
            synthetic_window(start_date)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
