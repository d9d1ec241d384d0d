/// Data ingestion for the water-quality forecasting service.
///
/// Submodules:
/// - `history` — reads per-station historical CSV files and indexes them by
///   normalized date.
/// - `weather` — fetches the short-range weather forecast used as the
///   model's exogenous input, with a synthetic fallback window.

pub mod history;
pub mod weather;
