/// Risk classification of forecast values.
///
/// Submodules:
/// - `thresholds` — maps a physical value and parameter identity to a
///   discrete risk tier with a fixed severity score.

pub mod thresholds;

pub use thresholds::{classify, RiskAssessment, RiskTier};
