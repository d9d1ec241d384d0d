//! Water-quality risk tier assignment.
//!
//! Classification is a three-level step function over the per-parameter
//! threshold table, not a continuous distance-to-threshold score: each tier
//! carries a fixed severity. Interval edges are inclusive on both sides.

use crate::parameters::{find_parameter, Evaluation, RiskThresholds};

/// Risk tiers, in ascending order of severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RiskTier {
    Low,
    Moderate,
    High,
}

impl RiskTier {
    /// Fixed severity score for the tier.
    pub fn severity(self) -> u8 {
        match self {
            RiskTier::Low => 30,
            RiskTier::Moderate => 60,
            RiskTier::High => 90,
        }
    }

    /// User-facing quality label.
    pub fn label(self) -> &'static str {
        match self {
            RiskTier::Low => "Good",
            RiskTier::Moderate => "Moderate",
            RiskTier::High => "Bad",
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskTier::Low => write!(f, "Low"),
            RiskTier::Moderate => write!(f, "Moderate"),
            RiskTier::High => write!(f, "High"),
        }
    }
}

/// The classification of one forecast value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskAssessment {
    pub tier: RiskTier,
    pub severity: u8,
    pub label: &'static str,
    /// Set when the parameter is not in the registry. The default table
    /// degenerates almost every value to `Low`; integrators should display
    /// "unclassified" rather than trust the tier.
    pub unclassified: bool,
}

/// Default table for parameters missing from the registry. Anything up to
/// 100 classifies `Low`, so the tier carries no real signal.
const UNCLASSIFIED_THRESHOLDS: RiskThresholds = RiskThresholds {
    ideal: (0.0, 100.0),
    acceptable: (0.0, 100.0),
};

/// Classifies a physical-unit value for the named parameter.
///
/// Bounded-ideal parameters (pH, Dissolved Oxygen, Conductivity) require the
/// value inside the closed ideal interval for `Low` and inside the closed
/// acceptable interval for `Moderate`; everything else is `High`. All other
/// parameters compare only against the upper bounds: lower is better.
pub fn classify(value: f64, parameter_name: &str) -> RiskAssessment {
    match find_parameter(parameter_name) {
        Some(parameter) => {
            let tier = tier_for(value, &parameter.thresholds, parameter.evaluation);
            RiskAssessment {
                tier,
                severity: tier.severity(),
                label: tier.label(),
                unclassified: false,
            }
        }
        None => {
            let tier = tier_for(value, &UNCLASSIFIED_THRESHOLDS, Evaluation::LowerIsBetter);
            RiskAssessment {
                tier,
                severity: tier.severity(),
                label: tier.label(),
                unclassified: true,
            }
        }
    }
}

fn tier_for(value: f64, thresholds: &RiskThresholds, evaluation: Evaluation) -> RiskTier {
    match evaluation {
        Evaluation::BoundedIdeal => {
            if thresholds.ideal.0 <= value && value <= thresholds.ideal.1 {
                RiskTier::Low
            } else if thresholds.acceptable.0 <= value && value <= thresholds.acceptable.1 {
                RiskTier::Moderate
            } else {
                RiskTier::High
            }
        }
        Evaluation::LowerIsBetter => {
            if value <= thresholds.ideal.1 {
                RiskTier::Low
            } else if value <= thresholds.acceptable.1 {
                RiskTier::Moderate
            } else {
                RiskTier::High
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn tier(value: f64, parameter: &str) -> RiskTier {
        classify(value, parameter).tier
    }

    // --- Bounded-ideal parameters ------------------------------------------

    #[test]
    fn test_ph_inside_ideal_is_low() {
        assert_eq!(tier(7.0, "pH"), RiskTier::Low);
    }

    #[test]
    fn test_ph_between_ideal_and_acceptable_is_moderate() {
        assert_eq!(tier(6.2, "pH"), RiskTier::Moderate);
        assert_eq!(tier(8.8, "pH"), RiskTier::Moderate);
    }

    #[test]
    fn test_ph_outside_acceptable_is_high() {
        assert_eq!(tier(5.5, "pH"), RiskTier::High);
        assert_eq!(tier(9.5, "pH"), RiskTier::High);
    }

    #[test]
    fn test_dissolved_oxygen_below_ideal_lower_bound_is_not_low() {
        // 4.05 mg/L sits below the ideal [6, 8] floor but inside the
        // acceptable [4, 10] band. A classifier that only checked upper
        // bounds would call this Low.
        assert_eq!(tier(4.05, "Dissolved Oxygen"), RiskTier::Moderate);
    }

    #[test]
    fn test_dissolved_oxygen_below_acceptable_floor_is_high() {
        assert_eq!(tier(3.5, "Dissolved Oxygen"), RiskTier::High);
    }

    #[test]
    fn test_dissolved_oxygen_supersaturation_is_high() {
        assert_eq!(tier(11.0, "Dissolved Oxygen"), RiskTier::High);
    }

    #[test]
    fn test_conductivity_below_ideal_floor_is_moderate() {
        // 120 µS/cm is under the ideal floor of 150 but above the
        // acceptable floor of 100.
        assert_eq!(tier(120.0, "Conductivity"), RiskTier::Moderate);
        assert_eq!(tier(300.0, "Conductivity"), RiskTier::Low);
        assert_eq!(tier(900.0, "Conductivity"), RiskTier::High);
    }

    // --- Lower-is-better parameters ----------------------------------------

    #[test]
    fn test_turbidity_tiers() {
        assert_eq!(tier(2.0, "Turbidity"), RiskTier::Low);
        assert_eq!(tier(7.0, "Turbidity"), RiskTier::Moderate);
        assert_eq!(tier(15.0, "Turbidity"), RiskTier::High);
    }

    #[test]
    fn test_total_coliform_tiers() {
        assert_eq!(tier(200.0, "Total Coliform"), RiskTier::Low);
        assert_eq!(tier(2000.0, "Total Coliform"), RiskTier::Moderate);
        assert_eq!(tier(10_000.0, "Total Coliform"), RiskTier::High);
    }

    #[test]
    fn test_biochemical_oxygen_demand_tiers() {
        assert_eq!(tier(1.0, "Biochemical Oxygen Demand"), RiskTier::Low);
        assert_eq!(tier(4.0, "Biochemical Oxygen Demand"), RiskTier::Moderate);
        assert_eq!(tier(8.0, "Biochemical Oxygen Demand"), RiskTier::High);
    }

    // --- Boundary values (closed-interval semantics) -----------------------

    #[test]
    fn test_boundary_values_are_inclusive() {
        // Exactly at the ideal edges.
        assert_eq!(tier(6.5, "pH"), RiskTier::Low);
        assert_eq!(tier(8.5, "pH"), RiskTier::Low);
        assert_eq!(tier(6.0, "Dissolved Oxygen"), RiskTier::Low);
        assert_eq!(tier(8.0, "Dissolved Oxygen"), RiskTier::Low);
        // Exactly at the acceptable edges.
        assert_eq!(tier(6.0, "pH"), RiskTier::Moderate);
        assert_eq!(tier(9.0, "pH"), RiskTier::Moderate);
        // Lower-is-better edges.
        assert_eq!(tier(5.0, "Turbidity"), RiskTier::Low);
        assert_eq!(tier(10.0, "Turbidity"), RiskTier::Moderate);
        assert_eq!(tier(20.0, "Nitrate"), RiskTier::Moderate);
    }

    // --- Severity scores and labels ----------------------------------------

    #[test]
    fn test_fixed_severity_scores() {
        assert_eq!(classify(7.0, "pH").severity, 30);
        assert_eq!(classify(6.2, "pH").severity, 60);
        assert_eq!(classify(5.0, "pH").severity, 90);
    }

    #[test]
    fn test_labels_match_tiers() {
        assert_eq!(classify(7.0, "pH").label, "Good");
        assert_eq!(classify(6.2, "pH").label, "Moderate");
        assert_eq!(classify(5.0, "pH").label, "Bad");
    }

    #[test]
    fn test_every_value_gets_exactly_one_tier() {
        for parameter in crate::parameters::all_parameter_names() {
            for value in [-5.0, 0.0, 3.0, 6.5, 9.0, 50.0, 750.0, 1e6] {
                let assessment = classify(value, parameter);
                assert_eq!(assessment.severity, assessment.tier.severity());
                assert!(!assessment.unclassified);
            }
        }
    }

    // --- Unknown parameters ------------------------------------------------

    #[test]
    fn test_unknown_parameter_degenerates_to_low_but_is_flagged() {
        let assessment = classify(42.0, "Chlorophyll");
        assert_eq!(assessment.tier, RiskTier::Low);
        assert!(
            assessment.unclassified,
            "unknown parameters must be flagged so the tier is not trusted"
        );
    }

    #[test]
    fn test_unknown_parameter_outside_default_table_is_high() {
        let assessment = classify(250.0, "Chlorophyll");
        assert_eq!(assessment.tier, RiskTier::High);
        assert!(assessment.unclassified);
    }

    #[test]
    fn test_tier_ordering() {
        assert!(RiskTier::Low < RiskTier::Moderate);
        assert!(RiskTier::Moderate < RiskTier::High);
    }
}
