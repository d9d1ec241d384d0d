/// Tracked-parameter registry for the water-quality forecasting service.
///
/// Defines the canonical list of water-quality parameters the service
/// forecasts, along with their units, risk thresholds, evaluation strategy,
/// and pre-trained model artifact file names. This is the single source of
/// truth: classification and model lookup both read from here rather than
/// string-matching parameter names at call time.

/// Closed-interval risk thresholds for one parameter.
///
/// `ideal` and `acceptable` are inclusive ranges in the parameter's natural
/// unit. For lower-is-better parameters only the upper bounds participate in
/// classification; the lower bounds document the full range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskThresholds {
    pub ideal: (f64, f64),
    pub acceptable: (f64, f64),
}

/// How a parameter's value relates to risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evaluation {
    /// The value must sit inside the ideal interval; both too low and too
    /// high are degraded (pH, Dissolved Oxygen, Conductivity).
    BoundedIdeal,
    /// Lower is better; only the upper bounds matter (turbidity, nitrate,
    /// the coliform counts, BOD).
    LowerIsBetter,
}

/// Metadata for a single tracked water-quality parameter.
pub struct Parameter {
    /// Column name in the station data files and display name.
    pub name: &'static str,
    /// Natural unit of measurement.
    pub unit: &'static str,
    pub thresholds: RiskThresholds,
    pub evaluation: Evaluation,
    /// File name of the pre-trained forecasting artifact, resolved relative
    /// to the configured model directory.
    pub model_artifact: &'static str,
}

/// All tracked parameters.
///
/// Threshold values follow CPCB surface-water criteria as used by the
/// monitoring programme; they are configuration, preserved exactly, not
/// re-derived.
pub static PARAMETER_REGISTRY: &[Parameter] = &[
    Parameter {
        name: "Biochemical Oxygen Demand",
        unit: "mg/L",
        thresholds: RiskThresholds {
            ideal: (0.0, 3.0),
            acceptable: (3.0, 5.0),
        },
        evaluation: Evaluation::LowerIsBetter,
        model_artifact: "Biochemical_Oxygen_Demand_water_quality_lstm_model.keras",
    },
    Parameter {
        name: "Dissolved Oxygen",
        unit: "mg/L",
        thresholds: RiskThresholds {
            ideal: (6.0, 8.0),
            acceptable: (4.0, 10.0),
        },
        evaluation: Evaluation::BoundedIdeal,
        model_artifact: "Dissolved_Oxygen_water_quality_lstm_model.keras",
    },
    Parameter {
        name: "pH",
        unit: "pH units",
        thresholds: RiskThresholds {
            ideal: (6.5, 8.5),
            acceptable: (6.0, 9.0),
        },
        evaluation: Evaluation::BoundedIdeal,
        model_artifact: "pH_water_quality_lstm_model.keras",
    },
    Parameter {
        name: "Turbidity",
        unit: "NTU",
        thresholds: RiskThresholds {
            ideal: (0.0, 5.0),
            acceptable: (5.0, 10.0),
        },
        evaluation: Evaluation::LowerIsBetter,
        model_artifact: "Turbidity_water_quality_lstm_model.keras",
    },
    Parameter {
        name: "Nitrate",
        unit: "mg/L",
        thresholds: RiskThresholds {
            ideal: (0.0, 10.0),
            acceptable: (10.0, 20.0),
        },
        evaluation: Evaluation::LowerIsBetter,
        model_artifact: "Nitrate_water_quality_lstm_model.keras",
    },
    Parameter {
        name: "Fecal Coliform",
        unit: "MPN/100ml",
        thresholds: RiskThresholds {
            ideal: (0.0, 100.0),
            acceptable: (100.0, 500.0),
        },
        evaluation: Evaluation::LowerIsBetter,
        model_artifact: "Fecal_Coliform_water_quality_lstm_model.keras",
    },
    Parameter {
        name: "Fecal Streptococci",
        unit: "MPN/100ml",
        thresholds: RiskThresholds {
            ideal: (0.0, 100.0),
            acceptable: (100.0, 500.0),
        },
        evaluation: Evaluation::LowerIsBetter,
        model_artifact: "Fecal_Streptococci_water_quality_lstm_model.keras",
    },
    Parameter {
        name: "Total Coliform",
        unit: "MPN/100ml",
        thresholds: RiskThresholds {
            ideal: (0.0, 500.0),
            acceptable: (500.0, 5000.0),
        },
        evaluation: Evaluation::LowerIsBetter,
        model_artifact: "Total_Coliform_water_quality_lstm_model.keras",
    },
    Parameter {
        name: "Conductivity",
        unit: "µS/cm",
        thresholds: RiskThresholds {
            ideal: (150.0, 500.0),
            acceptable: (100.0, 800.0),
        },
        evaluation: Evaluation::BoundedIdeal,
        model_artifact: "Conductivity_water_quality_lstm_model.keras",
    },
];

/// Station-file columns that are not forecastable parameters: the date key
/// and the ancillary weather/label columns.
pub const NON_PARAMETER_COLUMNS: &[&str] = &["Date", "Temperature", "Rainfall", "Quality"];

/// Looks up a parameter by name. Returns `None` if not tracked.
pub fn find_parameter(name: &str) -> Option<&'static Parameter> {
    PARAMETER_REGISTRY.iter().find(|p| p.name == name)
}

/// Returns the names of all tracked parameters.
pub fn all_parameter_names() -> Vec<&'static str> {
    PARAMETER_REGISTRY.iter().map(|p| p.name).collect()
}

/// Returns `true` for columns that hold forecastable parameter values.
pub fn is_parameter_column(column: &str) -> bool {
    !NON_PARAMETER_COLUMNS.contains(&column)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_duplicate_parameter_names() {
        let mut seen = std::collections::HashSet::new();
        for parameter in PARAMETER_REGISTRY {
            assert!(
                seen.insert(parameter.name),
                "duplicate parameter '{}' in PARAMETER_REGISTRY",
                parameter.name
            );
        }
    }

    #[test]
    fn test_registry_contains_all_tracked_parameters() {
        let expected = [
            "Biochemical Oxygen Demand",
            "Dissolved Oxygen",
            "pH",
            "Turbidity",
            "Nitrate",
            "Fecal Coliform",
            "Fecal Streptococci",
            "Total Coliform",
            "Conductivity",
        ];
        for name in &expected {
            assert!(
                find_parameter(name).is_some(),
                "PARAMETER_REGISTRY missing '{}'",
                name
            );
        }
        assert_eq!(PARAMETER_REGISTRY.len(), expected.len());
    }

    #[test]
    fn test_ideal_sits_inside_acceptable_for_bounded_parameters() {
        // A bounded-ideal parameter whose ideal interval escapes its
        // acceptable interval could classify a value as simultaneously
        // ideal and poor.
        for parameter in PARAMETER_REGISTRY {
            if parameter.evaluation == Evaluation::BoundedIdeal {
                let t = &parameter.thresholds;
                assert!(
                    t.acceptable.0 <= t.ideal.0 && t.ideal.1 <= t.acceptable.1,
                    "ideal range of '{}' must sit inside its acceptable range",
                    parameter.name
                );
            }
        }
    }

    #[test]
    fn test_upper_bounds_ascend_for_lower_is_better_parameters() {
        for parameter in PARAMETER_REGISTRY {
            if parameter.evaluation == Evaluation::LowerIsBetter {
                let t = &parameter.thresholds;
                assert!(
                    t.ideal.1 <= t.acceptable.1,
                    "ideal upper bound of '{}' must not exceed acceptable upper bound",
                    parameter.name
                );
            }
        }
    }

    #[test]
    fn test_all_intervals_are_ordered() {
        for parameter in PARAMETER_REGISTRY {
            let t = &parameter.thresholds;
            assert!(t.ideal.0 <= t.ideal.1, "ideal interval of '{}' inverted", parameter.name);
            assert!(
                t.acceptable.0 <= t.acceptable.1,
                "acceptable interval of '{}' inverted",
                parameter.name
            );
        }
    }

    #[test]
    fn test_every_parameter_has_a_model_artifact() {
        for parameter in PARAMETER_REGISTRY {
            assert!(
                parameter.model_artifact.ends_with(".keras"),
                "artifact for '{}' should be a .keras file, got '{}'",
                parameter.name,
                parameter.model_artifact
            );
        }
    }

    #[test]
    fn test_find_parameter_returns_none_for_unknown_name() {
        assert!(find_parameter("Chlorophyll").is_none());
    }

    #[test]
    fn test_ancillary_columns_are_not_parameters() {
        assert!(!is_parameter_column("Date"));
        assert!(!is_parameter_column("Temperature"));
        assert!(!is_parameter_column("Rainfall"));
        assert!(!is_parameter_column("Quality"));
        assert!(is_parameter_column("Dissolved Oxygen"));
    }
}
