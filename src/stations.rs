/// Station registry for the Ganga basin water-quality forecasting service.
///
/// Defines the canonical list of monitoring stations the service covers,
/// along with their coordinates, historical data files, and overall
/// water-quality classification. This is the single source of truth for
/// station identity; all other modules should reference stations from here
/// rather than hardcoding names or file paths.

/// Overall water-quality classification for a station, assessed from the
/// monitoring programme's long-term record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityClass {
    Good,
    Poor,
    Dangerous,
}

impl QualityClass {
    /// One-line description shown alongside the classification.
    pub fn description(self) -> &'static str {
        match self {
            QualityClass::Good => "Water quality is good and suitable for most uses",
            QualityClass::Poor => "Water quality is concerning, caution advised",
            QualityClass::Dangerous => {
                "Water quality is severely degraded, unsafe for most uses"
            }
        }
    }
}

/// Metadata for a single monitoring station.
pub struct Station {
    /// Official monitoring-programme station name.
    pub name: &'static str,
    /// Historical data file, resolved relative to the configured data
    /// directory.
    pub data_file: &'static str,
    /// WGS84 latitude.
    pub latitude: f64,
    /// WGS84 longitude.
    pub longitude: f64,
    /// Long-term overall classification of the station's water quality.
    pub quality_class: QualityClass,
}

/// All monitored stations, ordered downstream along the river from the
/// Himalayan confluence to the delta.
pub static STATION_REGISTRY: &[Station] = &[
    Station {
        name: "Alaknanda a/c with Bhagirathi at Devprayag",
        data_file: "devprayag.csv",
        latitude: 30.140504,
        longitude: 78.597358,
        quality_class: QualityClass::Good,
    },
    Station {
        name: "Ganga at Haridwar D/S, Balkumari Mandir, Ajeetpur",
        data_file: "haridwar.csv",
        latitude: 29.945254,
        longitude: 78.164675,
        quality_class: QualityClass::Good,
    },
    Station {
        name: "Ganga at Kannauj U/S (Rajghat)",
        data_file: "kannauj.csv",
        latitude: 27.010953,
        longitude: 79.986442,
        quality_class: QualityClass::Poor,
    },
    Station {
        name: "Ganga at Allahabad D/S (Sangam)",
        data_file: "allahabad.csv",
        latitude: 25.419206,
        longitude: 81.900522,
        quality_class: QualityClass::Dangerous,
    },
    Station {
        name: "Ganga at Trighat (Ghazipur)",
        data_file: "ghazipur.csv",
        latitude: 25.578175,
        longitude: 83.609594,
        quality_class: QualityClass::Dangerous,
    },
    Station {
        name: "Ganga at Gulabi Ghat, Patna",
        data_file: "patna.csv",
        latitude: 25.620356,
        longitude: 85.179995,
        quality_class: QualityClass::Poor,
    },
    Station {
        name: "Ganga at Kolkata, West Bengal",
        data_file: "kolkata.csv",
        latitude: 22.632682,
        longitude: 88.355369,
        quality_class: QualityClass::Poor,
    },
];

/// Returns the names of all monitored stations.
pub fn all_station_names() -> Vec<&'static str> {
    STATION_REGISTRY.iter().map(|s| s.name).collect()
}

/// Looks up a station by name. Returns `None` if not found.
pub fn find_station(name: &str) -> Option<&'static Station> {
    STATION_REGISTRY.iter().find(|s| s.name == name)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
