//! Versioned methodology constants.
//!
//! Values follow FOCA "How to apply SORA", Part 1 (page references kept on
//! the fields where the guidance gives them).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{GrbError, Result};

/// Version key that resolves to whatever the table marks as current.
pub const CURRENT: &str = "current";

/// Methodology version shipped with this crate.
pub const LATEST_VERSION: &str = "3.3.0";

/// Named constants for one methodology version.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Constants {
    /// Reaction time [s] (p. 33)
    pub trt: f64,
    /// Gravitational acceleration [m/s^2] (p. 15)
    pub g: f64,
    /// GNSS accuracy [m] (p. 33)
    pub sgps: f64,
    /// Position hold error [m] (p. 33)
    pub spos: f64,
    /// Path definition / map error [m] (p. 33)
    pub smap: f64,
    /// Altitude measurement error for GPS-based measurement [m]
    pub hbaro: f64,
    /// Rotorcraft pitch angle [deg]
    pub roh_rotorcraft: f64,
    /// Fixed-wing roll angle [deg]
    pub roh_fixedwing: f64,
    /// Latency of the detection method, e.g. web-based traffic feeds [s]
    pub tdlt: f64,
    /// Expected speed of traffic below 120 m AGL [m/s] (50 kts GS)
    #[serde(rename = "Vtr")]
    pub vtr: f64,
    /// Expected rate of descent of traffic below 120 m AGL [m/s] (500 ft/min)
    #[serde(rename = "RODtr")]
    pub rodtr: f64,
}

impl Constants {
    /// Methodology 3.3.0: adds the parachute branch to the ground risk buffer.
    pub const V3_3_0: Constants = Constants {
        trt: 1.0,
        g: 9.81,
        sgps: 3.0,
        spos: 3.0,
        smap: 1.0,
        hbaro: 4.0,
        roh_rotorcraft: 45.0,
        roh_fixedwing: 30.0,
        tdlt: 15.0,
        vtr: 25.0,
        rodtr: 3.0,
    };
}

/// Read-only table of constants keyed by methodology version.
#[derive(Debug, Clone)]
pub struct ConstantsTable {
    rows: BTreeMap<String, Constants>,
    current: String,
}

impl ConstantsTable {
    /// Table holding every version this crate knows, with the latest as current.
    pub fn builtin() -> Self {
        let mut rows = BTreeMap::new();
        rows.insert(LATEST_VERSION.to_string(), Constants::V3_3_0);
        Self {
            rows,
            current: LATEST_VERSION.to_string(),
        }
    }

    /// Build a table from explicit rows. `current` must be one of them.
    pub fn new(
        rows: impl IntoIterator<Item = (String, Constants)>,
        current: impl Into<String>,
    ) -> Result<Self> {
        let rows: BTreeMap<String, Constants> = rows.into_iter().collect();
        let current = current.into();
        if !rows.contains_key(&current) {
            return Err(GrbError::Configuration(format!(
                "current methodology version '{current}' has no constants row"
            )));
        }
        Ok(Self { rows, current })
    }

    pub fn current_version(&self) -> &str {
        &self.current
    }

    pub fn versions(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }

    /// Resolve a version key (or [`CURRENT`]) to its concrete name and row.
    pub fn resolve(&self, version: &str) -> Result<(&str, Constants)> {
        let key = if version == CURRENT {
            self.current.as_str()
        } else {
            version
        };
        self.rows
            .get_key_value(key)
            .map(|(name, row)| (name.as_str(), *row))
            .ok_or_else(|| {
                GrbError::Configuration(format!("unknown methodology version '{version}'"))
            })
    }
}

impl Default for ConstantsTable {
    fn default() -> Self {
        Self::builtin()
    }
}
