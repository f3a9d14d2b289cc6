//! Flight parameters, selectors and calculator outputs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{GrbError, Result};

/// Aircraft class. Selects the formula branch in most distance terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AircraftType {
    Rotorcraft,
    #[serde(alias = "fixed-wing")]
    Fixedwing,
}

impl AircraftType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AircraftType::Rotorcraft => "rotorcraft",
            AircraftType::Fixedwing => "fixedwing",
        }
    }
}

impl fmt::Display for AircraftType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AircraftType {
    type Err = GrbError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "rotorcraft" => Ok(AircraftType::Rotorcraft),
            "fixedwing" | "fixed-wing" => Ok(AircraftType::Fixedwing),
            other => Err(GrbError::InvalidAircraftType(other.to_string())),
        }
    }
}

/// Visual or beyond-visual line of sight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationMode {
    #[serde(rename = "VLOS")]
    Vlos,
    #[serde(rename = "BVLOS")]
    Bvlos,
}

impl OperationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationMode::Vlos => "VLOS",
            OperationMode::Bvlos => "BVLOS",
        }
    }
}

impl fmt::Display for OperationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inputs for one calculation. All lengths in meters, speeds in m/s.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightParameters {
    /// Height of the flight geography above ground
    pub hfg: f64,
    pub operation_mode: OperationMode,
    pub aircraft_type: AircraftType,
    /// Parachute recovery system fitted
    pub prs_equipped: bool,
    /// Characteristic dimension (largest horizontal extent)
    pub cd: f64,
    /// Cruise speed
    pub v0: f64,
    /// Rate of climb
    pub roc: f64,
    /// Rate of descent
    pub rod: f64,
    /// Surface wind speed
    pub wind: f64,
}

impl FlightParameters {
    /// Check the caller's contract: every value finite, `roc`, `rod` and
    /// `wind` strictly positive.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("hfg", self.hfg),
            ("cd", self.cd),
            ("v0", self.v0),
        ] {
            if !value.is_finite() {
                return Err(GrbError::InvalidParameter { name, value });
            }
        }
        for (name, value) in [("roc", self.roc), ("rod", self.rod), ("wind", self.wind)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(GrbError::InvalidParameter { name, value });
            }
        }
        Ok(())
    }
}

/// The seven distances produced by the calculator, in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceSet {
    /// Containment volume horizontal radius
    pub scv: f64,
    /// Containment volume height
    pub hcv: f64,
    /// Ground risk buffer
    pub sgrb: f64,
    /// Horizontal detection/declaration distance
    pub ddeco: f64,
    /// Vertical detection/declaration distance, BVLOS only
    pub hdeco: Option<f64>,
    /// Adjacent area radius
    pub adjacent_area: f64,
    /// Assemblies horizon, fixed
    pub assemblies_horizon: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> FlightParameters {
        FlightParameters {
            hfg: 120.0,
            operation_mode: OperationMode::Vlos,
            aircraft_type: AircraftType::Rotorcraft,
            prs_equipped: false,
            cd: 1.2,
            v0: 15.0,
            roc: 3.0,
            rod: 3.0,
            wind: 5.0,
        }
    }

    #[test]
    fn aircraft_type_parses_both_fixed_wing_spellings() {
        assert_eq!("fixedwing".parse::<AircraftType>().unwrap(), AircraftType::Fixedwing);
        assert_eq!("fixed-wing".parse::<AircraftType>().unwrap(), AircraftType::Fixedwing);
        assert_eq!("rotorcraft".parse::<AircraftType>().unwrap(), AircraftType::Rotorcraft);
    }

    #[test]
    fn unknown_aircraft_type_is_rejected() {
        let err = "helicopter".parse::<AircraftType>().unwrap_err();
        assert!(matches!(err, GrbError::InvalidAircraftType(ref t) if t == "helicopter"));
    }

    #[test]
    fn operation_mode_uses_upper_case_on_the_wire() {
        let mode: OperationMode = serde_json::from_str("\"BVLOS\"").unwrap();
        assert_eq!(mode, OperationMode::Bvlos);
        assert_eq!(serde_json::to_string(&OperationMode::Vlos).unwrap(), "\"VLOS\"");
        assert!(serde_json::from_str::<OperationMode>("\"EVLOS\"").is_err());
    }

    #[test]
    fn validate_rejects_non_positive_rates() {
        assert!(params().validate().is_ok());

        let mut p = params();
        p.roc = 0.0;
        assert!(matches!(
            p.validate(),
            Err(GrbError::InvalidParameter { name: "roc", .. })
        ));

        let mut p = params();
        p.rod = -1.0;
        assert!(matches!(
            p.validate(),
            Err(GrbError::InvalidParameter { name: "rod", .. })
        ));

        let mut p = params();
        p.wind = f64::NAN;
        assert!(matches!(
            p.validate(),
            Err(GrbError::InvalidParameter { name: "wind", .. })
        ));
    }

    #[test]
    fn validate_allows_zero_speed_and_low_flight_geography() {
        let mut p = params();
        p.v0 = 0.0;
        p.hfg = 10.0;
        assert!(p.validate().is_ok());

        p.cd = f64::INFINITY;
        assert!(p.validate().is_err());
    }
}
