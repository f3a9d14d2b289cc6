//! Ground risk buffer distance calculator.
//!
//! Each distance is a pure function of the inputs it names plus the
//! calculator's fixed configuration (constants row, aircraft class, PRS).

use crate::constants::{Constants, ConstantsTable};
use crate::error::Result;
use crate::models::{AircraftType, DistanceSet, FlightParameters, OperationMode};

/// Assemblies horizon radius [m]. Not derived from flight dynamics.
pub const ASSEMBLIES_HORIZON_M: f64 = 1000.0;

/// Parachute sink rate assumed by the PRS branch of the ground risk buffer [m/s].
const PRS_SINK_RATE: f64 = 5.0;

/// Height below which the detection terms go negative [m].
const DETECTION_REFERENCE_HEIGHT: f64 = 30.0;

/// Cap on the VLOS detection distance [m].
const VLOS_DETECTION_CAP: f64 = 5000.0;

const ADJACENT_AREA_FACTOR: f64 = 180.0;
const ADJACENT_AREA_MIN: f64 = 5000.0;
const ADJACENT_AREA_MAX: f64 = 35000.0;

#[derive(Debug, Clone)]
pub struct GroundRiskBufferCalc {
    version: String,
    constants: Constants,
    aircraft_type: AircraftType,
    prs_equipped: bool,
}

impl GroundRiskBufferCalc {
    /// Bind a calculator to one methodology version, aircraft class and PRS flag.
    pub fn new(
        table: &ConstantsTable,
        version: &str,
        aircraft_type: AircraftType,
        prs_equipped: bool,
    ) -> Result<Self> {
        let (version, constants) = table.resolve(version)?;
        Ok(Self {
            version: version.to_string(),
            constants,
            aircraft_type,
            prs_equipped,
        })
    }

    /// Same as [`GroundRiskBufferCalc::new`] but takes the aircraft class by name,
    /// failing with `InvalidAircraftType` for anything unrecognised.
    pub fn for_aircraft_name(
        table: &ConstantsTable,
        version: &str,
        aircraft_type: &str,
        prs_equipped: bool,
    ) -> Result<Self> {
        Self::new(table, version, aircraft_type.parse()?, prs_equipped)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Distance flown during the reaction time.
    pub fn reaction_distance(&self, v0: f64) -> f64 {
        self.constants.trt * v0
    }

    /// Radius of the contingency manoeuvre at the class's bank/pitch angle.
    pub fn containment_maneuver_radius(&self, v0: f64) -> f64 {
        let c = &self.constants;
        match self.aircraft_type {
            AircraftType::Rotorcraft => {
                0.5 * (v0.powi(2) / (c.g * c.roh_rotorcraft.to_radians().tan()))
            }
            AircraftType::Fixedwing => v0.powi(2) / (c.g * c.roh_fixedwing.to_radians().tan()),
        }
    }

    /// Height gained during the reaction time.
    pub fn horizontal_reaction_distance(&self, v0: f64, roc: f64) -> f64 {
        match self.aircraft_type {
            AircraftType::Rotorcraft => roc * self.constants.trt,
            AircraftType::Fixedwing => (2f64.sqrt() / 2.0) * v0 * self.constants.trt,
        }
    }

    /// Height gained during the contingency manoeuvre.
    pub fn containment_maneuver_height(&self, v0: f64) -> f64 {
        let factor = match self.aircraft_type {
            AircraftType::Rotorcraft => 0.5,
            AircraftType::Fixedwing => 0.3,
        };
        factor * (v0.powi(2) / self.constants.g)
    }

    /// Vertical extent of the containment volume.
    pub fn hcv(&self, v0: f64, hfg: f64, roc: f64) -> f64 {
        hfg + self.constants.hbaro
            + self.horizontal_reaction_distance(v0, roc)
            + self.containment_maneuver_height(v0)
    }

    /// Horizontal extent of the containment volume.
    pub fn scv(&self, v0: f64) -> f64 {
        let c = &self.constants;
        c.sgps + c.spos + c.smap + self.reaction_distance(v0) + self.containment_maneuver_radius(v0)
    }

    /// Ground risk buffer.
    ///
    /// PRS takes priority over the aircraft class. A rotorcraft without PRS
    /// uses the ballistic distance, never more than the 1:1 rule.
    pub fn sgrb(&self, v0: f64, wind: f64, cd: f64, hfg: f64, roc: f64) -> f64 {
        let hcv = self.hcv(v0, hfg, roc);
        if self.prs_equipped {
            return v0 * 2.0 + wind * (hcv / PRS_SINK_RATE);
        }
        let one_to_one = hcv + 0.5 * cd;
        match self.aircraft_type {
            AircraftType::Rotorcraft => {
                let ballistic = v0 * (2.0 * hcv / self.constants.g).sqrt() + 0.5 * cd;
                ballistic.min(one_to_one)
            }
            AircraftType::Fixedwing => one_to_one,
        }
    }

    /// Time available to detect and avoid traffic.
    ///
    /// Goes negative for `hfg` below 30 m; the result is not clamped.
    pub fn detection_time_window(&self, rod: f64, hfg: f64) -> f64 {
        self.constants.tdlt + self.constants.trt + (hfg - DETECTION_REFERENCE_HEIGHT) / rod
    }

    /// Horizontal detection/declaration distance.
    pub fn ddeco(&self, v0: f64, rod: f64, hfg: f64, mode: OperationMode, cd: f64) -> f64 {
        let c = &self.constants;
        match mode {
            OperationMode::Bvlos => self.detection_time_window(rod, hfg) * (c.vtr + v0),
            OperationMode::Vlos => {
                let alos = match self.aircraft_type {
                    AircraftType::Rotorcraft => 327.0 * cd + 20.0,
                    AircraftType::Fixedwing => 490.0 * cd + 30.0,
                };
                let teva = c.trt + (hfg - DETECTION_REFERENCE_HEIGHT) / rod;
                let deva = (c.vtr + v0) * teva;
                ((deva + alos) / 0.3).min(VLOS_DETECTION_CAP)
            }
        }
    }

    /// Vertical detection/declaration distance. Only meaningful for BVLOS.
    pub fn hdeco(&self, roc: f64, rod: f64, hfg: f64) -> f64 {
        (self.constants.rodtr + roc) * self.detection_time_window(rod, hfg)
    }

    /// Adjacent area radius, proportional to cruise speed within [5 km, 35 km].
    pub fn adjacent_area_radius(&self, v0: f64) -> f64 {
        (v0 * ADJACENT_AREA_FACTOR).clamp(ADJACENT_AREA_MIN, ADJACENT_AREA_MAX)
    }

    /// Evaluate every distance for one set of flight parameters.
    ///
    /// Aircraft class and PRS come from the calculator, not from `params`.
    pub fn distances(&self, params: &FlightParameters) -> DistanceSet {
        let p = params;
        let set = DistanceSet {
            scv: self.scv(p.v0),
            hcv: self.hcv(p.v0, p.hfg, p.roc),
            sgrb: self.sgrb(p.v0, p.wind, p.cd, p.hfg, p.roc),
            ddeco: self.ddeco(p.v0, p.rod, p.hfg, p.operation_mode, p.cd),
            hdeco: match p.operation_mode {
                OperationMode::Bvlos => Some(self.hdeco(p.roc, p.rod, p.hfg)),
                OperationMode::Vlos => None,
            },
            adjacent_area: self.adjacent_area_radius(p.v0),
            assemblies_horizon: ASSEMBLIES_HORIZON_M,
        };
        tracing::debug!(
            version = %self.version,
            aircraft = %self.aircraft_type,
            prs = self.prs_equipped,
            mode = %p.operation_mode,
            scv = set.scv,
            hcv = set.hcv,
            sgrb = set.sgrb,
            ddeco = set.ddeco,
            "computed ground risk distances"
        );
        set
    }
}
