//! Ground risk buffer engine for UAS operations (FOCA SORA guidance).
//!
//! Computes containment, ground risk, detection and adjacent-area distances
//! and turns them into buffer polygons around a flight geography.

pub mod buffer;
pub mod calculator;
pub mod constants;
pub mod error;
pub mod layers;
pub mod models;
pub mod projection;
pub mod service;

pub use buffer::{BaseGeometry, BufferPipeline};
pub use calculator::{GroundRiskBufferCalc, ASSEMBLIES_HORIZON_M};
pub use constants::{Constants, ConstantsTable, CURRENT, LATEST_VERSION};
pub use error::{GrbError, Result};
pub use layers::{assemble, BufferRequest, LayerKind, LayerStyle};
pub use models::{AircraftType, DistanceSet, FlightParameters, OperationMode};
pub use projection::{MetricProjection, LV95, WGS84};
pub use service::{run, GrbConfig, Layers, Meta, RunParams, RunRequest, RunResponse};
