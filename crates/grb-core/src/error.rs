//! Error types for ground risk buffer calculations.

use thiserror::Error;

/// Errors raised by the calculator, the projection and the buffer pipeline.
///
/// Every variant is a deterministic consequence of the inputs or the
/// configuration; none of them is worth retrying with the same input.
#[derive(Debug, Error)]
pub enum GrbError {
    /// Unknown methodology version or unusable coordinate reference system.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Aircraft class outside {rotorcraft, fixedwing}.
    #[error("aircraft type '{0}' not in [rotorcraft, fixedwing]")]
    InvalidAircraftType(String),

    /// The flight geography carried no features.
    #[error("No features found in FG GeoJSON.")]
    EmptyGeometry,

    /// A feature had no geometry or one that could not be converted.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// A flight parameter broke its positivity/finiteness contract.
    #[error("invalid parameter {name}={value}: must be finite and > 0")]
    InvalidParameter { name: &'static str, value: f64 },
}

pub type Result<T> = std::result::Result<T, GrbError>;
