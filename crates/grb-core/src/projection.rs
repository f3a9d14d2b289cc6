//! Reprojection between WGS84 longitude/latitude and a metric CRS.
//!
//! Buffers are only ever computed in the metric system; degrees are not a
//! length unit away from the equator.

use std::fmt;

use geo::{Coord, Geometry, MapCoords};
use proj4rs::proj::Proj;
use proj4rs::transform::transform;

use crate::error::{GrbError, Result};

/// Swiss LV95 (EPSG:2056), oblique Mercator on the Bessel ellipsoid.
pub const LV95: &str = "+proj=somerc +lat_0=46.9524055555556 +lon_0=7.43958333333333 \
+k_0=1 +x_0=2600000 +y_0=1200000 +ellps=bessel \
+towgs84=674.374,15.056,405.346,0,0,0,0 +units=m +no_defs";

/// WGS84 longitude/latitude (EPSG:4326), axis order x = lon, y = lat.
pub const WGS84: &str = "+proj=longlat +datum=WGS84 +no_defs";

/// A pair of transforms WGS84 <-> metric CRS.
pub struct MetricProjection {
    definition: String,
    geographic: Proj,
    metric: Proj,
}

impl MetricProjection {
    /// Build from a PROJ definition of the metric CRS.
    pub fn new(definition: &str) -> Result<Self> {
        let geographic = Proj::from_proj_string(WGS84)
            .map_err(|e| GrbError::Configuration(format!("invalid geographic CRS: {e}")))?;
        let metric = Proj::from_proj_string(definition).map_err(|e| {
            GrbError::Configuration(format!("invalid metric CRS '{definition}': {e}"))
        })?;
        Ok(Self {
            definition: definition.to_string(),
            geographic,
            metric,
        })
    }

    pub fn lv95() -> Result<Self> {
        Self::new(LV95)
    }

    pub fn definition(&self) -> &str {
        &self.definition
    }

    /// Geographic degrees to metric meters.
    pub fn to_metric(&self, geometry: &Geometry<f64>) -> Result<Geometry<f64>> {
        geometry.try_map_coords(|c: Coord<f64>| {
            let mut point = (c.x.to_radians(), c.y.to_radians(), 0.0);
            transform(&self.geographic, &self.metric, &mut point).map_err(|e| {
                GrbError::Configuration(format!(
                    "cannot project ({}, {}) to metric CRS: {e}",
                    c.x, c.y
                ))
            })?;
            Ok(Coord {
                x: point.0,
                y: point.1,
            })
        })
    }

    /// Metric meters back to geographic degrees.
    pub fn to_geographic(&self, geometry: &Geometry<f64>) -> Result<Geometry<f64>> {
        geometry.try_map_coords(|c: Coord<f64>| {
            let mut point = (c.x, c.y, 0.0);
            transform(&self.metric, &self.geographic, &mut point).map_err(|e| {
                GrbError::Configuration(format!(
                    "cannot project ({}, {}) back to WGS84: {e}",
                    c.x, c.y
                ))
            })?;
            Ok(Coord {
                x: point.0.to_degrees(),
                y: point.1.to_degrees(),
            })
        })
    }
}

impl fmt::Debug for MetricProjection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetricProjection")
            .field("definition", &self.definition)
            .finish()
    }
}
