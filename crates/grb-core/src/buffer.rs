//! Buffering of the flight geography.
//!
//! The input features are unioned in geographic coordinates, projected to a
//! metric CRS, grown by each layer radius, and projected back.

use geo::{Buffer, Geometry, GeometryCollection, MultiPolygon, Polygon};
use geojson::{Feature, FeatureCollection, JsonObject};
use serde_json::Value;

use crate::error::{GrbError, Result};
use crate::layers::BufferRequest;
use crate::projection::MetricProjection;

/// Union of every caller-supplied feature, in WGS84 degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseGeometry {
    geometry: Geometry<f64>,
    feature_count: usize,
}

impl BaseGeometry {
    /// Union the features of a GeoJSON collection.
    ///
    /// Polygonal parts are merged; points and lines are carried alongside
    /// and get merged by the buffer itself.
    pub fn from_features(collection: &FeatureCollection) -> Result<Self> {
        if collection.features.is_empty() {
            return Err(GrbError::EmptyGeometry);
        }

        let mut polygons = Vec::new();
        let mut others = Vec::new();
        for (idx, feature) in collection.features.iter().enumerate() {
            let geometry = feature.geometry.clone().ok_or_else(|| {
                GrbError::InvalidGeometry(format!("feature {idx} has no geometry"))
            })?;
            let geometry: Geometry<f64> = geometry
                .try_into()
                .map_err(|e: geojson::Error| GrbError::InvalidGeometry(format!("feature {idx}: {e}")))?;
            split_polygonal(geometry, &mut polygons, &mut others);
        }

        let merged = geo::unary_union(polygons.iter());
        if merged.0.is_empty() && others.is_empty() {
            return Err(GrbError::InvalidGeometry(
                "flight geography has no area, line or point".to_string(),
            ));
        }
        let geometry = if others.is_empty() {
            Geometry::MultiPolygon(merged)
        } else {
            if !merged.0.is_empty() {
                others.insert(0, Geometry::MultiPolygon(merged));
            }
            Geometry::GeometryCollection(GeometryCollection(others))
        };

        Ok(Self {
            geometry,
            feature_count: collection.features.len(),
        })
    }

    pub fn geometry(&self) -> &Geometry<f64> {
        &self.geometry
    }

    pub fn feature_count(&self) -> usize {
        self.feature_count
    }
}

fn split_polygonal(
    geometry: Geometry<f64>,
    polygons: &mut Vec<Polygon<f64>>,
    others: &mut Vec<Geometry<f64>>,
) {
    match geometry {
        Geometry::Polygon(p) => polygons.push(p),
        Geometry::MultiPolygon(mp) => polygons.extend(mp),
        Geometry::Rect(r) => polygons.push(r.to_polygon()),
        Geometry::Triangle(t) => polygons.push(t.to_polygon()),
        Geometry::GeometryCollection(gc) => {
            for g in gc {
                split_polygonal(g, polygons, others);
            }
        }
        other => others.push(other),
    }
}

/// Produces one styled feature collection per drawable buffer request.
pub struct BufferPipeline<'a> {
    projection: &'a MetricProjection,
}

impl<'a> BufferPipeline<'a> {
    pub fn new(projection: &'a MetricProjection) -> Self {
        Self { projection }
    }

    /// Buffer `base` once per request. The result is parallel to `requests`;
    /// requests with a non-positive radius yield `None`.
    pub fn run(
        &self,
        base: &BaseGeometry,
        requests: &[BufferRequest],
    ) -> Result<Vec<Option<FeatureCollection>>> {
        let metric = self.projection.to_metric(base.geometry())?;

        requests
            .iter()
            .map(|request| -> Result<Option<FeatureCollection>> {
                if !request.is_drawable() {
                    tracing::debug!(
                        layer = request.kind.key(),
                        radius_m = request.radius_m,
                        "skipping layer with non-positive radius"
                    );
                    return Ok(None);
                }
                let buffered = buffer_metric(&metric, request.radius_m);
                let geographic = self
                    .projection
                    .to_geographic(&Geometry::MultiPolygon(buffered))?;
                Ok(Some(styled_collection(&geographic, request)?))
            })
            .collect()
    }
}

/// Euclidean outward offset of a geometry already in meters.
pub fn buffer_metric(geometry: &Geometry<f64>, radius_m: f64) -> MultiPolygon<f64> {
    geometry.buffer(radius_m)
}

fn styled_collection(geometry: &Geometry<f64>, request: &BufferRequest) -> Result<FeatureCollection> {
    let style = serde_json::to_value(&request.style)
        .map_err(|e| GrbError::Configuration(format!("cannot encode layer style: {e}")))?;

    let mut properties = JsonObject::new();
    properties.insert("style".to_string(), style);
    properties.insert("name".to_string(), Value::from(request.name));
    properties.insert("radius_m".to_string(), Value::from(request.radius_m));

    let feature = Feature {
        bbox: None,
        geometry: Some(geojson::Geometry::new(geojson::Value::from(geometry))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    };

    Ok(FeatureCollection {
        bbox: None,
        features: vec![feature],
        foreign_members: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::LayerKind;
    use geo::{Area, Contains, CoordsIter, Point};
    use serde_json::json;

    fn collection(features: Value) -> FeatureCollection {
        serde_json::from_value(json!({
            "type": "FeatureCollection",
            "features": features,
        }))
        .unwrap()
    }

    fn square(lon: f64, lat: f64, size: f64) -> Value {
        json!({
            "type": "Feature",
            "properties": {},
            "geometry": {
                "type": "Polygon",
                "coordinates": [[
                    [lon, lat],
                    [lon + size, lat],
                    [lon + size, lat + size],
                    [lon, lat + size],
                    [lon, lat]
                ]]
            }
        })
    }

    fn request(kind: LayerKind, radius_m: f64) -> BufferRequest {
        BufferRequest {
            kind,
            radius_m,
            style: kind.style(),
            name: kind.display_name(),
        }
    }

    fn metric_area(projection: &MetricProjection, fc: &FeatureCollection) -> f64 {
        let geometry: Geometry<f64> = fc.features[0].geometry.clone().unwrap().try_into().unwrap();
        projection.to_metric(&geometry).unwrap().unsigned_area()
    }

    #[test]
    fn empty_collection_is_rejected() {
        let err = BaseGeometry::from_features(&collection(json!([]))).unwrap_err();
        assert!(matches!(err, GrbError::EmptyGeometry));
    }

    #[test]
    fn feature_without_geometry_is_rejected() {
        let fc = collection(json!([{ "type": "Feature", "properties": {}, "geometry": null }]));
        let err = BaseGeometry::from_features(&fc).unwrap_err();
        assert!(matches!(err, GrbError::InvalidGeometry(_)));
    }

    #[test]
    fn degenerate_polygon_alone_is_rejected() {
        let fc = collection(json!([{
            "type": "Feature", "properties": {},
            "geometry": { "type": "Polygon", "coordinates": [[
                [7.44, 46.945], [7.45, 46.945], [7.44, 46.945]
            ]]}
        }]));
        let err = BaseGeometry::from_features(&fc).unwrap_err();
        assert!(matches!(err, GrbError::InvalidGeometry(_)));
    }

    #[test]
    fn degenerate_polygon_beside_a_point_is_kept_as_the_point() {
        let fc = collection(json!([
            { "type": "Feature", "properties": {},
              "geometry": { "type": "Polygon", "coordinates": [[
                  [7.44, 46.945], [7.45, 46.945], [7.44, 46.945]
              ]]} },
            { "type": "Feature", "properties": {},
              "geometry": { "type": "Point", "coordinates": [7.45, 46.95] } }
        ]));
        let base = BaseGeometry::from_features(&fc).unwrap();
        assert!(matches!(base.geometry(), Geometry::GeometryCollection(gc) if gc.0.len() == 1));
    }

    #[test]
    fn overlapping_polygons_are_unioned() {
        let fc = collection(json!([square(8.54, 47.37, 0.01), square(8.545, 47.375, 0.01)]));
        let base = BaseGeometry::from_features(&fc).unwrap();
        assert_eq!(base.feature_count(), 2);
        let Geometry::MultiPolygon(mp) = base.geometry() else {
            panic!("expected a multipolygon");
        };
        assert_eq!(mp.0.len(), 1);
    }

    #[test]
    fn points_and_lines_are_kept_beside_polygons() {
        let fc = collection(json!([
            square(8.54, 47.37, 0.01),
            { "type": "Feature", "properties": {},
              "geometry": { "type": "Point", "coordinates": [8.60, 47.40] } }
        ]));
        let base = BaseGeometry::from_features(&fc).unwrap();
        assert!(matches!(base.geometry(), Geometry::GeometryCollection(gc) if gc.0.len() == 2));
    }

    #[test]
    fn point_buffers_to_a_disc_of_the_requested_radius() {
        let projection = MetricProjection::lv95().unwrap();
        let fc = collection(json!([{
            "type": "Feature", "properties": {},
            "geometry": { "type": "Point", "coordinates": [7.45, 46.95] }
        }]));
        let base = BaseGeometry::from_features(&fc).unwrap();
        let out = BufferPipeline::new(&projection)
            .run(&base, &[request(LayerKind::ContainmentArea, 100.0)])
            .unwrap();

        let area = metric_area(&projection, out[0].as_ref().unwrap());
        let disc = std::f64::consts::PI * 100.0 * 100.0;
        assert!((area - disc).abs() / disc < 0.02, "area {area}");
    }

    #[test]
    fn non_positive_radius_yields_none() {
        let projection = MetricProjection::lv95().unwrap();
        let base = BaseGeometry::from_features(&collection(json!([square(8.54, 47.37, 0.01)]))).unwrap();
        let out = BufferPipeline::new(&projection)
            .run(
                &base,
                &[
                    request(LayerKind::ContainmentArea, 0.0),
                    request(LayerKind::DetectionArea, -50.0),
                    request(LayerKind::GroundRiskBuffer, 25.0),
                ],
            )
            .unwrap();
        assert_eq!(out.len(), 3);
        assert!(out[0].is_none());
        assert!(out[1].is_none());
        assert!(out[2].is_some());
    }

    #[test]
    fn features_carry_style_and_name() {
        let projection = MetricProjection::lv95().unwrap();
        let base = BaseGeometry::from_features(&collection(json!([square(8.54, 47.37, 0.01)]))).unwrap();
        let out = BufferPipeline::new(&projection)
            .run(&base, &[request(LayerKind::GroundRiskBuffer, 40.0)])
            .unwrap();
        let fc = out[0].as_ref().unwrap();
        let props = fc.features[0].properties.as_ref().unwrap();
        assert_eq!(props["name"], "Grb (Ground Risk Buffer)");
        assert_eq!(props["style"]["fillColor"], "#DD3927");
        assert_eq!(props["radius_m"], 40.0);
    }

    #[test]
    fn larger_radius_contains_smaller_buffer() {
        let projection = MetricProjection::lv95().unwrap();
        let base = BaseGeometry::from_features(&collection(json!([
            square(8.54, 47.37, 0.01),
            square(8.57, 47.37, 0.005)
        ])))
        .unwrap();
        let metric = projection.to_metric(base.geometry()).unwrap();

        let inner = buffer_metric(&metric, 50.0);
        let outer = buffer_metric(&metric, 200.0);
        assert!(outer.unsigned_area() > inner.unsigned_area());
        for c in inner.coords_iter() {
            assert!(outer.contains(&Point::from(c)), "{c:?} escapes outer buffer");
        }
    }

    #[test]
    fn buffer_grows_square_by_radius() {
        let projection = MetricProjection::lv95().unwrap();
        let base = BaseGeometry::from_features(&collection(json!([square(8.54, 47.37, 0.01)]))).unwrap();
        let metric = projection.to_metric(base.geometry()).unwrap();
        let original = metric.unsigned_area();

        let grown = buffer_metric(&metric, 30.0).unsigned_area();
        // Minkowski sum with a disc: A + P * r + pi * r^2, perimeter about 4 * 900 m
        let perimeter_term = grown - original - std::f64::consts::PI * 900.0;
        assert!(perimeter_term > 30.0 * 3000.0 && perimeter_term < 30.0 * 4500.0);
    }
}
