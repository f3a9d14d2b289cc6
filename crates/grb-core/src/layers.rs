//! Buffer layers derived from the calculator distances.
//!
//! The five radii are fixed sums of two distances each. The table lives in
//! [`LayerKind::radius`] so every rule can be checked on its own.

use serde::Serialize;

use crate::models::DistanceSet;

/// Leaflet path style attached to every feature of a layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerStyle {
    pub color: &'static str,
    pub weight: u32,
    pub opacity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash_array: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<&'static str>,
    pub fill_opacity: f64,
}

const FILLED_BLACK_OUTLINE: LayerStyle = LayerStyle {
    color: "#000000",
    weight: 1,
    opacity: 1.0,
    dash_array: None,
    fill_color: None,
    fill_opacity: 0.5,
};

const DASHED_OUTLINE: LayerStyle = LayerStyle {
    color: "#0000FF",
    weight: 3,
    opacity: 1.0,
    dash_array: Some("4,6"),
    fill_color: None,
    fill_opacity: 0.0,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    ContainmentArea,
    GroundRiskBuffer,
    AssembliesHorizon,
    AdjacentArea,
    DetectionArea,
}

impl LayerKind {
    /// Output order of the layers.
    pub const ALL: [LayerKind; 5] = [
        LayerKind::ContainmentArea,
        LayerKind::GroundRiskBuffer,
        LayerKind::AssembliesHorizon,
        LayerKind::AdjacentArea,
        LayerKind::DetectionArea,
    ];

    /// Key under `layers` in the response.
    pub fn key(&self) -> &'static str {
        match self {
            LayerKind::ContainmentArea => "ca",
            LayerKind::GroundRiskBuffer => "grb",
            LayerKind::AssembliesHorizon => "assemblies_horizon",
            LayerKind::AdjacentArea => "adjacent_area",
            LayerKind::DetectionArea => "detection_area",
        }
    }

    /// Label shown next to the polygon.
    pub fn display_name(&self) -> &'static str {
        match self {
            LayerKind::ContainmentArea => "Scv (Containment Area)",
            LayerKind::GroundRiskBuffer => "Grb (Ground Risk Buffer)",
            LayerKind::AssembliesHorizon => "Assemblies Horizon",
            LayerKind::AdjacentArea => "Adjacent Area",
            LayerKind::DetectionArea => "Detection Area",
        }
    }

    pub fn style(&self) -> LayerStyle {
        match self {
            LayerKind::ContainmentArea => LayerStyle {
                fill_color: Some("#DDB027"),
                ..FILLED_BLACK_OUTLINE
            },
            LayerKind::GroundRiskBuffer => LayerStyle {
                fill_color: Some("#DD3927"),
                ..FILLED_BLACK_OUTLINE
            },
            LayerKind::AssembliesHorizon => DASHED_OUTLINE,
            LayerKind::AdjacentArea => LayerStyle {
                color: "#FF0000",
                dash_array: Some("2,6"),
                ..DASHED_OUTLINE
            },
            LayerKind::DetectionArea => LayerStyle {
                color: "#00009B",
                ..DASHED_OUTLINE
            },
        }
    }

    /// Buffer radius in meters for this layer.
    pub fn radius(&self, d: &DistanceSet) -> f64 {
        match self {
            LayerKind::ContainmentArea => d.scv,
            LayerKind::GroundRiskBuffer => d.sgrb + d.scv,
            LayerKind::AssembliesHorizon => d.assemblies_horizon + d.scv,
            LayerKind::AdjacentArea => d.adjacent_area + d.sgrb,
            LayerKind::DetectionArea => d.ddeco + d.scv,
        }
    }
}

/// One buffer to draw around the flight geography.
#[derive(Debug, Clone, PartialEq)]
pub struct BufferRequest {
    pub kind: LayerKind,
    pub radius_m: f64,
    pub style: LayerStyle,
    pub name: &'static str,
}

impl BufferRequest {
    /// Non-positive radii produce no polygon.
    pub fn is_drawable(&self) -> bool {
        self.radius_m > 0.0
    }
}

/// Build the five buffer requests, in [`LayerKind::ALL`] order.
pub fn assemble(distances: &DistanceSet) -> Vec<BufferRequest> {
    LayerKind::ALL
        .iter()
        .map(|kind| BufferRequest {
            kind: *kind,
            radius_m: kind.radius(distances),
            style: kind.style(),
            name: kind.display_name(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn distances() -> DistanceSet {
        DistanceSet {
            scv: 10.0,
            hcv: 100.0,
            sgrb: 20.0,
            ddeco: 300.0,
            hdeco: None,
            adjacent_area: 5000.0,
            assemblies_horizon: 1000.0,
        }
    }

    #[test]
    fn radii_follow_the_addition_table() {
        let d = distances();
        assert_eq!(LayerKind::ContainmentArea.radius(&d), 10.0);
        assert_eq!(LayerKind::GroundRiskBuffer.radius(&d), 30.0);
        assert_eq!(LayerKind::AssembliesHorizon.radius(&d), 1010.0);
        assert_eq!(LayerKind::AdjacentArea.radius(&d), 5020.0);
        assert_eq!(LayerKind::DetectionArea.radius(&d), 310.0);
    }

    #[test]
    fn assemble_keeps_fixed_order_and_names() {
        let requests = assemble(&distances());
        let keys: Vec<_> = requests.iter().map(|r| r.kind.key()).collect();
        assert_eq!(
            keys,
            vec!["ca", "grb", "assemblies_horizon", "adjacent_area", "detection_area"]
        );
        assert_eq!(requests[1].name, "Grb (Ground Risk Buffer)");
        assert!(requests.iter().all(BufferRequest::is_drawable));
    }

    #[test]
    fn non_positive_radius_is_not_drawable() {
        let mut d = distances();
        d.ddeco = -400.0;
        let requests = assemble(&d);
        assert!(!requests[4].is_drawable());

        d.ddeco = -10.0;
        assert!(!assemble(&d)[4].is_drawable());
    }

    #[test]
    fn styles_serialize_with_leaflet_keys() {
        let ca = serde_json::to_value(LayerKind::ContainmentArea.style()).unwrap();
        assert_eq!(
            ca,
            json!({
                "color": "#000000",
                "weight": 1,
                "opacity": 1.0,
                "fillColor": "#DDB027",
                "fillOpacity": 0.5
            })
        );

        let aa = serde_json::to_value(LayerKind::AdjacentArea.style()).unwrap();
        assert_eq!(aa["color"], "#FF0000");
        assert_eq!(aa["dashArray"], "2,6");
        assert!(aa.get("fillColor").is_none());
    }
}
