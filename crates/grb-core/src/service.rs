//! One ground risk buffer run: distances, layer radii and buffer polygons.

use geojson::FeatureCollection;
use serde::{Deserialize, Serialize};

use crate::buffer::{BaseGeometry, BufferPipeline};
use crate::calculator::GroundRiskBufferCalc;
use crate::constants::{ConstantsTable, CURRENT};
use crate::error::Result;
use crate::layers::{self, LayerKind};
use crate::models::{AircraftType, DistanceSet, FlightParameters, OperationMode};
use crate::projection::{MetricProjection, LV95};

/// Engine settings shared by every run.
#[derive(Debug, Clone)]
pub struct GrbConfig {
    pub constants: ConstantsTable,
    /// Methodology version key, `"current"` for the latest row
    pub methodology_version: String,
    /// PROJ definition of the metric CRS used for buffering
    pub metric_crs: String,
}

impl Default for GrbConfig {
    fn default() -> Self {
        Self {
            constants: ConstantsTable::builtin(),
            methodology_version: CURRENT.to_string(),
            metric_crs: LV95.to_string(),
        }
    }
}

impl GrbConfig {
    /// Fail early on an unknown version or an unusable CRS.
    pub fn check(&self) -> Result<()> {
        self.constants.resolve(&self.methodology_version)?;
        MetricProjection::new(&self.metric_crs)?;
        Ok(())
    }
}

/// Flight parameters as sent by the map client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunParams {
    /// Height of the flight geography [m AGL]
    pub hfg: f64,
    pub op_type: OperationMode,
    /// "rotorcraft" | "fixedwing" | "fixed-wing"
    pub aircraft_type: String,
    pub prs_equipped: bool,
    /// Characteristic dimension [m]
    pub cd: f64,
    /// Flight speed [m/s]
    pub v0: f64,
    /// Rate of climb [m/s], > 0
    pub roc: f64,
    /// Rate of descent [m/s], > 0
    pub rod: f64,
    /// Wind speed [m/s], > 0
    pub wind: f64,
}

impl RunParams {
    pub fn to_flight_parameters(&self) -> Result<FlightParameters> {
        let aircraft_type: AircraftType = self.aircraft_type.parse()?;
        Ok(FlightParameters {
            hfg: self.hfg,
            operation_mode: self.op_type,
            aircraft_type,
            prs_equipped: self.prs_equipped,
            cd: self.cd,
            v0: self.v0,
            roc: self.roc,
            rod: self.rod,
            wind: self.wind,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRequest {
    /// Flight geography drawn by the operator
    pub fg: FeatureCollection,
    pub params: RunParams,
}

#[derive(Debug, Clone, Serialize)]
pub struct Meta {
    pub scv_m: f64,
    pub hcv_m: f64,
    pub grb_m: f64,
    pub ah_m: f64,
    pub sd_m: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hd_m: Option<f64>,
    pub aa_m: f64,
    pub version: String,
    pub inputs: RunParams,
}

impl Meta {
    fn new(distances: &DistanceSet, version: &str, inputs: &RunParams) -> Self {
        Self {
            scv_m: distances.scv,
            hcv_m: distances.hcv,
            grb_m: distances.sgrb,
            ah_m: distances.assemblies_horizon,
            sd_m: distances.ddeco,
            hd_m: distances.hdeco,
            aa_m: distances.adjacent_area,
            version: version.to_string(),
            inputs: inputs.clone(),
        }
    }
}

/// The five buffer layers. Skipped layers serialize as `null`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Layers {
    pub ca: Option<FeatureCollection>,
    pub grb: Option<FeatureCollection>,
    pub assemblies_horizon: Option<FeatureCollection>,
    pub adjacent_area: Option<FeatureCollection>,
    pub detection_area: Option<FeatureCollection>,
}

impl Layers {
    pub fn get(&self, kind: LayerKind) -> Option<&FeatureCollection> {
        self.slot(kind).as_ref()
    }

    fn set(&mut self, kind: LayerKind, layer: Option<FeatureCollection>) {
        *self.slot_mut(kind) = layer;
    }

    fn slot(&self, kind: LayerKind) -> &Option<FeatureCollection> {
        match kind {
            LayerKind::ContainmentArea => &self.ca,
            LayerKind::GroundRiskBuffer => &self.grb,
            LayerKind::AssembliesHorizon => &self.assemblies_horizon,
            LayerKind::AdjacentArea => &self.adjacent_area,
            LayerKind::DetectionArea => &self.detection_area,
        }
    }

    fn slot_mut(&mut self, kind: LayerKind) -> &mut Option<FeatureCollection> {
        match kind {
            LayerKind::ContainmentArea => &mut self.ca,
            LayerKind::GroundRiskBuffer => &mut self.grb,
            LayerKind::AssembliesHorizon => &mut self.assemblies_horizon,
            LayerKind::AdjacentArea => &mut self.adjacent_area,
            LayerKind::DetectionArea => &mut self.detection_area,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunResponse {
    pub meta: Meta,
    pub layers: Layers,
}

/// Compute distances and buffer layers for one request.
///
/// Input errors (aircraft type, parameters, empty geometry) are reported
/// before any projection work starts.
pub fn run(request: &RunRequest, config: &GrbConfig) -> Result<RunResponse> {
    let params = request.params.to_flight_parameters()?;
    params.validate()?;

    let calc = GroundRiskBufferCalc::new(
        &config.constants,
        &config.methodology_version,
        params.aircraft_type,
        params.prs_equipped,
    )?;

    let base = BaseGeometry::from_features(&request.fg)?;
    let distances = calc.distances(&params);
    let requests = layers::assemble(&distances);

    let projection = MetricProjection::new(&config.metric_crs)?;
    let buffered = BufferPipeline::new(&projection).run(&base, &requests)?;

    let mut layers = Layers::default();
    for (request, layer) in requests.iter().zip(buffered) {
        layers.set(request.kind, layer);
    }

    tracing::info!(
        features = base.feature_count(),
        aircraft = %params.aircraft_type,
        mode = %params.operation_mode,
        grb_m = distances.sgrb,
        crs = projection.definition(),
        "ground risk buffer run complete"
    );

    Ok(RunResponse {
        meta: Meta::new(&distances, calc.version(), &request.params),
        layers,
    })
}
