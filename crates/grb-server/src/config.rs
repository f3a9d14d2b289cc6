//! Server configuration from environment.

use std::env;

use grb_core::{ConstantsTable, GrbConfig, CURRENT, LV95};

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    /// Allowed browser origins. Empty means any origin.
    pub cors_origins: Vec<String>,
    /// PROJ definition of the metric CRS used for buffering
    pub metric_crs: String,
    pub methodology_version: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            server_port: env::var("GRB_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(8000),
            cors_origins: env::var("GRB_CORS_ORIGINS")
                .map(|s| parse_origins(&s))
                .unwrap_or_default(),
            metric_crs: env::var("GRB_METRIC_CRS").unwrap_or_else(|_| LV95.to_string()),
            methodology_version: env::var("GRB_METHODOLOGY_VERSION")
                .unwrap_or_else(|_| CURRENT.to_string()),
        }
    }

    /// Engine settings for every run served by this process.
    pub fn grb_config(&self) -> GrbConfig {
        GrbConfig {
            constants: ConstantsTable::builtin(),
            methodology_version: self.methodology_version.clone(),
            metric_crs: self.metric_crs.clone(),
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != "*")
        .map(str::to_string)
        .collect()
}
