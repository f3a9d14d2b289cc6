//! Shared, read-only application state.

use grb_core::GrbConfig;

#[derive(Debug, Clone)]
pub struct AppState {
    grb: GrbConfig,
}

impl AppState {
    pub fn new(grb: GrbConfig) -> Self {
        Self { grb }
    }

    pub fn grb(&self) -> &GrbConfig {
        &self.grb
    }
}
