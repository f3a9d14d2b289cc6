//! Ground risk buffer endpoint.

use axum::{extract::State, Json};
use grb_core::{RunRequest, RunResponse};
use std::sync::Arc;

use crate::api::error::ApiError;
use crate::state::AppState;

/// Compute distances and buffer layers for a drawn flight geography.
pub async fn run_grb(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RunRequest>,
) -> Result<Json<RunResponse>, ApiError> {
    tracing::debug!(
        features = req.fg.features.len(),
        aircraft = %req.params.aircraft_type,
        mode = %req.params.op_type,
        "GRB run requested"
    );

    // Union, projection and buffering are CPU-bound.
    let config = state.grb().clone();
    let response = tokio::task::spawn_blocking(move || grb_core::run(&req, &config)).await??;

    Ok(Json(response))
}
