//! Mapping of engine errors to HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use grb_core::GrbError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Grb(#[from] GrbError),

    #[error("calculation task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Grb(GrbError::EmptyGeometry | GrbError::InvalidGeometry(_)) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Grb(GrbError::InvalidAircraftType(_) | GrbError::InvalidParameter { .. }) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::Grb(GrbError::Configuration(_)) | ApiError::Task(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("GRB run failed: {}", self);
        } else {
            tracing::info!("Rejected GRB request: {}", self);
        }
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
