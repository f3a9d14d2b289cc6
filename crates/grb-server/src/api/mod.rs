//! API routes for the GRB server.

pub mod error;
pub mod grb;
pub mod request_id;
mod routes;

use crate::config::Config;
use axum::Router;

pub fn routes(config: &Config) -> Router<std::sync::Arc<crate::state::AppState>> {
    routes::create_router(config)
}
