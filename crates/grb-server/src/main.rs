//! GRB Server - ground risk buffer layers over HTTP

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use grb_server::api;
use grb_server::config::Config;
use grb_server::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("grb_server=debug,grb_core=info")
            }),
        )
        .init();

    tracing::info!("Starting GRB Server...");

    let config = Config::from_env();
    let grb = config.grb_config();
    grb.check()?;
    tracing::info!(
        version = %grb.methodology_version,
        crs = %grb.metric_crs,
        "ground risk buffer engine ready"
    );

    let state = Arc::new(AppState::new(grb));
    let app = api::routes(&config).with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
