//! Search server entry-point: loads settings, wires the search endpoint,
//! health checks and OpenAPI docs.

mod server;

use actix_web::web;
use geosearch::inbound::http::health::HealthState;
use ortho_config::OrthoConfig;
use server::{ServerConfig, ServerSettings, create_server};
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let config = ServerConfig::try_from(&settings).map_err(std::io::Error::other)?;

    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await
}
