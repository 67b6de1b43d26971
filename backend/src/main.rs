//! Backend entry-point: loads settings, opens storage and serves the REST API.

mod server;

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use hbnb::config::HbnbSettings;
use hbnb::inbound::http::health::HealthState;
use server::{ServerConfig, build_storage, create_server, shutdown};

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

    let settings = HbnbSettings::load_from_iter(std::env::args_os())
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    let storage = build_storage(&settings, Arc::new(DefaultClock)).await?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(
        health_state.clone(),
        ServerConfig::new(bind_addr, storage.clone()),
    )?;
    let handle = server.handle();
    actix_web::rt::spawn(async move {
        if let Err(err) = shutdown::listen(health_state, handle).await {
            warn!(error = %err, "failed to listen for shutdown signal");
        }
    });
    info!(%bind_addr, "listening");
    let outcome = server.await;

    if let Err(err) = storage.close().await {
        warn!(error = %err, "closing storage failed");
    }
    outcome
}
