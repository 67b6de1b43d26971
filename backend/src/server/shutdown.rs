//! Graceful shutdown on Ctrl+C or SIGTERM.

use std::io;

use actix_web::dev::ServerHandle;
use actix_web::web;
use thiserror::Error;
use tokio::signal;
use tracing::info;

use hbnb::inbound::http::health::HealthState;

#[derive(Debug, Error)]
pub enum ShutdownSignalError {
    #[error("failed to install Ctrl+C handler: {0}")]
    CtrlC(#[source] io::Error),

    #[cfg(unix)]
    #[error("failed to install SIGTERM handler: {0}")]
    SigTerm(#[source] io::Error),
}

/// Wait for a shutdown signal, then [`drain`] the server.
pub async fn listen(
    health_state: web::Data<HealthState>,
    handle: ServerHandle,
) -> Result<(), ShutdownSignalError> {
    let ctrl_c = async { signal::ctrl_c().await.map_err(ShutdownSignalError::CtrlC) };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .map_err(ShutdownSignalError::SigTerm)?
            .recv()
            .await;
        Ok::<(), ShutdownSignalError>(())
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<Result<(), ShutdownSignalError>>();

    tokio::select! {
        result = ctrl_c => {
            result?;
            info!("ctrl_c signal received");
        }
        result = terminate => {
            result?;
            info!("terminate signal received");
        }
    }

    drain(&health_state, &handle).await;
    Ok(())
}

/// Fail the health probes, then stop accepting connections and wait for
/// in-flight requests to finish.
pub async fn drain(health_state: &HealthState, handle: &ServerHandle) {
    health_state.mark_unhealthy();
    handle.stop(true).await;
    info!("server drained");
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, HttpResponse, HttpServer};
    use rstest::rstest;

    #[rstest]
    #[actix_rt::test]
    async fn drain_fails_probes_and_stops_the_server() {
        let health_state = HealthState::new();
        health_state.mark_ready();
        let server = HttpServer::new(|| {
            App::new().default_service(web::to(|| async { HttpResponse::Ok().finish() }))
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("bind loopback")
        .disable_signals()
        .run();
        let handle = server.handle();
        let running = actix_rt::spawn(server);

        drain(&health_state, &handle).await;

        assert!(!health_state.is_alive());
        assert!(!health_state.is_ready());
        running
            .await
            .expect("server task joins")
            .expect("server stops cleanly");
    }
}
