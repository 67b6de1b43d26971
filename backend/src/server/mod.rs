//! Server construction and middleware wiring.

mod config;
pub mod shutdown;
mod storage_builder;

pub use config::ServerConfig;
pub use storage_builder::build_storage;

use actix_web::dev::Server;
use actix_web::{HttpServer, web};

use hbnb::inbound::http::health::HealthState;
use hbnb::inbound::http::routes::build_app;
use hbnb::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use hbnb::doc::ApiDoc;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Construct an Actix HTTP server over the configured storage.
///
/// Signal handling is left to [`shutdown::listen`].
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let ServerConfig { bind_addr, storage } = config;
    let http_state = web::Data::new(HttpState::new(storage));

    let server = HttpServer::new(move || {
        let app = build_app(http_state.clone(), server_health_state.clone());

        #[cfg(debug_assertions)]
        let app =
            app.service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));

        app
    })
    .bind(bind_addr)?
    .disable_signals()
    .run();

    health_state.mark_ready();
    Ok(server)
}
