#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the field registry.
//!
//! Exposes the registry's queries over HTTP: list fields, field area,
//! distance from a field's center to a point, and which field contains a
//! point. The registry is shared by every worker and built on first use.

mod handlers;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use fieldmap_field::FieldRegistry;

/// Default bind address when `BIND_ADDR` is unset.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1";

/// Default port when `PORT` is unset or invalid.
pub const DEFAULT_PORT: u16 = 8080;

/// Shared application state.
pub struct AppState {
    /// Field registry, built lazily on the first query.
    pub registry: Arc<FieldRegistry>,
}

/// Registers the `/api` routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/fields", web::get().to(handlers::list_fields))
            .route("/fields/contains", web::post().to(handlers::contains))
            .route("/fields/{id}/size", web::get().to(handlers::field_size))
            .route("/fields/{id}/distance", web::post().to(handlers::field_distance)),
    );
}

/// Reads the bind address and port from `BIND_ADDR` and `PORT`.
#[must_use]
pub fn bind_from_env() -> (String, u16) {
    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);
    (bind_addr, port)
}

/// Starts the field registry API server.
///
/// Tries to build the registry up front so the first request does not pay
/// the parse cost. If that fails the server still starts, and the build is
/// retried on each query until it succeeds. This is a regular async
/// function; the caller provides the runtime (e.g. via
/// `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind or
/// encounters a runtime error.
pub async fn run_server(
    registry: Arc<FieldRegistry>,
    bind_addr: String,
    port: u16,
) -> std::io::Result<()> {
    match registry.field_set() {
        Ok(set) => log::info!("Field registry ready with {} fields", set.len()),
        Err(e) => log::warn!("Field registry not ready, will retry on first query: {e}"),
    }

    let state = web::Data::new(AppState { registry });

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
