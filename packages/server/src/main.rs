#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Field registry API server binary.
//!
//! Reads document paths from `FIELDS_KML` / `CENTROIDS_KML` and the listen
//! address from `BIND_ADDR` / `PORT`.

use std::sync::Arc;

use fieldmap_field::FieldRegistry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let registry = Arc::new(FieldRegistry::from_env());
    let (bind_addr, port) = fieldmap_server::bind_from_env();

    fieldmap_server::run_server(registry, bind_addr, port).await
}
