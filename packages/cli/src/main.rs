#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line access to the field registry.
//!
//! ```text
//! fieldmap list [--json]
//! fieldmap size <id>
//! fieldmap distance <id> --lat <lat> --lng <lng>
//! fieldmap contains --lat <lat> --lng <lng>
//! fieldmap serve [--bind <addr>] [--port <port>]
//! ```
//!
//! Document paths come from `--fields` / `--centroids`, falling back to
//! `FIELDS_KML` / `CENTROIDS_KML`.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use fieldmap_field::{FieldRegistry, FieldSources};
use fieldmap_field_models::Point;
use fieldmap_server_models::ApiField;

#[derive(Parser)]
#[command(name = "fieldmap", about = "Query land parcels defined in KML")]
struct Cli {
    /// Field boundary KML document
    #[arg(long, global = true)]
    fields: Option<PathBuf>,
    /// Centroid override KML document
    #[arg(long, global = true)]
    centroids: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all fields in document order
    List {
        /// Print the API JSON representation
        #[arg(long)]
        json: bool,
    },
    /// Print a field's area in square metres
    Size {
        /// Field ID
        id: String,
    },
    /// Print the distance in metres from a field's center to a point
    Distance {
        /// Field ID
        id: String,
        /// Latitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        /// Longitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
    },
    /// Print the first field containing a point
    Contains {
        /// Latitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        /// Longitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
    },
    /// Start the HTTP API server
    Serve {
        /// Bind address (defaults to `BIND_ADDR`, then 127.0.0.1)
        #[arg(long)]
        bind: Option<String>,
        /// Port (defaults to `PORT`, then 8080)
        #[arg(long)]
        port: Option<u16>,
    },
}

impl Cli {
    fn sources(&self) -> FieldSources {
        let defaults = FieldSources::from_env();
        FieldSources::new(
            self.fields.clone().unwrap_or(defaults.fields),
            self.centroids.clone().unwrap_or(defaults.centroids),
        )
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();
    let registry = FieldRegistry::new(cli.sources());

    match cli.command {
        Commands::List { json } => {
            let fields = registry.list_fields()?;

            if json {
                let api: Vec<ApiField> = fields.iter().map(ApiField::from).collect();
                println!("{}", serde_json::to_string_pretty(&api)?);
                return Ok(());
            }

            if fields.is_empty() {
                println!("No fields found.");
                return Ok(());
            }

            println!("{:<24} {:>14} {:>7}  CENTER", "ID", "AREA (m²)", "POINTS");
            println!("{}", "-".repeat(80));
            for field in fields {
                println!(
                    "{:<24} {:>14.1} {:>7}  {:.6}, {:.6}",
                    field.id,
                    field.area,
                    field.boundary.len(),
                    field.center.lat,
                    field.center.lng
                );
            }
            println!("\n{} field(s)", fields.len());
        }
        Commands::Size { id } => {
            let Some(size) = registry.get_size(&id)? else {
                eprintln!("Field not found: {id}");
                std::process::exit(1);
            };
            println!("{size}");
        }
        Commands::Distance { id, lat, lng } => {
            let Some(distance) = registry.get_distance(&id, Point::new(lat, lng))? else {
                eprintln!("Field not found: {id}");
                std::process::exit(1);
            };
            println!("{distance}");
        }
        Commands::Contains { lat, lng } => {
            let Some(field) = registry.find_containing(Point::new(lat, lng))? else {
                eprintln!("No field contains {lat}, {lng}");
                std::process::exit(1);
            };
            println!("{}", field.id);
        }
        Commands::Serve { bind, port } => {
            let (env_bind, env_port) = fieldmap_server::bind_from_env();
            let bind_addr = bind.unwrap_or(env_bind);
            let port = port.unwrap_or(env_port);

            log::info!("Serving fields from {}", registry.sources().fields.display());
            actix_rt::System::new().block_on(fieldmap_server::run_server(
                Arc::new(registry),
                bind_addr,
                port,
            ))?;
        }
    }

    Ok(())
}
