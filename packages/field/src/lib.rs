#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Field registry for land parcels described in KML.
//!
//! Reads a field boundary document and a centroid document, assembles one
//! [`FieldRecord`](fieldmap_field_models::FieldRecord) per placemark with a
//! non-empty boundary, and caches the result for the lifetime of the
//! [`FieldRegistry`]. Queries (list, size, distance, containment) run
//! against the cached [`FieldSet`].

pub mod centroids;
pub mod fields;
pub mod paths;
pub mod registry;
pub mod spatial;

use std::path::PathBuf;

use fieldmap_kml::KmlError;
use thiserror::Error;

pub use centroids::CentroidOverrides;
pub use fields::FieldSet;
pub use paths::FieldSources;
pub use registry::FieldRegistry;

/// Errors that prevent the registry from being built.
///
/// None of these are cached: the next query retries the full build.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A source document could not be read from disk.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        /// Path of the document.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A source document is not a usable KML document.
    #[error("Failed to parse KML {}: {source}", path.display())]
    Kml {
        /// Path of the document.
        path: PathBuf,
        /// Underlying KML error.
        source: KmlError,
    },
}
