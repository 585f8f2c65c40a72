//! Locations of the field and centroid KML documents.

use std::path::{Path, PathBuf};

/// Environment variable overriding the field boundary document path.
pub const FIELDS_KML_ENV: &str = "FIELDS_KML";

/// Environment variable overriding the centroid document path.
pub const CENTROIDS_KML_ENV: &str = "CENTROIDS_KML";

/// Returns the workspace root directory.
///
/// Resolved at compile time from `CARGO_MANIFEST_DIR`.
///
/// # Panics
///
/// Panics if the project root cannot be resolved.
#[must_use]
pub fn project_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2)
        .expect("Failed to find project root from CARGO_MANIFEST_DIR")
        .to_path_buf()
}

/// Returns the `data/kml/` directory holding the default documents.
#[must_use]
pub fn kml_dir() -> PathBuf {
    project_root().join("data").join("kml")
}

/// The two KML documents a registry is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSources {
    /// Field boundaries, one polygon per placemark.
    pub fields: PathBuf,
    /// Centroid overrides, one point per placemark.
    pub centroids: PathBuf,
}

impl FieldSources {
    #[must_use]
    pub fn new(fields: impl Into<PathBuf>, centroids: impl Into<PathBuf>) -> Self {
        Self {
            fields: fields.into(),
            centroids: centroids.into(),
        }
    }

    /// Reads `FIELDS_KML` and `CENTROIDS_KML`, falling back to
    /// `data/kml/fields.kml` and `data/kml/centroids.kml`.
    #[must_use]
    pub fn from_env() -> Self {
        let fields = std::env::var(FIELDS_KML_ENV)
            .map_or_else(|_| kml_dir().join("fields.kml"), PathBuf::from);
        let centroids = std::env::var(CENTROIDS_KML_ENV)
            .map_or_else(|_| kml_dir().join("centroids.kml"), PathBuf::from);

        Self { fields, centroids }
    }
}
