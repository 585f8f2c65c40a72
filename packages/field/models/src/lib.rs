#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Field parcel and geographic point types.
//!
//! These types describe land parcels ("fields") loaded from KML documents:
//! their boundary ring, computed area, and reference center. All coordinates
//! are decimal degrees stored latitude first.

use serde::{Deserialize, Serialize};

/// A geographic coordinate in decimal degrees. Altitude is not retained.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Point {
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lng: f64,
}

impl Point {
    /// Creates a point from a latitude and longitude pair.
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Returns the point as a `[lat, lng]` pair.
    #[must_use]
    pub const fn to_array(self) -> [f64; 2] {
        [self.lat, self.lng]
    }
}

/// A boundary ring. Implicitly closed: the last vertex connects back to the
/// first. Fewer than three vertices is degenerate.
pub type Polygon = Vec<Point>;

/// A land parcel assembled from the field and centroid KML documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldRecord {
    /// Placemark name (or the missing-name sentinel).
    pub id: String,
    /// Display name. Always equal to `id`.
    pub name: String,
    /// Area in square metres, never negative.
    pub area: f64,
    /// Reference center: the centroid override if present, else the vertex mean.
    pub center: Point,
    /// Non-empty boundary ring in document order.
    pub boundary: Polygon,
}
