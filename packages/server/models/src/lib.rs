#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the field registry server.
//!
//! These types are serialized to JSON for the REST API. They are separate
//! from [`FieldRecord`] so the wire shape can evolve independently.
//! Points on the wire are `[lat, lng]` arrays.

use fieldmap_field_models::{FieldRecord, Point};
use serde::{Deserialize, Serialize};

/// A field as returned by `GET /api/fields`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiField {
    /// Field id (the placemark name).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Area in square metres.
    pub size: f64,
    /// Center and boundary.
    pub locations: ApiLocations,
}

/// Geometry of a field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiLocations {
    /// `[lat, lng]` of the field's reference center.
    pub center: [f64; 2],
    /// Boundary ring as `[lat, lng]` pairs.
    pub polygon: Vec<[f64; 2]>,
}

impl From<&FieldRecord> for ApiField {
    fn from(record: &FieldRecord) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            size: record.area,
            locations: ApiLocations {
                center: record.center.to_array(),
                polygon: record.boundary.iter().map(|p| p.to_array()).collect(),
            },
        }
    }
}

/// Request body for the distance and contains endpoints.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiPoint {
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lng: f64,
}

impl From<ApiPoint> for Point {
    fn from(p: ApiPoint) -> Self {
        Self::new(p.lat, p.lng)
    }
}

/// Response of `POST /api/fields/contains`.
///
/// Serializes as `{ "id": ..., "name": ... }` on a match and as the JSON
/// literal `false` otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContainsResponse {
    /// The first field containing the point.
    Match {
        /// Field id.
        id: String,
        /// Field name.
        name: String,
    },
    /// No field contains the point. Always `false`.
    NoMatch(bool),
}

impl From<Option<&FieldRecord>> for ContainsResponse {
    fn from(record: Option<&FieldRecord>) -> Self {
        record.map_or(Self::NoMatch(false), |r| Self::Match {
            id: r.id.clone(),
            name: r.name.clone(),
        })
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Whether the field registry has been built.
    pub fields_loaded: bool,
    /// Service version.
    pub version: String,
}
