//! Field record assembly and the immutable [`FieldSet`] queried by the
//! registry.

use std::collections::BTreeMap;
use std::path::Path;

use fieldmap_field_models::{FieldRecord, Point};
use fieldmap_geometry::{centroid, haversine_distance, point_in_polygon, polygon_area};
use fieldmap_kml::{Placemark, parse_coordinates, read_placemarks};

use crate::centroids::CentroidOverrides;
use crate::paths::FieldSources;
use crate::spatial::SpatialIndex;
use crate::RegistryError;

/// Id given to field placemarks that have no `name`.
pub const MISSING_FIELD_ID: &str = "NoId";

/// Builds field records from boundary placemarks, in placemark order.
///
/// Placemarks whose coordinates yield no valid point are omitted. The
/// center is the override for the field's id when one exists, otherwise
/// the mean of the boundary vertices.
#[must_use]
pub fn assemble_fields(
    placemarks: impl IntoIterator<Item = Placemark>,
    overrides: &CentroidOverrides,
) -> Vec<FieldRecord> {
    placemarks
        .into_iter()
        .filter_map(|placemark| {
            let id = placemark
                .name
                .unwrap_or_else(|| MISSING_FIELD_ID.to_string());
            let boundary = placemark
                .coordinates
                .as_deref()
                .map(parse_coordinates)
                .unwrap_or_default();

            let Some(mean) = centroid(&boundary) else {
                log::debug!("Skipping field {id:?}: no valid boundary coordinates");
                return None;
            };

            Some(FieldRecord {
                name: id.clone(),
                area: polygon_area(&boundary),
                center: overrides.get(&id).unwrap_or(mean),
                id,
                boundary,
            })
        })
        .collect()
}

/// Reads and parses the placemarks of one KML document.
fn load_placemarks(path: &Path) -> Result<Vec<Placemark>, RegistryError> {
    let document = std::fs::read_to_string(path).map_err(|source| RegistryError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    read_placemarks(&document).map_err(|source| RegistryError::Kml {
        path: path.to_path_buf(),
        source,
    })
}

/// Fully parses both documents and builds a [`FieldSet`].
///
/// # Errors
///
/// Returns an error if either document is missing, unreadable, or not a
/// KML 2.2 document.
pub fn build_field_set(sources: &FieldSources) -> Result<FieldSet, RegistryError> {
    let overrides = CentroidOverrides::from_placemarks(load_placemarks(&sources.centroids)?);
    log::info!(
        "Loaded {} centroid overrides from {}",
        overrides.len(),
        sources.centroids.display()
    );

    let placemarks = load_placemarks(&sources.fields)?;
    let placemark_count = placemarks.len();
    let records = assemble_fields(placemarks, &overrides);
    log::info!(
        "Loaded {} fields from {} ({} placemarks skipped)",
        records.len(),
        sources.fields.display(),
        placemark_count - records.len()
    );

    Ok(FieldSet::new(records))
}

/// An immutable, ordered collection of field records with id and spatial
/// lookups.
pub struct FieldSet {
    records: Vec<FieldRecord>,
    /// id -> position of its first record
    by_id: BTreeMap<String, usize>,
    spatial: SpatialIndex,
}

impl FieldSet {
    #[must_use]
    pub fn new(records: Vec<FieldRecord>) -> Self {
        let mut by_id = BTreeMap::new();
        for (position, record) in records.iter().enumerate() {
            by_id.entry(record.id.clone()).or_insert(position);
        }
        if by_id.len() < records.len() {
            log::warn!(
                "{} field records share an id; lookups by id return the first",
                records.len() - by_id.len()
            );
        }
        let spatial = SpatialIndex::build(&records);

        Self {
            records,
            by_id,
            spatial,
        }
    }

    /// All records in document order.
    #[must_use]
    pub fn records(&self) -> &[FieldRecord] {
        &self.records
    }

    /// The first record (in document order) with this id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&FieldRecord> {
        self.by_id.get(id).map(|&position| &self.records[position])
    }

    /// Area in square metres of the field with this id.
    #[must_use]
    pub fn size(&self, id: &str) -> Option<f64> {
        self.get(id).map(|record| record.area)
    }

    /// Great-circle distance in metres from the field's center to `point`.
    #[must_use]
    pub fn distance(&self, id: &str, point: Point) -> Option<f64> {
        self.get(id)
            .map(|record| haversine_distance(record.center, point))
    }

    /// The first field in document order whose boundary contains `point`.
    ///
    /// Overlapping fields are not ranked: document order decides.
    #[must_use]
    pub fn find_containing(&self, point: Point) -> Option<&FieldRecord> {
        self.spatial
            .candidates(point)
            .into_iter()
            .map(|position| &self.records[position])
            .find(|record| point_in_polygon(point, &record.boundary))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
