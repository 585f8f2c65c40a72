//! Centroid overrides read from the secondary KML document.

use std::collections::BTreeMap;

use fieldmap_field_models::Point;
use fieldmap_kml::{Placemark, parse_coordinates};

/// Field id → externally supplied center point.
///
/// Keys are unique; when the document repeats an id, the last placemark
/// wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CentroidOverrides {
    points: BTreeMap<String, Point>,
}

impl CentroidOverrides {
    /// Builds the override map from centroid placemarks.
    ///
    /// Only the first parsed point of each placemark is used. Placemarks
    /// without a usable coordinate produce no entry. A placemark with no
    /// `name` is keyed by the empty string.
    #[must_use]
    pub fn from_placemarks(placemarks: impl IntoIterator<Item = Placemark>) -> Self {
        let mut points = BTreeMap::new();

        for placemark in placemarks {
            let id = placemark.name.unwrap_or_default();
            let first = placemark
                .coordinates
                .as_deref()
                .and_then(|coords| parse_coordinates(coords).into_iter().next());

            match first {
                Some(point) => {
                    if points.insert(id.clone(), point).is_some() {
                        log::debug!("Centroid for {id:?} replaced by a later placemark");
                    }
                }
                None => log::debug!("Centroid placemark {id:?} has no usable coordinates"),
            }
        }

        Self { points }
    }

    /// Returns the override for `id`, if one exists.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<Point> {
        self.points.get(id).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
