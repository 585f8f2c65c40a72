//! R-tree candidate index over field boundary envelopes.
//!
//! Narrows a containment query to the fields whose bounding box holds the
//! point. An even-odd "inside" result always lies within the ring's closed
//! bounding box, so filtering on envelopes never drops a real match.

use fieldmap_field_models::{FieldRecord, Point};
use geo::{BoundingRect, LineString};
use rstar::{AABB, RTree, RTreeObject};

/// A field's bounding envelope, tagged with its document position.
struct BoundaryEnvelope {
    position: usize,
    envelope: AABB<[f64; 2]>,
}

impl RTreeObject for BoundaryEnvelope {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

/// Envelope index over a slice of field records, keyed by position.
pub struct SpatialIndex {
    tree: RTree<BoundaryEnvelope>,
}

impl SpatialIndex {
    /// Indexes every record with a non-empty boundary.
    #[must_use]
    pub fn build(records: &[FieldRecord]) -> Self {
        let entries = records
            .iter()
            .enumerate()
            .filter_map(|(position, record)| {
                compute_envelope(&record.boundary)
                    .map(|envelope| BoundaryEnvelope { position, envelope })
            })
            .collect();

        Self {
            tree: RTree::bulk_load(entries),
        }
    }

    /// Positions of records whose envelope contains `point`, in ascending
    /// document order.
    #[must_use]
    pub fn candidates(&self, point: Point) -> Vec<usize> {
        let query_env = AABB::from_point([point.lat, point.lng]);
        let mut positions: Vec<usize> = self
            .tree
            .locate_in_envelope_intersecting(&query_env)
            .map(|entry| entry.position)
            .collect();
        positions.sort_unstable();
        positions
    }
}

/// Closed bounding box of a ring in `(lat, lng)` space.
fn compute_envelope(boundary: &[Point]) -> Option<AABB<[f64; 2]>> {
    let ring: LineString<f64> = boundary.iter().map(|p| (p.lat, p.lng)).collect();

    ring.bounding_rect()
        .map(|rect| AABB::from_corners([rect.min().x, rect.min().y], [rect.max().x, rect.max().y]))
}
