//! Radius queries over the reference points of a network view.
use geo::{Destination, Distance, Geodesic, Haversine, Point};
use log::debug;
use measure_time::debug_time;
use rstar::{RTree, AABB};

use crate::network::ReferencePoint;


/// Geodesic destinations are computed on the ellipsoid while candidates
/// are filtered by haversine distance. The envelope is widened slightly
/// so the two never disagree at the edge of the search circle.
const ENVELOPE_PADDING: f64 = 1.01;

/// Nearest-neighbour structure over the densified edge reference points.
///
/// Built once per matching call, by bulk-loading an [`RTree`] in
/// `O(n log n)`. A query first collects the points within the bounding
/// envelope of the search circle, then keeps those whose great-circle
/// (haversine) distance lies within the radius.
pub struct SpatialIndex {
    tree: RTree<ReferencePoint>,
}

impl SpatialIndex {
    pub fn new(points: Vec<ReferencePoint>) -> Self {
        debug_time!("SpatialIndex::new");
        let tree = RTree::bulk_load(points);
        debug!("Indexed {} reference points", tree.size());

        Self { tree }
    }

    pub fn size(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// The envelope (in degrees) enclosing the circle of `radius`
    /// meters around `point`.
    pub fn envelope(point: &Point, radius: f64) -> AABB<Point> {
        let reach = radius * ENVELOPE_PADDING;

        let north = Geodesic.destination(*point, 0.0, reach);
        let south = Geodesic.destination(*point, 180.0, reach);

        // A degree of longitude is shortest at the poleward side.
        let poleward = if north.y().abs() > south.y().abs() {
            north
        } else {
            south
        };

        let poleward = Point::new(point.x(), poleward.y().clamp(-89.9, 89.9));
        let east = Geodesic.destination(poleward, 90.0, reach);
        let west = Geodesic.destination(poleward, 270.0, reach);

        AABB::from_corners(
            Point::new(west.x(), south.y()),
            Point::new(east.x(), north.y()),
        )
    }

    /// All reference points within `radius` meters (haversine) of `point`,
    /// together with their distance.
    pub fn within(&self, point: &Point, radius: f64) -> Vec<(&ReferencePoint, f64)> {
        if self.is_empty() {
            return vec![];
        }

        self.tree
            .locate_in_envelope(&Self::envelope(point, radius))
            .filter_map(|reference| {
                let distance = Haversine.distance(reference.position, *point);
                (distance <= radius).then_some((reference, distance))
            })
            .collect()
    }
}
