use geo::{Distance, Haversine, InterpolatePoint, Point};
use rayon::prelude::*;
use rstar::{PointDistance, RTreeObject, AABB};

use crate::network::{EdgeIx, NetworkView, RoadEdge};

/// Samples closer than this to the end of a segment are dropped,
/// the vertex ending the segment stands in for them.
const MIN_GAP: f64 = 1e-6;

/// A point sampled along the geometry of an edge.
///
/// Reference points are what the [`SpatialIndex`](crate::SpatialIndex)
/// is built from. Their `offset` locates them on the interpolated
/// network, so routing between two of them does not need to
/// materialise the interpolated graph.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReferencePoint {
    pub position: Point,
    pub edge: EdgeIx,

    /// Distance from the start of the edge along its geometry, in meters.
    pub offset: f64,
}

impl RTreeObject for ReferencePoint {
    type Envelope = AABB<Point>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.position)
    }
}

impl PointDistance for ReferencePoint {
    fn distance_2(&self, point: &Point) -> f64 {
        let (dx, dy) = (self.position.x() - point.x(), self.position.y() - point.y());
        dx * dx + dy * dy
    }
}

/// Samples the geometry of `edge` every `spacing` meters.
///
/// Every vertex of the original geometry is kept, and each segment
/// between two vertices is interpolated independently, so the gap
/// between consecutive reference points never exceeds `spacing`.
pub fn densify_edge(index: EdgeIx, edge: &RoadEdge, spacing: f64) -> Vec<ReferencePoint> {
    let mut points = Vec::with_capacity(edge.geometry.0.len());
    let mut offset = 0.0;

    for line in edge.geometry.lines() {
        let (start, end) = (Point::from(line.start), Point::from(line.end));
        let length = Haversine.distance(start, end);

        let mut along = 0.0;
        while length - along > MIN_GAP {
            let position = if along == 0.0 {
                start
            } else {
                Haversine.point_at_distance_between(start, end, along)
            };

            points.push(ReferencePoint {
                position,
                edge: index,
                offset: offset + along,
            });
            along += spacing;
        }

        offset += length;
    }

    if let Some(last) = edge.geometry.points().last() {
        points.push(ReferencePoint {
            position: last,
            edge: index,
            offset,
        });
    }

    points
}

/// Reference points of every edge within the view.
pub fn densify(view: &NetworkView, spacing: f64) -> Vec<ReferencePoint> {
    let edges = view.edges().collect::<Vec<_>>();

    edges
        .into_par_iter()
        .flat_map_iter(|(index, edge)| densify_edge(index, edge, spacing))
        .collect()
}
