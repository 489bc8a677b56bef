use geo::{coord, Destination, Geodesic, Intersects, Point, Rect};
use rstar::AABB;
use rustc_hash::FxHashSet;

use crate::network::{EdgeIx, RoadEdge, RoadNetwork};

/// A geographic bounding box, in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds(Rect);

impl Bounds {
    /// The tightest box around all `points`, or `None` if there are none.
    pub fn around<'a>(points: impl IntoIterator<Item = &'a Point>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;

        let (min, max) = points.fold((first.0, first.0), |(min, max), point| {
            (
                coord! { x: min.x.min(point.x()), y: min.y.min(point.y()) },
                coord! { x: max.x.max(point.x()), y: max.y.max(point.y()) },
            )
        });

        Some(Self(Rect::new(min, max)))
    }

    /// Pads every side of the box by at least `meters`.
    ///
    /// The east-west padding is measured at the latitude furthest from the
    /// equator, where a degree of longitude is shortest, so the padding is
    /// never under `meters` anywhere along the box.
    pub fn enlarge(&self, meters: f64) -> Self {
        let (min, max) = (self.0.min(), self.0.max());

        let north = Geodesic
            .destination(Point::new(min.x, max.y), 0.0, meters)
            .y()
            .min(90.0);
        let south = Geodesic
            .destination(Point::new(min.x, min.y), 180.0, meters)
            .y()
            .max(-90.0);

        let widest = if north.abs() > south.abs() { north } else { south };
        let widest = widest.clamp(-89.9, 89.9);

        let east = Geodesic
            .destination(Point::new(max.x, widest), 90.0, meters)
            .x();
        let west = Geodesic
            .destination(Point::new(min.x, widest), 270.0, meters)
            .x();

        // Destinations wrap around the antimeridian.
        let east = if east < max.x { 180.0 } else { east.min(180.0) };
        let west = if west > min.x { -180.0 } else { west.max(-180.0) };

        Self(Rect::new(
            coord! { x: west, y: south },
            coord! { x: east, y: north },
        ))
    }

    pub fn rect(&self) -> &Rect {
        &self.0
    }

    pub fn contains(&self, point: &Point) -> bool {
        self.0.intersects(point)
    }

    pub fn envelope(&self) -> AABB<Point> {
        AABB::from_corners(Point::from(self.0.min()), Point::from(self.0.max()))
    }
}

/// The subset of a [`RoadNetwork`] relevant to a single trajectory.
///
/// Borrows the network, so clipping never copies or mutates it.
/// Routing performed on behalf of the trajectory is restricted to
/// the edges of the view.
#[derive(Clone, Debug)]
pub struct NetworkView<'a> {
    network: &'a RoadNetwork,
    edges: Vec<EdgeIx>,
    allowed: FxHashSet<EdgeIx>,
}

impl<'a> NetworkView<'a> {
    pub(crate) fn new(network: &'a RoadNetwork, bounds: &Bounds) -> Self {
        let mut edges = network
            .index_edge()
            .locate_in_envelope_intersecting(&bounds.envelope())
            .map(|envelope| envelope.data)
            .filter(|index| {
                network
                    .edge(*index)
                    .is_some_and(|edge| edge.geometry.intersects(bounds.rect()))
            })
            .collect::<Vec<_>>();

        // Tree order is arbitrary, candidates are ordered by edge index.
        edges.sort_unstable();
        Self::from_edges(network, edges)
    }

    /// A view over every edge of the network.
    pub fn full(network: &'a RoadNetwork) -> Self {
        Self::from_edges(network, (0..network.edge_count()).collect())
    }

    pub(crate) fn from_edges(network: &'a RoadNetwork, edges: Vec<EdgeIx>) -> Self {
        let allowed = edges.iter().copied().collect::<FxHashSet<_>>();

        Self {
            network,
            edges,
            allowed,
        }
    }

    pub fn network(&self) -> &'a RoadNetwork {
        self.network
    }

    pub fn contains(&self, edge: EdgeIx) -> bool {
        self.allowed.contains(&edge)
    }

    pub fn edges(&self) -> impl Iterator<Item = (EdgeIx, &'a RoadEdge)> + '_ {
        self.edges
            .iter()
            .filter_map(|index| Some((*index, self.network.edge(*index)?)))
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}
