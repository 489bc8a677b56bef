//! Small synthetic networks laid out on the equator, where a meter
//! east and a meter north span (almost exactly) the same number of
//! degrees. Positions are given in meters from `(0, 0)`.

use geo::Point;

use crate::network::{Directionality, EdgeRecord, NetworkDescription, RoadNetwork};

/// Mean earth radius used by [`geo::Haversine`].
const EARTH_RADIUS: f64 = 6_371_008.8;

pub fn degrees(meters: f64) -> f64 {
    meters.to_degrees() / EARTH_RADIUS
}

/// `(lon, lat)` of a position `x` meters east and `y` meters north of the origin.
pub fn at(x: f64, y: f64) -> (f64, f64) {
    (degrees(x), degrees(y))
}

pub fn point(x: f64, y: f64) -> Point {
    let (lon, lat) = at(x, y);
    Point::new(lon, lat)
}

/// A single 200m road heading east from the origin.
///
/// ```text
///  1 ------(edge 1)------> 2
/// (0,0)                 (200,0)
/// ```
pub fn straight_road() -> RoadNetwork {
    let (a, b) = (at(0.0, 0.0), at(200.0, 0.0));
    let description = NetworkDescription::default()
        .node(1, a.0, a.1)
        .node(2, b.0, b.1)
        .edge(
            EdgeRecord::new(1, 1, 2)
                .with_way(10)
                .with_tag("highway", "primary")
                .with_tag("bridge", "yes"),
        );

    RoadNetwork::new(description, Directionality::Undirected).expect("fixture must build")
}

/// Two roads crossing at the origin, each split at the crossing.
///
/// ```text
///              N (0,200)
///              ^
///              | 4
///   W ---1---> C ---2---> E
///  (-200,0)    ^        (200,0)
///              | 3
///              S (0,-200)
/// ```
pub fn crossing(directionality: Directionality) -> RoadNetwork {
    let nodes = [
        (1, 0.0, 0.0),
        (2, -200.0, 0.0),
        (3, 200.0, 0.0),
        (4, 0.0, -200.0),
        (5, 0.0, 200.0),
    ];

    let description = nodes
        .into_iter()
        .fold(NetworkDescription::default(), |description, (id, x, y)| {
            let (lon, lat) = at(x, y);
            description.node(id, lon, lat)
        })
        .edge(EdgeRecord::new(1, 2, 1).with_way(100))
        .edge(EdgeRecord::new(2, 1, 3).with_way(100))
        .edge(EdgeRecord::new(3, 4, 1).with_way(200))
        .edge(EdgeRecord::new(4, 1, 5).with_way(200));

    RoadNetwork::new(description, directionality).expect("fixture must build")
}
