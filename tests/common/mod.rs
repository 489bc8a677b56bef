//! Synthetic networks on the equator, positioned in meters from `(0, 0)`.
#![allow(dead_code)]

use roadmatch::{Directionality, EdgeRecord, NetworkDescription, RoadNetwork};

const EARTH_RADIUS: f64 = 6_371_008.8;

/// `(lon, lat)` of a position `x` meters east and `y` meters north of the origin.
pub fn at(x: f64, y: f64) -> (f64, f64) {
    (x.to_degrees() / EARTH_RADIUS, y.to_degrees() / EARTH_RADIUS)
}

/// A single undirected road, edge `42`, from `(0, 0)` to `(400, 0)`.
pub fn road() -> RoadNetwork {
    let (a, b) = (at(0.0, 0.0), at(400.0, 0.0));
    let description = NetworkDescription::default()
        .node(1, a.0, a.1)
        .node(2, b.0, b.1)
        .edge(
            EdgeRecord::new(42, 1, 2)
                .with_way(4200)
                .with_tag("highway", "secondary"),
        );

    RoadNetwork::new(description, Directionality::Undirected).expect("fixture must build")
}

/// One-way roads crossing at the origin, each split at the crossing.
///
/// Edge `1` runs west to the crossing, `2` on to the east, `3` from
/// the south to the crossing and `4` on to the north. Arms are 200m.
pub fn crossing() -> RoadNetwork {
    let description = [
        (1, 0.0, 0.0),
        (2, -200.0, 0.0),
        (3, 200.0, 0.0),
        (4, 0.0, -200.0),
        (5, 0.0, 200.0),
    ]
    .into_iter()
    .fold(NetworkDescription::default(), |description, (id, x, y)| {
        let (lon, lat) = at(x, y);
        description.node(id, lon, lat)
    })
    .edge(EdgeRecord::new(1, 2, 1))
    .edge(EdgeRecord::new(2, 1, 3))
    .edge(EdgeRecord::new(3, 4, 1))
    .edge(EdgeRecord::new(4, 1, 5));

    RoadNetwork::new(description, Directionality::Directed).expect("fixture must build")
}

/// Id of the edge from grid position `(row, column)` eastward.
pub fn horizontal(size: u64, row: u64, column: u64) -> u64 {
    1_000 + row * size + column
}

/// Id of the edge from grid position `(row, column)` northward.
pub fn vertical(size: u64, row: u64, column: u64) -> u64 {
    2_000 + row * size + column
}

/// An undirected `size` by `size` grid of nodes, `spacing` meters apart.
pub fn grid(size: u64, spacing: f64) -> RoadNetwork {
    let node = |row: u64, column: u64| row * size + column + 1;
    let mut description = NetworkDescription::default();

    for row in 0..size {
        for column in 0..size {
            let (lon, lat) = at(column as f64 * spacing, row as f64 * spacing);
            description = description.node(node(row, column), lon, lat);

            if column + 1 < size {
                description = description.edge(EdgeRecord::new(
                    horizontal(size, row, column),
                    node(row, column),
                    node(row, column + 1),
                ));
            }

            if row + 1 < size {
                description = description.edge(EdgeRecord::new(
                    vertical(size, row, column),
                    node(row, column),
                    node(row + 1, column),
                ));
            }
        }
    }

    RoadNetwork::new(description, Directionality::Undirected).expect("fixture must build")
}
