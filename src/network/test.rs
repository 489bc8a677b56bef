use approx::assert_relative_eq;
use geo::{Distance, Haversine, Point};

use crate::error::NetworkError;
use crate::fixtures::{at, crossing, point, straight_road};
use crate::network::densify::{densify, densify_edge};
use crate::network::*;

#[test]
fn builds_from_description() {
    let network = straight_road();

    assert_eq!(network.node_count(), 2);
    assert_eq!(network.edge_count(), 1);

    let edge = network.edge_by_id(EdgeId(1)).expect("edge must exist");
    assert_relative_eq!(edge.length, 200.0, max_relative = 1e-6);
    assert_eq!(edge.geometry.0.len(), 2);
    assert_eq!(edge.way_id, Some(10));
    assert_eq!(edge.tag("highway"), Some("primary"));
}

#[test]
fn parses_provider_document() {
    let document = r#"{
        "nodes": [
            { "id": 1, "lon": 0.0, "lat": 0.0 },
            { "id": 2, "lon": 0.001, "lat": 0.0 }
        ],
        "edges": [{
            "id": 9, "fromNode": 1, "toNode": 2,
            "geometry": [[0.0, 0.0], [0.0005, 0.0001], [0.001, 0.0]],
            "wayId": 31, "tags": { "highway": "residential" }
        }]
    }"#;

    let description: NetworkDescription =
        serde_json::from_str(document).expect("document must parse");
    let network =
        RoadNetwork::new(description, Directionality::Directed).expect("network must build");

    let edge = network.edge_by_id(EdgeId(9)).expect("edge must exist");
    assert_eq!(edge.geometry.0.len(), 3);
    assert_eq!(edge.way_id, Some(31));
    assert!(edge.length > Haversine.distance(Point::new(0.0, 0.0), Point::new(0.001, 0.0)));
}

#[test]
fn rejects_unknown_node() {
    let description = NetworkDescription::default()
        .node(1, 0.0, 0.0)
        .edge(EdgeRecord::new(5, 1, 2));

    let error = RoadNetwork::new(description, Directionality::Directed).unwrap_err();
    assert_eq!(
        error,
        NetworkError::UnknownNode {
            edge: EdgeId(5),
            node: NodeId(2)
        }
    );
}

#[test]
fn rejects_duplicates() {
    let nodes = NetworkDescription::default()
        .node(1, 0.0, 0.0)
        .node(1, 0.1, 0.0);
    assert_eq!(
        RoadNetwork::new(nodes, Directionality::Directed).unwrap_err(),
        NetworkError::DuplicateNode(NodeId(1))
    );

    let edges = NetworkDescription::default()
        .node(1, 0.0, 0.0)
        .node(2, 0.1, 0.0)
        .edge(EdgeRecord::new(3, 1, 2))
        .edge(EdgeRecord::new(3, 2, 1));
    assert_eq!(
        RoadNetwork::new(edges, Directionality::Directed).unwrap_err(),
        NetworkError::DuplicateEdge(EdgeId(3))
    );
}

#[test]
fn rejects_degenerate_geometry() {
    let description = NetworkDescription::default()
        .node(1, 0.0, 0.0)
        .node(2, 0.1, 0.0)
        .edge(EdgeRecord::new(3, 1, 2).with_geometry(vec![(0.0, 0.0)]));

    assert_eq!(
        RoadNetwork::new(description, Directionality::Directed).unwrap_err(),
        NetworkError::DegenerateGeometry(EdgeId(3))
    );
}

#[test]
fn rejects_non_finite_node() {
    let description = NetworkDescription::default().node(1, f64::NAN, 0.0);
    assert!(matches!(
        RoadNetwork::new(description, Directionality::Directed),
        Err(NetworkError::NonFiniteCoordinate(_))
    ));
}

#[test]
fn directionality_controls_successors() {
    let directed = crossing(Directionality::Directed);
    let undirected = crossing(Directionality::Undirected);

    // Node index 0 is the crossing, 1 is the western end.
    let forward = |network: &RoadNetwork, node| {
        let mut next = network
            .successors(node)
            .map(|(next, _, _)| next)
            .collect::<Vec<_>>();
        next.sort();
        next
    };

    assert_eq!(forward(&directed, 0), vec![2, 4]);
    assert_eq!(forward(&directed, 1), vec![0]);
    assert_eq!(forward(&undirected, 0), vec![1, 2, 3, 4]);
}

#[test]
fn bounds_enlarge_by_distance() {
    let bounds = Bounds::around(&[point(0.0, 0.0), point(100.0, 50.0)]).expect("non-empty");
    assert!(bounds.contains(&point(50.0, 25.0)));
    assert!(!bounds.contains(&point(50.0, 80.0)));

    let enlarged = bounds.enlarge(300.0);
    assert!(enlarged.contains(&point(50.0, 340.0)));
    assert!(enlarged.contains(&point(-290.0, -290.0)));
    assert!(!enlarged.contains(&point(50.0, 400.0)));
    assert!(!enlarged.contains(&point(450.0, 0.0)));
}

#[test]
fn bounds_of_nothing() {
    assert!(Bounds::around(&Vec::<Point>::new()).is_none());
}

#[test]
fn clip_keeps_intersecting_edges() {
    let network = crossing(Directionality::Undirected);
    let bounds = Bounds::around(&[point(150.0, 0.0)])
        .expect("non-empty")
        .enlarge(10.0);

    let view = network.clip(&bounds);
    let clipped = view
        .edges()
        .map(|(_, edge)| edge.id)
        .collect::<Vec<_>>();

    assert_eq!(clipped, vec![EdgeId(2)]);
    assert!(view.contains(1));
    assert!(!view.contains(0));
}

#[test]
fn clip_tests_geometry_within_envelope() {
    let corner = at(200.0, 200.0);
    let description = NetworkDescription::default()
        .node(1, 0.0, 0.0)
        .node(2, corner.0, corner.1)
        .node(3, at(0.0, 20.0).0, at(0.0, 20.0).1)
        .node(4, at(200.0, 20.0).0, at(200.0, 20.0).1)
        .edge(EdgeRecord::new(10, 1, 2))
        .edge(EdgeRecord::new(20, 3, 4));
    let network =
        RoadNetwork::new(description, Directionality::Directed).expect("network must build");

    assert_eq!(network.index_edge().size(), 2);

    // Inside the envelope of the diagonal, but far from its geometry.
    let bounds = Bounds::around(&[point(180.0, 20.0)])
        .expect("non-empty")
        .enlarge(5.0);
    let clipped = network
        .clip(&bounds)
        .edges()
        .map(|(_, edge)| edge.id)
        .collect::<Vec<_>>();

    assert_eq!(clipped, vec![EdgeId(20)]);
}

#[test]
fn clip_orders_edges_by_index() {
    let network = crossing(Directionality::Directed);
    let bounds = Bounds::around(&[point(0.0, 0.0)])
        .expect("non-empty")
        .enlarge(10.0);

    let view = network.clip(&bounds);
    let clipped = view.edges().map(|(index, _)| index).collect::<Vec<_>>();

    assert_eq!(clipped, vec![0, 1, 2, 3]);
}

#[test]
fn clip_far_away_is_empty() {
    let network = straight_road();
    let bounds = Bounds::around(&[Point::new(10.0, 10.0)])
        .expect("non-empty")
        .enlarge(300.0);

    assert!(network.clip(&bounds).is_empty());
}

#[test]
fn densify_samples_every_spacing() {
    let network = straight_road();
    let edge = network.edge(0).expect("edge must exist");

    let points = densify_edge(0, edge, 30.0);
    assert_eq!(points.len(), 8);

    let offsets = points.iter().map(|p| p.offset).collect::<Vec<_>>();
    assert!(offsets.windows(2).all(|pair| pair[0] < pair[1]));
    assert_relative_eq!(offsets[1], 30.0, epsilon = 1e-6);
    assert_relative_eq!(offsets[7], 200.0, epsilon = 1e-6);

    let (lon, _) = at(90.0, 0.0);
    assert_relative_eq!(points[3].position.x(), lon, max_relative = 1e-9);
    assert_relative_eq!(points[3].position.y(), 0.0, epsilon = 1e-12);
}

#[test]
fn densify_keeps_inner_vertices() {
    let (a, b, c) = (at(0.0, 0.0), at(50.0, 0.0), at(50.0, 50.0));
    let description = NetworkDescription::default()
        .node(1, a.0, a.1)
        .node(2, c.0, c.1)
        .edge(EdgeRecord::new(1, 1, 2).with_geometry(vec![a, b, c]));
    let network =
        RoadNetwork::new(description, Directionality::Directed).expect("network must build");

    let points = densify_edge(0, network.edge(0).expect("edge must exist"), 40.0);
    let offsets = points.iter().map(|p| p.offset.round()).collect::<Vec<_>>();

    assert_eq!(offsets, vec![0.0, 40.0, 50.0, 90.0, 100.0]);
}

#[test]
fn densify_view_covers_clipped_edges() {
    let network = crossing(Directionality::Undirected);
    let view = NetworkView::full(&network);

    let points = densify(&view, 50.0);
    // Five reference points per 200m edge
    assert_eq!(points.len(), 20);
    assert!((0..4).all(|edge| points.iter().filter(|p| p.edge == edge).count() == 5));
}
