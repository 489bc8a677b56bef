//! The immutable road network a trajectory is matched onto.
//!
//! Nodes and edges live in an arena and are addressed by their
//! integer indices ([`NodeIx`], [`EdgeIx`]). The external identifiers
//! given by the map provider ([`NodeId`], [`EdgeId`]) are only used
//! at the boundary, on construction and in match results.
//!
//! The network is never mutated once built. It can therefore be
//! shared by reference across threads matching independent
//! trajectories, without any locking.

#[doc(hidden)]
pub mod clip;
#[doc(hidden)]
pub mod densify;
#[doc(hidden)]
pub mod description;
#[cfg(test)]
mod test;

#[doc(inline)]
pub use clip::{Bounds, NetworkView};
#[doc(inline)]
pub use densify::ReferencePoint;
#[doc(inline)]
pub use description::{EdgeRecord, NetworkDescription, NodeRecord};

use geo::{BoundingRect, Distance, Haversine, LineString, Point};
use log::{debug, info};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use rstar::primitives::{GeomWithData, Rectangle};
use rstar::{RTree, AABB};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Debug, Formatter};

use crate::error::NetworkError;

pub type NodeIx = usize;
pub type EdgeIx = usize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(pub u64);

/// Whether edges may be travelled against their `fromNode -> toNode` direction.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, strum::Display,
)]
#[strum(serialize_all = "lowercase")]
pub enum Directionality {
    /// Edges are one-way. Two-way roads must be given as two edges.
    #[default]
    Directed,
    /// Every edge is travelled in both directions.
    Undirected,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoadNode {
    pub id: NodeId,
    pub position: Point,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RoadEdge {
    pub id: EdgeId,
    pub source: NodeIx,
    pub target: NodeIx,
    pub geometry: LineString,
    pub way_id: Option<u64>,
    pub tags: BTreeMap<String, String>,

    /// Haversine length of the geometry, in meters.
    pub length: f64,
}

impl RoadEdge {
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }
}

/// The bounding envelope of an edge geometry, tagged with its index.
pub type EdgeEnvelope = GeomWithData<Rectangle<Point>, EdgeIx>;

pub struct RoadNetwork {
    nodes: Vec<RoadNode>,
    edges: Vec<RoadEdge>,
    directionality: Directionality,

    /// Adjacency used for routing. Node weights are arena indices,
    /// edge weights the [`EdgeIx`] travelled. Undirected edges are
    /// inserted once per direction.
    graph: DiGraph<NodeIx, EdgeIx>,

    /// Envelopes of every edge geometry, queried when clipping.
    index_edge: RTree<EdgeEnvelope>,

    lookup: FxHashMap<EdgeId, EdgeIx>,
}

impl Debug for RoadNetwork {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "RoadNetwork {{ nodes: {}, edges: {}, {} }}",
            self.nodes.len(),
            self.edges.len(),
            self.directionality
        )
    }
}

/// Haversine length of a linestring, in meters.
pub(crate) fn haversine_length(line: &LineString) -> f64 {
    line.points()
        .zip(line.points().skip(1))
        .map(|(a, b)| Haversine.distance(a, b))
        .sum()
}

fn finite(lon: f64, lat: f64) -> bool {
    lon.is_finite() && lat.is_finite()
}

impl RoadNetwork {
    /// An empty network. Every observation matched against it is unmatched.
    pub fn empty() -> Self {
        Self {
            nodes: vec![],
            edges: vec![],
            directionality: Directionality::default(),
            graph: DiGraph::new(),
            index_edge: RTree::new(),
            lookup: FxHashMap::default(),
        }
    }

    /// Builds the network arena from the description of the map provider.
    pub fn new(
        description: NetworkDescription,
        directionality: Directionality,
    ) -> Result<Self, NetworkError> {
        let mut graph = DiGraph::with_capacity(description.nodes.len(), description.edges.len());
        let mut node_lookup = FxHashMap::<NodeId, NodeIx>::default();

        let nodes = description
            .nodes
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                if !finite(record.lon, record.lat) {
                    return Err(NetworkError::NonFiniteCoordinate(format!(
                        "node {:?}",
                        record.id
                    )));
                }

                if node_lookup.insert(record.id, index).is_some() {
                    return Err(NetworkError::DuplicateNode(record.id));
                }

                // Arena index and graph index are kept equal.
                graph.add_node(index);
                Ok(RoadNode {
                    id: record.id,
                    position: Point::new(record.lon, record.lat),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut lookup = FxHashMap::<EdgeId, EdgeIx>::default();
        let mut edges = Vec::with_capacity(description.edges.len());

        for record in description.edges {
            let resolve = |node: NodeId| {
                node_lookup
                    .get(&node)
                    .copied()
                    .ok_or(NetworkError::UnknownNode {
                        edge: record.id,
                        node,
                    })
            };

            let source = resolve(record.from_node)?;
            let target = resolve(record.to_node)?;

            let geometry = match record.geometry.len() {
                0 => LineString::from(vec![nodes[source].position.0, nodes[target].position.0]),
                1 => return Err(NetworkError::DegenerateGeometry(record.id)),
                _ => {
                    if record.geometry.iter().any(|(lon, lat)| !finite(*lon, *lat)) {
                        return Err(NetworkError::NonFiniteCoordinate(format!(
                            "edge {:?}",
                            record.id
                        )));
                    }
                    LineString::from(record.geometry)
                }
            };

            let index = edges.len();
            if lookup.insert(record.id, index).is_some() {
                return Err(NetworkError::DuplicateEdge(record.id));
            }

            graph.add_edge(NodeIndex::new(source), NodeIndex::new(target), index);
            if directionality == Directionality::Undirected && source != target {
                graph.add_edge(NodeIndex::new(target), NodeIndex::new(source), index);
            }

            let length = haversine_length(&geometry);
            edges.push(RoadEdge {
                id: record.id,
                source,
                target,
                geometry,
                way_id: record.way_id,
                tags: record.tags,
                length,
            });
        }

        let index_edge = RTree::bulk_load(
            edges
                .iter()
                .enumerate()
                .filter_map(|(index, edge)| {
                    let rect = edge.geometry.bounding_rect()?;
                    let envelope =
                        AABB::from_corners(Point::from(rect.min()), Point::from(rect.max()));
                    Some(EdgeEnvelope::new(Rectangle::from(envelope), index))
                })
                .collect(),
        );

        info!(
            "Built {} road network with {} nodes and {} edges",
            directionality,
            nodes.len(),
            edges.len()
        );

        Ok(Self {
            nodes,
            edges,
            directionality,
            graph,
            index_edge,
            lookup,
        })
    }

    pub fn directionality(&self) -> Directionality {
        self.directionality
    }

    pub fn node(&self, index: NodeIx) -> Option<&RoadNode> {
        self.nodes.get(index)
    }

    pub fn edge(&self, index: EdgeIx) -> Option<&RoadEdge> {
        self.edges.get(index)
    }

    /// Resolves an external edge identifier to its arena index.
    pub fn edge_index(&self, id: EdgeId) -> Option<EdgeIx> {
        self.lookup.get(&id).copied()
    }

    pub fn edge_by_id(&self, id: EdgeId) -> Option<&RoadEdge> {
        self.edge_index(id).and_then(|index| self.edges.get(index))
    }

    pub fn edges(&self) -> impl Iterator<Item = (EdgeIx, &RoadEdge)> {
        self.edges.iter().enumerate()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn index_edge(&self) -> &RTree<EdgeEnvelope> {
        &self.index_edge
    }

    /// All edges leaving `node` in the travel direction, as
    /// `(next node, edge travelled, length of the edge)`.
    pub fn successors(&self, node: NodeIx) -> impl Iterator<Item = (NodeIx, EdgeIx, f64)> + '_ {
        self.graph
            .edges_directed(NodeIndex::new(node), Direction::Outgoing)
            .filter_map(|edge| {
                let index = *edge.weight();
                let length = self.edges.get(index)?.length;
                Some((edge.target().index(), index, length))
            })
    }

    /// Returns a read-only view of the edges intersecting `bounds`.
    pub fn clip(&self, bounds: &Bounds) -> NetworkView<'_> {
        let view = NetworkView::new(self, bounds);
        debug!(
            "Clipped {} of {} edges into {:?}",
            view.len(),
            self.edges.len(),
            bounds
        );
        view
    }
}
