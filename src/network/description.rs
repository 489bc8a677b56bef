use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::network::{EdgeId, NodeId};

/// The road network as handed over by the graph-acquisition collaborator.
///
/// ```json
/// {
///   "nodes": [{ "id": 1, "lon": 151.19, "lat": -33.88 }],
///   "edges": [{ "id": 7, "fromNode": 1, "toNode": 2,
///               "geometry": [[151.19, -33.88], [151.20, -33.88]],
///               "wayId": 4411, "tags": { "highway": "primary" } }]
/// }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkDescription {
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: NodeId,
    pub lon: f64,
    pub lat: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeRecord {
    pub id: EdgeId,
    pub from_node: NodeId,
    pub to_node: NodeId,

    /// Ordered `(lon, lat)` pairs. When empty, the straight line
    /// between the two end nodes is used.
    #[serde(default)]
    pub geometry: Vec<(f64, f64)>,

    #[serde(default)]
    pub way_id: Option<u64>,

    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

impl NetworkDescription {
    pub fn node(mut self, id: u64, lon: f64, lat: f64) -> Self {
        self.nodes.push(NodeRecord {
            id: NodeId(id),
            lon,
            lat,
        });
        self
    }

    pub fn edge(mut self, record: EdgeRecord) -> Self {
        self.edges.push(record);
        self
    }
}

impl EdgeRecord {
    /// A straight edge between two nodes, without tags.
    pub fn new(id: u64, from_node: u64, to_node: u64) -> Self {
        Self {
            id: EdgeId(id),
            from_node: NodeId(from_node),
            to_node: NodeId(to_node),
            geometry: vec![],
            way_id: None,
            tags: BTreeMap::new(),
        }
    }

    pub fn with_geometry(self, geometry: Vec<(f64, f64)>) -> Self {
        Self { geometry, ..self }
    }

    pub fn with_way(self, way_id: u64) -> Self {
        Self {
            way_id: Some(way_id),
            ..self
        }
    }

    pub fn with_tag(mut self, key: &str, value: &str) -> Self {
        self.tags.insert(key.to_string(), value.to_string());
        self
    }
}
