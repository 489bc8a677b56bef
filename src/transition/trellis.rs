use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;

use crate::transition::*;

/// A node of the [`Trellis`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TrellisNode {
    /// Virtual node preceding the first layer.
    Start,

    /// The `candidate`-th candidate of the `layer`-th layer.
    Candidate { layer: usize, candidate: usize },

    /// Virtual node following the last layer.
    Target,
}

/// The layered decision graph decoded by a [`Solver`].
///
/// Every candidate of a layer is connected to every candidate of the
/// following layer. A virtual start node is connected to the first
/// layer, and the last layer to a virtual target node, so that every
/// path from start to target picks exactly one candidate per layer.
#[derive(Clone, Debug)]
pub struct Trellis {
    pub(crate) graph: DiGraph<TrellisNode, ()>,
    layers: Layers,

    /// Graph nodes of every layer, by local candidate index.
    nodes: Vec<Vec<NodeIndex>>,

    start: NodeIndex,
    target: NodeIndex,
}

impl Trellis {
    pub fn new(layers: Layers) -> Self {
        let mut graph = DiGraph::with_capacity(
            layers.iter().map(|layer| layer.candidates.len()).sum::<usize>() + 2,
            0,
        );

        let start = graph.add_node(TrellisNode::Start);
        let nodes = layers
            .iter()
            .enumerate()
            .map(|(layer, entries)| {
                (0..entries.candidates.len())
                    .map(|candidate| graph.add_node(TrellisNode::Candidate { layer, candidate }))
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();
        let target = graph.add_node(TrellisNode::Target);

        let mut trellis = Self {
            graph,
            layers,
            nodes,
            start,
            target,
        };

        trellis.weave();
        trellis.attach_ends();
        trellis
    }

    /// Binds the first and last layers to the virtual start and target.
    ///
    /// ```text
    ///                   Layer     Layer
    ///                     0         N
    ///
    ///               __/---+   ...   +---\__
    ///              /                       \
    ///    START    +-------+   ...   +-------+  TARGET
    ///              \                       /
    ///               ‾‾\---+   ...   +---/‾‾
    /// ```
    ///
    /// Without any layer, start is bound to target directly.
    fn attach_ends(&mut self) {
        let (start, target) = (self.start, self.target);

        match (self.nodes.first(), self.nodes.last()) {
            (Some(first), Some(last)) => {
                for node in first {
                    self.graph.add_edge(start, *node, ());
                }
                for node in last {
                    self.graph.add_edge(*node, target, ());
                }
            }
            _ => {
                self.graph.add_edge(start, target, ());
            }
        }
    }

    /// Fully connects every pair of consecutive layers.
    fn weave(&mut self) {
        for pair in self.nodes.windows(2) {
            if let [source, target] = pair {
                for a in source {
                    for b in target {
                        self.graph.add_edge(*a, *b, ());
                    }
                }
            }
        }
    }

    pub fn start(&self) -> NodeIndex {
        self.start
    }

    pub fn target(&self) -> NodeIndex {
        self.target
    }

    pub fn layers(&self) -> &Layers {
        &self.layers
    }

    /// The graph nodes of `layer`, by local candidate index.
    pub fn layer_nodes(&self, layer: usize) -> &[NodeIndex] {
        self.nodes.get(layer).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn node(&self, index: NodeIndex) -> Option<TrellisNode> {
        self.graph.node_weight(index).copied()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// The candidate behind a graph node, `None` for start and target.
    pub fn candidate(&self, index: NodeIndex) -> Option<&Candidate> {
        match self.node(index)? {
            TrellisNode::Candidate { layer, candidate } => {
                self.layers.get(layer)?.candidates.get(candidate)
            }
            _ => None,
        }
    }

    /// The nodes with an edge into `index`, in ascending node order.
    ///
    /// Nodes of a layer are added in local candidate order, so this is
    /// also ascending local candidate order.
    pub fn predecessors(&self, index: NodeIndex) -> Vec<NodeIndex> {
        let mut predecessors = self
            .graph
            .neighbors_directed(index, Direction::Incoming)
            .collect::<Vec<_>>();
        predecessors.sort();
        predecessors
    }

    /// Whether there is nothing to decode.
    pub fn is_degenerate(&self) -> bool {
        self.layers.is_empty()
    }
}
