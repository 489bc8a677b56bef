use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::collections::hash_map::Entry;

use crate::network::{NetworkView, NodeIx};
use crate::route::Dijkstra;

/// Network distances from a single node, explored up to `bound` meters.
#[derive(Debug)]
pub struct Reach {
    pub bound: f64,
    pub distances: FxHashMap<NodeIx, f64>,
}

/// A read-through cache of upper-bounded Dijkstra explorations,
/// keyed by their starting node.
///
/// Consecutive layers of a trellis share most of their candidate
/// edges, so the same exit nodes are routed from many times within
/// one decode. An entry is only recalculated when a query asks for
/// a larger bound than the one it was explored with.
#[derive(Debug, Default)]
pub struct ReachCache {
    map: FxHashMap<NodeIx, Reach>,
}

impl ReachCache {
    pub fn query(&mut self, view: &NetworkView, node: NodeIx, bound: f64) -> &Reach {
        match self.map.entry(node) {
            Entry::Occupied(mut entry) => {
                if entry.get().bound < bound {
                    entry.insert(Self::calculate(view, node, bound));
                }
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(Self::calculate(view, node, bound)),
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    fn calculate(view: &NetworkView, node: NodeIx, bound: f64) -> Reach {
        let network = view.network();

        let successors = |node: &NodeIx| {
            network
                .successors(*node)
                .filter(|(_, edge, _)| view.contains(*edge))
                .map(|(next, _, length)| (next, length))
                .collect::<SmallVec<[(NodeIx, f64); 4]>>()
        };

        let distances = Dijkstra
            .reach(&node, successors)
            .take_while(|item| item.total_cost <= bound)
            .map(|item| (item.node, item.total_cost))
            .collect::<FxHashMap<_, _>>();

        Reach { bound, distances }
    }
}
