use geo::{Distance, Haversine};
use log::{debug, warn};
use measure_time::debug_time;
use petgraph::graph::NodeIndex;

use crate::config::MatchConfig;
use crate::network::NetworkView;
use crate::route::NetworkRouter;
use crate::transition::*;

/// The best score of a trellis node, and the node it was reached from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViterbiState {
    /// Cumulative log-probability of the best path ending at the node.
    pub score: f64,
    pub predecessor: Option<NodeIndex>,
}

impl ViterbiState {
    pub const UNREACHED: ViterbiState = ViterbiState {
        score: f64::NEG_INFINITY,
        predecessor: None,
    };

    pub fn is_reached(&self) -> bool {
        self.score.is_finite()
    }
}

/// Maximum-likelihood decoding of the trellis, layer by layer.
///
/// ```math
/// score(n) = max_p(score(p) + transition(p, n)) + emission(n)
/// ```
///
/// The first layer is entered from the start node with its emission
/// score alone, and the target takes the best score of the last layer.
/// Predecessors are scanned in ascending candidate order and only a
/// strictly greater score replaces the best so far, so exact ties go
/// to the lowest-indexed candidate.
///
/// Routes between two candidates are only explored up to a bound,
/// proportional to the displacement between their observations. A
/// candidate unreachable within the bound is scored as though the
/// bound was its network distance.
///
/// A pair the strategies score as impossible (non-finite) is never
/// chained. Should no candidate of a layer be reached, the layer
/// starts a new segment: its candidates are entered from the best
/// node of the last reached layer with their emission score alone,
/// so the matches before the break are kept.
#[derive(Clone, Copy, Debug)]
pub struct ViterbiDecoder {
    pub max_detour_factor: f64,
    pub search_radius: f64,
    pub reference_spacing: f64,
}

impl ViterbiDecoder {
    pub fn from_config(config: &MatchConfig) -> Self {
        Self {
            max_detour_factor: config.max_detour_factor,
            search_radius: config.candidate_search_radius_meters,
            reference_spacing: config.reference_point_spacing_meters,
        }
    }

    /// The longest route (in meters) explored between candidates of two
    /// observations `great_circle` meters apart.
    ///
    /// Each candidate may lie up to the search radius away from its
    /// observation, and up to half the reference spacing away from where
    /// its observation actually projects.
    pub fn route_bound(&self, great_circle: f64) -> f64 {
        (great_circle + 2.0 * self.search_radius) * self.max_detour_factor
            + self.reference_spacing
    }

    /// The state of every trellis node, indexed by node.
    pub fn decode<E, T>(
        &self,
        trellis: &Trellis,
        view: &NetworkView,
        heuristics: &CostingStrategies<E, T>,
    ) -> Vec<ViterbiState>
    where
        E: EmissionStrategy,
        T: TransitionStrategy,
    {
        debug_time!("ViterbiDecoder::decode");

        let mut router = NetworkRouter::new(view);
        let mut states = vec![ViterbiState::UNREACHED; trellis.node_count()];
        states[trellis.start().index()] = ViterbiState {
            score: 0.0,
            predecessor: None,
        };

        // Best reached node of the last layer with any reached node.
        let mut anchor = (0.0, trellis.start());

        let layers = trellis.layers();
        for (index, layer) in layers.iter().enumerate() {
            let previous = index.checked_sub(1).and_then(|index| layers.get(index));
            let (great_circle, bound) = previous.map_or((0.0, 0.0), |previous| {
                let great_circle = Haversine.distance(previous.origin, layer.origin);
                (great_circle, self.route_bound(great_circle))
            });

            if let Some(previous) = previous {
                let skipped = layer.observation - previous.observation - 1;
                if skipped > 0 {
                    debug!(
                        "Bridging {skipped} unmatched observations before observation {}",
                        layer.observation
                    );
                }
            }

            for node in trellis.layer_nodes(index) {
                let Some(candidate) = trellis.candidate(*node) else {
                    continue;
                };

                let best = best_predecessor(trellis, &states, *node, |predecessor| {
                    trellis.candidate(predecessor).map_or(0.0, |source| {
                        let routed =
                            router.distance(&source.location(), &candidate.location(), bound);

                        heuristics.transition(TransitionContext {
                            source_candidate: source,
                            target_candidate: candidate,
                            great_circle_distance: great_circle,
                            network_distance: routed.unwrap_or(bound),
                            reachable: routed.is_some(),
                        })
                    })
                });

                if let Some((score, predecessor)) = best {
                    states[node.index()] = ViterbiState {
                        score: score + candidate.emission,
                        predecessor: Some(predecessor),
                    };
                }
            }

            if index > 0 && best_reached(&states, trellis.layer_nodes(index)).is_none() {
                warn!(
                    "No candidate of observation {} is reachable, starting a new segment",
                    layer.observation
                );
                restart(trellis, &mut states, index, anchor);
            }

            if let Some(reached) = best_reached(&states, trellis.layer_nodes(index)) {
                anchor = reached;
            }
        }

        let target = trellis.target();
        let best = best_predecessor(trellis, &states, target, |_| 0.0)
            .or_else(|| (anchor.1 != trellis.start()).then_some(anchor));
        if let Some((score, predecessor)) = best {
            states[target.index()] = ViterbiState {
                score,
                predecessor: Some(predecessor),
            };
        }

        debug!(
            "Decoded {} layers with score {}, routing explored from {} nodes",
            layers.len(),
            states[target.index()].score,
            router.explored()
        );

        states
    }
}

/// Enters every candidate of the `layer`-th layer from `anchor`,
/// scored by emission alone.
fn restart(
    trellis: &Trellis,
    states: &mut [ViterbiState],
    layer: usize,
    (score, anchor): (f64, NodeIndex),
) {
    for node in trellis.layer_nodes(layer) {
        let Some(candidate) = trellis.candidate(*node) else {
            continue;
        };

        states[node.index()] = ViterbiState {
            score: score + candidate.emission,
            predecessor: Some(anchor),
        };
    }
}

/// The reached node of `nodes` with the greatest score, the first on ties.
fn best_reached(states: &[ViterbiState], nodes: &[NodeIndex]) -> Option<(f64, NodeIndex)> {
    nodes
        .iter()
        .map(|node| (states[node.index()], *node))
        .filter(|(state, _)| state.is_reached())
        .fold(None, |best, (state, node)| match best {
            Some((score, _)) if state.score <= score => best,
            _ => Some((state.score, node)),
        })
}

/// The reached predecessor of `node` with the greatest score, once the
/// `transition` into `node` is added to it.
fn best_predecessor(
    trellis: &Trellis,
    states: &[ViterbiState],
    node: NodeIndex,
    mut transition: impl FnMut(NodeIndex) -> f64,
) -> Option<(f64, NodeIndex)> {
    let mut best: Option<(f64, NodeIndex)> = None;

    for predecessor in trellis.predecessors(node) {
        let state = states[predecessor.index()];
        if !state.is_reached() {
            continue;
        }

        let score = state.score + transition(predecessor);
        if score.is_finite() && best.map_or(true, |(best, _)| score > best) {
            best = Some((score, predecessor));
        }
    }

    best
}

impl Solver for ViterbiDecoder {
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
    fn solve<E, T>(&self, transition: &Transition<E, T>) -> Collapse
    where
        E: EmissionStrategy + Send + Sync,
        T: TransitionStrategy + Send + Sync,
    {
        let states = self.decode(&transition.trellis, transition.view, transition.heuristics);
        Collapse::backtrack(&transition.trellis, &states)
    }
}
