use itertools::Itertools;
use log::{debug, info};
use petgraph::graph::NodeIndex;

use crate::transition::*;

/// The most probable path through a [`Trellis`].
///
/// Holds the candidate nodes of the path, one per layer, in
/// trajectory order. Start and target are not part of it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Collapse {
    /// Cumulative log-probability of the path.
    pub score: f64,
    pub route: Vec<NodeIndex>,
}

impl Collapse {
    /// Follows the predecessor chain from the target back to the start.
    pub fn backtrack(trellis: &Trellis, states: &[ViterbiState]) -> Self {
        let (start, target) = (trellis.start(), trellis.target());
        let score = states
            .get(target.index())
            .map_or(f64::NEG_INFINITY, |state| state.score);

        let mut route = Vec::with_capacity(trellis.layers().len());
        let mut cursor = states
            .get(target.index())
            .and_then(|state| state.predecessor);

        while let Some(node) = cursor {
            // Every step moves back at least one layer, so a longer chain cannot be genuine.
            if node == start || route.len() > trellis.layers().len() {
                break;
            }

            route.push(node);
            cursor = states.get(node.index()).and_then(|state| state.predecessor);
        }

        route.reverse();
        Collapse { score, route }
    }

    /// The candidates chosen along the path, in trajectory order.
    pub fn candidates<'t>(
        &'t self,
        trellis: &'t Trellis,
    ) -> impl Iterator<Item = &'t Candidate> + 't {
        self.route
            .iter()
            .filter_map(move |node| trellis.candidate(*node))
    }

    /// One result per observation of the `transition`, in sequence order.
    ///
    /// Observations with a candidate on the path are matched to the
    /// edge of that candidate, all others are unmatched.
    pub fn results<E, T>(&self, transition: &Transition<E, T>) -> Vec<MatchResult>
    where
        E: EmissionStrategy,
        T: TransitionStrategy,
    {
        let network = transition.view.network();
        let config = transition.config;

        let mut chosen: Vec<Option<&Candidate>> = vec![None; transition.observations.len()];
        for candidate in self.candidates(&transition.trellis) {
            if let Some(slot) = chosen.get_mut(candidate.observation) {
                *slot = Some(candidate);
            }
        }

        let results = transition
            .observations
            .iter()
            .zip(chosen)
            .map(|(observation, candidate)| match candidate {
                Some(candidate) => MatchResult::Matched {
                    observation: *observation,
                    edge_id: candidate.edge_id,
                    projected: config
                        .keep_projected_coordinates
                        .then_some(candidate.position),
                    distance: candidate.distance,
                    road: config
                        .road_info
                        .then(|| network.edge(candidate.edge).map(RoadInfo::of))
                        .flatten(),
                },
                None => MatchResult::Unmatched {
                    observation: *observation,
                },
            })
            .collect::<Vec<_>>();

        let matched = results.iter().filter(|result| result.is_matched()).count();
        info!(
            "Matched {matched} of {} observations onto {} distinct edges",
            results.len(),
            self.distinct_edges(&transition.trellis)
        );
        debug!("Path score: {}", self.score);

        results
    }

    fn distinct_edges(&self, trellis: &Trellis) -> usize {
        self.candidates(trellis)
            .map(|candidate| candidate.edge)
            .unique()
            .count()
    }
}
