use log::debug;
use measure_time::debug_time;
use rayon::prelude::*;

use crate::index::SpatialIndex;
use crate::network::{ReferencePoint, RoadNetwork};
use crate::transition::*;

/// Generates the candidates of every observation.
///
/// The spatial index is queried within `search_radius` meters of each
/// observation, and the reference points found are reduced to the
/// closest one per edge. The emission score of each candidate is
/// calculated here, since it need only be calculated once.
pub struct CandidateGenerator<'a, E, T>
where
    E: EmissionStrategy,
    T: TransitionStrategy,
{
    /// The radius (in meters) within which reference points become candidates.
    pub search_radius: f64,

    /// The costing heuristics required to score the candidates.
    pub heuristics: &'a CostingStrategies<E, T>,

    index: &'a SpatialIndex,
    network: &'a RoadNetwork,
}

impl<'a, E, T> CandidateGenerator<'a, E, T>
where
    E: EmissionStrategy + Send + Sync,
    T: TransitionStrategy + Send + Sync,
{
    pub fn new(
        network: &'a RoadNetwork,
        index: &'a SpatialIndex,
        heuristics: &'a CostingStrategies<E, T>,
        search_radius: f64,
    ) -> Self {
        CandidateGenerator {
            search_radius,
            heuristics,
            index,
            network,
        }
    }

    /// The candidates of every observation, in sequence order.
    ///
    /// Observations are handled in parallel, the generator only
    /// reads from the index and the network.
    pub fn generate(&self, observations: &[Observation]) -> Vec<Vec<Candidate>> {
        debug_time!("CandidateGenerator::generate");

        observations
            .par_iter()
            .map(|observation| self.candidates(observation))
            .collect()
    }

    /// The candidates of a single observation, ordered by distance and
    /// then by edge, so the position of a candidate within its layer is
    /// deterministic.
    pub fn candidates(&self, observation: &Observation) -> Vec<Candidate> {
        let mut nearby = self.index.within(&observation.position, self.search_radius);

        // Closest reference point first for every edge, ties to the smaller offset
        nearby.sort_by(|(a, a_distance), (b, b_distance)| {
            a.edge
                .cmp(&b.edge)
                .then(a_distance.total_cmp(b_distance))
                .then(a.offset.total_cmp(&b.offset))
        });
        nearby.dedup_by_key(|(reference, _)| reference.edge);

        let mut candidates = nearby
            .into_iter()
            .filter_map(|(reference, distance)| self.candidate(observation, reference, distance))
            .collect::<Vec<_>>();

        candidates.sort_by(|a, b| a.distance.total_cmp(&b.distance).then(a.edge.cmp(&b.edge)));

        if candidates.is_empty() {
            debug!(
                "No candidates within {}m of observation {}",
                self.search_radius, observation.index
            );
        }

        candidates
    }

    fn candidate(
        &self,
        observation: &Observation,
        reference: &ReferencePoint,
        distance: f64,
    ) -> Option<Candidate> {
        let edge = self.network.edge(reference.edge)?;
        let emission = self.heuristics.emission(EmissionContext::new(
            &reference.position,
            &observation.position,
            distance,
        ));

        Some(Candidate {
            observation: observation.index,
            edge: reference.edge,
            edge_id: edge.id,
            position: reference.position,
            offset: reference.offset,
            distance,
            emission,
        })
    }
}
