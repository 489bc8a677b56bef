use geo::Point;
use log::debug;

use crate::transition::*;

/// The candidates of a single observation.
#[derive(Clone, Debug)]
pub struct Layer {
    /// Sequence index of the observation.
    pub observation: usize,

    /// The observed position.
    pub origin: Point,

    /// Never empty, observations without candidates have no layer.
    pub candidates: Vec<Candidate>,
}

/// The layers of a trajectory, in trajectory order.
///
/// Observations without any candidate are left out, so two consecutive
/// layers may belong to observations which are not consecutive. The
/// observations in between form a gap, bridged by the transition
/// between the two layers.
#[derive(Clone, Debug, Default)]
pub struct Layers {
    pub layers: Vec<Layer>,
}

impl Layers {
    /// Pairs every observation with its candidates, skipping those without any.
    pub fn new(observations: &[Observation], candidates: Vec<Vec<Candidate>>) -> Self {
        let layers = observations
            .iter()
            .zip(candidates)
            .filter(|(_, candidates)| !candidates.is_empty())
            .map(|(observation, candidates)| Layer {
                observation: observation.index,
                origin: observation.position,
                candidates,
            })
            .collect::<Vec<_>>();

        debug!(
            "Built {} layers for {} observations",
            layers.len(),
            observations.len()
        );

        Self { layers }
    }

    pub fn first(&self) -> Option<&Layer> {
        self.layers.first()
    }

    pub fn last(&self) -> Option<&Layer> {
        self.layers.last()
    }

    pub fn get(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter()
    }
}
