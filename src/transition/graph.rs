use log::info;
use measure_time::debug_time;
#[cfg(feature = "tracing")]
use tracing::Level;

use crate::config::MatchConfig;
use crate::index::SpatialIndex;
use crate::network::NetworkView;
use crate::transition::*;

/// The hidden Markov model of a single trajectory over a network view.
///
/// Generates the candidates of every observation on construction and
/// lays them out in a [`Trellis`]. A [`Solver`] then picks the most
/// probable candidate path, which is collapsed into one
/// [`MatchResult`] per observation.
pub struct Transition<'a, E, T>
where
    E: EmissionStrategy,
    T: TransitionStrategy,
{
    pub(crate) view: &'a NetworkView<'a>,
    pub(crate) heuristics: &'a CostingStrategies<E, T>,
    pub(crate) config: &'a MatchConfig,

    pub(crate) observations: Vec<Observation>,
    pub(crate) trellis: Trellis,
}

impl<'a, E, T> Transition<'a, E, T>
where
    E: EmissionStrategy + Send + Sync,
    T: TransitionStrategy + Send + Sync,
{
    #[cfg_attr(feature = "tracing", tracing::instrument(level = Level::INFO, skip_all))]
    pub fn new(
        view: &'a NetworkView<'a>,
        index: &'a SpatialIndex,
        observations: Vec<Observation>,
        heuristics: &'a CostingStrategies<E, T>,
        config: &'a MatchConfig,
    ) -> Self {
        debug_time!("Transition::new");

        let generator = CandidateGenerator::new(
            view.network(),
            index,
            heuristics,
            config.candidate_search_radius_meters,
        );

        let candidates = generator.generate(&observations);
        let layers = Layers::new(&observations, candidates);
        let trellis = Trellis::new(layers);

        info!(
            "Trellis of {} layers over {} observations",
            trellis.layers().len(),
            observations.len()
        );

        Transition {
            view,
            heuristics,
            config,
            observations,
            trellis,
        }
    }

    /// Decodes the most probable candidate path using the given `solver`.
    pub fn solve(&self, solver: impl Solver) -> Collapse {
        solver.solve(self)
    }

    /// Decodes using `solver` and collapses the path into results.
    pub fn results(&self, solver: impl Solver) -> Vec<MatchResult> {
        self.solve(solver).results(self)
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn trellis(&self) -> &Trellis {
        &self.trellis
    }

    /// Whether no observation has any candidate.
    pub fn is_degenerate(&self) -> bool {
        self.trellis.is_degenerate()
    }
}
