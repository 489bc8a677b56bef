//! The entry point of a match: validates the trajectory, clips the
//! network around it, indexes the clipped edges, then decodes.
//!
//! ```rust
//! use roadmatch::{Directionality, EdgeRecord, MatchConfig, Matcher, NetworkDescription, RoadNetwork};
//!
//! let description = NetworkDescription::default()
//!     .node(1, 0.0, 0.0)
//!     .node(2, 0.002, 0.0)
//!     .edge(EdgeRecord::new(7, 1, 2));
//! let network = RoadNetwork::new(description, Directionality::Undirected)?;
//!
//! let matcher = Matcher::new(&network, MatchConfig::default())?;
//! let output = matcher.match_trajectory(&[(0.0005, 0.0001), (0.0012, -0.0001)])?;
//!
//! assert!(output.results.iter().all(|result| result.is_matched()));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use geo::LineString;
use log::{debug, info, log_enabled, warn, Level as LogLevel};
use measure_time::debug_time;
use rayon::prelude::*;
use wkt::ToWkt;
#[cfg(feature = "tracing")]
use tracing::Level;

use crate::config::MatchConfig;
use crate::error::{InputError, MatchError};
use crate::index::SpatialIndex;
use crate::network::densify::densify;
use crate::network::{Bounds, RoadNetwork};
use crate::transition::*;

/// How a trajectory came to its results.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
pub enum Outcome {
    /// The trellis was decoded. Individual observations may still be unmatched.
    Matched,

    /// No edge of the network lies near the trajectory.
    NoGraphCoverage,

    /// Edges lie near the trajectory, but no observation has a candidate.
    DecodeDegenerate,
}

/// The results of matching a trajectory, one per observation.
#[derive(Clone, Debug, PartialEq)]
pub struct MatchOutput {
    pub results: Vec<MatchResult>,
    pub outcome: Outcome,
}

impl MatchOutput {
    fn unmatched(observations: &[Observation], outcome: Outcome) -> Self {
        let results = observations
            .iter()
            .map(|observation| MatchResult::Unmatched {
                observation: *observation,
            })
            .collect();

        MatchOutput { results, outcome }
    }

    pub fn matched(&self) -> usize {
        self.results.iter().filter(|result| result.is_matched()).count()
    }

    pub fn records(&self) -> Vec<MatchRecord> {
        self.results.iter().map(MatchResult::record).collect()
    }
}

/// Matches trajectories onto a shared, read-only [`RoadNetwork`].
///
/// Each call clips and indexes the network afresh, so a single
/// matcher may be used from many threads at once.
#[derive(Debug)]
pub struct Matcher<'a, E = GaussianEmission, T = ExponentialTransition>
where
    E: EmissionStrategy,
    T: TransitionStrategy,
{
    network: &'a RoadNetwork,
    config: MatchConfig,
    heuristics: CostingStrategies<E, T>,
}

impl<'a> Matcher<'a> {
    /// A matcher scoring with the default strategies, parameterised by `config`.
    pub fn new(network: &'a RoadNetwork, config: MatchConfig) -> Result<Self, MatchError> {
        config.validate()?;

        Ok(Matcher {
            network,
            heuristics: CostingStrategies::from_config(&config),
            config,
        })
    }
}

impl<'a, E, T> Matcher<'a, E, T>
where
    E: EmissionStrategy + Send + Sync,
    T: TransitionStrategy + Send + Sync,
{
    /// Replaces the scoring strategies.
    pub fn with_costing<F, U>(self, heuristics: CostingStrategies<F, U>) -> Matcher<'a, F, U>
    where
        F: EmissionStrategy,
        U: TransitionStrategy,
    {
        Matcher {
            network: self.network,
            config: self.config,
            heuristics,
        }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn network(&self) -> &'a RoadNetwork {
        self.network
    }

    /// Matches a trajectory of `(lon, lat)` pairs, in degrees.
    ///
    /// Fails only when the trajectory itself is malformed. Observations
    /// which cannot be matched are reported as unmatched, in place.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = Level::INFO, skip_all))]
    pub fn match_trajectory(&self, trajectory: &[(f64, f64)]) -> Result<MatchOutput, MatchError> {
        debug_time!("Matcher::match_trajectory");

        let observations = Observation::sequence(trajectory)?;
        if log_enabled!(LogLevel::Debug) {
            let line = observations
                .iter()
                .map(|observation| observation.position)
                .collect::<LineString>();
            debug!("Matching trajectory {}", line.wkt_string());
        }

        let bounds = Bounds::around(observations.iter().map(|observation| &observation.position))
            .ok_or(InputError::EmptyTrajectory)?
            .enlarge(self.config.enlarge_distance_meters);

        let view = self.network.clip(&bounds);
        if view.is_empty() {
            warn!(
                "No edges within {}m of the trajectory's {} observations",
                self.config.enlarge_distance_meters,
                observations.len()
            );
            return Ok(MatchOutput::unmatched(&observations, Outcome::NoGraphCoverage));
        }

        let index = SpatialIndex::new(densify(
            &view,
            self.config.reference_point_spacing_meters,
        ));

        let transition = Transition::new(
            &view,
            &index,
            observations,
            &self.heuristics,
            &self.config,
        );

        if transition.is_degenerate() {
            warn!(
                "None of the {} observations lie within {}m of the network",
                transition.observations().len(),
                self.config.candidate_search_radius_meters
            );
            return Ok(MatchOutput::unmatched(
                transition.observations(),
                Outcome::DecodeDegenerate,
            ));
        }

        let results = transition.results(ViterbiDecoder::from_config(&self.config));
        Ok(MatchOutput {
            results,
            outcome: Outcome::Matched,
        })
    }

    /// Matches independent trajectories in parallel.
    ///
    /// Results are in the order of `trips`, and a malformed trip only
    /// fails its own entry.
    pub fn match_trips<Trip>(&self, trips: &[Trip]) -> Vec<Result<MatchOutput, MatchError>>
    where
        Trip: AsRef<[(f64, f64)]> + Sync,
    {
        debug_time!("Matcher::match_trips");

        let outputs = trips
            .par_iter()
            .map(|trip| self.match_trajectory(trip.as_ref()))
            .collect::<Vec<_>>();

        let failed = outputs.iter().filter(|output| output.is_err()).count();
        info!("Matched {} trips, {failed} failed", outputs.len());

        outputs
    }
}
