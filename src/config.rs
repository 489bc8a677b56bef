//! Options recognised by the [`Matcher`](crate::Matcher).
//!
//! Every option has a default, so a configuration may be deserialised from
//! a partial document:
//!
//! ```rust
//! use roadmatch::MatchConfig;
//!
//! let config = MatchConfig::default()
//!     .with_search_radius(50.0)
//!     .with_projected_coordinates(false);
//!
//! assert!(config.validate().is_ok());
//! ```
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Padding applied to the trajectory bounding box before clipping the network.
pub const DEFAULT_ENLARGE_DISTANCE: f64 = 300.0;

/// Spacing of the reference points interpolated along every edge.
pub const DEFAULT_REFERENCE_SPACING: f64 = 30.0;

/// Reference points are never interpolated closer together than this.
pub const MIN_REFERENCE_SPACING: f64 = 0.5;

/// Radius of the candidate search circle around each observation.
pub const DEFAULT_SEARCH_RADIUS: f64 = 30.0;

/// Standard deviation of GPS noise (Newson & Krumm, 2009).
pub const DEFAULT_EMISSION_SIGMA: f64 = 4.07;

/// Scale of the exponential distance-discrepancy distribution.
pub const DEFAULT_TRANSITION_BETA: f64 = 3.0;

/// Upper bound of the routed distance between two candidates,
/// relative to the displacement of their observations.
pub const DEFAULT_MAX_DETOUR_FACTOR: f64 = 8.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MatchConfig {
    pub enlarge_distance_meters: f64,
    pub reference_point_spacing_meters: f64,
    pub candidate_search_radius_meters: f64,
    pub emission_sigma_meters: f64,
    pub transition_beta_meters: f64,
    pub max_detour_factor: f64,

    /// Keeps the projected (matched) coordinate in every matched result.
    pub keep_projected_coordinates: bool,

    /// Attaches the way identifier and road tags of the matched edge.
    pub road_info: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            enlarge_distance_meters: DEFAULT_ENLARGE_DISTANCE,
            reference_point_spacing_meters: DEFAULT_REFERENCE_SPACING,
            candidate_search_radius_meters: DEFAULT_SEARCH_RADIUS,
            emission_sigma_meters: DEFAULT_EMISSION_SIGMA,
            transition_beta_meters: DEFAULT_TRANSITION_BETA,
            max_detour_factor: DEFAULT_MAX_DETOUR_FACTOR,
            keep_projected_coordinates: true,
            road_info: false,
        }
    }
}

impl MatchConfig {
    pub fn with_enlarge_distance(self, meters: f64) -> Self {
        Self {
            enlarge_distance_meters: meters,
            ..self
        }
    }

    pub fn with_reference_spacing(self, meters: f64) -> Self {
        Self {
            reference_point_spacing_meters: meters,
            ..self
        }
    }

    pub fn with_search_radius(self, meters: f64) -> Self {
        Self {
            candidate_search_radius_meters: meters,
            ..self
        }
    }

    pub fn with_emission_sigma(self, meters: f64) -> Self {
        Self {
            emission_sigma_meters: meters,
            ..self
        }
    }

    pub fn with_transition_beta(self, meters: f64) -> Self {
        Self {
            transition_beta_meters: meters,
            ..self
        }
    }

    pub fn with_max_detour_factor(self, factor: f64) -> Self {
        Self {
            max_detour_factor: factor,
            ..self
        }
    }

    pub fn with_projected_coordinates(self, keep: bool) -> Self {
        Self {
            keep_projected_coordinates: keep,
            ..self
        }
    }

    pub fn with_road_info(self, road_info: bool) -> Self {
        Self { road_info, ..self }
    }

    /// Checks every numeric option is usable.
    ///
    /// The enlarge distance may be zero (no padding), every other
    /// distance must be strictly positive. The reference spacing must
    /// be at least [`MIN_REFERENCE_SPACING`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            (
                "referencePointSpacingMeters",
                self.reference_point_spacing_meters,
            ),
            (
                "candidateSearchRadiusMeters",
                self.candidate_search_radius_meters,
            ),
            ("emissionSigmaMeters", self.emission_sigma_meters),
            ("transitionBetaMeters", self.transition_beta_meters),
        ];

        if let Some((option, value)) = positive
            .into_iter()
            .find(|(_, value)| !value.is_finite() || *value <= 0.0)
        {
            return Err(ConfigError::NonPositive { option, value });
        }

        if self.reference_point_spacing_meters < MIN_REFERENCE_SPACING {
            return Err(ConfigError::SpacingTooSmall(
                self.reference_point_spacing_meters,
            ));
        }

        if !self.enlarge_distance_meters.is_finite() || self.enlarge_distance_meters < 0.0 {
            return Err(ConfigError::NonPositive {
                option: "enlargeDistanceMeters",
                value: self.enlarge_distance_meters,
            });
        }

        if !(self.max_detour_factor >= 1.0 && self.max_detour_factor.is_finite()) {
            return Err(ConfigError::DetourFactorTooSmall(self.max_detour_factor));
        }

        Ok(())
    }
}
