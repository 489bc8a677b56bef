use std::f64::consts::TAU;

use geo::Point;

use crate::config::DEFAULT_EMISSION_SIGMA;
use crate::transition::Strategy;

pub trait EmissionStrategy: for<'a> Strategy<EmissionContext<'a>> {}
impl<T> EmissionStrategy for T where T: for<'a> Strategy<EmissionContext<'a>> {}

#[derive(Clone, Copy, Debug)]
pub struct EmissionContext<'a> {
    /// The proposed (candidate) position to be matched onto.
    ///
    /// This belongs to the network, and is not provided
    /// as input to the match query.
    pub candidate_position: &'a Point,

    /// The observed position being matched.
    pub source_position: &'a Point,

    /// The distance (in meters) between the source and candidate positions using [`geo::Haversine`].
    ///
    /// Note: This is given as it is already known by the candidate search,
    /// so it is not calculated twice.
    pub distance: f64,
}

impl<'a> EmissionContext<'a> {
    pub fn new(candidate: &'a Point, source: &'a Point, distance: f64) -> Self {
        Self {
            candidate_position: candidate,
            source_position: source,
            distance,
        }
    }
}

/// Zero-mean Gaussian measurement noise.
///
/// ```math
/// emission(d) = ln(1 / (√(2π) σ)) - ½ (d / σ)²
/// ```
#[derive(Clone, Copy, Debug)]
pub struct GaussianEmission {
    sigma: f64,
    normaliser: f64,
}

impl GaussianEmission {
    pub fn new(sigma: f64) -> Self {
        Self {
            sigma,
            normaliser: -(TAU.sqrt() * sigma).ln(),
        }
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }
}

impl Default for GaussianEmission {
    fn default() -> Self {
        Self::new(DEFAULT_EMISSION_SIGMA)
    }
}

impl<'a> Strategy<EmissionContext<'a>> for GaussianEmission {
    #[inline]
    fn calculate(&self, context: EmissionContext<'a>) -> f64 {
        let normalised = context.distance / self.sigma;
        self.normaliser - 0.5 * normalised * normalised
    }
}
