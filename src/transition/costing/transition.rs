use crate::config::DEFAULT_TRANSITION_BETA;
use crate::transition::*;

pub trait TransitionStrategy: for<'a> Strategy<TransitionContext<'a>> {}
impl<T> TransitionStrategy for T where T: for<'a> Strategy<TransitionContext<'a>> {}

#[derive(Clone, Copy, Debug)]
pub struct TransitionContext<'a> {
    /// The candidate being left, in the earlier layer.
    pub source_candidate: &'a Candidate,

    /// The candidate being entered, in the following layer.
    pub target_candidate: &'a Candidate,

    /// Great-circle distance (in meters) between the two observations
    /// the candidates belong to.
    pub great_circle_distance: f64,

    /// Shortest distance (in meters) between the two candidates along the network.
    ///
    /// When the target cannot be reached within the route bound, this
    /// is the bound itself.
    pub network_distance: f64,

    /// Whether a route was found within the route bound.
    pub reachable: bool,
}

impl TransitionContext<'_> {
    /// The absolute difference between the routed and the straight-line distance.
    pub fn discrepancy(&self) -> f64 {
        (self.network_distance - self.great_circle_distance).abs()
    }
}

/// Exponentially distributed distance discrepancy.
///
/// ```math
/// transition(Δ) = ln(1 / β) - Δ / β
/// ```
#[derive(Clone, Copy, Debug)]
pub struct ExponentialTransition {
    beta: f64,
    normaliser: f64,
}

impl ExponentialTransition {
    pub fn new(beta: f64) -> Self {
        Self {
            beta,
            normaliser: -beta.ln(),
        }
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }
}

impl Default for ExponentialTransition {
    fn default() -> Self {
        Self::new(DEFAULT_TRANSITION_BETA)
    }
}

impl<'a> Strategy<TransitionContext<'a>> for ExponentialTransition {
    #[inline]
    fn calculate(&self, context: TransitionContext<'a>) -> f64 {
        self.normaliser - context.discrepancy() / self.beta
    }
}
