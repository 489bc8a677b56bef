use crate::config::MatchConfig;
use crate::transition::*;

pub trait Strategy<Ctx> {
    /// The log-likelihood of the context, higher is more probable.
    ///
    /// A non-finite score rules the context out. The decoder never
    /// chains a transition scored so, nor reaches a candidate whose
    /// emission is scored so.
    fn calculate(&self, context: Ctx) -> f64;
}

pub trait Costing<Emission, Transition>
where
    Emission: EmissionStrategy,
    Transition: TransitionStrategy,
{
    /// The emission log-score of a candidate.
    fn emission(&self, context: EmissionContext) -> f64;

    /// The transition log-score between two candidates of consecutive layers.
    fn transition(&self, context: TransitionContext) -> f64;
}

/// The pair of scoring strategies used to decode a trajectory.
#[derive(Clone, Debug)]
pub struct CostingStrategies<E, T>
where
    E: EmissionStrategy,
    T: TransitionStrategy,
{
    emission: E,
    transition: T,
}

impl<E, T> CostingStrategies<E, T>
where
    E: EmissionStrategy,
    T: TransitionStrategy,
{
    pub fn new(emission: E, transition: T) -> Self {
        Self {
            emission,
            transition,
        }
    }
}

impl CostingStrategies<GaussianEmission, ExponentialTransition> {
    /// The default strategies, parameterised by the configured
    /// `emissionSigmaMeters` and `transitionBetaMeters`.
    pub fn from_config(config: &MatchConfig) -> Self {
        Self::new(
            GaussianEmission::new(config.emission_sigma_meters),
            ExponentialTransition::new(config.transition_beta_meters),
        )
    }
}

impl Default for CostingStrategies<GaussianEmission, ExponentialTransition> {
    fn default() -> Self {
        Self::new(GaussianEmission::default(), ExponentialTransition::default())
    }
}

impl<E, T> Costing<E, T> for CostingStrategies<E, T>
where
    T: TransitionStrategy,
    E: EmissionStrategy,
{
    #[inline(always)]
    fn emission(&self, context: EmissionContext) -> f64 {
        self.emission.calculate(context)
    }

    #[inline(always)]
    fn transition(&self, context: TransitionContext) -> f64 {
        self.transition.calculate(context)
    }
}
