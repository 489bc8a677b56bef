pub mod viterbi;

#[doc(inline)]
pub use viterbi::*;

use crate::transition::*;

/// Finds the most probable path through the trellis of a [`Transition`].
pub trait Solver {
    fn solve<E, T>(&self, transition: &Transition<E, T>) -> Collapse
    where
        E: EmissionStrategy + Send + Sync,
        T: TransitionStrategy + Send + Sync;
}
