//! Scoring of the hidden states (emission) and of the moves
//! between them (transition).
//!
//! Both are log-likelihoods, so the score of a path is the sum of
//! the scores along it and the decoder maximises. Strategies are
//! interchangeable, so long as emission decreases with the distance
//! of a candidate to its observation and transition decreases with
//! the discrepancy between routed and straight-line distance.

pub mod emission;
pub mod strategy;
pub mod transition;

#[doc(inline)]
pub use emission::*;
#[doc(inline)]
pub use strategy::*;
#[doc(inline)]
pub use transition::*;
