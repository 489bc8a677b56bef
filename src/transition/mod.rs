//! A Hidden-Markov-Model (HMM) matching
//! transition module that allows for
//! matching raw data to an underlying
//! network.

pub mod candidate;
pub mod collapse;
pub mod costing;
pub mod graph;
pub mod layer;
pub mod observation;
pub mod result;
pub mod solver;
pub mod trellis;


// Re-Exports
#[doc(inline)]
pub use candidate::*;
#[doc(inline)]
pub use costing::*;
#[doc(inline)]
pub use solver::*;

pub use collapse::*;
pub use graph::*;
pub use layer::*;
pub use observation::*;
pub use result::*;
pub use trellis::*;
