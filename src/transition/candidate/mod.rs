//! Candidates are the hidden states of the model: the positions on
//! the network an observation may have been recorded from.

pub mod entry;
pub mod generator;

#[doc(inline)]
pub use entry::*;
#[doc(inline)]
pub use generator::*;
