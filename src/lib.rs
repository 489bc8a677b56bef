#![doc = include_str!("../README.md")]

#[cfg(feature = "mimalloc")]
use mimalloc::MiMalloc;
#[cfg_attr(feature = "mimalloc", global_allocator)]
#[cfg(feature = "mimalloc")]
static GLOBAL: MiMalloc = MiMalloc;

#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod error;
pub mod index;
#[doc(hidden)]
pub mod matcher;
pub mod network;
pub mod route;
pub mod transition;
#[cfg(feature = "tracing")]
pub mod trace;

#[cfg(test)]
pub(crate) mod fixtures;

#[doc(inline)]
pub use config::MatchConfig;
#[doc(inline)]
pub use error::{ConfigError, InputError, MatchError, NetworkError};
#[doc(inline)]
pub use index::SpatialIndex;
#[doc(inline)]
pub use matcher::{MatchOutput, Matcher, Outcome};
#[doc(inline)]
pub use network::{
    Directionality, EdgeId, EdgeRecord, NetworkDescription, NodeId, NodeRecord, RoadNetwork,
};
#[doc(inline)]
pub use transition::{
    CostingStrategies, ExponentialTransition, GaussianEmission, MatchRecord, MatchResult,
    Observation, RoadInfo, Transition, ViterbiDecoder,
};
