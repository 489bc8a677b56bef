use crate::network::{EdgeId, NodeId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatchError {
    #[error("invalid trajectory: {0}")]
    Input(#[from] InputError),

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Whole-trajectory input malformation.
///
/// These are the only conditions under which a match call fails,
/// an individual observation without candidates is reported as
/// unmatched instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("no observations were given")]
    EmptyTrajectory,

    #[error("observation {index} has a non-finite coordinate")]
    NonFiniteCoordinate { index: usize },

    #[error("observation {index} is out of range (lon={lon}, lat={lat})")]
    CoordinateOutOfRange { index: usize, lon: f64, lat: f64 },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("option `{option}` must be a positive, finite number, got {value}")]
    NonPositive { option: &'static str, value: f64 },

    #[error("option `referencePointSpacingMeters` must be at least {min}m, got {0}", min = crate::config::MIN_REFERENCE_SPACING)]
    SpacingTooSmall(f64),

    #[error("option `maxDetourFactor` must be at least 1, got {0}")]
    DetourFactorTooSmall(f64),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NetworkError {
    #[error("node {0:?} is defined more than once")]
    DuplicateNode(NodeId),

    #[error("edge {0:?} is defined more than once")]
    DuplicateEdge(EdgeId),

    #[error("edge {edge:?} references unknown node {node:?}")]
    UnknownNode { edge: EdgeId, node: NodeId },

    #[error("edge {0:?} has a geometry with a single coordinate")]
    DegenerateGeometry(EdgeId),

    #[error("non-finite coordinate in the definition of {0}")]
    NonFiniteCoordinate(String),
}
