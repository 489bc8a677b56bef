use geo::Point;

use crate::network::{EdgeId, EdgeIx};
use crate::route::Location;

/// A plausible position on the network for a single observation.
///
/// Each candidate is the reference point of its edge closest to the
/// observation, so an observation never has two candidates on the
/// same edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidate {
    /// Sequence index of the observation this candidate belongs to.
    pub observation: usize,

    pub edge: EdgeIx,
    pub edge_id: EdgeId,

    /// The reference point the observation was projected onto.
    pub position: Point,

    /// Distance of the reference point from the start of its edge, in meters.
    pub offset: f64,

    /// Great-circle distance to the observation, in meters.
    pub distance: f64,

    /// Emission log-score, calculated once on generation.
    pub emission: f64,
}

impl Candidate {
    pub fn location(&self) -> Location {
        Location {
            edge: self.edge,
            offset: self.offset,
        }
    }
}
