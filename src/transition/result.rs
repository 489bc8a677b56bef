use geo::Point;
use serde::Serialize;

use crate::network::{EdgeId, RoadEdge};
use crate::transition::Observation;

/// Descriptive attributes of the road a result was matched onto.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub way_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highway: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bridge: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tunnel: Option<String>,
}

impl RoadInfo {
    pub fn of(edge: &RoadEdge) -> Self {
        let tag = |key: &str| edge.tag(key).map(str::to_string);

        RoadInfo {
            way_id: edge.way_id,
            highway: tag("highway"),
            bridge: tag("bridge"),
            tunnel: tag("tunnel"),
        }
    }
}

/// The outcome of matching a single observation.
#[derive(Clone, Debug, PartialEq)]
pub enum MatchResult {
    Matched {
        observation: Observation,
        edge_id: EdgeId,

        /// The reference point the observation was matched onto,
        /// unless projected coordinates were not kept.
        projected: Option<Point>,

        /// Great-circle distance from the observation to its match, in meters.
        distance: f64,

        road: Option<RoadInfo>,
    },
    Unmatched {
        observation: Observation,
    },
}

impl MatchResult {
    pub fn observation(&self) -> &Observation {
        match self {
            MatchResult::Matched { observation, .. } | MatchResult::Unmatched { observation } => {
                observation
            }
        }
    }

    pub fn is_matched(&self) -> bool {
        matches!(self, MatchResult::Matched { .. })
    }

    pub fn edge_id(&self) -> Option<EdgeId> {
        match self {
            MatchResult::Matched { edge_id, .. } => Some(*edge_id),
            MatchResult::Unmatched { .. } => None,
        }
    }

    pub fn projected(&self) -> Option<Point> {
        match self {
            MatchResult::Matched { projected, .. } => *projected,
            MatchResult::Unmatched { .. } => None,
        }
    }

    /// The flat, serialisable form of this result.
    pub fn record(&self) -> MatchRecord {
        match self {
            MatchResult::Matched {
                edge_id,
                projected,
                road,
                ..
            } => MatchRecord::Matched {
                edge_id: *edge_id,
                projected_lon: projected.map(|point| point.x()),
                projected_lat: projected.map(|point| point.y()),
                road: road.clone(),
            },
            MatchResult::Unmatched { observation } => MatchRecord::Unmatched {
                original_lon: observation.lon(),
                original_lat: observation.lat(),
            },
        }
    }
}

/// A [`MatchResult`] as written out to consumers.
///
/// ```json
/// { "status": "matched", "edgeId": 4, "projectedLon": 0.1, "projectedLat": 0.2, "wayId": 12 }
/// { "status": "unmatched", "originalLon": 0.1, "originalLat": 0.2 }
/// ```
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum MatchRecord {
    #[serde(rename_all = "camelCase")]
    Matched {
        edge_id: EdgeId,
        #[serde(skip_serializing_if = "Option::is_none")]
        projected_lon: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        projected_lat: Option<f64>,
        #[serde(flatten, skip_serializing_if = "Option::is_none")]
        road: Option<RoadInfo>,
    },
    #[serde(rename_all = "camelCase")]
    Unmatched { original_lon: f64, original_lat: f64 },
}
