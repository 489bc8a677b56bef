use geo::Point;

use crate::error::InputError;

/// A single GPS fix of a trajectory.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Observation {
    pub position: Point,

    /// Position of the observation within its trajectory.
    pub index: usize,
}

impl Observation {
    pub fn new(index: usize, lon: f64, lat: f64) -> Self {
        Self {
            position: Point::new(lon, lat),
            index,
        }
    }

    pub fn lon(&self) -> f64 {
        self.position.x()
    }

    pub fn lat(&self) -> f64 {
        self.position.y()
    }

    /// Validates a trajectory of `(lon, lat)` pairs, in degrees.
    ///
    /// Fails on the first malformed coordinate, before any work is
    /// done against the network.
    pub fn sequence(coordinates: &[(f64, f64)]) -> Result<Vec<Observation>, InputError> {
        if coordinates.is_empty() {
            return Err(InputError::EmptyTrajectory);
        }

        coordinates
            .iter()
            .enumerate()
            .map(|(index, &(lon, lat))| {
                if !lon.is_finite() || !lat.is_finite() {
                    return Err(InputError::NonFiniteCoordinate { index });
                }

                if !(-180.0..=180.0).contains(&lon) || !(-90.0..=90.0).contains(&lat) {
                    return Err(InputError::CoordinateOutOfRange { index, lon, lat });
                }

                Ok(Observation::new(index, lon, lat))
            })
            .collect()
    }
}
