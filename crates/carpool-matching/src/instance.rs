//! Validated problem input.

use serde::{Deserialize, Serialize};

use crate::error::ConstructionError;
use crate::nodes::NodeIndexer;

/// Immutable fleet, passengers and distances for one matching problem.
///
/// `distance` is indexed by the node layout of [`NodeIndexer`]; its diagonal
/// is never read by the model. Deserializing runs the same validation as
/// [`ProblemInstance::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "InstanceData")]
pub struct ProblemInstance {
    n_drivers: usize,
    n_passengers: usize,
    seats: Vec<u32>,
    max_dist: Vec<f64>,
    distance: Vec<Vec<f64>>,
}

/// Unchecked wire form of [`ProblemInstance`].
#[derive(Debug, Clone, Deserialize)]
struct InstanceData {
    n_drivers: usize,
    n_passengers: usize,
    seats: Vec<u32>,
    max_dist: Vec<f64>,
    distance: Vec<Vec<f64>>,
}

impl TryFrom<InstanceData> for ProblemInstance {
    type Error = ConstructionError;

    fn try_from(data: InstanceData) -> Result<Self, Self::Error> {
        ProblemInstance::new(
            data.n_drivers,
            data.n_passengers,
            data.seats,
            data.max_dist,
            data.distance,
        )
    }
}

impl ProblemInstance {
    /// Validate and wrap the input.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstructionError`] when a per-driver vector does not have
    /// `n_drivers` entries, the distance matrix is not `N x N`, or a distance
    /// or budget is negative or not finite.
    ///
    /// Seatless drivers are accepted. With passengers present their load
    /// bounds are empty and the model solves as infeasible.
    pub fn new(
        n_drivers: usize,
        n_passengers: usize,
        seats: Vec<u32>,
        max_dist: Vec<f64>,
        distance: Vec<Vec<f64>>,
    ) -> Result<Self, ConstructionError> {
        if seats.len() != n_drivers {
            return Err(ConstructionError::SeatsLengthMismatch {
                drivers: n_drivers,
                seats: seats.len(),
            });
        }
        if max_dist.len() != n_drivers {
            return Err(ConstructionError::MaxDistLengthMismatch {
                drivers: n_drivers,
                max_dist: max_dist.len(),
            });
        }

        let n = NodeIndexer::new(n_drivers, n_passengers).node_count();
        if distance.len() != n {
            return Err(ConstructionError::DistanceRowCount {
                expected: n,
                rows: distance.len(),
            });
        }
        for (from, row) in distance.iter().enumerate() {
            if row.len() != n {
                return Err(ConstructionError::DistanceColumnCount {
                    row: from,
                    expected: n,
                    columns: row.len(),
                });
            }
            if let Some((to, &value)) = row
                .iter()
                .enumerate()
                .find(|(_, value)| !value.is_finite() || **value < 0.0)
            {
                return Err(ConstructionError::InvalidDistance { from, to, value });
            }
        }

        if let Some((driver, &value)) = max_dist
            .iter()
            .enumerate()
            .find(|(_, value)| !value.is_finite() || **value < 0.0)
        {
            return Err(ConstructionError::InvalidMaxDist { driver, value });
        }

        Ok(Self {
            n_drivers,
            n_passengers,
            seats,
            max_dist,
            distance,
        })
    }

    pub fn n_drivers(&self) -> usize {
        self.n_drivers
    }

    pub fn n_passengers(&self) -> usize {
        self.n_passengers
    }

    pub fn nodes(&self) -> NodeIndexer {
        NodeIndexer::new(self.n_drivers, self.n_passengers)
    }

    pub fn seats(&self, driver: usize) -> u32 {
        self.seats[driver]
    }

    pub fn max_dist(&self, driver: usize) -> f64 {
        self.max_dist[driver]
    }

    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.distance[from][to]
    }

    /// Total distance of a node walk.
    pub fn path_length(&self, path: &[usize]) -> f64 {
        path.windows(2).map(|arc| self.distance(arc[0], arc[1])).sum()
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn square(n: usize, value: f64) -> Vec<Vec<f64>> {
        vec![vec![value; n]; n]
    }

    #[test]
    fn valid_instance_is_accepted() {
        let instance = ProblemInstance::new(1, 1, vec![2], vec![30.0], square(4, 1.0)).unwrap();
        assert_eq!(instance.nodes().node_count(), 4);
        assert_eq!(instance.seats(0), 2);
        assert_eq!(instance.path_length(&[2, 0, 1, 3]), 3.0);
    }

    #[test]
    fn per_driver_lengths_are_checked() {
        let err = ProblemInstance::new(2, 0, vec![1], vec![1.0, 1.0], square(4, 1.0)).unwrap_err();
        assert_eq!(
            err,
            ConstructionError::SeatsLengthMismatch {
                drivers: 2,
                seats: 1
            }
        );
        let err = ProblemInstance::new(2, 0, vec![1, 1], vec![1.0], square(4, 1.0)).unwrap_err();
        assert!(matches!(err, ConstructionError::MaxDistLengthMismatch { .. }));
    }

    #[test]
    fn distance_shape_is_checked() {
        let err = ProblemInstance::new(1, 1, vec![1], vec![1.0], square(3, 1.0)).unwrap_err();
        assert_eq!(
            err,
            ConstructionError::DistanceRowCount {
                expected: 4,
                rows: 3
            }
        );

        let mut ragged = square(4, 1.0);
        ragged[2].pop();
        let err = ProblemInstance::new(1, 1, vec![1], vec![1.0], ragged).unwrap_err();
        assert_eq!(
            err,
            ConstructionError::DistanceColumnCount {
                row: 2,
                expected: 4,
                columns: 3
            }
        );
    }

    #[test]
    fn negative_and_nan_values_are_rejected() {
        let mut distance = square(4, 1.0);
        distance[1][3] = -2.0;
        let err = ProblemInstance::new(1, 1, vec![1], vec![1.0], distance).unwrap_err();
        assert!(matches!(
            err,
            ConstructionError::InvalidDistance { from: 1, to: 3, .. }
        ));

        let err = ProblemInstance::new(1, 1, vec![1], vec![f64::NAN], square(4, 1.0)).unwrap_err();
        assert!(matches!(err, ConstructionError::InvalidMaxDist { driver: 0, .. }));
    }

    #[test]
    fn seatless_driver_is_accepted() {
        let instance = ProblemInstance::new(1, 1, vec![0], vec![10.0], square(4, 1.0)).unwrap();
        assert_eq!(instance.seats(0), 0);
        assert!(ProblemInstance::new(1, 0, vec![0], vec![1.0], square(2, 1.0)).is_ok());
    }

    #[test]
    fn empty_instance_is_valid() {
        let instance = ProblemInstance::new(0, 0, vec![], vec![], vec![]).unwrap();
        assert_eq!(instance.nodes().node_count(), 0);
    }
}
