//! Small reference instances.

use crate::error::ConstructionError;
use crate::instance::ProblemInstance;

/// One driver with two seats and a budget of 30, one passenger.
///
/// Nodes: pickup 0, drop-off 1, origin 2, destination 3. The only way to
/// serve the passenger is `2 -> 0 -> 1 -> 3`, of length 16.
pub fn scenario_a() -> Result<ProblemInstance, ConstructionError> {
    ProblemInstance::new(
        1,
        1,
        vec![2],
        vec![30.0],
        vec![
            vec![0.0, 5.0, 10.0, 1.0],
            vec![5.0, 0.0, 11.0, 1.0],
            vec![10.0, 11.0, 0.0, 12.0],
            vec![1.0, 1.0, 12.0, 0.0],
        ],
    )
}

/// Two single-seat drivers, three passengers, budgets of 20.
///
/// Manhattan distances between points on two parallel streets. Driver 0
/// runs along `y = 0` from `(0,0)` to `(10,0)` past passengers 0 and 1;
/// driver 1 runs along `y = 5` from `(0,5)` to `(10,5)` past passenger 2.
/// Every passenger can be served, passengers 0 and 1 only one after the
/// other.
pub fn scenario_b() -> Result<ProblemInstance, ConstructionError> {
    ProblemInstance::new(
        2,
        3,
        vec![1, 1],
        vec![20.0, 20.0],
        vec![
            vec![0.0, 4.0, 6.0, 3.0, 7.0, 11.0, 2.0, 7.0, 8.0, 13.0],
            vec![4.0, 0.0, 8.0, 1.0, 3.0, 7.0, 6.0, 11.0, 4.0, 9.0],
            vec![6.0, 8.0, 0.0, 7.0, 11.0, 5.0, 8.0, 3.0, 12.0, 7.0],
            vec![3.0, 1.0, 7.0, 0.0, 4.0, 8.0, 5.0, 10.0, 5.0, 10.0],
            vec![7.0, 3.0, 11.0, 4.0, 0.0, 6.0, 9.0, 14.0, 1.0, 6.0],
            vec![11.0, 7.0, 5.0, 8.0, 6.0, 0.0, 13.0, 8.0, 7.0, 2.0],
            vec![2.0, 6.0, 8.0, 5.0, 9.0, 13.0, 0.0, 5.0, 10.0, 15.0],
            vec![7.0, 11.0, 3.0, 10.0, 14.0, 8.0, 5.0, 0.0, 15.0, 10.0],
            vec![8.0, 4.0, 12.0, 5.0, 1.0, 7.0, 10.0, 15.0, 0.0, 5.0],
            vec![13.0, 9.0, 7.0, 10.0, 6.0, 2.0, 15.0, 10.0, 5.0, 0.0],
        ],
    )
}
