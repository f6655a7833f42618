//! Solver-agnostic solution type.

use std::collections::BTreeMap;

use crate::SolverStatus;

/// Solver-agnostic solution from an optimization solve.
///
/// `primal_values` is empty unless [`SolverStatus::has_solution`] holds.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// Primal values of variables indexed by column position.
    pub primal_values: Vec<f64>,
    /// Objective value of the solution (NaN when there is none).
    pub objective_value: f64,
    /// Status of the solution.
    pub status: SolverStatus,
    /// Solve time in seconds.
    pub solve_time_seconds: f64,
    /// Backend extras such as the MIP gap or build time.
    pub metadata: BTreeMap<String, f64>,
}

impl Solution {
    /// A solution carrying only a status, for outcomes without primal values.
    pub fn without_values(status: SolverStatus, solve_time_seconds: f64) -> Self {
        Self {
            primal_values: Vec::new(),
            objective_value: f64::NAN,
            status,
            solve_time_seconds,
            metadata: BTreeMap::new(),
        }
    }

    /// Get the primal value at the given index.
    pub fn get_primal(&self, index: usize) -> Option<f64> {
        self.primal_values.get(index).copied()
    }
}
