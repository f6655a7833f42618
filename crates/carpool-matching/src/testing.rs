//! Test doubles shared by the unit tests.

use std::collections::BTreeMap;

use carpool_core::Model;
use carpool_solver::{Session, Solution, Solver, SolverConfig, SolverError, SolverStatus};

/// Answers every solve with a fixed status and values looked up by variable
/// name; unnamed or unlisted variables read as 0.
#[derive(Debug, Default)]
pub(crate) struct ScriptedSolver {
    pub status: Option<SolverStatus>,
    pub values: BTreeMap<String, f64>,
}

impl ScriptedSolver {
    pub fn optimal(values: &[(&str, f64)]) -> Self {
        Self {
            status: Some(SolverStatus::Optimal),
            values: values
                .iter()
                .map(|(name, value)| ((*name).to_string(), *value))
                .collect(),
        }
    }

    pub fn with_status(status: SolverStatus) -> Self {
        Self {
            status: Some(status),
            values: BTreeMap::new(),
        }
    }
}

impl Solver for ScriptedSolver {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn solve(&mut self, model: &Model, _config: &SolverConfig) -> Result<Solution, SolverError> {
        let status = self.status.unwrap_or(SolverStatus::Unknown);
        if !status.has_solution() {
            return Ok(Solution::without_values(status, 0.0));
        }
        let primal_values: Vec<f64> = model
            .variables()
            .map(|(id, _)| {
                model
                    .variable_name(id)
                    .and_then(|name| self.values.get(name))
                    .copied()
                    .unwrap_or(0.0)
            })
            .collect();
        let objective_value = model
            .objective()
            .terms
            .iter()
            .map(|(var, coeff)| coeff * primal_values[var.index()])
            .sum();
        Ok(Solution {
            primal_values,
            objective_value,
            status,
            solve_time_seconds: 0.0,
            metadata: BTreeMap::new(),
        })
    }
}

/// A session whose solver never produces values.
pub(crate) fn structural_session() -> Session<ScriptedSolver> {
    Session::new(ScriptedSolver::default())
}

/// `travel` variable name for arc `i -> j` of driver `k`.
pub(crate) fn travel_name(i: usize, j: usize, k: usize) -> String {
    format!("{k} travel From {i} To {j}")
}
