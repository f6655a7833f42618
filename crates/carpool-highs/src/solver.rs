//! [`Solver`] implementation backed by HiGHS.

use std::collections::BTreeMap;
use std::time::Instant;

use carpool_core::{Model, Sense};
use carpool_solver::{Solution, Solver, SolverConfig, SolverError, SolverStatus};
use carpool_tools::rss_mb;
use tracing::{debug, trace, warn};

use crate::problem::{HighsOption, HighsProblem, HighsProblemError, ObjectiveSense};
use crate::status::{highs_status_string, to_solver_status};

fn problem_error(err: HighsProblemError) -> SolverError {
    SolverError::SolverSpecific(err.to_string())
}

/// Solves staged [`Model`]s with HiGHS.
#[derive(Debug, Clone, Copy, Default)]
pub struct HighsSolver;

impl HighsSolver {
    pub fn new() -> Self {
        Self
    }

    /// # Errors
    ///
    /// Returns [`SolverError::InvalidConfig`] for a thread count HiGHS cannot
    /// hold in its integer option.
    fn apply_config(
        &self,
        problem: &mut HighsProblem,
        config: &SolverConfig,
    ) -> Result<(), SolverError> {
        if let Some(limit) = config.time_limit {
            problem.set_option("time_limit", HighsOption::Float(limit));
        }
        if let Some(gap) = config.mip_gap {
            problem.set_option("mip_rel_gap", HighsOption::Float(gap));
        }
        if let Some(threads) = config.threads {
            let threads = i32::try_from(threads).map_err(|_| SolverError::InvalidConfig {
                option: "threads",
                reason: format!("{threads} exceeds {}", i32::MAX),
            })?;
            problem.set_option("threads", HighsOption::Int(threads));
        }
        let output = config.log_to_console.unwrap_or(false);
        problem.set_output(output);
        if output {
            problem.set_option("output_flag", HighsOption::Bool(true));
            problem.set_option("log_to_console", HighsOption::Bool(true));
        }
        Ok(())
    }
}

impl Solver for HighsSolver {
    fn name(&self) -> &'static str {
        "highs"
    }

    fn solve(&mut self, model: &Model, config: &SolverConfig) -> Result<Solution, SolverError> {
        let sense = model.objective().sense.ok_or(SolverError::NoObjective)?;
        let started = Instant::now();

        // HiGHS reports an empty model as a distinct non-optimal status; the
        // optimum of nothing is simply zero.
        if model.num_variables() == 0 {
            debug!(
                component = "solver",
                operation = "solve",
                status = "success",
                solver = "highs",
                "Model has no columns; skipping HiGHS"
            );
            return Ok(Solution {
                primal_values: Vec::new(),
                objective_value: 0.0,
                status: SolverStatus::Optimal,
                solve_time_seconds: 0.0,
                metadata: BTreeMap::new(),
            });
        }

        debug!(
            component = "solver",
            operation = "solve",
            status = "started",
            solver = "highs",
            variables = model.num_variables(),
            constraints = model.num_constraints(),
            nnz = model.num_coefficients(),
            rss_mb = rss_mb(),
            "Copying model into HiGHS"
        );

        let mut problem = HighsProblem::new();
        problem.set_sense(match sense {
            Sense::Minimize => ObjectiveSense::Minimize,
            Sense::Maximize => ObjectiveSense::Maximize,
        });
        self.apply_config(&mut problem, config)?;

        let mut costs = vec![0.0; model.num_variables()];
        for (var, coeff) in &model.objective().terms {
            let slot = costs
                .get_mut(var.index())
                .ok_or(SolverError::InvalidVariableId(var.inner()))?;
            *slot += coeff;
        }
        for ((_, var), cost) in model.variables().zip(&costs) {
            problem
                .add_column(var.bounds.lower, var.bounds.upper, *cost, var.is_integer)
                .map_err(problem_error)?;
        }

        let rows = model.rows();
        for ((row_id, constraint), row) in model.constraints().zip(&rows) {
            let factors: Vec<(usize, f64)> =
                row.iter().map(|(var, coeff)| (var.index(), *coeff)).collect();
            problem
                .add_row(constraint.bounds.lower, constraint.bounds.upper, &factors)
                .map_err(problem_error)?;
            trace!(
                component = "solver",
                operation = "add_row",
                row_id = row_id.inner(),
                nnz = factors.len(),
                "Added row to HiGHS"
            );
        }
        let build_ms = started.elapsed().as_secs_f64() * 1000.0;

        let highs_status = problem.solve().map_err(problem_error)?;
        let status = to_solver_status(highs_status);
        let solve_time_seconds = started.elapsed().as_secs_f64();

        let mut solution = if status.has_solution() {
            let primal_values = problem.column_values().map_err(problem_error)?;
            if primal_values.len() == model.num_variables() {
                Solution {
                    primal_values,
                    objective_value: problem.objective_value().map_err(problem_error)?,
                    status,
                    solve_time_seconds,
                    metadata: BTreeMap::new(),
                }
            } else {
                // A limit was hit before any incumbent existed.
                Solution::without_values(status, solve_time_seconds)
            }
        } else {
            Solution::without_values(status, solve_time_seconds)
        };

        let mip_gap = problem.mip_gap();
        if mip_gap.is_finite() {
            solution.metadata.insert("mip_gap".to_string(), mip_gap);
        }
        solution.metadata.insert("build_ms".to_string(), build_ms);
        if let Some(rss) = rss_mb() {
            solution.metadata.insert("rss_mb".to_string(), rss);
        }

        if status.is_optimal() {
            debug!(
                component = "solver",
                operation = "solve",
                status = "success",
                solver = "highs",
                highs_status = highs_status_string(highs_status),
                objective_value = solution.objective_value,
                mip_gap,
                build_ms,
                duration_ms = solve_time_seconds * 1000.0,
                "HiGHS solve finished"
            );
        } else {
            warn!(
                component = "solver",
                operation = "solve",
                status = "warn",
                solver = "highs",
                highs_status = highs_status_string(highs_status),
                duration_ms = solve_time_seconds * 1000.0,
                "HiGHS stopped without proving optimality"
            );
        }

        Ok(solution)
    }
}
