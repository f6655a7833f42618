//! Build, optimize and extract in one call.

use std::time::Instant;

use carpool_solver::{MilpBackend, Session, Solver, SolverStatus};
use tracing::{debug, warn};

use crate::builder::ModelBuilder;
use crate::error::MatchingError;
use crate::extract::{RoutePlan, SolutionExtractor};
use crate::instance::ProblemInstance;
use crate::options::BuildOptions;

/// Terminal result of a solve.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveOutcome {
    /// Proven optimal; routes were extracted.
    Solved(RoutePlan),
    /// Infeasible, unbounded, or either.
    Infeasible(SolverStatus),
    /// Any other status, such as a hit time limit. Nothing is extracted.
    Unexpected(SolverStatus),
}

impl SolveOutcome {
    pub fn status(&self) -> SolverStatus {
        match self {
            SolveOutcome::Solved(_) => SolverStatus::Optimal,
            SolveOutcome::Infeasible(status) | SolveOutcome::Unexpected(status) => *status,
        }
    }

    pub fn plan(&self) -> Option<&RoutePlan> {
        match self {
            SolveOutcome::Solved(plan) => Some(plan),
            _ => None,
        }
    }
}

/// Solve `instance` in a fresh [`Session`] owned by this call.
///
/// # Errors
///
/// See [`solve_with_backend`].
pub fn solve<S: Solver>(
    instance: &ProblemInstance,
    solver: S,
    options: &BuildOptions,
) -> Result<SolveOutcome, MatchingError> {
    let mut session = Session::with_config(solver, options.solver.clone());
    solve_with_backend(instance, &mut session, options)
}

/// Build the model into `backend`, optimize it and classify the status.
///
/// # Errors
///
/// Returns an error when the backend rejects the model or fails while
/// solving, or when an optimal solution cannot be walked into routes.
/// Infeasibility is reported through [`SolveOutcome`], not as an error.
pub fn solve_with_backend<B: MilpBackend>(
    instance: &ProblemInstance,
    backend: &mut B,
    options: &BuildOptions,
) -> Result<SolveOutcome, MatchingError> {
    let started = Instant::now();
    let built = ModelBuilder::new(instance, options).build(backend)?;
    let status = backend.optimize()?;

    let outcome = match status {
        SolverStatus::Optimal => {
            let plan = SolutionExtractor::new(instance, &built.variables).extract(backend)?;
            SolveOutcome::Solved(plan)
        }
        infeasible if infeasible.is_infeasible_or_unbounded() => {
            warn!(
                component = "matching",
                operation = "solve",
                status = "infeasible",
                solver_status = infeasible.as_str(),
                "Model cannot be solved"
            );
            SolveOutcome::Infeasible(infeasible)
        }
        other => {
            warn!(
                component = "matching",
                operation = "solve",
                status = "unexpected",
                solver_status = other.as_str(),
                "Optimization stopped early"
            );
            SolveOutcome::Unexpected(other)
        }
    };

    debug!(
        component = "matching",
        operation = "solve",
        status = "success",
        solver_status = status.as_str(),
        build_ms = built.report.duration_ms,
        duration_ms = started.elapsed().as_secs_f64() * 1000.0,
        "Finished car sharing solve"
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::samples::scenario_a;
    use crate::testing::{ScriptedSolver, travel_name};

    #[test]
    fn optimal_status_extracts_routes() {
        let instance = scenario_a().unwrap();
        let names = [travel_name(2, 0, 0), travel_name(0, 1, 0), travel_name(1, 3, 0)];
        let values: Vec<(&str, f64)> = names.iter().map(|name| (name.as_str(), 1.0)).collect();

        let outcome = solve(
            &instance,
            ScriptedSolver::optimal(&values),
            &BuildOptions::default(),
        )
        .unwrap();
        assert_eq!(outcome.status(), SolverStatus::Optimal);
        let plan = outcome.plan().unwrap();
        assert_eq!(plan.routes[0].passengers, vec![0]);
    }

    #[test]
    fn infeasible_family_is_not_an_error() {
        let instance = scenario_a().unwrap();
        for status in [
            SolverStatus::Infeasible,
            SolverStatus::Unbounded,
            SolverStatus::InfeasibleOrUnbounded,
        ] {
            let outcome = solve(
                &instance,
                ScriptedSolver::with_status(status),
                &BuildOptions::default(),
            )
            .unwrap();
            assert_eq!(outcome, SolveOutcome::Infeasible(status));
            assert!(outcome.plan().is_none());
        }
    }

    #[test]
    fn limits_are_unexpected_even_with_an_incumbent() {
        let instance = scenario_a().unwrap();
        let outcome = solve(
            &instance,
            ScriptedSolver::with_status(SolverStatus::TimeLimit),
            &BuildOptions::default(),
        )
        .unwrap();
        assert_eq!(outcome, SolveOutcome::Unexpected(SolverStatus::TimeLimit));
    }

    #[test]
    fn backend_failures_propagate() {
        struct Unavailable;

        impl carpool_solver::Solver for Unavailable {
            fn name(&self) -> &'static str {
                "unavailable"
            }

            fn solve(
                &mut self,
                _model: &carpool_core::Model,
                _config: &carpool_solver::SolverConfig,
            ) -> Result<carpool_solver::Solution, carpool_solver::SolverError> {
                Err(carpool_solver::SolverError::SolverNotAvailable(
                    "no licence".to_string(),
                ))
            }
        }

        let instance = scenario_a().unwrap();
        let err = solve(&instance, Unavailable, &BuildOptions::default()).unwrap_err();
        assert_eq!(err.code(), "SOLVER_NOT_AVAILABLE");
    }
}
