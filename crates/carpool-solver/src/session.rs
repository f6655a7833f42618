//! A single build-and-solve session over one staged model.

use std::time::Instant;

use carpool_core::{Bounds, Model, Objective, Sense, Variable};
use carpool_expr::{ComparisonSense, ConstraintId, Expr, VariableId};
use tracing::{debug, trace, warn};

use crate::{MilpBackend, Solution, Solver, SolverConfig, SolverError, SolverStatus};

/// Owns one [`Model`] and one [`Solver`] from construction to extraction.
///
/// Variables and rows are staged in the model as they are declared; the
/// backend only sees the finished model when [`MilpBackend::optimize`] runs.
/// A session is not `Clone`, so a solver handle is never shared between builds.
#[derive(Debug)]
pub struct Session<S> {
    model: Model,
    solver: S,
    config: SolverConfig,
    solution: Option<Solution>,
}

impl<S: Solver> Session<S> {
    /// Create a session with an empty model and default configuration.
    pub fn new(solver: S) -> Self {
        Self::with_config(solver, SolverConfig::new())
    }

    /// Create a session with an empty model and the given configuration.
    pub fn with_config(solver: S, config: SolverConfig) -> Self {
        Self {
            model: Model::new(),
            solver,
            config,
            solution: None,
        }
    }

    /// The staged model.
    pub fn model(&self) -> &Model {
        &self.model
    }

    fn add_named_variable(&mut self, variable: Variable, name: &str) -> Result<VariableId, SolverError> {
        self.solution = None;
        let id = self.model.add_variable(variable)?;
        if !name.is_empty() {
            self.model.set_variable_name(id, name.to_string())?;
        }
        trace!(
            component = "session",
            operation = "add_variable",
            status = "success",
            var_id = id.inner(),
            lower = variable.bounds.lower,
            upper = variable.bounds.upper,
            is_integer = variable.is_integer,
            "Staged variable"
        );
        Ok(id)
    }

    fn solved(&self, operation: &'static str) -> Result<&Solution, SolverError> {
        self.solution
            .as_ref()
            .filter(|solution| {
                solution.status.has_solution()
                    && solution.primal_values.len() == self.model.num_variables()
            })
            .ok_or(SolverError::SolveRequired { operation })
    }
}

impl<S: Solver> MilpBackend for Session<S> {
    fn new_binary_variable(&mut self, name: &str) -> Result<VariableId, SolverError> {
        self.add_named_variable(Variable::binary(), name)
    }

    fn new_integer_variable(
        &mut self,
        lower: f64,
        upper: f64,
        name: &str,
    ) -> Result<VariableId, SolverError> {
        self.add_named_variable(Variable::integer(Bounds::new(lower, upper)), name)
    }

    fn new_continuous_variable(
        &mut self,
        lower: f64,
        upper: f64,
        name: &str,
    ) -> Result<VariableId, SolverError> {
        self.add_named_variable(Variable::continuous(Bounds::new(lower, upper)), name)
    }

    fn fix_variable(&mut self, var: VariableId, value: f64) -> Result<(), SolverError> {
        self.solution = None;
        self.model.set_variable_bounds(var, Bounds::fixed(value))?;
        Ok(())
    }

    fn add_linear_constraint(
        &mut self,
        lhs: Expr,
        relation: ComparisonSense,
        rhs: Expr,
        name: &str,
    ) -> Result<ConstraintId, SolverError> {
        self.solution = None;
        let id = self.model.add_row(lhs.compare_expr(&rhs, relation))?;
        if !name.is_empty() {
            self.model.set_constraint_name(id, name.to_string())?;
        }
        Ok(id)
    }

    fn set_objective(&mut self, expr: Expr, sense: Sense) -> Result<(), SolverError> {
        self.solution = None;
        self.model.set_objective(Objective {
            sense: Some(sense),
            terms: expr.into_linear_terms(),
        })?;
        Ok(())
    }

    /// Stored as the objective name, so call it after [`MilpBackend::set_objective`].
    fn set_model_name(&mut self, name: &str) -> Result<(), SolverError> {
        self.model.set_objective_name(Some(name.to_string()));
        Ok(())
    }

    fn optimize(&mut self) -> Result<SolverStatus, SolverError> {
        if self.model.objective().sense.is_none() {
            return Err(SolverError::NoObjective);
        }

        let started = Instant::now();
        debug!(
            component = "session",
            operation = "optimize",
            status = "started",
            solver = self.solver.name(),
            variables = self.model.num_variables(),
            constraints = self.model.num_constraints(),
            nnz = self.model.num_coefficients(),
            "Handing model to solver"
        );

        let solution = self.solver.solve(&self.model, &self.config)?;
        let status = solution.status;
        if !solution.primal_values.is_empty()
            && solution.primal_values.len() != self.model.num_variables()
        {
            return Err(SolverError::SolverSpecific(format!(
                "solver returned {} primal values for {} variables",
                solution.primal_values.len(),
                self.model.num_variables()
            )));
        }

        let duration_ms = started.elapsed().as_secs_f64() * 1000.0;
        if status.is_optimal() {
            debug!(
                component = "session",
                operation = "optimize",
                status = "success",
                solver = self.solver.name(),
                solver_status = status.as_str(),
                objective_value = solution.objective_value,
                duration_ms,
                "Solve finished"
            );
        } else {
            warn!(
                component = "session",
                operation = "optimize",
                status = "warn",
                solver = self.solver.name(),
                solver_status = status.as_str(),
                duration_ms,
                "Solver did not reach optimality"
            );
        }

        self.solution = Some(solution);
        Ok(status)
    }

    fn value_of(&self, var: VariableId) -> Result<f64, SolverError> {
        self.solved("value_of")?
            .get_primal(var.index())
            .ok_or(SolverError::InvalidVariableId(var.inner()))
    }

    fn objective_value(&self) -> Result<f64, SolverError> {
        Ok(self.solved("objective_value")?.objective_value)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    /// Returns a canned status and sets every column to its upper bound.
    struct UpperBoundSolver {
        status: SolverStatus,
        calls: usize,
    }

    impl Solver for UpperBoundSolver {
        fn name(&self) -> &'static str {
            "upper-bound"
        }

        fn solve(&mut self, model: &Model, _config: &SolverConfig) -> Result<Solution, SolverError> {
            self.calls += 1;
            if !self.status.has_solution() {
                return Ok(Solution::without_values(self.status, 0.0));
            }
            let primal_values: Vec<f64> = model.variables().map(|(_, v)| v.bounds.upper).collect();
            let objective_value = model
                .objective()
                .terms
                .iter()
                .map(|(var, coeff)| coeff * primal_values[var.index()])
                .sum();
            Ok(Solution {
                primal_values,
                objective_value,
                status: self.status,
                solve_time_seconds: 0.0,
                metadata: BTreeMap::new(),
            })
        }
    }

    fn session(status: SolverStatus) -> Session<UpperBoundSolver> {
        Session::new(UpperBoundSolver { status, calls: 0 })
    }

    #[test]
    fn variables_are_named_and_bounded() {
        let mut session = session(SolverStatus::Optimal);
        let x = session.new_binary_variable("x").unwrap();
        let n = session.new_integer_variable(1.0, 3.0, "n").unwrap();
        let len = session.new_continuous_variable(0.0, 30.0, "").unwrap();

        let model = session.model();
        assert_eq!(model.variable_name(x), Some("x"));
        assert_eq!(model.variable(n).unwrap().bounds, Bounds::new(1.0, 3.0));
        assert!(model.variable(n).unwrap().is_integer);
        assert!(model.variable_name(len).is_none());
        assert!(!model.variable(len).unwrap().is_integer);
    }

    #[test]
    fn empty_integer_bounds_are_staged_and_nan_is_rejected() {
        let mut session = session(SolverStatus::Optimal);
        let seatless = session.new_integer_variable(1.0, 0.0, "seatless").unwrap();
        assert!(session.model().variable(seatless).unwrap().bounds.is_empty());

        let result = session.new_integer_variable(f64::NAN, 0.0, "bad");
        assert!(matches!(result, Err(SolverError::Model(_))));
    }

    #[test]
    fn constraint_between_expressions_is_normalized() {
        let mut session = session(SolverStatus::Optimal);
        let a = session.new_binary_variable("a").unwrap();
        let b = session.new_binary_variable("b").unwrap();

        // a + 2 <= b + 3  ->  a - b <= 1
        let row = session
            .add_linear_constraint(
                Expr::var(a) + 2.0,
                ComparisonSense::LessEqual,
                Expr::var(b) + 3.0,
                "row",
            )
            .unwrap();
        let model = session.model();
        let constraint = model.constraint(row).unwrap();
        assert_eq!(constraint.bounds, Bounds::new(f64::NEG_INFINITY, 1.0));
        assert_eq!(model.rows()[row.index()], vec![(a, 1.0), (b, -1.0)]);
        assert_eq!(model.constraint_name(row), Some("row"));
    }

    #[test]
    fn optimize_requires_objective() {
        let mut session = session(SolverStatus::Optimal);
        session.new_binary_variable("x").unwrap();
        assert_eq!(session.optimize(), Err(SolverError::NoObjective));
    }

    #[test]
    fn values_are_available_after_optimal_solve() {
        let mut session = session(SolverStatus::Optimal);
        let x = session.new_binary_variable("x").unwrap();
        let y = session.new_binary_variable("y").unwrap();
        session.fix_variable(y, 0.0).unwrap();
        session
            .set_objective(Expr::var(x) + Expr::var(y), Sense::Maximize)
            .unwrap();

        assert!(matches!(
            session.value_of(x),
            Err(SolverError::SolveRequired { .. })
        ));
        assert_eq!(session.optimize().unwrap(), SolverStatus::Optimal);
        assert_eq!(session.value_of(x).unwrap(), 1.0);
        assert_eq!(session.value_of(y).unwrap(), 0.0);
        assert_eq!(session.objective_value().unwrap(), 1.0);
    }

    #[test]
    fn infeasible_status_exposes_no_values() {
        let mut session = session(SolverStatus::Infeasible);
        let x = session.new_binary_variable("x").unwrap();
        session.set_objective(Expr::var(x), Sense::Maximize).unwrap();

        assert_eq!(session.optimize().unwrap(), SolverStatus::Infeasible);
        assert!(matches!(
            session.value_of(x),
            Err(SolverError::SolveRequired { .. })
        ));
        assert!(session.objective_value().is_err());
    }

    #[test]
    fn modifying_the_model_discards_the_solution() {
        let mut session = session(SolverStatus::Optimal);
        let x = session.new_binary_variable("x").unwrap();
        session.set_objective(Expr::var(x), Sense::Maximize).unwrap();
        session.set_model_name("toy").unwrap();
        assert_eq!(session.model().objective_name(), Some("toy"));
        session.optimize().unwrap();
        assert_eq!(session.value_of(x).unwrap(), 1.0);

        session.new_binary_variable("y").unwrap();
        assert!(session.value_of(x).is_err());
        assert_eq!(session.solver.calls, 1);
    }
}
