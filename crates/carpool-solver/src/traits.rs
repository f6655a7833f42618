//! Solver traits for abstraction over different solver backends.

use carpool_core::{Model, Sense};
use carpool_expr::{ComparisonSense, ConstraintId, Expr, VariableId};

use crate::{Solution, SolverConfig, SolverError, SolverStatus};

/// Trait for backends that solve a complete staged [`Model`].
///
/// Infeasible or unbounded outcomes are returned as a [`Solution`] with the
/// matching status; `Err` is reserved for failures of the backend itself.
pub trait Solver {
    /// Short backend name used in logs.
    fn name(&self) -> &'static str;

    /// Solve the model with the given configuration.
    fn solve(&mut self, model: &Model, config: &SolverConfig) -> Result<Solution, SolverError>;
}

/// Incremental MILP interface consumed by model generators.
///
/// Variables must be created before any constraint references them. After
/// [`MilpBackend::optimize`] returns a status with a solution,
/// [`MilpBackend::value_of`] reads primal values; any later modification
/// discards the solution.
pub trait MilpBackend {
    /// Create a `{0, 1}` variable.
    fn new_binary_variable(&mut self, name: &str) -> Result<VariableId, SolverError>;

    /// Create an integer variable in `[lower, upper]`.
    fn new_integer_variable(
        &mut self,
        lower: f64,
        upper: f64,
        name: &str,
    ) -> Result<VariableId, SolverError>;

    /// Create a continuous variable in `[lower, upper]`.
    fn new_continuous_variable(
        &mut self,
        lower: f64,
        upper: f64,
        name: &str,
    ) -> Result<VariableId, SolverError>;

    /// Pin both bounds of an existing variable to `value`.
    fn fix_variable(&mut self, var: VariableId, value: f64) -> Result<(), SolverError>;

    /// Add `lhs <relation> rhs`.
    fn add_linear_constraint(
        &mut self,
        lhs: Expr,
        relation: ComparisonSense,
        rhs: Expr,
        name: &str,
    ) -> Result<ConstraintId, SolverError>;

    /// Replace the objective.
    fn set_objective(&mut self, expr: Expr, sense: Sense) -> Result<(), SolverError>;

    /// Label the model. Backends without model names may ignore it.
    fn set_model_name(&mut self, name: &str) -> Result<(), SolverError> {
        let _ = name;
        Ok(())
    }

    /// Run the backend and report its terminal status.
    fn optimize(&mut self) -> Result<SolverStatus, SolverError>;

    /// Primal value of `var` in the last solution.
    fn value_of(&self, var: VariableId) -> Result<f64, SolverError>;

    /// Objective value of the last solution.
    fn objective_value(&self) -> Result<f64, SolverError>;
}
