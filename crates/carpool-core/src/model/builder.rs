//! Mutations: variables, rows and the objective.

use carpool_expr::expr::ConstraintExpr;
use carpool_expr::ids::{ConstraintId, VariableId};

use crate::model::Model;
use crate::model::error::ModelError;
use crate::types::{Bounds, Constraint, Objective, Variable};

impl Model {
    /// Append a column.
    ///
    /// Empty bounds (`lower > upper`) are accepted and leave the model
    /// infeasible; NaN bounds are rejected.
    pub fn add_variable(&mut self, variable: Variable) -> Result<VariableId, ModelError> {
        if !variable.bounds.is_numeric() {
            return Err(ModelError::InvalidVariableBounds {
                lower: variable.bounds.lower,
                upper: variable.bounds.upper,
            });
        }
        let id = VariableId::new(self.variables.len() as u32);
        self.variables.push(variable);
        self.columns.push(Vec::new());
        Ok(id)
    }

    /// Replace the bounds of an existing variable, keeping its integrality.
    pub fn set_variable_bounds(&mut self, id: VariableId, bounds: Bounds) -> Result<(), ModelError> {
        if !bounds.is_numeric() {
            return Err(ModelError::InvalidVariableBounds {
                lower: bounds.lower,
                upper: bounds.upper,
            });
        }
        let variable = self
            .variables
            .get_mut(id.index())
            .ok_or(ModelError::InvalidVariableId(id))?;
        variable.bounds = bounds;
        Ok(())
    }

    /// Append a row; repeated variables are merged and zero terms dropped.
    ///
    /// Nothing is stored when a term is invalid.
    pub fn add_row(&mut self, row: ConstraintExpr) -> Result<ConstraintId, ModelError> {
        let (expr, sense, rhs) = row.into_parts();
        let (lower, upper) = sense.row_bounds(rhs - expr.constant());
        let bounds = Bounds::new(lower, upper);
        if !bounds.is_numeric() || bounds.is_empty() {
            return Err(ModelError::InvalidConstraintBounds { lower, upper });
        }
        let terms = self.merge_terms(expr.into_linear_terms())?;

        let id = ConstraintId::new(self.constraints.len() as u32);
        self.constraints.push(Constraint { bounds });
        for (var, coeff) in terms {
            self.columns[var.index()].push((id, coeff));
        }
        Ok(id)
    }

    /// Replace the objective.
    pub fn set_objective(&mut self, objective: Objective) -> Result<(), ModelError> {
        let sense = objective.sense.ok_or(ModelError::NoObjective)?;
        let terms = self.merge_terms(objective.terms)?;
        tracing::debug!(
            component = "model",
            operation = "set_objective",
            status = "success",
            sense = sense.as_str(),
            terms = terms.len(),
            "Set objective function"
        );
        self.objective = Objective {
            sense: Some(sense),
            terms,
        };
        Ok(())
    }
}
