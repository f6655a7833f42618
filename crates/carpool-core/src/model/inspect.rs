//! Owned, comparable snapshots of a model.

use carpool_expr::ids::{ConstraintId, VariableId};

use crate::model::Model;
use crate::types::{Bounds, Sense};

#[derive(Debug, Clone, PartialEq)]
pub struct VariableView {
    pub id: VariableId,
    pub name: Option<String>,
    pub bounds: Bounds,
    pub is_integer: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintView {
    pub id: ConstraintId,
    pub name: Option<String>,
    pub bounds: Bounds,
    /// Ordered by variable id.
    pub terms: Vec<(VariableId, f64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectiveView {
    pub sense: Sense,
    pub terms: Vec<(VariableId, f64)>,
    pub name: Option<String>,
}

/// Two snapshots compare equal when the models carry the same variables,
/// rows, coefficients, names and objective, in the same order.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSnapshot {
    pub variables: Vec<VariableView>,
    pub constraints: Vec<ConstraintView>,
    pub objective: Option<ObjectiveView>,
}

impl Model {
    pub fn snapshot(&self) -> ModelSnapshot {
        let variables = self
            .variables()
            .map(|(id, var)| VariableView {
                id,
                name: self.variable_name(id).map(str::to_string),
                bounds: var.bounds,
                is_integer: var.is_integer,
            })
            .collect();

        let constraints = self
            .constraints()
            .zip(self.rows())
            .map(|((id, con), terms)| ConstraintView {
                id,
                name: self.constraint_name(id).map(str::to_string),
                bounds: con.bounds,
                terms,
            })
            .collect();

        let objective = self.objective.sense.map(|sense| ObjectiveView {
            sense,
            terms: self.objective.terms.clone(),
            name: self.objective_name.clone(),
        });

        ModelSnapshot {
            variables,
            constraints,
            objective,
        }
    }
}
