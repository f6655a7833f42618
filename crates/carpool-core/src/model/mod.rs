//! The staged [`Model`].
//!
//! A column-first sparse MILP that records every variable, row and objective
//! term before any solver is involved, so a formulation can be inspected and
//! compared on its own.
//!
//! - [`builder`]: adding variables, rows and the objective
//! - [`storage`]: counts, iteration and the row-major view backends read
//! - [`metadata`]: variable, row and model names
//! - [`inspect`]: owned snapshots

mod builder;
mod error;
mod inspect;
mod metadata;
mod storage;

use std::collections::BTreeMap;

use carpool_expr::ids::{ConstraintId, VariableId};

use crate::types::{Constraint, Objective, Variable};
use metadata::Names;

pub use error::ModelError;
pub use inspect::{ConstraintView, ModelSnapshot, ObjectiveView, VariableView};

/// Variable and constraint ids are dense and allocated in insertion order,
/// which is also the column and row order handed to solver backends.
#[derive(Debug, Clone, Default)]
pub struct Model {
    variables: Vec<Variable>,
    constraints: Vec<Constraint>,
    /// Per variable, `(row, coefficient)` in increasing row order.
    columns: Vec<Vec<(ConstraintId, f64)>>,
    objective: Objective,
    objective_name: Option<String>,
    variable_names: Names<VariableId>,
    constraint_names: Names<ConstraintId>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn objective(&self) -> &Objective {
        &self.objective
    }

    fn ensure_variable_exists(&self, id: VariableId) -> Result<(), ModelError> {
        if id.index() < self.variables.len() {
            Ok(())
        } else {
            Err(ModelError::InvalidVariableId(id))
        }
    }

    /// Check ids and coefficients, then sum duplicates in variable order.
    fn merge_terms(
        &self,
        terms: Vec<(VariableId, f64)>,
    ) -> Result<Vec<(VariableId, f64)>, ModelError> {
        let terms_in = terms.len();
        let mut merged: BTreeMap<VariableId, f64> = BTreeMap::new();
        for (var, coefficient) in terms {
            self.ensure_variable_exists(var)?;
            if !coefficient.is_finite() {
                return Err(ModelError::InvalidCoefficient { coefficient });
            }
            *merged.entry(var).or_insert(0.0) += coefficient;
        }
        let merged: Vec<(VariableId, f64)> = merged
            .into_iter()
            .filter(|(_, coeff)| *coeff != 0.0)
            .collect();
        tracing::trace!(
            component = "model",
            operation = "merge_terms",
            terms_in,
            terms_out = merged.len(),
            "Merged linear terms"
        );
        Ok(merged)
    }
}
