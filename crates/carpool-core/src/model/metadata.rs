//! Names attached to variables, rows and the objective.

use std::collections::{BTreeMap, HashMap};

use carpool_expr::ids::{ConstraintId, VariableId};

use crate::model::Model;
use crate::model::error::ModelError;

/// Two-way name table; renaming an id frees its old name.
#[derive(Debug, Clone)]
pub(crate) struct Names<Id> {
    by_id: BTreeMap<Id, String>,
    by_name: HashMap<String, Id>,
}

impl<Id> Default for Names<Id> {
    fn default() -> Self {
        Self {
            by_id: BTreeMap::new(),
            by_name: HashMap::new(),
        }
    }
}

impl<Id: Copy + Ord> Names<Id> {
    fn insert(&mut self, id: Id, name: String) {
        if let Some(old) = self.by_id.insert(id, name.clone()) {
            self.by_name.remove(&old);
        }
        self.by_name.insert(name, id);
    }

    fn name(&self, id: Id) -> Option<&str> {
        self.by_id.get(&id).map(String::as_str)
    }

    fn find(&self, name: &str) -> Option<Id> {
        self.by_name.get(name).copied()
    }
}

impl Model {
    pub fn set_variable_name(&mut self, id: VariableId, name: String) -> Result<(), ModelError> {
        self.ensure_variable_exists(id)?;
        self.variable_names.insert(id, name);
        Ok(())
    }

    pub fn variable_name(&self, id: VariableId) -> Option<&str> {
        self.variable_names.name(id)
    }

    pub fn variable_by_name(&self, name: &str) -> Option<VariableId> {
        self.variable_names.find(name)
    }

    pub fn set_constraint_name(&mut self, id: ConstraintId, name: String) -> Result<(), ModelError> {
        if id.index() >= self.constraints.len() {
            return Err(ModelError::InvalidConstraintId(id));
        }
        self.constraint_names.insert(id, name);
        Ok(())
    }

    pub fn constraint_name(&self, id: ConstraintId) -> Option<&str> {
        self.constraint_names.name(id)
    }

    pub fn constraint_by_name(&self, name: &str) -> Option<ConstraintId> {
        self.constraint_names.find(name)
    }

    /// Label for the model as a whole, kept alongside the objective.
    pub fn set_objective_name(&mut self, name: Option<String>) {
        self.objective_name = name;
    }

    pub fn objective_name(&self) -> Option<&str> {
        self.objective_name.as_deref()
    }
}
