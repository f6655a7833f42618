//! Carpool core model: an in-memory MILP staged before it reaches a solver.

pub mod model;
pub mod types;

pub use model::{ConstraintView, Model, ModelError, ModelSnapshot, ObjectiveView, VariableView};

pub use types::{Bounds, Constraint, Objective, Sense, Variable};
