//! Model error types.

use carpool_expr::ids::{ConstraintId, VariableId};

/// Rejected model mutations.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    InvalidVariableId(VariableId),
    /// A variable bound is NaN.
    InvalidVariableBounds { lower: f64, upper: f64 },
    InvalidConstraintId(ConstraintId),
    /// A row bound is NaN or the row admits no value.
    InvalidConstraintBounds { lower: f64, upper: f64 },
    /// Coefficient is NaN or infinite.
    InvalidCoefficient { coefficient: f64 },
    /// An objective without a sense.
    NoObjective,
}

impl ModelError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            ModelError::InvalidVariableId(_) => "VARIABLE_INVALID_ID",
            ModelError::InvalidVariableBounds { .. } => "VARIABLE_INVALID_BOUNDS",
            ModelError::InvalidConstraintId(_) => "CONSTRAINT_INVALID_ID",
            ModelError::InvalidConstraintBounds { .. } => "CONSTRAINT_INVALID_BOUNDS",
            ModelError::InvalidCoefficient { .. } => "COEFFICIENT_INVALID",
            ModelError::NoObjective => "OBJECTIVE_MISSING",
        }
    }
}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelError::InvalidVariableId(id) => {
                write!(f, "[{}] Variable ID {} does not exist", self.code(), id)
            }
            ModelError::InvalidVariableBounds { lower, upper } => write!(
                f,
                "[{}] Variable bounds must be numbers (lower = {}, upper = {})",
                self.code(),
                lower,
                upper
            ),
            ModelError::InvalidConstraintId(id) => {
                write!(f, "[{}] Constraint ID {} does not exist", self.code(), id)
            }
            ModelError::InvalidConstraintBounds { lower, upper } => write!(
                f,
                "[{}] Constraint bounds invalid (lower = {}, upper = {})",
                self.code(),
                lower,
                upper
            ),
            ModelError::InvalidCoefficient { coefficient } => write!(
                f,
                "[{}] Coefficient must be finite (got {})",
                self.code(),
                coefficient
            ),
            ModelError::NoObjective => {
                write!(f, "[{}] Objective has no sense", self.code())
            }
        }
    }
}

impl std::error::Error for ModelError {}
