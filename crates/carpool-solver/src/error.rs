//! Solver error types.

use carpool_core::ModelError;

/// Error type for solver operations.
#[derive(Debug, Clone, PartialEq)]
pub enum SolverError {
    /// No objective function set.
    NoObjective,
    /// Invalid variable ID.
    InvalidVariableId(u32),
    /// The backend cannot be initialised (missing library, licence, resources).
    SolverNotAvailable(String),
    /// A solution value was requested before a solve produced one.
    SolveRequired {
        /// The operation that needed a solution.
        operation: &'static str,
    },
    /// A configuration value the backend cannot represent.
    InvalidConfig {
        option: &'static str,
        reason: String,
    },
    /// The staged model rejected a variable, row or objective.
    Model(ModelError),
    /// Solver-specific error not covered by other variants.
    SolverSpecific(String),
}

impl SolverError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            SolverError::NoObjective => "SOLVER_NO_OBJECTIVE",
            SolverError::InvalidVariableId(_) => "SOLVER_INVALID_VARIABLE_ID",
            SolverError::SolverNotAvailable(_) => "SOLVER_NOT_AVAILABLE",
            SolverError::SolveRequired { .. } => "SOLVER_SOLVE_REQUIRED",
            SolverError::InvalidConfig { .. } => "SOLVER_INVALID_CONFIG",
            SolverError::Model(err) => err.code(),
            SolverError::SolverSpecific(_) => "SOLVER_SPECIFIC",
        }
    }
}

impl std::fmt::Display for SolverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverError::NoObjective => write!(f, "[{}] Model has no objective", self.code()),
            SolverError::InvalidVariableId(id) => {
                write!(f, "[{}] Variable ID {} does not exist", self.code(), id)
            }
            SolverError::SolverNotAvailable(msg) => {
                write!(f, "[{}] Solver not available: {}", self.code(), msg)
            }
            SolverError::SolveRequired { operation } => write!(
                f,
                "[{}] A solution is required before {}",
                self.code(),
                operation
            ),
            SolverError::InvalidConfig { option, reason } => {
                write!(f, "[{}] Invalid {}: {}", self.code(), option, reason)
            }
            SolverError::Model(err) => write!(f, "{err}"),
            SolverError::SolverSpecific(msg) => {
                write!(f, "[{}] Solver error: {}", self.code(), msg)
            }
        }
    }
}

impl std::error::Error for SolverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SolverError::Model(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ModelError> for SolverError {
    fn from(err: ModelError) -> Self {
        SolverError::Model(err)
    }
}
