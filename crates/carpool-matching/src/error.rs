//! Error types for instance validation, model building and extraction.

use carpool_core::ModelError;
use carpool_solver::SolverError;

/// Malformed [`crate::ProblemInstance`] input.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstructionError {
    SeatsLengthMismatch { drivers: usize, seats: usize },
    MaxDistLengthMismatch { drivers: usize, max_dist: usize },
    DistanceRowCount { expected: usize, rows: usize },
    DistanceColumnCount { row: usize, expected: usize, columns: usize },
    InvalidDistance { from: usize, to: usize, value: f64 },
    InvalidMaxDist { driver: usize, value: f64 },
}

impl ConstructionError {
    pub fn code(&self) -> &'static str {
        match self {
            ConstructionError::SeatsLengthMismatch { .. } => "INSTANCE_SEATS_LENGTH",
            ConstructionError::MaxDistLengthMismatch { .. } => "INSTANCE_MAX_DIST_LENGTH",
            ConstructionError::DistanceRowCount { .. } => "INSTANCE_DISTANCE_ROWS",
            ConstructionError::DistanceColumnCount { .. } => "INSTANCE_DISTANCE_COLUMNS",
            ConstructionError::InvalidDistance { .. } => "INSTANCE_INVALID_DISTANCE",
            ConstructionError::InvalidMaxDist { .. } => "INSTANCE_INVALID_MAX_DIST",
        }
    }
}

impl std::fmt::Display for ConstructionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConstructionError::SeatsLengthMismatch { drivers, seats } => write!(
                f,
                "[{}] Expected {} seat capacities, got {}",
                self.code(),
                drivers,
                seats
            ),
            ConstructionError::MaxDistLengthMismatch { drivers, max_dist } => write!(
                f,
                "[{}] Expected {} distance budgets, got {}",
                self.code(),
                drivers,
                max_dist
            ),
            ConstructionError::DistanceRowCount { expected, rows } => write!(
                f,
                "[{}] Distance matrix needs {} rows, got {}",
                self.code(),
                expected,
                rows
            ),
            ConstructionError::DistanceColumnCount {
                row,
                expected,
                columns,
            } => write!(
                f,
                "[{}] Distance row {} needs {} columns, got {}",
                self.code(),
                row,
                expected,
                columns
            ),
            ConstructionError::InvalidDistance { from, to, value } => write!(
                f,
                "[{}] Distance {} -> {} must be finite and non-negative, got {}",
                self.code(),
                from,
                to,
                value
            ),
            ConstructionError::InvalidMaxDist { driver, value } => write!(
                f,
                "[{}] Distance budget of driver {} must be finite and non-negative, got {}",
                self.code(),
                driver,
                value
            ),
        }
    }
}

impl std::error::Error for ConstructionError {}

/// Any failure between instance validation and route extraction.
///
/// Infeasibility is not an error; see [`crate::SolveOutcome`].
#[derive(Debug, Clone, PartialEq)]
pub enum MatchingError {
    Construction(ConstructionError),
    Solver(SolverError),
    /// A solved driver route that cannot be walked from origin to destination:
    /// `node` has no chosen outgoing arc, or its successor was already visited.
    BrokenRoute { driver: usize, node: usize },
}

impl MatchingError {
    pub fn code(&self) -> &'static str {
        match self {
            MatchingError::Construction(err) => err.code(),
            MatchingError::Solver(err) => err.code(),
            MatchingError::BrokenRoute { .. } => "ROUTE_BROKEN",
        }
    }
}

impl std::fmt::Display for MatchingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchingError::Construction(err) => write!(f, "{err}"),
            MatchingError::Solver(err) => write!(f, "{err}"),
            MatchingError::BrokenRoute { driver, node } => write!(
                f,
                "[{}] Route of driver {} cannot be followed past node {}: no chosen arc or a revisit",
                self.code(),
                driver,
                node
            ),
        }
    }
}

impl std::error::Error for MatchingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MatchingError::Construction(err) => Some(err),
            MatchingError::Solver(err) => Some(err),
            MatchingError::BrokenRoute { .. } => None,
        }
    }
}

impl From<ConstructionError> for MatchingError {
    fn from(err: ConstructionError) -> Self {
        MatchingError::Construction(err)
    }
}

impl From<SolverError> for MatchingError {
    fn from(err: SolverError) -> Self {
        MatchingError::Solver(err)
    }
}

impl From<ModelError> for MatchingError {
    fn from(err: ModelError) -> Self {
        MatchingError::Solver(SolverError::Model(err))
    }
}
