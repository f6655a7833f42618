//! Owned wrapper around a HiGHS row problem.

use std::fmt;

use highs::{Col, HighsModelStatus, RowProblem, Sense as HighsSense, SolvedModel};
use tracing::{debug, trace, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectiveSense {
    Minimize,
    Maximize,
}

/// Model status reported by HiGHS after a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighsStatus {
    Optimal,
    Infeasible,
    Unbounded,
    /// Presolve proved one of the two without deciding which.
    UnboundedOrInfeasible,
    /// May carry a feasible incumbent.
    ReachedTimeLimit,
    /// May carry a feasible incumbent.
    ReachedIterationLimit,
    Unknown,
}

#[derive(Debug, Clone, PartialEq)]
pub enum HighsProblemError {
    ColumnIndexOutOfBounds {
        column_index: usize,
        num_columns: usize,
    },
    InvalidBounds {
        lower: f64,
        upper: f64,
    },
    SolveFailed(String),
    SolveRequired {
        operation: &'static str,
    },
}

impl HighsProblemError {
    pub fn code(&self) -> &'static str {
        match self {
            HighsProblemError::ColumnIndexOutOfBounds { .. } => "HIGHS_COLUMN_OUT_OF_BOUNDS",
            HighsProblemError::InvalidBounds { .. } => "HIGHS_INVALID_BOUNDS",
            HighsProblemError::SolveFailed(_) => "HIGHS_SOLVE_FAILED",
            HighsProblemError::SolveRequired { .. } => "HIGHS_SOLVE_REQUIRED",
        }
    }
}

impl fmt::Display for HighsProblemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HighsProblemError::ColumnIndexOutOfBounds {
                column_index,
                num_columns,
            } => write!(
                f,
                "[{}] Column index {} out of bounds (num_columns = {})",
                self.code(),
                column_index,
                num_columns
            ),
            HighsProblemError::InvalidBounds { lower, upper } => write!(
                f,
                "[{}] Lower bound {} exceeds upper bound {}",
                self.code(),
                lower,
                upper
            ),
            HighsProblemError::SolveFailed(msg) => {
                write!(f, "[{}] HiGHS failed to solve: {}", self.code(), msg)
            }
            HighsProblemError::SolveRequired { operation } => {
                write!(f, "[{}] Solve must be called before {}", self.code(), operation)
            }
        }
    }
}

impl std::error::Error for HighsProblemError {}

/// Option value types for HiGHS configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum HighsOption {
    Bool(bool),
    Int(i32),
    Float(f64),
}

/// Columns and rows staged for one HiGHS solve.
///
/// The problem is consumed by [`HighsProblem::solve`]; afterwards only the
/// solution accessors are meaningful.
pub struct HighsProblem {
    problem: RowProblem,
    columns: Vec<Col>,
    sense: ObjectiveSense,
    options: Vec<(String, HighsOption)>,
    quiet: bool,
    /// First column added with `lower > upper`.
    empty_column: Option<usize>,
    solved: Option<SolvedModel>,
}

impl HighsProblem {
    pub fn new() -> Self {
        Self {
            problem: RowProblem::default(),
            columns: Vec::new(),
            sense: ObjectiveSense::Minimize,
            options: Vec::new(),
            quiet: true,
            empty_column: None,
            solved: None,
        }
    }

    /// Add a column and return its index.
    ///
    /// A column with `lower > upper` is kept so indices stay aligned, but it
    /// makes the problem infeasible and [`HighsProblem::solve`] reports so
    /// without calling HiGHS.
    ///
    /// # Errors
    ///
    /// Returns [`HighsProblemError::InvalidBounds`] when a bound is NaN.
    pub fn add_column(
        &mut self,
        lower: f64,
        upper: f64,
        objective_coefficient: f64,
        is_integer: bool,
    ) -> Result<usize, HighsProblemError> {
        if lower.is_nan() || upper.is_nan() {
            return Err(HighsProblemError::InvalidBounds { lower, upper });
        }
        let upper = if lower > upper {
            trace!(
                component = "highs",
                operation = "add_column",
                column_index = self.columns.len(),
                lower,
                upper,
                "Column has empty bounds"
            );
            self.empty_column.get_or_insert(self.columns.len());
            lower
        } else {
            upper
        };
        let col = if is_integer {
            self.problem
                .add_integer_column(objective_coefficient, lower..=upper)
        } else {
            self.problem.add_column(objective_coefficient, lower..=upper)
        };
        self.columns.push(col);
        self.solved = None;
        Ok(self.columns.len() - 1)
    }

    /// Add a row `lower <= Σ coeff·col <= upper` over existing column indices.
    ///
    /// # Errors
    ///
    /// Returns [`HighsProblemError::ColumnIndexOutOfBounds`] for unknown columns.
    pub fn add_row(
        &mut self,
        lower: f64,
        upper: f64,
        factors: &[(usize, f64)],
    ) -> Result<usize, HighsProblemError> {
        let num_columns = self.columns.len();
        let mut row = Vec::with_capacity(factors.len());
        for &(column_index, coeff) in factors {
            let col = self.columns.get(column_index).copied().ok_or_else(|| {
                warn!(
                    component = "highs",
                    operation = "add_row",
                    status = "error",
                    column_index,
                    num_columns,
                    "Column index out of bounds for row"
                );
                HighsProblemError::ColumnIndexOutOfBounds {
                    column_index,
                    num_columns,
                }
            })?;
            row.push((col, coeff));
        }
        self.problem.add_row(lower..=upper, row);
        self.solved = None;
        Ok(self.problem.num_rows() - 1)
    }

    pub fn set_sense(&mut self, sense: ObjectiveSense) {
        self.sense = sense;
    }

    /// Keep HiGHS output enabled (it is silenced by default).
    pub fn set_output(&mut self, enabled: bool) {
        self.quiet = !enabled;
    }

    pub fn set_option(&mut self, name: impl Into<String>, value: HighsOption) {
        self.options.push((name.into(), value));
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn num_rows(&self) -> usize {
        self.problem.num_rows()
    }

    /// Hand the staged problem to HiGHS and wait for a status.
    ///
    /// A problem holding an empty column is [`HighsStatus::Infeasible`] and
    /// never reaches HiGHS.
    ///
    /// # Errors
    ///
    /// Returns [`HighsProblemError::SolveFailed`] when HiGHS reports an error
    /// instead of a model status.
    pub fn solve(&mut self) -> Result<HighsStatus, HighsProblemError> {
        if let Some(column_index) = self.empty_column {
            debug!(
                component = "highs",
                operation = "solve",
                status = "infeasible",
                column_index,
                num_cols = self.columns.len(),
                "Column bounds are empty; skipping HiGHS"
            );
            self.solved = None;
            return Ok(HighsStatus::Infeasible);
        }
        let sense = match self.sense {
            ObjectiveSense::Minimize => HighsSense::Minimise,
            ObjectiveSense::Maximize => HighsSense::Maximise,
        };
        debug!(
            component = "highs",
            operation = "solve",
            status = "started",
            num_cols = self.columns.len(),
            num_rows = self.problem.num_rows(),
            sense = ?self.sense,
            "Passing problem to HiGHS"
        );

        let problem = std::mem::take(&mut self.problem);
        self.columns.clear();
        let mut model = problem.optimise(sense);
        if self.quiet {
            model.make_quiet();
        }
        for (name, value) in self.options.drain(..) {
            trace!(component = "highs", operation = "set_option", option = %name, ?value);
            match value {
                HighsOption::Bool(v) => model.set_option(name.as_str(), v),
                HighsOption::Int(v) => model.set_option(name.as_str(), v),
                HighsOption::Float(v) => model.set_option(name.as_str(), v),
            }
        }

        let solved = model
            .try_solve()
            .map_err(|err| HighsProblemError::SolveFailed(format!("{err:?}")))?;
        let status = map_status(solved.status());
        self.solved = Some(solved);
        Ok(status)
    }

    /// Column values of the last solve, in column order.
    ///
    /// # Errors
    ///
    /// Returns [`HighsProblemError::SolveRequired`] before a solve.
    pub fn column_values(&self) -> Result<Vec<f64>, HighsProblemError> {
        let solved = self.solved.as_ref().ok_or(HighsProblemError::SolveRequired {
            operation: "column_values",
        })?;
        Ok(solved.get_solution().columns().to_vec())
    }

    /// # Errors
    ///
    /// Returns [`HighsProblemError::SolveRequired`] before a solve.
    pub fn objective_value(&self) -> Result<f64, HighsProblemError> {
        self.solved
            .as_ref()
            .map(SolvedModel::objective_value)
            .ok_or(HighsProblemError::SolveRequired {
                operation: "objective_value",
            })
    }

    /// Relative MIP gap of the last solve, NaN before a solve.
    pub fn mip_gap(&self) -> f64 {
        self.solved.as_ref().map_or(f64::NAN, SolvedModel::mip_gap)
    }
}

impl Default for HighsProblem {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HighsProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HighsProblem")
            .field("num_columns", &self.columns.len())
            .field("num_rows", &self.problem.num_rows())
            .field("sense", &self.sense)
            .field("solved", &self.solved.is_some())
            .finish_non_exhaustive()
    }
}

fn map_status(status: HighsModelStatus) -> HighsStatus {
    match status {
        HighsModelStatus::Optimal => HighsStatus::Optimal,
        HighsModelStatus::Infeasible => HighsStatus::Infeasible,
        HighsModelStatus::Unbounded => HighsStatus::Unbounded,
        HighsModelStatus::UnboundedOrInfeasible => HighsStatus::UnboundedOrInfeasible,
        HighsModelStatus::ReachedTimeLimit => HighsStatus::ReachedTimeLimit,
        HighsModelStatus::ReachedIterationLimit => HighsStatus::ReachedIterationLimit,
        _ => HighsStatus::Unknown,
    }
}
