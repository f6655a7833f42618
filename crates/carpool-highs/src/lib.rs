//! HiGHS backend for carpool models.
//!
//! [`HighsSolver`] implements [`carpool_solver::Solver`]: it copies a staged
//! [`carpool_core::Model`] into a HiGHS row problem, solves it, and maps the
//! result back into a solver-agnostic [`carpool_solver::Solution`].

pub mod problem;
pub mod solver;
mod status;

pub use problem::{HighsOption, HighsProblem, HighsProblemError, HighsStatus, ObjectiveSense};
pub use solver::HighsSolver;
