//! Shared solver abstractions for carpool models.
//!
//! # Overview
//!
//! - [`SolverConfig`]: Configuration options for solver behavior
//! - [`SolverStatus`]: Common status values across solvers
//! - [`SolverError`]: Error types for solver operations
//! - [`Solution`]: Solver-agnostic primal solution
//! - [`Solver`]: Trait for backends that solve a whole [`carpool_core::Model`]
//! - [`MilpBackend`]: Incremental variable/constraint/objective interface used
//!   by model generators
//! - [`Session`]: One model plus one solver, driven through [`MilpBackend`]

mod config;
mod error;
mod session;
mod solution;
mod status;
mod traits;

pub use config::SolverConfig;
pub use error::SolverError;
pub use session::Session;
pub use solution::Solution;
pub use status::SolverStatus;
pub use traits::{MilpBackend, Solver};
