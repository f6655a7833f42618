//! Car-sharing ride matching as a mixed-integer linear program.
//!
//! Drivers with seat capacities and distance budgets and passengers with a
//! pickup and a drop-off are encoded on one node graph ([`NodeIndexer`]).
//! [`ModelBuilder`] emits routing, capacity and precedence constraints
//! against any [`carpool_solver::MilpBackend`], the backend solves, and
//! [`SolutionExtractor`] turns the solved arcs back into per-driver routes.
//!
//! ```no_run
//! use carpool_matching::{BuildOptions, solve, samples};
//! # fn run<S: carpool_solver::Solver>(solver: S) -> Result<(), Box<dyn std::error::Error>> {
//! let instance = samples::scenario_a()?;
//! let outcome = solve(&instance, solver, &BuildOptions::default())?;
//! if let Some(plan) = outcome.plan() {
//!     println!("{plan}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod error;
pub mod extract;
pub mod instance;
pub mod nodes;
pub mod options;
pub mod samples;
pub mod solve;

#[cfg(test)]
mod testing;

pub use builder::{BuildReport, BuiltModel, ConstraintCounts, FamilySize, ModelBuilder, ModelVariables, MODEL_NAME};
pub use error::{ConstructionError, MatchingError};
pub use extract::{DriverRoute, RoutePlan, SolutionExtractor};
pub use instance::ProblemInstance;
pub use nodes::{NodeIndexer, NodeRole};
pub use options::BuildOptions;
pub use solve::{SolveOutcome, solve, solve_with_backend};
