//! Emits the car-sharing MILP against any [`MilpBackend`].
//!
//! Variables are declared densely up front; each constraint family is a
//! separate method that only reads [`ModelVariables`], so families can be
//! built and tested independently and in any order.

mod constraints;
mod objective;
mod variables;

pub use objective::MODEL_NAME;

use std::ops::{Add, AddAssign};
use std::time::Instant;

use carpool_expr::VariableId;
use carpool_solver::MilpBackend;
use carpool_tools::MemoryTrail;
use tracing::{debug, trace};

use crate::error::MatchingError;
use crate::instance::ProblemInstance;
use crate::nodes::NodeIndexer;
use crate::options::BuildOptions;

/// Handles of every model variable, stored in flat arenas.
///
/// `travel` and `precedes` are laid out as `(i * N + j) * D + k`, `load` as
/// `i * D + k`.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelVariables {
    n_nodes: usize,
    n_drivers: usize,
    travel: Vec<VariableId>,
    precedes: Vec<VariableId>,
    load: Vec<VariableId>,
    length: Vec<VariableId>,
}

impl ModelVariables {
    fn arc_offset(&self, i: usize, j: usize, k: usize) -> usize {
        debug_assert!(i < self.n_nodes && j < self.n_nodes && k < self.n_drivers);
        (i * self.n_nodes + j) * self.n_drivers + k
    }

    /// Driver `k` drives directly from `i` to `j`.
    pub fn travel(&self, i: usize, j: usize, k: usize) -> VariableId {
        self.travel[self.arc_offset(i, j, k)]
    }

    /// On driver `k`'s route, `i` is visited strictly before `j`.
    pub fn precedes(&self, i: usize, j: usize, k: usize) -> VariableId {
        self.precedes[self.arc_offset(i, j, k)]
    }

    /// Occupied seats of driver `k` right after node `i`.
    pub fn load(&self, i: usize, k: usize) -> VariableId {
        self.load[i * self.n_drivers + k]
    }

    pub fn length(&self, k: usize) -> VariableId {
        self.length[k]
    }

    pub fn len(&self) -> usize {
        self.travel.len() + self.precedes.len() + self.load.len() + self.length.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Rows and variable fixings emitted by one constraint family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FamilySize {
    pub rows: usize,
    pub fixed: usize,
}

impl Add for FamilySize {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            rows: self.rows + other.rows,
            fixed: self.fixed + other.fixed,
        }
    }
}

impl AddAssign for FamilySize {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

/// Per-family sizes of a built model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConstraintCounts {
    pub length_definition: FamilySize,
    pub pickup_once: FamilySize,
    pub pairing: FamilySize,
    pub origin_departure: FamilySize,
    pub destination_arrival: FamilySize,
    pub forbidden_arcs: FamilySize,
    pub flow_conservation: FamilySize,
    pub load_consistency: FamilySize,
    pub precedence: FamilySize,
}

impl ConstraintCounts {
    pub fn total(&self) -> FamilySize {
        self.length_definition
            + self.pickup_once
            + self.pairing
            + self.origin_departure
            + self.destination_arrival
            + self.forbidden_arcs
            + self.flow_conservation
            + self.load_consistency
            + self.precedence
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BuildReport {
    pub variables: usize,
    pub counts: ConstraintCounts,
    pub duration_ms: f64,
}

/// Output of [`ModelBuilder::build`].
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltModel {
    pub variables: ModelVariables,
    pub report: BuildReport,
}

/// Generates the formulation for one [`ProblemInstance`].
#[derive(Debug, Clone, Copy)]
pub struct ModelBuilder<'a> {
    instance: &'a ProblemInstance,
    nodes: NodeIndexer,
    prune: bool,
}

impl<'a> ModelBuilder<'a> {
    pub fn new(instance: &'a ProblemInstance, options: &BuildOptions) -> Self {
        Self {
            instance,
            nodes: instance.nodes(),
            prune: options.prune_forbidden_arcs,
        }
    }

    pub fn nodes(&self) -> NodeIndexer {
        self.nodes
    }

    /// Declare every variable, emit all constraint families and set the
    /// objective.
    ///
    /// # Errors
    ///
    /// Propagates the first backend failure; the backend is then left with a
    /// partial model and should be dropped.
    pub fn build<B: MilpBackend>(&self, backend: &mut B) -> Result<BuiltModel, MatchingError> {
        let started = Instant::now();
        let mut trail = MemoryTrail::new();
        self.record(&mut trail, "start");

        let variables = self.declare_variables(backend)?;
        self.record(&mut trail, "variables");

        let counts = ConstraintCounts {
            length_definition: self.length_definition(backend, &variables)?,
            pickup_once: self.pickup_once(backend, &variables)?,
            pairing: self.pickup_dropoff_pairing(backend, &variables)?,
            origin_departure: self.origin_departure(backend, &variables)?,
            destination_arrival: self.destination_arrival(backend, &variables)?,
            forbidden_arcs: self.forbidden_arcs(backend, &variables)?,
            flow_conservation: self.flow_conservation(backend, &variables)?,
            load_consistency: self.load_consistency(backend, &variables)?,
            precedence: self.precedence(backend, &variables)?,
        };
        self.record(&mut trail, "constraints");

        self.objective(backend, &variables)?;

        let duration_ms = started.elapsed().as_secs_f64() * 1000.0;
        let total = counts.total();
        debug!(
            component = "builder",
            operation = "build",
            status = "success",
            drivers = self.nodes.n_drivers(),
            passengers = self.nodes.n_passengers(),
            variables = variables.len(),
            rows = total.rows,
            fixed = total.fixed,
            pruned = self.prune,
            rss_growth_bytes = trail.total_diff(),
            duration_ms,
            "Built car sharing model"
        );

        Ok(BuiltModel {
            report: BuildReport {
                variables: variables.len(),
                counts,
                duration_ms,
            },
            variables,
        })
    }

    /// Whether arc `i -> j` of driver `k` should appear in sums and rows.
    fn uses_arc(&self, i: usize, j: usize, k: usize) -> bool {
        !self.prune || !self.nodes.is_forbidden_arc(i, j, k)
    }

    fn record(&self, trail: &mut MemoryTrail, stage: &str) {
        match trail.record(stage) {
            Ok(snapshot) => trace!(
                component = "builder",
                operation = "memory",
                stage,
                rss_bytes = snapshot.rss_bytes,
                "Recorded memory snapshot"
            ),
            Err(err) => trace!(
                component = "builder",
                operation = "memory",
                stage,
                error = %err,
                "Memory snapshot unavailable"
            ),
        }
    }
}

#[cfg(test)]
mod tests;
