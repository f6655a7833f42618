//! Reads driver routes back out of a solved model.

use std::fmt;

use carpool_solver::MilpBackend;
use serde::Serialize;
use tracing::{debug, warn};

use crate::builder::ModelVariables;
use crate::error::MatchingError;
use crate::instance::ProblemInstance;

/// Binary values at or above this are read as 1.
const ACTIVE: f64 = 0.5;

/// One driver's part of the solution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriverRoute {
    pub driver: usize,
    /// Used arcs in node-index scan order.
    pub arcs: Vec<(usize, usize)>,
    /// Nodes walked from the driver's origin to its destination.
    pub itinerary: Vec<usize>,
    /// Passengers picked up along `itinerary`, in visiting order.
    pub passengers: Vec<usize>,
    /// Used arcs not on `itinerary`. They can only form closed loops over
    /// pickups and drop-offs, which the model does not rule out.
    pub detached_arcs: Vec<(usize, usize)>,
    /// Value of the driver's length variable.
    pub length: f64,
}

impl DriverRoute {
    pub fn is_idle(&self) -> bool {
        self.itinerary.len() == 2 && self.detached_arcs.is_empty()
    }
}

/// Routes of every driver plus the objective value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePlan {
    pub objective_value: f64,
    pub routes: Vec<DriverRoute>,
}

impl RoutePlan {
    /// Passengers picked up on some driver's itinerary, in index order.
    ///
    /// Pickups reached only through [`DriverRoute::detached_arcs`] are not
    /// counted, so this can be shorter than the objective suggests.
    pub fn served_passengers(&self) -> Vec<usize> {
        let mut served: Vec<usize> = self
            .routes
            .iter()
            .flat_map(|route| route.passengers.iter().copied())
            .collect();
        served.sort_unstable();
        served.dedup();
        served
    }

    pub fn arcs_driven(&self) -> usize {
        self.routes.iter().map(|route| route.arcs.len()).sum()
    }
}

impl fmt::Display for RoutePlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Solution:")?;
        for route in &self.routes {
            for (from, to) in &route.arcs {
                writeln!(f, "Driver {} go from {} to {}", route.driver, from, to)?;
            }
            writeln!(f, "Driver {} passengers: {:?}", route.driver, route.passengers)?;
        }
        write!(f, "Objective: {}", self.objective_value)
    }
}

/// Turns solved `travel` values into [`DriverRoute`]s.
#[derive(Debug, Clone, Copy)]
pub struct SolutionExtractor<'a> {
    instance: &'a ProblemInstance,
    variables: &'a ModelVariables,
}

impl<'a> SolutionExtractor<'a> {
    pub fn new(instance: &'a ProblemInstance, variables: &'a ModelVariables) -> Self {
        Self {
            instance,
            variables,
        }
    }

    /// Read every driver's arcs and walk them from origin to destination.
    ///
    /// # Errors
    ///
    /// Returns [`MatchingError::Solver`] when the backend holds no solution
    /// and [`MatchingError::BrokenRoute`] when a walk dead-ends or loops.
    pub fn extract<B: MilpBackend>(&self, backend: &B) -> Result<RoutePlan, MatchingError> {
        let routes = (0..self.instance.n_drivers())
            .map(|k| self.driver_route(backend, k))
            .collect::<Result<Vec<_>, _>>()?;
        let plan = RoutePlan {
            objective_value: backend.objective_value()?,
            routes,
        };
        debug!(
            component = "extract",
            operation = "extract",
            status = "success",
            drivers = plan.routes.len(),
            arcs = plan.arcs_driven(),
            idle = plan.routes.iter().filter(|route| route.is_idle()).count(),
            served = plan.served_passengers().len(),
            objective_value = plan.objective_value,
            "Extracted route plan"
        );
        Ok(plan)
    }

    fn driver_route<B: MilpBackend>(&self, backend: &B, k: usize) -> Result<DriverRoute, MatchingError> {
        let nodes = self.instance.nodes();
        let mut arcs = Vec::new();
        for i in nodes.nodes() {
            for j in nodes.nodes() {
                if backend.value_of(self.variables.travel(i, j, k))? > ACTIVE {
                    arcs.push((i, j));
                }
            }
        }

        let origin = nodes.origin(k);
        let destination = nodes.destination(k);
        let mut itinerary = vec![origin];
        let mut visited = vec![false; nodes.node_count()];
        visited[origin] = true;
        let mut current = origin;
        while current != destination {
            let next = arcs
                .iter()
                .find(|(from, _)| *from == current)
                .map(|(_, to)| *to)
                .filter(|to| !visited[*to])
                .ok_or(MatchingError::BrokenRoute {
                    driver: k,
                    node: current,
                })?;
            visited[next] = true;
            itinerary.push(next);
            current = next;
        }

        let passengers = itinerary
            .iter()
            .filter(|node| nodes.is_pickup(**node))
            .copied()
            .collect();
        let detached_arcs: Vec<(usize, usize)> = arcs
            .iter()
            .filter(|(from, _)| !visited[*from])
            .copied()
            .collect();
        if !detached_arcs.is_empty() {
            warn!(
                component = "extract",
                operation = "walk_route",
                status = "warn",
                driver = k,
                detached = detached_arcs.len(),
                "Solution contains arcs off the driver's route"
            );
        }

        Ok(DriverRoute {
            driver: k,
            length: backend.value_of(self.variables.length(k))?,
            arcs,
            itinerary,
            passengers,
            detached_arcs,
        })
    }
}
