//! The constraint families. Each method emits one family and reports its size.

use std::time::Instant;

use carpool_expr::{ComparisonSense, Expr};
use carpool_solver::{MilpBackend, SolverError};
use tracing::debug;

use super::{FamilySize, ModelBuilder, ModelVariables};

fn log_family(family: &'static str, size: FamilySize, started: Instant) {
    debug!(
        component = "builder",
        operation = "constraints",
        status = "success",
        family,
        rows = size.rows,
        fixed = size.fixed,
        duration_ms = started.elapsed().as_secs_f64() * 1000.0,
        "Emitted constraint family"
    );
}

impl ModelBuilder<'_> {
    /// `Σ_j travel[i][j][k]`
    fn departures(&self, vars: &ModelVariables, i: usize, k: usize) -> Expr {
        self.nodes
            .nodes()
            .filter(|&j| self.uses_arc(i, j, k))
            .map(|j| (vars.travel(i, j, k), 1.0))
            .collect()
    }

    /// `Σ_i travel[i][j][k]`
    fn arrivals(&self, vars: &ModelVariables, j: usize, k: usize) -> Expr {
        self.nodes
            .nodes()
            .filter(|&i| self.uses_arc(i, j, k))
            .map(|i| (vars.travel(i, j, k), 1.0))
            .collect()
    }

    /// `length[k] = Σ_{i,j} distance[i][j] · travel[i][j][k]`; the budget is
    /// the upper bound of `length[k]`.
    pub fn length_definition<B: MilpBackend>(
        &self,
        backend: &mut B,
        vars: &ModelVariables,
    ) -> Result<FamilySize, SolverError> {
        let started = Instant::now();
        let mut size = FamilySize::default();
        for k in 0..self.nodes.n_drivers() {
            let mut driven = Expr::new_empty();
            for i in self.nodes.nodes() {
                for j in self.nodes.nodes() {
                    if self.uses_arc(i, j, k) {
                        driven.add_term(vars.travel(i, j, k), self.instance.distance(i, j));
                    }
                }
            }
            backend.add_linear_constraint(
                Expr::var(vars.length(k)),
                ComparisonSense::Equal,
                driven,
                &format!("length_{k}"),
            )?;
            size.rows += 1;
        }
        log_family("length_definition", size, started);
        Ok(size)
    }

    /// Every passenger is picked up at most once, by anyone.
    pub fn pickup_once<B: MilpBackend>(
        &self,
        backend: &mut B,
        vars: &ModelVariables,
    ) -> Result<FamilySize, SolverError> {
        let started = Instant::now();
        let mut size = FamilySize::default();
        for passenger in 0..self.nodes.n_passengers() {
            let pickup = self.nodes.pickup(passenger);
            let mut served = Expr::new_empty();
            for k in 0..self.nodes.n_drivers() {
                served = served + self.departures(vars, pickup, k);
            }
            backend.add_linear_constraint(
                served,
                ComparisonSense::LessEqual,
                Expr::from_constant(1.0),
                &format!("pickup_once_{passenger}"),
            )?;
            size.rows += 1;
        }
        log_family("pickup_once", size, started);
        Ok(size)
    }

    /// The driver leaving a pickup is the driver leaving its drop-off.
    pub fn pickup_dropoff_pairing<B: MilpBackend>(
        &self,
        backend: &mut B,
        vars: &ModelVariables,
    ) -> Result<FamilySize, SolverError> {
        let started = Instant::now();
        let mut size = FamilySize::default();
        for passenger in 0..self.nodes.n_passengers() {
            let pickup = self.nodes.pickup(passenger);
            let dropoff = self.nodes.dropoff(passenger);
            for k in 0..self.nodes.n_drivers() {
                backend.add_linear_constraint(
                    self.departures(vars, pickup, k),
                    ComparisonSense::Equal,
                    self.departures(vars, dropoff, k),
                    &format!("pairing_{passenger}_{k}"),
                )?;
                size.rows += 1;
            }
        }
        log_family("pairing", size, started);
        Ok(size)
    }

    /// Each driver leaves its own origin exactly once.
    pub fn origin_departure<B: MilpBackend>(
        &self,
        backend: &mut B,
        vars: &ModelVariables,
    ) -> Result<FamilySize, SolverError> {
        let started = Instant::now();
        let mut size = FamilySize::default();
        for k in 0..self.nodes.n_drivers() {
            backend.add_linear_constraint(
                self.departures(vars, self.nodes.origin(k), k),
                ComparisonSense::Equal,
                Expr::from_constant(1.0),
                &format!("origin_departure_{k}"),
            )?;
            size.rows += 1;
        }
        log_family("origin_departure", size, started);
        Ok(size)
    }

    /// Each driver enters its own destination exactly once.
    pub fn destination_arrival<B: MilpBackend>(
        &self,
        backend: &mut B,
        vars: &ModelVariables,
    ) -> Result<FamilySize, SolverError> {
        let started = Instant::now();
        let mut size = FamilySize::default();
        for k in 0..self.nodes.n_drivers() {
            backend.add_linear_constraint(
                self.arrivals(vars, self.nodes.destination(k), k),
                ComparisonSense::Equal,
                Expr::from_constant(1.0),
                &format!("destination_arrival_{k}"),
            )?;
            size.rows += 1;
        }
        log_family("destination_arrival", size, started);
        Ok(size)
    }

    /// `travel[i][j][k] = 0` on every arc [`crate::NodeIndexer::is_forbidden_arc`]
    /// rejects, as a bound fixing when pruning and as a row otherwise.
    pub fn forbidden_arcs<B: MilpBackend>(
        &self,
        backend: &mut B,
        vars: &ModelVariables,
    ) -> Result<FamilySize, SolverError> {
        let started = Instant::now();
        let mut size = FamilySize::default();
        for i in self.nodes.nodes() {
            for j in self.nodes.nodes() {
                for k in 0..self.nodes.n_drivers() {
                    if !self.nodes.is_forbidden_arc(i, j, k) {
                        continue;
                    }
                    let arc = vars.travel(i, j, k);
                    if self.prune {
                        backend.fix_variable(arc, 0.0)?;
                        size.fixed += 1;
                    } else {
                        backend.add_linear_constraint(
                            Expr::var(arc),
                            ComparisonSense::Equal,
                            Expr::from_constant(0.0),
                            &format!("forbidden_{i}_{j}_{k}"),
                        )?;
                        size.rows += 1;
                    }
                }
            }
        }
        log_family("forbidden_arcs", size, started);
        Ok(size)
    }

    /// A driver arriving at a pickup or drop-off also leaves it.
    pub fn flow_conservation<B: MilpBackend>(
        &self,
        backend: &mut B,
        vars: &ModelVariables,
    ) -> Result<FamilySize, SolverError> {
        let started = Instant::now();
        let mut size = FamilySize::default();
        for i in self.nodes.service_nodes() {
            for k in 0..self.nodes.n_drivers() {
                backend.add_linear_constraint(
                    self.arrivals(vars, i, k),
                    ComparisonSense::Equal,
                    self.departures(vars, i, k),
                    &format!("flow_{i}_{k}"),
                )?;
                size.rows += 1;
            }
        }
        log_family("flow_conservation", size, started);
        Ok(size)
    }

    /// `load[i][k] + nodeLoad[j] - seats[k] + travel[i][j][k] <= load[j][k]`
    /// on every arc; slack by `seats[k] - 1` when the arc is unused.
    pub fn load_consistency<B: MilpBackend>(
        &self,
        backend: &mut B,
        vars: &ModelVariables,
    ) -> Result<FamilySize, SolverError> {
        let started = Instant::now();
        let mut size = FamilySize::default();
        for i in self.nodes.nodes() {
            for j in self.nodes.nodes() {
                let node_load = f64::from(self.nodes.node_load(j));
                for k in 0..self.nodes.n_drivers() {
                    if !self.uses_arc(i, j, k) {
                        continue;
                    }
                    let seats = f64::from(self.instance.seats(k));
                    let lhs = Expr::var(vars.load(i, k))
                        + Expr::var(vars.travel(i, j, k))
                        + (node_load - seats);
                    backend.add_linear_constraint(
                        lhs,
                        ComparisonSense::LessEqual,
                        Expr::var(vars.load(j, k)),
                        &format!("load_{i}_{j}_{k}"),
                    )?;
                    size.rows += 1;
                }
            }
        }
        log_family("load_consistency", size, started);
        Ok(size)
    }

    /// Ordering over pickups and drop-offs of each driver.
    ///
    /// Emits: no drop-off before its pickup, antisymmetry, arc implies
    /// precedence, the 3-cycle ("successor") guard and the betweenness guard.
    /// When pruning, tuples with repeated indices are replaced by fixing
    /// `precedes[i][i][k] = 0`, antisymmetry is emitted once per unordered
    /// pair and the 3-cycle guard once per cycle.
    pub fn precedence<B: MilpBackend>(
        &self,
        backend: &mut B,
        vars: &ModelVariables,
    ) -> Result<FamilySize, SolverError> {
        let started = Instant::now();
        let mut size = FamilySize::default();
        let service = self.nodes.service_nodes();

        for k in 0..self.nodes.n_drivers() {
            for passenger in 0..self.nodes.n_passengers() {
                let backwards = vars.precedes(
                    self.nodes.dropoff(passenger),
                    self.nodes.pickup(passenger),
                    k,
                );
                if self.prune {
                    backend.fix_variable(backwards, 0.0)?;
                    size.fixed += 1;
                } else {
                    backend.add_linear_constraint(
                        Expr::var(backwards),
                        ComparisonSense::Equal,
                        Expr::from_constant(0.0),
                        &format!("dropoff_after_pickup_{passenger}_{k}"),
                    )?;
                    size.rows += 1;
                }
            }

            if self.prune {
                for i in service.clone() {
                    backend.fix_variable(vars.precedes(i, i, k), 0.0)?;
                    size.fixed += 1;
                }
            }

            for i in service.clone() {
                for j in service.clone() {
                    if !self.prune || i < j {
                        backend.add_linear_constraint(
                            Expr::var(vars.precedes(i, j, k)) + Expr::var(vars.precedes(j, i, k)),
                            ComparisonSense::LessEqual,
                            Expr::from_constant(1.0),
                            &format!("antisymmetry_{i}_{j}_{k}"),
                        )?;
                        size.rows += 1;
                    }
                    if !self.prune || i != j {
                        backend.add_linear_constraint(
                            Expr::var(vars.travel(i, j, k)),
                            ComparisonSense::LessEqual,
                            Expr::var(vars.precedes(i, j, k)),
                            &format!("arc_precedence_{i}_{j}_{k}"),
                        )?;
                        size.rows += 1;
                    }
                }
            }

            for i in service.clone() {
                for j in service.clone() {
                    for p in service.clone() {
                        let distinct = i != j && j != p && i != p;
                        if !self.prune || (distinct && i < j && i < p) {
                            let cycle = Expr::var(vars.precedes(i, j, k))
                                + Expr::var(vars.precedes(p, i, k))
                                + Expr::var(vars.precedes(j, p, k));
                            backend.add_linear_constraint(
                                cycle,
                                ComparisonSense::LessEqual,
                                Expr::from_constant(2.0),
                                &format!("successor_{i}_{j}_{p}_{k}"),
                            )?;
                            size.rows += 1;
                        }
                        if !self.prune || distinct {
                            let between = Expr::var(vars.travel(i, j, k))
                                + Expr::var(vars.precedes(i, p, k))
                                + Expr::var(vars.precedes(p, j, k));
                            backend.add_linear_constraint(
                                between,
                                ComparisonSense::LessEqual,
                                Expr::from_constant(2.0),
                                &format!("betweenness_{i}_{j}_{p}_{k}"),
                            )?;
                            size.rows += 1;
                        }
                    }
                }
            }
        }
        log_family("precedence", size, started);
        Ok(size)
    }
}
