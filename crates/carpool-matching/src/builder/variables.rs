use std::time::Instant;

use carpool_solver::{MilpBackend, SolverError};
use tracing::debug;

use super::{ModelBuilder, ModelVariables};

impl ModelBuilder<'_> {
    /// Create `travel` and `precedes` for every `(i, j, k)`, `load` for every
    /// `(i, k)` and `length` for every `k`.
    pub fn declare_variables<B: MilpBackend>(
        &self,
        backend: &mut B,
    ) -> Result<ModelVariables, SolverError> {
        let started = Instant::now();
        let n = self.nodes.node_count();
        let d = self.nodes.n_drivers();

        let mut travel = Vec::with_capacity(n * n * d);
        for i in 0..n {
            for j in 0..n {
                for k in 0..d {
                    travel.push(backend.new_binary_variable(&format!("{k} travel From {i} To {j}"))?);
                }
            }
        }

        let mut precedes = Vec::with_capacity(n * n * d);
        for i in 0..n {
            for j in 0..n {
                for k in 0..d {
                    precedes.push(backend.new_binary_variable(&format!("{i} precedes {j} for {k}"))?);
                }
            }
        }

        let mut load = Vec::with_capacity(n * d);
        for i in 0..n {
            let node_load = f64::from(self.nodes.node_load(i));
            for k in 0..d {
                let seats = f64::from(self.instance.seats(k));
                let lower = node_load.max(0.0);
                let upper = seats.min(seats + node_load);
                load.push(backend.new_integer_variable(lower, upper, &format!("{i}-{k} carLoad"))?);
            }
        }

        let mut length = Vec::with_capacity(d);
        for k in 0..d {
            length.push(backend.new_continuous_variable(
                0.0,
                self.instance.max_dist(k),
                &format!("{k} length"),
            )?);
        }

        let variables = ModelVariables {
            n_nodes: n,
            n_drivers: d,
            travel,
            precedes,
            load,
            length,
        };
        debug!(
            component = "builder",
            operation = "declare_variables",
            status = "success",
            travel = variables.travel.len(),
            precedes = variables.precedes.len(),
            load = variables.load.len(),
            length = variables.length.len(),
            duration_ms = started.elapsed().as_secs_f64() * 1000.0,
            "Declared model variables"
        );
        Ok(variables)
    }
}
