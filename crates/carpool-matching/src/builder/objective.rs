use carpool_core::Sense;
use carpool_expr::Expr;
use carpool_solver::{MilpBackend, SolverError};
use tracing::debug;

use super::{ModelBuilder, ModelVariables};

/// Name recorded on the model.
pub const MODEL_NAME: &str = "car sharing";

impl ModelBuilder<'_> {
    /// Maximize the number of arcs driven, which equals the driver count
    /// plus twice the number of served passengers.
    pub fn objective<B: MilpBackend>(
        &self,
        backend: &mut B,
        vars: &ModelVariables,
    ) -> Result<(), SolverError> {
        let mut arcs = Expr::new_empty();
        for i in self.nodes.nodes() {
            for j in self.nodes.nodes() {
                for k in 0..self.nodes.n_drivers() {
                    if self.uses_arc(i, j, k) {
                        arcs.add_term(vars.travel(i, j, k), 1.0);
                    }
                }
            }
        }
        let terms = arcs.linear_terms().len();
        backend.set_objective(arcs, Sense::Maximize)?;
        backend.set_model_name(MODEL_NAME)?;
        debug!(
            component = "builder",
            operation = "objective",
            status = "success",
            terms,
            "Set objective to maximize arcs driven"
        );
        Ok(())
    }
}
