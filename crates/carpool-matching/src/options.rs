//! Build-time configuration.

use carpool_solver::SolverConfig;

/// How the model is emitted and how the backend is configured.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildOptions {
    /// Fix forbidden arcs through variable bounds and skip rows they make
    /// redundant. When `false`, every forbidden arc gets an explicit
    /// `travel = 0` row and precedence rows range over all index tuples.
    pub prune_forbidden_arcs: bool,
    /// Forwarded to the backend on solve.
    pub solver: SolverConfig,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            prune_forbidden_arcs: true,
            solver: SolverConfig::default(),
        }
    }
}

impl BuildOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// The literal formulation with every row spelled out.
    pub fn dense() -> Self {
        Self::default().with_prune_forbidden_arcs(false)
    }

    pub fn with_prune_forbidden_arcs(mut self, enabled: bool) -> Self {
        self.prune_forbidden_arcs = enabled;
        self
    }

    pub fn with_solver_config(mut self, config: SolverConfig) -> Self {
        self.solver = config;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pruning_is_on_by_default() {
        let options = BuildOptions::new();
        assert!(options.prune_forbidden_arcs);
        assert_eq!(options.solver, SolverConfig::default());
        assert!(!BuildOptions::dense().prune_forbidden_arcs);
    }

    #[test]
    fn solver_config_is_carried() {
        let options =
            BuildOptions::new().with_solver_config(SolverConfig::new().with_time_limit(5.0));
        assert_eq!(options.solver.time_limit, Some(5.0));
    }
}
