//! Status conversions between HiGHS and the solver-agnostic layer.

use carpool_solver::SolverStatus;

use crate::problem::HighsStatus;

pub(crate) fn to_solver_status(status: HighsStatus) -> SolverStatus {
    match status {
        HighsStatus::Optimal => SolverStatus::Optimal,
        HighsStatus::Infeasible => SolverStatus::Infeasible,
        HighsStatus::Unbounded => SolverStatus::Unbounded,
        HighsStatus::UnboundedOrInfeasible => SolverStatus::InfeasibleOrUnbounded,
        HighsStatus::ReachedTimeLimit => SolverStatus::TimeLimit,
        HighsStatus::ReachedIterationLimit => SolverStatus::IterationLimit,
        HighsStatus::Unknown => SolverStatus::Unknown,
    }
}

pub(crate) fn highs_status_string(status: HighsStatus) -> &'static str {
    match status {
        HighsStatus::Optimal => "optimal",
        HighsStatus::Infeasible => "infeasible",
        HighsStatus::Unbounded => "unbounded",
        HighsStatus::UnboundedOrInfeasible => "unbounded_or_infeasible",
        HighsStatus::ReachedTimeLimit => "time_limit",
        HighsStatus::ReachedIterationLimit => "iteration_limit",
        HighsStatus::Unknown => "unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limits_map_to_solution_bearing_statuses() {
        assert_eq!(
            to_solver_status(HighsStatus::ReachedTimeLimit),
            SolverStatus::TimeLimit
        );
        assert!(to_solver_status(HighsStatus::ReachedIterationLimit).has_solution());
        assert!(!to_solver_status(HighsStatus::Infeasible).has_solution());
    }

    #[test]
    fn presolve_ambiguity_is_kept() {
        let status = to_solver_status(HighsStatus::UnboundedOrInfeasible);
        assert_eq!(status, SolverStatus::InfeasibleOrUnbounded);
        assert!(status.is_infeasible_or_unbounded());
        assert_eq!(
            highs_status_string(HighsStatus::UnboundedOrInfeasible),
            "unbounded_or_infeasible"
        );
    }
}
