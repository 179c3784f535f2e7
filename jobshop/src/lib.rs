//! Exact branch and bound for the job-shop scheduling problem.
//!
//! An [`Instance`] is searched over partial schedules: every node commits one
//! more operation at its earliest start. Nodes are bounded by a set of
//! [`LowerBound`] estimators, branched on by the [`BranchingEngine`] and pruned
//! against the best schedule found so far. When the search runs out of open
//! nodes before its time limit the returned schedule is optimal.
//!
//! ```no_run
//! use std::time::Duration;
//! use jobshop::{ load_instance, solve, SolverConfig };
//!
//! let instance = load_instance(&[vec!((0, 2), (1, 5)), vec!((1, 2), (0, 5))]).unwrap();
//! let result = solve(&instance, &SolverConfig::default().with_time_limit(Duration::from_secs(5)));
//! println!("{}", result.schedule);
//! ```

pub mod bound;
pub mod branch_and_bound;
pub mod branching;
pub mod config;
pub mod error;
pub mod heuristics;
pub mod problem;
pub mod schedule;
pub mod state;

pub use bound::{ BoundKind, BoundingEngine, LowerBound };
pub use branch_and_bound::{ BranchAndBound, DominanceKey, ExplorationOrder, SearchResult, SearchStatistics, TerminationReason };
pub use branching::{ BranchingEngine, CandidateMode, CandidateOrdering };
pub use config::SolverConfig;
pub use error::{ InfeasibleBoundError, InvalidInstanceError, ScheduleError };
pub use heuristics::{ GifflerThompson, InitialBound, SptGreedy };
pub use problem::{ Instance, Operation, ProblemSolver };
pub use schedule::{ Schedule, ScheduledOperation };

/// Validates one `(machine, duration)` sequence per job into an [`Instance`].
pub fn load_instance<J: AsRef<[(i64, i64)]>>(jobs: &[J]) -> Result<Instance, InvalidInstanceError> {
    Instance::new(jobs)
}

/// Runs the branch and bound configured by `config` on `instance`.
pub fn solve(instance: &Instance, config: &SolverConfig) -> SearchResult {
    BranchAndBound::new(config.clone()).solve(instance)
}

#[cfg(test)]
mod tests;
