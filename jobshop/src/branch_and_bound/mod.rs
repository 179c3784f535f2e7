//! Exact branch and bound over partial schedules.
//!
//! States are popped from a [`Frontier`], pruned against the incumbent and
//! the dominance table, and expanded through the branching engine. Running
//! out of open states proves the incumbent optimal; running out of time only
//! returns the best schedule found so far.

mod dominance;
mod frontier;
mod incumbent;
mod parallel;
mod result;
mod stats;

use std::time::Instant;

use tracing::{ debug, info };

use crate::bound::BoundingEngine;
use crate::branching::BranchingEngine;
use crate::config::SolverConfig;
use crate::problem::{ Instance, ProblemSolver };
use crate::state::SearchState;

pub use dominance::{ DominanceKey, DominanceTable };
pub use frontier::{ BestFirstFrontier, DepthFirstFrontier, ExplorationOrder, Frontier };
pub use incumbent::{ Incumbent, IncumbentStore, SharedIncumbent, SharedIncumbentAdapter };
pub use result::{ SearchResult, TerminationReason };
pub use stats::SearchStatistics;

#[derive(Debug)]
pub struct BranchAndBound {
    config: SolverConfig,
    bounds: BoundingEngine,
    branching: BranchingEngine,
}

impl BranchAndBound {
    pub fn new(config: SolverConfig) -> Self {
        BranchAndBound {
            bounds: BoundingEngine::new(&config.bounds),
            branching: BranchingEngine::new(config.candidate_mode, config.ordering),
            config,
        }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn bounds(&self) -> &BoundingEngine {
        &self.bounds
    }

    /// Pops and expands states until the frontier is empty or the time limit
    /// is reached. Improvements are offered to `incumbent`.
    pub fn search<S: IncumbentStore>(
        &self,
        instance: &Instance,
        frontier: &mut dyn Frontier,
        incumbent: &mut S,
        started: Instant,
        statistics: &mut SearchStatistics,
    ) -> TerminationReason {
        let mut dominance = DominanceTable::new(self.config.dominance);
        let mut last_report = Instant::now();

        let termination = loop {
            if self.config.time_limit.map_or(false, |limit| started.elapsed() >= limit) {
                break TerminationReason::TimeLimit;
            }
            let Some((state, lower_bound)) = frontier.pop() else {
                break TerminationReason::Exhausted;
            };

            if lower_bound >= incumbent.upper_bound() {
                statistics.on_pruned_by_bound();
                continue;
            }
            if dominance.is_dominated(&state, lower_bound) {
                statistics.on_pruned_by_dominance();
                continue;
            }
            statistics.on_node_expanded();

            if state.is_terminal(instance) {
                let makespan = state.makespan();
                if incumbent.offer(state.into_schedule()) {
                    statistics.on_solution_found();
                    info!(makespan, nodes = statistics.nodes_expanded, elapsed = ?started.elapsed(), "new incumbent");
                }
                continue;
            }

            let upper_bound = incumbent.upper_bound();
            let (children, pruned): (Vec<_>, Vec<_>) = self.branching.children(instance, &state, &self.bounds)
                .into_iter()
                .partition(|(_, bound)| *bound < upper_bound);
            statistics.on_pruned_at_push(pruned.len());
            statistics.on_pushed(children.len());
            frontier.push_children(children);
            statistics.on_frontier_size(frontier.len());

            if let Some(interval) = self.config.progress_interval {
                if last_report.elapsed() >= interval {
                    last_report = Instant::now();
                    info!(
                        nodes = statistics.nodes_expanded,
                        incumbent = upper_bound,
                        frontier = frontier.len(),
                        pruned_bound = statistics.pruned_by_bound + statistics.pruned_at_push,
                        pruned_dominance = statistics.pruned_by_dominance,
                        elapsed = ?started.elapsed(),
                        "searching"
                    );
                }
            }
        };

        statistics.dominance_entries += dominance.len();
        termination
    }
}

impl ProblemSolver for BranchAndBound {
    type Solution = SearchResult;

    fn solve(&self, instance: &Instance) -> SearchResult {
        let started = Instant::now();
        let mut statistics = SearchStatistics::default();

        let mut incumbent = Incumbent::new();
        if let Some(seed) = self.config.initial_bound.seed(instance) {
            info!(makespan = seed.makespan(), rule = ?self.config.initial_bound, "seeded incumbent");
            incumbent.offer(seed);
        }

        let root = SearchState::root(instance);
        let root_bound = self.bounds.lower_bound(instance, &root);
        statistics.root_lower_bound = root_bound;
        debug!(
            jobs = instance.job_count(),
            machines = instance.machine_count(),
            root_bound,
            config = ?self.config,
            "starting search"
        );

        let (schedule, termination) = if self.config.workers > 1 {
            parallel::search(self, instance, root, root_bound, incumbent.into_schedule(), started, &mut statistics)
        } else {
            let mut frontier = self.config.exploration_order.frontier();
            frontier.push(root, root_bound);
            statistics.on_pushed(1);
            let termination = self.search(instance, frontier.as_mut(), &mut incumbent, started, &mut statistics);
            (incumbent.into_schedule(), termination)
        };

        statistics.elapsed = started.elapsed();
        let result = SearchResult::new(schedule, termination, statistics);
        info!(
            makespan = ?result.makespan,
            proven_optimal = result.proven_optimal,
            termination = ?result.termination,
            nodes = result.nodes_expanded,
            elapsed = ?result.statistics.elapsed,
            "search finished"
        );
        result
    }
}
