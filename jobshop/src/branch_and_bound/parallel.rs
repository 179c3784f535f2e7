use std::collections::VecDeque;
use std::time::Instant;

use tracing::debug;

use crate::problem::Instance;
use crate::schedule::Schedule;
use crate::state::SearchState;

use super::{ BranchAndBound, IncumbentStore, SearchStatistics, SharedIncumbent, SharedIncumbentAdapter, TerminationReason };

// Open states per worker before the tree is split
const STATES_PER_WORKER: usize = 4;

/// Expands the top of the tree breadth first, deals the open states round
/// robin to scoped workers and lets each run the sequential search against a
/// shared incumbent with its own dominance table.
pub(super) fn search(
    solver: &BranchAndBound,
    instance: &Instance,
    root: SearchState,
    root_bound: u32,
    seed: Option<Schedule>,
    started: Instant,
    statistics: &mut SearchStatistics,
) -> (Option<Schedule>, TerminationReason) {
    let config = solver.config();
    let workers = config.workers.max(1);
    let shared = SharedIncumbent::new(seed);
    let mut store = SharedIncumbentAdapter::new(&shared);

    let mut open = VecDeque::from([(root, root_bound)]);
    statistics.on_pushed(1);
    while open.len() < workers * STATES_PER_WORKER {
        if config.time_limit.map_or(false, |limit| started.elapsed() >= limit) {
            return (shared.into_schedule(), TerminationReason::TimeLimit);
        }
        let Some((state, lower_bound)) = open.pop_front() else { break };
        if lower_bound >= store.upper_bound() {
            statistics.on_pruned_by_bound();
            continue;
        }
        statistics.on_node_expanded();

        if state.is_terminal(instance) {
            if store.offer(state.into_schedule()) {
                statistics.on_solution_found();
            }
            continue;
        }

        let upper_bound = store.upper_bound();
        for (child, bound) in solver.branching.children(instance, &state, &solver.bounds) {
            if bound < upper_bound {
                statistics.on_pushed(1);
                open.push_back((child, bound));
            } else {
                statistics.on_pruned_at_push(1);
            }
        }
    }

    let mut buckets: Vec<Vec<(SearchState, u32)>> = (0..workers).map(|_| Vec::new()).collect();
    for (index, entry) in open.into_iter().enumerate() {
        buckets[index % workers].push(entry);
    }
    debug!(workers, states = buckets.iter().map(Vec::len).sum::<usize>(), "splitting search");

    let outcomes: Vec<(TerminationReason, SearchStatistics)> = std::thread::scope(|scope| {
        let handles = buckets.into_iter()
            .filter(|bucket| !bucket.is_empty())
            .map(|bucket| {
                let shared = &shared;
                scope.spawn(move || {
                    let mut frontier = config.exploration_order.frontier();
                    frontier.push_children(bucket);
                    let mut store = SharedIncumbentAdapter::new(shared);
                    let mut worker = SearchStatistics::default();
                    let termination = solver.search(instance, frontier.as_mut(), &mut store, started, &mut worker);
                    (termination, worker)
                })
            })
            .collect::<Vec<_>>();

        handles.into_iter()
            .map(|handle| handle.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic)))
            .collect()
    });

    let mut termination = TerminationReason::Exhausted;
    for (worker_termination, worker) in &outcomes {
        statistics.merge(worker);
        if *worker_termination == TerminationReason::TimeLimit {
            termination = TerminationReason::TimeLimit;
        }
    }

    (shared.into_schedule(), termination)
}
