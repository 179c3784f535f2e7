use serde::Serialize;

use crate::branch_and_bound::SearchStatistics;
use crate::schedule::Schedule;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationReason {
    /// The frontier ran empty.
    Exhausted,
    /// The time limit was reached with open states left.
    TimeLimit,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    /// Best schedule found, empty when there is none.
    pub schedule: Schedule,
    pub makespan: Option<u32>,
    /// The frontier was exhausted, so no schedule beats `makespan`.
    pub proven_optimal: bool,
    pub nodes_expanded: u64,
    pub termination: TerminationReason,
    pub statistics: SearchStatistics,
}

impl SearchResult {
    pub fn new(schedule: Option<Schedule>, termination: TerminationReason, statistics: SearchStatistics) -> Self {
        let makespan = schedule.as_ref().map(Schedule::makespan);
        SearchResult {
            schedule: schedule.unwrap_or_default(),
            makespan,
            proven_optimal: termination == TerminationReason::Exhausted && makespan.is_some(),
            nodes_expanded: statistics.nodes_expanded,
            termination,
            statistics,
        }
    }

    pub fn has_solution(&self) -> bool {
        self.makespan.is_some()
    }
}
