use std::fmt;
use std::time::Duration;

use serde::Serialize;

/// Counters collected while searching.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchStatistics {
    /// States popped that survived bound and dominance checks.
    pub nodes_expanded: u64,
    pub nodes_pushed: u64,
    /// States discarded on pop because their bound reached the incumbent.
    pub pruned_by_bound: u64,
    /// Children never pushed because their bound reached the incumbent.
    pub pruned_at_push: u64,
    pub pruned_by_dominance: u64,
    pub solutions_found: u64,
    pub max_frontier: usize,
    pub dominance_entries: usize,
    pub root_lower_bound: u32,
    pub elapsed: Duration,
}

impl SearchStatistics {
    #[inline]
    pub fn on_node_expanded(&mut self) {
        self.nodes_expanded = self.nodes_expanded.saturating_add(1);
    }

    #[inline]
    pub fn on_pushed(&mut self, count: usize) {
        self.nodes_pushed = self.nodes_pushed.saturating_add(count as u64);
    }

    #[inline]
    pub fn on_pruned_by_bound(&mut self) {
        self.pruned_by_bound = self.pruned_by_bound.saturating_add(1);
    }

    #[inline]
    pub fn on_pruned_at_push(&mut self, count: usize) {
        self.pruned_at_push = self.pruned_at_push.saturating_add(count as u64);
    }

    #[inline]
    pub fn on_pruned_by_dominance(&mut self) {
        self.pruned_by_dominance = self.pruned_by_dominance.saturating_add(1);
    }

    #[inline]
    pub fn on_solution_found(&mut self) {
        self.solutions_found = self.solutions_found.saturating_add(1);
    }

    #[inline]
    pub fn on_frontier_size(&mut self, size: usize) {
        self.max_frontier = self.max_frontier.max(size);
    }

    /// Adds the counters of another search, as collected by a parallel worker.
    pub fn merge(&mut self, other: &SearchStatistics) {
        self.nodes_expanded = self.nodes_expanded.saturating_add(other.nodes_expanded);
        self.nodes_pushed = self.nodes_pushed.saturating_add(other.nodes_pushed);
        self.pruned_by_bound = self.pruned_by_bound.saturating_add(other.pruned_by_bound);
        self.pruned_at_push = self.pruned_at_push.saturating_add(other.pruned_at_push);
        self.pruned_by_dominance = self.pruned_by_dominance.saturating_add(other.pruned_by_dominance);
        self.solutions_found = self.solutions_found.saturating_add(other.solutions_found);
        self.max_frontier = self.max_frontier.max(other.max_frontier);
        self.dominance_entries += other.dominance_entries;
    }
}

impl fmt::Display for SearchStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Search statistics:")?;
        writeln!(f, "  Nodes expanded:        {}", self.nodes_expanded)?;
        writeln!(f, "  Nodes pushed:          {}", self.nodes_pushed)?;
        writeln!(f, "  Pruned (bound):        {}", self.pruned_by_bound)?;
        writeln!(f, "  Pruned (before push):  {}", self.pruned_at_push)?;
        writeln!(f, "  Pruned (dominance):    {}", self.pruned_by_dominance)?;
        writeln!(f, "  Solutions found:       {}", self.solutions_found)?;
        writeln!(f, "  Max frontier:          {}", self.max_frontier)?;
        writeln!(f, "  Dominance entries:     {}", self.dominance_entries)?;
        writeln!(f, "  Root lower bound:      {}", self.root_lower_bound)?;
        writeln!(f, "  Elapsed:               {:.2?}", self.elapsed)
    }
}
