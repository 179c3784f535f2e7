use std::time::Duration;

use serde::{ Deserialize, Serialize };

use crate::bound::BoundKind;
use crate::branch_and_bound::{ DominanceKey, ExplorationOrder };
use crate::branching::{ CandidateMode, CandidateOrdering };
use crate::heuristics::InitialBound;

/// Search configuration. Every strategy is chosen here rather than in code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Wall clock budget, checked before every pop. `None` searches until exhaustion.
    pub time_limit: Option<Duration>,
    pub exploration_order: ExplorationOrder,
    pub candidate_mode: CandidateMode,
    pub ordering: CandidateOrdering,
    pub initial_bound: InitialBound,
    pub dominance: DominanceKey,
    pub bounds: Vec<BoundKind>,
    /// How often a progress line is logged, `None` disables it.
    pub progress_interval: Option<Duration>,
    /// Worker threads. More than one splits the tree below the root.
    pub workers: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            time_limit: None,
            exploration_order: ExplorationOrder::default(),
            candidate_mode: CandidateMode::default(),
            ordering: CandidateOrdering::default(),
            initial_bound: InitialBound::default(),
            dominance: DominanceKey::default(),
            bounds: BoundKind::all(),
            progress_interval: Some(Duration::from_secs(10)),
            workers: 1,
        }
    }
}

impl SolverConfig {
    /// Names accepted by [`SolverConfig::variant`].
    pub const VARIANTS: [&'static str; 8] = [
        "lifo_baseline",
        "heap_baseline",
        "lifo_order_earliest",
        "heap_order_earliest",
        "heap_ub_spt",
        "heap_ub_spt_order",
        "heap_gt_branch",
        "heap_gt_branch_order",
    ];

    /// Named strategy combination used for benchmark comparisons. `heap` is
    /// best first, `lifo` depth first; every variant uses the full dominance key.
    pub fn variant(name: &str) -> Option<Self> {
        use CandidateMode::*;
        use ExplorationOrder::*;

        let (order, mode, ordering, initial_bound) = match name {
            "lifo_baseline" => (DepthFirst, Full, CandidateOrdering::None, InitialBound::None),
            "heap_baseline" => (BestFirst, Full, CandidateOrdering::None, InitialBound::None),
            "lifo_order_earliest" => (DepthFirst, Full, CandidateOrdering::EarliestStart, InitialBound::None),
            "heap_order_earliest" => (BestFirst, Full, CandidateOrdering::EarliestStart, InitialBound::None),
            "heap_ub_spt" => (BestFirst, Full, CandidateOrdering::None, InitialBound::SptGreedy),
            "heap_ub_spt_order" => (BestFirst, Full, CandidateOrdering::EarliestStart, InitialBound::SptGreedy),
            "heap_gt_branch" => (BestFirst, ConflictSet, CandidateOrdering::None, InitialBound::SptGreedy),
            "heap_gt_branch_order" => (BestFirst, ConflictSet, CandidateOrdering::EarliestStart, InitialBound::SptGreedy),
            _ => return None,
        };

        Some(SolverConfig::default()
            .with_exploration_order(order)
            .with_candidate_mode(mode)
            .with_ordering(ordering)
            .with_initial_bound(initial_bound)
            .with_dominance(DominanceKey::Full))
    }

    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = Some(time_limit);
        self
    }

    pub fn with_exploration_order(mut self, exploration_order: ExplorationOrder) -> Self {
        self.exploration_order = exploration_order;
        self
    }

    pub fn with_candidate_mode(mut self, candidate_mode: CandidateMode) -> Self {
        self.candidate_mode = candidate_mode;
        self
    }

    pub fn with_ordering(mut self, ordering: CandidateOrdering) -> Self {
        self.ordering = ordering;
        self
    }

    pub fn with_initial_bound(mut self, initial_bound: InitialBound) -> Self {
        self.initial_bound = initial_bound;
        self
    }

    pub fn with_dominance(mut self, dominance: DominanceKey) -> Self {
        self.dominance = dominance;
        self
    }

    pub fn with_bounds(mut self, bounds: Vec<BoundKind>) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn with_progress_interval(mut self, progress_interval: Option<Duration>) -> Self {
        self.progress_interval = progress_interval;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_partial_config() {
        let config: SolverConfig = serde_json::from_str(r#"{
            "exploration_order": "depth_first",
            "candidate_mode": "full",
            "ordering": "spt",
            "initial_bound": "none",
            "dominance": "next_op_machine_ready",
            "bounds": ["job_tail", "disjunctive_graph"],
            "time_limit": { "secs": 2, "nanos": 0 }
        }"#).unwrap();

        assert_eq!(ExplorationOrder::DepthFirst, config.exploration_order);
        assert_eq!(CandidateMode::Full, config.candidate_mode);
        assert_eq!(CandidateOrdering::Spt, config.ordering);
        assert_eq!(InitialBound::None, config.initial_bound);
        assert_eq!(DominanceKey::NextOpMachineReady, config.dominance);
        assert_eq!(vec!(BoundKind::JobTail, BoundKind::DisjunctiveGraph), config.bounds);
        assert_eq!(Some(Duration::from_secs(2)), config.time_limit);
        assert_eq!(1, config.workers);
    }

    #[test]
    fn test_defaults() {
        let config = SolverConfig::default();
        assert_eq!(config, serde_json::from_str::<SolverConfig>("{}").unwrap());
        assert_eq!(ExplorationOrder::BestFirst, config.exploration_order);
        assert_eq!(CandidateMode::ConflictSet, config.candidate_mode);
        assert_eq!(DominanceKey::Full, config.dominance);
        assert_eq!(4, config.bounds.len());
        assert_eq!(1, SolverConfig::default().with_workers(0).workers);
    }

    #[test]
    fn test_named_variants() {
        for name in SolverConfig::VARIANTS {
            assert!(SolverConfig::variant(name).is_some(), "{}", name);
        }
        assert_eq!(None, SolverConfig::variant("heap"));

        let baseline = SolverConfig::variant("lifo_baseline").unwrap();
        assert_eq!(ExplorationOrder::DepthFirst, baseline.exploration_order);
        assert_eq!(CandidateMode::Full, baseline.candidate_mode);
        assert_eq!(CandidateOrdering::None, baseline.ordering);
        assert_eq!(InitialBound::None, baseline.initial_bound);

        let conflict = SolverConfig::variant("heap_gt_branch_order").unwrap();
        assert_eq!(ExplorationOrder::BestFirst, conflict.exploration_order);
        assert_eq!(CandidateMode::ConflictSet, conflict.candidate_mode);
        assert_eq!(CandidateOrdering::EarliestStart, conflict.ordering);
        assert_eq!(InitialBound::SptGreedy, conflict.initial_bound);
        assert_eq!(DominanceKey::Full, conflict.dominance);
    }
}
