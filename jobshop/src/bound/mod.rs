//! Lower bounds on the makespan reachable from a search state.
//!
//! Every estimator is a valid bound on its own, so the engine reports the
//! maximum of the partial makespan and all registered estimates.

mod disjunctive;
mod one_machine;
mod tail;

use serde::{ Deserialize, Serialize };
use tracing::trace;

use crate::error::InfeasibleBoundError;
use crate::problem::Instance;
use crate::state::SearchState;

pub use disjunctive::DisjunctiveGraphBound;
pub use one_machine::OneMachineBound;
pub use tail::{ JobTailBound, MachineTailBound };

/// Bound of a state that admits no schedule.
pub const INFEASIBLE: u32 = u32::MAX;

pub trait LowerBound {
    fn name(&self) -> &'static str;
    fn estimate(&self, instance: &Instance, state: &SearchState) -> Result<u32, InfeasibleBoundError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundKind {
    JobTail,
    MachineTail,
    OneMachine,
    DisjunctiveGraph,
}

impl BoundKind {
    /// Every estimator, cheapest first.
    pub fn all() -> Vec<BoundKind> {
        vec!(BoundKind::JobTail, BoundKind::MachineTail, BoundKind::OneMachine, BoundKind::DisjunctiveGraph)
    }

    pub fn estimator(self) -> Box<dyn LowerBound + Send + Sync> {
        match self {
            BoundKind::JobTail => Box::new(JobTailBound),
            BoundKind::MachineTail => Box::new(MachineTailBound),
            BoundKind::OneMachine => Box::new(OneMachineBound),
            BoundKind::DisjunctiveGraph => Box::new(DisjunctiveGraphBound),
        }
    }
}

pub struct BoundingEngine {
    estimators: Vec<Box<dyn LowerBound + Send + Sync>>,
}

impl BoundingEngine {
    pub fn new(kinds: &[BoundKind]) -> Self {
        BoundingEngine {
            estimators: kinds.iter().map(|kind| kind.estimator()).collect(),
        }
    }

    pub fn with_estimator(mut self, estimator: Box<dyn LowerBound + Send + Sync>) -> Self {
        self.estimators.push(estimator);
        self
    }

    pub fn estimators(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.estimators.iter().map(|estimator| estimator.name())
    }

    pub fn lower_bound(&self, instance: &Instance, state: &SearchState) -> u32 {
        let mut bound = state.makespan();
        for estimator in &self.estimators {
            match estimator.estimate(instance, state) {
                Ok(estimate) => bound = bound.max(estimate),
                Err(error) => {
                    trace!(estimator = estimator.name(), depth = state.depth(), %error, "pruning infeasible state");
                    return INFEASIBLE;
                }
            }
        }
        bound
    }
}

impl std::fmt::Debug for BoundingEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.estimators()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use disjunctgraph::GraphError;

    struct Broken;

    impl LowerBound for Broken {
        fn name(&self) -> &'static str { "broken" }
        fn estimate(&self, _: &Instance, _: &SearchState) -> Result<u32, InfeasibleBoundError> {
            Err(GraphError::Cyclic.into())
        }
    }

    fn instance() -> Instance {
        Instance::new(&[vec!((0, 2), (1, 5), (2, 4)), vec!((1, 2), (2, 3), (0, 5)), vec!((2, 4), (0, 2), (1, 3))]).unwrap()
    }

    #[test]
    fn test_empty_engine_reports_makespan() {
        let instance = instance();
        let engine = BoundingEngine::new(&[]);
        let root = SearchState::root(&instance);
        assert_eq!(0, engine.lower_bound(&instance, &root));

        let candidate = root.candidates(&instance)[0];
        assert_eq!(2, engine.lower_bound(&instance, &root.child(&candidate)));
    }

    #[test]
    fn test_root_bound_is_maximum_of_estimates() {
        let instance = instance();
        let root = SearchState::root(&instance);
        // Jobs: 11, 10, 9. Machines: 9, 10, 11.
        assert_eq!(11, BoundingEngine::new(&[BoundKind::JobTail]).lower_bound(&instance, &root));
        assert_eq!(11, BoundingEngine::new(&[BoundKind::MachineTail]).lower_bound(&instance, &root));
        assert_eq!(11, BoundingEngine::new(&BoundKind::all()).lower_bound(&instance, &root));
    }

    #[test]
    fn test_infeasible_estimate_prunes() {
        let instance = instance();
        let engine = BoundingEngine::new(&BoundKind::all()).with_estimator(Box::new(Broken));
        let root = SearchState::root(&instance);
        assert_eq!(INFEASIBLE, engine.lower_bound(&instance, &root));
        assert_eq!(
            vec!("job_tail", "machine_tail", "one_machine", "disjunctive_graph", "broken"),
            engine.estimators().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_bound_kind_names() {
        assert_eq!("\"one_machine\"", serde_json::to_string(&BoundKind::OneMachine).unwrap());
        assert_eq!(BoundKind::DisjunctiveGraph, serde_json::from_str("\"disjunctive_graph\"").unwrap());
    }
}
