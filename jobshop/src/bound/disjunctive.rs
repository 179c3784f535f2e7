use disjunctgraph::{ Graph, LinkedGraph };

use crate::error::InfeasibleBoundError;
use crate::problem::{ Instance, ProblemNode };
use crate::state::SearchState;

use super::LowerBound;

/// Critical path through job order and the machine order committed so far.
/// Machine order between operations that are not committed yet stays open,
/// so release times are ignored and this is a relaxation of every completion.
pub struct DisjunctiveGraphBound;

impl LowerBound for DisjunctiveGraphBound {
    fn name(&self) -> &'static str {
        "disjunctive_graph"
    }

    fn estimate(&self, instance: &Instance, state: &SearchState) -> Result<u32, InfeasibleBoundError> {
        let graph: LinkedGraph<ProblemNode> = instance.partial_graph(state.schedule());
        Ok(graph.critical_length()?)
    }
}
