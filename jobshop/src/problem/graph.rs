use disjunctgraph::{ Graph, GraphNode, Relation };
use itertools::Itertools;

use crate::problem::Instance;
use crate::schedule::ScheduledOperation;

#[derive(Clone, Debug)]
pub struct ProblemNode {
    id: usize,
    weight: u32,
    job_id: Option<usize>,
    machine_id: Option<usize>
}

impl disjunctgraph::NodeId for ProblemNode {
    fn id(&self) -> usize { self.id }
}

impl disjunctgraph::GraphNode for ProblemNode {
    fn create(id: usize, weight: u32, machine_id: Option<usize>, job_id: Option<usize>) -> Self {
        ProblemNode {
            id, weight, job_id, machine_id
        }
    }
    fn weight(&self) -> u32 { self.weight }
    fn job_id(&self) -> Option<usize> { self.job_id }
    fn machine_id(&self) -> Option<usize> { self.machine_id }
}

struct EdgeBuilder {
    edges: Vec<Vec<Relation>>,
}

impl EdgeBuilder {
    fn new(nodes: usize) -> Self {
        EdgeBuilder { edges: vec!(Vec::new(); nodes) }
    }

    // node_1 -> node_2
    fn arc(&mut self, node_1: usize, node_2: usize) {
        self.edges[node_1].push(Relation::Successor(node_2));
        self.edges[node_2].push(Relation::Predecessor(node_1));
    }

    fn disjunction(&mut self, node_1: usize, node_2: usize) {
        self.edges[node_1].push(Relation::Disjunctive(node_2));
        self.edges[node_2].push(Relation::Disjunctive(node_1));
    }

    fn has_predecessor(&self, node: usize) -> bool {
        self.edges[node].iter().any(|r| matches!(r, Relation::Predecessor(_)))
    }

    fn has_successor(&self, node: usize) -> bool {
        self.edges[node].iter().any(|r| matches!(r, Relation::Successor(_)))
    }
}

impl Instance {
    // Source is node 0, operations follow job by job, sink is the last node.
    fn graph_nodes<I: Graph>(&self) -> Vec<I::Node> {
        let mut nodes: Vec<I::Node> = Vec::with_capacity(self.operation_count() + 2);
        nodes.push(I::Node::create(0, 0, None, None));
        for operation in self.operations() {
            let id = self.node_index(operation.job, operation.index);
            nodes.push(I::Node::create(id, operation.duration, Some(operation.machine), Some(operation.job)));
        }
        nodes.push(I::Node::create(nodes.len(), 0, None, None));
        nodes
    }

    fn job_arcs(&self, builder: &mut EdgeBuilder) {
        for job in self.jobs() {
            for (first, second) in job.operations().iter().tuple_windows() {
                builder.arc(self.node_index(first.job, first.index), self.node_index(second.job, second.index));
            }
        }
    }

    /// Precedence graph of a partial schedule: job order for every operation,
    /// machine order only between operations already committed to the same
    /// machine, in commit order. Operations are unordered otherwise, so the
    /// graph carries no disjunctions.
    pub fn partial_graph<I: Graph>(&self, committed: &[ScheduledOperation]) -> I {
        let nodes = self.graph_nodes::<I>();
        let sink = nodes.len() - 1;
        let mut builder = EdgeBuilder::new(nodes.len());

        self.job_arcs(&mut builder);

        let mut last_on_machine: Vec<Option<usize>> = vec!(None; self.machine_count());
        for operation in committed {
            let node = self.node_index(operation.job, operation.op_index);
            if let Some(previous) = last_on_machine[operation.machine].replace(node) {
                builder.arc(previous, node);
            }
        }

        for node in 1..sink {
            if !builder.has_predecessor(node) {
                builder.arc(0, node);
            }
            if !builder.has_successor(node) {
                builder.arc(node, sink);
            }
        }

        I::create(nodes, builder.edges)
    }

    /// Disjunctive graph of the instance: job order as arcs, a disjunction
    /// between every pair of operations of different jobs sharing a machine.
    pub fn disjunctive_graph<I: Graph>(&self) -> I {
        let nodes = self.graph_nodes::<I>();
        let sink = nodes.len() - 1;
        let mut builder = EdgeBuilder::new(nodes.len());

        self.job_arcs(&mut builder);
        for job in self.jobs() {
            let (first, last) = match (job.operations().first(), job.operations().last()) {
                (Some(first), Some(last)) => (first, last),
                _ => continue,
            };
            builder.arc(0, self.node_index(first.job, first.index));
            builder.arc(self.node_index(last.job, last.index), sink);
        }

        let by_machine = self.operations().into_group_map_by(|op| op.machine);
        for operations in by_machine.values() {
            for (a, b) in operations.iter().tuple_combinations() {
                if a.job != b.job {
                    builder.disjunction(self.node_index(a.job, a.index), self.node_index(b.job, b.index));
                }
            }
        }

        I::create(nodes, builder.edges)
    }
}

#[cfg(test)]
mod tests {
    use disjunctgraph::{ Graph, LinkedGraph, NodeId };

    use crate::problem::{ Instance, ProblemNode };
    use crate::schedule::ScheduledOperation;

    fn instance() -> Instance {
        Instance::new(&[vec!((0, 3), (1, 2)), vec!((0, 4), (1, 1))]).unwrap()
    }

    #[test]
    fn test_disjunctive_graph() {
        let instance = instance();
        let graph: LinkedGraph<ProblemNode> = instance.disjunctive_graph();

        assert_eq!(6, graph.nodes().len());
        assert!(graph.has_precedence(&0, &1));
        assert!(graph.has_precedence(&1, &2));
        assert!(graph.has_precedence(&4, &5));
        assert!(graph.has_disjunction(&1, &3));
        assert!(graph.has_disjunction(&2, &4));
        assert!(!graph.has_disjunction(&1, &2));
        // Longest job without machine conflicts
        assert_eq!(5, graph.critical_length().unwrap());
    }

    #[test]
    fn test_partial_graph_follows_commit_order() {
        let instance = instance();
        let committed = [
            ScheduledOperation { job: 1, op_index: 0, machine: 0, start: 0, duration: 4 },
            ScheduledOperation { job: 0, op_index: 0, machine: 0, start: 4, duration: 3 },
        ];
        let graph: LinkedGraph<ProblemNode> = instance.partial_graph(&committed);

        assert!(!graph.has_disjunctions());
        assert!(graph.has_precedence(&3, &1));
        assert!(!graph.has_precedence(&0, &1));
        assert!(graph.has_precedence(&0, &3));
        assert_eq!(9, graph.critical_length().unwrap());

        let (_, path) = graph.critical_path().unwrap();
        assert_eq!(vec!(3, 1, 2), path.iter().map(|n| n.id()).collect::<Vec<_>>());
    }
}
