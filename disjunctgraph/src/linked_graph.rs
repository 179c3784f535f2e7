use itertools::Itertools;

use crate::{ NodeId, GraphNode, NodeIterator, Graph, Relation, GraphError };

/// Adjacency-list graph. Relation lists are kept free of duplicates.
#[derive(Clone, Debug)]
pub struct LinkedGraph<T: NodeId + Clone> {
    nodes: Vec<T>,
    successors: Vec<Vec<usize>>,
    predecessors: Vec<Vec<usize>>,
    disjunctions: Vec<Vec<usize>>
}

impl<T: NodeId + Clone> LinkedGraph<T> {
    fn add_arc(&mut self, node_1: usize, node_2: usize) {
        if !self.successors[node_1].contains(&node_2) {
            self.successors[node_1].push(node_2);
            self.predecessors[node_2].push(node_1);
        }
    }

    fn remove_arc(&mut self, node_1: usize, node_2: usize) {
        self.successors[node_1].retain(|x| *x != node_2);
        self.predecessors[node_2].retain(|x| *x != node_1);
    }
}

impl<T: GraphNode + Clone> Graph for LinkedGraph<T> {
    type Node = T;

    fn create(nodes: Vec<T>, edges: Vec<Vec<Relation>>) -> Self {
        let select = |pick: fn(&Relation) -> Option<usize>| -> Vec<Vec<usize>> {
            edges.iter()
                .map(|relations| relations.iter().filter_map(pick).unique().collect())
                .collect()
        };

        let successors = select(|x| match x { Relation::Successor(e) => Some(*e), _ => None });
        let predecessors = select(|x| match x { Relation::Predecessor(e) => Some(*e), _ => None });
        let disjunctions = select(|x| match x { Relation::Disjunctive(e) => Some(*e), _ => None });

        LinkedGraph {
            nodes,
            successors,
            predecessors,
            disjunctions
        }
    }

    fn nodes(&self) -> &[T] {
        &self.nodes
    }

    fn successors(&self, id: &impl NodeId) -> NodeIterator<Self> {
        NodeIterator::new(self, &self.successors[id.id()])
    }

    fn predecessors(&self, id: &impl NodeId) -> NodeIterator<Self> {
        NodeIterator::new(self, &self.predecessors[id.id()])
    }

    fn disjunctions(&self, id: &impl NodeId) -> NodeIterator<Self> {
        NodeIterator::new(self, &self.disjunctions[id.id()])
    }

    fn fix_disjunction(&mut self, node_1: &impl NodeId, node_2: &impl NodeId) -> Result<(), GraphError> {
        let node_1 = node_1.id();
        let node_2 = node_2.id();
        if !self.has_disjunction(&node_1, &node_2) {
            return Err(GraphError::InvalidEdge(node_1, node_2));
        }

        let implied = self.has_precedence(&node_1, &node_2);
        self.disjunctions[node_1].retain(|x| *x != node_2);
        self.disjunctions[node_2].retain(|x| *x != node_1);
        self.add_arc(node_1, node_2);

        if self.is_cyclic() {
            if !implied {
                self.remove_arc(node_1, node_2);
            }
            self.disjunctions[node_1].push(node_2);
            self.disjunctions[node_2].push(node_1);
            Err(GraphError::Cyclic)
        } else {
            Ok(())
        }
    }

    fn has_precedence(&self, node_1: &impl NodeId, node_2: &impl NodeId) -> bool {
        self.successors[node_1.id()].contains(&node_2.id())
    }

    fn has_disjunction(&self, node_1: &impl NodeId, node_2: &impl NodeId) -> bool {
        self.disjunctions[node_1.id()].contains(&node_2.id())
    }

    fn node_has_disjunction(&self, node: &impl NodeId) -> bool {
        !self.disjunctions[node.id()].is_empty()
    }
}

impl<T: NodeId + Clone> std::ops::Index<usize> for LinkedGraph<T> {
    type Output = T;

    fn index(&self, node: usize) -> &Self::Output {
        &self.nodes[node]
    }
}

impl<T: NodeId + Clone> std::ops::IndexMut<usize> for LinkedGraph<T> {
    fn index_mut(&mut self, node: usize) -> &mut T {
        &mut self.nodes[node]
    }
}
