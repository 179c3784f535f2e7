//! Disjunctive graphs for shop scheduling.
//!
//! A graph holds a source (first node), a sink (last node) and weighted
//! operation nodes in between. Fixed precedences are stored as arcs and
//! unresolved machine conflicts as undirected disjunctions. Longest paths over
//! the arcs give earliest start times and the critical length of the schedule
//! the arcs describe.

mod linked_graph;

use std::collections::VecDeque;

use thiserror::Error;

pub use linked_graph::LinkedGraph;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("graph contains a cycle")]
    Cyclic,
    #[error("no disjunction between nodes {0} and {1}")]
    InvalidEdge(usize, usize),
}

pub trait NodeId {
    fn id(&self) -> usize;
}

impl NodeId for usize {
    fn id(&self) -> usize {
        *self
    }
}

pub trait GraphNode: NodeId {
    fn create(id: usize, weight: u32, machine_id: Option<usize>, job_id: Option<usize>) -> Self;
    fn weight(&self) -> u32;
    fn job_id(&self) -> Option<usize>;
    fn machine_id(&self) -> Option<usize>;
}

/// Edge as seen from the node that owns the relation list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Relation {
    Successor(usize), Predecessor(usize), Disjunctive(usize)
}

/// Kahn ordering over the arcs of a graph. Disjunctions are ignored.
///
/// Yields every node exactly once when the arcs are acyclic. If some nodes can
/// never be released the iterator yields a single `Err(GraphError::Cyclic)`
/// and stops.
pub struct TopologyIterator<'a, G: Graph> {
    graph: &'a G,
    in_degree: Vec<usize>,
    ready: VecDeque<usize>,
    emitted: usize,
    done: bool,
}

impl<'a, G: Graph> Iterator for TopologyIterator<'a, G> {
    type Item = Result<&'a G::Node, GraphError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let graph = self.graph;
        match self.ready.pop_front() {
            Some(current) => {
                for successor in graph.successors(&current) {
                    let degree = &mut self.in_degree[successor.id()];
                    *degree -= 1;
                    if *degree == 0 {
                        self.ready.push_back(successor.id());
                    }
                }
                self.emitted += 1;
                Some(Ok(&graph[current]))
            },
            None => {
                self.done = true;
                if self.emitted < graph.nodes().len() {
                    Some(Err(GraphError::Cyclic))
                } else {
                    None
                }
            }
        }
    }
}

/// Borrowed view over one adjacency list of a graph.
pub struct NodeIterator<'a, G: Graph> {
    graph: &'a G,
    ids: std::slice::Iter<'a, usize>,
}

impl<'a, G: Graph> NodeIterator<'a, G> {
    pub fn new(graph: &'a G, ids: &'a [usize]) -> Self {
        NodeIterator { graph, ids: ids.iter() }
    }
}

impl<'a, G: Graph> Iterator for NodeIterator<'a, G> {
    type Item = &'a G::Node;

    fn next(&mut self) -> Option<Self::Item> {
        let graph = self.graph;
        self.ids.next().map(|id| &graph.nodes()[*id])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }
}

impl<'a, G: Graph> ExactSizeIterator for NodeIterator<'a, G> {}

/// Graphs always contain at least the source and the sink node.
pub trait Graph where Self: Sized + std::ops::IndexMut<usize, Output = <Self as Graph>::Node> {
    type Node: GraphNode;
    fn create(nodes: Vec<Self::Node>, edges: Vec<Vec<Relation>>) -> Self;
    fn nodes(&self) -> &[Self::Node];
    fn successors(&self, id: &impl NodeId) -> NodeIterator<Self>;
    fn predecessors(&self, id: &impl NodeId) -> NodeIterator<Self>;
    fn disjunctions(&self, id: &impl NodeId) -> NodeIterator<Self>;

    /// Turns the disjunction between both nodes into the arc node_1 -> node_2.
    /// A fixation that would close a cycle is rolled back and reported.
    fn fix_disjunction(&mut self, node_1: &impl NodeId, node_2: &impl NodeId) -> Result<(), GraphError>;

    /// Graph contains relation: node_1 -> node_2
    fn has_precedence(&self, node_1: &impl NodeId, node_2: &impl NodeId) -> bool;
    fn has_disjunction(&self, node_1: &impl NodeId, node_2: &impl NodeId) -> bool;
    fn node_has_disjunction(&self, node: &impl NodeId) -> bool;

    fn source(&self) -> &Self::Node {
        &self.nodes()[0]
    }

    fn sink(&self) -> &Self::Node {
        &self.nodes()[self.nodes().len() - 1]
    }

    fn has_disjunctions(&self) -> bool {
        self.nodes().iter().any(|node| self.node_has_disjunction(node))
    }

    /// Retrieves topology ordering in the graph, starting at the source, ending at the sink.
    fn topology(&self) -> TopologyIterator<'_, Self> {
        let in_degree = self.nodes().iter()
            .map(|node| self.predecessors(node).len())
            .collect::<Vec<_>>();
        let ready = in_degree.iter()
            .enumerate()
            .filter(|(_, degree)| **degree == 0)
            .map(|(id, _)| id)
            .collect();

        TopologyIterator {
            graph: self,
            in_degree,
            ready,
            emitted: 0,
            done: false,
        }
    }

    /// Earliest start of every node: the longest weighted path reaching it.
    fn heads(&self) -> Result<Vec<u32>, GraphError> {
        let nodes = self.nodes();
        let mut starting_times = vec!(0u32; nodes.len());

        for node in self.topology() {
            let node = node?;
            starting_times[node.id()] = self.predecessors(node)
                .map(|x| starting_times[x.id()] + nodes[x.id()].weight())
                .max()
                .unwrap_or(0);
        }

        Ok(starting_times)
    }

    fn critical_length(&self) -> Result<u32, GraphError> {
        let heads = self.heads()?;
        Ok(heads[self.sink().id()])
    }

    /// Critical length and the operation nodes on one longest path, source and sink excluded.
    fn critical_path(&self) -> Result<(u32, Vec<&Self::Node>), GraphError> {
        let nodes = self.nodes();
        let mut starting_times = vec!(0u32; nodes.len());
        let mut backtracker: Vec<Option<usize>> = vec!(None; nodes.len());

        for node in self.topology() {
            let node = node?;
            let max_predecessor = self.predecessors(node)
                .map(|x| (x.id(), starting_times[x.id()] + nodes[x.id()].weight()))
                .max_by_key(|x| x.1);

            if let Some((predecessor, start)) = max_predecessor {
                backtracker[node.id()] = Some(predecessor);
                starting_times[node.id()] = start;
            }
        }

        let sink = self.sink().id();
        let source = self.source().id();
        let mut path = Vec::new();
        let mut pointer = backtracker[sink];
        while let Some(current) = pointer {
            if current == source {
                break;
            }
            path.push(&nodes[current]);
            pointer = backtracker[current];
        }
        path.reverse();
        Ok((starting_times[sink], path))
    }

    fn is_cyclic(&self) -> bool {
        self.topology().any(|node| node.is_err())
    }
}
