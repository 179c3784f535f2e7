use std::cmp::Ordering;
use std::collections::BinaryHeap;

use serde::{ Deserialize, Serialize };

use crate::state::SearchState;

/// Open states waiting to be expanded, each with its lower bound.
pub trait Frontier {
    fn push(&mut self, state: SearchState, lower_bound: u32);
    fn pop(&mut self) -> Option<(SearchState, u32)>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Pushes the children of one state so that the first child is expanded first among them.
    fn push_children(&mut self, children: Vec<(SearchState, u32)>) {
        for (state, lower_bound) in children {
            self.push(state, lower_bound);
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExplorationOrder {
    /// Lowest bound first.
    #[default]
    BestFirst,
    /// Last in, first out.
    DepthFirst,
}

impl ExplorationOrder {
    pub fn frontier(self) -> Box<dyn Frontier + Send> {
        match self {
            ExplorationOrder::BestFirst => Box::new(BestFirstFrontier::default()),
            ExplorationOrder::DepthFirst => Box::new(DepthFirstFrontier::default()),
        }
    }
}

#[derive(Debug, Default)]
pub struct DepthFirstFrontier {
    stack: Vec<(SearchState, u32)>,
}

impl Frontier for DepthFirstFrontier {
    fn push(&mut self, state: SearchState, lower_bound: u32) {
        self.stack.push((state, lower_bound));
    }

    fn pop(&mut self) -> Option<(SearchState, u32)> {
        self.stack.pop()
    }

    fn len(&self) -> usize {
        self.stack.len()
    }

    fn push_children(&mut self, children: Vec<(SearchState, u32)>) {
        self.stack.extend(children.into_iter().rev());
    }
}

struct Entry {
    lower_bound: u32,
    depth: usize,
    sequence: u64,
    state: SearchState,
}

// Max-heap order: lower bound ascending, then deeper states, then insertion order.
impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        other.lower_bound.cmp(&self.lower_bound)
            .then_with(|| self.depth.cmp(&other.depth))
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

#[derive(Default)]
pub struct BestFirstFrontier {
    heap: BinaryHeap<Entry>,
    sequence: u64,
}

impl Frontier for BestFirstFrontier {
    fn push(&mut self, state: SearchState, lower_bound: u32) {
        self.sequence += 1;
        self.heap.push(Entry {
            lower_bound,
            depth: state.depth(),
            sequence: self.sequence,
            state,
        });
    }

    fn pop(&mut self) -> Option<(SearchState, u32)> {
        self.heap.pop().map(|entry| (entry.state, entry.lower_bound))
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::Instance;

    fn states() -> (SearchState, SearchState, SearchState) {
        let instance = Instance::new(&[vec!((0, 1)), vec!((1, 1))]).unwrap();
        let root = SearchState::root(&instance);
        let candidates = root.candidates(&instance);
        let a = root.child(&candidates[0]);
        let b = root.child(&candidates[1]);
        (root, a, b)
    }

    #[test]
    fn test_best_first_order() {
        let (root, a, b) = states();
        let mut frontier = BestFirstFrontier::default();
        frontier.push(root.clone(), 5);
        frontier.push(a.clone(), 7);
        frontier.push(b.clone(), 5);
        frontier.push(root.clone(), 3);
        assert_eq!(4, frontier.len());

        // Lowest bound, then the deeper state, then the older one
        assert_eq!(Some((root.clone(), 3)), frontier.pop());
        assert_eq!(Some((b, 5)), frontier.pop());
        assert_eq!(Some((root, 5)), frontier.pop());
        assert_eq!(Some((a, 7)), frontier.pop());
        assert!(frontier.is_empty());
        assert_eq!(None, frontier.pop());
    }

    #[test]
    fn test_depth_first_explores_first_child_first() {
        let (root, a, b) = states();
        let mut frontier = DepthFirstFrontier::default();
        frontier.push(root.clone(), 0);
        frontier.push_children(vec!((a.clone(), 9), (b.clone(), 1)));

        assert_eq!(Some((a, 9)), frontier.pop());
        assert_eq!(Some((b, 1)), frontier.pop());
        assert_eq!(Some((root, 0)), frontier.pop());
    }

    #[test]
    fn test_exploration_order_builds_frontier() {
        let (root, _, _) = states();
        for order in [ExplorationOrder::BestFirst, ExplorationOrder::DepthFirst] {
            let mut frontier = order.frontier();
            frontier.push(root.clone(), 1);
            assert_eq!(1, frontier.len());
            assert_eq!(Some((root.clone(), 1)), frontier.pop());
        }
    }
}
