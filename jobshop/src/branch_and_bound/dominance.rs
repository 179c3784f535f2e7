use hashbrown::HashMap;
use serde::{ Deserialize, Serialize };

use crate::state::SearchState;

/// Which part of a state identifies it in the dominance table.
///
/// Only `Full` is exact: states agreeing on next operations, job ready times
/// and machine ready times have the same completions. The coarser keys merge
/// states whose futures differ and may discard the optimum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DominanceKey {
    Disabled,
    NextOp,
    NextOpMachineReady,
    #[default]
    Full,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct StateKey {
    next_op: Vec<usize>,
    job_ready: Vec<u32>,
    machine_ready: Vec<u32>,
}

/// Best lower bound seen per key.
#[derive(Debug, Default)]
pub struct DominanceTable {
    key: DominanceKey,
    visited: HashMap<StateKey, u32>,
}

impl DominanceTable {
    pub fn new(key: DominanceKey) -> Self {
        DominanceTable { key, visited: HashMap::new() }
    }

    fn key_of(&self, state: &SearchState) -> Option<StateKey> {
        let (job_ready, machine_ready) = match self.key {
            DominanceKey::Disabled => return None,
            DominanceKey::NextOp => (Vec::new(), Vec::new()),
            DominanceKey::NextOpMachineReady => (Vec::new(), state.machine_ready().to_vec()),
            DominanceKey::Full => (state.job_ready().to_vec(), state.machine_ready().to_vec()),
        };
        Some(StateKey { next_op: state.next_op().to_vec(), job_ready, machine_ready })
    }

    /// True if a state with the same key and a lower bound no larger was seen
    /// before. Otherwise records this state's bound.
    pub fn is_dominated(&mut self, state: &SearchState, lower_bound: u32) -> bool {
        let key = match self.key_of(state) {
            Some(key) => key,
            None => return false,
        };

        match self.visited.get_mut(&key) {
            Some(recorded) if *recorded <= lower_bound => true,
            Some(recorded) => {
                *recorded = lower_bound;
                false
            },
            None => {
                self.visited.insert(key, lower_bound);
                false
            }
        }
    }

    pub fn len(&self) -> usize {
        self.visited.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visited.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::Instance;

    fn instance() -> Instance {
        Instance::new(&[vec!((0, 2)), vec!((1, 3)), vec!((0, 1))]).unwrap()
    }

    #[test]
    fn test_full_key() {
        let instance = instance();
        let root = SearchState::root(&instance);
        let c = root.candidates(&instance);
        // Jobs 0 and 1 run on different machines, so both orders reach the same state
        let first = root.child(&c[0]).child(&c[1]);
        let second = root.child(&c[1]).child(&c[0]);
        let other = root.child(&c[2]).child(&c[1]);
        let mut table = DominanceTable::new(DominanceKey::Full);

        assert!(!table.is_dominated(&first, 5));
        assert!(table.is_dominated(&second, 5));
        assert!(table.is_dominated(&second, 6));
        assert!(!table.is_dominated(&second, 4));
        assert!(table.is_dominated(&first, 4));
        assert!(!table.is_dominated(&other, 4));
        assert_eq!(2, table.len());
    }

    #[test]
    fn test_coarse_keys_merge_more_states() {
        let instance = instance();
        let root = SearchState::root(&instance);
        let c = root.candidates(&instance);
        let first = root.child(&c[0]).child(&c[1]);
        let first = first.child(&first.candidates(&instance)[0]);
        // Same next ops, but job 0 ran after job 2 on machine 0
        let delayed = root.child(&c[2]).child(&c[1]);
        let delayed = delayed.child(&delayed.candidates(&instance)[0]);
        assert_eq!(first.next_op(), delayed.next_op());
        assert_eq!(first.machine_ready(), delayed.machine_ready());

        let mut next_op = DominanceTable::new(DominanceKey::NextOp);
        assert!(!next_op.is_dominated(&first, 3));
        assert!(next_op.is_dominated(&delayed, 3));

        let mut machine_ready = DominanceTable::new(DominanceKey::NextOpMachineReady);
        assert!(!machine_ready.is_dominated(&first, 3));
        assert!(machine_ready.is_dominated(&delayed, 3));

        let mut full = DominanceTable::new(DominanceKey::Full);
        assert!(!full.is_dominated(&first, 3));
        assert!(!full.is_dominated(&delayed, 3));

        let mut disabled = DominanceTable::new(DominanceKey::Disabled);
        assert!(!disabled.is_dominated(&first, 3));
        assert!(!disabled.is_dominated(&first, 3));
        assert!(disabled.is_empty());
    }
}
