use itertools::Itertools;

use crate::problem::Instance;
use crate::state::SearchState;


pub(crate) type RawInstance = Vec<Vec<(i64, i64)>>;

pub(crate) fn toy_3x3() -> RawInstance {
    vec!(
        vec!((0, 2), (1, 5), (2, 4)),
        vec!((1, 2), (2, 3), (0, 5)),
        vec!((2, 4), (0, 2), (1, 3)),
    )
}

// Fisher and Thompson 6x6, optimum 55
pub(crate) fn ft06() -> RawInstance {
    vec!(
        vec!((2, 1), (0, 3), (1, 6), (3, 7), (5, 3), (4, 6)),
        vec!((1, 8), (2, 5), (4, 10), (5, 10), (0, 10), (3, 4)),
        vec!((2, 5), (3, 4), (5, 8), (0, 9), (1, 1), (4, 7)),
        vec!((1, 5), (0, 5), (2, 5), (3, 3), (4, 8), (5, 9)),
        vec!((2, 9), (1, 3), (4, 5), (5, 4), (0, 3), (3, 1)),
        vec!((1, 3), (3, 3), (5, 9), (0, 10), (4, 4), (2, 1)),
    )
}

pub(crate) fn ten_by_ten() -> RawInstance {
    vec!(
        vec!((0, 29), (1, 78), (2, 9), (3, 36), (4, 49), (5, 11), (6, 62), (7, 56), (8, 44), (9, 21)),
        vec!((0, 43), (2, 90), (4, 75), (9, 11), (3, 69), (1, 28), (6, 46), (5, 46), (7, 72), (8, 30)),
        vec!((1, 91), (0, 85), (3, 39), (2, 74), (8, 90), (5, 10), (7, 12), (6, 89), (9, 45), (4, 33)),
        vec!((1, 81), (2, 95), (0, 71), (4, 99), (6, 9), (8, 52), (7, 85), (3, 98), (9, 22), (5, 43)),
        vec!((2, 14), (0, 6), (1, 22), (5, 61), (3, 26), (4, 69), (8, 21), (7, 49), (9, 72), (6, 53)),
        vec!((2, 84), (1, 2), (5, 52), (3, 95), (8, 48), (9, 72), (0, 47), (6, 65), (4, 6), (7, 25)),
        vec!((1, 46), (0, 37), (3, 61), (2, 13), (6, 32), (5, 21), (9, 32), (8, 89), (7, 30), (4, 55)),
        vec!((2, 31), (0, 86), (1, 46), (5, 74), (4, 32), (6, 88), (8, 19), (9, 48), (7, 36), (3, 79)),
        vec!((0, 76), (1, 69), (3, 76), (5, 51), (2, 85), (9, 11), (6, 40), (7, 89), (4, 26), (8, 74)),
        vec!((1, 85), (0, 13), (2, 61), (6, 7), (8, 64), (9, 76), (5, 47), (3, 52), (4, 90), (7, 45)),
    )
}

/// Renumbers machine ids to `0..used`, keeping their relative order.
pub(crate) fn dense(raw: RawInstance) -> RawInstance {
    let ids = raw.iter().flatten().map(|&(machine, _)| machine).sorted().dedup().collect_vec();
    raw.into_iter()
        .map(|job| job.into_iter()
            .map(|(machine, duration)| (ids.binary_search(&machine).map_or(machine, |rank| rank as i64), duration))
            .collect())
        .collect()
}

pub(crate) fn load(raw: &RawInstance) -> Instance {
    Instance::new(raw.as_slice()).unwrap()
}

/// Smallest makespan over every way to finish `state`, by full enumeration.
pub(crate) fn best_completion(instance: &Instance, state: &SearchState) -> u32 {
    if state.is_terminal(instance) {
        return state.makespan();
    }
    state.candidates(instance)
        .iter()
        .map(|candidate| best_completion(instance, &state.child(candidate)))
        .min()
        .unwrap_or_else(|| state.makespan())
}

/// Walks from the root committing the candidate picked by each index, wrapping around.
pub(crate) fn walk(instance: &Instance, picks: &[usize]) -> SearchState {
    let mut state = SearchState::root(instance);
    for pick in picks {
        let candidates = state.candidates(instance);
        if candidates.is_empty() {
            break;
        }
        state.commit(&candidates[pick % candidates.len()]);
    }
    state
}
