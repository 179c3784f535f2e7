//! Child generation for the search.

use itertools::Itertools;
use serde::{ Deserialize, Serialize };

use crate::bound::BoundingEngine;
use crate::problem::Instance;
use crate::state::{ Candidate, SearchState };

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateMode {
    /// One child per unfinished job.
    Full,
    /// Giffler-Thompson conflict set on the machine that finishes first.
    #[default]
    ConflictSet,
}

/// Order in which children reach the frontier. Affects how fast good
/// schedules show up, never which schedule is optimal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateOrdering {
    None,
    /// Earliest start first, longer operations first on ties.
    #[default]
    EarliestStart,
    /// Shortest processing time first, earliest start on ties.
    Spt,
}

impl CandidateOrdering {
    pub fn sort(self, candidates: &mut [Candidate]) {
        match self {
            CandidateOrdering::None => (),
            CandidateOrdering::EarliestStart => {
                candidates.sort_by_key(|c| (c.start, std::cmp::Reverse(c.duration), c.job))
            },
            CandidateOrdering::Spt => candidates.sort_by_key(|c| (c.duration, c.start, c.job)),
        }
    }
}

/// Candidates that have to be branched on so that every active schedule stays reachable.
///
/// Let `c*` be the earliest completion over all candidates and `m*` the machine
/// of the lowest job achieving it. Any candidate on `m*` that starts before
/// `c*` may be the next operation on that machine, everything else can wait.
pub fn conflict_set(candidates: Vec<Candidate>) -> Vec<Candidate> {
    let pivot = match candidates.iter().min_by_key(|c| (c.completion(), c.job)) {
        Some(pivot) => *pivot,
        None => return candidates,
    };
    let earliest_completion = pivot.completion();

    candidates.into_iter()
        .filter(|c| c.machine == pivot.machine && (c.start < earliest_completion || c.job == pivot.job))
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BranchingEngine {
    mode: CandidateMode,
    ordering: CandidateOrdering,
}

impl BranchingEngine {
    pub fn new(mode: CandidateMode, ordering: CandidateOrdering) -> Self {
        BranchingEngine { mode, ordering }
    }

    pub fn mode(&self) -> CandidateMode {
        self.mode
    }

    pub fn ordering(&self) -> CandidateOrdering {
        self.ordering
    }

    /// Operations to branch on, in the order their children should be explored.
    pub fn candidates(&self, instance: &Instance, state: &SearchState) -> Vec<Candidate> {
        let candidates = state.candidates(instance);
        let mut candidates = match self.mode {
            CandidateMode::Full => candidates,
            CandidateMode::ConflictSet => conflict_set(candidates),
        };
        self.ordering.sort(&mut candidates);
        candidates
    }

    /// Children of `state` with their lower bounds.
    pub fn children(&self, instance: &Instance, state: &SearchState, bounds: &BoundingEngine) -> Vec<(SearchState, u32)> {
        self.candidates(instance, state)
            .iter()
            .map(|candidate| {
                let child = state.child(candidate);
                let lower_bound = bounds.lower_bound(instance, &child);
                (child, lower_bound)
            })
            .collect_vec()
    }
}
