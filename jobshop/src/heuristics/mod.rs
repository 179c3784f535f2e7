//! Constructive dispatching rules used to seed the incumbent.

use serde::{ Deserialize, Serialize };

use crate::problem::{ Instance, ProblemSolver };
use crate::schedule::Schedule;
use crate::state::{ Candidate, SearchState };

/// Always dispatches the operation that can start first, lowest job on ties.
#[derive(Debug, Clone, Copy, Default)]
pub struct GifflerThompson;

/// Always dispatches the shortest pending operation, earliest start on ties.
#[derive(Debug, Clone, Copy, Default)]
pub struct SptGreedy;

fn dispatch<K: Ord>(instance: &Instance, rule: impl Fn(&Candidate) -> K) -> Schedule {
    let mut state = SearchState::root(instance);
    while let Some(candidate) = state.candidates(instance).into_iter().min_by_key(|c| rule(c)) {
        state.commit(&candidate);
    }
    state.into_schedule()
}

impl ProblemSolver for GifflerThompson {
    type Solution = Schedule;

    fn solve(&self, instance: &Instance) -> Schedule {
        dispatch(instance, |c| (c.start, c.job))
    }
}

impl ProblemSolver for SptGreedy {
    type Solution = Schedule;

    fn solve(&self, instance: &Instance) -> Schedule {
        dispatch(instance, |c| (c.duration, c.start, c.job))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitialBound {
    None,
    #[default]
    GifflerThompson,
    SptGreedy,
}

impl InitialBound {
    pub fn seed(self, instance: &Instance) -> Option<Schedule> {
        match self {
            InitialBound::None => None,
            InitialBound::GifflerThompson => Some(GifflerThompson.solve(instance)),
            InitialBound::SptGreedy => Some(SptGreedy.solve(instance)),
        }
    }
}
