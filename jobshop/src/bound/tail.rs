use crate::error::InfeasibleBoundError;
use crate::problem::Instance;
use crate::state::SearchState;

use super::LowerBound;

/// Every job still needs its remaining operations back to back.
pub struct JobTailBound;

impl LowerBound for JobTailBound {
    fn name(&self) -> &'static str {
        "job_tail"
    }

    fn estimate(&self, instance: &Instance, state: &SearchState) -> Result<u32, InfeasibleBoundError> {
        Ok(state.job_ready().iter()
            .zip(state.next_op())
            .enumerate()
            .map(|(job, (ready, next))| ready + instance.remaining_work(job, *next))
            .max()
            .unwrap_or(0))
    }
}

/// Every machine still has to process its remaining load after it becomes free.
pub struct MachineTailBound;

impl LowerBound for MachineTailBound {
    fn name(&self) -> &'static str {
        "machine_tail"
    }

    fn estimate(&self, _: &Instance, state: &SearchState) -> Result<u32, InfeasibleBoundError> {
        Ok(state.machine_ready().iter()
            .zip(state.remaining_load())
            .map(|(ready, load)| ready + load)
            .max()
            .unwrap_or(0))
    }
}
