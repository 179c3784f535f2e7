use crate::problem::Instance;
use crate::schedule::{ Schedule, ScheduledOperation };

/// The next operation of a job placed at its earliest feasible start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub job: usize,
    pub op_index: usize,
    pub machine: usize,
    pub duration: u32,
    pub start: u32,
}

impl Candidate {
    pub fn completion(&self) -> u32 {
        self.start + self.duration
    }
}

/// Progress of one search node. Every node owns its own copy; children are
/// derived with [`SearchState::child`] and never share anything with their parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchState {
    next_op: Vec<usize>,
    job_ready: Vec<u32>,
    machine_ready: Vec<u32>,
    // processing time still to run on every machine
    remaining_load: Vec<u32>,
    makespan: u32,
    schedule: Vec<ScheduledOperation>,
}

impl SearchState {
    pub fn root(instance: &Instance) -> Self {
        SearchState {
            next_op: vec!(0; instance.job_count()),
            job_ready: vec!(0; instance.job_count()),
            machine_ready: vec!(0; instance.machine_count()),
            remaining_load: instance.machine_loads().to_vec(),
            makespan: 0,
            schedule: Vec::with_capacity(instance.operation_count()),
        }
    }

    pub fn next_op(&self) -> &[usize] {
        &self.next_op
    }

    pub fn job_ready(&self) -> &[u32] {
        &self.job_ready
    }

    pub fn machine_ready(&self) -> &[u32] {
        &self.machine_ready
    }

    pub fn remaining_load(&self) -> &[u32] {
        &self.remaining_load
    }

    pub fn makespan(&self) -> u32 {
        self.makespan
    }

    pub fn schedule(&self) -> &[ScheduledOperation] {
        &self.schedule
    }

    /// Number of committed operations.
    pub fn depth(&self) -> usize {
        self.schedule.len()
    }

    pub fn is_terminal(&self, instance: &Instance) -> bool {
        self.next_op.iter()
            .zip(instance.jobs())
            .all(|(next, job)| *next == job.len())
    }

    /// Pending operation of every unfinished job, in job order.
    pub fn candidates(&self, instance: &Instance) -> Vec<Candidate> {
        instance.jobs().iter()
            .enumerate()
            .filter_map(|(job, operations)| {
                let operation = operations.operations().get(self.next_op[job])?;
                Some(Candidate {
                    job,
                    op_index: operation.index,
                    machine: operation.machine,
                    duration: operation.duration,
                    start: self.job_ready[job].max(self.machine_ready[operation.machine]),
                })
            })
            .collect()
    }

    pub fn commit(&mut self, candidate: &Candidate) {
        debug_assert_eq!(self.next_op[candidate.job], candidate.op_index);
        let completion = candidate.completion();

        self.next_op[candidate.job] += 1;
        self.job_ready[candidate.job] = completion;
        self.machine_ready[candidate.machine] = completion;
        self.remaining_load[candidate.machine] -= candidate.duration;
        self.makespan = self.makespan.max(completion);
        self.schedule.push(ScheduledOperation {
            job: candidate.job,
            op_index: candidate.op_index,
            machine: candidate.machine,
            start: candidate.start,
            duration: candidate.duration,
        });
    }

    pub fn child(&self, candidate: &Candidate) -> Self {
        let mut child = self.clone();
        child.commit(candidate);
        child
    }

    pub fn into_schedule(self) -> Schedule {
        Schedule::from(self.schedule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instance() -> Instance {
        Instance::new(&[vec!((0, 3), (1, 2)), vec!((0, 4), (1, 1))]).unwrap()
    }

    #[test]
    fn test_root() {
        let instance = instance();
        let root = SearchState::root(&instance);

        assert_eq!(&[0, 0], root.next_op());
        assert_eq!(&[7, 3], root.remaining_load());
        assert_eq!(0, root.makespan());
        assert_eq!(0, root.depth());
        assert!(!root.is_terminal(&instance));
    }

    #[test]
    fn test_child_leaves_parent_untouched() {
        let instance = instance();
        let root = SearchState::root(&instance);
        let candidates = root.candidates(&instance);
        assert_eq!(2, candidates.len());

        let child = root.child(&candidates[1]);
        assert_eq!(SearchState::root(&instance), root);
        assert_eq!(&[0, 1], child.next_op());
        assert_eq!(&[0, 4], child.job_ready());
        assert_eq!(&[4, 0], child.machine_ready());
        assert_eq!(&[3, 3], child.remaining_load());
        assert_eq!(4, child.makespan());

        // Job 0 now waits for machine 0
        let waiting = child.candidates(&instance);
        assert_eq!(Candidate { job: 0, op_index: 0, machine: 0, duration: 3, start: 4 }, waiting[0]);
        assert_eq!(Candidate { job: 1, op_index: 1, machine: 1, duration: 1, start: 4 }, waiting[1]);
    }

    #[test]
    fn test_terminal_state() {
        let instance = instance();
        let mut state = SearchState::root(&instance);
        while let Some(candidate) = state.candidates(&instance).first().copied() {
            state.commit(&candidate);
        }

        assert!(state.is_terminal(&instance));
        assert_eq!(&[2, 2], state.next_op());
        assert_eq!(&[0, 0], state.remaining_load());
        assert_eq!(4, state.depth());
        // j0: 0..3, 3..5; j1: 3..7, 7..8
        assert_eq!(8, state.makespan());
        assert_eq!(8, state.into_schedule().makespan());
    }
}
