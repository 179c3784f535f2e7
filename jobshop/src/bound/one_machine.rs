use std::collections::BinaryHeap;

use crate::error::InfeasibleBoundError;
use crate::problem::Instance;
use crate::state::SearchState;

use super::LowerBound;

/// Preemptive single machine relaxation.
///
/// Every pending operation on a machine gets a release date (its job's ready
/// time plus the job work in front of it, but no earlier than the machine is
/// free) and a tail (the job work behind it). The preemptive Jackson schedule
/// minimizes `max(completion + tail)` on that machine, which no schedule of the
/// whole shop can beat.
pub struct OneMachineBound;

#[derive(Debug, Clone, Copy)]
struct Task {
    release: u32,
    remaining: u32,
    tail: u32,
}

impl LowerBound for OneMachineBound {
    fn name(&self) -> &'static str {
        "one_machine"
    }

    fn estimate(&self, instance: &Instance, state: &SearchState) -> Result<u32, InfeasibleBoundError> {
        let mut bound = 0;
        let mut tasks = Vec::with_capacity(instance.job_count());

        for machine in 0..instance.machine_count() {
            if state.remaining_load()[machine] == 0 {
                continue;
            }

            tasks.clear();
            let machine_ready = state.machine_ready()[machine];
            for (job, &next) in state.next_op().iter().enumerate() {
                let pending = instance.remaining_work(job, next);
                for operation in &instance.job(job).operations()[next..] {
                    if operation.machine == machine {
                        let head = state.job_ready()[job] + pending - instance.remaining_work(job, operation.index);
                        tasks.push(Task {
                            release: head.max(machine_ready),
                            remaining: operation.duration,
                            tail: instance.remaining_work(job, operation.index + 1),
                        });
                    }
                }
            }

            bound = bound.max(preemptive_jackson(&mut tasks));
        }

        Ok(bound)
    }
}

/// Largest `completion + tail` when the released task with the longest tail always runs.
fn preemptive_jackson(tasks: &mut [Task]) -> u32 {
    tasks.sort_unstable_by_key(|task| task.release);

    let mut ready: BinaryHeap<(u32, usize)> = BinaryHeap::with_capacity(tasks.len());
    let mut time = 0;
    let mut next = 0;
    let mut bound = 0;

    while next < tasks.len() || !ready.is_empty() {
        if ready.is_empty() {
            time = time.max(tasks[next].release);
        }
        while next < tasks.len() && tasks[next].release <= time {
            ready.push((tasks[next].tail, next));
            next += 1;
        }

        let Some((tail, index)) = ready.pop() else { continue };
        // Run until done or until the next release may preempt
        let until = tasks.get(next).map_or(u32::MAX, |task| task.release);
        let run = tasks[index].remaining.min(until - time);
        time += run;
        tasks[index].remaining -= run;

        if tasks[index].remaining == 0 {
            bound = bound.max(time + tail);
        } else {
            ready.push((tail, index));
        }
    }

    bound
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_beats_tail_bounds() {
        // Both jobs queue on machine 1 and then need 2 more units each.
        let instance = Instance::new(&[vec!((1, 4), (0, 2)), vec!((1, 4), (0, 2))]).unwrap();
        let root = SearchState::root(&instance);
        assert_eq!(10, OneMachineBound.estimate(&instance, &root).unwrap());
    }

    #[test]
    fn test_uses_machine_ready_time() {
        let instance = Instance::new(&[vec!((0, 3)), vec!((0, 2), (1, 1))]).unwrap();
        let mut state = SearchState::root(&instance);
        let first = state.candidates(&instance)[0];
        state.commit(&first);

        // Machine 0 free at 3, job 1 still needs 2 + 1
        assert_eq!(6, OneMachineBound.estimate(&instance, &state).unwrap());
    }

    #[test]
    fn test_jackson_preempts_for_longer_tail() {
        let mut tasks = [
            Task { release: 0, remaining: 4, tail: 0 },
            Task { release: 1, remaining: 1, tail: 10 },
        ];
        // Second task interrupts at 1 and finishes at 2, the first resumes until 5.
        assert_eq!(12, preemptive_jackson(&mut tasks));
    }

    #[test]
    fn test_idle_until_release() {
        let mut tasks = [Task { release: 7, remaining: 2, tail: 1 }];
        assert_eq!(10, preemptive_jackson(&mut tasks));
        assert_eq!(0, preemptive_jackson(&mut []));
    }
}
