use std::fmt;

use disjunctgraph::{ Graph, LinkedGraph };
use itertools::Itertools;
use serde::{ Deserialize, Serialize };

use crate::error::ScheduleError;
use crate::problem::{ Instance, ProblemNode };

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScheduledOperation {
    pub job: usize,
    pub op_index: usize,
    pub machine: usize,
    pub start: u32,
    pub duration: u32,
}

impl ScheduledOperation {
    pub fn completion(&self) -> u32 {
        self.start + self.duration
    }
}

/// Committed operations in the order they were scheduled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    operations: Vec<ScheduledOperation>,
}

impl From<Vec<ScheduledOperation>> for Schedule {
    fn from(operations: Vec<ScheduledOperation>) -> Self {
        Schedule { operations }
    }
}

impl Schedule {
    pub fn operations(&self) -> &[ScheduledOperation] {
        &self.operations
    }

    pub fn into_operations(self) -> Vec<ScheduledOperation> {
        self.operations
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn makespan(&self) -> u32 {
        self.operations.iter().map(ScheduledOperation::completion).max().unwrap_or(0)
    }

    /// Operations of every machine ordered by start time.
    pub fn machine_sequences(&self, machines: usize) -> Vec<Vec<ScheduledOperation>> {
        let mut sequences = vec!(Vec::new(); machines);
        for operation in self.operations.iter().sorted_by_key(|op| (op.start, op.duration, op.job)) {
            if let Some(sequence) = sequences.get_mut(operation.machine) {
                sequence.push(*operation);
            }
        }
        sequences
    }

    /// Checks that the schedule is a complete, feasible plan for `instance`.
    pub fn validate(&self, instance: &Instance) -> Result<(), ScheduleError> {
        let mut seen: Vec<Vec<Option<ScheduledOperation>>> = instance.jobs().iter()
            .map(|job| vec!(None; job.len()))
            .collect();

        for scheduled in &self.operations {
            let (job, op_index) = (scheduled.job, scheduled.op_index);
            let operation = instance.operation(job, op_index)
                .ok_or(ScheduleError::UnknownOperation { job, op_index })?;
            if operation.machine != scheduled.machine {
                return Err(ScheduleError::WrongMachine { job, op_index, expected: operation.machine, found: scheduled.machine });
            }
            if operation.duration != scheduled.duration {
                return Err(ScheduleError::WrongDuration { job, op_index, expected: operation.duration, found: scheduled.duration });
            }
            if seen[job][op_index].replace(*scheduled).is_some() {
                return Err(ScheduleError::DuplicateOperation { job, op_index });
            }
        }

        for (job, operations) in seen.iter().enumerate() {
            let mut ready = 0;
            for (op_index, scheduled) in operations.iter().enumerate() {
                let scheduled = scheduled.ok_or(ScheduleError::MissingOperation { job, op_index })?;
                if scheduled.start < ready {
                    return Err(ScheduleError::PrecedenceViolation { job, op_index, start: scheduled.start, ready });
                }
                ready = scheduled.completion();
            }
        }

        for (machine, sequence) in self.machine_sequences(instance.machine_count()).iter().enumerate() {
            let mut busy: Option<&ScheduledOperation> = None;
            for operation in sequence.iter().filter(|op| op.duration > 0) {
                if let Some(previous) = busy {
                    if operation.start < previous.completion() {
                        return Err(ScheduleError::MachineOverlap { machine, first: previous.job, second: operation.job });
                    }
                }
                if busy.map_or(true, |previous| operation.completion() > previous.completion()) {
                    busy = Some(operation);
                }
            }
        }

        Ok(())
    }

    /// Rebuilds the semi-active schedule that processes every machine in the
    /// given order. `sequences[m]` lists `(job, op_index)` pairs for machine `m`.
    pub fn from_machine_sequences(instance: &Instance, sequences: &[Vec<(usize, usize)>]) -> Result<Schedule, ScheduleError> {
        let mut graph: LinkedGraph<ProblemNode> = instance.disjunctive_graph();
        let mut placed = instance.jobs().iter().map(|job| vec!(false; job.len())).collect::<Vec<_>>();

        for machine in 0..instance.machine_count() {
            let sequence = sequences.get(machine).map_or(&[][..], |s| s.as_slice());
            let expected = instance.operations().filter(|op| op.machine == machine).count();
            if sequence.len() != expected {
                return Err(ScheduleError::IncompleteSequence { machine, expected, found: sequence.len() });
            }

            for &(job, op_index) in sequence {
                let operation = instance.operation(job, op_index)
                    .ok_or(ScheduleError::UnknownOperation { job, op_index })?;
                if operation.machine != machine {
                    return Err(ScheduleError::WrongMachine { job, op_index, expected: operation.machine, found: machine });
                }
                if std::mem::replace(&mut placed[job][op_index], true) {
                    return Err(ScheduleError::DuplicateOperation { job, op_index });
                }
            }

            for (&(job_1, op_1), &(job_2, op_2)) in sequence.iter().tuple_windows() {
                let node_1 = instance.node_index(job_1, op_1);
                let node_2 = instance.node_index(job_2, op_2);
                if job_1 == job_2 {
                    // Same job twice on one machine, the job order decides
                    if op_1 > op_2 {
                        return Err(ScheduleError::Graph(disjunctgraph::GraphError::Cyclic));
                    }
                    continue;
                }
                graph.fix_disjunction(&node_1, &node_2)?;
            }
        }

        let heads = graph.heads()?;
        let operations = instance.operations()
            .map(|op| ScheduledOperation {
                job: op.job,
                op_index: op.index,
                machine: op.machine,
                start: heads[instance.node_index(op.job, op.index)],
                duration: op.duration,
            })
            .sorted_by_key(|op| (op.start, op.job, op.op_index))
            .collect();

        Ok(Schedule { operations })
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:>5} {:>4} {:>8} {:>8} {:>8}", "job", "op", "machine", "start", "end")?;
        for op in &self.operations {
            writeln!(f, "{:>5} {:>4} {:>8} {:>8} {:>8}", op.job, op.op_index, op.machine, op.start, op.completion())?;
        }
        write!(f, "makespan: {}", self.makespan())
    }
}
