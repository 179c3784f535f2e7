use std::fs::File;
use std::io::{ BufRead, BufReader, Read };
use std::path::Path;

use itertools::Itertools;
use serde::{ Deserialize, Serialize };

use crate::error::InvalidInstanceError;

mod graph;

pub use graph::ProblemNode;

pub trait ProblemSolver {
    type Solution;
    fn solve(&self, instance: &Instance) -> Self::Solution;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Operation {
    pub job: usize,
    pub index: usize,
    pub machine: usize,
    pub duration: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    operations: Vec<Operation>,
    // remaining[k] = total duration of operations k.., one extra trailing zero
    remaining: Vec<u32>,
}

impl Job {
    fn new(operations: Vec<Operation>) -> Self {
        let mut remaining = vec!(0u32; operations.len() + 1);
        for (k, operation) in operations.iter().enumerate().rev() {
            remaining[k] = remaining[k + 1] + operation.duration;
        }
        Job { operations, remaining }
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Total duration of the operations from position `from` onward, 0 past the end.
    pub fn remaining_work(&self, from: usize) -> u32 {
        self.remaining.get(from).copied().unwrap_or(0)
    }
}

/// Jobs, operations and the machines they reference. Immutable once loaded.
///
/// Machine ids must cover the dense range `0..machine_count()`: every id
/// below the largest one is used by at least one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    jobs: Vec<Job>,
    machines: usize,
    machine_load: Vec<u32>,
    // first graph node of every job, the source takes node 0
    node_offsets: Vec<usize>,
    operation_count: usize,
    optimum: Option<u32>,
}

impl Instance {
    /// Builds an instance from one `(machine, duration)` sequence per job.
    pub fn new<J: AsRef<[(i64, i64)]>>(jobs: &[J]) -> Result<Self, InvalidInstanceError> {
        if jobs.is_empty() {
            return Err(InvalidInstanceError::NoJobs);
        }

        let mut total = 0u32;
        let mut parsed = Vec::with_capacity(jobs.len());
        for (job, raw) in jobs.iter().enumerate() {
            let raw = raw.as_ref();
            if raw.is_empty() {
                return Err(InvalidInstanceError::EmptyJob { job });
            }

            let mut operations = Vec::with_capacity(raw.len());
            for (index, &(machine, duration)) in raw.iter().enumerate() {
                if duration < 0 {
                    return Err(InvalidInstanceError::NegativeDuration { job, index, duration });
                }
                let machine = usize::try_from(machine)
                    .map_err(|_| InvalidInstanceError::NegativeMachine { job, index, machine })?;
                let (duration, sum) = u32::try_from(duration).ok()
                    .and_then(|d| total.checked_add(d).map(|sum| (d, sum)))
                    .ok_or(InvalidInstanceError::DurationOverflow { job, index })?;
                total = sum;

                operations.push(Operation { job, index, machine, duration });
            }
            parsed.push(Job::new(operations));
        }

        let used = parsed.iter()
            .flat_map(|job| job.operations.iter().map(|op| op.machine))
            .unique()
            .count();
        let max = parsed.iter()
            .flat_map(|job| job.operations.iter().map(|op| op.machine))
            .max()
            .unwrap_or(0);
        // Ids index the per-machine tables directly
        if max >= used {
            return Err(InvalidInstanceError::SparseMachines { max, used });
        }
        let machines = used;

        let mut machine_load = vec!(0u32; machines);
        for operation in parsed.iter().flat_map(|job| job.operations.iter()) {
            machine_load[operation.machine] += operation.duration;
        }

        let node_offsets = parsed.iter()
            .scan(1usize, |next, job| {
                let offset = *next;
                *next += job.len();
                Some(offset)
            })
            .collect::<Vec<_>>();
        let operation_count = parsed.iter().map(Job::len).sum();

        Ok(Instance {
            jobs: parsed,
            machines,
            machine_load,
            node_offsets,
            operation_count,
            optimum: None,
        })
    }

    // To be ran with: https://www.eii.uva.es/elena/JSSP/InstancesJSSP.htm
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self, InvalidInstanceError> {
        let file = File::open(path).map_err(|e| InvalidInstanceError::Io(e.to_string()))?;
        Self::from_reader(file)
    }

    /// Plain text benchmark format: job count, machine count and known
    /// optimum on the first three lines, then one line of processing times per
    /// job, then one line of 1-based machine ids per job.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, InvalidInstanceError> {
        fn parse_error(message: impl Into<String>) -> InvalidInstanceError {
            InvalidInstanceError::Parse(message.into())
        }

        fn parse_row(line: &str) -> Result<Vec<i64>, InvalidInstanceError> {
            line.split_whitespace()
                .map(|s| s.parse::<i64>().map_err(|_| parse_error(format!("`{}` is not a number", s))))
                .collect()
        }

        let lines = BufReader::new(reader).lines()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| InvalidInstanceError::Io(e.to_string()))?;
        let mut lines = lines.iter().map(|l| l.trim()).filter(|l| !l.is_empty());

        let mut header = |what: &str| -> Result<u32, InvalidInstanceError> {
            lines.next()
                .and_then(|x| x.parse::<u32>().ok())
                .ok_or_else(|| parse_error(format!("{} is not a number", what)))
        };
        let jobs = header("job count")? as usize;
        let machines = i64::from(header("machine count")?);
        let optimum = header("optimum")?;

        let processing_times = lines.by_ref().take(jobs).map(parse_row).collect::<Result<Vec<_>, _>>()?;
        let machine_placements = lines.by_ref().take(jobs).map(parse_row).collect::<Result<Vec<_>, _>>()?;
        if processing_times.len() != jobs || machine_placements.len() != jobs {
            return Err(parse_error(format!("expected {} rows of processing times and machines", jobs)));
        }

        let raw = processing_times.into_iter()
            .zip(machine_placements)
            .enumerate()
            .map(|(job, (p, m))| {
                if p.len() != m.len() {
                    return Err(parse_error(format!("job {} has {} processing times but {} machines", job, p.len(), m.len())));
                }
                if let Some(machine) = m.iter().find(|&&machine| machine > machines) {
                    return Err(parse_error(format!("job {} references machine {} of {}", job, machine, machines)));
                }
                // Machines are 1-based in the file
                Ok(m.into_iter().map(|m| m - 1).zip(p).collect_vec())
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Instance::new(raw.as_slice())?.with_optimum(optimum))
    }

    pub fn with_optimum(mut self, optimum: u32) -> Self {
        self.optimum = Some(optimum);
        self
    }

    /// Known optimal makespan, when the instance came with one.
    pub fn optimum(&self) -> Option<u32> {
        self.optimum
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn job(&self, job: usize) -> &Job {
        &self.jobs[job]
    }

    pub fn job_count(&self) -> usize {
        self.jobs.len()
    }

    pub fn machine_count(&self) -> usize {
        self.machines
    }

    pub fn operation_count(&self) -> usize {
        self.operation_count
    }

    pub fn operation(&self, job: usize, index: usize) -> Option<&Operation> {
        self.jobs.get(job).and_then(|j| j.operations.get(index))
    }

    pub fn operations(&self) -> impl Iterator<Item = &Operation> {
        self.jobs.iter().flat_map(|job| job.operations.iter())
    }

    pub fn remaining_work(&self, job: usize, from: usize) -> u32 {
        self.jobs[job].remaining_work(from)
    }

    /// Total processing time of all operations on machine `machine`.
    pub fn machine_load(&self, machine: usize) -> u32 {
        self.machine_load[machine]
    }

    pub fn machine_loads(&self) -> &[u32] {
        &self.machine_load
    }

    pub fn total_work(&self) -> u32 {
        self.machine_load.iter().sum()
    }

    /// Graph node holding operation `index` of job `job`.
    pub(crate) fn node_index(&self, job: usize, index: usize) -> usize {
        self.node_offsets[job] + index
    }
}
