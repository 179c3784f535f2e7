use disjunctgraph::GraphError;
use thiserror::Error;

/// Malformed instance input. Reported at load time and never recovered from.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInstanceError {
    #[error("instance has no jobs")]
    NoJobs,
    #[error("job {job} has no operations")]
    EmptyJob { job: usize },
    #[error("operation {index} of job {job} has negative duration {duration}")]
    NegativeDuration { job: usize, index: usize, duration: i64 },
    #[error("operation {index} of job {job} references negative machine {machine}")]
    NegativeMachine { job: usize, index: usize, machine: i64 },
    #[error("machine ids must be dense: largest id is {max} but only {used} machines are used")]
    SparseMachines { max: usize, used: usize },
    #[error("operation {index} of job {job} pushes the total processing time past {}", u32::MAX)]
    DurationOverflow { job: usize, index: usize },
    #[error("cannot read instance: {0}")]
    Io(String),
    #[error("cannot parse instance: {0}")]
    Parse(String),
}

/// A partial order that admits no schedule. The bounding engine turns this
/// into an infinite bound so the state is pruned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("partial order is infeasible: {0}")]
pub struct InfeasibleBoundError(#[from] pub GraphError);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("operation {op_index} of job {job} is missing")]
    MissingOperation { job: usize, op_index: usize },
    #[error("operation {op_index} of job {job} appears more than once")]
    DuplicateOperation { job: usize, op_index: usize },
    #[error("operation {op_index} of job {job} does not exist")]
    UnknownOperation { job: usize, op_index: usize },
    #[error("operation {op_index} of job {job} runs on machine {found}, expected {expected}")]
    WrongMachine { job: usize, op_index: usize, expected: usize, found: usize },
    #[error("operation {op_index} of job {job} lasts {found}, expected {expected}")]
    WrongDuration { job: usize, op_index: usize, expected: u32, found: u32 },
    #[error("operation {op_index} of job {job} starts at {start} before its predecessor completes at {ready}")]
    PrecedenceViolation { job: usize, op_index: usize, start: u32, ready: u32 },
    #[error("jobs {first} and {second} overlap on machine {machine}")]
    MachineOverlap { machine: usize, first: usize, second: usize },
    #[error("sequence for machine {machine} holds {found} operations, expected {expected}")]
    IncompleteSequence { machine: usize, expected: usize, found: usize },
    #[error("machine sequences are inconsistent: {0}")]
    Graph(#[from] GraphError),
}
