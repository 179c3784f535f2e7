use std::sync::atomic::{ AtomicU32, Ordering };

use parking_lot::Mutex;

use crate::schedule::Schedule;

/// Best complete schedule found so far and the update protocol around it.
pub trait IncumbentStore {
    /// Makespan every new schedule has to beat, `u32::MAX` while there is none.
    fn upper_bound(&self) -> u32;

    /// Installs `schedule` if it is strictly better. Returns whether it was installed.
    fn offer(&mut self, schedule: Schedule) -> bool;
}

/// Incumbent owned by a single search.
#[derive(Debug, Clone, Default)]
pub struct Incumbent {
    schedule: Option<Schedule>,
}

impl Incumbent {
    pub fn new() -> Self {
        Incumbent::default()
    }

    pub fn makespan(&self) -> Option<u32> {
        self.schedule.as_ref().map(Schedule::makespan)
    }

    pub fn schedule(&self) -> Option<&Schedule> {
        self.schedule.as_ref()
    }

    pub fn into_schedule(self) -> Option<Schedule> {
        self.schedule
    }
}

impl IncumbentStore for Incumbent {
    fn upper_bound(&self) -> u32 {
        self.makespan().unwrap_or(u32::MAX)
    }

    fn offer(&mut self, schedule: Schedule) -> bool {
        if schedule.makespan() < self.upper_bound() {
            self.schedule = Some(schedule);
            true
        } else {
            false
        }
    }
}

/// Incumbent shared between worker threads. The bound is readable without
/// locking; installs are serialized by the schedule lock.
#[derive(Debug)]
pub struct SharedIncumbent {
    upper_bound: AtomicU32,
    schedule: Mutex<Option<Schedule>>,
}

impl SharedIncumbent {
    pub fn new(schedule: Option<Schedule>) -> Self {
        SharedIncumbent {
            upper_bound: AtomicU32::new(schedule.as_ref().map_or(u32::MAX, Schedule::makespan)),
            schedule: Mutex::new(schedule),
        }
    }

    pub fn current_bound(&self) -> u32 {
        self.upper_bound.load(Ordering::Acquire)
    }

    pub fn try_install(&self, schedule: Schedule) -> bool {
        let makespan = schedule.makespan();
        if makespan >= self.current_bound() {
            return false;
        }

        let mut guard = self.schedule.lock();
        if makespan >= self.upper_bound.load(Ordering::Acquire) {
            return false;
        }
        *guard = Some(schedule);
        self.upper_bound.store(makespan, Ordering::Release);
        true
    }

    pub fn snapshot(&self) -> Option<Schedule> {
        self.schedule.lock().clone()
    }

    pub fn into_schedule(self) -> Option<Schedule> {
        self.schedule.into_inner()
    }
}

/// View of a [`SharedIncumbent`] for one worker.
#[derive(Debug, Clone, Copy)]
pub struct SharedIncumbentAdapter<'a> {
    inner: &'a SharedIncumbent,
}

impl<'a> SharedIncumbentAdapter<'a> {
    pub fn new(inner: &'a SharedIncumbent) -> Self {
        SharedIncumbentAdapter { inner }
    }
}

impl<'a> IncumbentStore for SharedIncumbentAdapter<'a> {
    fn upper_bound(&self) -> u32 {
        self.inner.current_bound()
    }

    fn offer(&mut self, schedule: Schedule) -> bool {
        self.inner.try_install(schedule)
    }
}
