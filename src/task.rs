//! # Tasks
//!
//! Defines the schedulable unit. A task is a period (`interval`), the tick
//! at which its current period began (`start_time`), an optional job and an
//! optional completion callback.
//!
//! Tasks are constructed by the application and borrowed by a scheduler;
//! the scheduler never owns or copies them. Jobs and callbacks are borrowed
//! trait objects, so plain `fn` items and capturing closures both work
//! without allocation.
//!
//! ## Readiness
//!
//! ```text
//!   start_time            start_time + interval
//!       │◄──── remaining > 0 ────►│◄──── finished (remaining == 0) ───►
//! ```
//!
//! An interval of `0` marks the housekeeping task: always finished.

use core::fmt;

use crate::config::{Status, Tick, NEUTRAL_STATUS};
use crate::time;

/// Borrowed job body. Returns an advisory status code.
pub type Job<'t> = &'t dyn Fn() -> Status;

/// Borrowed completion callback, handed the job's status.
pub type Callback<'t> = &'t dyn Fn(Status);

// ---------------------------------------------------------------------------
// Task
// ---------------------------------------------------------------------------

/// A periodic task.
pub struct Task<'t> {
    interval: Tick,
    start_time: Tick,
    job: Option<Job<'t>>,
    callback: Option<Callback<'t>>,
}

impl<'t> Task<'t> {
    /// Create a task that becomes ready `interval` ticks after `start_time`.
    pub fn new(
        interval: Tick,
        start_time: Tick,
        job: Option<Job<'t>>,
        callback: Option<Callback<'t>>,
    ) -> Self {
        Self {
            interval,
            start_time,
            job,
            callback,
        }
    }

    /// Create an always-ready housekeeping task (interval `0`).
    pub fn housekeeping(job: Option<Job<'t>>) -> Self {
        Self::new(0, 0, job, None)
    }

    #[inline]
    pub fn interval(&self) -> Tick {
        self.interval
    }

    #[inline]
    pub fn start_time(&self) -> Tick {
        self.start_time
    }

    #[inline]
    pub fn set_start_time(&mut self, tick: Tick) {
        self.start_time = tick;
    }

    /// Begin a new period at `tick`. The task is next due at `tick + interval`.
    #[inline]
    pub fn restart(&mut self, tick: Tick) {
        self.set_start_time(tick);
    }

    /// True for the always-ready housekeeping task.
    #[inline]
    pub fn is_housekeeping(&self) -> bool {
        self.interval == 0
    }

    /// Ticks left in the current period, in `[0, interval]`.
    #[inline]
    pub fn ticks_remaining(&self, tick: Tick) -> Tick {
        time::ticks_remaining(tick, self.start_time, self.interval)
    }

    /// True once the current period has fully elapsed.
    #[inline]
    pub fn is_finished(&self, tick: Tick) -> bool {
        self.ticks_remaining(tick) == 0
    }

    /// Tick at which the current period ends (wrapping).
    #[inline]
    pub fn due_at(&self) -> Tick {
        time::due_at(self.start_time, self.interval)
    }

    #[inline]
    pub fn has_job(&self) -> bool {
        self.job.is_some()
    }

    /// Replace (or clear) the job. The callback is fixed at construction.
    pub fn set_job(&mut self, job: Option<Job<'t>>) {
        self.job = job;
    }

    /// Run the job, forward its status to the callback and return it.
    ///
    /// Without a job nothing is invoked and `NEUTRAL_STATUS` is returned.
    pub fn call(&self) -> Status {
        let Some(job) = self.job else {
            return NEUTRAL_STATUS;
        };
        let status = job();
        if let Some(callback) = self.callback {
            callback(status);
        }
        status
    }
}

impl fmt::Debug for Task<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("interval", &self.interval)
            .field("start_time", &self.start_time)
            .field("job", &self.job.is_some())
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// PriorityTask
// ---------------------------------------------------------------------------

/// A task with a static priority, used by the dynamic scheduler to break
/// ties between tasks that are due at the same time.
///
/// Lower value = higher precedence.
#[derive(Debug)]
pub struct PriorityTask<'t> {
    priority: u32,
    task: Task<'t>,
}

impl<'t> PriorityTask<'t> {
    pub fn new(
        priority: u32,
        interval: Tick,
        start_time: Tick,
        job: Option<Job<'t>>,
        callback: Option<Callback<'t>>,
    ) -> Self {
        Self {
            priority,
            task: Task::new(interval, start_time, job, callback),
        }
    }

    /// Wrap an existing task.
    pub fn from_task(priority: u32, task: Task<'t>) -> Self {
        Self { priority, task }
    }

    #[inline]
    pub fn priority(&self) -> u32 {
        self.priority
    }

    #[inline]
    pub fn task(&self) -> &Task<'t> {
        &self.task
    }

    #[inline]
    pub fn task_mut(&mut self) -> &mut Task<'t> {
        &mut self.task
    }
}

impl<'t> AsRef<Task<'t>> for PriorityTask<'t> {
    fn as_ref(&self) -> &Task<'t> {
        &self.task
    }
}

// ---------------------------------------------------------------------------
// Unit tests (host-only)
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    #[test]
    fn test_get_set_start_time() {
        let mut task = Task::new(1, 100, None, None);
        assert_eq!(task.start_time(), 100);

        task.set_start_time(1000);
        assert_eq!(task.start_time(), 1000);
    }

    #[test]
    fn test_interval() {
        let task = Task::new(999, 0, None, None);
        assert_eq!(task.interval(), 999);
        assert!(!task.is_housekeeping());
        assert!(Task::housekeeping(None).is_housekeeping());
    }

    #[test]
    fn test_finished_boundaries() {
        let task = Task::new(1, 1, None, None);
        assert!(!task.is_finished(1));
        assert!(task.is_finished(2));
        assert!(task.is_finished(3));
        assert!(task.is_finished(1002));

        let task = Task::new(1, 100, None, None);
        assert!(!task.is_finished(100));
    }

    #[test]
    fn test_remaining_across_wrap() {
        let interval = 10;
        let start = 0u32.wrapping_sub(500);
        let task = Task::new(interval, start, None, None);

        for offset in 0..1000u32 {
            let tick = start.wrapping_add(offset);
            let remaining = task.ticks_remaining(tick);
            assert!(remaining <= interval);
            if offset >= interval {
                assert_eq!(remaining, 0, "offset {}", offset);
            } else {
                assert_eq!(remaining, interval - offset, "offset {}", offset);
            }
        }
    }

    #[test]
    fn test_remaining_start_just_before_wrap() {
        let interval = 100;
        for start in [0u32.wrapping_sub(interval), 0u32.wrapping_sub(interval) + 10] {
            let task = Task::new(interval, start, None, None);
            for offset in 0..1000u32 {
                let remaining = task.ticks_remaining(start.wrapping_add(offset));
                assert!(remaining <= interval);
                assert_eq!(remaining == 0, offset >= interval);
            }
        }
    }

    #[test]
    fn test_call_without_job() {
        let hits = Cell::new(0);
        let callback = |_status: Status| hits.set(hits.get() + 1);
        let task = Task::new(1, 100, None, Some(&callback));

        assert_eq!(task.call(), NEUTRAL_STATUS);
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn test_call_pipes_status_to_callback() {
        let seen = Cell::new(None);
        let job = || 42;
        let callback = |status: Status| seen.set(Some(status));
        let task = Task::new(5, 0, Some(&job), Some(&callback));

        assert_eq!(task.call(), 42);
        assert_eq!(seen.get(), Some(42));
    }

    #[test]
    fn test_set_job() {
        let job = || -7;
        let mut task = Task::new(5, 0, None, None);
        assert!(!task.has_job());

        task.set_job(Some(&job));
        assert!(task.has_job());
        assert_eq!(task.call(), -7);
    }

    #[test]
    fn test_priority_task_delegates() {
        let mut task = PriorityTask::new(3, 20, 5, None, None);
        assert_eq!(task.priority(), 3);
        assert_eq!(task.task().due_at(), 25);

        task.task_mut().restart(40);
        assert_eq!(task.as_ref().start_time(), 40);
        assert!(!task.task().is_finished(59));
        assert!(task.task().is_finished(60));
    }

    #[test]
    fn test_priority_task_from_task() {
        let job = || 9;
        let task = PriorityTask::from_task(4, Task::new(10, 100, Some(&job), None));
        assert_eq!(task.priority(), 4);
        assert_eq!(task.task().interval(), 10);
        assert_eq!(task.task().ticks_remaining(105), 5);
        assert_eq!(task.task().call(), 9);
    }
}
