//! # Static Scheduler
//!
//! Table-driven cooperative dispatcher. The application owns a fixed array
//! of tasks; the scheduler borrows it once and, on every dispatch
//! opportunity, runs exactly one task to completion.
//!
//! ## Scheduling Algorithm
//!
//! On each `run_next_task(tick)`:
//! 1. **Scan**: walk the table in index order
//! 2. **Select**: the first task whose period has elapsed wins; table order
//!    is the priority ranking
//! 3. **Fallback**: if nothing is due, the last entry (housekeeping,
//!    interval `0`) runs, so the scheduler never idles
//! 4. **Run & rearm**: call the task, then restart its period at `tick`
//!
//! Overdue tasks are never batched: one task per call.
//!
//! ## Table Layout
//!
//! ```text
//!   index:    0        1        ...     n-1
//!           [A:5]    [B:3]      ...    [H:0]   ← housekeeping, always ready
//! ```

use crate::config::Tick;
use crate::error::SchedError;
use crate::task::Task;

// ---------------------------------------------------------------------------
// Scheduler struct
// ---------------------------------------------------------------------------

/// The table-driven scheduler. Holds a borrowed task table once one has
/// been accepted; owns no task memory itself.
#[derive(Debug, Default)]
pub struct StaticScheduler<'a, 't> {
    table: Option<&'a mut [Task<'t>]>,
}

impl<'a, 't> StaticScheduler<'a, 't> {
    /// Create a scheduler with no table. Dispatch is a no-op until
    /// `set_task_list` succeeds.
    pub const fn new() -> Self {
        Self { table: None }
    }

    /// Check the structural rules a table must satisfy:
    /// non-empty, last entry interval `0`, every other interval `> 0`.
    pub fn validate_table(table: &[Task<'_>]) -> Result<(), SchedError> {
        let Some((last, rest)) = table.split_last() else {
            return Err(SchedError::EmptyTable);
        };
        if !last.is_housekeeping() {
            return Err(SchedError::MissingHousekeeping {
                interval: last.interval(),
            });
        }
        match rest.iter().position(Task::is_housekeeping) {
            Some(index) => Err(SchedError::MisplacedHousekeeping { index }),
            None => Ok(()),
        }
    }

    /// Install `table` unless one is already live.
    ///
    /// The table is validated on every call. Returns `Ok(true)` when the
    /// table was installed and `Ok(false)` when a table was already accepted
    /// (the new one is ignored).
    pub fn try_set_task_list(&mut self, table: &'a mut [Task<'t>]) -> Result<bool, SchedError> {
        Self::validate_table(table)?;

        if self.table.is_some() {
            log::warn!("sched: task table already set, ignoring new table");
            return Ok(false);
        }

        log::info!("sched: task table accepted ({} tasks)", table.len());
        self.table = Some(table);
        Ok(true)
    }

    /// Install `table` once.
    ///
    /// # Panics
    /// Panics if the table is malformed. A bad table is a build-time
    /// misconfiguration and must never reach a running system.
    pub fn set_task_list(&mut self, table: &'a mut [Task<'t>]) {
        if let Err(err) = self.try_set_task_list(table) {
            panic!("sched: invalid task table: {}", err);
        }
    }

    /// True once a table has been accepted.
    pub fn is_ready(&self) -> bool {
        self.table.is_some()
    }

    pub fn task_count(&self) -> usize {
        self.table.as_deref().map_or(0, <[Task<'t>]>::len)
    }

    /// The accepted table, or an empty slice before setup.
    pub fn tasks(&self) -> &[Task<'t>] {
        self.table.as_deref().unwrap_or(&[])
    }

    /// Index of the task that would run at `tick`.
    ///
    /// The first finished task in table order, else the housekeeping task.
    /// `None` only if no table has been accepted.
    pub fn next_available(&self, tick: Tick) -> Option<usize> {
        let table = self.table.as_deref()?;
        let index = table
            .iter()
            .position(|task| task.is_finished(tick))
            .unwrap_or(table.len() - 1);
        Some(index)
    }

    /// Run exactly one task and restart its period at `tick`.
    ///
    /// Returns the index that ran, or `None` before setup.
    pub fn run_next_task(&mut self, tick: Tick) -> Option<usize> {
        let Some(index) = self.next_available(tick) else {
            log::warn!("sched: dispatch at tick {} before a task table was set", tick);
            return None;
        };
        let table = self.table.as_deref_mut()?;
        let task = &mut table[index];

        log::trace!("sched: tick {} running task {}", tick, index);
        task.call();
        task.restart(tick);
        Some(index)
    }
}

// ---------------------------------------------------------------------------
// Unit tests (host-only)
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Status;
    use core::cell::Cell;

    #[test]
    fn test_validate_table() {
        let good = [Task::new(5, 0, None, None), Task::housekeeping(None)];
        assert_eq!(StaticScheduler::validate_table(&good), Ok(()));

        assert_eq!(
            StaticScheduler::validate_table(&[]),
            Err(SchedError::EmptyTable)
        );

        let no_housekeeping = [Task::new(5, 0, None, None), Task::new(3, 0, None, None)];
        assert_eq!(
            StaticScheduler::validate_table(&no_housekeeping),
            Err(SchedError::MissingHousekeeping { interval: 3 })
        );

        let misplaced = [
            Task::new(5, 0, None, None),
            Task::housekeeping(None),
            Task::housekeeping(None),
        ];
        assert_eq!(
            StaticScheduler::validate_table(&misplaced),
            Err(SchedError::MisplacedHousekeeping { index: 1 })
        );
    }

    #[test]
    #[should_panic(expected = "invalid task table")]
    fn test_set_task_list_rejects_bad_table() {
        let mut table = [Task::new(5, 0, None, None)];
        let mut scheduler = StaticScheduler::new();
        scheduler.set_task_list(&mut table);
    }

    #[test]
    fn test_set_task_list_idempotent() {
        let mut first = [Task::new(5, 0, None, None), Task::housekeeping(None)];
        let mut second = [
            Task::new(7, 0, None, None),
            Task::new(9, 0, None, None),
            Task::housekeeping(None),
        ];
        let mut scheduler = StaticScheduler::new();
        assert!(!scheduler.is_ready());
        assert_eq!(scheduler.task_count(), 0);

        assert_eq!(scheduler.try_set_task_list(&mut first), Ok(true));
        assert_eq!(scheduler.try_set_task_list(&mut second), Ok(false));

        assert!(scheduler.is_ready());
        assert_eq!(scheduler.task_count(), 2);
        assert_eq!(scheduler.tasks()[0].interval(), 5);
    }

    #[test]
    fn test_next_available_falls_back_to_housekeeping() {
        let mut table = [
            Task::new(5, 0, None, None),
            Task::new(3, 0, None, None),
            Task::housekeeping(None),
        ];
        let mut scheduler = StaticScheduler::new();
        scheduler.set_task_list(&mut table);

        assert_eq!(scheduler.next_available(1), Some(2));
        assert_eq!(scheduler.next_available(3), Some(1));
        // Table order wins when both are due
        assert_eq!(scheduler.next_available(5), Some(0));
    }

    #[test]
    fn test_next_available_without_table() {
        let scheduler = StaticScheduler::new();
        assert_eq!(scheduler.next_available(0), None);
    }

    #[test]
    fn test_run_next_task_rearms() {
        let runs = Cell::new(0);
        let job = || -> Status {
            runs.set(runs.get() + 1);
            0
        };
        let mut table = [Task::new(10, 0, Some(&job), None), Task::housekeeping(None)];
        let mut scheduler = StaticScheduler::new();
        scheduler.set_task_list(&mut table);

        assert_eq!(scheduler.run_next_task(10), Some(0));
        assert_eq!(runs.get(), 1);
        assert_eq!(scheduler.tasks()[0].start_time(), 10);

        assert_eq!(scheduler.run_next_task(19), Some(1));
        assert_eq!(runs.get(), 1);
        assert_eq!(scheduler.run_next_task(20), Some(0));
        assert_eq!(runs.get(), 2);
    }

    #[test]
    fn test_run_before_setup_is_noop() {
        let mut scheduler = StaticScheduler::new();
        assert_eq!(scheduler.run_next_task(42), None);
    }
}
