//! # Dynamic Scheduler
//!
//! Time-ordered cooperative dispatcher with priority tie-break and pooled
//! link reuse. Tasks can be added, run, removed and re-submitted at runtime
//! without heap allocation: every link lives inline in a fixed arena of `N`
//! slots and is addressed by a `LinkId` handle.
//!
//! ## Link Chains
//!
//! Each link sits on at most one of three singly linked chains, threaded
//! through the arena by handle:
//!
//! ```text
//!   active   : head → [due soonest] → ... → [due latest]
//!   free     : head → unused links (pre-seeded with all N slots)
//!   finished : head → links whose task has run
//! ```
//!
//! A link popped from a pool is *detached*: it belongs to the caller until
//! it is re-inserted with `add_task` or pushed back onto a pool.
//!
//! ## Selection
//!
//! The active chain is ordered by remaining time, so once a link is found
//! not finished, no later link is finished either. Selection only walks
//! that ready prefix:
//! 1. find the minimum priority among the ready links
//! 2. return the first ready link with that priority
//!
//! Earliest-due first, priority as tie-break, `O(k)` in the number of
//! simultaneously ready links.

use core::fmt;

use crate::config::{Status, Tick, DEFAULT_LINK_POOL, NEUTRAL_STATUS};
use crate::error::SchedError;
use crate::task::PriorityTask;

// ---------------------------------------------------------------------------
// Handles and membership
// ---------------------------------------------------------------------------

/// Stable handle to a link slot in a `DynamicScheduler`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LinkId(usize);

impl LinkId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for LinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which chain a link currently sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Membership {
    /// Held by the caller, on no chain.
    Detached,
    Active,
    Free,
    Finished,
}

impl fmt::Display for Membership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Membership::Detached => "detached",
            Membership::Active => "active",
            Membership::Free => "free",
            Membership::Finished => "finished",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// Task link
// ---------------------------------------------------------------------------

/// One arena slot.
struct TaskLink<'a, 't> {
    task: Option<&'a mut PriorityTask<'t>>,
    next: Option<LinkId>,
    membership: Membership,
    /// Status from the last run.
    ret: Status,
    restart: bool,
}

impl TaskLink<'_, '_> {
    const fn free(next: Option<LinkId>) -> Self {
        Self {
            task: None,
            next,
            membership: Membership::Free,
            ret: NEUTRAL_STATUS,
            restart: false,
        }
    }
}

/// Walks one chain by handle.
struct Chain<'s, 'a, 't, const N: usize> {
    links: &'s [TaskLink<'a, 't>; N],
    cursor: Option<LinkId>,
}

impl<const N: usize> Iterator for Chain<'_, '_, '_, N> {
    type Item = LinkId;

    fn next(&mut self) -> Option<LinkId> {
        let id = self.cursor?;
        self.cursor = self.links[id.0].next;
        Some(id)
    }
}

// ---------------------------------------------------------------------------
// Scheduler struct
// ---------------------------------------------------------------------------

/// Dynamic scheduler over an inline arena of `N` links.
pub struct DynamicScheduler<'a, 't, const N: usize> {
    links: [TaskLink<'a, 't>; N],
    active: Option<LinkId>,
    free: Option<LinkId>,
    finished: Option<LinkId>,
}

impl<'a, 't, const N: usize> DynamicScheduler<'a, 't, N> {
    /// Create a scheduler with every link on the free pool.
    pub fn new() -> Self {
        let links = core::array::from_fn(|i| {
            let next = if i + 1 < N { Some(LinkId(i + 1)) } else { None };
            TaskLink::free(next)
        });
        Self {
            links,
            active: None,
            free: if N > 0 { Some(LinkId(0)) } else { None },
            finished: None,
        }
    }

    /// Total number of link slots.
    pub const fn capacity(&self) -> usize {
        N
    }

    // --- Link inspection ---------------------------------------------------

    fn link(&self, id: LinkId) -> Result<&TaskLink<'a, 't>, SchedError> {
        self.links.get(id.0).ok_or(SchedError::UnknownLink(id))
    }

    fn link_mut(&mut self, id: LinkId) -> Result<&mut TaskLink<'a, 't>, SchedError> {
        self.links.get_mut(id.0).ok_or_else(|| {
            log::warn!("dyn: rejected unknown link {} (capacity {})", id, N);
            SchedError::UnknownLink(id)
        })
    }

    fn detached_mut(&mut self, id: LinkId) -> Result<&mut TaskLink<'a, 't>, SchedError> {
        let link = self.link_mut(id)?;
        if link.membership != Membership::Detached {
            log::warn!("dyn: rejected link {}, still {}", id, link.membership);
            return Err(SchedError::LinkBusy {
                id,
                membership: link.membership,
            });
        }
        Ok(link)
    }

    /// True if `id` belongs to this arena and carries a task.
    pub fn is_valid_link(&self, id: LinkId) -> bool {
        self.link(id).map_or(false, |link| link.task.is_some())
    }

    pub fn membership(&self, id: LinkId) -> Option<Membership> {
        self.link(id).ok().map(|link| link.membership)
    }

    /// Status returned by the link's task the last time it ran.
    pub fn return_value(&self, id: LinkId) -> Option<Status> {
        self.link(id).ok().map(|link| link.ret)
    }

    /// The task bound to `id`, if any.
    pub fn task(&self, id: LinkId) -> Option<&PriorityTask<'t>> {
        self.link(id).ok()?.task.as_deref()
    }

    // --- Binding -----------------------------------------------------------

    /// Attach `task` to a detached, unbound link.
    pub fn bind(&mut self, id: LinkId, task: &'a mut PriorityTask<'t>) -> Result<(), SchedError> {
        let link = self.detached_mut(id)?;
        if link.task.is_some() {
            log::warn!("dyn: rejected bind, link {} already has a task", id);
            return Err(SchedError::AlreadyBound(id));
        }
        link.task = Some(task);
        Ok(())
    }

    /// Clear the stored status and restart flag of a detached link before it
    /// is re-submitted.
    pub fn reset(&mut self, id: LinkId) -> Result<(), SchedError> {
        let link = self.detached_mut(id)?;
        link.ret = NEUTRAL_STATUS;
        link.restart = false;
        Ok(())
    }

    /// When set, a link is re-inserted into the active chain right after it
    /// runs (rearmed at the dispatch tick) instead of going to `finished`.
    pub fn set_restart_on_finish(&mut self, id: LinkId, restart: bool) -> Result<(), SchedError> {
        self.link_mut(id)?.restart = restart;
        Ok(())
    }

    // --- Pools -------------------------------------------------------------

    /// Pop the head of the free pool. The link is returned detached.
    pub fn pop_from_free(&mut self) -> Option<LinkId> {
        let id = self.free?;
        self.free = self.detach_head(id);
        Some(id)
    }

    /// Pop the most recently finished link. It keeps its task and status.
    pub fn pop_from_finished(&mut self) -> Option<LinkId> {
        let id = self.finished?;
        self.finished = self.detach_head(id);
        Some(id)
    }

    /// Return a detached link to the free pool and hand its task back.
    pub fn add_to_free(&mut self, id: LinkId) -> Result<Option<&'a mut PriorityTask<'t>>, SchedError> {
        let head = self.free;
        let link = self.detached_mut(id)?;
        let task = link.task.take();
        link.ret = NEUTRAL_STATUS;
        link.restart = false;
        link.next = head;
        link.membership = Membership::Free;
        self.free = Some(id);
        Ok(task)
    }

    /// Push a detached link onto the finished pool.
    pub fn add_to_finished(&mut self, id: LinkId) -> Result<(), SchedError> {
        let head = self.finished;
        let link = self.detached_mut(id)?;
        link.next = head;
        link.membership = Membership::Finished;
        self.finished = Some(id);
        Ok(())
    }

    fn detach_head(&mut self, id: LinkId) -> Option<LinkId> {
        let link = &mut self.links[id.0];
        link.membership = Membership::Detached;
        link.next.take()
    }

    // --- Active chain ------------------------------------------------------

    /// Rearm the link's task at `tick` and insert it into the active chain
    /// in due order.
    ///
    /// Rejected without any change if the link is unknown, not detached, or
    /// has no task.
    pub fn add_task(&mut self, id: LinkId, tick: Tick) -> Result<(), SchedError> {
        let link = self.detached_mut(id)?;
        let Some(task) = link.task.as_deref_mut() else {
            log::warn!("dyn: rejected link {} with no task", id);
            return Err(SchedError::UnboundLink(id));
        };
        task.task_mut().restart(tick);
        let remaining = task.task().ticks_remaining(tick);

        self.insert_active(id, remaining, tick);
        log::debug!("dyn: link {} added at tick {}, due in {}", id, tick, remaining);
        Ok(())
    }

    /// Take an active link off the chain without running it. The link is
    /// returned detached.
    pub fn remove_task(&mut self, id: LinkId) -> Result<(), SchedError> {
        let membership = self.link_mut(id)?.membership;
        if membership != Membership::Active {
            log::warn!("dyn: cannot remove link {}, it is {}", id, membership);
            return Err(SchedError::LinkBusy { id, membership });
        }
        self.unlink_active(id);
        Ok(())
    }

    /// Insert before the first occupant whose remaining time at `tick` is
    /// at least `remaining`.
    fn insert_active(&mut self, id: LinkId, remaining: Tick, tick: Tick) {
        let mut prev: Option<LinkId> = None;
        let mut cursor = self.active;
        while let Some(current) = cursor {
            if self.remaining_at(current, tick) >= remaining {
                break;
            }
            prev = Some(current);
            cursor = self.links[current.0].next;
        }

        let link = &mut self.links[id.0];
        link.next = cursor;
        link.membership = Membership::Active;
        match prev {
            Some(prev) => self.links[prev.0].next = Some(id),
            None => self.active = Some(id),
        }
    }

    /// Single-pass search and splice.
    fn unlink_active(&mut self, id: LinkId) {
        let mut prev: Option<LinkId> = None;
        let mut cursor = self.active;
        while let Some(current) = cursor {
            if current == id {
                let link = &mut self.links[current.0];
                let next = link.next.take();
                link.membership = Membership::Detached;
                match prev {
                    Some(prev) => self.links[prev.0].next = next,
                    None => self.active = next,
                }
                return;
            }
            prev = Some(current);
            cursor = self.links[current.0].next;
        }
    }

    fn remaining_at(&self, id: LinkId, tick: Tick) -> Tick {
        self.links[id.0]
            .task
            .as_deref()
            .map_or(0, |task| task.task().ticks_remaining(tick))
    }

    fn priority_of(&self, id: LinkId) -> u32 {
        self.links[id.0]
            .task
            .as_deref()
            .map_or(u32::MAX, PriorityTask::priority)
    }

    fn chain(&self, head: Option<LinkId>) -> Chain<'_, 'a, 't, N> {
        Chain {
            links: &self.links,
            cursor: head,
        }
    }

    /// True if `id` is due at `tick`. Because the active chain is due
    /// ordered, the first link that is not due ends the ready prefix.
    fn is_ready(&self, id: LinkId, tick: Tick) -> bool {
        self.remaining_at(id, tick) == 0
    }

    // --- Dispatch ----------------------------------------------------------

    /// The link that would run at `tick`: earliest due, lowest priority
    /// value among those due together. `None` if nothing is due.
    pub fn next_available(&self, tick: Tick) -> Option<LinkId> {
        let best = self
            .chain(self.active)
            .take_while(|&id| self.is_ready(id, tick))
            .map(|id| self.priority_of(id))
            .min()?;
        self.chain(self.active)
            .take_while(|&id| self.is_ready(id, tick))
            .find(|&id| self.priority_of(id) == best)
    }

    /// Run the selected link's task, store its status on the link and move
    /// it to `finished` (or back into `active` if it restarts on finish).
    ///
    /// Returns the link that ran, or `None` if nothing was due.
    pub fn run_next_task(&mut self, tick: Tick) -> Option<LinkId> {
        let id = self.next_available(tick)?;
        self.unlink_active(id);

        let link = &mut self.links[id.0];
        let status = link.task.as_deref().map_or(NEUTRAL_STATUS, |task| task.task().call());
        link.ret = status;
        log::trace!("dyn: tick {} ran link {} -> {}", tick, id, status);

        if link.restart {
            if let Some(task) = link.task.as_deref_mut() {
                task.task_mut().restart(tick);
            }
            let remaining = self.remaining_at(id, tick);
            self.insert_active(id, remaining, tick);
        } else {
            let head = self.finished;
            link.next = head;
            link.membership = Membership::Finished;
            self.finished = Some(id);
            log::debug!("dyn: link {} finished", id);
        }
        Some(id)
    }

    // --- Counts ------------------------------------------------------------

    /// Links on the active chain.
    pub fn num_tasks(&self) -> usize {
        self.chain(self.active).count()
    }

    pub fn num_free(&self) -> usize {
        self.chain(self.free).count()
    }

    pub fn num_finished(&self) -> usize {
        self.chain(self.finished).count()
    }
}

/// A dynamic scheduler sized by `config::DEFAULT_LINK_POOL`.
pub type DefaultDynamicScheduler<'a, 't> = DynamicScheduler<'a, 't, DEFAULT_LINK_POOL>;

impl<const N: usize> Default for DynamicScheduler<'_, '_, N> {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Unit tests (host-only)
// ---------------------------------------------------------------------------
