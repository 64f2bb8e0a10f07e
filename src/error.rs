//! # Scheduler Errors
//!
//! Structural errors only. A task that "fails" reports it through its own
//! status code; the schedulers never see that as an error.

use core::fmt;

use crate::config::Tick;
use crate::dynamic::{LinkId, Membership};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedError {
    /// A static table needs at least the housekeeping entry.
    EmptyTable,
    /// The last table entry must have interval `0`.
    MissingHousekeeping { interval: Tick },
    /// Only the last table entry may have interval `0`.
    MisplacedHousekeeping { index: usize },
    /// The handle does not belong to this link arena.
    UnknownLink(LinkId),
    /// The link is on a chain and must be popped or removed first.
    LinkBusy { id: LinkId, membership: Membership },
    /// The link has no task to schedule.
    UnboundLink(LinkId),
    /// The link already carries a task.
    AlreadyBound(LinkId),
}

impl fmt::Display for SchedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchedError::EmptyTable => write!(f, "task table is empty"),
            SchedError::MissingHousekeeping { interval } => write!(
                f,
                "last task must be housekeeping (interval 0), found interval {}",
                interval
            ),
            SchedError::MisplacedHousekeeping { index } => {
                write!(f, "task {} has interval 0 but is not last", index)
            }
            SchedError::UnknownLink(id) => write!(f, "unknown link {}", id),
            SchedError::LinkBusy { id, membership } => {
                write!(f, "link {} is still on the {} list", id, membership)
            }
            SchedError::UnboundLink(id) => write!(f, "link {} has no task", id),
            SchedError::AlreadyBound(id) => write!(f, "link {} already has a task", id),
        }
    }
}
