//! # coopsched: Cooperative Tick Scheduler
//!
//! A non-preemptive task dispatcher for resource-constrained control loops
//! driven by a periodic tick counter (e.g. SysTick).
//!
//! ## Overview
//!
//! On every dispatch opportunity the scheduler decides which periodic task
//! is due and runs exactly one of them to completion. Tasks never yield,
//! block or get preempted; the scheduler never reads a clock and only sees
//! the tick value handed to it.
//!
//! Two schedulers share the same task model and readiness arithmetic:
//!
//! - **`StaticScheduler`**: borrows a fixed table; the first due task in
//!   table order runs, and a mandatory last-entry housekeeping task
//!   (interval `0`) runs when nothing else is due.
//! - **`DynamicScheduler`**: an inline arena of task links kept in due
//!   order, with priority as tie-break and free/finished pools so tasks can
//!   be retired and re-submitted without allocation.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                    Application Tasks                      │
//! ├──────────────────────────────────────────────────────────┤
//! │                 Kernel (kernel.rs)                        │
//! │        TICKS · now() · on_tick() · run()                  │
//! ├───────────────────────────┬──────────────────────────────┤
//! │  StaticScheduler          │  DynamicScheduler            │
//! │  scheduler.rs             │  dynamic.rs                  │
//! │  ─ set_task_list()        │  ─ add_task() / run          │
//! │  ─ run_next_task()        │  ─ free / finished pools     │
//! ├───────────────────────────┴──────────────────────────────┤
//! │   Task Model (task.rs) · Wraparound Arithmetic (time.rs)  │
//! ├──────────────────────────────────────────────────────────┤
//! │   Tick Counter (tick.rs) · Critical Sections (sync.rs)    │
//! ├──────────────────────────────────────────────────────────┤
//! │            Arch Port (arch/cortex_m4.rs): SysTick         │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Tick Arithmetic
//!
//! `remaining = interval - (tick - start)` with modular subtraction at the
//! counter width, clamped at `0`. Correct across counter overflow without
//! an explicit wrap check, and always in `[0, interval]`.
//!
//! ## Memory Model
//!
//! - **No heap**: no `alloc`, pure `core`
//! - **Borrowed tasks**: schedulers hold `&mut` borrows, never copies
//! - **Fixed arena**: the dynamic scheduler's links are `[TaskLink; N]`
//! - **Critical sections**: only for the tick counter's increment

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod dynamic;
pub mod error;
pub mod kernel;
pub mod scheduler;
pub mod sync;
pub mod task;
pub mod tick;
pub mod time;

#[cfg(all(target_arch = "arm", target_os = "none"))]
pub mod arch;

pub use config::{Status, Tick, NEUTRAL_STATUS};
pub use dynamic::{DefaultDynamicScheduler, DynamicScheduler, LinkId, Membership};
pub use error::SchedError;
pub use scheduler::StaticScheduler;
pub use task::{PriorityTask, Task};
pub use tick::TickCounter;
