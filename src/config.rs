//! # coopsched Configuration
//!
//! Compile-time types and constants shared by both schedulers and the
//! tick source. All limits are fixed at compile time.

/// Tick counter value. The tick source increments it and lets it wrap
/// silently; every readiness computation is modular at this width.
pub type Tick = u32;

/// Status code returned by a task's job and forwarded to its callback.
/// The scheduler never interprets it.
pub type Status = i32;

/// Status reported by `Task::call()` when no job is installed.
pub const NEUTRAL_STATUS: Status = 0;

/// SysTick frequency in Hz. One tick per millisecond keeps task intervals
/// readable as milliseconds.
pub const TICK_HZ: u32 = 1000;

/// System clock frequency in Hz (default for STM32F4 at 16 MHz HSI).
pub const SYSTEM_CLOCK_HZ: u32 = 16_000_000;

/// Suggested link arena size for a `DynamicScheduler`. Every link lives
/// inline in the scheduler, so this bounds its memory footprint.
pub const DEFAULT_LINK_POOL: usize = 8;
