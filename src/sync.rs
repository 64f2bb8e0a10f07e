//! # Synchronization Primitives
//!
//! Interrupt-safe critical section abstraction. The only state shared
//! between the tick interrupt and the dispatch loop is the tick counter,
//! and its read-modify-write goes through here.
//!
//! On Cortex-M the implementation comes from `cortex-m`
//! (`critical-section-single-core`: interrupts disabled on entry, restored
//! on exit). Host tests use the `critical-section` std implementation.

/// Execute a closure within a critical section.
///
/// # Usage
/// ```ignore
/// sync::critical_section(|_cs| {
///     // Access shared state safely
/// });
/// ```
///
/// Keep critical sections short: they delay the tick interrupt.
#[inline]
pub fn critical_section<F, R>(f: F) -> R
where
    F: FnOnce(critical_section::CriticalSection<'_>) -> R,
{
    critical_section::with(f)
}
