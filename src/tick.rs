//! # Tick Counter
//!
//! The tick source's side of the contract: a fixed-width counter that the
//! timer interrupt advances and lets wrap, and that the dispatch loop reads.
//!
//! Readers get the value with a single atomic load, so a tick observed
//! while the ISR is mid-update is never torn. The ISR's increment is a
//! load and store inside a critical section rather than `fetch_add`, so the
//! same code also builds for ports without atomic read-modify-write
//! (thumbv6m, riscv32imc).

use core::sync::atomic::{AtomicU32, Ordering};

use crate::config::Tick;
use crate::sync;

pub struct TickCounter {
    ticks: AtomicU32,
}

impl TickCounter {
    pub const fn new(start: Tick) -> Self {
        Self {
            ticks: AtomicU32::new(start),
        }
    }

    /// Current tick (single atomic load).
    #[inline]
    pub fn now(&self) -> Tick {
        self.ticks.load(Ordering::Acquire)
    }

    /// Advance by one tick, wrapping. Returns the new value.
    #[inline]
    pub fn advance(&self) -> Tick {
        self.advance_by(1)
    }

    /// Advance by `delta` ticks, wrapping. Returns the new value.
    pub fn advance_by(&self, delta: Tick) -> Tick {
        sync::critical_section(|_| {
            let next = self.ticks.load(Ordering::Relaxed).wrapping_add(delta);
            self.ticks.store(next, Ordering::Release);
            next
        })
    }

    /// Overwrite the counter (e.g. to start near the wrap point in tests).
    pub fn set(&self, tick: Tick) {
        self.ticks.store(tick, Ordering::Release);
    }
}

impl Default for TickCounter {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance() {
        let ticks = TickCounter::new(41);
        assert_eq!(ticks.now(), 41);
        assert_eq!(ticks.advance(), 42);
        assert_eq!(ticks.advance_by(8), 50);
        assert_eq!(ticks.now(), 50);
    }

    #[test]
    fn test_wraps_silently() {
        let ticks = TickCounter::default();
        ticks.set(Tick::MAX - 1);
        assert_eq!(ticks.advance(), Tick::MAX);
        assert_eq!(ticks.advance(), 0);
        assert_eq!(ticks.advance_by(5), 5);
    }
}
