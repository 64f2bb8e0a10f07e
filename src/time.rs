//! # Wraparound Tick Arithmetic
//!
//! Readiness is computed from three unsigned values of the same width: the
//! current tick, the tick at which a period started, and the period length.
//!
//! ```text
//! elapsed   = tick - start          (modular at the counter width)
//! remaining = interval - elapsed    if interval > elapsed
//!           = 0                     otherwise
//! ```
//!
//! Because the tick and the start time wrap at the same modulus, `elapsed`
//! is exact across an overflow without any "did we wrap" branch. The result
//! is always in `[0, interval]`.
//!
//! The functions are generic over the counter width so the same contract
//! can be checked exhaustively on `u8` and used on `u32` in production.

use core::ops::Sub;

/// An unsigned, fixed-width, wrapping tick counter.
pub trait Counter: Copy + Ord + Sub<Output = Self> {
    /// The zero value of the counter.
    const ZERO: Self;

    /// `self - earlier` modulo the counter width.
    fn wrapping_elapsed(self, earlier: Self) -> Self;

    /// `self + delta` modulo the counter width.
    fn wrapping_advance(self, delta: Self) -> Self;
}

macro_rules! impl_counter {
    ($($ty:ty),*) => {
        $(
            impl Counter for $ty {
                const ZERO: Self = 0;

                #[inline]
                fn wrapping_elapsed(self, earlier: Self) -> Self {
                    self.wrapping_sub(earlier)
                }

                #[inline]
                fn wrapping_advance(self, delta: Self) -> Self {
                    self.wrapping_add(delta)
                }
            }
        )*
    };
}

impl_counter!(u8, u16, u32, u64, usize);

/// Ticks left until a period of `interval` that began at `start` is over.
///
/// Never exceeds `interval` and never wraps below zero.
#[inline]
pub fn ticks_remaining<C: Counter>(tick: C, start: C, interval: C) -> C {
    let elapsed = tick.wrapping_elapsed(start);
    if interval > elapsed {
        interval - elapsed
    } else {
        C::ZERO
    }
}

/// True once at least `interval` ticks have elapsed since `start`.
#[inline]
pub fn is_elapsed<C: Counter>(tick: C, start: C, interval: C) -> bool {
    ticks_remaining(tick, start, interval) == C::ZERO
}

/// The tick at which a period of `interval` starting at `start` ends.
#[inline]
pub fn due_at<C: Counter>(start: C, interval: C) -> C {
    start.wrapping_advance(interval)
}
