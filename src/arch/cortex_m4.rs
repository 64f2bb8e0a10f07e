//! # Cortex-M4 Port Layer
//!
//! SysTick as the scheduler's tick source. There is no context switching:
//! the interrupt only advances the tick counter, and the main loop reads it
//! with a single atomic load.
//!
//! ## Interrupt Priority
//!
//! SysTick stays at its reset priority. The handler body is a handful of
//! instructions inside a critical section, so it never delays other ISRs
//! noticeably.

use cortex_m::peripheral::syst::SystClkSource;

use crate::config::{SYSTEM_CLOCK_HZ, TICK_HZ};

// ---------------------------------------------------------------------------
// SysTick configuration
// ---------------------------------------------------------------------------

/// Configure the SysTick timer for the scheduler tick.
///
/// Sets up SysTick to fire at `TICK_HZ` frequency using the processor
/// clock. Each tick triggers `SysTick` which calls `kernel::on_tick()`.
pub fn configure_systick(syst: &mut cortex_m::peripheral::SYST) {
    let reload = SYSTEM_CLOCK_HZ / TICK_HZ - 1;
    syst.set_reload(reload);
    syst.clear_current();
    syst.set_clock_source(SystClkSource::Core);
    syst.enable_counter();
    syst.enable_interrupt();
}

/// Sleep until the next interrupt. Intended for the housekeeping task.
#[inline]
pub fn wait_for_interrupt() {
    cortex_m::asm::wfi();
}

// ---------------------------------------------------------------------------
// SysTick handler
// ---------------------------------------------------------------------------

/// SysTick exception handler: the scheduler tick entry point.
///
/// Overrides the weak default provided by cortex-m-rt.
#[no_mangle]
pub extern "C" fn SysTick() {
    crate::kernel::on_tick();
}
