//! # Kernel
//!
//! Glue between the tick source and a scheduler: the global tick counter,
//! the tick interrupt entry point, and the cooperative dispatch loop.
//!
//! ## Startup Sequence
//!
//! ```text
//! reset_handler (cortex-m-rt)
//!   └─► main()
//!         ├─► kernel::start()           ← Configure SysTick (ARM only)
//!         ├─► set_task_list(&mut table) ← Install the static table
//!         └─► kernel::run()             ← Dispatch forever (no return)
//!
//! SysTick ──► kernel::on_tick() ──► TICKS.advance()
//! ```

use crate::config::Tick;
use crate::scheduler::StaticScheduler;
use crate::tick::TickCounter;

// ---------------------------------------------------------------------------
// Global tick counter
// ---------------------------------------------------------------------------

/// System tick counter, advanced by the tick interrupt.
pub static TICKS: TickCounter = TickCounter::new(0);

/// Current system tick.
#[inline]
pub fn now() -> Tick {
    TICKS.now()
}

/// Tick interrupt body. Called from `SysTick` on Cortex-M, or from a
/// polling loop on targets without a timer interrupt.
#[inline]
pub fn on_tick() {
    TICKS.advance();
}

// ---------------------------------------------------------------------------
// Kernel API
// ---------------------------------------------------------------------------

/// Configure the SysTick timer so `on_tick()` fires at `TICK_HZ`.
#[cfg(all(target_arch = "arm", target_os = "none"))]
pub fn start(syst: &mut cortex_m::peripheral::SYST) {
    crate::arch::cortex_m4::configure_systick(syst);
    log::info!("kernel: tick source started at {} Hz", crate::config::TICK_HZ);
}

/// Dispatch one task per loop iteration, forever.
///
/// The housekeeping task runs whenever nothing else is due, so it is the
/// place to sleep (e.g. `wfi`) until the next tick.
pub fn run(scheduler: &mut StaticScheduler<'_, '_>) -> ! {
    loop {
        scheduler.run_next_task(now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_on_tick_advances_global_counter() {
        let before = now();
        on_tick();
        on_tick();
        assert_eq!(now(), before.wrapping_add(2));
    }
}
