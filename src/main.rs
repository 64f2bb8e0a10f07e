//! # coopsched Demo Firmware
//!
//! A small control loop on a Cortex-M4 driven by SysTick at 1 kHz:
//!
//! | Index | Task | Interval | Behavior |
//! |-------|------|----------|----------|
//! | 0 | `read_sensors` | 10 ticks | Samples inputs, reports a status |
//! | 1 | `update_control` | 20 ticks | Runs the control law |
//! | 2 | `send_telemetry` | 250 ticks | Emits a status frame |
//! | 3 | `housekeeping` | 0 | Sleeps until the next tick |
//!
//! Table order is priority: when sensors and control are due on the same
//! tick, sensors run first and control runs on the next pass.

#![no_std]
#![no_main]

use core::sync::atomic::{AtomicI32, AtomicU32, Ordering};

use cortex_m_rt::entry;
use panic_halt as _;

use coopsched::arch::cortex_m4;
use coopsched::{kernel, Status, StaticScheduler, Task};

static SAMPLES: AtomicU32 = AtomicU32::new(0);
static LAST_FAULT: AtomicI32 = AtomicI32::new(0);

// ---------------------------------------------------------------------------
// Task bodies
// ---------------------------------------------------------------------------

fn read_sensors() -> Status {
    let count = SAMPLES.load(Ordering::Relaxed).wrapping_add(1);
    SAMPLES.store(count, Ordering::Relaxed);
    0
}

fn update_control() -> Status {
    // Placeholder control law: flag a fault if no samples arrived.
    if SAMPLES.load(Ordering::Relaxed) == 0 {
        -1
    } else {
        0
    }
}

fn send_telemetry() -> Status {
    log::info!("demo: {} samples", SAMPLES.load(Ordering::Relaxed));
    0
}

fn housekeeping() -> Status {
    cortex_m4::wait_for_interrupt();
    0
}

fn record_fault(status: Status) {
    if status != 0 {
        LAST_FAULT.store(status, Ordering::Relaxed);
    }
}

// ---------------------------------------------------------------------------
// Main entry point
// ---------------------------------------------------------------------------

#[entry]
fn main() -> ! {
    let mut cp = cortex_m::Peripherals::take().unwrap();
    kernel::start(&mut cp.SYST);

    let now = kernel::now();
    let mut tasks = [
        Task::new(10, now, Some(&read_sensors), None),
        Task::new(20, now, Some(&update_control), Some(&record_fault)),
        Task::new(250, now, Some(&send_telemetry), None),
        Task::housekeeping(Some(&housekeeping)),
    ];

    let mut scheduler = StaticScheduler::new();
    scheduler.set_task_list(&mut tasks);
    kernel::run(&mut scheduler)
}
