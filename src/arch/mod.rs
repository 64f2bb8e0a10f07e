//! # Architecture Abstraction Layer
//!
//! Hardware tick sources. Currently implements the Cortex-M4 SysTick port;
//! other targets drive `kernel::on_tick()` from their own timer.

pub mod cortex_m4;
