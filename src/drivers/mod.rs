//! Peripheral drivers: digital inputs, IR transmitter, task watchdog.

pub mod inputs;
pub mod ir_tx;
pub mod watchdog;
