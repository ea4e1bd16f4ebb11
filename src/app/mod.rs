//! Application core: pure controller logic, zero I/O.
//!
//! Target derivation, the poll cadence and convergence live here. All
//! interaction with hardware happens through **port traits** defined in
//! [`ports`], keeping this layer fully testable without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
