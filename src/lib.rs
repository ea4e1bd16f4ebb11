//! MotionAC firmware library.
//!
//! Motion-activated air-conditioner controller. Exposes the pure-logic
//! modules for integration testing; all ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod clock;
pub mod config;
pub mod error;
pub mod fsm;
pub mod ir;
pub mod scheduler;

pub mod pins;

// Hardware-facing modules; simulation stubs on host targets.
pub mod adapters;
pub mod drivers;
