//! Controller blackboard.
//!
//! `ControlContext` holds everything the transition rules look at and the
//! service mutates: the device clock, current and target levels, the
//! configuration, and when a command was last sent. It has exactly one
//! owner, the [`AppService`](crate::app::service::AppService).

use super::OperatingState;
use crate::clock::{secs_to_ms, DeviceClock};
use crate::config::SystemConfig;

pub struct ControlContext {
    // -- Timing --
    pub clock: DeviceClock,
    /// Milliseconds since boot of the last successful transmit.
    pub last_emit_ms: Option<u64>,

    // -- Levels --
    /// What the unit was last successfully commanded to.
    pub current: OperatingState,
    /// What the unit should become.
    pub target: OperatingState,

    // -- Configuration --
    pub config: SystemConfig,
}

impl ControlContext {
    /// Fresh context: unit assumed off, nothing requested.
    pub fn new(config: SystemConfig, clock: DeviceClock) -> Self {
        Self {
            clock,
            last_emit_ms: None,
            current: OperatingState::Off,
            target: OperatingState::Off,
            config,
        }
    }

    /// `true` when no rule needs to run.
    pub fn is_converged(&self) -> bool {
        self.current == self.target.resting()
    }

    /// Whether the configured refresh interval has elapsed since the last
    /// emission. Always `false` when refreshing is disabled.
    pub fn refresh_due(&self, now_ms: u64) -> bool {
        let Some(interval) = self.config.refresh_interval_secs else {
            return false;
        };
        let reference = self.last_emit_ms.unwrap_or(0);
        self.clock.ms_since(reference, now_ms) >= secs_to_ms(interval)
    }
}
