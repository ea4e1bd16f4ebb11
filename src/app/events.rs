//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port. Adapters on the other side
//! decide what to do with them; in firmware they become serial log lines.

use crate::error::{ConfigError, TransmitError};
use crate::fsm::OperatingState;
use crate::ir::AcCommand;

/// Why the target level changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetReason {
    ButtonOn,
    ButtonOff,
    Motion,
    IdleTimeout,
}

/// One of the two manual override buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManualButton {
    On,
    Off,
}

/// Structured events emitted by the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The service has started (carries the assumed initial level).
    Started(OperatingState),

    /// Motion is being ignored until the sensor has warmed up. Buttons
    /// still apply. Emitted once, on the first tick inside the window.
    WarmingUp { remaining_secs: f64 },

    /// A manual button went from released to held. Not repeated while it
    /// stays held.
    ButtonPressed(ManualButton),

    /// The target level changed.
    TargetChanged {
        from: OperatingState,
        to: OperatingState,
        reason: TargetReason,
    },

    /// Once per poll cycle.
    Snapshot(StatusSnapshot),

    /// A command left the transmitter.
    CommandSent(AcCommand),

    /// The current level moved after a successful command.
    StateChanged {
        from: OperatingState,
        to: OperatingState,
    },

    /// A command could not be built from the configuration.
    ConfigurationError(ConfigError),

    /// The transmitter reported a failure; the step is retried next poll.
    TransmitFailed {
        command: AcCommand,
        error: TransmitError,
    },
}

/// Per-poll status line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusSnapshot {
    pub since_boot_secs: f64,
    pub since_motion_secs: f64,
    /// Measured before the check timestamp was restamped.
    pub since_check_secs: f64,
    pub current: OperatingState,
    pub target: OperatingState,
    /// The new check timestamp (seconds since boot).
    pub last_check_secs: f64,
}
