//! Port traits: the hexagonal boundary between controller logic and the
//! outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (GPIO inputs, IR transmitter, event sinks, time source)
//! implement these traits. The [`AppService`](super::service::AppService)
//! consumes them via generics, so the domain core never touches hardware
//! directly.

use crate::error::TransmitError;
use crate::ir::AcCommand;

// ───────────────────────────────────────────────────────────────
// Digital input port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Polled every tick for the motion sensor and both buttons.
///
/// No debouncing happens behind this port; `true` means "asserted" in the
/// line's configured polarity.
pub trait DigitalInputPort {
    fn read_digital(&mut self, pin: i32) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Transmit port (driven adapter: domain → IR emitter)
// ───────────────────────────────────────────────────────────────

/// Sends one command to the air conditioner.
///
/// Fire-and-forget: `Ok` means the frame left the emitter, not that the
/// unit received it. On `Err` the controller keeps its current state and
/// retries on the next poll.
pub trait TransmitPort {
    fn transmit(&mut self, command: &AcCommand) -> Result<(), TransmitError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port. Purely observational: nothing in the controller
/// depends on what the sink does with them.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Time port (driven adapter: platform timer → domain)
// ───────────────────────────────────────────────────────────────

/// Monotonic millisecond counter.
pub trait TimePort {
    fn uptime_ms(&self) -> u64;
}
