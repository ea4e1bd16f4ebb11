//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing controller events to the ESP-IDF
//! logger (UART / USB-CDC in production). One tagged line per event.

use log::{error, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Snapshot(s) => {
                info!(
                    "CHECK | sOn={:.1}s sLM={:.1}s sLC={:.1}s | ACS={} TACS={} | TLC={:.1}s",
                    s.since_boot_secs,
                    s.since_motion_secs,
                    s.since_check_secs,
                    s.current.level(),
                    s.target.level(),
                    s.last_check_secs,
                );
            }
            AppEvent::TargetChanged { from, to, reason } => {
                info!("TARGET | {} -> {} ({:?})", from.name(), to.name(), reason);
            }
            AppEvent::CommandSent(cmd) => {
                info!("TX | {:?}", cmd);
            }
            AppEvent::StateChanged { from, to } => {
                info!("STATE | {} -> {}", from.name(), to.name());
            }
            AppEvent::WarmingUp { remaining_secs } => {
                info!("WARMUP | motion ignored for {:.1}s", remaining_secs);
            }
            AppEvent::ButtonPressed(button) => {
                info!("BUTTON | {:?} pressed", button);
            }
            AppEvent::ConfigurationError(e) => {
                error!("CONFIG | {}", e);
            }
            AppEvent::TransmitFailed { command, error } => {
                warn!("TX | {} failed: {}", command.label(), error);
            }
            AppEvent::Started(state) => {
                info!("START | initial_state={}", state.name());
            }
        }
    }
}
