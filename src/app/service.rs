//! Application service: the hexagonal core.
//!
//! [`AppService`] owns the device clock, the current and target levels and
//! the transition table. It exposes a hardware-agnostic API; all I/O flows
//! through port traits injected at call sites, making the whole controller
//! testable with mock adapters.
//!
//! ```text
//!  DigitalInputPort ──▶ ┌─────────────────────────────┐ ──▶ EventSink
//!                       │         AppService          │
//!      TransmitPort ◀── │ target · cadence · converge │
//!                       └─────────────────────────────┘
//! ```

use log::{error, info, warn};

use crate::clock::{secs_to_ms, DeviceClock};
use crate::config::SystemConfig;
use crate::error::ConfigError;
use crate::fsm::context::ControlContext;
use crate::fsm::{OperatingState, TransitionTable};
use crate::ir::AcCommand;

use super::events::{AppEvent, ManualButton, StatusSnapshot, TargetReason};
use super::ports::{DigitalInputPort, EventSink, TransmitPort};

// ───────────────────────────────────────────────────────────────
// Tick results and counters
// ───────────────────────────────────────────────────────────────

/// What a single [`AppService::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Inside the warmup window; motion ignored.
    WarmingUp,
    /// The on-button short-circuited the tick.
    ManualOn,
    /// The off-button short-circuited the tick.
    ManualOff,
    /// Inputs processed, poll not yet due.
    Waiting,
    /// A poll ran. `command` is what was transmitted, if anything.
    Polled { command: Option<AcCommand> },
}

/// Running totals since the service was constructed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControllerStats {
    pub ticks: u64,
    pub polls: u64,
    /// Successful transmits, refreshes included.
    pub commands_sent: u64,
    pub refreshes: u64,
    pub config_errors: u64,
    pub transmit_failures: u64,
}

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The controller. One instance, built once at startup and ticked from the
/// main loop.
pub struct AppService {
    ctx: ControlContext,
    table: TransitionTable,
    stats: ControllerStats,
    warmup_reported: bool,
    held_button: Option<ManualButton>,
}

impl AppService {
    /// Construct the service. Takes the already-booted clock, so every
    /// elapsed-time query has a valid reference.
    pub fn new(config: SystemConfig, clock: DeviceClock) -> Self {
        Self {
            ctx: ControlContext::new(config, clock),
            table: TransitionTable::standard(),
            stats: ControllerStats::default(),
            warmup_reported: false,
            held_button: None,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    pub fn start(&mut self, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::Started(self.ctx.current));
        info!(
            "AppService started: current={} target={}",
            self.ctx.current.name(),
            self.ctx.target.name()
        );
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one control cycle: buttons → warmup gate → motion → idle
    /// shutoff → (on poll cadence) convergence.
    ///
    /// The `hw` parameter satisfies **both** [`DigitalInputPort`] and
    /// [`TransmitPort`], which avoids a double mutable borrow while keeping
    /// the port boundary explicit.
    pub fn tick(
        &mut self,
        now_ms: u64,
        hw: &mut (impl DigitalInputPort + TransmitPort),
        sink: &mut impl EventSink,
    ) -> TickOutcome {
        self.stats.ticks += 1;
        let pins = self.ctx.config.pins;

        // 1. Manual override short-circuits the rest of the tick, warmup
        //    included.
        let pressed = if hw.read_digital(pins.button_on) {
            Some(ManualButton::On)
        } else if hw.read_digital(pins.button_off) {
            Some(ManualButton::Off)
        } else {
            None
        };
        if pressed != self.held_button {
            self.held_button = pressed;
            if let Some(button) = pressed {
                info!("Button {:?} pressed", button);
                sink.emit(&AppEvent::ButtonPressed(button));
            }
        }
        match pressed {
            Some(ManualButton::On) => {
                self.ctx.clock.mark_motion(now_ms);
                self.set_target(OperatingState::Requested, TargetReason::ButtonOn, sink);
                return TickOutcome::ManualOn;
            }
            Some(ManualButton::Off) => {
                self.set_target(OperatingState::Off, TargetReason::ButtonOff, sink);
                return TickOutcome::ManualOff;
            }
            None => {}
        }

        // 2. Warmup gate: motion is not read until the sensor has settled.
        let since_boot_ms = self.ctx.clock.ms_since_boot(now_ms);
        let warmup_ms = secs_to_ms(self.ctx.config.warmup_secs);
        if since_boot_ms < warmup_ms {
            if !self.warmup_reported {
                self.warmup_reported = true;
                sink.emit(&AppEvent::WarmingUp {
                    remaining_secs: (warmup_ms - since_boot_ms) as f64 / 1000.0,
                });
            }
            return TickOutcome::WarmingUp;
        }

        // 3. Motion overwrites any target, Requested included.
        if hw.read_digital(pins.motion_sensor) {
            self.ctx.clock.mark_motion(now_ms);
            self.set_target(OperatingState::HighPower, TargetReason::Motion, sink);
        }

        // 4. Sustained absence of motion.
        if self.ctx.current > OperatingState::Off
            && self.ctx.clock.ms_since_motion(now_ms)
                >= secs_to_ms(self.ctx.config.shutoff_timeout_secs)
        {
            self.set_target(OperatingState::Off, TargetReason::IdleTimeout, sink);
        }

        // 5. Poll cadence. Restamp before transmitting so a slow or failed
        //    send cannot pull the next poll forward.
        let check_ms = secs_to_ms(self.ctx.config.check_interval_secs);
        if self.ctx.clock.ms_since_check(now_ms) < check_ms {
            return TickOutcome::Waiting;
        }
        let since_check_secs = self.ctx.clock.secs_since_check(now_ms);
        self.ctx.clock.mark_check(now_ms);
        self.stats.polls += 1;

        sink.emit(&AppEvent::Snapshot(StatusSnapshot {
            since_boot_secs: self.ctx.clock.seconds_since_boot(now_ms),
            since_motion_secs: self.ctx.clock.secs_since_motion(now_ms),
            since_check_secs,
            current: self.ctx.current,
            target: self.ctx.target,
            last_check_secs: self.ctx.clock.last_check_secs(),
        }));

        let command = self.converge(now_ms, hw, sink);
        TickOutcome::Polled { command }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Level the unit was last successfully commanded to.
    pub fn current_state(&self) -> OperatingState {
        self.ctx.current
    }

    pub fn target_state(&self) -> OperatingState {
        self.ctx.target
    }

    pub fn is_converged(&self) -> bool {
        self.ctx.is_converged()
    }

    pub fn clock(&self) -> &DeviceClock {
        &self.ctx.clock
    }

    pub fn config(&self) -> &SystemConfig {
        &self.ctx.config
    }

    pub fn stats(&self) -> ControllerStats {
        self.stats
    }

    // ── Internal ──────────────────────────────────────────────

    fn set_target(&mut self, to: OperatingState, reason: TargetReason, sink: &mut impl EventSink) {
        let from = self.ctx.target;
        if from == to {
            return;
        }
        self.ctx.target = to;
        info!("Target {} -> {} ({:?})", from.name(), to.name(), reason);
        sink.emit(&AppEvent::TargetChanged { from, to, reason });
    }

    /// Apply at most one transition rule. Returns the transmitted command.
    fn converge(
        &mut self,
        now_ms: u64,
        hw: &mut impl TransmitPort,
        sink: &mut impl EventSink,
    ) -> Option<AcCommand> {
        let Some(rule) = self.table.select(&self.ctx) else {
            return self.refresh_if_due(now_ms, hw, sink);
        };
        let (name, next, build) = (rule.name, rule.next, rule.command);

        let command = match build(&self.ctx.config) {
            Ok(command) => command,
            Err(e) => {
                self.report_config_error(name, e, sink);
                return None;
            }
        };

        if command == AcCommand::HighPower && !self.ctx.config.send_high_power {
            info!("{}: high-power transmit disabled, recording step only", name);
            self.commit(next, sink);
            return None;
        }

        if self.send(command, now_ms, hw, sink) {
            self.commit(next, sink);
            Some(command)
        } else {
            None
        }
    }

    /// Re-send the current level's command when converged and the refresh
    /// interval has elapsed.
    fn refresh_if_due(
        &mut self,
        now_ms: u64,
        hw: &mut impl TransmitPort,
        sink: &mut impl EventSink,
    ) -> Option<AcCommand> {
        if !self.ctx.refresh_due(now_ms) {
            return None;
        }
        // With the high-power frame disabled the last real frame was TurnOn.
        let state = match self.ctx.current {
            OperatingState::HighPower if !self.ctx.config.send_high_power => OperatingState::On,
            other => other,
        };
        let command = match AcCommand::for_state(state, &self.ctx.config) {
            Ok(command) => command,
            Err(e) => {
                self.report_config_error("refresh", e, sink);
                return None;
            }
        };

        info!("Refreshing {} ({})", state.name(), command.label());
        if self.send(command, now_ms, hw, sink) {
            self.stats.refreshes += 1;
            Some(command)
        } else {
            None
        }
    }

    fn send(
        &mut self,
        command: AcCommand,
        now_ms: u64,
        hw: &mut impl TransmitPort,
        sink: &mut impl EventSink,
    ) -> bool {
        match hw.transmit(&command) {
            Ok(()) => {
                self.stats.commands_sent += 1;
                self.ctx.last_emit_ms = Some(self.ctx.clock.ms_since_boot(now_ms));
                sink.emit(&AppEvent::CommandSent(command));
                true
            }
            Err(error) => {
                self.stats.transmit_failures += 1;
                warn!("{} transmit failed: {}", command.label(), error);
                sink.emit(&AppEvent::TransmitFailed { command, error });
                false
            }
        }
    }

    fn commit(&mut self, next: OperatingState, sink: &mut impl EventSink) {
        let from = self.ctx.current;
        self.ctx.current = next;
        info!("AC {} -> {}", from.name(), next.name());
        sink.emit(&AppEvent::StateChanged { from, to: next });
    }

    fn report_config_error(&mut self, step: &str, e: ConfigError, sink: &mut impl EventSink) {
        self.stats.config_errors += 1;
        error!("{} aborted: {}", step, e);
        sink.emit(&AppEvent::ConfigurationError(e));
    }
}
