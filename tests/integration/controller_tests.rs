//! Integration tests for the inputs → AppService → transmit pipeline.
//!
//! Every test drives the controller with explicit millisecond timestamps
//! against [`MockHardware`], so timing edges are exact.

use crate::mock_hw::{LogSink, MockHardware};

use motionac::app::events::{AppEvent, StatusSnapshot, TargetReason};
use motionac::app::service::{AppService, TickOutcome};
use motionac::clock::DeviceClock;
use motionac::config::SystemConfig;
use motionac::error::{ConfigError, TransmitError};
use motionac::fsm::OperatingState;
use motionac::ir::AcCommand;

const TURN_ON: AcCommand = AcCommand::TurnOn {
    temperature_code: 0,
    fan_code: 6,
};

struct Rig {
    app: AppService,
    hw: MockHardware,
    sink: LogSink,
}

impl Rig {
    fn new(config: SystemConfig) -> Self {
        let hw = MockHardware::new(config.pins);
        let mut app = AppService::new(config, DeviceClock::boot(0));
        let mut sink = LogSink::new();
        app.start(&mut sink);
        Self { app, hw, sink }
    }

    fn tick(&mut self, now_ms: u64) -> TickOutcome {
        self.app.tick(now_ms, &mut self.hw, &mut self.sink)
    }

    /// Tick every `step_ms` from `from_ms` to `to_ms` inclusive.
    fn run(&mut self, from_ms: u64, to_ms: u64, step_ms: u64) {
        let mut t = from_ms;
        while t <= to_ms {
            self.tick(t);
            t += step_ms;
        }
    }

    /// Motion at 5 s and 10 s: ends at HighPower with last motion and last
    /// check both at 10 s.
    fn drive_to_high_power(&mut self) {
        self.hw.set_motion(true);
        assert_eq!(self.tick(5_000), TickOutcome::Polled { command: Some(TURN_ON) });
        assert_eq!(
            self.tick(10_000),
            TickOutcome::Polled {
                command: Some(AcCommand::HighPower)
            }
        );
        assert_eq!(self.app.current_state(), OperatingState::HighPower);
    }

    fn state(&self) -> (OperatingState, OperatingState) {
        (self.app.current_state(), self.app.target_state())
    }
}

fn short_shutoff() -> SystemConfig {
    SystemConfig {
        shutoff_timeout_secs: 60,
        ..SystemConfig::default()
    }
}

// ── Scenario 1: motion after warmup → TurnOn ──────────────────

#[test]
fn motion_after_warmup_turns_ac_on() {
    let mut rig = Rig::new(SystemConfig::default());
    rig.hw.set_motion(true);

    assert_eq!(rig.tick(2_000), TickOutcome::Waiting);
    assert_eq!(rig.state(), (OperatingState::Off, OperatingState::HighPower));

    assert_eq!(rig.tick(5_000), TickOutcome::Polled { command: Some(TURN_ON) });
    assert_eq!(rig.hw.transmits, vec![TURN_ON]);
    assert_eq!(rig.app.current_state(), OperatingState::On);
}

// ── Scenario 2: continuous motion → HighPower next poll ───────

#[test]
fn continuous_motion_steps_up_to_high_power() {
    let mut rig = Rig::new(SystemConfig::default());
    rig.hw.set_motion(true);

    rig.run(1_000, 5_000, 100);
    assert_eq!(rig.app.current_state(), OperatingState::On);

    rig.run(5_100, 9_900, 100);
    assert_eq!(rig.hw.transmit_count(), 1, "no second command before the next poll");

    assert_eq!(
        rig.tick(10_000),
        TickOutcome::Polled {
            command: Some(AcCommand::HighPower)
        }
    );
    assert_eq!(rig.hw.transmits, vec![TURN_ON, AcCommand::HighPower]);
    assert_eq!(rig.app.current_state(), OperatingState::HighPower);
}

// ── Scenario 3: sustained absence → TurnOff ───────────────────

#[test]
fn idle_past_timeout_turns_ac_off() {
    let mut rig = Rig::new(short_shutoff());
    rig.drive_to_high_power();
    rig.hw.set_motion(false);

    // Last motion at 10 s, shutoff 60 s: 61 s idle.
    assert_eq!(
        rig.tick(71_000),
        TickOutcome::Polled {
            command: Some(AcCommand::TurnOff)
        }
    );
    assert_eq!(rig.state(), (OperatingState::Off, OperatingState::Off));
    assert_eq!(
        rig.sink.count(|e| matches!(
            e,
            AppEvent::TargetChanged {
                reason: TargetReason::IdleTimeout,
                ..
            }
        )),
        1
    );
}

#[test]
fn shutoff_threshold_is_exact() {
    let mut rig = Rig::new(short_shutoff());
    rig.drive_to_high_power();
    rig.hw.set_motion(false);

    // One millisecond short of the timeout: polls, but stays up.
    assert_eq!(rig.tick(69_999), TickOutcome::Polled { command: None });
    assert_eq!(rig.app.target_state(), OperatingState::HighPower);

    // Exactly at the timeout the target drops; the poll comes later.
    assert_eq!(rig.tick(70_000), TickOutcome::Waiting);
    assert_eq!(rig.app.target_state(), OperatingState::Off);

    assert_eq!(
        rig.tick(75_000),
        TickOutcome::Polled {
            command: Some(AcCommand::TurnOff)
        }
    );
}

#[test]
fn shutoff_exact_at_fractional_stamps() {
    let mut rig = Rig::new(short_shutoff());
    rig.hw.set_motion(true);
    assert_eq!(rig.tick(4_100), TickOutcome::Waiting);
    rig.hw.set_motion(false);
    assert_eq!(rig.tick(5_000), TickOutcome::Polled { command: Some(TURN_ON) });
    rig.run(10_000, 60_000, 5_000);
    assert_eq!(rig.state(), (OperatingState::HighPower, OperatingState::HighPower));

    // Last motion at 4.1 s: 64.1 - 4.1 must read as a full 60 s.
    assert_eq!(rig.tick(64_099), TickOutcome::Waiting);
    assert_eq!(rig.app.target_state(), OperatingState::HighPower);
    assert_eq!(rig.tick(64_100), TickOutcome::Waiting);
    assert_eq!(rig.app.target_state(), OperatingState::Off);
    assert_eq!(
        rig.tick(65_000),
        TickOutcome::Polled {
            command: Some(AcCommand::TurnOff)
        }
    );
    assert_eq!(rig.hw.last_transmit(), Some(&AcCommand::TurnOff));
}

#[test]
fn idle_timeout_ignored_while_off() {
    let mut rig = Rig::new(short_shutoff());
    rig.run(0, 600_000, 5_000);
    assert_eq!(rig.state(), (OperatingState::Off, OperatingState::Off));
    assert_eq!(
        rig.sink.count(|e| matches!(e, AppEvent::TargetChanged { .. })),
        0
    );
    assert!(rig.hw.transmits.is_empty());
}

// ── Scenario 4: off-button overrides motion ───────────────────

#[test]
fn button_off_overrides_motion() {
    let mut rig = Rig::new(SystemConfig::default());
    rig.drive_to_high_power();

    rig.hw.set_button_off(true);
    assert_eq!(rig.tick(12_000), TickOutcome::ManualOff);
    assert_eq!(rig.app.target_state(), OperatingState::Off);

    // Held button short-circuits every tick, including the poll.
    assert_eq!(rig.tick(15_000), TickOutcome::ManualOff);
    assert_eq!(rig.hw.transmit_count(), 2);

    rig.hw.set_button_off(false);
    rig.hw.set_motion(false);
    assert_eq!(
        rig.tick(15_100),
        TickOutcome::Polled {
            command: Some(AcCommand::TurnOff)
        }
    );
    assert_eq!(rig.state(), (OperatingState::Off, OperatingState::Off));
}

#[test]
fn motion_after_button_off_retargets() {
    let mut rig = Rig::new(SystemConfig::default());
    rig.drive_to_high_power();

    rig.hw.set_button_off(true);
    rig.tick(11_000);
    rig.hw.set_button_off(false);

    // Motion is still asserted once the button is released.
    rig.tick(11_100);
    assert_eq!(rig.app.target_state(), OperatingState::HighPower);
}

// ── Scenario 5: out-of-range temperature ──────────────────────

#[test]
fn out_of_range_temperature_never_transmits() {
    let mut rig = Rig::new(SystemConfig {
        ac_temperature_c: 37,
        ..SystemConfig::default()
    });
    rig.hw.set_motion(true);

    assert_eq!(rig.tick(5_000), TickOutcome::Polled { command: None });
    assert!(rig.hw.transmits.is_empty());
    assert_eq!(rig.app.current_state(), OperatingState::Off);
    assert!(rig.sink.events.contains(&AppEvent::ConfigurationError(
        ConfigError::TemperatureOutOfRange {
            requested_c: 37,
            code: 20
        }
    )));

    // Retried, and refused, on every poll.
    rig.tick(10_000);
    assert!(rig.hw.transmits.is_empty());
    assert_eq!(rig.app.stats().config_errors, 2);
}

#[test]
fn below_range_temperature_is_refused() {
    let mut rig = Rig::new(SystemConfig {
        ac_temperature_c: 16,
        ..SystemConfig::default()
    });
    rig.hw.set_motion(true);
    rig.tick(5_000);
    assert!(rig.hw.transmits.is_empty());
    assert_eq!(rig.app.current_state(), OperatingState::Off);
}

// ── Cadence and idempotence ───────────────────────────────────

#[test]
fn converged_controller_stays_silent() {
    let mut rig = Rig::new(SystemConfig::default());
    rig.hw.set_motion(true);
    rig.run(0, 60_000, 100);

    assert_eq!(rig.hw.transmits, vec![TURN_ON, AcCommand::HighPower]);
    let stats = rig.app.stats();
    assert_eq!(stats.polls, 12);
    assert_eq!(stats.commands_sent, 2);
    assert_eq!(stats.refreshes, 0);
    assert_eq!(rig.sink.snapshots(), 12);
}

#[test]
fn snapshot_reports_all_timers() {
    let mut rig = Rig::new(SystemConfig::default());
    rig.hw.set_motion(true);
    rig.tick(2_000);
    rig.hw.set_motion(false);
    rig.tick(5_000);

    let snapshot = rig.sink.events.iter().find_map(|e| match e {
        AppEvent::Snapshot(s) => Some(*s),
        _ => None,
    });
    assert_eq!(
        snapshot,
        Some(StatusSnapshot {
            since_boot_secs: 5.0,
            since_motion_secs: 3.0,
            since_check_secs: 5.0,
            current: OperatingState::Off,
            target: OperatingState::HighPower,
            last_check_secs: 5.0,
        })
    );
}

// ── Warmup gate ───────────────────────────────────────────────

#[test]
fn warmup_ignores_motion_but_not_buttons() {
    let mut rig = Rig::new(SystemConfig {
        warmup_secs: 10,
        ..SystemConfig::default()
    });
    rig.hw.set_motion(true);

    for t in (0..5_000).step_by(100) {
        assert_eq!(rig.tick(t), TickOutcome::WarmingUp);
    }
    assert_eq!(rig.state(), (OperatingState::Off, OperatingState::Off));
    assert_eq!(rig.sink.snapshots(), 0);
    rig.sink.clear();

    rig.hw.set_button_on(true);
    assert_eq!(rig.tick(5_000), TickOutcome::ManualOn);
    assert_eq!(rig.app.target_state(), OperatingState::Requested);
    assert_eq!(rig.app.clock().last_motion_secs(), 5.0);
    rig.hw.set_button_on(false);
    assert_eq!(rig.tick(5_100), TickOutcome::WarmingUp);
    assert_eq!(rig.app.target_state(), OperatingState::Requested);

    rig.hw.set_button_off(true);
    assert_eq!(rig.tick(6_000), TickOutcome::ManualOff);
    rig.hw.set_button_off(false);
    assert_eq!(rig.state(), (OperatingState::Off, OperatingState::Off));
    assert_eq!(
        rig.sink.count(|e| matches!(e, AppEvent::ButtonPressed(_))),
        2
    );
    assert!(rig.hw.transmits.is_empty());

    // Warmup over: the still-asserted motion line is read.
    assert_eq!(rig.tick(10_000), TickOutcome::Polled { command: Some(TURN_ON) });
    assert_eq!(rig.hw.last_transmit(), Some(&TURN_ON));
}

// ── Manual on / Requested ─────────────────────────────────────

#[test]
fn button_on_requests_full_power_and_rests_there() {
    let mut rig = Rig::new(SystemConfig::default());

    rig.hw.set_button_on(true);
    assert_eq!(rig.tick(2_000), TickOutcome::ManualOn);
    assert_eq!(rig.app.target_state(), OperatingState::Requested);
    rig.hw.set_button_on(false);

    assert_eq!(rig.tick(5_000), TickOutcome::Polled { command: Some(TURN_ON) });
    assert_eq!(
        rig.tick(10_000),
        TickOutcome::Polled {
            command: Some(AcCommand::HighPower)
        }
    );
    assert_eq!(rig.tick(15_000), TickOutcome::Polled { command: None });
    assert_eq!(rig.state(), (OperatingState::HighPower, OperatingState::Requested));
    assert!(rig.app.is_converged());
}

#[test]
fn motion_overwrites_requested_target() {
    let mut rig = Rig::new(SystemConfig::default());
    rig.hw.set_button_on(true);
    rig.tick(2_000);
    rig.hw.set_button_on(false);

    rig.hw.set_motion(true);
    rig.tick(2_100);
    assert_eq!(rig.app.target_state(), OperatingState::HighPower);
    assert!(rig.sink.events.contains(&AppEvent::TargetChanged {
        from: OperatingState::Requested,
        to: OperatingState::HighPower,
        reason: TargetReason::Motion,
    }));
}

#[test]
fn button_on_restarts_idle_timer() {
    let mut rig = Rig::new(short_shutoff());
    rig.drive_to_high_power();
    rig.hw.set_motion(false);

    rig.hw.set_button_on(true);
    rig.tick(50_000);
    rig.hw.set_button_on(false);

    // 50 s since the button, not 90 s since the last motion.
    assert_eq!(rig.tick(100_000), TickOutcome::Polled { command: None });
    assert_eq!(rig.app.current_state(), OperatingState::HighPower);

    assert_eq!(
        rig.tick(110_000),
        TickOutcome::Polled {
            command: Some(AcCommand::TurnOff)
        }
    );
}

// ── Supplemented behaviour ────────────────────────────────────

#[test]
fn refresh_resends_current_command() {
    let mut rig = Rig::new(SystemConfig {
        refresh_interval_secs: Some(30),
        ..SystemConfig::default()
    });
    rig.drive_to_high_power();

    rig.run(15_000, 35_000, 5_000);
    assert_eq!(rig.hw.transmit_count(), 2);

    assert_eq!(
        rig.tick(40_000),
        TickOutcome::Polled {
            command: Some(AcCommand::HighPower)
        }
    );
    assert_eq!(rig.app.stats().refreshes, 1);
    assert_eq!(rig.tick(45_000), TickOutcome::Polled { command: None });
}

#[test]
fn high_power_step_without_transmit() {
    let mut rig = Rig::new(SystemConfig {
        send_high_power: false,
        ..SystemConfig::default()
    });
    rig.hw.set_motion(true);

    rig.tick(5_000);
    assert_eq!(rig.tick(10_000), TickOutcome::Polled { command: None });
    assert_eq!(rig.app.current_state(), OperatingState::HighPower);
    assert_eq!(rig.hw.transmits, vec![TURN_ON]);
    assert!(rig.sink.events.contains(&AppEvent::StateChanged {
        from: OperatingState::On,
        to: OperatingState::HighPower,
    }));
}

#[test]
fn failed_transmit_keeps_state_and_retries_next_poll() {
    let mut rig = Rig::new(SystemConfig::default());
    rig.hw.set_motion(true);
    rig.hw.fail_transmits(Some(TransmitError::Driver(-1)));

    assert_eq!(rig.tick(5_000), TickOutcome::Polled { command: None });
    assert_eq!(rig.app.current_state(), OperatingState::Off);
    assert_eq!(rig.hw.rejected, 1);
    assert!(rig.sink.events.contains(&AppEvent::TransmitFailed {
        command: TURN_ON,
        error: TransmitError::Driver(-1),
    }));

    // The check was stamped before the failed send: no early retry.
    rig.hw.fail_transmits(None);
    assert_eq!(rig.tick(9_900), TickOutcome::Waiting);
    assert_eq!(rig.tick(10_000), TickOutcome::Polled { command: Some(TURN_ON) });
    assert_eq!(rig.app.stats().transmit_failures, 1);
}
