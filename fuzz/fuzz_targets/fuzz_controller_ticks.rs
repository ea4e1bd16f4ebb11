//! Fuzz target: `AppService::tick`
//!
//! Interprets the input as a stream of (input levels, time step) records
//! and drives the controller through them. Asserts that `Requested` never
//! becomes a current state, that at most one command is sent per poll, and
//! that the current state only moves on a poll.
//!
//! cargo fuzz run fuzz_controller_ticks

#![no_main]

use libfuzzer_sys::fuzz_target;
use motionac::app::events::AppEvent;
use motionac::app::ports::{DigitalInputPort, EventSink, TransmitPort};
use motionac::app::service::{AppService, TickOutcome};
use motionac::clock::DeviceClock;
use motionac::config::{PinConfig, SystemConfig};
use motionac::error::TransmitError;
use motionac::fsm::OperatingState;
use motionac::ir::AcCommand;

struct FuzzHw {
    pins: PinConfig,
    levels: u8,
    fail: bool,
    sent: usize,
}

impl DigitalInputPort for FuzzHw {
    fn read_digital(&mut self, pin: i32) -> bool {
        let bit = if pin == self.pins.motion_sensor {
            0
        } else if pin == self.pins.button_on {
            1
        } else if pin == self.pins.button_off {
            2
        } else {
            return false;
        };
        self.levels & (1 << bit) != 0
    }
}

impl TransmitPort for FuzzHw {
    fn transmit(&mut self, _command: &AcCommand) -> Result<(), TransmitError> {
        if self.fail {
            return Err(TransmitError::Busy);
        }
        self.sent += 1;
        Ok(())
    }
}

struct Discard;

impl EventSink for Discard {
    fn emit(&mut self, _event: &AppEvent) {}
}

fuzz_target!(|data: &[u8]| {
    let Some((&head, records)) = data.split_first() else {
        return;
    };

    // Header byte picks the set-point (some of them out of range) and
    // the optional behaviours.
    let config = SystemConfig {
        ac_temperature_c: 10 + i16::from(head & 0x1F),
        send_high_power: head & 0x20 == 0,
        refresh_interval_secs: (head & 0x40 != 0).then_some(30),
        shutoff_timeout_secs: 60,
        ..SystemConfig::default()
    };
    let mut hw = FuzzHw {
        pins: config.pins,
        levels: 0,
        fail: false,
        sent: 0,
    };
    let mut app = AppService::new(config, DeviceClock::boot(0));
    let mut sink = Discard;

    let mut now: u64 = 0;
    for rec in records.chunks_exact(3) {
        hw.levels = rec[0];
        hw.fail = rec[0] & 0x80 != 0;
        now += u64::from(u16::from_le_bytes([rec[1], rec[2]]));

        let before_state = app.current_state();
        let before_sent = hw.sent;
        let outcome = app.tick(now, &mut hw, &mut sink);

        assert_ne!(app.current_state(), OperatingState::Requested);
        assert!(hw.sent - before_sent <= 1, "more than one command per tick");
        if !matches!(outcome, TickOutcome::Polled { .. }) {
            assert_eq!(app.current_state(), before_state, "state moved outside a poll");
            assert_eq!(hw.sent, before_sent, "transmit outside a poll");
        }
    }
});
