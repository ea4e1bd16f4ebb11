//! MotionAC Firmware: Main Entry Point
//!
//! Hexagonal architecture with a fixed-rate cooperative control loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter        LogEventSink       Esp32TimeAdapter    │
//! │  (DigitalInput+Transmit) (EventSink)        (TimePort)         │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              AppService (pure logic)                   │    │
//! │  │  DeviceClock · target derivation · TransitionTable     │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  TickScheduler (fixed rate) · Watchdog                         │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

// ── Imports ───────────────────────────────────────────────────
use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::gpio::{AnyInputPin, AnyOutputPin, Input, PinDriver};
use esp_idf_hal::peripherals::Peripherals;
use log::{info, warn};

use motionac::adapters::hardware::HardwareAdapter;
use motionac::adapters::log_sink::LogEventSink;
use motionac::adapters::time::Esp32TimeAdapter;
use motionac::app::ports::TimePort;
use motionac::app::service::AppService;
use motionac::clock::DeviceClock;
use motionac::config::SystemConfig;
use motionac::drivers::inputs::{ActiveLevel, InputBank};
use motionac::drivers::ir_tx::IrTxDriver;
use motionac::drivers::watchdog::Watchdog;
use motionac::error::Error;
use motionac::scheduler::{TickDecision, TickScheduler};

/// Highest GPIO number on the ESP32-S3.
const MAX_GPIO: i32 = 48;

type InputDriver = PinDriver<'static, AnyInputPin, Input>;

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  MotionAC v{}                      ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration (defaults or build-time override) ────
    let config = SystemConfig::load_or_default(option_env!("MOTIONAC_CONFIG_JSON"));
    if let Err(e) = config.temperature_code() {
        warn!("{} (turn-on will be refused every poll)", e);
    }
    info!(
        "Config: {}\u{00b0}C fan={:?} shutoff={}s check={}s warmup={}s refresh={:?}",
        config.ac_temperature_c,
        config.fan_speed,
        config.shutoff_timeout_secs,
        config.check_interval_secs,
        config.warmup_secs,
        config.refresh_interval_secs,
    );

    // ── 3. Peripherals ────────────────────────────────────────
    let peripherals = Peripherals::take()?;
    let inputs = init_inputs(&config)?;
    let ir_gpio = config.pins.ir_led;
    if !(0..=MAX_GPIO).contains(&ir_gpio) {
        return Err(Error::Init("IR GPIO out of range").into());
    }
    // SAFETY: the IR GPIO is distinct from every input (checked by
    // `SystemConfig::validate`) and claimed only here.
    let ir = IrTxDriver::new(peripherals.rmt.channel0, unsafe { AnyOutputPin::new(ir_gpio) })?;
    let mut hw = HardwareAdapter::new(inputs, ir);

    // ── 4. Controller ─────────────────────────────────────────
    let time = Esp32TimeAdapter::new();
    let tick_ms = config.control_loop_interval_ms;
    let watchdog = Watchdog::new(config.watchdog_timeout_ms);

    let clock = DeviceClock::boot(time.uptime_ms());
    let mut app = AppService::new(config, clock);
    let mut sink = LogEventSink::new();
    app.start(&mut sink);

    let mut scheduler = TickScheduler::new(tick_ms, time.uptime_ms());
    info!("Control loop running at {} ms", tick_ms);

    // ── 5. Control loop ───────────────────────────────────────
    loop {
        match scheduler.poll(time.uptime_ms()) {
            TickDecision::Wait(ms) => FreeRtos::delay_ms(ms),
            TickDecision::Due => {
                app.tick(time.uptime_ms(), &mut hw, &mut sink);
                watchdog.feed();
            }
        }
    }
}

/// Claim the three input GPIOs (active high, external pull-downs).
fn init_inputs(config: &SystemConfig) -> Result<InputBank<InputDriver>> {
    let pins = config.pins;
    let mut bank = InputBank::new();
    for gpio in [pins.motion_sensor, pins.button_on, pins.button_off] {
        if !(0..=MAX_GPIO).contains(&gpio) {
            return Err(Error::Init("input GPIO out of range").into());
        }
        // SAFETY: each GPIO is claimed once; `bank.add` rejects repeats.
        let pin = PinDriver::input(unsafe { AnyInputPin::new(gpio) })?;
        bank.add(gpio, pin, ActiveLevel::High)?;
    }
    info!(
        "Inputs: motion=GPIO{} on=GPIO{} off=GPIO{}",
        pins.motion_sensor, pins.button_on, pins.button_off
    );
    Ok(bank)
}
