//! Infrared transmitter driver.
//!
//! Encodes an [`AcCommand`] with the Toshiba codec and clocks the pulse
//! train out of an RMT TX channel with a 38 kHz carrier. The send blocks
//! until the RMT has drained (two frames, about 0.3 s).
//!
//! On non-espidf targets the driver keeps the last frame in memory so the
//! hardware adapter can be exercised in host tests.

use log::debug;

use crate::error::TransmitError;
use crate::ir::toshiba::{self, Frame, PulseTrain};
use crate::ir::AcCommand;

#[cfg(target_os = "espidf")]
use esp_idf_hal::{
    gpio::OutputPin,
    peripheral::Peripheral,
    rmt::{
        config::{CarrierConfig, DutyPercent, TransmitConfig},
        PinState, Pulse, PulseTicks, RmtChannel, TxRmtDriver, VariableLengthSignal,
    },
    units::FromValueType,
};
#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
use crate::pins;

pub struct IrTxDriver {
    #[cfg(target_os = "espidf")]
    tx: TxRmtDriver<'static>,
    #[cfg(not(target_os = "espidf"))]
    last_frame: Option<Frame>,
    frames_sent: u32,
}

impl IrTxDriver {
    /// Claim an RMT channel and configure it for the IR emitter.
    #[cfg(target_os = "espidf")]
    pub fn new<C: RmtChannel>(
        channel: impl Peripheral<P = C> + 'static,
        pin: impl Peripheral<P = impl OutputPin> + 'static,
    ) -> anyhow::Result<Self> {
        let carrier = CarrierConfig::new()
            .duty_percent(DutyPercent::new(pins::IR_CARRIER_DUTY_PERCENT)?)
            .frequency(pins::IR_CARRIER_HZ.Hz());
        let config = TransmitConfig::new()
            .clock_divider(pins::RMT_CLOCK_DIVIDER)
            .carrier(Some(carrier));
        let tx = TxRmtDriver::new(channel, pin, &config)?;

        info!(
            "IR TX: RMT ready ({} Hz carrier, {}% duty)",
            pins::IR_CARRIER_HZ,
            pins::IR_CARRIER_DUTY_PERCENT
        );
        Ok(Self { tx, frames_sent: 0 })
    }

    /// Simulation driver that records frames instead of sending them.
    #[cfg(not(target_os = "espidf"))]
    pub fn new() -> Self {
        Self {
            last_frame: None,
            frames_sent: 0,
        }
    }

    /// Encode and send one command.
    pub fn send(&mut self, command: &AcCommand) -> Result<(), TransmitError> {
        let frame = toshiba::encode(command);
        let pulses = toshiba::pulse_train(&frame)?;
        self.emit(&frame, &pulses)?;
        self.frames_sent = self.frames_sent.wrapping_add(1);
        debug!(
            "IR TX: {} {:02X?} ({} pulses)",
            command.label(),
            frame.as_slice(),
            pulses.len()
        );
        Ok(())
    }

    /// Commands sent since construction.
    pub fn frames_sent(&self) -> u32 {
        self.frames_sent
    }

    #[cfg(target_os = "espidf")]
    fn emit(&mut self, _frame: &Frame, pulses: &PulseTrain) -> Result<(), TransmitError> {
        let driver_err = |e: esp_idf_hal::sys::EspError| TransmitError::Driver(e.code());

        let mut signal = VariableLengthSignal::with_capacity(pulses.len());
        for p in pulses {
            let level = if p.high { PinState::High } else { PinState::Low };
            let ticks = PulseTicks::new(p.duration_us).map_err(driver_err)?;
            signal.push([&Pulse::new(level, ticks)]).map_err(driver_err)?;
        }
        self.tx.start_blocking(&signal).map_err(driver_err)
    }

    #[cfg(not(target_os = "espidf"))]
    fn emit(&mut self, frame: &Frame, _pulses: &PulseTrain) -> Result<(), TransmitError> {
        self.last_frame = Some(frame.clone());
        Ok(())
    }

    /// Bytes of the most recent frame (simulation only).
    #[cfg(not(target_os = "espidf"))]
    pub fn last_frame(&self) -> Option<&[u8]> {
        self.last_frame.as_deref()
    }
}

#[cfg(not(target_os = "espidf"))]
impl Default for IrTxDriver {
    fn default() -> Self {
        Self::new()
    }
}
