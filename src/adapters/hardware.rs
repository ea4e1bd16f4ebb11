//! Hardware adapter: bridges real peripherals to domain port traits.
//!
//! Owns the input bank and the IR transmitter, exposing them through
//! [`DigitalInputPort`] and [`TransmitPort`]. This is the only module in
//! the system that touches actual hardware. On non-espidf targets the IR
//! driver records frames instead of sending them.

use embedded_hal::digital::InputPin;

use crate::app::ports::{DigitalInputPort, TransmitPort};
use crate::drivers::inputs::InputBank;
use crate::drivers::ir_tx::IrTxDriver;
use crate::error::TransmitError;
use crate::ir::AcCommand;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<P: InputPin> {
    inputs: InputBank<P>,
    ir: IrTxDriver,
}

impl<P: InputPin> HardwareAdapter<P> {
    pub fn new(inputs: InputBank<P>, ir: IrTxDriver) -> Self {
        Self { inputs, ir }
    }

    pub fn ir(&self) -> &IrTxDriver {
        &self.ir
    }
}

// ── DigitalInputPort implementation ───────────────────────────

impl<P: InputPin> DigitalInputPort for HardwareAdapter<P> {
    fn read_digital(&mut self, pin: i32) -> bool {
        self.inputs.read(pin)
    }
}

// ── TransmitPort implementation ───────────────────────────────

impl<P: InputPin> TransmitPort for HardwareAdapter<P> {
    fn transmit(&mut self, command: &AcCommand) -> Result<(), TransmitError> {
        self.ir.send(command)
    }
}
