//! Digital input bank: motion sensor and the two manual buttons.
//!
//! Any `embedded_hal::digital::InputPin` works, so the same bank holds
//! `PinDriver<AnyInputPin, Input>`s on the ESP32 and plain mocks in host
//! tests. Lines are looked up by GPIO number, matching
//! [`DigitalInputPort::read_digital`](crate::app::ports::DigitalInputPort).
//!
//! No debouncing: the PIR output is already a clean level and the buttons
//! are RC-filtered on the board.

use embedded_hal::digital::InputPin;
use heapless::Vec;
use log::warn;

use crate::error::{ConfigError, Error, InputError, Result};

/// Maximum number of lines one bank can hold.
pub const MAX_INPUTS: usize = 4;

/// Electrical level that means "asserted".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveLevel {
    High,
    Low,
}

struct InputLine<P> {
    gpio: i32,
    pin: P,
    active: ActiveLevel,
}

pub struct InputBank<P: InputPin> {
    lines: Vec<InputLine<P>, MAX_INPUTS>,
}

impl<P: InputPin> Default for InputBank<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: InputPin> InputBank<P> {
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Register a line under its GPIO number.
    pub fn add(&mut self, gpio: i32, pin: P, active: ActiveLevel) -> Result<()> {
        if self.lines.iter().any(|line| line.gpio == gpio) {
            return Err(ConfigError::DuplicatePin(gpio).into());
        }
        self.lines
            .push(InputLine { gpio, pin, active })
            .map_err(|_| Error::Init("input bank full"))
    }

    /// Read a line, reporting unknown GPIOs and driver failures.
    pub fn try_read(&mut self, gpio: i32) -> core::result::Result<bool, InputError> {
        let line = self
            .lines
            .iter_mut()
            .find(|line| line.gpio == gpio)
            .ok_or(InputError::UnknownPin(gpio))?;
        let high = line
            .pin
            .is_high()
            .map_err(|_| InputError::ReadFailed(gpio))?;
        Ok(match line.active {
            ActiveLevel::High => high,
            ActiveLevel::Low => !high,
        })
    }

    /// Read a line; any failure reads as "not asserted".
    pub fn read(&mut self, gpio: i32) -> bool {
        self.try_read(gpio).unwrap_or_else(|e| {
            warn!("Input read: {}", e);
            false
        })
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
