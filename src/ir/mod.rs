//! Air-conditioner commands and their infrared encoding.
//!
//! [`AcCommand`] is the only thing the controller hands to the transmit
//! port. [`toshiba`] turns a command into protocol bytes and then into the
//! mark/space pulse train the RMT peripheral clocks out.

pub mod toshiba;

use serde::{Deserialize, Serialize};

use crate::config::SystemConfig;
use crate::error::ConfigError;
use crate::fsm::OperatingState;

// ---------------------------------------------------------------------------
// Mode / fan codes
// ---------------------------------------------------------------------------

/// Operating mode nibble of the mode/fan byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum AcMode {
    Auto = 0,
    Cool = 1,
    Dry = 2,
    Heat = 3,
    Off = 7,
}

/// Indoor fan speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FanSpeed {
    Auto,
    Level1,
    Level2,
    Level3,
    Level4,
    #[default]
    Level5,
}

impl FanSpeed {
    /// Protocol value for the fan field (3 bits). Level 0x01 is unused by
    /// the indoor units, so manual levels start at 2.
    pub const fn code(self) -> u8 {
        match self {
            Self::Auto => 0,
            Self::Level1 => 2,
            Self::Level2 => 3,
            Self::Level3 => 4,
            Self::Level4 => 5,
            Self::Level5 => 6,
        }
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// A command the controller asks the transmitter to send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcCommand {
    /// Cooling mode at the configured set-point and fan speed.
    TurnOn { temperature_code: u8, fan_code: u8 },
    /// Turbo / high-power option.
    HighPower,
    TurnOff,
}

impl AcCommand {
    /// Build the turn-on command, range-checking the temperature.
    pub fn turn_on(config: &SystemConfig) -> Result<Self, ConfigError> {
        Ok(Self::TurnOn {
            temperature_code: config.temperature_code()?,
            fan_code: config.fan_speed.code(),
        })
    }

    pub fn high_power(_config: &SystemConfig) -> Result<Self, ConfigError> {
        Ok(Self::HighPower)
    }

    pub fn turn_off(_config: &SystemConfig) -> Result<Self, ConfigError> {
        Ok(Self::TurnOff)
    }

    /// Command that puts the unit into `state` from any other state.
    pub fn for_state(state: OperatingState, config: &SystemConfig) -> Result<Self, ConfigError> {
        match state.resting() {
            OperatingState::Off => Self::turn_off(config),
            OperatingState::On => Self::turn_on(config),
            _ => Self::high_power(config),
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::TurnOn { .. } => "TurnOn",
            Self::HighPower => "HighPower",
            Self::TurnOff => "TurnOff",
        }
    }
}
