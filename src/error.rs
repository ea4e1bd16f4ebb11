//! Unified error types for the MotionAC firmware.
//!
//! A single `Error` enum that every subsystem converts into, with one typed
//! enum per concern underneath. All variants are `Copy` so they can be
//! carried inside [`AppEvent`](crate::app::events::AppEvent)s and test
//! assertions without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Configuration is invalid for the requested operation.
    Config(ConfigError),
    /// The infrared transmitter rejected or failed a command.
    Transmit(TransmitError),
    /// A digital input could not be read.
    Input(InputError),
    /// Peripheral initialisation failed.
    Init(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Transmit(e) => write!(f, "transmit: {e}"),
            Self::Input(e) => write!(f, "input: {e}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The configured temperature does not fit the protocol's 4-bit field.
    TemperatureOutOfRange {
        /// Temperature as configured (°C).
        requested_c: i16,
        /// The encoded field value it would have produced.
        code: i16,
    },
    /// A timing field that must be non-zero is zero. Carries the field name.
    ZeroInterval(&'static str),
    /// Shutoff timeout shorter than one check interval.
    ShutoffBelowCheckInterval,
    /// Two inputs were mapped to the same GPIO.
    DuplicatePin(i32),
    /// A configuration override could not be parsed.
    Parse,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TemperatureOutOfRange { requested_c, code } => write!(
                f,
                "temperature {requested_c}\u{00b0}C out of range (code {code}, valid 0..=13)"
            ),
            Self::ZeroInterval(field) => write!(f, "{field} must be non-zero"),
            Self::ShutoffBelowCheckInterval => {
                write!(f, "shutoff timeout shorter than check interval")
            }
            Self::DuplicatePin(gpio) => write!(f, "GPIO {gpio} assigned twice"),
            Self::Parse => write!(f, "config override could not be parsed"),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Transmit errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransmitError {
    /// The pulse train did not fit the encoder buffer.
    Encode,
    /// The RMT peripheral is still sending the previous frame.
    Busy,
    /// The driver returned an ESP-IDF error code.
    Driver(i32),
}

impl fmt::Display for TransmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Encode => write!(f, "pulse train exceeds encoder buffer"),
            Self::Busy => write!(f, "transmitter busy"),
            Self::Driver(rc) => write!(f, "RMT driver error (rc={rc})"),
        }
    }
}

impl From<TransmitError> for Error {
    fn from(e: TransmitError) -> Self {
        Self::Transmit(e)
    }
}

// ---------------------------------------------------------------------------
// Input errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputError {
    /// The GPIO read returned an error.
    ReadFailed(i32),
    /// No input line is registered for this GPIO.
    UnknownPin(i32),
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadFailed(gpio) => write!(f, "GPIO {gpio} read failed"),
            Self::UnknownPin(gpio) => write!(f, "GPIO {gpio} is not a configured input"),
        }
    }
}

impl From<InputError> for Error {
    fn from(e: InputError) -> Self {
        Self::Input(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
