//! Toshiba heat-pump IR protocol.
//!
//! ```text
//!  byte  0    1    2     3      4    5          6               7    [8]   last
//!       F2   0D  len  !len    01  temp<<4  fan<<5 | mode       00  [opt]  xor
//! ```
//!
//! `len` is 3 for the short form (on/off) and 4 for the long form that
//! carries an option byte (high power). The checksum is the XOR of every
//! byte between the header and itself. Frames are sent MSB first, twice,
//! on a 38 kHz carrier.

use heapless::Vec;

use super::{AcCommand, AcMode};
use crate::error::TransmitError;

/// Longest frame (long form) in bytes.
pub const MAX_FRAME_LEN: usize = 10;
const HEADER: [u8; 2] = [0xF2, 0x0D];
const SHORT_LEN: u8 = 3;
const LONG_LEN: u8 = 4;
const OPTION_HIGH_POWER: u8 = 0x01;

/// Protocol bytes for one command.
pub type Frame = Vec<u8, MAX_FRAME_LEN>;

// ── Timing (µs) ───────────────────────────────────────────────

pub const HEADER_MARK_US: u16 = 4400;
pub const HEADER_SPACE_US: u16 = 4300;
pub const BIT_MARK_US: u16 = 580;
pub const ONE_SPACE_US: u16 = 1600;
pub const ZERO_SPACE_US: u16 = 490;
pub const FRAME_GAP_US: u16 = 7400;
/// Each frame is sent this many times back to back.
pub const REPEATS: usize = 2;

/// Pulses in one copy of the longest frame: header, two per bit, the
/// closing bit mark and the inter-frame gap.
const PULSES_PER_FRAME: usize = 2 + MAX_FRAME_LEN * 8 * 2 + 2;
pub const MAX_PULSES: usize = PULSES_PER_FRAME * REPEATS;

/// One RMT level period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IrPulse {
    /// Carrier on (mark) or off (space).
    pub high: bool,
    pub duration_us: u16,
}

impl IrPulse {
    const fn mark(duration_us: u16) -> Self {
        Self {
            high: true,
            duration_us,
        }
    }

    const fn space(duration_us: u16) -> Self {
        Self {
            high: false,
            duration_us,
        }
    }
}

pub type PulseTrain = Vec<IrPulse, MAX_PULSES>;

// ── Encoding ──────────────────────────────────────────────────

/// XOR of all payload bytes (everything after the 4-byte header).
pub fn checksum(payload: &[u8]) -> u8 {
    payload.iter().fold(0, |acc, b| acc ^ b)
}

/// Encode a command into protocol bytes.
pub fn encode(command: &AcCommand) -> Frame {
    let (len, temp, fan, mode, option) = match *command {
        AcCommand::TurnOn {
            temperature_code,
            fan_code,
        } => (SHORT_LEN, temperature_code, fan_code, AcMode::Cool, None),
        AcCommand::TurnOff => (SHORT_LEN, 0, 0, AcMode::Off, None),
        AcCommand::HighPower => (LONG_LEN, 0, 0, AcMode::Auto, Some(OPTION_HIGH_POWER)),
    };

    let mut frame = Frame::new();
    // Capacity is fixed at the long-form size, so none of these can fail.
    let _ = frame.extend_from_slice(&HEADER);
    let _ = frame.extend_from_slice(&[len, !len, 0x01, (temp & 0x0F) << 4]);
    let _ = frame.push(((fan & 0x07) << 5) | mode as u8);
    let _ = frame.push(0x00);
    if let Some(opt) = option {
        let _ = frame.push(opt);
    }
    let xor = checksum(&frame[4..]);
    let _ = frame.push(xor);
    frame
}

/// Expand a frame into the mark/space sequence for the RMT peripheral.
pub fn pulse_train(frame: &[u8]) -> Result<PulseTrain, TransmitError> {
    let mut pulses = PulseTrain::new();
    let mut push = |p: IrPulse| pulses.push(p).map_err(|_| TransmitError::Encode);

    for _ in 0..REPEATS {
        push(IrPulse::mark(HEADER_MARK_US))?;
        push(IrPulse::space(HEADER_SPACE_US))?;
        for byte in frame {
            for bit in (0..8).rev() {
                push(IrPulse::mark(BIT_MARK_US))?;
                let space = if byte & (1 << bit) != 0 {
                    ONE_SPACE_US
                } else {
                    ZERO_SPACE_US
                };
                push(IrPulse::space(space))?;
            }
        }
        push(IrPulse::mark(BIT_MARK_US))?;
        push(IrPulse::space(FRAME_GAP_US))?;
    }
    Ok(pulses)
}
