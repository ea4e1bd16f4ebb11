//! Default GPIO assignments for the MotionAC controller board.
//!
//! Single source of truth for [`PinConfig::default`](crate::config::PinConfig).
//! A build-time configuration override may remap any of them.

// ---------------------------------------------------------------------------
// Infrared emitter (RMT TX, 38 kHz carrier)
// ---------------------------------------------------------------------------

/// IR LED driver transistor base. Driven by RMT channel 0.
pub const IR_LED_GPIO: i32 = 13;

// ---------------------------------------------------------------------------
// Inputs (active HIGH, external pull-downs)
// ---------------------------------------------------------------------------

/// PIR motion sensor output. HIGH while motion is detected.
pub const MOTION_SENSOR_GPIO: i32 = 2;
/// Momentary "AC on" push-button.
pub const BUTTON_ON_GPIO: i32 = 7;
/// Momentary "AC off" push-button.
pub const BUTTON_OFF_GPIO: i32 = 8;

// ---------------------------------------------------------------------------
// RMT configuration
// ---------------------------------------------------------------------------

/// Carrier frequency expected by the indoor unit's IR receiver.
pub const IR_CARRIER_HZ: u32 = 38_000;
/// Carrier duty cycle (percent).
pub const IR_CARRIER_DUTY_PERCENT: u8 = 33;
/// APB (80 MHz) divider giving 1 µs RMT ticks.
pub const RMT_CLOCK_DIVIDER: u8 = 80;
