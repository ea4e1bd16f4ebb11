//! System configuration parameters
//!
//! All tunable parameters for the MotionAC controller. Built once before the
//! control loop starts and never mutated afterwards. A JSON override can be
//! baked in at build time through `MOTIONAC_CONFIG_JSON`.

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
pub use crate::ir::FanSpeed;
use crate::pins;

/// Lowest temperature the heat-pump protocol can express (°C).
/// The frame carries `temperature - TEMPERATURE_BASE_C`.
pub const TEMPERATURE_BASE_C: i16 = 17;
/// Largest encoded temperature value (4-bit field, 17..=30 °C).
pub const TEMPERATURE_CODE_MAX: i16 = 13;

/// GPIO assignments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PinConfig {
    pub ir_led: i32,
    pub motion_sensor: i32,
    pub button_on: i32,
    pub button_off: i32,
}

impl Default for PinConfig {
    fn default() -> Self {
        Self {
            ir_led: pins::IR_LED_GPIO,
            motion_sensor: pins::MOTION_SENSOR_GPIO,
            button_on: pins::BUTTON_ON_GPIO,
            button_off: pins::BUTTON_OFF_GPIO,
        }
    }
}

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    // --- Air conditioner ---
    /// Cooling set-point sent with every turn-on frame (°C).
    pub ac_temperature_c: i16,
    /// Fan speed sent with every turn-on frame.
    pub fan_speed: FanSpeed,
    /// When false, the high-power step is recorded without transmitting.
    pub send_high_power: bool,

    // --- Timing ---
    /// Seconds without motion before the AC is switched off.
    pub shutoff_timeout_secs: u32,
    /// Minimum seconds between convergence attempts (anti-repeat cadence).
    pub check_interval_secs: u32,
    /// Seconds after boot during which all inputs are ignored.
    pub warmup_secs: u32,
    /// Re-send the current state's command this often while converged.
    /// `None` disables refreshing.
    pub refresh_interval_secs: Option<u32>,
    /// Control loop tick period (milliseconds).
    pub control_loop_interval_ms: u32,
    /// Task watchdog timeout (milliseconds).
    pub watchdog_timeout_ms: u32,

    // --- Pins ---
    pub pins: PinConfig,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Air conditioner
            ac_temperature_c: 17,
            fan_speed: FanSpeed::Level5,
            send_high_power: true,

            // Timing
            shutoff_timeout_secs: 60 * 60, // 1 h
            check_interval_secs: 5,
            warmup_secs: 1,
            refresh_interval_secs: None,
            control_loop_interval_ms: 100, // 10 Hz
            watchdog_timeout_ms: 10_000,

            pins: PinConfig::default(),
        }
    }
}

impl SystemConfig {
    /// Encoded temperature field for the turn-on frame.
    pub fn temperature_code(&self) -> Result<u8, ConfigError> {
        let code = self.ac_temperature_c - TEMPERATURE_BASE_C;
        if (0..=TEMPERATURE_CODE_MAX).contains(&code) {
            Ok(code as u8)
        } else {
            Err(ConfigError::TemperatureOutOfRange {
                requested_c: self.ac_temperature_c,
                code,
            })
        }
    }

    /// Structural checks. The temperature range is not checked here: an
    /// out-of-range set-point is reported on each turn-on attempt instead.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.check_interval_secs == 0 {
            return Err(ConfigError::ZeroInterval("check_interval_secs"));
        }
        if self.control_loop_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval("control_loop_interval_ms"));
        }
        if self.watchdog_timeout_ms == 0 {
            return Err(ConfigError::ZeroInterval("watchdog_timeout_ms"));
        }
        if self.refresh_interval_secs == Some(0) {
            return Err(ConfigError::ZeroInterval("refresh_interval_secs"));
        }
        if self.shutoff_timeout_secs < self.check_interval_secs {
            return Err(ConfigError::ShutoffBelowCheckInterval);
        }

        let p = &self.pins;
        let all = [p.ir_led, p.motion_sensor, p.button_on, p.button_off];
        for (i, gpio) in all.iter().enumerate() {
            if all[i + 1..].contains(gpio) {
                return Err(ConfigError::DuplicatePin(*gpio));
            }
        }
        Ok(())
    }

    /// Parse and validate a JSON override. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|e| {
            warn!("Config override rejected: {}", e);
            ConfigError::Parse
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Apply an optional override, falling back to defaults if it is invalid.
    pub fn load_or_default(override_json: Option<&str>) -> Self {
        let Some(json) = override_json else {
            info!("Config: using defaults");
            return Self::default();
        };
        match Self::from_json(json) {
            Ok(config) => {
                info!("Config: build-time override applied");
                config
            }
            Err(e) => {
                warn!("Config override invalid ({}), using defaults", e);
                Self::default()
            }
        }
    }
}
