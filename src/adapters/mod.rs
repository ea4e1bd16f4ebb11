//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements       | Connects to                 |
//! |------------|------------------|-----------------------------|
//! | `hardware` | DigitalInputPort | GPIO input bank             |
//! |            | TransmitPort     | RMT IR transmitter          |
//! | `log_sink` | EventSink        | Serial log output           |
//! | `time`     | TimePort         | ESP32 high-resolution timer |

pub mod hardware;
pub mod log_sink;
pub mod time;
