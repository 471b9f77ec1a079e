//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements               | Connects to                |
//! |------------|--------------------------|----------------------------|
//! | `hardware` | SensorPort, ActuatorPort | DHT22 GPIO, H-bridge GPIO  |
//! | `display`  | DisplayPort              | HD44780 LCD over I²C       |
//! | `log_sink` | EventSink                | Serial log output          |
//! | `time`     | —                        | ESP32 system timer         |

pub mod display;
pub mod hardware;
pub mod log_sink;
pub mod time;
