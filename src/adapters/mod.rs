//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements       | Connects to               |
//! |------------|------------------|---------------------------|
//! | `hardware` | SensorPort       | ESP32 ADC, PIR GPIO       |
//! |            | ActuatorPort     | Relay GPIOs               |
//! | `log_sink` | EventSink        | Serial log output         |
//! |            | StatusReporter   | JSON status lines         |
//! | `display`  | StatusReporter   | SSD1306 OLED over I²C     |
//! | `time`     | ClockPort        | ESP32 system timer        |

pub mod display;
pub mod hardware;
pub mod log_sink;
pub mod time;
