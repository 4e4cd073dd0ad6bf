//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements    | Connects to                          |
//! |------------|---------------|--------------------------------------|
//! | `hardware` | SensorPort    | DHT11, MQ-2, HC-SR04, MPU-6050       |
//! |            | ActuatorPort  | L293D motor, RGB LED, buzzer, LCD    |
//! | `log_sink` | EventSink     | Serial log output                    |
//! | `time`     | —             | ESP32 system timer                   |
//! | `esp`      | ToneOutput    | LEDC frequency control (`espidf`)    |

#[cfg(feature = "espidf")]
pub mod esp;
pub mod hardware;
pub mod log_sink;
pub mod time;
