//! ReconUAV rover firmware library.
//!
//! Everything except the ESP-IDF entry point lives here so the domain
//! logic, drivers and adapters can be tested on the host.  Code that
//! needs ESP-IDF is behind the `espidf` feature.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod display;
pub mod drivers;
pub mod error;
pub mod fsm;
pub mod hazard;
pub mod pins;
pub mod scheduler;
pub mod sensors;
pub mod telemetry;
