//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the business rules for the rover: mode
//! orchestration, hazard evaluation and the display rotator.  All
//! interaction with hardware happens through **port traits** defined in
//! [`ports`], keeping this layer fully testable without real peripherals.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
