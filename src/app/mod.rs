//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the business rules for the gearbox controller:
//! the configuration model and the service that applies operator intents
//! to it.  All interaction with hardware happens through **port traits**
//! defined in [`ports`], keeping this layer fully testable without real
//! peripherals.

pub mod commands;
pub mod events;
pub mod model;
pub mod ports;
pub mod service;
