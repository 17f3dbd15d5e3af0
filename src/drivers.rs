//! Sensor and Indicator Drivers
//!
//! Device-level drivers built on the peripheral abstractions.

pub mod indicator;
pub mod light;
pub mod motion;
pub mod ultrasonic;
