//! Sensor Gate Firmware Library
//!
//! Core functionality for an STM32F4 controller that fuses a PIR motion
//! sensor, an ultrasonic trigger/echo sensor and a light-dependent resistor
//! into three independent indicator outputs. Nothing runs until a single
//! falling edge on the start button opens the startup gate.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    APPLICATION LAYER                        │
//! │  Startup Gate  │  Control Loop  │  Acquisition / Actuation  │
//! ├─────────────────────────────────────────────────────────────┤
//! │                      DRIVER LAYER                           │
//! │  PIR  │  Ultrasonic  │  Light (LDR)  │  Indicator           │
//! ├─────────────────────────────────────────────────────────────┤
//! │                PERIPHERAL ABSTRACTIONS                      │
//! │  GPIO bits  │  Analog input  │  Edge interrupt              │
//! ├─────────────────────────────────────────────────────────────┤
//! │              HAL (embassy-stm32 adapters)                   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Data flows one way every cycle: acquisition reads the sensors into a
//! [`types::Readings`] record and actuation writes the indicators from it.
//! The startup gate is the only state touched by the interrupt path.
//!
//! # Design Principles
//!
//! - **Generic over `embedded-hal`**: everything above the HAL runs on the host
//! - **Single writer**: only a [`gate::StartTrigger`] can open the gate
//! - **Injectable delays**: every wait goes through `DelayNs`
//! - **No unsafe in application code**

#![cfg_attr(feature = "embedded", no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Must come first so the logging macros are visible to every module.
#[macro_use]
mod fmt;

// Re-export dependencies needed by applications (only in embedded mode)
#[cfg(feature = "embedded")]
pub use embassy_executor;
#[cfg(feature = "embedded")]
pub use embassy_stm32;
#[cfg(feature = "embedded")]
pub use embassy_time;

/// Hardware Abstraction Layer
///
/// embassy-stm32 adapters for GPIO, ADC1 and EXTI.
#[cfg(feature = "embedded")]
pub mod hal;

/// Peripheral Abstractions
///
/// Hardware-independent GPIO, analog input and edge interrupt drivers.
pub mod peripheral;

/// Sensor and Indicator Drivers
pub mod drivers;

/// Startup Gate
pub mod gate;

/// Sensor Acquisition
pub mod acquisition;

/// Actuation
pub mod actuation;

/// Control Loop
pub mod control;

/// Shared types used across modules
pub mod types;

/// System configuration and constants
pub mod config;

/// Prelude module for common imports
pub mod prelude {
    //! Convenient re-exports for common types and traits.

    pub use crate::config::*;
    pub use crate::types::*;

    pub use crate::gate::{StartTrigger, StartupGate};
    pub use crate::peripheral::adc::{AnalogInput, Converter};

    // Common traits
    pub use embedded_hal::digital::{InputPin, OutputPin};
    pub use embedded_hal_async::delay::DelayNs;
}
