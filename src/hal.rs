//! Hardware Abstraction Layer
//!
//! STM32F4 adapters that plug embassy-stm32 peripherals into the
//! hardware-independent drivers in [`crate::peripheral`].

pub mod adc;
pub mod exti;
pub mod gpio;
