//! Peripheral Abstractions
//!
//! Hardware-independent drivers for the three peripheral classes the
//! controller needs: digital pins, a single analog channel and an
//! edge-triggered interrupt line. Built on the `embedded-hal` traits so the
//! same code runs against the STM32 adapters in [`crate::hal`] and against
//! test doubles on the host.

pub mod adc;
pub mod exti;
pub mod gpio;
