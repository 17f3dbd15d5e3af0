//! Digital pin access
//!
//! Read-bit and write-bit operations over `embedded-hal` pins. Pin
//! direction, mode and pull are fixed when the pin is constructed (see
//! `hal::gpio` on hardware), so a pin that reaches these functions is
//! always configured.

use embedded_hal::digital::{Error as _, InputPin, OutputPin};

use crate::types::{Error, Level, SenseResult};

/// Read the input level (`true` is high)
///
/// # Errors
///
/// Returns [`Error::Gpio`] if the pin implementation reports a failure.
pub fn read_bit<P: InputPin>(pin: &mut P) -> SenseResult<bool> {
    pin.is_high().map_err(|e| Error::Gpio(e.kind()))
}

/// Drive the output high (`true`) or low
///
/// # Errors
///
/// Returns [`Error::Gpio`] if the pin implementation reports a failure.
pub fn write_bit<P: OutputPin>(pin: &mut P, high: bool) -> SenseResult<()> {
    write_level(pin, Level::from_bool(high))
}

/// Drive the output to `level`
///
/// # Errors
///
/// Returns [`Error::Gpio`] if the pin implementation reports a failure.
pub fn write_level<P: OutputPin>(pin: &mut P, level: Level) -> SenseResult<()> {
    let written = match level {
        Level::High => pin.set_high(),
        Level::Low => pin.set_low(),
    };
    written.map_err(|e| Error::Gpio(e.kind()))
}
