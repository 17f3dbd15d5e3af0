//! PIR Motion Sensor Driver
//!
//! The sensor drives its output high while motion is present and low
//! otherwise. One poll is a single instantaneous read.

use embedded_hal::digital::InputPin;

use crate::peripheral::gpio::read_bit;
use crate::types::SenseResult;

/// PIR motion sensor on a digital input
pub struct MotionSensor<P> {
    pin: P,
}

impl<P: InputPin> MotionSensor<P> {
    /// Create a motion sensor on a floating input
    #[must_use]
    pub const fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Returns `true` if the sensor output is high right now
    ///
    /// # Errors
    ///
    /// Returns an error if reading the pin fails.
    pub fn is_motion_detected(&mut self) -> SenseResult<bool> {
        read_bit(&mut self.pin)
    }

    /// Release the input pin
    pub fn release(self) -> P {
        self.pin
    }
}
