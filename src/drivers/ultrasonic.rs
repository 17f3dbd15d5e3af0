//! Ultrasonic Sensor Driver
//!
//! Trigger/echo presence detector. A measurement pulses the trigger high
//! for a fixed time, drives it low, waits a fixed settle time and samples
//! the echo line once. An asserted echo at that instant counts as an
//! obstacle.
//!
//! No pulse width is measured, so no distance is computed.

use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal_async::delay::DelayNs;

use crate::peripheral::gpio::{read_bit, write_bit};
use crate::types::SenseResult;

/// Trigger/echo timing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PulseTiming {
    /// Time the trigger is held high
    pub trigger_us: u32,
    /// Time between the trigger falling and the echo sample
    pub settle_us: u32,
}

impl PulseTiming {
    /// Build from the board timing
    #[must_use]
    pub const fn from_timing(timing: &crate::config::Timing) -> Self {
        Self {
            trigger_us: timing.trigger_pulse_us,
            settle_us: timing.echo_settle_us,
        }
    }
}

/// Ultrasonic sensor on a trigger output and an echo input
pub struct UltrasonicSensor<T, E> {
    trigger: T,
    echo: E,
    timing: PulseTiming,
}

impl<T: OutputPin, E: InputPin> UltrasonicSensor<T, E> {
    /// Create the sensor
    #[must_use]
    pub const fn new(trigger: T, echo: E, timing: PulseTiming) -> Self {
        Self {
            trigger,
            echo,
            timing,
        }
    }

    /// Pulse the trigger and sample the echo once
    ///
    /// Returns `true` if the echo line is high at the sample instant.
    ///
    /// # Errors
    ///
    /// Returns an error if a pin access fails. The trigger is left low
    /// whenever the pulse itself completed.
    pub async fn detect<D: DelayNs>(&mut self, delay: &mut D) -> SenseResult<bool> {
        write_bit(&mut self.trigger, true)?;
        delay.delay_us(self.timing.trigger_us).await;
        write_bit(&mut self.trigger, false)?;

        delay.delay_us(self.timing.settle_us).await;
        read_bit(&mut self.echo)
    }

    /// Configured timing
    #[must_use]
    pub const fn timing(&self) -> PulseTiming {
        self.timing
    }

    /// Release the trigger and echo pins
    pub fn release(self) -> (T, E) {
        (self.trigger, self.echo)
    }
}
