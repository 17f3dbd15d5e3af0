//! Indicator Output Driver
//!
//! An LED (or any on/off load) on a push-pull output with a fixed
//! polarity.

use embedded_hal::digital::OutputPin;

use crate::peripheral::gpio::write_level;
use crate::types::{Level, Polarity, SenseResult};

/// Indicator on a digital output
pub struct Indicator<P> {
    pin: P,
    polarity: Polarity,
    level: Option<Level>,
}

impl<P: OutputPin> Indicator<P> {
    /// Create an indicator; the pin keeps its reset level until first set
    #[must_use]
    pub const fn new(pin: P, polarity: Polarity) -> Self {
        Self {
            pin,
            polarity,
            level: None,
        }
    }

    /// Turn the indicator on or off
    ///
    /// # Errors
    ///
    /// Returns an error if writing the pin fails.
    pub fn set(&mut self, active: bool) -> SenseResult<()> {
        self.drive(self.polarity.level_for(active))
    }

    /// Drive the pin to an explicit level
    ///
    /// # Errors
    ///
    /// Returns an error if writing the pin fails.
    pub fn drive(&mut self, level: Level) -> SenseResult<()> {
        write_level(&mut self.pin, level)?;
        self.level = Some(level);
        Ok(())
    }

    /// Polarity of this indicator
    #[must_use]
    pub const fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// Last level written, `None` before the first write
    #[must_use]
    pub const fn level(&self) -> Option<Level> {
        self.level
    }

    /// Check if the indicator is currently on
    #[must_use]
    pub fn is_on(&self) -> bool {
        self.level
            .is_some_and(|level| level == self.polarity.level_for(true))
    }

    /// Release the output pin
    pub fn release(self) -> P {
        self.pin
    }
}
