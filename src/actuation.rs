//! Actuation
//!
//! Maps a [`Readings`] record onto the three indicator outputs. The
//! mapping is a pure function of the current readings; each indicator is
//! independent of the others.
//!
//! | Reading                 | Indicator      | Polarity    |
//! |-------------------------|----------------|-------------|
//! | `motion_detected`       | PIR LED        | active-high |
//! | `obstacle_detected`     | ultrasonic LED | active-high |
//! | `light_below_threshold` | light LED      | active-low  |

use embedded_hal::digital::OutputPin;

use crate::drivers::indicator::Indicator;
use crate::types::{Level, PinRole, Polarity, Readings, SenseResult};

/// Pin levels for one cycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IndicatorLevels {
    /// Motion indicator level
    pub motion: Level,
    /// Obstacle indicator level
    pub ultrasonic: Level,
    /// Darkness indicator level
    pub light: Level,
}

#[cfg(feature = "embedded")]
impl defmt::Format for IndicatorLevels {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "Levels(pir={}, us={}, light={})",
            self.motion,
            self.ultrasonic,
            self.light
        );
    }
}

const MOTION_POLARITY: Polarity = Polarity::ActiveHigh;
const ULTRASONIC_POLARITY: Polarity = Polarity::ActiveHigh;
const LIGHT_POLARITY: Polarity = Polarity::ActiveLow;

/// Pin levels the given readings call for
#[must_use]
pub const fn plan(readings: &Readings) -> IndicatorLevels {
    IndicatorLevels {
        motion: MOTION_POLARITY.level_for(readings.motion_detected),
        ultrasonic: ULTRASONIC_POLARITY.level_for(readings.obstacle_detected),
        light: LIGHT_POLARITY.level_for(readings.light_below_threshold),
    }
}

/// The three indicator outputs
pub struct Actuation<A, B, C> {
    motion: Indicator<A>,
    ultrasonic: Indicator<B>,
    light: Indicator<C>,
}

impl<A: OutputPin, B: OutputPin, C: OutputPin> Actuation<A, B, C> {
    /// Wrap the three indicator pins with their board polarities
    #[must_use]
    pub const fn new(motion_led: A, ultrasonic_led: B, light_led: C) -> Self {
        Self {
            motion: Indicator::new(motion_led, MOTION_POLARITY),
            ultrasonic: Indicator::new(ultrasonic_led, ULTRASONIC_POLARITY),
            light: Indicator::new(light_led, LIGHT_POLARITY),
        }
    }

    /// Drive all three indicators from `readings`
    ///
    /// Writes the light indicator first, then motion, then ultrasonic.
    ///
    /// # Errors
    ///
    /// Returns the first pin error; remaining indicators keep their
    /// previous level.
    pub fn apply(&mut self, readings: &Readings) -> SenseResult<IndicatorLevels> {
        let levels = plan(readings);
        self.light.drive(levels.light)?;
        self.motion.drive(levels.motion)?;
        self.ultrasonic.drive(levels.ultrasonic)?;
        Ok(levels)
    }

    /// Indicator for a role, `None` if the role is not an indicator
    #[must_use]
    pub fn level_of(&self, role: PinRole) -> Option<Level> {
        match role {
            PinRole::PirLed => self.motion.level(),
            PinRole::UltrasonicLed => self.ultrasonic.level(),
            PinRole::LightLed => self.light.level(),
            _ => None,
        }
    }

    /// Split back into the indicator pins
    pub fn release(self) -> (A, B, C) {
        (
            self.motion.release(),
            self.ultrasonic.release(),
            self.light.release(),
        )
    }
}
