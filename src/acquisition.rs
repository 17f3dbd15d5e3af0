//! Sensor Acquisition
//!
//! Reads the three sensing channels once per cycle, always in the same
//! order, and collects the detections into a [`Readings`] record:
//!
//! 1. motion: one instantaneous read of the PIR input
//! 2. ultrasonic: trigger pulse, settle, single echo sample
//! 3. light: start conversion, wait for completion, compare with threshold

use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal_async::delay::DelayNs;

use crate::drivers::light::LightSensor;
use crate::drivers::motion::MotionSensor;
use crate::drivers::ultrasonic::UltrasonicSensor;
use crate::peripheral::adc::Converter;
use crate::types::{AdcSample, Readings, SenseResult};

/// The three sensing channels
pub struct Acquisition<M, T, E, C: Converter> {
    motion: MotionSensor<M>,
    ultrasonic: UltrasonicSensor<T, E>,
    light: LightSensor<C>,
}

impl<M, T, E, C> Acquisition<M, T, E, C>
where
    M: InputPin,
    T: OutputPin,
    E: InputPin,
    C: Converter,
{
    /// Combine the sensors
    #[must_use]
    pub const fn new(
        motion: MotionSensor<M>,
        ultrasonic: UltrasonicSensor<T, E>,
        light: LightSensor<C>,
    ) -> Self {
        Self {
            motion,
            ultrasonic,
            light,
        }
    }

    /// Run one acquisition pass
    ///
    /// # Errors
    ///
    /// Returns the first pin error encountered; later channels are not
    /// read in that case.
    pub async fn acquire<D: DelayNs>(&mut self, delay: &mut D) -> SenseResult<Readings> {
        let motion_detected = self.motion.is_motion_detected()?;
        let obstacle_detected = self.ultrasonic.detect(delay).await?;
        let light = self.light.measure();

        trace!("acquire: light {} = {} V", light.sample, light.volts());

        Ok(Readings {
            motion_detected,
            obstacle_detected,
            light_below_threshold: light.below_threshold,
        })
    }

    /// Last light sample, if one has been taken
    #[must_use]
    pub const fn latest_light_sample(&self) -> Option<AdcSample> {
        self.light.latest()
    }

    /// Split back into the individual sensors
    pub fn release(self) -> (MotionSensor<M>, UltrasonicSensor<T, E>, LightSensor<C>) {
        (self.motion, self.ultrasonic, self.light)
    }
}
