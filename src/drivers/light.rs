//! Light Sensor Driver
//!
//! LDR voltage divider on an analog channel. Darker means a lower
//! sample; a sample at or below the threshold counts as detected.

use crate::config::ADC_VREF_VOLTS;
use crate::peripheral::adc::{AnalogInput, Converter};
use crate::types::AdcSample;

/// Result of one light measurement
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LightReading {
    /// Sample the decision was made on
    pub sample: AdcSample,
    /// Sample was at or below the threshold
    pub below_threshold: bool,
}

impl LightReading {
    /// Divider voltage the sample corresponds to
    #[must_use]
    pub fn volts(self) -> f32 {
        self.sample.as_voltage(ADC_VREF_VOLTS)
    }
}

/// Light sensor with a fixed threshold
pub struct LightSensor<C: Converter> {
    input: AnalogInput<C>,
    threshold: u16,
}

impl<C: Converter> LightSensor<C> {
    /// Create a light sensor comparing against `threshold`
    #[must_use]
    pub const fn new(input: AnalogInput<C>, threshold: u16) -> Self {
        Self { input, threshold }
    }

    /// Start a conversion, wait for it and compare the result
    pub fn measure(&mut self) -> LightReading {
        let sample = self.input.read_blocking();
        LightReading {
            sample,
            below_threshold: sample.is_below(self.threshold),
        }
    }

    /// Threshold in use
    #[must_use]
    pub const fn threshold(&self) -> u16 {
        self.threshold
    }

    /// Last sample read from the channel
    #[must_use]
    pub const fn latest(&self) -> Option<AdcSample> {
        self.input.latest()
    }

    /// Release the analog input
    pub fn release(self) -> AnalogInput<C> {
        self.input
    }
}
