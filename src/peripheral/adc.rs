//! Analog Input Driver
//!
//! Single-channel ADC driver. The channel is configured once for repeated
//! conversion; every read then returns whichever conversion completed last.
//! Nothing ties a returned sample to a conversion started by the same
//! caller in the same cycle.

use crate::types::{AdcSample, Error, SenseResult};

/// Conversion sequencing mode
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConversionMode {
    /// One conversion per start request
    Single,
    /// Conversions repeat without further start requests
    Continuous,
}

#[cfg(feature = "embedded")]
impl defmt::Format for ConversionMode {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Single => defmt::write!(f, "single"),
            Self::Continuous => defmt::write!(f, "continuous"),
        }
    }
}

/// Register-level view of an ADC
///
/// Implementations perform uncached accesses with no retry; the hardware
/// is assumed to acknowledge immediately.
pub trait Converter {
    /// Select `channel` as the only conversion in the sequence and power up
    fn configure(&mut self, channel: u8, sample_cycles: u16, mode: ConversionMode);

    /// Set the software start bit
    fn start_conversion(&mut self);

    /// End-of-conversion status flag
    fn end_of_conversion(&mut self) -> bool;

    /// Data register (right-aligned result)
    fn data(&mut self) -> u16;

    /// Channel fixed by the wiring, if the converter was built for one
    fn bound_channel(&self) -> Option<u8> {
        None
    }
}

/// Analog input channel in continuous-conversion mode
pub struct AnalogInput<C: Converter> {
    converter: C,
    channel: u8,
    latest: Option<AdcSample>,
}

impl<C: Converter> AnalogInput<C> {
    /// Configure `channel` for continuous conversion and start the first one
    ///
    /// # Errors
    ///
    /// Returns [`Error::ChannelMismatch`] if the converter is wired to a
    /// different channel; nothing is configured in that case.
    pub fn configure(mut converter: C, channel: u8, sample_cycles: u16) -> SenseResult<Self> {
        if let Some(bound) = converter.bound_channel() {
            if bound != channel {
                return Err(Error::ChannelMismatch {
                    requested: channel,
                    bound,
                });
            }
        }
        converter.configure(channel, sample_cycles, ConversionMode::Continuous);
        converter.start_conversion();
        debug!("adc: channel {} continuous, {} cycles", channel, sample_cycles);
        Ok(Self {
            converter,
            channel,
            latest: None,
        })
    }

    /// Configured channel
    #[must_use]
    pub const fn channel(&self) -> u8 {
        self.channel
    }

    /// Re-arm a conversion
    pub fn start_conversion(&mut self) {
        self.converter.start_conversion();
    }

    /// Spin until the end-of-conversion flag is set
    ///
    /// There is no timeout: a converter that never finishes hangs the caller.
    pub fn wait_for_conversion_complete(&mut self) {
        while !self.converter.end_of_conversion() {
            core::hint::spin_loop();
        }
    }

    /// Most recently completed result
    pub fn read_sample(&mut self) -> AdcSample {
        let sample = AdcSample::from_raw(self.converter.data());
        self.latest = Some(sample);
        sample
    }

    /// Start, wait and read in one call
    pub fn read_blocking(&mut self) -> AdcSample {
        self.start_conversion();
        self.wait_for_conversion_complete();
        self.read_sample()
    }

    /// Last sample returned by [`Self::read_sample`], if any
    #[must_use]
    pub const fn latest(&self) -> Option<AdcSample> {
        self.latest
    }

    /// Release the underlying converter
    pub fn release(self) -> C {
        self.converter
    }
}
