//! ADC Adapter
//!
//! [`Converter`] over embassy-stm32's ADC1 driver.
//!
//! Embassy exposes single blocking conversions only, so this adapter runs
//! one conversion per start request and latches its result until read.
//! Continuous mode therefore degrades to one fresh conversion per control
//! cycle.

use embassy_stm32::adc::{Adc, AdcChannel, AnyAdcChannel, SampleTime};
use embassy_stm32::peripherals::ADC1;
use embassy_stm32::Peripheral;

use crate::hal::gpio::configure_analog;
use crate::peripheral::adc::{ConversionMode, Converter};
use crate::types::PinRole;

/// Shortest supported sample time covering `cycles`
#[must_use]
pub const fn sample_time(cycles: u16) -> SampleTime {
    match cycles {
        0..=3 => SampleTime::CYCLES3,
        4..=15 => SampleTime::CYCLES15,
        16..=28 => SampleTime::CYCLES28,
        29..=56 => SampleTime::CYCLES56,
        57..=84 => SampleTime::CYCLES84,
        85..=112 => SampleTime::CYCLES112,
        113..=144 => SampleTime::CYCLES144,
        _ => SampleTime::CYCLES480,
    }
}

/// ADC1 with one analog channel
pub struct Stm32Converter<'d> {
    adc: Adc<'d, ADC1>,
    channel: AnyAdcChannel<ADC1>,
    bound: Option<u8>,
    mode: ConversionMode,
    data: u16,
    ready: bool,
}

impl<'d> Stm32Converter<'d> {
    /// Enable ADC1 and put the pin wired to `role` into analog mode
    ///
    /// The channel number the driver later asks for is checked against the
    /// one the board map assigns to `role`.
    #[must_use]
    pub fn new(
        adc: impl Peripheral<P = ADC1> + 'd,
        role: PinRole,
        pin: impl AdcChannel<ADC1>,
    ) -> Self {
        Self {
            adc: Adc::new(adc),
            channel: configure_analog(role, pin),
            bound: role.pin().adc_channel(),
            mode: ConversionMode::Single,
            data: 0,
            ready: false,
        }
    }

    /// Mode requested by the driver
    #[must_use]
    pub const fn mode(&self) -> ConversionMode {
        self.mode
    }
}

impl Converter for Stm32Converter<'_> {
    fn configure(&mut self, channel: u8, sample_cycles: u16, mode: ConversionMode) {
        self.adc.set_sample_time(sample_time(sample_cycles));
        self.mode = mode;
        self.ready = false;
        debug!("adc1: IN{} {} mode", channel, mode);
    }

    fn start_conversion(&mut self) {
        self.data = self.adc.blocking_read(&mut self.channel);
        self.ready = true;
    }

    fn end_of_conversion(&mut self) -> bool {
        self.ready
    }

    fn data(&mut self) -> u16 {
        self.ready = false;
        self.data
    }

    fn bound_channel(&self) -> Option<u8> {
        self.bound
    }
}
