//! GPIO Configuration
//!
//! Puts each board pin into the mode its [`PinRole`] requires. The
//! returned embassy pins implement the `embedded-hal` digital traits with
//! an `Infallible` error, so reads and writes through
//! [`crate::peripheral::gpio`] cannot fail on hardware.

use embassy_stm32::adc::{AdcChannel, AnyAdcChannel};
use embassy_stm32::gpio::{Input, Level, Output, Pin, Pull as GpioPull, Speed};
use embassy_stm32::peripherals::ADC1;
use embassy_stm32::Peripheral;

use crate::types::{PinMode, PinRole, Pull};

/// Embassy pull setting for a pull mode
#[must_use]
pub const fn gpio_pull(pull: Pull) -> GpioPull {
    match pull {
        Pull::None => GpioPull::None,
        Pull::Up => GpioPull::Up,
        Pull::Down => GpioPull::Down,
    }
}

/// Pull the role's input configuration calls for
#[must_use]
pub const fn pull_for(role: PinRole) -> GpioPull {
    match role.mode() {
        PinMode::Input(pull) => gpio_pull(pull),
        PinMode::Output | PinMode::Analog => GpioPull::None,
    }
}

/// Configure `pin` as a digital input for `role`
pub fn configure_input<'d>(role: PinRole, pin: impl Peripheral<P = impl Pin> + 'd) -> Input<'d> {
    debug!("gpio: {} ({}) input", role, role.pin());
    Input::new(pin, pull_for(role))
}

/// Configure `pin` as a push-pull output for `role`
///
/// Outputs start low, the reset value of the output data register.
pub fn configure_output<'d>(role: PinRole, pin: impl Peripheral<P = impl Pin> + 'd) -> Output<'d> {
    debug!("gpio: {} ({}) output", role, role.pin());
    Output::new(pin, Level::Low, Speed::Low)
}

/// Configure `pin` as an analog input routed to ADC1
pub fn configure_analog(role: PinRole, pin: impl AdcChannel<ADC1>) -> AnyAdcChannel<ADC1> {
    debug!("gpio: {} ({}) analog", role, role.pin());
    pin.degrade_adc()
}

/// Configured sensor and indicator pins
pub struct BoardPins<'d> {
    /// PIR motion input
    pub motion: Input<'d>,
    /// Ultrasonic trigger output
    pub trigger: Output<'d>,
    /// Ultrasonic echo input
    pub echo: Input<'d>,
    /// Motion indicator
    pub pir_led: Output<'d>,
    /// Obstacle indicator
    pub ultrasonic_led: Output<'d>,
    /// Darkness indicator
    pub light_led: Output<'d>,
}

impl<'d> BoardPins<'d> {
    /// Configure every digital sensor and indicator pin
    #[must_use]
    pub fn configure(
        motion: impl Peripheral<P = impl Pin> + 'd,
        trigger: impl Peripheral<P = impl Pin> + 'd,
        echo: impl Peripheral<P = impl Pin> + 'd,
        pir_led: impl Peripheral<P = impl Pin> + 'd,
        ultrasonic_led: impl Peripheral<P = impl Pin> + 'd,
        light_led: impl Peripheral<P = impl Pin> + 'd,
    ) -> Self {
        Self {
            motion: configure_input(PinRole::MotionInput, motion),
            trigger: configure_output(PinRole::UltrasonicTrigger, trigger),
            echo: configure_input(PinRole::UltrasonicEcho, echo),
            pir_led: configure_output(PinRole::PirLed, pir_led),
            ultrasonic_led: configure_output(PinRole::UltrasonicLed, ultrasonic_led),
            light_led: configure_output(PinRole::LightLed, light_led),
        }
    }
}
