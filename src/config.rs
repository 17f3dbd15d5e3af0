//! System configuration and hardware constants
//!
//! Compile-time constants for the sensor gate board. Pin mappings, the
//! light threshold, ADC setup and the fixed control-loop timing are
//! centralized here. Nothing in this module changes at runtime.

use crate::types::Edge;

/// Light threshold on the 12-bit scale
///
/// A sample at or below this value counts as "dark".
pub const LIGHT_THRESHOLD: u16 = 1024;

/// Largest 12-bit ADC value
pub const ADC_MAX: u16 = 4095;

/// ADC conversion resolution
pub const ADC_RESOLUTION_BITS: u8 = 12;

/// ADC reference voltage
pub const ADC_VREF_VOLTS: f32 = 3.3;

/// ADC channel the light sensor is wired to (PA1 = ADC1_IN1)
pub const LIGHT_ADC_CHANNEL: u8 = 1;

/// Light sensor sample time in ADC clock cycles (the STM32F4 minimum)
pub const LIGHT_SAMPLE_CYCLES: u16 = 3;

/// EXTI line bound to the start button
pub const START_EXTI_LINE: u8 = 0;

/// Edge the start button triggers on (pressed pulls the line low)
pub const START_EDGE: Edge = Edge::Falling;

/// Number of EXTI lines shared by the GPIO ports
pub const EXTI_LINE_COUNT: u8 = 16;

/// Fixed delays of the control loop, in microseconds
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timing {
    /// Pause between polls of the startup gate
    pub startup_poll_us: u32,
    /// Time the ultrasonic trigger is held high
    pub trigger_pulse_us: u32,
    /// Pause after the trigger falls before the echo is sampled
    pub echo_settle_us: u32,
    /// Pause at the end of every control cycle
    pub cycle_delay_us: u32,
}

impl Timing {
    /// Board timing
    pub const DEFAULT: Self = Self {
        startup_poll_us: 100,
        trigger_pulse_us: 10,
        echo_settle_us: 1,
        cycle_delay_us: 10,
    };
}

impl Default for Timing {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Timing {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "Timing(poll={}us, pulse={}us, settle={}us, cycle={}us)",
            self.startup_poll_us,
            self.trigger_pulse_us,
            self.echo_settle_us,
            self.cycle_delay_us
        );
    }
}

/// Pin assignments for GPIO
pub mod pins {
    //! GPIO pin assignments matching the wiring (all on GPIOA)

    use crate::types::PinId;

    /// Start push button, pull-up, falling edge on EXTI0
    pub const BUTTON: PinId = PinId::new('A', 0);

    /// Light-dependent resistor divider (ADC1_IN1)
    pub const LIGHT_SENSOR: PinId = PinId::new('A', 1);

    /// Motion indicator LED
    pub const PIR_LED: PinId = PinId::new('A', 2);

    /// PIR motion sensor output
    pub const MOTION: PinId = PinId::new('A', 3);

    /// Ultrasonic trigger
    pub const ULTRASONIC_TRIGGER: PinId = PinId::new('A', 4);

    /// Ultrasonic echo
    pub const ULTRASONIC_ECHO: PinId = PinId::new('A', 5);

    /// Obstacle indicator LED
    pub const ULTRASONIC_LED: PinId = PinId::new('A', 7);

    /// Darkness indicator LED (active low)
    pub const LIGHT_LED: PinId = PinId::new('A', 10);
}
