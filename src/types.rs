//! Shared types used across the sensor gate firmware
//!
//! Domain types for the startup state machine, per-cycle sensor readings,
//! 12-bit analog samples and the fixed pin roles of the board.

use core::fmt;

use embedded_hal::digital::ErrorKind;

/// Top-level system state
///
/// Starts in [`SystemState::Waiting`] and moves to [`SystemState::Running`]
/// exactly once, when the start button edge fires. `Running` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SystemState {
    /// Waiting for the start button
    #[default]
    Waiting,
    /// Control loop is active
    Running,
}

impl SystemState {
    /// Check if the control loop may run
    #[must_use]
    pub const fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for SystemState {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Waiting => defmt::write!(f, "WAITING"),
            Self::Running => defmt::write!(f, "RUNNING"),
        }
    }
}

/// Detections produced by one acquisition cycle
///
/// Built fresh every cycle and fully determines that cycle's indicator
/// outputs. No field depends on another.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Readings {
    /// Motion input was high at the poll instant
    pub motion_detected: bool,
    /// Echo line was asserted at the single sample instant after the trigger
    pub obstacle_detected: bool,
    /// Light sample was at or below the threshold
    pub light_below_threshold: bool,
}

impl Readings {
    /// Nothing detected
    pub const NONE: Self = Self {
        motion_detected: false,
        obstacle_detected: false,
        light_below_threshold: false,
    };

    /// Check if any channel detected something
    #[must_use]
    pub const fn any(&self) -> bool {
        self.motion_detected || self.obstacle_detected || self.light_below_threshold
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Readings {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "Readings(motion={}, obstacle={}, dark={})",
            self.motion_detected,
            self.obstacle_detected,
            self.light_below_threshold
        );
    }
}

/// 12-bit analog sample (0-4095)
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct AdcSample(u16);

impl AdcSample {
    /// Largest value a 12-bit conversion can produce
    pub const MAX: u16 = 0x0FFF;

    /// Create a sample from a raw data register value
    ///
    /// Only the low 12 bits are kept, matching a right-aligned 12-bit result.
    #[must_use]
    pub const fn from_raw(raw: u16) -> Self {
        Self(raw & Self::MAX)
    }

    /// Get the raw 12-bit value
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Check whether the sample is at or below `threshold`
    #[must_use]
    pub const fn is_below(self, threshold: u16) -> bool {
        self.0 <= threshold
    }

    /// Convert to voltage for the given reference
    #[must_use]
    pub fn as_voltage(self, vref: f32) -> f32 {
        (f32::from(self.0) / f32::from(Self::MAX)) * vref
    }
}

impl fmt::Debug for AdcSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AdcSample({})", self.0)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for AdcSample {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "ADC({})", self.0);
    }
}

/// Electrical level of a digital pin
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    /// Logic low
    Low,
    /// Logic high
    High,
}

impl Level {
    /// Level from a boolean (`true` is high)
    #[must_use]
    pub const fn from_bool(high: bool) -> Self {
        if high {
            Self::High
        } else {
            Self::Low
        }
    }

    /// Check if this is the high level
    #[must_use]
    pub const fn is_high(self) -> bool {
        matches!(self, Self::High)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Level {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Low => defmt::write!(f, "LOW"),
            Self::High => defmt::write!(f, "HIGH"),
        }
    }
}

/// Which level means "on" for an output
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Polarity {
    /// High level is on
    ActiveHigh,
    /// Low level is on
    ActiveLow,
}

impl Polarity {
    /// Level to drive for the given logical state
    #[must_use]
    pub const fn level_for(self, active: bool) -> Level {
        match self {
            Self::ActiveHigh => Level::from_bool(active),
            Self::ActiveLow => Level::from_bool(!active),
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Polarity {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::ActiveHigh => defmt::write!(f, "active-high"),
            Self::ActiveLow => defmt::write!(f, "active-low"),
        }
    }
}

/// Input pull resistor configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pull {
    /// Floating input
    None,
    /// Internal pull-up
    Up,
    /// Internal pull-down
    Down,
}

/// Signal edge an interrupt line triggers on
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    /// Low-to-high transition
    Rising,
    /// High-to-low transition
    Falling,
}

#[cfg(feature = "embedded")]
impl defmt::Format for Edge {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Rising => defmt::write!(f, "rising"),
            Self::Falling => defmt::write!(f, "falling"),
        }
    }
}

/// Pin configuration a role requires
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PinMode {
    /// Digital input with the given pull
    Input(Pull),
    /// Push-pull digital output
    Output,
    /// Analog input routed to the ADC
    Analog,
}

/// Physical pin on the MCU (port letter and pin number)
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PinId {
    /// GPIO port letter (`'A'`, `'B'`, ...)
    pub port: char,
    /// Pin number within the port (0-15)
    pub number: u8,
}

impl PinId {
    /// Create a pin identifier
    #[must_use]
    pub const fn new(port: char, number: u8) -> Self {
        Self { port, number }
    }

    /// ADC1 input channel multiplexed onto this pin, if any
    ///
    /// STM32F411 map: PA0-PA7 are IN0-IN7, PB0-PB1 are IN8-IN9 and
    /// PC0-PC5 are IN10-IN15.
    #[must_use]
    pub const fn adc_channel(self) -> Option<u8> {
        match (self.port, self.number) {
            ('A', n @ 0..=7) => Some(n),
            ('B', n @ 0..=1) => Some(n + 8),
            ('C', n @ 0..=5) => Some(n + 10),
            _ => None,
        }
    }
}

impl fmt::Debug for PinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}{}", self.port, self.number)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for PinId {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "P{}{}", self.port, self.number);
    }
}

/// Signal roles wired to the board
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PinRole {
    /// Start push button (falling edge, pull-up)
    ButtonInput,
    /// PIR motion sensor output
    MotionInput,
    /// Ultrasonic trigger output
    UltrasonicTrigger,
    /// Ultrasonic echo input
    UltrasonicEcho,
    /// Light-dependent resistor divider
    LightAnalogInput,
    /// Motion indicator
    PirLed,
    /// Obstacle indicator
    UltrasonicLed,
    /// Darkness indicator
    LightLed,
}

impl PinRole {
    /// All roles, in pin configuration order
    pub const ALL: [Self; 8] = [
        Self::ButtonInput,
        Self::MotionInput,
        Self::UltrasonicTrigger,
        Self::UltrasonicEcho,
        Self::LightAnalogInput,
        Self::PirLed,
        Self::UltrasonicLed,
        Self::LightLed,
    ];

    /// Physical pin for this role
    #[must_use]
    pub const fn pin(self) -> PinId {
        use crate::config::pins;

        match self {
            Self::ButtonInput => pins::BUTTON,
            Self::MotionInput => pins::MOTION,
            Self::UltrasonicTrigger => pins::ULTRASONIC_TRIGGER,
            Self::UltrasonicEcho => pins::ULTRASONIC_ECHO,
            Self::LightAnalogInput => pins::LIGHT_SENSOR,
            Self::PirLed => pins::PIR_LED,
            Self::UltrasonicLed => pins::ULTRASONIC_LED,
            Self::LightLed => pins::LIGHT_LED,
        }
    }

    /// Configuration the role requires
    #[must_use]
    pub const fn mode(self) -> PinMode {
        match self {
            Self::ButtonInput => PinMode::Input(Pull::Up),
            Self::MotionInput | Self::UltrasonicEcho => PinMode::Input(Pull::None),
            Self::LightAnalogInput => PinMode::Analog,
            Self::UltrasonicTrigger | Self::PirLed | Self::UltrasonicLed | Self::LightLed => {
                PinMode::Output
            }
        }
    }

    /// Indicator polarity, `None` for roles that are not indicators
    ///
    /// The light indicator is wired active-low, the other two active-high.
    #[must_use]
    pub const fn polarity(self) -> Option<Polarity> {
        match self {
            Self::PirLed | Self::UltrasonicLed => Some(Polarity::ActiveHigh),
            Self::LightLed => Some(Polarity::ActiveLow),
            _ => None,
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for PinRole {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::ButtonInput => defmt::write!(f, "button"),
            Self::MotionInput => defmt::write!(f, "motion"),
            Self::UltrasonicTrigger => defmt::write!(f, "us-trigger"),
            Self::UltrasonicEcho => defmt::write!(f, "us-echo"),
            Self::LightAnalogInput => defmt::write!(f, "light"),
            Self::PirLed => defmt::write!(f, "pir-led"),
            Self::UltrasonicLed => defmt::write!(f, "us-led"),
            Self::LightLed => defmt::write!(f, "light-led"),
        }
    }
}

/// Firmware error
///
/// Hardware on the STM32 adapters cannot fail; these only surface through
/// generic pin implementations or EXTI and ADC misconfiguration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// Digital pin read or write failed
    Gpio(ErrorKind),
    /// Waiting for an interrupt edge failed
    Edge(ErrorKind),
    /// EXTI line index outside 0-15
    LineOutOfRange(u8),
    /// EXTI line does not match the pin number it was routed to
    LineMismatch {
        /// Requested line
        line: u8,
        /// Pin number the line was bound to
        pin: u8,
    },
    /// ADC channel requested differs from the channel the converter owns
    ChannelMismatch {
        /// Requested channel
        requested: u8,
        /// Channel wired to the converter
        bound: u8,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpio(kind) => write!(f, "gpio error: {kind}"),
            Self::Edge(kind) => write!(f, "edge wait error: {kind}"),
            Self::LineOutOfRange(line) => write!(f, "EXTI line {line} out of range"),
            Self::LineMismatch { line, pin } => {
                write!(f, "EXTI line {line} cannot be routed to pin {pin}")
            }
            Self::ChannelMismatch { requested, bound } => {
                write!(f, "ADC channel {requested} requested, converter owns {bound}")
            }
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Gpio(_) => defmt::write!(f, "GpioError"),
            Self::Edge(_) => defmt::write!(f, "EdgeError"),
            Self::LineOutOfRange(line) => defmt::write!(f, "LineOutOfRange({})", line),
            Self::LineMismatch { line, pin } => {
                defmt::write!(f, "LineMismatch(line={}, pin={})", line, pin);
            }
            Self::ChannelMismatch { requested, bound } => {
                defmt::write!(f, "ChannelMismatch(requested={}, bound={})", requested, bound);
            }
        }
    }
}

/// Result of a firmware operation
pub type SenseResult<T> = Result<T, Error>;
