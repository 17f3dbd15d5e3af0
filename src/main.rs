//! Sensor Gate Main Application
//!
//! Entry point for the STM32F411 sensor gate firmware.
//! Configures the pins, the light ADC channel and the start button line,
//! then hands control to the sensing loop once the button is pressed.

#![no_std]
#![no_main]

use defmt::{error, info};
use embassy_executor::Spawner;
use embassy_stm32::exti::ExtiInput;
use embassy_time::Delay;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use sensor_gate::acquisition::Acquisition;
use sensor_gate::actuation::Actuation;
use sensor_gate::config::{
    Timing, LIGHT_ADC_CHANNEL, LIGHT_SAMPLE_CYCLES, LIGHT_THRESHOLD, START_EDGE,
};
use sensor_gate::control::Controller;
use sensor_gate::drivers::light::LightSensor;
use sensor_gate::drivers::motion::MotionSensor;
use sensor_gate::drivers::ultrasonic::{PulseTiming, UltrasonicSensor};
use sensor_gate::gate::{StartTrigger, StartupGate};
use sensor_gate::hal::adc::Stm32Converter;
use sensor_gate::hal::exti::start_button;
use sensor_gate::hal::gpio::{pull_for, BoardPins};
use sensor_gate::peripheral::adc::AnalogInput;
use sensor_gate::peripheral::exti::EdgeInterrupt;
use sensor_gate::types::PinRole;

static GATE: StaticCell<StartupGate> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Sensor Gate Firmware v{}", env!("CARGO_PKG_VERSION"));

    // Default clock tree; embassy enables the GPIOA, ADC1 and SYSCFG clocks
    // as the drivers below are created.
    let p = embassy_stm32::init(embassy_stm32::Config::default());

    info!("Peripherals initialized");

    let pins = BoardPins::configure(p.PA3, p.PA4, p.PA5, p.PA2, p.PA7, p.PA10);

    // Light sensor on PA1 = ADC1_IN1
    let converter = Stm32Converter::new(p.ADC1, PinRole::LightAnalogInput, p.PA1);
    let light_input =
        match AnalogInput::configure(converter, LIGHT_ADC_CHANNEL, LIGHT_SAMPLE_CYCLES) {
            Ok(input) => input,
            Err(e) => defmt::panic!("light sensor ADC setup failed: {}", e),
        };

    info!("ADC1 initialized, threshold {}", LIGHT_THRESHOLD);

    let gate: &'static StartupGate = GATE.init(StartupGate::new());

    // Start button on PA0 / EXTI0
    let button = ExtiInput::new(p.PA0, p.EXTI0, pull_for(PinRole::ButtonInput));
    let line = match start_button(button) {
        Ok(line) => line,
        Err(e) => defmt::panic!("start button routing failed: {}", e),
    };

    spawner.spawn(start_button_task(line, gate.trigger())).unwrap();

    let timing = Timing::DEFAULT;
    info!("{}", timing);

    let acquisition = Acquisition::new(
        MotionSensor::new(pins.motion),
        UltrasonicSensor::new(pins.trigger, pins.echo, PulseTiming::from_timing(&timing)),
        LightSensor::new(light_input, LIGHT_THRESHOLD),
    );
    let actuation = Actuation::new(pins.pir_led, pins.ultrasonic_led, pins.light_led);

    Controller::new(gate, acquisition, actuation, Delay, timing)
        .run()
        .await;
}

/// Start button task - opens the startup gate on the button edge
#[embassy_executor::task]
async fn start_button_task(
    line: EdgeInterrupt<ExtiInput<'static>>,
    trigger: StartTrigger<'static>,
) {
    let armed = line.enable(START_EDGE).on_triggered(move || {
        if trigger.fire() {
            info!("Start button pressed");
        }
    });

    let e = armed.run().await;
    error!("Start button line stopped: {}", e);
}
