//! Control Loop Tests
//!
//! Startup gating, full cycles and the end-to-end board scenarios.
//! Run with: cargo test --target x86_64-unknown-linux-gnu --no-default-features --features std --test control_tests

mod support;

use std::cell::Cell;

use embassy_futures::block_on;
use embedded_hal::digital::ErrorKind;
use sensor_gate::acquisition::Acquisition;
use sensor_gate::actuation::Actuation;
use sensor_gate::config::{Timing, LIGHT_THRESHOLD};
use sensor_gate::control::Controller;
use sensor_gate::drivers::light::LightSensor;
use sensor_gate::drivers::motion::MotionSensor;
use sensor_gate::drivers::ultrasonic::{PulseTiming, UltrasonicSensor};
use sensor_gate::gate::StartupGate;
use sensor_gate::peripheral::adc::AnalogInput;
use sensor_gate::types::{Error, Readings, SystemState};

use support::{Event, EventLog, LogDelay, SimConverter, SimPin};

type Board<'g, 'd> = Controller<
    'g,
    SimPin,
    SimPin,
    SimPin,
    SimConverter,
    SimPin,
    SimPin,
    SimPin,
    LogDelay<'d>,
>;

/// Handles to every simulated signal on the board
struct Wiring {
    log: EventLog,
    motion: SimPin,
    echo: SimPin,
    trigger: SimPin,
    adc: SimConverter,
    pir_led: SimPin,
    us_led: SimPin,
    light_led: SimPin,
}

impl Wiring {
    fn new(sample: u16) -> Self {
        let log = EventLog::new();
        Self {
            motion: SimPin::new("motion", &log),
            echo: SimPin::new("echo", &log),
            trigger: SimPin::new("trigger", &log),
            adc: SimConverter::new(sample, &log),
            pir_led: SimPin::new("pir_led", &log),
            us_led: SimPin::new("us_led", &log),
            light_led: SimPin::new("light_led", &log),
            log,
        }
    }

    fn controller<'g, 'd>(&self, gate: &'g StartupGate, delay: LogDelay<'d>) -> Board<'g, 'd> {
        let timing = Timing::DEFAULT;
        let light =
            AnalogInput::configure(self.adc.clone(), 1, 3).expect("unbound converter");
        let acquisition = Acquisition::new(
            MotionSensor::new(self.motion.clone()),
            UltrasonicSensor::new(
                self.trigger.clone(),
                self.echo.clone(),
                PulseTiming::from_timing(&timing),
            ),
            LightSensor::new(light, LIGHT_THRESHOLD),
        );
        let actuation = Actuation::new(
            self.pir_led.clone(),
            self.us_led.clone(),
            self.light_led.clone(),
        );
        self.log.clear();
        Controller::new(gate, acquisition, actuation, delay, timing)
    }

    fn indicators(&self) -> (Option<bool>, Option<bool>, Option<bool>) {
        (
            self.pir_led.driven(),
            self.us_led.driven(),
            self.light_led.driven(),
        )
    }
}

// =============================================================================
// Startup Tests
// =============================================================================

#[test]
fn scenario_a_no_button_no_cycles() {
    let wiring = Wiring::new(2000);
    wiring.motion.set_input(true);
    let gate = StartupGate::new();
    let trigger = gate.trigger();
    let states = Cell::new(Vec::new());
    // Stands in for a button that stays up for 50 polls, then ends the wait
    let delay = LogDelay::new(&wiring.log).with_hook(|calls| {
        let mut seen = states.take();
        seen.push(gate.state());
        states.set(seen);
        if calls == 50 {
            trigger.fire();
        }
    });
    let mut controller = wiring.controller(&gate, delay);

    block_on(controller.wait_for_start());

    // Every poll saw WAITING; only poll delays happened
    assert_eq!(states.take(), vec![SystemState::Waiting; 50]);
    assert_eq!(wiring.log.delays_us(), vec![100; 50]);
    assert_eq!(wiring.log.events().len(), 50);
    assert_eq!(wiring.indicators(), (None, None, None));
    assert_eq!(controller.cycles(), 0);
    assert_eq!(controller.last_readings(), None);
}

#[test]
fn wait_for_start_after_fire_does_not_delay() {
    let wiring = Wiring::new(2000);
    let gate = StartupGate::new();
    let mut controller = wiring.controller(&gate, LogDelay::new(&wiring.log));

    gate.trigger().fire();
    block_on(controller.wait_for_start());

    assert_eq!(controller.state(), SystemState::Running);
    assert!(wiring.log.is_empty());
}

#[test]
fn wait_for_start_returns_once_button_fires() {
    let wiring = Wiring::new(2000);
    let gate = StartupGate::new();
    let trigger = gate.trigger();
    let delay = LogDelay::new(&wiring.log).with_hook(|calls| {
        if calls == 5 {
            trigger.fire();
        }
    });
    let mut controller = wiring.controller(&gate, delay);

    block_on(controller.wait_for_start());

    assert_eq!(controller.state(), SystemState::Running);
    assert_eq!(wiring.log.delays_us(), vec![100; 5]);
    assert_eq!(wiring.indicators(), (None, None, None));
}

// =============================================================================
// Cycle Tests
// =============================================================================

#[test]
fn scenario_b_motion_no_echo_bright() {
    let wiring = Wiring::new(2000);
    wiring.motion.set_input(true);
    wiring.echo.set_input(false);
    let gate = StartupGate::new();
    gate.trigger().fire();
    let mut controller = wiring.controller(&gate, LogDelay::new(&wiring.log));

    block_on(controller.wait_for_start());
    let readings = block_on(controller.cycle()).expect("sim pins do not fail");

    assert_eq!(
        readings,
        Readings {
            motion_detected: true,
            obstacle_detected: false,
            light_below_threshold: false,
        }
    );
    // motion LED high, ultrasonic LED low, light LED high (off, active-low)
    assert_eq!(wiring.indicators(), (Some(true), Some(false), Some(true)));
}

#[test]
fn scenario_c_dark_turns_light_indicator_on() {
    let wiring = Wiring::new(500);
    let gate = StartupGate::new();
    gate.trigger().fire();
    let mut controller = wiring.controller(&gate, LogDelay::new(&wiring.log));

    let readings = block_on(controller.cycle()).expect("sim pins do not fail");

    assert!(readings.light_below_threshold);
    assert_eq!(wiring.light_led.driven(), Some(false));
}

#[test]
fn cycle_sequence_and_trailing_delay() {
    let wiring = Wiring::new(2000);
    wiring.echo.set_input(true);
    let gate = StartupGate::new();
    gate.trigger().fire();
    let mut controller = wiring.controller(&gate, LogDelay::new(&wiring.log));

    block_on(controller.cycle()).expect("sim pins do not fail");

    assert_eq!(
        wiring.log.events(),
        vec![
            Event::Read("motion", false),
            Event::Write("trigger", true),
            Event::DelayUs(10),
            Event::Write("trigger", false),
            Event::DelayUs(1),
            Event::Read("echo", true),
            Event::AdcStart,
            Event::AdcRead(2000),
            Event::Write("light_led", true),
            Event::Write("pir_led", false),
            Event::Write("us_led", true),
            Event::DelayUs(10),
        ]
    );
    assert_eq!(controller.cycles(), 1);
}

#[test]
fn repeated_cycles_with_unchanged_inputs_are_identical() {
    let wiring = Wiring::new(800);
    wiring.motion.set_input(true);
    let gate = StartupGate::new();
    gate.trigger().fire();
    let mut controller = wiring.controller(&gate, LogDelay::new(&wiring.log));

    let first = block_on(controller.cycle()).expect("sim pins do not fail");
    let first_events = wiring.log.events();
    let first_indicators = wiring.indicators();

    for _ in 0..10 {
        wiring.log.clear();
        assert_eq!(block_on(controller.cycle()), Ok(first));
        assert_eq!(wiring.log.events(), first_events);
        assert_eq!(wiring.indicators(), first_indicators);
    }

    assert_eq!(controller.cycles(), 11);
    assert_eq!(controller.last_readings(), Some(first));
}

#[test]
fn readings_follow_changing_inputs() {
    let wiring = Wiring::new(3000);
    let gate = StartupGate::new();
    gate.trigger().fire();
    let mut controller = wiring.controller(&gate, LogDelay::new(&wiring.log));

    assert_eq!(block_on(controller.cycle()), Ok(Readings::NONE));

    wiring.motion.set_input(true);
    wiring.adc.set_sample(LIGHT_THRESHOLD);
    let readings = block_on(controller.cycle()).expect("sim pins do not fail");
    assert!(readings.motion_detected);
    assert!(readings.light_below_threshold);
    assert_eq!(wiring.indicators(), (Some(true), Some(false), Some(false)));

    wiring.motion.set_input(false);
    wiring.adc.set_sample(LIGHT_THRESHOLD + 1);
    assert_eq!(block_on(controller.cycle()), Ok(Readings::NONE));
    assert_eq!(wiring.indicators(), (Some(false), Some(false), Some(true)));
}

#[test]
fn failed_cycle_still_delays_and_recovers() {
    let wiring = Wiring::new(2000);
    let gate = StartupGate::new();
    gate.trigger().fire();
    let mut controller = wiring.controller(&gate, LogDelay::new(&wiring.log));

    wiring.echo.set_failing(true);
    let result = block_on(controller.cycle());

    assert_eq!(result, Err(Error::Gpio(ErrorKind::Other)));
    assert_eq!(wiring.log.delays_us(), vec![10, 1, 10]);
    assert_eq!(wiring.indicators(), (None, None, None));
    assert_eq!(controller.cycles(), 1);
    assert_eq!(controller.last_readings(), None);

    wiring.echo.set_failing(false);
    assert!(block_on(controller.cycle()).is_ok());
    assert_eq!(controller.cycles(), 2);
}

#[test]
fn light_sample_retained_between_cycles() {
    let wiring = Wiring::new(1500);
    let gate = StartupGate::new();
    gate.trigger().fire();
    let mut controller = wiring.controller(&gate, LogDelay::new(&wiring.log));

    block_on(controller.cycle()).expect("sim pins do not fail");

    let latest = controller.acquisition().latest_light_sample();
    assert_eq!(latest.map(|s| s.raw()), Some(1500));
}
