//! Host-side test doubles shared by the integration tests.
//!
//! Every double writes into one [`EventLog`] so tests can assert the exact
//! order of pin accesses, delays and ADC operations within a cycle.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use embedded_hal::digital::{ErrorKind, ErrorType, InputPin, OutputPin};
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::digital::Wait;

use sensor_gate::peripheral::adc::{ConversionMode, Converter};

/// Something a test double observed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// Input pin read (name, level returned)
    Read(&'static str, bool),
    /// Output pin written (name, level written)
    Write(&'static str, bool),
    /// `delay_us` call
    DelayUs(u32),
    /// `delay_ns` call
    DelayNs(u32),
    /// ADC start bit set
    AdcStart,
    /// ADC data register read
    AdcRead(u16),
}

/// Shared, ordered event record
#[derive(Clone, Default)]
pub struct EventLog(Rc<RefCell<Vec<Event>>>);

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: Event) {
        self.0.borrow_mut().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Levels written to the named pin, in order
    pub fn writes_to(&self, name: &str) -> Vec<bool> {
        self.0
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Event::Write(n, level) if *n == name => Some(*level),
                _ => None,
            })
            .collect()
    }

    /// Microsecond delays, in order
    pub fn delays_us(&self) -> Vec<u32> {
        self.0
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Event::DelayUs(us) => Some(*us),
                _ => None,
            })
            .collect()
    }

    /// Position of the first event matching `pred`
    pub fn position(&self, pred: impl Fn(&Event) -> bool) -> Option<usize> {
        self.0.borrow().iter().position(pred)
    }
}

/// Pin error raised by a [`SimPin`] set to fail
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimError;

impl embedded_hal::digital::Error for SimError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Simulated GPIO pin usable as input or output
#[derive(Clone)]
pub struct SimPin {
    name: &'static str,
    input: Rc<Cell<bool>>,
    driven: Rc<Cell<Option<bool>>>,
    failing: Rc<Cell<bool>>,
    log: EventLog,
}

impl SimPin {
    pub fn new(name: &'static str, log: &EventLog) -> Self {
        Self {
            name,
            input: Rc::new(Cell::new(false)),
            driven: Rc::new(Cell::new(None)),
            failing: Rc::new(Cell::new(false)),
            log: log.clone(),
        }
    }

    /// Set the level the pin reads as
    pub fn set_input(&self, high: bool) {
        self.input.set(high);
    }

    /// Last level written, `None` if never written
    pub fn driven(&self) -> Option<bool> {
        self.driven.get()
    }

    /// Make every access fail until cleared
    pub fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }
}

impl ErrorType for SimPin {
    type Error = SimError;
}

impl InputPin for SimPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        if self.failing.get() {
            return Err(SimError);
        }
        let level = self.input.get();
        self.log.push(Event::Read(self.name, level));
        Ok(level)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

impl OutputPin for SimPin {
    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.write(true)
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.write(false)
    }
}

impl SimPin {
    fn write(&mut self, high: bool) -> Result<(), SimError> {
        if self.failing.get() {
            return Err(SimError);
        }
        self.driven.set(Some(high));
        self.log.push(Event::Write(self.name, high));
        Ok(())
    }
}

/// Simulated ADC
///
/// Returns queued samples first, then the fixed sample. End of conversion
/// is reported after `busy_polls` status reads following each start.
#[derive(Clone)]
pub struct SimConverter {
    sample: Rc<Cell<u16>>,
    queued: Rc<RefCell<VecDeque<u16>>>,
    configured: Rc<Cell<Option<(u8, u16, ConversionMode)>>>,
    starts: Rc<Cell<u32>>,
    status_polls: Rc<Cell<u32>>,
    busy_polls: u32,
    remaining: u32,
    bound: Option<u8>,
    log: EventLog,
}

impl SimConverter {
    pub fn new(sample: u16, log: &EventLog) -> Self {
        Self {
            sample: Rc::new(Cell::new(sample)),
            queued: Rc::new(RefCell::new(VecDeque::new())),
            configured: Rc::new(Cell::new(None)),
            starts: Rc::new(Cell::new(0)),
            status_polls: Rc::new(Cell::new(0)),
            busy_polls: 0,
            remaining: 0,
            bound: None,
            log: log.clone(),
        }
    }

    pub fn with_busy_polls(mut self, polls: u32) -> Self {
        self.busy_polls = polls;
        self
    }

    /// Wire the converter to one channel
    pub fn bound_to(mut self, channel: u8) -> Self {
        self.bound = Some(channel);
        self
    }

    pub fn set_sample(&self, sample: u16) {
        self.sample.set(sample);
    }

    pub fn queue(&self, sample: u16) {
        self.queued.borrow_mut().push_back(sample);
    }

    pub fn configured(&self) -> Option<(u8, u16, ConversionMode)> {
        self.configured.get()
    }

    pub fn starts(&self) -> u32 {
        self.starts.get()
    }

    pub fn status_polls(&self) -> u32 {
        self.status_polls.get()
    }
}

impl Converter for SimConverter {
    fn configure(&mut self, channel: u8, sample_cycles: u16, mode: ConversionMode) {
        self.configured.set(Some((channel, sample_cycles, mode)));
    }

    fn start_conversion(&mut self) {
        self.starts.set(self.starts.get() + 1);
        self.remaining = self.busy_polls;
        self.log.push(Event::AdcStart);
    }

    fn end_of_conversion(&mut self) -> bool {
        self.status_polls.set(self.status_polls.get() + 1);
        if self.remaining == 0 {
            true
        } else {
            self.remaining -= 1;
            false
        }
    }

    fn data(&mut self) -> u16 {
        let value = self
            .queued
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| self.sample.get());
        self.log.push(Event::AdcRead(value));
        value
    }

    fn bound_channel(&self) -> Option<u8> {
        self.bound
    }
}

/// Delay that records every call and optionally runs a hook
pub struct LogDelay<'a> {
    log: EventLog,
    hook: Option<Box<dyn FnMut(u32) + 'a>>,
}

impl<'a> LogDelay<'a> {
    pub fn new(log: &EventLog) -> Self {
        Self {
            log: log.clone(),
            hook: None,
        }
    }

    /// Run `hook` with the call count after every `delay_us`
    pub fn with_hook(mut self, hook: impl FnMut(u32) + 'a) -> Self {
        self.hook = Some(Box::new(hook));
        self
    }
}

impl DelayNs for LogDelay<'_> {
    async fn delay_ns(&mut self, ns: u32) {
        self.log.push(Event::DelayNs(ns));
    }

    async fn delay_us(&mut self, us: u32) {
        self.log.push(Event::DelayUs(us));
        let calls = self.log.delays_us().len() as u32;
        if let Some(hook) = self.hook.as_mut() {
            hook(calls);
        }
    }
}

/// Simulated interrupt-capable input
///
/// Each wait consumes one scripted outcome; `true` means the edge fired,
/// `false` means the wait failed.
pub struct SimButton {
    script: VecDeque<bool>,
    waited: Rc<RefCell<Vec<&'static str>>>,
}

impl SimButton {
    pub fn new(script: &[bool]) -> Self {
        Self {
            script: script.iter().copied().collect(),
            waited: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn waits(&self) -> Rc<RefCell<Vec<&'static str>>> {
        self.waited.clone()
    }

    fn wait(&mut self, kind: &'static str) -> Result<(), SimError> {
        self.waited.borrow_mut().push(kind);
        match self.script.pop_front() {
            Some(true) => Ok(()),
            _ => Err(SimError),
        }
    }
}

impl ErrorType for SimButton {
    type Error = SimError;
}

impl Wait for SimButton {
    async fn wait_for_high(&mut self) -> Result<(), Self::Error> {
        self.wait("high")
    }

    async fn wait_for_low(&mut self) -> Result<(), Self::Error> {
        self.wait("low")
    }

    async fn wait_for_rising_edge(&mut self) -> Result<(), Self::Error> {
        self.wait("rising")
    }

    async fn wait_for_falling_edge(&mut self) -> Result<(), Self::Error> {
        self.wait("falling")
    }

    async fn wait_for_any_edge(&mut self) -> Result<(), Self::Error> {
        self.wait("any")
    }
}
