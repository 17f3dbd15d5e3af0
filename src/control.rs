//! Control Loop
//!
//! Waits for the startup gate to open, then runs acquisition and
//! actuation forever:
//!
//! ```text
//! WAITING ──(button edge)──► RUNNING
//!    ▲  │                       │
//!    └──┘ poll + delay          ▼
//!                     acquire ─► actuate ─► delay
//!                        ▲                    │
//!                        └────────────────────┘
//! ```
//!
//! One cycle never overlaps another. Every delay is the fixed value from
//! [`Timing`].

use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal_async::delay::DelayNs;

use crate::acquisition::Acquisition;
use crate::actuation::{Actuation, IndicatorLevels};
use crate::config::Timing;
use crate::gate::StartupGate;
use crate::peripheral::adc::Converter;
use crate::types::{Readings, SenseResult, SystemState};

/// Sensor-to-indicator controller
pub struct Controller<'g, M, T, E, C, A, B, L, D>
where
    C: Converter,
{
    gate: &'g StartupGate,
    acquisition: Acquisition<M, T, E, C>,
    actuation: Actuation<A, B, L>,
    delay: D,
    timing: Timing,
    last: Option<Readings>,
    cycles: u32,
}

impl<'g, M, T, E, C, A, B, L, D> Controller<'g, M, T, E, C, A, B, L, D>
where
    M: InputPin,
    T: OutputPin,
    E: InputPin,
    C: Converter,
    A: OutputPin,
    B: OutputPin,
    L: OutputPin,
    D: DelayNs,
{
    /// Create the controller
    #[must_use]
    pub const fn new(
        gate: &'g StartupGate,
        acquisition: Acquisition<M, T, E, C>,
        actuation: Actuation<A, B, L>,
        delay: D,
        timing: Timing,
    ) -> Self {
        Self {
            gate,
            acquisition,
            actuation,
            delay,
            timing,
            last: None,
            cycles: 0,
        }
    }

    /// Observed system state
    #[must_use]
    pub fn state(&self) -> SystemState {
        self.gate.state()
    }

    /// Block until the start button has opened the gate
    ///
    /// Polls the gate with the startup poll delay in between. No sensor or
    /// indicator is touched while waiting.
    pub async fn wait_for_start(&mut self) {
        info!("waiting for start button");
        let polls = self
            .gate
            .wait_until_running(&mut self.delay, self.timing.startup_poll_us)
            .await;
        info!("started after {} polls", polls);
    }

    /// Run one acquisition + actuation cycle followed by the cycle delay
    ///
    /// # Errors
    ///
    /// Returns the first pin error of the cycle. The cycle delay is still
    /// observed so a failing pin cannot turn the loop into a tight spin.
    pub async fn cycle(&mut self) -> SenseResult<Readings> {
        let result = self.sense_and_drive().await;
        self.cycles = self.cycles.wrapping_add(1);
        self.delay.delay_us(self.timing.cycle_delay_us).await;
        result.map(|(readings, _)| readings)
    }

    async fn sense_and_drive(&mut self) -> SenseResult<(Readings, IndicatorLevels)> {
        let readings = self.acquisition.acquire(&mut self.delay).await?;
        let levels = self.actuation.apply(&readings)?;

        if self.last != Some(readings) {
            debug!("cycle {}: {} -> {}", self.cycles, readings, levels);
            self.last = Some(readings);
        }

        Ok((readings, levels))
    }

    /// Wait for start, then cycle forever
    ///
    /// Never returns; a failed cycle is logged and the loop continues.
    pub async fn run(mut self) {
        self.wait_for_start().await;
        info!("control loop running");

        loop {
            if let Err(e) = self.cycle().await {
                warn!("cycle {} failed: {}", self.cycles, e);
            }
        }
    }

    /// Number of completed cycles
    #[must_use]
    pub const fn cycles(&self) -> u32 {
        self.cycles
    }

    /// Readings of the most recent successful cycle
    #[must_use]
    pub const fn last_readings(&self) -> Option<Readings> {
        self.last
    }

    /// Acquisition subsystem
    #[must_use]
    pub const fn acquisition(&self) -> &Acquisition<M, T, E, C> {
        &self.acquisition
    }

    /// Actuation subsystem
    #[must_use]
    pub const fn actuation(&self) -> &Actuation<A, B, L> {
        &self.actuation
    }

    /// Split into the owned subsystems and the delay
    pub fn release(self) -> (Acquisition<M, T, E, C>, Actuation<A, B, L>, D) {
        (self.acquisition, self.actuation, self.delay)
    }
}
